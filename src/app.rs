//! App struct owning the GL/imgui stack.
//!
//! Used by both the viewer (main.rs) and headed GUI tests. Each frame runs
//! one logic tick against the memory image, builds the debug panel and
//! runs one render tick of the overlay.

use crate::host::{FontRegistry, ImguiHost};
use crate::ui::{self, GuiState};
use std::num::NonZeroU32;

use glow::HasContext;
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::DisplayBuilder;

use imgui_glow_renderer::{AutoRenderer, SimpleTextureMap};
use imgui_winit_support::{HiDpiMode, WinitPlatform};

use raw_window_handle::HasWindowHandle;
use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("window creation failed: {0}")]
    Window(String),
    #[error("window handle unavailable: {0}")]
    Handle(#[from] raw_window_handle::HandleError),
    #[error("GL: {0}")]
    Gl(#[from] glutin::error::Error),
    #[error("imgui renderer: {0}")]
    Renderer(String),
    #[error("frame: {0}")]
    Frame(String),
    #[error("screenshot: {0}")]
    Screenshot(String),
}

struct GlObjects {
    window: Window,
    surface: glutin::surface::Surface<WindowSurface>,
    context: glutin::context::PossiblyCurrentContext,
    config: glutin::config::Config,
}

pub struct App {
    gl: GlObjects,
    imgui: imgui::Context,
    platform: WinitPlatform,
    renderer: AutoRenderer,
    /// Context for overlay texture uploads; shares the GL context with the
    /// renderer.
    loader: glow::Context,
    textures: SimpleTextureMap,
    fonts: FontRegistry,
    pub gui: GuiState,
}

impl App {
    /// Create the app from an active event loop (call in `resumed()` or test setup).
    pub fn new(
        event_loop: &ActiveEventLoop,
        width: f32,
        height: f32,
        gui: GuiState,
    ) -> Result<Self, AppError> {
        let mut imgui = create_imgui_context();
        let mut platform = WinitPlatform::new(&mut imgui);
        let (window, config) = create_gl_window(event_loop, width, height)?;
        platform.attach_window(imgui.io_mut(), &window, HiDpiMode::Default);

        let (surface, context) = create_gl_surface(&window, &config)?;
        let renderer = AutoRenderer::new(create_glow_context(&config), &mut imgui)
            .map_err(|e| AppError::Renderer(format!("{:?}", e)))?;
        let loader = create_glow_context(&config);

        Ok(Self {
            gl: GlObjects {
                window,
                surface,
                context,
                config,
            },
            imgui,
            platform,
            renderer,
            loader,
            textures: SimpleTextureMap::default(),
            fonts: FontRegistry::default(),
            gui,
        })
    }

    pub fn window(&self) -> &Window {
        &self.gl.window
    }

    /// Handle a winit event (forward to imgui platform).
    pub fn handle_event(&mut self, event: &winit::event::Event<()>) {
        self.platform
            .handle_event(self.imgui.io_mut(), &self.gl.window, event);
    }

    /// Handle window resize.
    pub fn handle_resize(&self, size: winit::dpi::PhysicalSize<u32>) {
        if let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            self.gl.surface.resize(&self.gl.context, w, h);
        }
    }

    /// Render one frame: logic tick, panel, overlay, swap.
    pub fn render_frame(&mut self) -> Result<(), AppError> {
        self.platform
            .prepare_frame(self.imgui.io_mut(), &self.gl.window)
            .map_err(|e| AppError::Frame(e.to_string()))?;

        self.gui.logic_tick();

        let ui = self.imgui.new_frame();
        ui::build_ui(ui, &mut self.gui);
        let mut host = ImguiHost::new(ui, &self.loader, &mut self.textures, &mut self.fonts);
        self.gui.plugin.on_vi_update(&mut host);
        self.platform.prepare_render(ui, &self.gl.window);

        let draw_data = self.imgui.render();

        unsafe {
            let gl_ctx = self.renderer.gl_context();
            gl_ctx.clear_color(0.05, 0.08, 0.12, 1.0);
            gl_ctx.clear(glow::COLOR_BUFFER_BIT);
        }

        self.renderer
            .render(draw_data)
            .map_err(|e| AppError::Frame(format!("{:?}", e)))?;
        self.gl.surface.swap_buffers(&self.gl.context)?;

        self.apply_pending_fonts()
    }

    /// Add fonts the overlay asked for during the last frame, then rebuild
    /// the renderer so its atlas texture includes them.
    fn apply_pending_fonts(&mut self) -> Result<(), AppError> {
        let pending = self.fonts.take_pending();
        if pending.is_empty() {
            return Ok(());
        }

        for font in &pending {
            let id = self.imgui.fonts().add_font(&[imgui::FontSource::TtfData {
                data: &font.data,
                size_pixels: font.size_px,
                config: None,
            }]);
            self.fonts.resolve(font.handle, id);
        }
        self.renderer = AutoRenderer::new(create_glow_context(&self.gl.config), &mut self.imgui)
            .map_err(|e| AppError::Renderer(format!("{:?}", e)))?;
        tracing::debug!(count = pending.len(), "font atlas rebuilt");
        Ok(())
    }

    /// Read the current framebuffer as RGBA pixels. Returns (data, width, height).
    pub fn capture_pixels(&self) -> (Vec<u8>, u32, u32) {
        let size = self.gl.window.inner_size();
        let (w, h) = (size.width, size.height);
        let mut pixels = vec![0u8; (w * h * 4) as usize];

        unsafe {
            self.loader.read_pixels(
                0,
                0,
                w as i32,
                h as i32,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelPackData::Slice(&mut pixels),
            );
        }

        flip_rows_rgba(&mut pixels, w as usize * 4);
        (pixels, w, h)
    }

    /// Capture the framebuffer and save as a PNG file (test builds only).
    #[cfg(feature = "test-harness")]
    pub fn screenshot(&self, path: &str) -> Result<(), AppError> {
        let (pixels, w, h) = self.capture_pixels();
        write_png(std::path::Path::new(path), &pixels, w, h)
    }
}

fn create_imgui_context() -> imgui::Context {
    let mut imgui = imgui::Context::create();
    imgui.set_ini_filename(None);
    imgui.style_mut().use_dark_colors();
    imgui.fonts().add_font(&[imgui::FontSource::DefaultFontData {
        config: Some(imgui::FontConfig {
            size_pixels: 14.0,
            ..Default::default()
        }),
    }]);
    imgui
}

fn create_gl_window(
    event_loop: &ActiveEventLoop,
    width: f32,
    height: f32,
) -> Result<(Window, glutin::config::Config), AppError> {
    let window_attrs = WindowAttributes::default()
        .with_inner_size(LogicalSize::new(width, height))
        .with_title("Scarecrow's Song");

    let template = ConfigTemplateBuilder::new();
    let display_builder = DisplayBuilder::new().with_window_attributes(Some(window_attrs));

    let (window, gl_config) = display_builder
        .build(event_loop, template, |configs| {
            configs
                .reduce(|a, b| if a.num_samples() > b.num_samples() { a } else { b })
                .expect("glutin offers at least one config")
        })
        .map_err(|e| AppError::Window(e.to_string()))?;

    let window = window.ok_or_else(|| AppError::Window("no window created".into()))?;
    Ok((window, gl_config))
}

fn create_gl_surface(
    window: &Window,
    gl_config: &glutin::config::Config,
) -> Result<
    (
        glutin::surface::Surface<WindowSurface>,
        glutin::context::PossiblyCurrentContext,
    ),
    AppError,
> {
    let raw_handle = window.window_handle()?.as_raw();
    let gl_display = gl_config.display();

    let context_attrs = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
        .build(Some(raw_handle));
    let gl_context = unsafe { gl_display.create_context(gl_config, &context_attrs)? };

    let size = window.inner_size();
    let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        raw_handle,
        NonZeroU32::new(size.width.max(1)).unwrap_or(NonZeroU32::MIN),
        NonZeroU32::new(size.height.max(1)).unwrap_or(NonZeroU32::MIN),
    );
    let surface = unsafe { gl_display.create_window_surface(gl_config, &surface_attrs)? };
    let context = gl_context.make_current(&surface)?;

    Ok((surface, context))
}

fn create_glow_context(gl_config: &glutin::config::Config) -> glow::Context {
    let gl_display = gl_config.display();
    unsafe { glow::Context::from_loader_function_cstr(|s| gl_display.get_proc_address(s)) }
}

/// glReadPixels returns rows bottom-up; flip them in place.
fn flip_rows_rgba(pixels: &mut [u8], row_bytes: usize) {
    if row_bytes == 0 {
        return;
    }
    let rows = pixels.len() / row_bytes;
    for y in 0..rows / 2 {
        let (head, tail) = pixels.split_at_mut((rows - 1 - y) * row_bytes);
        head[y * row_bytes..(y + 1) * row_bytes].swap_with_slice(&mut tail[..row_bytes]);
    }
}

#[cfg(feature = "test-harness")]
fn write_png(
    path: &std::path::Path,
    pixels: &[u8],
    width: u32,
    height: u32,
) -> Result<(), AppError> {
    use std::fs::File;
    use std::io::BufWriter;

    let err = |e: &dyn std::fmt::Display| {
        AppError::Screenshot(format!("{}: {}", path.display(), e))
    };
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| err(&e))?;
    }
    let file = File::create(path).map_err(|e| err(&e))?;

    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().map_err(|e| err(&e))?;
    writer.write_image_data(pixels).map_err(|e| err(&e))
}
