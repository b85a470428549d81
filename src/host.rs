//! [`RenderHost`] over an imgui frame and a glow context.
//!
//! Textures are decoded with `png` and uploaded straight away. Fonts cannot
//! be added to imgui's atlas mid-frame, so they are queued in a
//! [`FontRegistry`] and the app adds them between frames. Until then the
//! default font stands in.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use glow::HasContext;
use imgui::TextureId;
use imgui_glow_renderer::{SimpleTextureMap, TextureMap};
use sc_master::gfx::{FontHandle, Rect, RenderHost, Rgba, Texture, Vec2};

/// Pixel offset of the caption outline.
const OUTLINE_PX: f32 = 2.0;

#[derive(Debug, thiserror::Error)]
pub enum GfxError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Png {
        path: PathBuf,
        #[source]
        source: png::DecodingError,
    },
    #[error("{path}: unsupported PNG color type {color:?}")]
    UnsupportedColor { path: PathBuf, color: png::ColorType },
    #[error("{path} is not a TrueType or OpenType font")]
    NotAFont { path: PathBuf },
    #[error("GL error: {0}")]
    Gl(String),
    #[error("texture could not be registered with the renderer")]
    TextureMap,
}

/// Font file waiting to be added to the atlas.
pub struct PendingFont {
    pub handle: FontHandle,
    pub data: Vec<u8>,
    pub size_px: f32,
}

/// Fonts handed out to the overlay, and the imgui fonts backing them.
#[derive(Default)]
pub struct FontRegistry {
    next: u32,
    pending: Vec<PendingFont>,
    resolved: HashMap<FontHandle, imgui::FontId>,
}

impl FontRegistry {
    pub fn queue(&mut self, data: Vec<u8>, size_px: f32) -> FontHandle {
        let handle = FontHandle(self.next);
        self.next += 1;
        self.pending.push(PendingFont {
            handle,
            data,
            size_px,
        });
        handle
    }

    pub fn take_pending(&mut self) -> Vec<PendingFont> {
        std::mem::take(&mut self.pending)
    }

    pub fn resolve(&mut self, handle: FontHandle, id: imgui::FontId) {
        self.resolved.insert(handle, id);
    }

    pub fn font_id(&self, handle: FontHandle) -> Option<imgui::FontId> {
        self.resolved.get(&handle).copied()
    }
}

/// Per-frame host. Draws go to imgui's background draw list, under every
/// window.
pub struct ImguiHost<'a> {
    ui: &'a imgui::Ui,
    gl: &'a glow::Context,
    textures: &'a mut SimpleTextureMap,
    fonts: &'a mut FontRegistry,
}

impl<'a> ImguiHost<'a> {
    pub fn new(
        ui: &'a imgui::Ui,
        gl: &'a glow::Context,
        textures: &'a mut SimpleTextureMap,
        fonts: &'a mut FontRegistry,
    ) -> Self {
        Self {
            ui,
            gl,
            textures,
            fonts,
        }
    }

    fn upload(&mut self, pixels: &[u8], width: u32, height: u32) -> Result<TextureId, GfxError> {
        let gl = self.gl;
        unsafe {
            let tex = gl.create_texture().map_err(GfxError::Gl)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(tex));
            let linear = glow::LINEAR as i32;
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, linear);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, linear);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(pixels),
            );
            gl.bind_texture(glow::TEXTURE_2D, None);
            match self.textures.register(tex) {
                Some(id) => Ok(id),
                None => {
                    gl.delete_texture(tex);
                    Err(GfxError::TextureMap)
                }
            }
        }
    }
}

impl RenderHost for ImguiHost<'_> {
    type Error = GfxError;

    fn load_font(&mut self, path: &Path, size_px: f32) -> Result<FontHandle, GfxError> {
        let data = fs::read(path).map_err(|source| GfxError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if !is_font(&data) {
            return Err(GfxError::NotAFont {
                path: path.to_path_buf(),
            });
        }
        Ok(self.fonts.queue(data, size_px))
    }

    fn load_texture(&mut self, path: &Path) -> Result<Texture, GfxError> {
        let image = decode_png(path)?;
        let id = self.upload(&image.pixels, image.width, image.height)?;
        tracing::trace!(path = %path.display(), id = id.id(), "texture uploaded");
        Ok(Texture {
            id: id.id() as u64,
            width: image.width,
            height: image.height,
        })
    }

    fn release_texture(&mut self, texture: Texture) {
        if let Some(tex) = self.textures.gl_texture(TextureId::new(texture.id as usize)) {
            unsafe { self.gl.delete_texture(tex) };
        }
    }

    fn viewport_size(&self) -> Vec2 {
        let [w, h] = self.ui.io().display_size;
        Vec2::new(w, h)
    }

    fn calc_text_size(&self, font: FontHandle, text: &str) -> Vec2 {
        let _font = self.fonts.font_id(font).map(|id| self.ui.push_font(id));
        let [w, h] = self.ui.calc_text_size(text);
        Vec2::new(w, h)
    }

    fn add_sprite(&mut self, texture: &Texture, src: Rect, dst: Rect, tint: Rgba) {
        let (tw, th) = (texture.width.max(1) as f32, texture.height.max(1) as f32);
        let [u0, v0] = src.min();
        let [u1, v1] = src.max();
        self.ui
            .get_background_draw_list()
            .add_image(TextureId::new(texture.id as usize), dst.min(), dst.max())
            .uv_min([u0 / tw, v0 / th])
            .uv_max([u1 / tw, v1 / th])
            .col(tint.to_f32())
            .build();
    }

    fn add_text(&mut self, font: FontHandle, text: &str, pos: Vec2, color: Rgba, outline: Rgba) {
        let _font = self.fonts.font_id(font).map(|id| self.ui.push_font(id));
        let draw_list = self.ui.get_background_draw_list();
        let outline = outline.to_f32();
        let offsets = [
            (-OUTLINE_PX, 0.0),
            (OUTLINE_PX, 0.0),
            (0.0, -OUTLINE_PX),
            (0.0, OUTLINE_PX),
        ];
        for (dx, dy) in offsets {
            draw_list.add_text([pos.x + dx, pos.y + dy], outline, text);
        }
        draw_list.add_text([pos.x, pos.y], color.to_f32(), text);
    }
}

/// sfnt version tags imgui's rasterizer accepts.
fn is_font(data: &[u8]) -> bool {
    matches!(
        data.get(..4),
        Some([0x00, 0x01, 0x00, 0x00]) | Some(b"OTTO") | Some(b"true") | Some(b"ttcf")
    )
}

/// RGBA8 pixels of a decoded image.
pub struct Image {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Decode a PNG file to RGBA8, expanding palette, gray and 16-bit images.
pub fn decode_png(path: &Path) -> Result<Image, GfxError> {
    let png_error = |source| GfxError::Png {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(|source| GfxError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info().map_err(png_error)?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).map_err(png_error)?;
    buf.truncate(info.buffer_size());

    let pixels = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 0xFF])
            .collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&g| [g, g, g, 0xFF]).collect(),
        color => {
            return Err(GfxError::UnsupportedColor {
                path: path.to_path_buf(),
                color,
            })
        }
    };

    Ok(Image {
        pixels,
        width: info.width,
        height: info.height,
    })
}
