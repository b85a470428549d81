//! scarecrow-viewer: the Scarecrow's Song overlay on a desktop window.
//!
//! Usage:
//!   scarecrow-viewer                       built-in demo scene
//!   scarecrow-viewer rdram.bin [--paused]  a captured RDRAM dump
//!   ... [--config overlay.json]            overlay settings
//!
//! Log output is controlled with RUST_LOG (default `info`).

use std::path::PathBuf;
use std::{env, process};

use scarecrow_overlay::app::App;
use scarecrow_overlay::demo;
use scarecrow_overlay::ui::GuiState;
use sc_master::{OverlayConfig, Plugin};

use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::WindowId;

struct Args {
    dump: Option<PathBuf>,
    config: Option<PathBuf>,
    paused: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        dump: None,
        config: None,
        paused: false,
    };
    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--paused" => args.paused = true,
            "--config" => match iter.next() {
                Some(path) => args.config = Some(path.into()),
                None => usage(),
            },
            "-h" | "--help" => usage(),
            _ if arg.starts_with('-') => usage(),
            _ => args.dump = Some(arg.into()),
        }
    }
    args
}

fn usage() -> ! {
    eprintln!("Usage: scarecrow-viewer [rdram.bin] [--paused] [--config overlay.json]");
    process::exit(2);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = parse_args();
    let gui = build_state(&args).unwrap_or_else(|e| {
        tracing::error!("{}", e);
        process::exit(1);
    });

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("failed to create event loop: {}", e);
            process::exit(1);
        }
    };
    let mut state = AppState {
        app: None,
        pending: Some(gui),
    };
    if let Err(e) = event_loop.run_app(&mut state) {
        tracing::error!("event loop: {}", e);
        process::exit(1);
    }
}

fn build_state(args: &Args) -> Result<GuiState, Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => OverlayConfig::load(path)?,
        None => OverlayConfig::default(),
    };
    let save_context = config.save_context;
    tracing::info!(
        font = %config.font_path().display(),
        sprites = %config.sprites_path().display(),
        "overlay assets"
    );

    let (core, source) = match &args.dump {
        Some(path) => {
            let mut core = demo::load_dump(path, save_context)?;
            core.paused = args.paused;
            (core, path.display().to_string())
        }
        None => (demo::demo_core(save_context)?, "demo scene".to_string()),
    };
    Ok(GuiState::new(Plugin::new(config), core, source))
}

struct AppState {
    app: Option<App>,
    /// State handed to the app once the window exists.
    pending: Option<GuiState>,
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gui) = self.pending.take() else {
            return;
        };
        match App::new(event_loop, 640.0, 480.0, gui) {
            Ok(app) => self.app = Some(app),
            Err(e) => {
                tracing::error!("{}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(app) = &mut self.app else { return };

        let wrapped: winit::event::Event<()> = winit::event::Event::WindowEvent {
            window_id,
            event: event.clone(),
        };
        app.handle_event(&wrapped);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => app.handle_resize(size),
            WindowEvent::RedrawRequested => {
                if let Err(e) = app.render_frame() {
                    tracing::error!("{}", e);
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(app) = &self.app {
            app.window().request_redraw();
        }
    }
}
