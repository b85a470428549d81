//! Plugin context for the Scarecrow's Song overlay.
//!
//! Owns the tracker and the renderer and exposes the two host callbacks:
//! one logic tick per game frame and one render tick per video frame.

mod config;
pub mod gfx;
mod overlay;
mod sprite_map;

use sc_engine::{GameCore, StateTracker, TickSummary};

pub use config::{ConfigError, IconLayout, OverlayConfig};
pub use overlay::{Lifecycle, OverlayRenderer, OverlayView, RenderError, ResourceError};
pub use sc_engine::TrackerError;
pub use sc_ir::{DecodedMelody, NoteButton, SongDisplay};
pub use sprite_map::SpriteMap;

/// One plugin instance. Both callbacks take it by `&mut`, so they never
/// overlap.
pub struct Plugin {
    tracker: StateTracker,
    overlay: OverlayRenderer,
}

impl Plugin {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            tracker: StateTracker::new(),
            overlay: OverlayRenderer::new(config),
        }
    }

    /// Logic tick: refresh screen state and the decoded song.
    pub fn on_tick<C: GameCore + ?Sized>(&mut self, core: &C) -> Result<TickSummary, TrackerError> {
        match self.tracker.on_tick(core) {
            Ok(summary) => Ok(summary),
            Err(e) => {
                tracing::error!("logic tick aborted: {}", e);
                Err(e)
            }
        }
    }

    /// Render tick: load assets if needed and draw the overlay.
    pub fn on_vi_update<H: gfx::RenderHost>(&mut self, host: &mut H) {
        let view = OverlayView {
            shown: self.tracker.is_shown(),
            display: self.tracker.display(),
        };
        self.overlay.on_render_tick(host, view);
    }

    pub fn tracker(&self) -> &StateTracker {
        &self.tracker
    }

    pub fn overlay(&self) -> &OverlayRenderer {
        &self.overlay
    }
}

impl Default for Plugin {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}
