//! Song overlay renderer, run once per video frame.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use sc_ir::{NoteButton, SongDisplay, MELODY_LEN};

use crate::config::OverlayConfig;
use crate::gfx::{FontHandle, RenderHost, Rgba, Texture};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure to load overlay assets. The load is retried next frame.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("failed to load font {path}: {source}")]
    Font {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
    #[error("failed to load icon {path}: {source}")]
    Texture {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
    #[error("failed to list sprites in {path}: {source}")]
    SpriteDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure partway through drawing. The rest of the frame is skipped.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no note in slot {slot}")]
    MissingNote { slot: usize },
    #[error("no sprite mapped for {0}")]
    UnmappedButton(NoteButton),
    #[error("icon {0:?} was not loaded")]
    MissingIcon(String),
}

/// Where the renderer is in loading its assets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Unloaded,
    FontReady,
    Ready,
}

enum Resources {
    Unloaded,
    FontReady {
        font: FontHandle,
    },
    Ready {
        font: FontHandle,
        icons: HashMap<String, Texture>,
    },
}

/// Tracker state the renderer reads.
#[derive(Clone, Copy, Debug)]
pub struct OverlayView<'a> {
    pub shown: bool,
    pub display: Option<&'a SongDisplay>,
}

pub struct OverlayRenderer {
    config: OverlayConfig,
    resources: Resources,
}

impl OverlayRenderer {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            resources: Resources::Unloaded,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        match self.resources {
            Resources::Unloaded => Lifecycle::Unloaded,
            Resources::FontReady { .. } => Lifecycle::FontReady,
            Resources::Ready { .. } => Lifecycle::Ready,
        }
    }

    /// Run one render tick.
    ///
    /// The first successful call only loads the font. The next loads the
    /// icons and, from then on, each call draws the song while the screen is
    /// shown. A failed load leaves the lifecycle where it was.
    pub fn on_render_tick<H: RenderHost>(&mut self, host: &mut H, view: OverlayView<'_>) {
        if let Resources::Unloaded = self.resources {
            match load_font(host, &self.config) {
                Ok(font) => {
                    tracing::debug!(
                        path = %self.config.font_path().display(),
                        "overlay font loaded"
                    );
                    self.resources = Resources::FontReady { font };
                }
                Err(e) => tracing::error!("{}", e),
            }
            return;
        }

        if let Resources::FontReady { font } = self.resources {
            match load_icons(host, &self.config.sprites_path()) {
                Ok(icons) => {
                    tracing::info!(count = icons.len(), "overlay icons loaded");
                    self.resources = Resources::Ready { font, icons };
                }
                Err(e) => {
                    tracing::error!("{}", e);
                    return;
                }
            }
        }

        let Resources::Ready { font, icons } = &self.resources else {
            return;
        };
        if !view.shown {
            return;
        }
        let Some(song) = view.display else {
            return;
        };

        if let Err(e) = draw_song(host, &self.config, *font, icons, song) {
            tracing::warn!(error = %e, ?song, "scarecrow song overlay skipped");
        }
    }
}

fn load_font<H: RenderHost>(
    host: &mut H,
    config: &OverlayConfig,
) -> Result<FontHandle, ResourceError> {
    let path = config.font_path();
    host.load_font(&path, config.font_size)
        .map_err(|e| ResourceError::Font {
            path,
            source: Box::new(e),
        })
}

/// Load every PNG file in `dir` as a texture keyed by its file stem.
///
/// On failure, textures loaded so far are released.
fn load_icons<H: RenderHost>(
    host: &mut H,
    dir: &Path,
) -> Result<HashMap<String, Texture>, ResourceError> {
    let dir_error = |source| ResourceError::SpriteDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(dir_error)? {
        let path = entry.map_err(dir_error)?.path();
        if path.is_file() && is_icon_file(&path) {
            paths.push(path);
        } else {
            tracing::trace!(path = %path.display(), "skipping non-icon entry");
        }
    }
    paths.sort();

    let mut icons = HashMap::with_capacity(paths.len());
    for path in paths {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let stem = stem.to_string();
        match host.load_texture(&path) {
            Ok(texture) => {
                if let Some(old) = icons.insert(stem, texture) {
                    host.release_texture(old);
                }
            }
            Err(e) => {
                for (_, texture) in icons.drain() {
                    host.release_texture(texture);
                }
                return Err(ResourceError::Texture {
                    path,
                    source: Box::new(e),
                });
            }
        }
    }
    Ok(icons)
}

/// Icons are PNG files; anything else in the directory is ignored.
fn is_icon_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

/// Draw all icon slots, then the caption.
///
/// Stops at the first slot that cannot be drawn. Sprites already issued
/// stay on screen for this frame; the caption is not drawn.
fn draw_song<H: RenderHost>(
    host: &mut H,
    config: &OverlayConfig,
    font: FontHandle,
    icons: &HashMap<String, Texture>,
    display: &SongDisplay,
) -> Result<(), RenderError> {
    let viewport = host.viewport_size();
    let text_size = host.calc_text_size(font, display.caption);
    let layout = &config.layout;

    for slot in 0..MELODY_LEN {
        let button = display
            .notes
            .get(slot)
            .ok_or(RenderError::MissingNote { slot })?;
        let asset = config
            .sprite_map
            .asset(button)
            .ok_or(RenderError::UnmappedButton(button))?;
        let texture = icons
            .get(asset)
            .ok_or_else(|| RenderError::MissingIcon(asset.to_string()))?;
        let dst = layout.icon_rect(viewport, slot);
        host.add_sprite(texture, texture.full_rect(), dst, Rgba::WHITE);
    }

    host.add_text(
        font,
        display.caption,
        layout.caption_pos(viewport, text_size),
        Rgba::WHITE,
        Rgba::BLACK,
    );
    Ok(())
}
