//! Overlay configuration.
//!
//! Every field has a default, so a JSON file only needs the keys it changes.

use std::fs;
use std::path::{Path, PathBuf};

use sc_engine::addresses::DEFAULT_SAVE_CONTEXT;
use serde::{Deserialize, Serialize};

use crate::gfx::{Rect, Vec2};
use crate::sprite_map::SpriteMap;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Placement of the icon row and caption, in pixels from the bottom-right.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconLayout {
    /// Distance from the right edge to the first icon
    pub right_margin: f32,
    /// Distance from the bottom edge to the top of the icons
    pub bottom_margin: f32,
    pub icon_width: f32,
    pub icon_height: f32,
    /// Horizontal step between icons
    pub stride: f32,
    /// Gap between the caption's bottom and the bottom edge
    pub text_gap: f32,
}

impl Default for IconLayout {
    fn default() -> Self {
        Self {
            right_margin: 98.0,
            bottom_margin: 34.0,
            icon_width: 12.0,
            icon_height: 32.0,
            stride: 12.0,
            text_gap: 2.0,
        }
    }
}

impl IconLayout {
    /// Screen rectangle for icon `slot`.
    pub fn icon_rect(&self, viewport: Vec2, slot: usize) -> Rect {
        Rect::new(
            viewport.x - self.right_margin + slot as f32 * self.stride,
            viewport.y - self.bottom_margin,
            self.icon_width,
            self.icon_height,
        )
    }

    /// Top-left of a caption of `text_size`, ending where the icons start.
    pub fn caption_pos(&self, viewport: Vec2, text_size: Vec2) -> Vec2 {
        Vec2::new(
            viewport.x - text_size.x - self.right_margin,
            viewport.y - (text_size.y + self.text_gap),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Root of the bundled assets
    pub assets_dir: PathBuf,
    /// Caption font, relative to `assets_dir`
    pub font_file: PathBuf,
    pub font_size: f32,
    /// Icon directory, relative to `assets_dir`
    pub sprites_dir: PathBuf,
    pub sprite_map: SpriteMap,
    pub layout: IconLayout,
    /// Save context base used by hosts that cannot ask the game core
    pub save_context: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            font_file: PathBuf::from("Cantarell-Regular.ttf"),
            font_size: 22.0,
            sprites_dir: PathBuf::from("sprites"),
            sprite_map: SpriteMap::default(),
            layout: IconLayout::default(),
            save_context: DEFAULT_SAVE_CONTEXT,
        }
    }
}

impl OverlayConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Same config with assets rooted at `dir`.
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    pub fn font_path(&self) -> PathBuf {
        self.assets_dir.join(&self.font_file)
    }

    pub fn sprites_path(&self) -> PathBuf {
        self.assets_dir.join(&self.sprites_dir)
    }
}
