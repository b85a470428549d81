//! Shared fixtures: a render host that records every call, and sprite
//! directories on disk.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use sc_master::gfx::{FontHandle, Rect, RenderHost, Rgba, Texture, Vec2};
use sc_master::OverlayConfig;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    LoadFont { path: PathBuf, size: f32 },
    LoadTexture(PathBuf),
    Release(u64),
    Sprite { texture: u64, src: Rect, dst: Rect, tint: Rgba },
    Text { text: String, pos: Vec2, color: Rgba, outline: Rgba },
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct HostError(pub String);

pub struct RecordingHost {
    pub calls: Vec<Call>,
    pub viewport: Vec2,
    pub text_size: Vec2,
    pub fail_font: bool,
    /// File stem whose texture load fails
    pub fail_texture: Option<String>,
    next_id: u64,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            viewport: Vec2::new(640.0, 480.0),
            text_size: Vec2::new(200.0, 24.0),
            fail_font: false,
            fail_texture: None,
            next_id: 1,
        }
    }

    pub fn sprites(&self) -> Vec<(u64, Rect)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Sprite { texture, dst, .. } => Some((*texture, *dst)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<(String, Vec2)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Text { text, pos, .. } => Some((text.clone(), *pos)),
                _ => None,
            })
            .collect()
    }

    pub fn loaded_textures(&self) -> Vec<PathBuf> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::LoadTexture(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn released(&self) -> Vec<u64> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Release(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl RenderHost for RecordingHost {
    type Error = HostError;

    fn load_font(&mut self, path: &Path, size_px: f32) -> Result<FontHandle, HostError> {
        self.calls.push(Call::LoadFont {
            path: path.to_path_buf(),
            size: size_px,
        });
        if self.fail_font {
            return Err(HostError("font unavailable".into()));
        }
        Ok(FontHandle(7))
    }

    fn load_texture(&mut self, path: &Path) -> Result<Texture, HostError> {
        self.calls.push(Call::LoadTexture(path.to_path_buf()));
        let is_png = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("png"));
        if !is_png {
            return Err(HostError(format!("{} is not a PNG", path.display())));
        }
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        if self.fail_texture.as_deref() == Some(stem) {
            return Err(HostError(format!("cannot decode {}", stem)));
        }
        let id = self.next_id;
        self.next_id += 1;
        Ok(Texture {
            id,
            width: 24,
            height: 64,
        })
    }

    fn release_texture(&mut self, texture: Texture) {
        self.calls.push(Call::Release(texture.id));
    }

    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    fn calc_text_size(&self, _font: FontHandle, _text: &str) -> Vec2 {
        self.text_size
    }

    fn add_sprite(&mut self, texture: &Texture, src: Rect, dst: Rect, tint: Rgba) {
        self.calls.push(Call::Sprite {
            texture: texture.id,
            src,
            dst,
            tint,
        });
    }

    fn add_text(&mut self, _font: FontHandle, text: &str, pos: Vec2, color: Rgba, outline: Rgba) {
        self.calls.push(Call::Text {
            text: text.to_string(),
            pos,
            color,
            outline,
        });
    }
}

/// Fresh asset directory with empty icon files named after `stems`.
pub fn asset_dir(name: &str, stems: &[&str]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sc-overlay-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    let sprites = dir.join("sprites");
    fs::create_dir_all(&sprites).unwrap();
    for stem in stems {
        fs::write(sprites.join(format!("{}.png", stem)), b"").unwrap();
    }
    dir
}

pub const ALL_ICONS: [&str; 5] = ["a", "c_down", "c_left", "c_right", "c_up"];

pub fn config_for(dir: &Path) -> OverlayConfig {
    OverlayConfig::default().with_assets_dir(dir)
}
