//! Drawing primitives the host provides.

use std::path::Path;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle: top-left corner plus size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn min(&self) -> [f32; 2] {
        [self.x, self.y]
    }

    pub fn max(&self) -> [f32; 2] {
        [self.x + self.w, self.y + self.h]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Self = Self::new(0xFF, 0xFF, 0xFF, 0xFF);
    pub const BLACK: Self = Self::new(0, 0, 0, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Components scaled to 0.0..=1.0.
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// Host-side font handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontHandle(pub u32);

/// Host-side texture handle plus its pixel size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Texture {
    pub id: u64,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Rectangle covering the whole texture.
    pub fn full_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }
}

/// Resource loading and immediate-mode drawing supplied by the host.
///
/// Draw calls go to a background layer behind any host UI and must not
/// block.
pub trait RenderHost {
    type Error: std::error::Error + Send + Sync + 'static;

    fn load_font(&mut self, path: &Path, size_px: f32) -> Result<FontHandle, Self::Error>;

    fn load_texture(&mut self, path: &Path) -> Result<Texture, Self::Error>;

    /// Give back a texture that will not be used.
    fn release_texture(&mut self, _texture: Texture) {}

    /// Size of the game viewport in pixels.
    fn viewport_size(&self) -> Vec2;

    fn calc_text_size(&self, font: FontHandle, text: &str) -> Vec2;

    /// Draw `src` (texture pixels) of `texture` into `dst` (screen pixels).
    fn add_sprite(&mut self, texture: &Texture, src: Rect, dst: Rect, tint: Rgba);

    fn add_text(&mut self, font: FontHandle, text: &str, pos: Vec2, color: Rgba, outline: Rgba);
}
