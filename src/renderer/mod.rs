//! Playfield rendering
//!
//! Drawing goes through the small `Surface` trait so frames can be produced
//! against the browser's 2D canvas or a recorder in tests.

pub mod frame;

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;

#[cfg(target_arch = "wasm32")]
pub use canvas2d::Canvas2dSurface;
pub use frame::draw_frame;

use crate::Settings;
use crate::consts::{ASPECT_H, ASPECT_W};

/// Axis-aligned rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
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

    /// Square of side `size` centered on a point
    pub fn centered(cx: f32, cy: f32, size: f32) -> Self {
        Self::new(cx - size / 2.0, cy - size / 2.0, size, size)
    }
}

/// Primitive drawing operations. Colors are CSS color strings.
pub trait Surface {
    /// Drawable size in pixels
    fn size(&self) -> (f32, f32);
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, color: &str);
    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f32);
    fn fill_round_rect(&mut self, rect: Rect, radius: f32, color: &str);
    fn stroke_round_rect(&mut self, rect: Rect, radius: f32, color: &str, line_width: f32);
    /// Text centered on `(x, y)`
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str);
    fn fill_vertical_gradient(&mut self, rect: Rect, top: &str, bottom: &str);
    /// Global opacity for subsequent operations
    fn set_alpha(&mut self, alpha: f32);
}

/// Colors used for everything that isn't a block
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background_top: String,
    pub background_bottom: String,
    pub lane: String,
    pub accent: String,
    pub text: String,
    pub flash: String,
    pub font: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl Theme {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            background_top: "#0b1020".to_string(),
            background_bottom: "#1b1440".to_string(),
            lane: "rgba(255, 255, 255, 0.06)".to_string(),
            accent: settings.accent().to_string(),
            text: "#0b1020".to_string(),
            flash: "#ff2d4a".to_string(),
            font: "bold 22px 'Fira Code', monospace".to_string(),
        }
    }
}

/// Canvas size for the available width: capped, with a 16:9 aspect
pub fn fit_canvas_size(available_width: f32, cap: f32) -> (f32, f32) {
    let width = available_width.min(cap).max(0.0).floor();
    (width, (width * ASPECT_H / ASPECT_W).floor())
}
