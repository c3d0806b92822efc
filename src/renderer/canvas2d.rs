//! `Surface` backed by a browser 2D canvas context

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Rect, Surface};

pub struct Canvas2dSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        let surface = Self { canvas, ctx };
        surface.reset_text_style();
        Ok(surface)
    }

    /// Resize the backing store. Resizing wipes context state, so text settings are restored.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.reset_text_style();
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn reset_text_style(&self) {
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
    }

    fn round_rect_path(&self, r: Rect, radius: f32) {
        let (x, y, w, h) = (r.x as f64, r.y as f64, r.w as f64, r.h as f64);
        let rad = (radius as f64).min(w / 2.0).min(h / 2.0).max(0.0);
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(x + rad, y);
        ctx.line_to(x + w - rad, y);
        ctx.quadratic_curve_to(x + w, y, x + w, y + rad);
        ctx.line_to(x + w, y + h - rad);
        ctx.quadratic_curve_to(x + w, y + h, x + w - rad, y + h);
        ctx.line_to(x + rad, y + h);
        ctx.quadratic_curve_to(x, y + h, x, y + h - rad);
        ctx.line_to(x, y + rad);
        ctx.quadratic_curve_to(x, y, x + rad, y);
        ctx.close_path();
    }
}

impl Surface for Canvas2dSurface {
    fn size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn fill_rect(&mut self, r: Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(r.x as f64, r.y as f64, r.w as f64, r.h as f64);
    }

    fn stroke_rect(&mut self, r: Rect, color: &str, line_width: f32) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width as f64);
        self.ctx
            .stroke_rect(r.x as f64, r.y as f64, r.w as f64, r.h as f64);
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: f32, color: &str) {
        self.round_rect_path(rect, radius);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn stroke_round_rect(&mut self, rect: Rect, radius: f32, color: &str, line_width: f32) {
        self.round_rect_path(rect, radius);
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width as f64);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str) {
        self.ctx.set_font(font);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_text(text, x as f64, y as f64).ok();
    }

    fn fill_vertical_gradient(&mut self, r: Rect, top: &str, bottom: &str) {
        let gradient = self
            .ctx
            .create_linear_gradient(0.0, r.y as f64, 0.0, (r.y + r.h) as f64);
        if gradient.add_color_stop(0.0, top).is_err() || gradient.add_color_stop(1.0, bottom).is_err() {
            log::warn!("Invalid gradient colors: {} / {}", top, bottom);
            self.fill_rect(r, bottom);
            return;
        }
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx
            .fill_rect(r.x as f64, r.y as f64, r.w as f64, r.h as f64);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
    }
}
