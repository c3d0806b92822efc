//! DOM lookups, canvas sizing and the page HUD

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, Window};

use crate::hud::{Hud, Panel};

pub const CANVAS_ID: &str = "game-canvas";

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn canvas(document: &Document) -> Result<HtmlCanvasElement, JsValue> {
    document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| JsValue::from_str("no canvas"))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("not a canvas"))
}

/// Width the canvas may grow to: its container, else the window
pub fn available_width(canvas: &HtmlCanvasElement) -> f32 {
    let parent = canvas
        .parent_element()
        .map(|p| p.client_width())
        .filter(|w| *w > 0);
    match parent {
        Some(w) => w as f32,
        None => window()
            .ok()
            .and_then(|w| w.inner_width().ok())
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0) as f32,
    }
}

/// Show or hide an element via the `hidden` class
pub fn set_visible(el: &Element, visible: bool) -> Result<(), JsValue> {
    el.class_list().toggle_with_force("hidden", !visible)?;
    Ok(())
}

fn panel_id(panel: Panel) -> &'static str {
    match panel {
        Panel::Start => "start-panel",
        Panel::Pause => "pause-panel",
        Panel::GameOver => "gameover-panel",
    }
}

/// HUD backed by page elements. Missing elements are skipped.
pub struct DomHud {
    score: Option<Element>,
    combo: Option<Element>,
    lives: Option<HtmlElement>,
    level: Option<HtmlElement>,
    final_score: Option<Element>,
    final_combo: Option<Element>,
    panels: Vec<(Panel, Element)>,
}

impl DomHud {
    pub fn new(document: &Document) -> Self {
        let html = |id: &str| {
            document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        };
        let panels = Panel::ALL
            .iter()
            .filter_map(|p| document.get_element_by_id(panel_id(*p)).map(|el| (*p, el)))
            .collect::<Vec<_>>();
        if panels.len() != Panel::ALL.len() {
            log::warn!("Some HUD panels are missing from the page");
        }

        Self {
            score: document.get_element_by_id("hud-score"),
            combo: document.get_element_by_id("hud-combo"),
            lives: html("hud-lives"),
            level: html("hud-level"),
            final_score: document.get_element_by_id("final-score"),
            final_combo: document.get_element_by_id("final-combo"),
            panels,
        }
    }

    fn report(result: Result<(), JsValue>) {
        if let Err(e) = result {
            log::warn!("HUD update failed: {:?}", e);
        }
    }
}

impl Hud for DomHud {
    fn update_score(&mut self, score: u64) {
        if let Some(el) = &self.score {
            el.set_text_content(Some(&score.to_string()));
        }
    }

    fn update_combo(&mut self, combo: u32, active: bool) {
        if let Some(el) = &self.combo {
            el.set_text_content(Some(&format!("x{}", combo)));
            Self::report(
                el.class_list()
                    .toggle_with_force("active", active)
                    .map(|_| ()),
            );
        }
    }

    fn update_lives(&mut self, lives: u8, max: u8, health: f32) {
        if let Some(el) = &self.lives {
            let hearts: String = (0..max)
                .map(|i| if i < lives { '\u{2665}' } else { '\u{2661}' })
                .collect();
            el.set_text_content(Some(&hearts));
            Self::report(
                el.style()
                    .set_property("--health", &format!("{:.2}", health.clamp(0.0, 1.0))),
            );
        }
    }

    fn update_level_ring(&mut self, progress: f32, level: u32) {
        if let Some(el) = &self.level {
            el.set_text_content(Some(&level.to_string()));
            Self::report(
                el.style()
                    .set_property("--progress", &format!("{:.3}", progress.clamp(0.0, 1.0))),
            );
        }
    }

    fn show_panel(&mut self, panel: Panel, visible: bool) {
        if let Some((_, el)) = self.panels.iter().find(|(p, _)| *p == panel) {
            Self::report(set_visible(el, visible));
        }
    }

    fn update_final(&mut self, score: u64, best_combo: u32) {
        if let Some(el) = &self.final_score {
            el.set_text_content(Some(&score.to_string()));
        }
        if let Some(el) = &self.final_combo {
            el.set_text_content(Some(&format!("x{}", best_combo)));
        }
    }
}
