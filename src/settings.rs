//! Runtime configuration
//!
//! Read once at boot from an optional JSON block embedded in the page. Nothing
//! is ever written back; a missing or malformed block falls back to defaults.

use serde::Deserialize;

use crate::consts::*;

/// Accent used for the hit zone when none is configured
pub const DEFAULT_ACCENT: &str = "#7cf6ff";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    /// Canvas width cap in CSS pixels (height follows 16:9)
    pub max_canvas_width: f32,
    /// Block tile size in pixels
    pub block_size: f32,
    /// Horizontal inset of the outer lanes
    pub lane_margin: f32,
    /// Hit zone band height
    pub hit_zone_height: f32,
    /// Hit zone inset from the bottom edge
    pub hit_zone_margin: f32,

    // === Visual Effects ===
    /// Particle bursts on hits
    pub particles: bool,
    /// Particles per burst
    pub particle_burst: usize,
    /// Hit zone / HUD accent color (CSS color)
    pub accent_color: Option<String>,

    // === Input ===
    /// Drop OS auto-repeat key-downs instead of re-triggering matches
    pub ignore_key_repeat: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no fail flash)
    pub reduced_motion: bool,

    // === Diagnostics ===
    /// `log` level name: error, warn, info, debug, trace
    pub log_level: String,
    /// Fixed RNG seed (random per run when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_canvas_width: MAX_CANVAS_WIDTH,
            block_size: BLOCK_SIZE,
            lane_margin: LANE_MARGIN,
            hit_zone_height: HIT_ZONE_HEIGHT,
            hit_zone_margin: HIT_ZONE_MARGIN,

            particles: true,
            particle_burst: PARTICLE_BURST,
            accent_color: None,

            ignore_key_repeat: false,

            master_volume: 0.6,
            muted: false,

            reduced_motion: false,

            log_level: "info".to_string(),
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Clamp values that would break the playfield or the mixer
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.max_canvas_width.is_finite() || self.max_canvas_width < 320.0 {
            self.max_canvas_width = defaults.max_canvas_width;
        }
        if !self.block_size.is_finite() || self.block_size < 8.0 {
            self.block_size = defaults.block_size;
        }
        if !self.hit_zone_height.is_finite() || self.hit_zone_height < self.block_size / 2.0 {
            self.hit_zone_height = defaults.hit_zone_height.max(self.block_size / 2.0);
        }
        self.lane_margin = self.lane_margin.max(0.0);
        self.hit_zone_margin = self.hit_zone_margin.max(0.0);
        self.master_volume = if self.master_volume.is_finite() {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            defaults.master_volume
        };
        if self
            .accent_color
            .as_deref()
            .is_some_and(|c| c.trim().is_empty())
        {
            self.accent_color = None;
        }
        self
    }

    /// Accent color, falling back to the default
    pub fn accent(&self) -> &str {
        self.accent_color.as_deref().unwrap_or(DEFAULT_ACCENT)
    }

    /// Effective volume (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Parsed log level, `Info` for unknown names
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    /// Id of the `<script type="application/json">` element holding page settings
    pub const CONFIG_ELEMENT_ID: &'static str = "chroma-drop-config";

    /// Load settings from the page config element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => match Self::from_json(&json) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("Ignoring malformed settings: {}", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
