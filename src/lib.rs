//! Chroma Drop - a falling-block color matching arcade game
//!
//! Core modules:
//! - `sim`: Simulation (blocks, particles, scoring, difficulty, game state)
//! - `input`: Keyboard state and per-key subscriptions
//! - `hud`: Presentation interface for score/combo/lives/panels
//! - `audio`: Named sound effects behind an enable gate
//! - `renderer`: Frame drawing against a primitive 2D surface
//! - `platform`: Browser adapters (DOM HUD, canvas sizing)
//! - `settings`: Runtime configuration

pub mod audio;
pub mod hud;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta fed to the simulation (a backgrounded tab can stall for seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield width cap and aspect ratio (16:9)
    pub const MAX_CANVAS_WIDTH: f32 = 960.0;
    pub const ASPECT_W: f32 = 16.0;
    pub const ASPECT_H: f32 = 9.0;

    /// Block tile edge length in pixels
    pub const BLOCK_SIZE: f32 = 56.0;
    /// Horizontal inset of the outermost lanes
    pub const LANE_MARGIN: f32 = 24.0;
    /// Lower bound on lane count regardless of canvas width
    pub const MIN_LANES: usize = 6;

    /// Hit zone band height and its inset from the bottom edge
    pub const HIT_ZONE_HEIGHT: f32 = 90.0;
    pub const HIT_ZONE_MARGIN: f32 = 28.0;

    /// Seconds of running time per level step
    pub const LEVEL_WINDOW_SECS: f32 = 12.0;
    /// Level gained per successful match
    pub const LEVEL_PER_HIT: f32 = 0.1;
    /// Fall duration (seconds to cross the canvas) = max(floor, base - level * slope)
    pub const FALL_DURATION_BASE: f32 = 2.0;
    pub const FALL_DURATION_SLOPE: f32 = 0.12;
    pub const FALL_DURATION_FLOOR: f32 = 0.7;
    /// Spawn interval = max(floor, base - level * slope)
    pub const SPAWN_INTERVAL_BASE: f32 = 1.2;
    pub const SPAWN_INTERVAL_SLOPE: f32 = 0.06;
    pub const SPAWN_INTERVAL_FLOOR: f32 = 0.35;

    /// Scoring
    pub const POINTS_PER_HIT: u64 = 10;
    pub const HITS_PER_COMBO_STEP: u32 = 5;
    pub const MAX_COMBO: u32 = 10;

    /// Lives and sub-life health
    pub const START_LIVES: u8 = 3;
    pub const DAMAGE_STEP: f32 = 0.34;

    /// Particles spawned per successful match
    pub const PARTICLE_BURST: usize = 24;
    /// Gravity applied to particles (pixels/s²), scaled down for a floaty burst
    pub const PARTICLE_GRAVITY: f32 = 980.0 * 0.75;
    pub const PARTICLE_SPEED_MIN: f32 = 120.0;
    pub const PARTICLE_SPEED_MAX: f32 = 380.0;
    pub const PARTICLE_LIFE_MIN: f32 = 0.4;
    pub const PARTICLE_LIFE_MAX: f32 = 0.9;
    pub const PARTICLE_SIZE_MIN: f32 = 2.0;
    pub const PARTICLE_SIZE_MAX: f32 = 5.0;

    /// Fail flash intensity on a wrong key, and its decay per second
    pub const FLASH_ON_FAIL: f32 = 1.0;
    pub const FLASH_DECAY: f32 = 4.0;
}
