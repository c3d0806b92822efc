//! Simulation module
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - Time only advances through `Game::update(dt)`
//! - Seeded RNG only
//! - No rendering, audio or DOM dependencies

pub mod block;
pub mod difficulty;
pub mod particle;
pub mod random;
pub mod score;
pub mod state;
pub mod tick;

pub use block::{Block, COLORS, ColorMapping, LaneLayout, color_for_key};
pub use difficulty::DifficultyManager;
pub use particle::Particle;
pub use random::RandomSource;
pub use score::ScoreSystem;
pub use state::{Game, GameConfig, GameEvent, GamePhase, HitZone};
pub use tick::MatchResult;
