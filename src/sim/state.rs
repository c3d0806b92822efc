//! Game state and lifecycle
//!
//! `Game` owns everything the simulation touches. Lifecycle transitions live
//! here; per-frame stepping and match resolution live in `tick.rs`.

use super::block::{Block, ColorMapping, LaneLayout};
use super::difficulty::DifficultyManager;
use super::particle::Particle;
use super::random::RandomSource;
use super::score::ScoreSystem;
use crate::Settings;
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first start
    Start,
    /// Active gameplay
    Running,
    /// Frozen until resumed
    Paused,
    /// Lives exhausted, waiting for restart
    GameOver,
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    /// A key press matched a block in the hit zone
    Hit {
        points: u64,
        combo: u32,
        color: &'static ColorMapping,
    },
    /// A key press found nothing to match
    Fail { key: char },
    /// A block fell past the bottom edge
    Escaped { color: &'static ColorMapping },
    LifeLost { lives_left: u8 },
    /// Whole level reached through the time ramp
    LevelUp { level: u32 },
    GameOver { score: u64, best_combo: u32 },
}

/// Geometry and effect tuning for a game instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    pub block_size: f32,
    pub lane_margin: f32,
    pub hit_zone_height: f32,
    pub hit_zone_margin: f32,
    /// Particles per successful match (0 disables particles)
    pub particle_burst: usize,
    /// Whether failed matches flash the playfield
    pub fail_flash: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: MAX_CANVAS_WIDTH,
            height: MAX_CANVAS_WIDTH * ASPECT_H / ASPECT_W,
            block_size: BLOCK_SIZE,
            lane_margin: LANE_MARGIN,
            hit_zone_height: HIT_ZONE_HEIGHT,
            hit_zone_margin: HIT_ZONE_MARGIN,
            particle_burst: PARTICLE_BURST,
            fail_flash: true,
        }
    }
}

impl GameConfig {
    /// Config for a playfield of the given size using user settings
    pub fn from_settings(settings: &Settings, width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            block_size: settings.block_size,
            lane_margin: settings.lane_margin,
            hit_zone_height: settings.hit_zone_height,
            hit_zone_margin: settings.hit_zone_margin,
            particle_burst: if settings.particles {
                settings.particle_burst
            } else {
                0
            },
            fail_flash: !settings.reduced_motion,
        }
    }
}

/// Vertical band where blocks can be matched
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitZone {
    pub top: f32,
    pub bottom: f32,
}

/// The whole game
#[derive(Debug, Clone)]
pub struct Game {
    pub phase: GamePhase,
    pub config: GameConfig,
    pub lanes: LaneLayout,
    pub rng: RandomSource,
    pub blocks: Vec<Block>,
    pub particles: Vec<Particle>,
    pub score: ScoreSystem,
    pub difficulty: DifficultyManager,
    /// Sub-life health, `0..=1`
    pub health: f32,
    pub lives: u8,
    /// Seconds until the next spawn
    pub spawn_timer: f32,
    /// Negative feedback intensity, decays to 0
    pub flash: f32,
    /// Total running time of this run (seconds)
    pub run_time: f32,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            phase: GamePhase::Start,
            lanes: LaneLayout::new(config.width, config.block_size, config.lane_margin),
            config,
            rng: RandomSource::new(seed),
            blocks: Vec::new(),
            particles: Vec::new(),
            score: ScoreSystem::new(),
            difficulty: DifficultyManager::new(),
            health: 1.0,
            lives: START_LIVES,
            spawn_timer: 0.0,
            flash: 0.0,
            run_time: 0.0,
            events: Vec::new(),
        }
    }

    /// Start from the title screen or restart after game over.
    /// Returns false (and changes nothing) in any other phase.
    pub fn start(&mut self) -> bool {
        match self.phase {
            GamePhase::Start | GamePhase::GameOver => {
                self.reset();
                self.phase = GamePhase::Running;
                self.events.push(GameEvent::Started);
                log::info!("Run started (seed {})", self.rng.seed());
                true
            }
            GamePhase::Running | GamePhase::Paused => false,
        }
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        self.phase = GamePhase::Paused;
        self.events.push(GameEvent::Paused);
        log::info!("Paused");
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Resumed);
        log::info!("Resumed");
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Take one step of damage. Three steps from full health cost one life.
    pub fn damage(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        if self.health > DAMAGE_STEP {
            self.health -= DAMAGE_STEP;
            return;
        }
        self.lives = self.lives.saturating_sub(1);
        self.health = 1.0;
        self.events.push(GameEvent::LifeLost {
            lives_left: self.lives,
        });
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver {
                score: self.score.score,
                best_combo: self.score.best_combo,
            });
            log::info!(
                "Game over: score {} best combo x{}",
                self.score.score,
                self.score.best_combo
            );
        }
    }

    pub fn hit_zone(&self) -> HitZone {
        let bottom = self.config.height - self.config.hit_zone_margin;
        HitZone {
            top: bottom - self.config.hit_zone_height,
            bottom,
        }
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn reset(&mut self) {
        self.blocks.clear();
        self.particles.clear();
        self.score.reset();
        self.difficulty = DifficultyManager::new();
        self.health = 1.0;
        self.lives = START_LIVES;
        self.spawn_timer = 0.0;
        self.flash = 0.0;
        self.run_time = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_game() -> Game {
        let mut game = Game::new(GameConfig::default(), 1);
        assert!(game.start());
        game.drain_events();
        game
    }

    #[test]
    fn test_lifecycle() {
        let mut game = Game::new(GameConfig::default(), 1);
        assert_eq!(game.phase, GamePhase::Start);
        assert!(!game.pause());
        assert!(!game.resume());

        assert!(game.start());
        assert_eq!(game.phase, GamePhase::Running);
        assert!(!game.start());

        assert!(game.toggle_pause());
        assert_eq!(game.phase, GamePhase::Paused);
        assert!(!game.start());
        assert!(game.toggle_pause());
        assert_eq!(game.phase, GamePhase::Running);

        assert_eq!(
            game.drain_events(),
            vec![GameEvent::Started, GameEvent::Paused, GameEvent::Resumed]
        );
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_three_damage_steps_cost_one_life() {
        let mut game = running_game();
        game.damage();
        assert!((game.health - 0.66).abs() < 1e-5);
        game.damage();
        assert!((game.health - 0.32).abs() < 1e-5);
        assert_eq!(game.lives, START_LIVES);
        game.damage();
        assert_eq!(game.health, 1.0);
        assert_eq!(game.lives, START_LIVES - 1);
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::LifeLost {
                lives_left: START_LIVES - 1
            }]
        );
    }

    #[test]
    fn test_game_over_when_lives_exhausted() {
        let mut game = running_game();
        for _ in 0..(START_LIVES as usize * 3) {
            game.damage();
        }
        assert_eq!(game.lives, 0);
        assert_eq!(game.phase, GamePhase::GameOver);
        assert!(matches!(
            game.drain_events().last(),
            Some(GameEvent::GameOver { score: 0, best_combo: 1 })
        ));

        // Further damage is ignored
        game.damage();
        assert_eq!(game.lives, 0);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut game = running_game();
        for _ in 0..(START_LIVES as usize * 3) {
            game.damage();
        }
        game.score.score = 500;
        game.difficulty.on_good_hit();
        game.flash = 1.0;

        assert!(game.start());
        assert_eq!(game.phase, GamePhase::Running);
        assert_eq!(game.lives, START_LIVES);
        assert_eq!(game.health, 1.0);
        assert_eq!(game.score, ScoreSystem::new());
        assert_eq!(game.difficulty, DifficultyManager::new());
        assert!(game.blocks.is_empty());
        assert!(game.particles.is_empty());
        assert_eq!(game.flash, 0.0);
    }

    #[test]
    fn test_hit_zone_geometry() {
        let game = Game::new(GameConfig::default(), 1);
        let zone = game.hit_zone();
        assert_eq!(zone.bottom, 540.0 - HIT_ZONE_MARGIN);
        assert_eq!(zone.bottom - zone.top, HIT_ZONE_HEIGHT);
    }

    #[test]
    fn test_config_from_settings() {
        let settings = Settings {
            particles: false,
            reduced_motion: true,
            ..Settings::default()
        };
        let config = GameConfig::from_settings(&settings, 640.0, 360.0);
        assert_eq!(config.width, 640.0);
        assert_eq!(config.height, 360.0);
        assert_eq!(config.particle_burst, 0);
        assert!(!config.fail_flash);
    }
}
