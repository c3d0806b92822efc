//! Difficulty ramp
//!
//! Level rises by one every `LEVEL_WINDOW_SECS` of running time and by
//! `LEVEL_PER_HIT` on every successful match. Fall duration and spawn interval
//! decay linearly with level down to hard floors.

use crate::consts::*;

#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyManager {
    /// Seconds elapsed in the current level window
    pub elapsed: f32,
    /// Real-valued level, starts at 1
    pub level: f32,
    /// Seconds a block takes to cross the canvas
    pub base_fall_duration: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
    pub fall_duration_floor: f32,
    pub spawn_interval_floor: f32,
}

impl Default for DifficultyManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DifficultyManager {
    pub fn new() -> Self {
        let mut difficulty = Self {
            elapsed: 0.0,
            level: 1.0,
            base_fall_duration: FALL_DURATION_BASE,
            spawn_interval: SPAWN_INTERVAL_BASE,
            fall_duration_floor: FALL_DURATION_FLOOR,
            spawn_interval_floor: SPAWN_INTERVAL_FLOOR,
        };
        difficulty.recompute();
        difficulty
    }

    /// Advance the level window. Returns true when a whole level was gained.
    pub fn update(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= LEVEL_WINDOW_SECS {
            self.elapsed = 0.0;
            self.level += 1.0;
            self.recompute();
            return true;
        }
        false
    }

    pub fn on_good_hit(&mut self) {
        self.level += LEVEL_PER_HIT;
        self.recompute();
    }

    /// Fall speed in pixels/second for a canvas `height` pixels tall
    pub fn fall_speed_for(&self, height: f32) -> f32 {
        height / self.fall_duration_floor.max(self.base_fall_duration)
    }

    /// Progress through the current level window, `0..1`
    pub fn window_progress(&self) -> f32 {
        (self.elapsed / LEVEL_WINDOW_SECS).clamp(0.0, 1.0)
    }

    fn recompute(&mut self) {
        self.base_fall_duration = self
            .fall_duration_floor
            .max(FALL_DURATION_BASE - self.level * FALL_DURATION_SLOPE);
        self.spawn_interval = self
            .spawn_interval_floor
            .max(SPAWN_INTERVAL_BASE - self.level * SPAWN_INTERVAL_SLOPE);
    }
}
