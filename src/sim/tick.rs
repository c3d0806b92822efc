//! Per-frame stepping and key-press resolution
//!
//! `update` advances the simulation by a variable time delta; `attempt_match`
//! and `handle_key` run between frames in response to input.

use glam::Vec2;

use super::block::{Block, COLORS, color_for_key};
use super::particle::burst;
use super::state::{Game, GameEvent, GamePhase};
use crate::consts::*;

/// Outcome of a key press against the hit zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// Game not running, nothing happened
    Ignored,
    /// A block was matched and removed
    Hit { points: u64 },
    /// Nothing eligible, counted as a miss
    Miss,
}

impl Game {
    /// Advance the simulation by `dt` seconds. Does nothing unless running.
    pub fn update(&mut self, dt: f32) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.run_time += dt;
        self.flash = (self.flash - FLASH_DECAY * dt).max(0.0);

        // Difficulty first so spawns use this frame's parameters
        if self.difficulty.update(dt) {
            let level = self.difficulty.level.floor() as u32;
            log::debug!("Level up: {}", level);
            self.push_event(GameEvent::LevelUp { level });
        }

        self.spawn_timer -= dt;
        if self.spawn_timer <= 0.0 {
            self.spawn_block();
            self.spawn_timer = self.difficulty.spawn_interval;
        }

        for block in &mut self.blocks {
            block.advance(dt);
        }

        let bottom = self.config.height;
        let mut escaped = Vec::new();
        for block in self.blocks.iter_mut().filter(|b| !b.removed) {
            if block.pos.y > bottom {
                block.removed = true;
                escaped.push(block.color);
            }
        }
        for color in escaped {
            self.score.miss();
            self.push_event(GameEvent::Escaped { color });
            self.damage();
        }
        self.blocks.retain(|b| !b.removed);

        for particle in &mut self.particles {
            particle.advance(dt);
        }
        self.particles.retain(|p| p.alive);
    }

    /// Resolve a color key press against the hit zone
    pub fn attempt_match(&mut self, key: char) -> MatchResult {
        if self.phase != GamePhase::Running {
            return MatchResult::Ignored;
        }
        let key = key.to_ascii_lowercase();

        let Some(index) = self.match_candidate(Some(key)) else {
            self.score.miss();
            if self.config.fail_flash {
                self.flash = FLASH_ON_FAIL;
            }
            self.push_event(GameEvent::Fail { key });
            return MatchResult::Miss;
        };

        let block = self.blocks.swap_remove(index);
        let center = block.center();
        let color = block.color;

        let count = self.config.particle_burst;
        let particles: Vec<_> = burst(&mut self.rng, center, color.display, count).collect();
        self.particles.extend(particles);

        let points = self.score.hit();
        self.difficulty.on_good_hit();
        self.push_event(GameEvent::Hit {
            points,
            combo: self.score.combo,
            color,
        });
        MatchResult::Hit { points }
    }

    /// Route a raw key name (as reported by the browser) to the game.
    /// Space toggles pause, Enter starts/restarts, color keys attempt a match.
    /// Returns false for keys the game does not use.
    pub fn handle_key(&mut self, key: &str) -> bool {
        let key = key.to_ascii_lowercase();
        match key.as_str() {
            " " | "space" => {
                self.toggle_pause();
                true
            }
            "enter" => {
                self.start();
                true
            }
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if color_for_key(c).is_some() => {
                        self.attempt_match(c);
                        true
                    }
                    _ => false,
                }
            }
        }
    }

    /// Key of the block an ideal player would press for right now
    pub fn suggest_key(&self) -> Option<char> {
        if self.phase != GamePhase::Running {
            return None;
        }
        self.match_candidate(None).map(|i| self.blocks[i].color.key)
    }

    /// Index of the lowest block overlapping the hit zone, optionally filtered by key.
    /// Ties keep the first block seen.
    fn match_candidate(&self, key: Option<char>) -> Option<usize> {
        let zone = self.hit_zone();
        let mut best: Option<(usize, f32)> = None;
        for (i, block) in self.blocks.iter().enumerate() {
            if block.removed || key.is_some_and(|k| block.color.key != k) {
                continue;
            }
            if !block.overlaps_band(zone.top, zone.bottom) {
                continue;
            }
            if best.is_none_or(|(_, y)| block.pos.y > y) {
                best = Some((i, block.pos.y));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Drop a new block just above the top edge in a random lane
    pub fn spawn_block(&mut self) {
        let lane = self.rng.int(0, self.lanes.count);
        let Some(color) = self.rng.choice(&COLORS) else {
            return;
        };
        let size = self.config.block_size;
        let speed = self.difficulty.fall_speed_for(self.config.height);
        let pos = Vec2::new(self.lanes.lane_x(lane), -size);
        self.blocks.push(Block::new(pos, size, speed, color));
    }
}
