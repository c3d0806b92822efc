//! Hit particles
//!
//! Purely visual. Particles carry a copy of their color and never refer back to
//! the block that spawned them.

use glam::Vec2;

use super::random::RandomSource;
use crate::consts::*;

#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds left to live
    pub life: f32,
    /// Initial lifetime, for fade-out
    pub max_life: f32,
    pub size: f32,
    pub color: &'static str,
    pub alive: bool,
}

impl Particle {
    /// Semi-implicit Euler: velocity first, then position
    pub fn advance(&mut self, dt: f32) {
        self.vel.y += PARTICLE_GRAVITY * dt;
        self.pos += self.vel * dt;
        self.life -= dt;
        if self.life <= 0.0 {
            self.alive = false;
        }
    }

    /// Opacity in `[0, 1]`
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// Spawn `count` particles radiating from `center`
pub fn burst<'a>(
    rng: &'a mut RandomSource,
    center: Vec2,
    color: &'static str,
    count: usize,
) -> impl Iterator<Item = Particle> + 'a {
    (0..count).map(move |_| {
        let angle = rng.range(0.0, std::f32::consts::TAU);
        let speed = rng.range(PARTICLE_SPEED_MIN, PARTICLE_SPEED_MAX);
        let life = rng.range(PARTICLE_LIFE_MIN, PARTICLE_LIFE_MAX);
        Particle {
            pos: center,
            vel: Vec2::from_angle(angle) * speed,
            life,
            max_life: life,
            size: rng.range(PARTICLE_SIZE_MIN, PARTICLE_SIZE_MAX),
            color,
            alive: true,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(vel: Vec2, life: f32) -> Particle {
        Particle {
            pos: Vec2::ZERO,
            vel,
            life,
            max_life: life,
            size: 3.0,
            color: "#fff",
            alive: true,
        }
    }

    #[test]
    fn test_gravity_and_constant_horizontal_velocity() {
        let mut p = particle(Vec2::new(100.0, 0.0), 1.0);
        p.advance(0.1);
        assert_eq!(p.vel.x, 100.0);
        assert!((p.vel.y - PARTICLE_GRAVITY * 0.1).abs() < 1e-3);
        // Position uses the updated velocity
        assert!((p.pos.y - PARTICLE_GRAVITY * 0.1 * 0.1).abs() < 1e-3);
        assert!((p.pos.x - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_dies_when_life_runs_out() {
        let mut p = particle(Vec2::ZERO, 0.25);
        p.advance(0.2);
        assert!(p.alive);
        p.advance(0.1);
        assert!(!p.alive);
        assert_eq!(p.alpha(), 0.0);
    }

    #[test]
    fn test_no_bounds_check() {
        let mut p = particle(Vec2::new(0.0, 5000.0), 10.0);
        p.advance(1.0);
        assert!(p.alive);
        assert!(p.pos.y > 5000.0);
    }

    #[test]
    fn test_burst() {
        let mut rng = RandomSource::new(5);
        let center = Vec2::new(50.0, 60.0);
        let particles: Vec<_> = burst(&mut rng, center, "#abc", PARTICLE_BURST).collect();
        assert_eq!(particles.len(), PARTICLE_BURST);
        for p in &particles {
            assert_eq!(p.pos, center);
            assert!(p.alive);
            assert!((PARTICLE_LIFE_MIN..PARTICLE_LIFE_MAX).contains(&p.life));
            let speed = p.vel.length();
            assert!(speed >= PARTICLE_SPEED_MIN - 0.01 && speed <= PARTICLE_SPEED_MAX + 0.01);
        }
    }

    #[test]
    fn test_burst_borrows_rng_only_while_iterating() {
        let mut rng = RandomSource::new(9);
        let color: &'static str = "#fff";
        let mut particles = Vec::new();
        particles.extend(burst(&mut rng, Vec2::ZERO, color, 3));
        particles.extend(burst(&mut rng, Vec2::ONE, color, 2));
        assert_eq!(particles.len(), 5);
        assert!(particles.iter().all(|p| p.color == color));
        // Stream continues after both bursts
        let _ = rng.range(0.0, 1.0);
    }
}
