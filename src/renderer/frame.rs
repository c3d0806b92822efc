//! One frame of the playfield

use super::{Rect, Surface, Theme};
use crate::sim::Game;

/// Corner radius as a fraction of the block size
const BLOCK_CORNER: f32 = 0.18;
/// Peak opacity of the fail flash overlay
const FLASH_ALPHA: f32 = 0.35;

/// Draw the whole playfield. Order matters: later layers cover earlier ones.
pub fn draw_frame(game: &Game, surface: &mut impl Surface, theme: &Theme) {
    let (width, height) = surface.size();
    let full = Rect::new(0.0, 0.0, width, height);

    surface.set_alpha(1.0);
    surface.clear();
    surface.fill_vertical_gradient(full, &theme.background_top, &theme.background_bottom);

    draw_lanes(game, surface, theme, height);
    draw_hit_zone(game, surface, theme, width);

    for block in &game.blocks {
        let rect = Rect::new(block.pos.x, block.pos.y, block.size, block.size);
        surface.fill_round_rect(rect, block.size * BLOCK_CORNER, block.color.display);
        let center = block.center();
        let label = block.color.key.to_ascii_uppercase().to_string();
        surface.fill_text(&label, center.x, center.y, &theme.font, &theme.text);
    }

    for particle in game.particles.iter().filter(|p| p.alive) {
        surface.set_alpha(particle.alpha());
        surface.fill_rect(
            Rect::centered(particle.pos.x, particle.pos.y, particle.size),
            particle.color,
        );
    }
    surface.set_alpha(1.0);

    if game.flash > 0.0 {
        surface.set_alpha(game.flash.min(1.0) * FLASH_ALPHA);
        surface.fill_rect(full, &theme.flash);
        surface.set_alpha(1.0);
    }
}

/// Faint vertical guide through the middle of each lane
fn draw_lanes(game: &Game, surface: &mut impl Surface, theme: &Theme, height: f32) {
    let half = game.config.block_size / 2.0;
    for lane in 0..game.lanes.count {
        let x = game.lanes.lane_x(lane) + half;
        surface.fill_rect(Rect::new(x - 0.5, 0.0, 1.0, height), &theme.lane);
    }
}

fn draw_hit_zone(game: &Game, surface: &mut impl Surface, theme: &Theme, width: f32) {
    let zone = game.hit_zone();
    let inset = game.config.lane_margin / 2.0;
    let rect = Rect::new(inset, zone.top, width - 2.0 * inset, zone.bottom - zone.top);
    let radius = 10.0;

    surface.set_alpha(0.12);
    surface.fill_round_rect(rect, radius, &theme.accent);
    surface.set_alpha(1.0);
    surface.stroke_round_rect(rect, radius, &theme.accent, 2.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Block, COLORS, GameConfig};
    use glam::Vec2;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        Rect(String),
        RoundRect(String),
        StrokeRoundRect(String),
        Text(String),
        Gradient,
        Alpha(f32),
    }

    struct RecordingSurface {
        width: f32,
        height: f32,
        ops: Vec<Op>,
    }

    impl RecordingSurface {
        fn new() -> Self {
            Self {
                width: 960.0,
                height: 540.0,
                ops: Vec::new(),
            }
        }
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> (f32, f32) {
            (self.width, self.height)
        }
        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }
        fn fill_rect(&mut self, _rect: Rect, color: &str) {
            self.ops.push(Op::Rect(color.to_string()));
        }
        fn stroke_rect(&mut self, _rect: Rect, color: &str, _line_width: f32) {
            self.ops.push(Op::Rect(color.to_string()));
        }
        fn fill_round_rect(&mut self, _rect: Rect, _radius: f32, color: &str) {
            self.ops.push(Op::RoundRect(color.to_string()));
        }
        fn stroke_round_rect(&mut self, _rect: Rect, _radius: f32, color: &str, _lw: f32) {
            self.ops.push(Op::StrokeRoundRect(color.to_string()));
        }
        fn fill_text(&mut self, text: &str, _x: f32, _y: f32, _font: &str, _color: &str) {
            self.ops.push(Op::Text(text.to_string()));
        }
        fn fill_vertical_gradient(&mut self, _rect: Rect, _top: &str, _bottom: &str) {
            self.ops.push(Op::Gradient);
        }
        fn set_alpha(&mut self, alpha: f32) {
            self.ops.push(Op::Alpha(alpha));
        }
    }

    #[test]
    fn test_empty_frame_draws_background_lanes_and_zone() {
        let game = Game::new(GameConfig::default(), 1);
        let mut surface = RecordingSurface::new();
        let theme = Theme::default();
        draw_frame(&game, &mut surface, &theme);

        assert_eq!(surface.ops[..3], [Op::Alpha(1.0), Op::Clear, Op::Gradient]);
        let lanes = surface
            .ops
            .iter()
            .filter(|op| **op == Op::Rect(theme.lane.clone()))
            .count();
        assert_eq!(lanes, game.lanes.count);
        assert!(
            surface
                .ops
                .contains(&Op::StrokeRoundRect(theme.accent.clone()))
        );
        assert!(!surface.ops.iter().any(|op| matches!(op, Op::Text(_))));
    }

    #[test]
    fn test_blocks_are_labelled_with_uppercase_key() {
        let mut game = Game::new(GameConfig::default(), 1);
        game.blocks
            .push(Block::new(Vec2::new(100.0, 50.0), 56.0, 100.0, &COLORS[3]));
        let mut surface = RecordingSurface::new();
        draw_frame(&game, &mut surface, &Theme::default());

        assert!(
            surface
                .ops
                .contains(&Op::RoundRect(COLORS[3].display.to_string()))
        );
        assert!(surface.ops.contains(&Op::Text("Y".to_string())));
    }

    #[test]
    fn test_flash_overlay_only_when_flashing() {
        let theme = Theme::default();
        let mut game = Game::new(GameConfig::default(), 1);
        let mut surface = RecordingSurface::new();
        draw_frame(&game, &mut surface, &theme);
        assert!(!surface.ops.contains(&Op::Rect(theme.flash.clone())));

        game.flash = 1.0;
        let mut surface = RecordingSurface::new();
        draw_frame(&game, &mut surface, &theme);
        let at = surface
            .ops
            .iter()
            .position(|op| *op == Op::Rect(theme.flash.clone()))
            .expect("flash drawn");
        assert_eq!(surface.ops[at - 1], Op::Alpha(FLASH_ALPHA));
        assert_eq!(surface.ops.last(), Some(&Op::Alpha(1.0)));
    }

    #[test]
    fn test_particles_fade_with_life() {
        let mut game = Game::new(GameConfig::default(), 3);
        game.start();
        game.blocks.push(Block::new(
            Vec2::new(100.0, game.hit_zone().top),
            56.0,
            0.0,
            &COLORS[0],
        ));
        game.attempt_match('r');
        for p in &mut game.particles {
            p.life = p.max_life / 2.0;
        }
        let mut surface = RecordingSurface::new();
        draw_frame(&game, &mut surface, &Theme::default());
        let faded = surface
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Alpha(a) if (*a - 0.5).abs() < 1e-6))
            .count();
        assert_eq!(faded, game.particles.len());
    }
}
