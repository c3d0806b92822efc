//! Falling blocks and the fixed color/key table

use glam::Vec2;

use crate::consts::MIN_LANES;

/// A color with its keyboard key and display color
#[derive(Debug, PartialEq, Eq)]
pub struct ColorMapping {
    pub name: &'static str,
    /// Lowercase key that matches this color
    pub key: char,
    /// CSS color used to draw the tile
    pub display: &'static str,
}

/// The six playable colors
pub static COLORS: [ColorMapping; 6] = [
    ColorMapping { name: "red", key: 'r', display: "#ff4d5e" },
    ColorMapping { name: "blue", key: 'b', display: "#3d8bff" },
    ColorMapping { name: "green", key: 'g', display: "#2fd07a" },
    ColorMapping { name: "yellow", key: 'y', display: "#ffd23f" },
    ColorMapping { name: "purple", key: 'p', display: "#a45cff" },
    ColorMapping { name: "orange", key: 'o', display: "#ff8a2b" },
];

/// Look up the color mapped to a key (case-insensitive)
pub fn color_for_key(key: char) -> Option<&'static ColorMapping> {
    let key = key.to_ascii_lowercase();
    COLORS.iter().find(|c| c.key == key)
}

/// A falling tile
#[derive(Debug, Clone)]
pub struct Block {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    /// Downward speed in pixels/second, fixed at spawn
    pub speed: f32,
    pub color: &'static ColorMapping,
    /// Marked for removal at the end of the current step
    pub removed: bool,
}

impl Block {
    pub fn new(pos: Vec2, size: f32, speed: f32, color: &'static ColorMapping) -> Self {
        Self {
            pos,
            size,
            speed,
            color,
            removed: false,
        }
    }

    /// Linear descent, no horizontal motion
    pub fn advance(&mut self, dt: f32) {
        self.pos.y += self.speed * dt;
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Whether the block's vertical extent overlaps `[top, bottom]`
    pub fn overlaps_band(&self, top: f32, bottom: f32) -> bool {
        self.pos.y + self.size >= top && self.pos.y <= bottom
    }
}

/// Horizontal spawn lanes for a given canvas width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneLayout {
    pub count: usize,
    pub margin: f32,
    pub lane_width: f32,
}

impl LaneLayout {
    /// Fit as many block-wide lanes as the width allows, never fewer than `MIN_LANES`.
    /// Lanes split the width between the margins evenly.
    pub fn new(width: f32, block_size: f32, margin: f32) -> Self {
        let usable = (width - 2.0 * margin).max(block_size);
        let fit = (usable / block_size).floor() as usize;
        let count = fit.max(MIN_LANES);
        let lane_width = usable / count as f32;
        Self {
            count,
            margin,
            lane_width,
        }
    }

    /// Left edge of a lane's tile
    pub fn lane_x(&self, lane: usize) -> f32 {
        self.margin + lane.min(self.count - 1) as f32 * self.lane_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_keys_unique_and_lowercase() {
        for (i, a) in COLORS.iter().enumerate() {
            assert!(a.key.is_ascii_lowercase());
            for b in &COLORS[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
    }

    #[test]
    fn test_color_for_key_case_insensitive() {
        assert_eq!(color_for_key('R').map(|c| c.name), Some("red"));
        assert_eq!(color_for_key('o').map(|c| c.name), Some("orange"));
        assert!(color_for_key('x').is_none());
        assert!(color_for_key(' ').is_none());
    }

    #[test]
    fn test_block_advance_is_linear() {
        let mut block = Block::new(Vec2::new(40.0, -56.0), 56.0, 300.0, &COLORS[0]);
        block.advance(0.5);
        assert_eq!(block.pos, Vec2::new(40.0, 94.0));
        block.advance(0.0);
        assert_eq!(block.pos.x, 40.0);
    }

    #[test]
    fn test_overlaps_band() {
        let block = Block::new(Vec2::new(0.0, 100.0), 50.0, 0.0, &COLORS[0]);
        assert!(block.overlaps_band(140.0, 200.0));
        assert!(block.overlaps_band(150.0, 200.0)); // touching bottom edge
        assert!(!block.overlaps_band(151.0, 200.0));
        assert!(block.overlaps_band(0.0, 100.0)); // touching top edge
        assert!(!block.overlaps_band(0.0, 99.0));
    }

    #[test]
    fn test_lane_layout_minimum_lanes() {
        let lanes = LaneLayout::new(200.0, 56.0, 24.0);
        assert_eq!(lanes.count, MIN_LANES);
        assert_eq!(lanes.lane_x(0), 24.0);
        assert!((lanes.lane_width - 152.0 / 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_lane_tiles_stay_between_margins() {
        for width in [480.0_f32, 640.0, 800.0, 960.0, 1280.0] {
            let lanes = LaneLayout::new(width, 56.0, 24.0);
            for lane in 0..lanes.count {
                let x = lanes.lane_x(lane);
                assert!(x >= 24.0);
                assert!(x + 56.0 <= width - 24.0 + 1e-3, "lane {lane} at width {width}");
            }
        }
    }

    #[test]
    fn test_lane_layout_fills_width() {
        let lanes = LaneLayout::new(960.0, 56.0, 24.0);
        assert_eq!(lanes.count, 16);
        // 912px between the margins split 16 ways
        assert_eq!(lanes.lane_width, 57.0);
        assert_eq!(lanes.lane_x(1) - lanes.lane_x(0), 57.0);
        let last = lanes.lane_x(lanes.count - 1);
        assert!(last + 56.0 <= 960.0 - 24.0);
        // Out of range lanes clamp to the last lane
        assert_eq!(lanes.lane_x(99), last);
    }
}
