//! Score, streak and combo bookkeeping

use crate::consts::{HITS_PER_COMBO_STEP, MAX_COMBO, POINTS_PER_HIT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSystem {
    pub score: u64,
    /// Multiplier in `1..=MAX_COMBO`
    pub combo: u32,
    /// Consecutive successful matches since the last miss
    pub streak: u32,
    pub best_combo: u32,
}

impl Default for ScoreSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreSystem {
    pub fn new() -> Self {
        Self {
            score: 0,
            combo: 1,
            streak: 0,
            best_combo: 1,
        }
    }

    /// Register a successful match. Returns the points awarded.
    pub fn hit(&mut self) -> u64 {
        self.streak += 1;
        if self.streak % HITS_PER_COMBO_STEP == 0 {
            self.combo = (self.combo + 1).min(MAX_COMBO);
        }
        self.best_combo = self.best_combo.max(self.combo);
        let points = POINTS_PER_HIT * self.combo as u64;
        self.score += points;
        points
    }

    pub fn miss(&mut self) {
        self.streak = 0;
        self.combo = 1;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn expected_combo(streak: u32) -> u32 {
        (1 + streak / HITS_PER_COMBO_STEP).min(MAX_COMBO)
    }

    #[test]
    fn test_five_hits_raise_combo() {
        let mut score = ScoreSystem::new();
        let awarded: Vec<u64> = (0..5).map(|_| score.hit()).collect();
        assert_eq!(awarded, vec![10, 10, 10, 10, 20]);
        assert_eq!(score.combo, 2);
        assert_eq!(score.score, 60);
    }

    #[test]
    fn test_combo_caps_at_max() {
        let mut score = ScoreSystem::new();
        for _ in 0..200 {
            score.hit();
        }
        assert_eq!(score.combo, MAX_COMBO);
        assert_eq!(score.best_combo, MAX_COMBO);
        assert_eq!(score.hit(), POINTS_PER_HIT * MAX_COMBO as u64);
    }

    #[test]
    fn test_miss_keeps_score_and_best_combo() {
        let mut score = ScoreSystem::new();
        for _ in 0..12 {
            score.hit();
        }
        let before = score.score;
        score.miss();
        assert_eq!(score.streak, 0);
        assert_eq!(score.combo, 1);
        assert_eq!(score.best_combo, 3);
        assert_eq!(score.score, before);
    }

    #[test]
    fn test_reset() {
        let mut score = ScoreSystem::new();
        for _ in 0..7 {
            score.hit();
        }
        score.reset();
        assert_eq!(score, ScoreSystem::new());
    }

    proptest! {
        #[test]
        fn prop_combo_follows_streak(hits in 0u32..120) {
            let mut score = ScoreSystem::new();
            for _ in 0..hits {
                score.hit();
            }
            prop_assert_eq!(score.streak, hits);
            prop_assert_eq!(score.combo, expected_combo(hits));
        }

        #[test]
        fn prop_score_is_sum_of_combo_points(hits in 0u32..120) {
            let mut score = ScoreSystem::new();
            for _ in 0..hits {
                score.hit();
            }
            let expected: u64 = (1..=hits)
                .map(|i| POINTS_PER_HIT * expected_combo(i) as u64)
                .sum();
            prop_assert_eq!(score.score, expected);
        }

        #[test]
        fn prop_miss_always_resets(before in 0u32..80, after in 0u32..80) {
            let mut score = ScoreSystem::new();
            for _ in 0..before {
                score.hit();
            }
            score.miss();
            prop_assert_eq!(score.streak, 0);
            prop_assert_eq!(score.combo, 1);
            for _ in 0..after {
                score.hit();
            }
            prop_assert_eq!(score.combo, expected_combo(after));
            prop_assert!((1..=MAX_COMBO).contains(&score.combo));
        }
    }
}
