//! HUD presentation interface
//!
//! The simulation never touches the page. Each frame the driver builds a
//! `HudSnapshot` from the game and pushes whatever changed into a `Hud`
//! implementation (the DOM adapter in the browser, a recorder in tests).

use crate::consts::START_LIVES;
use crate::sim::{Game, GamePhase};

/// Hearts drawn by the lives display. The starting lives count is also the maximum.
pub const MAX_HEARTS: u8 = START_LIVES;

/// Overlay panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Start,
    Pause,
    GameOver,
}

impl Panel {
    pub const ALL: [Panel; 3] = [Panel::Start, Panel::Pause, Panel::GameOver];

    /// Panel that should be visible in a given phase
    pub fn for_phase(phase: GamePhase) -> Option<Panel> {
        match phase {
            GamePhase::Start => Some(Panel::Start),
            GamePhase::Paused => Some(Panel::Pause),
            GamePhase::GameOver => Some(Panel::GameOver),
            GamePhase::Running => None,
        }
    }
}

/// Setter-style presentation surface for the heads-up display
pub trait Hud {
    fn update_score(&mut self, score: u64);
    /// Current combo multiplier; `active` when it is above 1
    fn update_combo(&mut self, combo: u32, active: bool);
    /// Filled hearts out of `max`, with `health` (0..1) as the partial heart
    fn update_lives(&mut self, lives: u8, max: u8, health: f32);
    /// Progress through the current level window (0..1) and the whole level number
    fn update_level_ring(&mut self, progress: f32, level: u32);
    fn show_panel(&mut self, panel: Panel, visible: bool);
    /// Final numbers for the game-over panel
    fn update_final(&mut self, _score: u64, _best_combo: u32) {}
}

/// Everything the HUD shows, captured from a game
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudSnapshot {
    pub score: u64,
    pub combo: u32,
    pub best_combo: u32,
    pub lives: u8,
    pub health: f32,
    pub progress: f32,
    pub level: u32,
    pub panel: Option<Panel>,
}

impl HudSnapshot {
    pub fn capture(game: &Game) -> Self {
        Self {
            score: game.score.score,
            combo: game.score.combo,
            best_combo: game.score.best_combo,
            lives: game.lives,
            health: game.health,
            progress: game.difficulty.window_progress(),
            level: game.difficulty.level.floor() as u32,
            panel: Panel::for_phase(game.phase),
        }
    }
}

/// Push `next` into the HUD, skipping fields unchanged since `prev`
pub fn present(hud: &mut dyn Hud, next: &HudSnapshot, prev: Option<&HudSnapshot>) {
    if prev.is_none_or(|p| p.score != next.score) {
        hud.update_score(next.score);
    }
    if prev.is_none_or(|p| p.combo != next.combo) {
        hud.update_combo(next.combo, next.combo > 1);
    }
    if prev.is_none_or(|p| p.lives != next.lives || p.health != next.health) {
        hud.update_lives(next.lives, MAX_HEARTS, next.health);
    }
    if prev.is_none_or(|p| p.progress != next.progress || p.level != next.level) {
        hud.update_level_ring(next.progress, next.level);
    }
    if prev.is_none_or(|p| p.panel != next.panel) {
        if next.panel == Some(Panel::GameOver) {
            hud.update_final(next.score, next.best_combo);
        }
        for panel in Panel::ALL {
            hud.show_panel(panel, next.panel == Some(panel));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameConfig;

    #[derive(Default)]
    struct RecordingHud {
        calls: Vec<String>,
    }

    impl Hud for RecordingHud {
        fn update_score(&mut self, score: u64) {
            self.calls.push(format!("score {score}"));
        }
        fn update_combo(&mut self, combo: u32, active: bool) {
            self.calls.push(format!("combo {combo} {active}"));
        }
        fn update_lives(&mut self, lives: u8, max: u8, _health: f32) {
            self.calls.push(format!("lives {lives}/{max}"));
        }
        fn update_level_ring(&mut self, _progress: f32, level: u32) {
            self.calls.push(format!("level {level}"));
        }
        fn show_panel(&mut self, panel: Panel, visible: bool) {
            if visible {
                self.calls.push(format!("show {panel:?}"));
            }
        }
        fn update_final(&mut self, score: u64, best_combo: u32) {
            self.calls.push(format!("final {score} x{best_combo}"));
        }
    }

    #[test]
    fn test_first_present_pushes_everything() {
        let game = Game::new(GameConfig::default(), 1);
        let mut hud = RecordingHud::default();
        present(&mut hud, &HudSnapshot::capture(&game), None);
        assert_eq!(
            hud.calls,
            vec![
                "score 0",
                "combo 1 false",
                format!("lives {START_LIVES}/{MAX_HEARTS}").as_str(),
                "level 1",
                "show Start",
            ]
        );
    }

    #[test]
    fn test_only_changes_are_pushed() {
        let mut game = Game::new(GameConfig::default(), 1);
        game.start();
        let before = HudSnapshot::capture(&game);
        for _ in 0..5 {
            game.score.hit();
        }
        let after = HudSnapshot::capture(&game);

        let mut hud = RecordingHud::default();
        present(&mut hud, &after, Some(&before));
        assert_eq!(hud.calls, vec!["score 60", "combo 2 true"]);

        hud.calls.clear();
        present(&mut hud, &after, Some(&after));
        assert!(hud.calls.is_empty());
    }

    #[test]
    fn test_game_over_panel_gets_final_numbers() {
        let mut game = Game::new(GameConfig::default(), 1);
        game.start();
        let before = HudSnapshot::capture(&game);
        game.score.hit();
        for _ in 0..(START_LIVES as usize * 3) {
            game.damage();
        }
        let after = HudSnapshot::capture(&game);

        let mut hud = RecordingHud::default();
        present(&mut hud, &after, Some(&before));
        assert!(hud.calls.contains(&"final 10 x1".to_string()));
        assert!(hud.calls.contains(&"show GameOver".to_string()));
    }

    #[test]
    fn test_panel_for_phase() {
        assert_eq!(Panel::for_phase(GamePhase::Running), None);
        assert_eq!(Panel::for_phase(GamePhase::Paused), Some(Panel::Pause));
    }
}
