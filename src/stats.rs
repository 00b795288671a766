/// Score, lives and the active/inactive game state.

use std::time::Instant;

#[derive(Clone, Debug, PartialEq)]
pub struct GameStats {
    pub score: u32,
    /// Best score across sessions; survives `reset`.
    pub high_score: u32,
    pub level: u32,
    pub ships_left: u32,
    pub game_active: bool,
    /// While set and in the future, the simulation is paused after a ship hit.
    pub resume_at: Option<Instant>,
}

impl GameStats {
    /// Fresh stats for a process start: inactive, waiting for Play.
    pub fn new(ship_limit: u32, high_score: u32) -> Self {
        GameStats {
            score: 0,
            high_score,
            level: 1,
            ships_left: ship_limit,
            game_active: false,
            resume_at: None,
        }
    }

    /// Start-of-game values.  Does not touch `high_score` or `game_active`.
    pub fn reset(&mut self, ship_limit: u32) {
        self.score = 0;
        self.level = 1;
        self.ships_left = ship_limit;
        self.resume_at = None;
    }

    /// Raise the high score to the current score if it was beaten.
    pub fn check_high_score(&mut self) {
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    pub fn is_stunned(&self, now: Instant) -> bool {
        self.resume_at.map_or(false, |at| now < at)
    }
}
