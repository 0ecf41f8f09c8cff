use std::time::Duration;

use super::{GameStats, PowerUpBank};

pub const ROUND_TIME_SECS: u32 = 30;
pub const MAX_HINTS: u32 = 3;

/// Mutable score/progress aggregate for the session in play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub score: u32,
    pub streak: u32,
    pub level: u32,
    pub time_left_secs: u32,
    pub hints_used: u32,
    pub is_active: bool,
    pub is_paused: bool,
    pub power_ups: PowerUpBank,
    /// Logical timestamp of the most recent answer.
    pub last_answer_at: Option<Duration>,
    /// Quick-answer bonus included in the most recent award.
    pub pending_quick_bonus: u32,
    pub stats: GameStats,
}

impl SessionState {
    /// Fresh values for a new game; lifetime `stats` carry over.
    pub fn fresh(stats: GameStats) -> Self {
        Self {
            score: 0,
            streak: 0,
            level: 1,
            time_left_secs: ROUND_TIME_SECS,
            hints_used: 0,
            is_active: true,
            is_paused: false,
            power_ups: PowerUpBank::default(),
            last_answer_at: None,
            pending_quick_bonus: 0,
            stats,
        }
    }

    pub fn hints_remaining(&self) -> u32 {
        MAX_HINTS.saturating_sub(self.hints_used)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::fresh(GameStats::default())
    }
}
