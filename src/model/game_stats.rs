use crate::model::Difficulty;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::DurationMilliSeconds;
use std::time::Duration;
use uuid::Uuid;

/// Lifetime answer counters, persisted between sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    #[serde(default)]
    pub total_games: u32,
    #[serde(default)]
    pub total_answers: u32,
    #[serde(default)]
    pub correct_answers: u32,
}

impl GameStats {
    /// Percentage of correct answers, rounded; 0 before any answer.
    pub fn accuracy(&self) -> u32 {
        if self.total_answers == 0 {
            return 0;
        }
        (self.correct_answers as f64 / self.total_answers as f64 * 100.0).round() as u32
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub playthrough_id: Uuid,
    pub final_score: u32,
    pub best_score: u32,
    pub new_best: bool,
    pub accuracy: u32,
    pub level: u32,
    pub hints_used: u32,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub time_played: Duration,
    pub difficulty: Difficulty,
    pub timestamp: i64,
}
