use log::{debug, trace};
use rand::Rng;
use std::time::Duration;

use crate::model::{Achievement, AchievementSet, Difficulty, PowerUp, SessionState};

pub const QUICK_ANSWER_WINDOW: Duration = Duration::from_millis(3000);
pub const LEVEL_UP_STREAK: u32 = 5;
pub const TIME_BONUS_SECS: u32 = 5;
const SCORE_MASTER_THRESHOLD: u32 = 1000;
const HOT_STREAK_THRESHOLD: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointsAward {
    pub points: u32,
    /// Bonus for answering inside the quick window, before any doubling.
    pub quick_bonus: u32,
    pub doubled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrectAnswer {
    pub award: PointsAward,
    /// The level reached, when this answer completed a streak of five.
    pub level_up: Option<u32>,
    pub power_up: Option<PowerUp>,
}

pub fn points_for_correct_answer(
    difficulty: Difficulty,
    level: u32,
    streak: u32,
    answer_latency: Duration,
    double_score_active: bool,
) -> PointsAward {
    let base = difficulty.base_points() + level * 2 + (streak / 3) * 5;

    let quick_bonus = match QUICK_ANSWER_WINDOW.checked_sub(answer_latency) {
        Some(remaining) if !remaining.is_zero() => (remaining.as_millis() / 100) as u32,
        _ => 0,
    };

    let mut points = base + quick_bonus;
    if double_score_active {
        points *= 2;
    }
    PointsAward {
        points,
        quick_bonus,
        doubled: double_score_active,
    }
}

/// Scores a correct pick. Uses the streak as it stood before this answer,
/// consumes one double-score charge if any, and levels up (granting a
/// random power-up) each time the streak reaches a multiple of five.
pub fn apply_correct_answer<R: Rng + ?Sized>(
    state: &mut SessionState,
    difficulty: Difficulty,
    answer_latency: Duration,
    rng: &mut R,
) -> CorrectAnswer {
    let double_score = state.power_ups.consume(PowerUp::DoubleScore);
    let award = points_for_correct_answer(
        difficulty,
        state.level,
        state.streak,
        answer_latency,
        double_score,
    );

    state.score += award.points;
    state.streak += 1;
    state.pending_quick_bonus = award.quick_bonus;
    state.stats.correct_answers += 1;
    state.stats.total_answers += 1;

    let mut level_up = None;
    let mut power_up = None;
    if state.streak > 0 && state.streak % LEVEL_UP_STREAK == 0 {
        state.level += 1;
        level_up = Some(state.level);
        power_up = Some(grant_random_power_up(state, rng));
        debug!(target: "scoring", "Level up to {} at streak {}", state.level, state.streak);
    }

    trace!(target: "scoring", "Correct answer: {:?}; score {}", award, state.score);
    CorrectAnswer {
        award,
        level_up,
        power_up,
    }
}

/// Breaks the streak; returns the running accuracy percentage.
pub fn apply_wrong_answer(state: &mut SessionState) -> u32 {
    state.streak = 0;
    state.pending_quick_bonus = 0;
    state.stats.total_answers += 1;
    let accuracy = state.stats.accuracy();
    trace!(target: "scoring", "Wrong answer; accuracy {}%", accuracy);
    accuracy
}

/// Achievements the current state qualifies for that `unlocked` lacks.
pub fn check_achievements(state: &SessionState, unlocked: &AchievementSet) -> Vec<Achievement> {
    let mut earned = Vec::new();
    if state.score >= SCORE_MASTER_THRESHOLD {
        earned.push(Achievement::ScoreMaster);
    }
    if state.streak >= HOT_STREAK_THRESHOLD {
        earned.push(Achievement::HotStreak);
    }
    earned.retain(|a| !unlocked.contains(*a));
    earned
}

pub fn grant_random_power_up<R: Rng + ?Sized>(state: &mut SessionState, rng: &mut R) -> PowerUp {
    let choices = PowerUp::all();
    let power_up = choices[rng.random_range(0..choices.len())];
    state.power_ups.grant(power_up);
    if power_up == PowerUp::TimeBonus {
        state.time_left_secs += TIME_BONUS_SECS;
    }
    debug!(target: "scoring", "Granted power-up {:?}", power_up);
    power_up
}
