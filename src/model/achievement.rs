use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Achievement {
    ScoreMaster,
    HotStreak,
}

impl Achievement {
    /// Stable identifier written to the store.
    pub fn id(&self) -> &'static str {
        match self {
            Achievement::ScoreMaster => "score_1000",
            Achievement::HotStreak => "streak_10",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Achievement::ScoreMaster => "🏆",
            Achievement::HotStreak => "🔥",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Achievement::ScoreMaster => "Score Master: 1000 points!",
            Achievement::HotStreak => "Hot Streak: 10 in a row!",
        }
    }
}

/// Identifiers unlocked so far, in unlock order. Unknown identifiers read
/// from storage are carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AchievementSet {
    ids: Vec<String>,
}

impl AchievementSet {
    pub fn contains(&self, achievement: Achievement) -> bool {
        self.ids.iter().any(|id| id == achievement.id())
    }

    /// Returns false if it was already unlocked.
    pub fn unlock(&mut self, achievement: Achievement) -> bool {
        if self.contains(achievement) {
            return false;
        }
        self.ids.push(achievement.id().to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
