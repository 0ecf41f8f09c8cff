use crate::game::store::Store;
use crate::model::{Achievement, AchievementSet, GameStats, SessionSummary};
use serde::de::DeserializeOwned;

pub const BEST_SCORE_KEY: &str = "chromaVerseBest";
pub const ACHIEVEMENTS_KEY: &str = "chromaVerseAchievements";
pub const STATS_KEY: &str = "chromaVerseStats";
pub const HIGH_SCORES_KEY: &str = "chromaVerseHighScores";

const HIGH_SCORES_KEPT: usize = 10;

/// Everything that outlives a single session. Reads are forgiving: a
/// missing or unreadable value is treated as absent.
pub struct ProgressRecords {
    store: Box<dyn Store>,
    best_score: u32,
    achievements: AchievementSet,
    high_scores: Vec<SessionSummary>,
}

impl std::fmt::Debug for ProgressRecords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressRecords")
            .field("best_score", &self.best_score)
            .field("achievements", &self.achievements)
            .field("high_scores", &self.high_scores.len())
            .finish()
    }
}

fn load_json<T: DeserializeOwned + Default>(store: &dyn Store, key: &str) -> T {
    match store.get(key) {
        Some(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
            log::warn!(target: "records", "Ignoring unreadable {}: {}", key, e);
            T::default()
        }),
        None => T::default(),
    }
}

impl ProgressRecords {
    pub fn load(store: Box<dyn Store>) -> Self {
        let best_score = store
            .get(BEST_SCORE_KEY)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(0);
        let achievements: AchievementSet = load_json(store.as_ref(), ACHIEVEMENTS_KEY);
        let high_scores: Vec<SessionSummary> = load_json(store.as_ref(), HIGH_SCORES_KEY);
        log::debug!(
            target: "records",
            "Loaded records: best {}, {} achievements",
            best_score,
            achievements.len()
        );
        Self {
            store,
            best_score,
            achievements,
            high_scores,
        }
    }

    pub fn load_stats(&self) -> GameStats {
        load_json(self.store.as_ref(), STATS_KEY)
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn achievements(&self) -> &AchievementSet {
        &self.achievements
    }

    pub fn high_scores(&self) -> &[SessionSummary] {
        &self.high_scores
    }

    pub fn store_mut(&mut self) -> &mut dyn Store {
        self.store.as_mut()
    }

    /// Raises the best score if `score` beats it; returns whether it did.
    pub fn offer_score(&mut self, score: u32) -> bool {
        if score <= self.best_score {
            return false;
        }
        self.best_score = score;
        self.write(BEST_SCORE_KEY, score.to_string());
        true
    }

    /// Unlocks and persists the given achievements; returns the ones that
    /// were not already present.
    pub fn unlock(&mut self, candidates: &[Achievement]) -> Vec<Achievement> {
        let unlocked: Vec<Achievement> = candidates
            .iter()
            .copied()
            .filter(|a| self.achievements.unlock(*a))
            .collect();
        if !unlocked.is_empty() {
            let achievements = self.achievements.clone();
            self.write_json(ACHIEVEMENTS_KEY, &achievements);
        }
        unlocked
    }

    pub fn save_stats(&mut self, stats: &GameStats) {
        self.write_json(STATS_KEY, stats);
    }

    pub fn record_session(&mut self, summary: &SessionSummary) {
        self.high_scores.push(summary.clone());
        self.high_scores
            .sort_by(|a, b| b.final_score.cmp(&a.final_score).then(a.timestamp.cmp(&b.timestamp)));
        self.high_scores.truncate(HIGH_SCORES_KEPT);
        let high_scores = self.high_scores.clone();
        self.write_json(HIGH_SCORES_KEY, &high_scores);
    }

    fn write_json<T: serde::Serialize>(&mut self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(contents) => self.write(key, contents),
            Err(e) => log::warn!(target: "records", "Could not encode {}: {}", key, e),
        }
    }

    fn write(&mut self, key: &str, contents: String) {
        if let Err(e) = self.store.set(key, &contents) {
            log::warn!(target: "records", "Could not persist {}: {}", key, e);
        }
    }
}
