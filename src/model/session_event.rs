use super::{PowerUpBank, Round, SessionSummary};
use crate::game::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
}

/// Audio cue names; the sound collaborator maps them to actual playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Correct,
    Wrong,
    Hint,
    Achievement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    RoundPresented {
        round: Round,
        target_label: String,
        hint_text: &'static str,
    },
    ScoreboardChanged {
        score: u32,
        streak: u32,
        level: u32,
        best_score: u32,
    },
    TimerChanged(u32),
    Feedback {
        message: String,
        kind: FeedbackKind,
    },
    FeedbackCleared,
    Popup {
        icon: &'static str,
        text: String,
    },
    Combo(u32),
    Sound(SoundCue),
    HintApplied {
        eliminated: Vec<usize>,
        remaining: u32,
    },
    PauseChanged(bool),
    PowerUpsChanged(PowerUpBank),
    SettingsChanged(Settings),
    SessionEnded(SessionSummary),
}
