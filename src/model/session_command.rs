use std::time::Duration;

use super::{Color, Difficulty, DisplayMode};

#[derive(Debug, Clone, Default)]
pub struct SettingsChange {
    pub sound_enabled: Option<bool>,
    pub animations_enabled: Option<bool>,
}

#[derive(Debug, Clone)]
pub enum SessionCommand {
    SelectOption(usize), // option index in the current round
    SubmitAnswer(Color),
    UseHint,
    TogglePause,
    SetDifficulty(Difficulty),
    SetDisplayMode(DisplayMode),
    ChangeSettings(SettingsChange),
    Restart,
    Advance(Duration), // wall-clock time elapsed since the previous advance
}
