mod achievement;
mod color;
mod difficulty;
mod game_stats;
mod power_up;
mod round;
mod session_command;
mod session_event;
mod session_state;
mod session_view;

pub use achievement::{Achievement, AchievementSet};
pub use color::{Color, DisplayMode};
pub use difficulty::{Difficulty, UnknownDifficulty};
pub use game_stats::{GameStats, SessionSummary};
pub use power_up::{PowerUp, PowerUpBank};
pub use round::Round;
pub use session_command::{SessionCommand, SettingsChange};
pub use session_event::{FeedbackKind, SessionEvent, SoundCue};
pub use session_state::{SessionState, MAX_HINTS, ROUND_TIME_SECS};
pub use session_view::SessionView;
