pub mod color_math;
pub mod game_session;
pub mod records;
pub mod round_generator;
pub mod scoring;
pub mod settings;
pub mod store;
pub mod timeline;

pub use game_session::{AnswerOutcome, GameSession, HintOutcome, NEXT_ROUND_DELAY};
pub use round_generator::generate_round;
pub use store::{FileStore, MemoryStore, Store};
