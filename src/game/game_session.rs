use log::{info, trace};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use uuid::Uuid;

use super::records::ProgressRecords;
use super::round_generator::generate_round;
use super::scoring::{self, CorrectAnswer};
use super::settings::Settings;
use super::store::Store;
use super::timeline::Timeline;
use crate::destroyable::Destroyable;
use crate::events::{EventEmitter, EventObserver, Unsubscriber};
use crate::model::{
    Color, Difficulty, DisplayMode, FeedbackKind, PowerUp, PowerUpBank, Round, SessionCommand,
    SessionEvent, SessionState, SessionSummary, SettingsChange, SoundCue,
};

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
pub const NEXT_ROUND_DELAY: Duration = Duration::from_millis(1500);
const COMBO_THRESHOLD: u32 = 3;

/// Work scheduled on the session timeline. `epoch` ties a task to the game
/// it was scheduled in; `end_session` and `restart` move the epoch on so
/// anything older becomes a no-op when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionTask {
    Tick { epoch: u64 },
    NextRound { epoch: u64, round_serial: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct(CorrectAnswer),
    Wrong { accuracy: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintOutcome {
    /// Session is over; nothing to hint at.
    Unavailable,
    Exhausted,
    Eliminated { indices: Vec<usize>, remaining: u32 },
}

pub struct GameSession {
    state: SessionState,
    round: Round,
    round_serial: u64,
    round_answered: bool,
    round_presented_at: Duration,
    epoch: u64,
    timeline: Timeline<SessionTask>,
    settings: Settings,
    records: ProgressRecords,
    rng: StdRng,
    seed: u64,
    playthrough_id: Uuid,
    started_at: Duration,
    event_emitter: EventEmitter<SessionEvent>,
    subscription: Option<Unsubscriber<SessionCommand>>,
}

impl Destroyable for GameSession {
    fn destroy(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl GameSession {
    /// Loads settings and records from `store` and starts the first game.
    /// `seed` pins the RNG; otherwise `SEED` from the environment, then a
    /// random seed, is used.
    pub fn new(
        store: Box<dyn Store>,
        event_emitter: EventEmitter<SessionEvent>,
        seed: Option<u64>,
    ) -> Self {
        let settings = Settings::load(store.as_ref());
        let records = ProgressRecords::load(store);
        let stats = records.load_stats();
        let seed = seed
            .or_else(Settings::seed_from_env)
            .unwrap_or_else(|| rand::rng().next_u64());
        let mut rng = StdRng::seed_from_u64(seed);
        let round = generate_round(&mut rng, settings.difficulty, 1, false);
        info!(
            target: "game_session",
            "New session; difficulty: {}; seed: {}; debug: {}",
            settings.difficulty,
            seed,
            Settings::is_debug_mode()
        );

        let mut session = Self {
            state: SessionState::fresh(stats),
            round,
            round_serial: 0,
            round_answered: false,
            round_presented_at: Duration::ZERO,
            epoch: 0,
            timeline: Timeline::new(),
            settings,
            records,
            rng,
            seed,
            playthrough_id: Uuid::new_v4(),
            started_at: Duration::ZERO,
            event_emitter,
            subscription: None,
        };
        session.timeline.schedule(
            TICK_INTERVAL,
            SessionTask::Tick {
                epoch: session.epoch,
            },
        );
        session.sync_display();
        session.present_round();
        session
    }

    /// Shares the session and feeds it every command sent on the observer.
    pub fn attach(self, command_observer: EventObserver<SessionCommand>) -> Rc<RefCell<Self>> {
        let session = Rc::new(RefCell::new(self));
        let handler = Rc::clone(&session);
        let subscription = command_observer.subscribe(move |command| {
            handler.borrow_mut().handle_command(command.clone());
        });
        session.borrow_mut().subscription = Some(subscription);
        session
    }

    pub fn handle_command(&mut self, command: SessionCommand) {
        trace!(target: "game_session", "Handling command: {:?}", command);
        match command {
            SessionCommand::SelectOption(index) => {
                self.select_option(index);
            }
            SessionCommand::SubmitAnswer(color) => {
                self.submit_answer(color);
            }
            SessionCommand::UseHint => {
                self.use_hint();
            }
            SessionCommand::TogglePause => {
                self.toggle_pause();
            }
            SessionCommand::SetDifficulty(difficulty) => self.set_difficulty(difficulty),
            SessionCommand::SetDisplayMode(mode) => self.set_display_mode(mode),
            SessionCommand::ChangeSettings(change) => self.change_settings(change),
            SessionCommand::Restart => self.restart(),
            SessionCommand::Advance(elapsed) => self.advance(elapsed),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn records(&self) -> &ProgressRecords {
        &self.records
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn playthrough_id(&self) -> Uuid {
        self.playthrough_id
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active
    }

    /// Moves the session clock forward, running every tick and delayed
    /// round change that falls due in the window, in order.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.timeline.now() + elapsed;
        while let Some(task) = self.timeline.pop_due(until) {
            self.run_task(task);
        }
        self.timeline.advance_to(until);
    }

    fn run_task(&mut self, task: SessionTask) {
        match task {
            SessionTask::Tick { epoch } => {
                if epoch != self.epoch {
                    trace!(target: "game_session", "Dropping stale tick from epoch {}", epoch);
                    return;
                }
                self.tick();
                if self.state.is_active {
                    self.timeline.schedule(TICK_INTERVAL, SessionTask::Tick { epoch });
                }
            }
            SessionTask::NextRound {
                epoch,
                round_serial,
            } => {
                let current = epoch == self.epoch && round_serial == self.round_serial;
                if !current || !self.state.is_active || self.state.time_left_secs == 0 {
                    trace!(target: "game_session", "Dropping superseded round change {:?}", task);
                    return;
                }
                self.next_round();
            }
        }
    }

    /// One second of play time. Ignored while paused or after the end.
    pub fn tick(&mut self) {
        if !self.state.is_active || self.state.is_paused {
            return;
        }
        self.state.time_left_secs = self.state.time_left_secs.saturating_sub(1);
        self.emit(SessionEvent::TimerChanged(self.state.time_left_secs));
        if self.state.time_left_secs == 0 {
            self.end_session();
        }
    }

    pub fn select_option(&mut self, index: usize) -> Option<AnswerOutcome> {
        let color = self.round.option(index)?;
        self.submit_answer(color)
    }

    /// Scores `selected` against the current round and schedules the next
    /// one. A round takes a single answer.
    pub fn submit_answer(&mut self, selected: Color) -> Option<AnswerOutcome> {
        if !self.state.is_active || self.state.time_left_secs == 0 || self.round_answered {
            return None;
        }
        self.round_answered = true;
        let now = self.timeline.now();
        let latency = now.saturating_sub(self.round_presented_at);
        self.state.last_answer_at = Some(now);

        let outcome = if self.round.is_target(selected) {
            let correct = scoring::apply_correct_answer(
                &mut self.state,
                self.settings.difficulty,
                latency,
                &mut self.rng,
            );
            self.announce_correct(&correct);
            AnswerOutcome::Correct(correct)
        } else {
            let accuracy = scoring::apply_wrong_answer(&mut self.state);
            self.emit(SessionEvent::Feedback {
                message: format!("Not quite right! Accuracy: {}%", accuracy),
                kind: FeedbackKind::Error,
            });
            self.play(SoundCue::Wrong);
            AnswerOutcome::Wrong { accuracy }
        };

        self.sync_scoreboard();
        self.timeline.schedule(
            NEXT_ROUND_DELAY,
            SessionTask::NextRound {
                epoch: self.epoch,
                round_serial: self.round_serial,
            },
        );
        Some(outcome)
    }

    fn announce_correct(&mut self, correct: &CorrectAnswer) {
        let award = correct.award;
        let message = if award.quick_bonus > 0 {
            format!(
                "Perfect! +{} points (quick bonus +{})",
                award.points, award.quick_bonus
            )
        } else {
            format!("Perfect! +{} points", award.points)
        };
        self.emit(SessionEvent::Feedback {
            message,
            kind: FeedbackKind::Success,
        });

        if let Some(level) = correct.level_up {
            self.popup("🎉", format!("Level {} Unlocked!", level));
        }
        if let Some(power_up) = correct.power_up {
            self.emit(SessionEvent::Popup {
                icon: power_up.icon(),
                text: power_up.announcement().to_string(),
            });
            self.emit(SessionEvent::TimerChanged(self.state.time_left_secs));
        }
        if award.doubled || correct.power_up.is_some() {
            self.emit(SessionEvent::PowerUpsChanged(self.state.power_ups));
        }
        if self.state.streak >= COMBO_THRESHOLD {
            self.emit(SessionEvent::Combo(self.state.streak));
        }

        let earned = scoring::check_achievements(&self.state, self.records.achievements());
        for achievement in self.records.unlock(&earned) {
            info!(target: "game_session", "Achievement unlocked: {}", achievement.id());
            self.popup(achievement.icon(), achievement.title().to_string());
        }
        self.play(SoundCue::Correct);
    }

    /// Greys out half of the wrong options, at most three times a game.
    pub fn use_hint(&mut self) -> HintOutcome {
        if !self.state.is_active {
            return HintOutcome::Unavailable;
        }
        if self.state.hints_remaining() == 0 {
            self.emit(SessionEvent::Feedback {
                message: "No more hints available!".to_string(),
                kind: FeedbackKind::Error,
            });
            return HintOutcome::Exhausted;
        }
        self.state.hints_used += 1;

        let mut wrong = self.round.wrong_option_indices();
        let to_remove = wrong.len() / 2;
        let mut indices = Vec::with_capacity(to_remove);
        for _ in 0..to_remove {
            let pick = self.rng.random_range(0..wrong.len());
            indices.push(wrong.swap_remove(pick));
        }
        indices.sort_unstable();

        let remaining = self.state.hints_remaining();
        self.emit(SessionEvent::HintApplied {
            eliminated: indices.clone(),
            remaining,
        });
        self.emit(SessionEvent::Feedback {
            message: format!("Hint used! {} hints remaining", remaining),
            kind: FeedbackKind::Success,
        });
        self.play(SoundCue::Hint);
        HintOutcome::Eliminated { indices, remaining }
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.state.is_paused = !self.state.is_paused;
        info!(target: "game_session", "Paused: {}", self.state.is_paused);
        self.emit(SessionEvent::PauseChanged(self.state.is_paused));
        self.state.is_paused
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.difficulty = difficulty;
        self.save_settings();
        if self.state.is_active {
            self.next_round();
        }
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.settings.display_mode = mode;
        self.save_settings();
        if self.state.is_active {
            self.next_round();
        }
    }

    pub fn change_settings(&mut self, change: SettingsChange) {
        self.settings.apply(&change);
        self.save_settings();
    }

    fn save_settings(&mut self) {
        if let Err(e) = self.settings.save(self.records.store_mut()) {
            log::warn!(target: "game_session", "Could not persist settings: {}", e);
        }
        self.emit(SessionEvent::SettingsChanged(self.settings.clone()));
    }

    /// Finishes the game: settles the best score, counts the game and
    /// records a summary. Returns `None` if the game was already over.
    pub fn end_session(&mut self) -> Option<SessionSummary> {
        if !self.state.is_active {
            return None;
        }
        self.state.is_active = false;
        self.epoch += 1;

        let new_best = self.records.offer_score(self.state.score);
        if new_best {
            self.popup("👑", format!("New Best Score: {}!", self.state.score));
        }
        self.state.stats.total_games += 1;
        self.records.save_stats(&self.state.stats);

        let summary = SessionSummary {
            playthrough_id: self.playthrough_id,
            final_score: self.state.score,
            best_score: self.records.best_score(),
            new_best,
            accuracy: self.state.stats.accuracy(),
            level: self.state.level,
            hints_used: self.state.hints_used,
            time_played: self.timeline.now().saturating_sub(self.started_at),
            difficulty: self.settings.difficulty,
            timestamp: chrono::Utc::now().timestamp(),
        };
        self.records.record_session(&summary);
        info!(target: "game_session", "Session over: {:?}", summary);

        self.emit(SessionEvent::Feedback {
            message: format!("Game Over! Final Score: {}", self.state.score),
            kind: FeedbackKind::Error,
        });
        self.sync_scoreboard();
        self.emit(SessionEvent::SessionEnded(summary.clone()));
        Some(summary)
    }

    /// Starts over with fresh session values. Best score, achievements and
    /// lifetime stats are kept.
    pub fn restart(&mut self) {
        self.epoch += 1;
        self.state = SessionState::fresh(self.state.stats);
        self.playthrough_id = Uuid::new_v4();
        self.started_at = self.timeline.now();
        info!(
            target: "game_session",
            "Restarting; epoch {}; playthrough {}",
            self.epoch,
            self.playthrough_id
        );
        self.timeline
            .schedule(TICK_INTERVAL, SessionTask::Tick { epoch: self.epoch });
        self.sync_display();
        self.emit(SessionEvent::PauseChanged(false));
        self.emit(SessionEvent::PowerUpsChanged(self.state.power_ups));
        self.next_round();
    }

    fn next_round(&mut self) {
        let easy_mode = self.state.power_ups.consume(PowerUp::EasyMode);
        self.round = generate_round(
            &mut self.rng,
            self.settings.difficulty,
            self.state.level,
            easy_mode,
        );
        if easy_mode {
            self.emit(SessionEvent::PowerUpsChanged(self.state.power_ups));
        }
        self.present_round();
    }

    fn present_round(&mut self) {
        self.round_serial += 1;
        self.round_answered = false;
        self.round_presented_at = self.timeline.now();
        self.emit(SessionEvent::RoundPresented {
            round: self.round.clone(),
            target_label: self.round.target.to_display_string(self.settings.display_mode),
            hint_text: self.settings.difficulty.hint_text(),
        });
        self.emit(SessionEvent::FeedbackCleared);
    }

    fn sync_display(&self) {
        self.sync_scoreboard();
        self.emit(SessionEvent::TimerChanged(self.state.time_left_secs));
    }

    fn sync_scoreboard(&self) {
        self.emit(SessionEvent::ScoreboardChanged {
            score: self.state.score,
            streak: self.state.streak,
            level: self.state.level,
            best_score: self.records.best_score().max(self.state.score),
        });
    }

    fn popup(&self, icon: &'static str, text: String) {
        self.emit(SessionEvent::Popup { icon, text });
        self.play(SoundCue::Achievement);
    }

    fn play(&self, cue: SoundCue) {
        if self.settings.sound_enabled {
            self.emit(SessionEvent::Sound(cue));
        }
    }

    fn emit(&self, event: SessionEvent) {
        self.event_emitter.emit(&event);
    }

    pub fn power_ups(&self) -> PowerUpBank {
        self.state.power_ups
    }
}
