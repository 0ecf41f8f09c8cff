use crate::events::EventHandler;
use crate::model::{FeedbackKind, Round, SessionEvent, SessionSummary};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// What a front end needs to redraw the screen, folded from session events.
#[derive(Debug, Default)]
pub struct SessionView {
    pub round: Option<Round>,
    pub target_label: String,
    pub hint_text: &'static str,
    pub eliminated: HashSet<usize>,
    pub score: u32,
    pub streak: u32,
    pub level: u32,
    pub best_score: u32,
    pub time_left_secs: u32,
    pub is_paused: bool,
    pub feedback: Option<(String, FeedbackKind)>,
    pub summary: Option<SessionSummary>,
}

impl SessionView {
    pub fn new() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }

    pub fn is_over(&self) -> bool {
        self.summary.is_some()
    }
}

impl EventHandler<SessionEvent> for SessionView {
    fn handle_event(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::RoundPresented {
                round,
                target_label,
                hint_text,
            } => {
                self.round = Some(round.clone());
                self.target_label = target_label.clone();
                self.hint_text = *hint_text;
                self.eliminated.clear();
                self.summary = None;
            }
            SessionEvent::ScoreboardChanged {
                score,
                streak,
                level,
                best_score,
            } => {
                self.score = *score;
                self.streak = *streak;
                self.level = *level;
                self.best_score = *best_score;
            }
            SessionEvent::TimerChanged(secs) => self.time_left_secs = *secs,
            SessionEvent::Feedback { message, kind } => {
                self.feedback = Some((message.clone(), *kind));
            }
            SessionEvent::FeedbackCleared => self.feedback = None,
            SessionEvent::HintApplied { eliminated, .. } => {
                self.eliminated.extend(eliminated.iter().copied());
            }
            SessionEvent::PauseChanged(paused) => self.is_paused = *paused,
            SessionEvent::SessionEnded(summary) => self.summary = Some(summary.clone()),
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Color;

    #[test]
    fn test_view_tracks_round_and_hints() {
        let mut view = SessionView::default();
        let target = Color::new(1, 2, 3);
        let round = Round::new(target, vec![Color::new(9, 9, 9), target, Color::new(5, 5, 5)]);

        view.handle_event(&SessionEvent::RoundPresented {
            round: round.clone(),
            target_label: "rgb(1, 2, 3)".to_string(),
            hint_text: "Look for similar brightness",
        });
        view.handle_event(&SessionEvent::HintApplied {
            eliminated: vec![0],
            remaining: 2,
        });
        view.handle_event(&SessionEvent::TimerChanged(12));

        assert_eq!(view.round, Some(round.clone()));
        assert!(view.eliminated.contains(&0));
        assert_eq!(view.time_left_secs, 12);

        // a new round clears eliminated options
        view.handle_event(&SessionEvent::RoundPresented {
            round,
            target_label: "rgb(1, 2, 3)".to_string(),
            hint_text: "Look for similar brightness",
        });
        assert!(view.eliminated.is_empty());
        assert!(!view.is_over());
    }
}
