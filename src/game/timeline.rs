use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

use log::trace;

struct Scheduled<T> {
    due: Duration,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Scheduled<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<T> Eq for Scheduled<T> {}

impl<T> PartialOrd for Scheduled<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Scheduled<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due.cmp(&other.due).then(self.seq.cmp(&other.seq))
    }
}

/// A logical clock plus the tasks scheduled against it. Tasks due at the
/// same instant come out in the order they were scheduled.
pub struct Timeline<T> {
    now: Duration,
    next_seq: u64,
    pending: BinaryHeap<Reverse<Scheduled<T>>>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: BinaryHeap::new(),
        }
    }
}

impl<T: std::fmt::Debug> Timeline<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn schedule(&mut self, delay: Duration, task: T) {
        let due = self.now + delay;
        trace!(target: "timeline", "Scheduling {:?} at {:?}", task, due);
        self.pending.push(Reverse(Scheduled {
            due,
            seq: self.next_seq,
            task,
        }));
        self.next_seq += 1;
    }

    /// Removes the earliest task due at or before `until` and moves the
    /// clock to its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        let due = self.pending.peek().map(|Reverse(s)| s.due)?;
        if due > until {
            return None;
        }
        let Reverse(scheduled) = self.pending.pop()?;
        self.now = self.now.max(scheduled.due);
        Some(scheduled.task)
    }

    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_fire_in_due_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(Duration::from_millis(1500), "next-round");
        timeline.schedule(Duration::from_millis(1000), "tick");
        timeline.schedule(Duration::from_millis(1000), "tick-2");

        let until = Duration::from_secs(2);
        assert_eq!(timeline.pop_due(until), Some("tick"));
        assert_eq!(timeline.now(), Duration::from_millis(1000));
        assert_eq!(timeline.pop_due(until), Some("tick-2"));
        assert_eq!(timeline.pop_due(until), Some("next-round"));
        assert_eq!(timeline.now(), Duration::from_millis(1500));
        assert_eq!(timeline.pop_due(until), None);
    }

    #[test]
    fn test_future_tasks_stay_pending() {
        let mut timeline = Timeline::new();
        timeline.schedule(Duration::from_secs(5), 1);
        assert_eq!(timeline.pop_due(Duration::from_secs(4)), None);
        timeline.advance_to(Duration::from_secs(4));
        assert_eq!(timeline.now(), Duration::from_secs(4));
        assert_eq!(timeline.len(), 1);

        // delays are relative to the advanced clock
        timeline.schedule(Duration::from_secs(1), 2);
        assert_eq!(timeline.pop_due(Duration::from_secs(5)), Some(1));
        assert_eq!(timeline.pop_due(Duration::from_secs(5)), Some(2));
        assert!(timeline.is_empty());
    }
}
