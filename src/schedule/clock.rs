use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

/// Handle of one scheduled one-shot. Ids are never reused by a scheduler.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TimerId(pub u64);

/// Cancellable one-shot timers on a single cooperative thread.
///
/// Ordering contract: timers fire in due-time order; timers due at the same instant fire in the
/// order they were scheduled.
pub trait Scheduler {
    /// Current time on this scheduler's clock.
    fn now(&self) -> Duration;
    /// Arm a one-shot that fires `delay` from now.
    fn schedule(&mut self, delay: Duration) -> TimerId;
    /// Disarm a pending one-shot. Returns `false` if it already fired or was cancelled.
    fn cancel(&mut self, id: TimerId) -> bool;
}

/// Deterministic scheduler whose time only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Duration,
    next_id: u64,
    due_by_id: BTreeMap<TimerId, Duration>,
    queue: BTreeSet<(Duration, TimerId)>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of armed timers.
    pub fn pending(&self) -> usize {
        self.due_by_id.len()
    }

    /// Due time of the earliest armed timer.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.first().map(|&(due, _)| due)
    }

    /// Fire the earliest timer due at or before `until`, moving the clock to its due time.
    ///
    /// Call repeatedly: a fired timer's handler may arm new timers inside the same window.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerId> {
        let &(due, id) = self.queue.first()?;
        if due > until {
            return None;
        }
        self.queue.remove(&(due, id));
        self.due_by_id.remove(&id);
        self.now = self.now.max(due);
        Some(id)
    }

    /// Move the clock forward without firing anything.
    ///
    /// The clock never goes backwards.
    pub fn set_now(&mut self, t: Duration) {
        self.now = self.now.max(t);
    }
}

impl Scheduler for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due = self.now.saturating_add(delay);
        self.due_by_id.insert(id, due);
        self.queue.insert((due, id));
        tracing::trace!(id = id.0, ?due, "timer armed");
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        match self.due_by_id.remove(&id) {
            Some(due) => {
                self.queue.remove(&(due, id));
                tracing::trace!(id = id.0, "timer cancelled");
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/clock.rs"]
mod tests;
