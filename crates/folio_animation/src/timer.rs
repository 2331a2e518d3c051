//! Timer queue
//!
//! A deterministic stand-in for `setTimeout`. The queue keeps its own clock;
//! the host moves it forward and pops whatever became due. Tasks scheduled
//! while a due task runs are relative to that task's deadline, so a chain of
//! self-rescheduling ticks keeps exact spacing no matter how late the host
//! advances the clock.
//!
//! ```rust
//! use std::time::Duration;
//! use folio_animation::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! timers.schedule(Duration::from_millis(40), "counter");
//! timers.schedule(Duration::from_millis(10), "typing");
//!
//! let until = Duration::from_millis(50);
//! assert_eq!(timers.pop_due(until).map(|(_, t)| t), Some("typing"));
//! assert_eq!(timers.pop_due(until).map(|(_, t)| t), Some("counter"));
//! assert!(timers.pop_due(until).is_none());
//! ```

use std::time::Duration;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a scheduled timer
    pub struct TimerId;
}

#[derive(Debug)]
struct Timer<T> {
    deadline: Duration,
    /// Scheduling order, breaks deadline ties
    seq: u64,
    task: T,
}

/// One-shot timers ordered by deadline
#[derive(Debug)]
pub struct TimerQueue<T> {
    timers: SlotMap<TimerId, Timer<T>>,
    now: Duration,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            now: Duration::ZERO,
            next_seq: 0,
        }
    }

    /// Current time on the queue's clock
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `task` to become due `delay` from now
    pub fn schedule(&mut self, delay: Duration, task: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.insert(Timer {
            deadline: self.now + delay,
            seq,
            task,
        })
    }

    /// Remove a pending timer, returning its task
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        self.timers.remove(id).map(|t| t.task)
    }

    /// Drop every pending timer
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn contains(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Deadline of the earliest pending timer
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.values().map(|t| t.deadline).min()
    }

    /// Pop the earliest timer due at or before `until`
    ///
    /// The clock moves to that timer's deadline. Returns `None` once nothing
    /// else is due; call [`advance_to`](Self::advance_to) afterwards to bring
    /// the clock up to `until`.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, T)> {
        let id = self
            .timers
            .iter()
            .filter(|(_, t)| t.deadline <= until)
            .min_by_key(|(_, t)| (t.deadline, t.seq))
            .map(|(id, _)| id)?;

        let timer = self.timers.remove(id)?;
        self.now = self.now.max(timer.deadline);
        Some((id, timer.task))
    }

    /// Move the clock forward; never moves it back
    pub fn advance_to(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}
