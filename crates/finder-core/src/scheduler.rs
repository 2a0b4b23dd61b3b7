//! Deferred work with a pluggable clock.
//!
//! The session never sleeps. Delayed tasks (debounced input, post-click
//! re-searches, re-entrancy release) are queued with a deadline and drained
//! by whoever owns the event loop via [`Scheduler::pop_due`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

/// Source of "now", as an offset from an arbitrary epoch.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[derive(Debug)]
struct Entry<T> {
    id: TaskId,
    deadline: Duration,
    task: T,
}

/// Deadline-ordered task queue. Tasks with equal deadlines run in the order
/// they were scheduled.
#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    tasks: Vec<Entry<T>>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            tasks: Vec::new(),
        }
    }

    pub fn schedule(&mut self, now: Duration, delay: Duration, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Entry {
            id,
            deadline: now + delay,
            task,
        });
        id
    }

    /// Returns false when the task already ran or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|e| e.id != id);
        self.tasks.len() != before
    }

    pub fn cancel_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|e| !pred(&e.task));
        before - self.tasks.len()
    }

    /// Remove and return the earliest task whose deadline has passed.
    pub fn pop_due(&mut self, now: Duration) -> Option<T> {
        let index = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= now)
            .min_by_key(|(_, e)| (e.deadline, e.id))
            .map(|(i, _)| i)?;
        Some(self.tasks.remove(index).task)
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.tasks.iter().map(|e| e.deadline).min()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn nothing_is_due_before_its_deadline() {
        let mut s = Scheduler::new();
        s.schedule(ms(0), ms(300), "a");
        assert_eq!(s.pop_due(ms(299)), None);
        assert_eq!(s.pop_due(ms(300)), Some("a"));
        assert!(s.is_empty());
    }

    #[test]
    fn due_tasks_come_out_in_deadline_order() {
        let mut s = Scheduler::new();
        s.schedule(ms(0), ms(500), "late");
        s.schedule(ms(0), ms(100), "early");
        s.schedule(ms(0), ms(100), "early-second");
        assert_eq!(s.next_deadline(), Some(ms(100)));
        assert_eq!(s.pop_due(ms(1000)), Some("early"));
        assert_eq!(s.pop_due(ms(1000)), Some("early-second"));
        assert_eq!(s.pop_due(ms(1000)), Some("late"));
        assert_eq!(s.pop_due(ms(1000)), None);
    }

    #[test]
    fn cancel_by_id_and_predicate() {
        let mut s = Scheduler::new();
        let a = s.schedule(ms(0), ms(10), 1);
        s.schedule(ms(0), ms(10), 2);
        s.schedule(ms(0), ms(10), 3);
        assert!(s.cancel(a));
        assert!(!s.cancel(a));
        assert_eq!(s.cancel_where(|t| *t == 3), 1);
        assert_eq!(s.len(), 1);
        s.clear();
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(ms(250));
        assert_eq!(clock.now(), ms(250));
        handle.set(ms(10));
        assert_eq!(clock.now(), ms(10));
    }
}
