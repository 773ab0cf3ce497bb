//! Cancellable delayed tasks on a virtual clock
//!
//! Time only moves when the owner advances it. Due tasks are handed out one at a
//! time in (due time, scheduling order), so a task scheduled with zero delay while
//! another is being handled still fires within the same advance.

use std::collections::BTreeMap;
use std::time::Duration;

/// Handle to a scheduled task, used to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle {
    due: Duration,
    seq: u64,
}

impl TaskHandle {
    /// Virtual time at which the task fires
    pub const fn due(&self) -> Duration {
        self.due
    }
}

/// Single-threaded timer queue driven by explicit clock advances
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Duration,
    next_seq: u64,
    tasks: BTreeMap<TaskHandle, T>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler at time zero
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            tasks: BTreeMap::new(),
        }
    }

    /// Current virtual time
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `task` to fire `delay` after the current time
    pub fn schedule(&mut self, delay: Duration, task: T) -> TaskHandle {
        let handle = TaskHandle {
            due: self.now.saturating_add(delay),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.tasks.insert(handle, task);
        handle
    }

    /// Cancel a pending task
    ///
    /// Returns the task if it had not fired yet.
    pub fn cancel(&mut self, handle: TaskHandle) -> Option<T> {
        self.tasks.remove(&handle)
    }

    /// Check whether a task is still waiting to fire
    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.tasks.contains_key(&handle)
    }

    /// Number of tasks waiting to fire
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Time remaining until the earliest pending task
    pub fn time_to_next(&self) -> Option<Duration> {
        self.tasks
            .keys()
            .next()
            .map(|handle| handle.due.saturating_sub(self.now))
    }

    /// Take the earliest task due at or before `until`
    ///
    /// The clock moves forward to the task's due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        let (&handle, _) = self.tasks.first_key_value()?;
        if handle.due > until {
            return None;
        }
        let task = self.tasks.remove(&handle)?;
        self.now = self.now.max(handle.due);
        Some(task)
    }

    /// Move the clock to `until` once all due tasks have been taken
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
