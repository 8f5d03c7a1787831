//! Cancellable timers on a virtual clock.
//!
//! The widget never reads the wall clock. Every entry point takes the current
//! time in milliseconds, and periodic work is registered here with an explicit
//! start and an explicit cancel. A host maps [`Scheduler::next_deadline`] onto
//! a real timer.

/// Milliseconds on a monotonic clock chosen by the caller
pub type Millis = u64;

/// Handle to a scheduled task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
struct Entry<T> {
    id: TaskId,
    task: T,
    due: Millis,
    period: Option<Millis>,
}

/// A fired task together with the time it was due
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<T> {
    pub id: TaskId,
    pub task: T,
    pub due: Millis,
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            entries: Vec::new(),
        }
    }

    fn allocate_id(&mut self) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Run `task` once at `at`
    pub fn schedule_once(&mut self, task: T, at: Millis) -> TaskId {
        let id = self.allocate_id();
        self.entries.push(Entry {
            id,
            task,
            due: at,
            period: None,
        });
        id
    }

    /// Run `task` every `period` ms, first at `start + period`
    pub fn schedule_every(&mut self, task: T, start: Millis, period: Millis) -> TaskId {
        let period = period.max(1);
        let id = self.allocate_id();
        self.entries.push(Entry {
            id,
            task,
            due: start + period,
            period: Some(period),
        });
        id
    }

    /// Cancel a task. Returns false if it already fired (one-shot) or was
    /// cancelled before.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Remove the earliest task due at or before `now`.
    ///
    /// Periodic tasks are re-armed one period after the tick that fired, so a
    /// caller that jumps the clock receives every missed tick in order. Ties
    /// fire in registration order.
    pub fn pop_due(&mut self, now: Millis) -> Option<Fired<T>> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= now)
            .min_by_key(|(_, entry)| (entry.due, entry.id.0))
            .map(|(index, _)| index)?;

        let fired = {
            let entry = &self.entries[index];
            Fired {
                id: entry.id,
                task: entry.task.clone(),
                due: entry.due,
            }
        };

        match self.entries[index].period {
            Some(period) => self.entries[index].due += period,
            None => {
                self.entries.remove(index);
            }
        }

        Some(fired)
    }

    /// Earliest pending due time
    pub fn next_deadline(&self) -> Option<Millis> {
        self.entries.iter().map(|entry| entry.due).min()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cancel everything
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Cancel every task matching the predicate
    pub fn cancel_where<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.entries.retain(|entry| !predicate(&entry.task));
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
