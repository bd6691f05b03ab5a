//! Concurrent in-memory task store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Datelike, Utc};

use crate::error::{StoreError, StoreResult};
use crate::task::{Attachment, Task};

/// The single source of truth for tasks.
///
/// All operations take `&self` and are atomic with respect to each other:
/// a single exclusive lock is held for the full duration of every call, so
/// no operation ever observes a partial effect of another. Lock hold time
/// is bounded by in-memory work only.
///
/// Identifiers are assigned by a strictly increasing counter starting at 0
/// and are never reused, not even after [`TaskStore::delete_all_tasks`].
///
/// # Example
///
/// ```rust
/// use taskserver_core::TaskStore;
/// use chrono::Utc;
///
/// let store = TaskStore::new();
/// let id = store.create_task("buy milk".into(), vec!["errand".into()], Utc::now(), Vec::new());
/// assert_eq!(id, 0);
/// assert_eq!(store.task(id).unwrap().text, "buy milk");
/// ```
#[derive(Debug, Default)]
pub struct TaskStore {
    inner: Mutex<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    tasks: HashMap<u64, Task>,
    next_id: u64,
}

impl TaskStore {
    /// Create a new empty store with the id counter at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the store lock, absorbing poisoning.
    ///
    /// The critical sections below contain no panicking operations, and the
    /// store's contract has no failure mode for a poisoned lock, so the
    /// inner state is recovered as-is.
    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a new task and return its assigned id. Always succeeds.
    ///
    /// The task owns its `tags` and `attachments` outright, so no later
    /// caller-side mutation can reach stored state.
    pub fn create_task(
        &self,
        text: String,
        tags: Vec<String>,
        due: DateTime<Utc>,
        attachments: Vec<Attachment>,
    ) -> u64 {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.tasks.insert(
            id,
            Task {
                id,
                text,
                tags,
                due,
                attachments,
            },
        );
        id
    }

    /// Fetch a task by id.
    pub fn task(&self, id: u64) -> StoreResult<Task> {
        self.lock()
            .tasks
            .get(&id)
            .cloned()
            .ok_or(StoreError::TaskNotFound { id })
    }

    /// Snapshot of every live task, in no particular order.
    pub fn all_tasks(&self) -> Vec<Task> {
        self.lock().tasks.values().cloned().collect()
    }

    /// Remove a task by id.
    pub fn delete_task(&self, id: u64) -> StoreResult<()> {
        self.lock()
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::TaskNotFound { id })
    }

    /// Remove every task. The id counter is left untouched, so ids issued
    /// after a bulk delete remain strictly greater than all earlier ones.
    pub fn delete_all_tasks(&self) {
        self.lock().tasks.clear();
    }

    /// Every task whose tag list contains an element exactly equal to
    /// `tag`. A task with the tag present more than once appears once.
    pub fn tasks_by_tag(&self, tag: &str) -> Vec<Task> {
        self.lock()
            .tasks
            .values()
            .filter(|task| task.tags.iter().any(|t| t == tag))
            .cloned()
            .collect()
    }

    /// Every task whose due date falls on the given UTC calendar day.
    /// The time-of-day component of `due` is ignored.
    ///
    /// An out-of-range `month` is not an error here; it simply matches
    /// nothing. Callers that need to reject impossible dates validate
    /// before calling.
    pub fn tasks_by_due_date(&self, year: i32, month: u32, day: u32) -> Vec<Task> {
        self.lock()
            .tasks
            .values()
            .filter(|task| {
                task.due.year() == year && task.due.month() == month && task.due.day() == day
            })
            .cloned()
            .collect()
    }
}
