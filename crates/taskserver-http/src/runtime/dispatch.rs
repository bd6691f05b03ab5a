//! The dispatch contract: logical operations onto the task store.
//!
//! This module is the protocol-agnostic middle of the runtime. A request,
//! however it arrived, is reduced to one [`TaskOperation`]; [`dispatch`]
//! maps it onto exactly one store call and returns a tagged
//! [`TaskOutcome`] or a typed [`ApiError`]. No serialisation happens here;
//! that is the boundary's job.

use chrono::{DateTime, Utc};
use taskserver_core::{Attachment, Task, TaskStore};

use crate::runtime::error::ApiError;

/// A logical operation against the store.
#[derive(Debug, Clone)]
pub enum TaskOperation {
    /// Store a new task.
    Create {
        text: String,
        tags: Vec<String>,
        due: DateTime<Utc>,
        attachments: Vec<Attachment>,
    },
    /// Snapshot every live task.
    ListAll,
    /// Remove every task.
    DeleteAll,
    /// Fetch one task by id.
    Get { id: u64 },
    /// Remove one task by id.
    Delete { id: u64 },
    /// Every task carrying exactly this tag.
    ListByTag { tag: String },
    /// Every task due on this UTC calendar day.
    ListByDueDate { year: i32, month: u32, day: u32 },
}

/// The tagged result of a dispatched operation.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    /// A task was stored; only the assigned id is reported.
    Created { id: u64 },
    /// A single task.
    Single(Task),
    /// A snapshot of tasks, in no particular order.
    Many(Vec<Task>),
    /// One task was removed.
    Deleted,
    /// The whole collection was removed.
    Cleared,
}

/// Map one operation onto one store call.
///
/// Validation that does not belong to the store happens here, before the
/// store is touched: an impossible month is rejected rather than silently
/// matching nothing.
pub fn dispatch(store: &TaskStore, operation: TaskOperation) -> Result<TaskOutcome, ApiError> {
    match operation {
        TaskOperation::Create {
            text,
            tags,
            due,
            attachments,
        } => {
            let id = store.create_task(text, tags, due, attachments);
            Ok(TaskOutcome::Created { id })
        }
        TaskOperation::ListAll => Ok(TaskOutcome::Many(store.all_tasks())),
        TaskOperation::DeleteAll => {
            store.delete_all_tasks();
            Ok(TaskOutcome::Cleared)
        }
        TaskOperation::Get { id } => Ok(TaskOutcome::Single(store.task(id)?)),
        TaskOperation::Delete { id } => {
            store.delete_task(id)?;
            Ok(TaskOutcome::Deleted)
        }
        TaskOperation::ListByTag { tag } => Ok(TaskOutcome::Many(store.tasks_by_tag(&tag))),
        TaskOperation::ListByDueDate { year, month, day } => {
            if !(1..=12).contains(&month) {
                return Err(ApiError::bad_request(format!(
                    "month must be in 1..=12, got {month}"
                )));
            }
            Ok(TaskOutcome::Many(store.tasks_by_due_date(year, month, day)))
        }
    }
}
