//! Task store errors.
//!
//! Every documented failure of the store is a typed variant here; the store
//! never signals anything else.

/// Errors raised by [`crate::TaskStore`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No task with the given id exists in the store.
    #[error("task with id = {id} not found")]
    TaskNotFound { id: u64 },
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
