//! Task value types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single tracked task.
///
/// Tasks are immutable once stored: there is no update operation, only
/// create and delete. The `id` is assigned by the store and is never
/// client-supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier, unique for the lifetime of the store.
    pub id: u64,
    /// Free-form description; may be empty.
    pub text: String,
    /// Tags in insertion order. Duplicates are permitted; membership tests
    /// are exact, case-sensitive string equality.
    pub tags: Vec<String>,
    /// Due timestamp. Due-date queries look only at the UTC calendar date
    /// and discard the time of day.
    pub due: DateTime<Utc>,
    /// Opaque attachment records, carried through the store uninterpreted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

/// An opaque attachment carried on a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub date: DateTime<Utc>,
    /// Opaque payload; the store does not interpret it.
    pub contents: String,
}
