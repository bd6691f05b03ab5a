//! Request and response DTOs for the task endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskserver_core::Attachment;

/// Request body for creating a task.
///
/// `deny_unknown_fields` makes an unrecognised field a deserialisation
/// error, which the handler surfaces as `bad_request` without touching the
/// store.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTaskRequest {
    /// Free-form description; may be empty.
    pub text: String,
    /// Tags; duplicates permitted.
    pub tags: Vec<String>,
    /// Due timestamp, RFC 3339.
    pub due: DateTime<Utc>,
    /// Opaque attachments; optional.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Response body for a successful create: only the assigned id.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskCreated {
    pub id: u64,
}
