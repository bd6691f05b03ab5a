//! HTTP request handlers.
//!
//! Handlers stay thin: parse the request, build a
//! [`TaskOperation`](crate::runtime::TaskOperation), dispatch it, and let
//! the boundary impls below turn the tagged outcome into JSON.

pub mod health;
pub mod queries;
pub mod tasks;

pub use health::health_check;
pub use queries::{tasks_by_due_date, tasks_by_tag};
pub use tasks::{create_task, delete_all_tasks, delete_task, get_task, list_all_tasks};

use axum::{
    Json,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::runtime::{TaskOutcome, error::ApiError, types::TaskCreated};

/// Boundary serialisation of dispatch outcomes.
impl IntoResponse for TaskOutcome {
    fn into_response(self) -> Response {
        match self {
            TaskOutcome::Created { id } => {
                (StatusCode::CREATED, Json(TaskCreated { id })).into_response()
            }
            TaskOutcome::Single(task) => Json(task).into_response(),
            TaskOutcome::Many(tasks) => Json(tasks).into_response(),
            TaskOutcome::Deleted | TaskOutcome::Cleared => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// Fallback for known paths hit with an undefined verb.
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::method_not_allowed(method.as_str(), uri.path())
}

/// Fallback for paths no route matches.
pub async fn unknown_path(uri: Uri) -> ApiError {
    ApiError::route_not_found(uri.path())
}

/// Parse a path segment as an integer, mapping failure to `bad_request`.
pub(crate) fn parse_int<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("expected integer {field}, got '{raw}'")))
}
