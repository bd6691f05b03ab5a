//! Task CRUD handlers for the `/task/` routes.

use axum::{
    extract::{Path, State, rejection::JsonRejection},
    response::Json,
};

use crate::runtime::{
    HttpTaskRuntime, TaskOperation, TaskOutcome, dispatch,
    error::ApiError,
    handlers::parse_int,
    types::CreateTaskRequest,
};

/// POST /task/ - Store a new task.
///
/// The payload arrives as a `Result` so rejections keep their meaning: a
/// missing JSON content type is `unsupported_format`, while a malformed
/// body or an unrecognised field is `bad_request`. Either way the store is
/// never touched.
pub async fn create_task(
    State(runtime): State<HttpTaskRuntime>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<TaskOutcome, ApiError> {
    let Json(request) = payload?;

    tracing::debug!(tags = request.tags.len(), "handling create task");

    dispatch(
        &runtime.store,
        TaskOperation::Create {
            text: request.text,
            tags: request.tags,
            due: request.due,
            attachments: request.attachments,
        },
    )
}

/// GET /task/ - Snapshot of all tasks.
pub async fn list_all_tasks(
    State(runtime): State<HttpTaskRuntime>,
) -> Result<TaskOutcome, ApiError> {
    dispatch(&runtime.store, TaskOperation::ListAll)
}

/// DELETE /task/ - Remove every task.
pub async fn delete_all_tasks(
    State(runtime): State<HttpTaskRuntime>,
) -> Result<TaskOutcome, ApiError> {
    tracing::info!("handling delete all tasks");
    dispatch(&runtime.store, TaskOperation::DeleteAll)
}

/// GET /task/{id} - Fetch one task.
pub async fn get_task(
    State(runtime): State<HttpTaskRuntime>,
    Path(raw_id): Path<String>,
) -> Result<TaskOutcome, ApiError> {
    let id = parse_int("id", &raw_id)?;
    dispatch(&runtime.store, TaskOperation::Get { id })
}

/// DELETE /task/{id} - Remove one task.
pub async fn delete_task(
    State(runtime): State<HttpTaskRuntime>,
    Path(raw_id): Path<String>,
) -> Result<TaskOutcome, ApiError> {
    let id = parse_int("id", &raw_id)?;
    dispatch(&runtime.store, TaskOperation::Delete { id })
}
