//! Secondary-index query handlers: by tag and by due date.

use axum::extract::{Path, State};

use crate::runtime::{
    HttpTaskRuntime, TaskOperation, TaskOutcome, dispatch, error::ApiError, handlers::parse_int,
};

/// GET /tag/{tag} - Tasks carrying exactly this tag (case-sensitive).
pub async fn tasks_by_tag(
    State(runtime): State<HttpTaskRuntime>,
    Path(tag): Path<String>,
) -> Result<TaskOutcome, ApiError> {
    dispatch(&runtime.store, TaskOperation::ListByTag { tag })
}

/// GET /due/{year}/{month}/{day} - Tasks due on this UTC calendar day.
///
/// Segments are parsed here so a non-integer maps to `bad_request`; the
/// month range is validated by the dispatcher.
pub async fn tasks_by_due_date(
    State(runtime): State<HttpTaskRuntime>,
    Path((raw_year, raw_month, raw_day)): Path<(String, String, String)>,
) -> Result<TaskOutcome, ApiError> {
    let year = parse_int("year", &raw_year)?;
    let month = parse_int("month", &raw_month)?;
    let day = parse_int("day", &raw_day)?;

    dispatch(
        &runtime.store,
        TaskOperation::ListByDueDate { year, month, day },
    )
}
