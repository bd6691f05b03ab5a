//! Error handling for the HTTP runtime.
//!
//! Every failure a request can hit maps to one variant of [`ApiErrorKind`],
//! which carries a machine-readable [`ErrorCode`], an HTTP status, and a
//! structured JSON body. Nothing here is retried and nothing is fatal to
//! the process.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use taskserver_core::StoreError;

/// Type-safe error codes surfaced in the `error` field of responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Unknown task id
    TaskNotFound,
    /// Unknown route
    NotFound,
    /// Malformed input or path
    BadRequest,
    /// Wrong or missing content type
    UnsupportedFormat,
    /// Valid path, undefined verb
    MethodNotAllowed,
    /// Missing or invalid credentials on a gated operation
    Unauthorized,
    /// Unexpected server fault
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TaskNotFound => "task_not_found",
            Self::NotFound => "not_found",
            Self::BadRequest => "bad_request",
            Self::UnsupportedFormat => "unsupported_format",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::Unauthorized => "unauthorized",
            Self::InternalError => "internal_error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error: String,
    /// Human-readable error message
    pub message: String,
}

/// Specific error information per category.
#[derive(Debug, Clone)]
pub enum ApiErrorKind {
    /// No task with this id.
    TaskNotFound { id: u64 },
    /// No route matches this path.
    RouteNotFound { path: String },
    /// Malformed body or path segment.
    BadRequest { reason: String },
    /// The request did not declare a recognised content format.
    UnsupportedFormat { reason: String },
    /// The path exists but does not define this verb.
    MethodNotAllowed { method: String, path: String },
    /// Credential verification failed on a gated operation.
    Unauthorized,
    /// Unexpected fault on the response path; reported generically.
    Internal { reason: String },
}

/// A typed API error, convertible straight into an axum response.
#[derive(Debug)]
pub struct ApiError {
    kind: ApiErrorKind,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind) -> Self {
        Self { kind }
    }

    pub fn task_not_found(id: u64) -> Self {
        Self::new(ApiErrorKind::TaskNotFound { id })
    }

    pub fn route_not_found(path: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::RouteNotFound { path: path.into() })
    }

    pub fn bad_request(reason: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::BadRequest {
            reason: reason.into(),
        })
    }

    pub fn unsupported_format(reason: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::UnsupportedFormat {
            reason: reason.into(),
        })
    }

    pub fn method_not_allowed(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::MethodNotAllowed {
            method: method.into(),
            path: path.into(),
        })
    }

    pub fn unauthorized() -> Self {
        Self::new(ApiErrorKind::Unauthorized)
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Internal {
            reason: reason.into(),
        })
    }

    pub fn kind(&self) -> &ApiErrorKind {
        &self.kind
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match &self.kind {
            ApiErrorKind::TaskNotFound { .. } => StatusCode::NOT_FOUND,
            ApiErrorKind::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            ApiErrorKind::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiErrorKind::UnsupportedFormat { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiErrorKind::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiErrorKind::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable code for this error.
    pub fn error_code(&self) -> ErrorCode {
        match &self.kind {
            ApiErrorKind::TaskNotFound { .. } => ErrorCode::TaskNotFound,
            ApiErrorKind::RouteNotFound { .. } => ErrorCode::NotFound,
            ApiErrorKind::BadRequest { .. } => ErrorCode::BadRequest,
            ApiErrorKind::UnsupportedFormat { .. } => ErrorCode::UnsupportedFormat,
            ApiErrorKind::MethodNotAllowed { .. } => ErrorCode::MethodNotAllowed,
            ApiErrorKind::Unauthorized => ErrorCode::Unauthorized,
            ApiErrorKind::Internal { .. } => ErrorCode::InternalError,
        }
    }

    /// The message carried in the response body.
    ///
    /// Internal faults are reported generically; their reasons are logged
    /// server-side only.
    fn message(&self) -> String {
        match &self.kind {
            ApiErrorKind::TaskNotFound { id } => format!("task with id = {id} not found"),
            ApiErrorKind::RouteNotFound { path } => format!("no route for {path}"),
            ApiErrorKind::BadRequest { reason } => reason.clone(),
            ApiErrorKind::UnsupportedFormat { reason } => reason.clone(),
            ApiErrorKind::MethodNotAllowed { method, path } => {
                format!("method {method} is not supported at {path}")
            }
            ApiErrorKind::Unauthorized => "unauthorized".to_string(),
            ApiErrorKind::Internal { .. } => "an internal error occurred".to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ApiErrorKind::Internal { reason } => write!(f, "internal error: {reason}"),
            _ => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::TaskNotFound { id } => Self::task_not_found(id),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                Self::unsupported_format("expected Content-Type: application/json")
            }
            other => Self::bad_request(other.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(
                error_code = %self.error_code(),
                status_code = %status,
                "request failed: {self}"
            );
        } else {
            tracing::warn!(
                error_code = %self.error_code(),
                status_code = %status,
                "request rejected: {self}"
            );
        }

        let body = ErrorResponse {
            error: self.error_code().as_str().to_string(),
            message: self.message(),
        };

        let mut response = (status, Json(body)).into_response();

        // Re-authentication challenge for failed gated operations.
        if matches!(self.kind, ApiErrorKind::Unauthorized) {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                header::HeaderValue::from_static("Basic realm=\"tasks\""),
            );
        }

        response
    }
}
