//! HTTP Basic authentication middleware.
//!
//! Applied with `route_layer` to gated routes only. The credential table is
//! the immutable [`taskserver_core::CredentialGate`] carried in the runtime
//! state; any parse failure, unknown username, or wrong secret collapses to
//! the same `401` with a re-authentication challenge.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::runtime::{HttpTaskRuntime, error::ApiError};

/// Middleware that verifies the request carries valid basic-auth
/// credentials before letting it through to the handler.
pub async fn require_basic_auth(
    State(runtime): State<HttpTaskRuntime>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Basic "))
        .and_then(|encoded| STANDARD.decode(encoded).ok())
        .and_then(|raw| String::from_utf8(raw).ok())
        .is_some_and(|pair| {
            pair.split_once(':')
                .is_some_and(|(username, secret)| runtime.credentials.verify(username, secret))
        });

    if authorized {
        Ok(next.run(request).await)
    } else {
        Err(ApiError::unauthorized())
    }
}
