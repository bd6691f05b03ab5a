//! # Runtime Module
//!
//! The HTTP runtime wires the task store and credential gate into an axum
//! router. Handlers parse and validate the request, build a
//! [`TaskOperation`], and hand it to [`dispatch`]; the tagged
//! [`TaskOutcome`] or [`ApiError`] is serialised to JSON only at the axum
//! boundary.

/// Basic-auth middleware for gated routes.
pub mod auth;
/// Runtime configuration.
pub mod config;
/// The protocol-agnostic operation/outcome contract.
pub mod dispatch;
/// API error taxonomy and response mapping.
pub mod error;
/// HTTP request handlers.
pub mod handlers;
mod router;
/// Signal-driven graceful shutdown.
pub mod shutdown;
/// Request and response DTOs.
pub mod types;

pub use config::HttpRuntimeConfig;
pub use dispatch::{TaskOperation, TaskOutcome, dispatch};
pub use error::{ApiError, ErrorCode, ErrorResponse};
pub use shutdown::shutdown_signal;

use std::sync::Arc;

use taskserver_core::{CredentialGate, TaskStore};

/// HTTP server state: the shared task store and the credential table.
///
/// Both are constructed once at startup; the store is the only shared
/// mutable resource, and the gate is immutable and lock-free.
#[derive(Clone)]
pub struct HttpTaskRuntime {
    pub store: Arc<TaskStore>,
    pub credentials: Arc<CredentialGate>,
}

impl HttpTaskRuntime {
    /// Create a runtime with a fresh empty store.
    pub fn new(credentials: CredentialGate) -> Self {
        Self::with_store(Arc::new(TaskStore::new()), Arc::new(credentials))
    }

    /// Create a runtime around an existing store and gate.
    pub fn with_store(store: Arc<TaskStore>, credentials: Arc<CredentialGate>) -> Self {
        Self { store, credentials }
    }
}
