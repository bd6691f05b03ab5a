//! # Taskserver HTTP Runtime
//!
//! This crate provides the HTTP front end for the taskserver service: an
//! axum router over the in-memory task store, basic-auth enforcement for
//! task creation, structured JSON errors, and graceful shutdown.
//!
//! The routing layer is deliberately thin: every request is translated into
//! a [`runtime::TaskOperation`], dispatched against the store, and the
//! tagged outcome is serialised at the boundary.

pub mod runtime;

// Re-export main types for public API
pub use runtime::*;
