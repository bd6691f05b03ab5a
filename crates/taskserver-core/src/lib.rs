//! # Taskserver Core
//!
//! Domain types and the concurrency-safe in-memory task store for the
//! taskserver service, together with the credential gate that guards
//! mutating operations. This crate carries no transport concerns; the HTTP
//! front end lives in `taskserver-http`.

pub mod credentials;
pub mod error;
pub mod store;
pub mod task;

pub use credentials::{CredentialError, CredentialGate, StoredSecret};
pub use error::{StoreError, StoreResult};
pub use store::TaskStore;
pub use task::{Attachment, Task};
