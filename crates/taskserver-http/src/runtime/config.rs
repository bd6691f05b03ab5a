//! HTTP runtime configuration.

/// Tunables for the HTTP runtime.
#[derive(Debug, Clone)]
pub struct HttpRuntimeConfig {
    /// Enable CORS for cross-origin requests.
    pub enable_cors: bool,
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for HttpRuntimeConfig {
    fn default() -> Self {
        Self {
            enable_cors: true,
            max_body_size: 1024 * 1024, // 1MB; task payloads are small
        }
    }
}
