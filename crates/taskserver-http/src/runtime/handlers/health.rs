//! Liveness endpoint.

use std::sync::OnceLock;
use std::time::Instant;

use axum::response::Json;

// Track service start time for uptime calculation
static START_TIME: OnceLock<Instant> = OnceLock::new();

/// GET /health - Basic health check endpoint with version info.
pub async fn health_check() -> Json<serde_json::Value> {
    let uptime = START_TIME.get_or_init(Instant::now).elapsed().as_secs();

    Json(serde_json::json!({
        "status": "healthy",
        "service": "taskserver-http",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now(),
        "uptime_seconds": uptime,
    }))
}
