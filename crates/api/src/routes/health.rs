//! Health check endpoint.

use std::sync::OnceLock;
use std::time::Instant;

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

static STARTED_AT: OnceLock<Instant> = OnceLock::new();

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Seconds since the process started serving.
    pub uptime_secs: u64,
    /// Deployment environment (RUN_MODE).
    pub environment: String,
}

/// Health check handler.
async fn health_check() -> Json<HealthResponse> {
    let started = STARTED_AT.get_or_init(Instant::now);

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: started.elapsed().as_secs(),
        environment: std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()),
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    // Touch the start instant eagerly so uptime counts from router build.
    let _ = STARTED_AT.get_or_init(Instant::now);
    Router::new().route("/health", get(health_check))
}
