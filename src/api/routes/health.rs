//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (a snapshot has loaded)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 once the first snapshot is loaded. Until then the
/// dashboard endpoints answer 503, so traffic should not be routed here.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.store.is_ready().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let snapshot = state.store.snapshot().await;

    let status = if snapshot.is_some() { "healthy" } else { "loading" };

    Json(HealthResponse {
        status: status.to_string(),
        snapshot_version: snapshot.as_ref().map(|s| s.version).unwrap_or(0),
        fetched_at: snapshot.as_ref().map(|s| s.fetched_at.to_rfc3339()),
        update_subscribers: state.store.subscriber_count(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
