//! Statewise REST API
//!
//! HTTP API layer for Statewise, built with Axum.
//!
//! # Endpoints
//!
//! ## Dashboard payloads
//! - `GET /api/v1/statewise` - State-wise document
//! - `GET /api/v1/stats` - Demographic stats document
//! - `GET /api/v1/states` - States ordered by confirmed count
//!
//! ## Districts
//! - `GET /api/v1/states/:state/districts` - Sorted district table
//! - `GET /api/v1/states/:state/districts/export` - Same table as CSV
//!
//! ## Updates
//! - `GET /api/v1/updates` - WebSocket stream of content updates
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use statewise::api::{serve, ApiConfig, AppState};
//! use statewise::store::{DataStore, StoreConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(DataStore::new(StoreConfig::default()));
//!     let config = ApiConfig::default();
//!
//!     serve(AppState::new(store, config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{http::HeaderValue, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::websocket::updates_handler;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Dashboard payloads
        .route("/statewise", get(routes::payloads::get_statewise))
        .route("/stats", get(routes::payloads::get_stats))
        .route("/states", get(routes::payloads::list_states))
        // District tables
        .route("/states/:state/districts", get(routes::districts::get_districts))
        .route(
            "/states/:state/districts/export",
            get(routes::export::export_districts),
        )
        // Content update stream
        .route("/updates", get(updates_handler));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS for the configured origins; any origin when none are listed
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Statewise API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Statewise API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DataStore, StoreConfig};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use statewise_core::{DemographicStats, StateWiseData};
    use tower::util::ServiceExt;

    fn sample_statewise() -> StateWiseData {
        serde_json::from_str(
            r#"{
                "statewise": [
                    {"state": "Kerala", "code": "KL", "confirmed": 165, "districts": {
                        "Kasaragod": {"confirmed": 81},
                        "Kannur": {"confirmed": "35"},
                        "Unknown": {"confirmed": 200},
                        "Ernakulam": {"confirmed": 15}
                    }},
                    {"state": "Tamil Nadu", "code": "TN", "confirmed": "42", "districts": {}}
                ],
                "total": {"confirmed": 207},
                "tested": {"totalSamplesTested": 1000},
                "dayChange": {"confirmed": 8}
            }"#,
        )
        .unwrap()
    }

    fn create_test_app(loaded: bool) -> Router {
        let store = if loaded {
            DataStore::with_snapshot(
                StoreConfig::default(),
                sample_statewise(),
                DemographicStats::default(),
            )
        } else {
            DataStore::new(StoreConfig::default())
        };
        build_router(AppState::new(Arc::new(store), ApiConfig::default()))
    }

    async fn get(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let response = get(create_test_app(false), "/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_follows_snapshot() {
        let response = get(create_test_app(false), "/health/ready").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = get(create_test_app(true), "/health/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let response = get(create_test_app(true), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["snapshot_version"], 1);
    }

    #[tokio::test]
    async fn test_statewise_not_ready() {
        let response = get(create_test_app(false), "/api/v1/statewise").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "NOT_READY");
    }

    #[tokio::test]
    async fn test_statewise_and_stats() {
        let response = get(create_test_app(true), "/api/v1/statewise").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["statewise"][1]["confirmed"], 42);
        assert_eq!(body["dayChange"]["confirmed"], 8);

        let response = get(create_test_app(true), "/api/v1/stats").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_states() {
        let response = get(create_test_app(true), "/api/v1/states").await;
        let body = body_json(response).await;
        assert_eq!(body["states"][0]["state"], "Kerala");
        assert_eq!(body["states"][0]["districts"], 4);
        assert_eq!(body["states"][1]["state"], "Tamil Nadu");
    }

    #[tokio::test]
    async fn test_districts_sorted() {
        let response = get(create_test_app(true), "/api/v1/states/kl/districts").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let names: Vec<_> = body["table"]["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Kasaragod", "Kannur", "Ernakulam", "Unknown"]);
        assert_eq!(body["order"], "desc");
        assert_eq!(body["table"]["headers"][1]["sort_icon"], "descending");
    }

    #[tokio::test]
    async fn test_districts_ascending() {
        let response = get(
            create_test_app(true),
            "/api/v1/states/Kerala/districts?order=asc",
        )
        .await;
        let body = body_json(response).await;
        assert_eq!(body["table"]["rows"][0]["name"], "Ernakulam");
        assert_eq!(body["table"]["rows"][3]["name"], "Unknown");
    }

    #[tokio::test]
    async fn test_districts_empty_state() {
        let response = get(create_test_app(true), "/api/v1/states/TN/districts").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["total"], 0);
        assert_eq!(body["table"]["headers"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_districts_unknown_state() {
        let response = get(create_test_app(true), "/api/v1/states/Goa/districts").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_districts_invalid_order() {
        let response = get(
            create_test_app(true),
            "/api/v1/states/KL/districts?order=up",
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_csv() {
        let response = get(
            create_test_app(true),
            "/api/v1/states/KL/districts/export?order=asc",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "text/csv");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert_eq!(
            text,
            "District,Confirmed\nErnakulam,15\nKannur,35\nKasaragod,81\nUnknown,200\n"
        );
    }
}
