//! HTTP API Client
//!
//! Functions for communicating with the Statewise REST API.

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use statewise_core::{DemographicStats, StateWiseData};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8082/api/v1";

/// Local storage key overriding the API base URL
const API_URL_KEY: &str = "statewise_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// WebSocket URL of the update stream for an API base URL
pub fn updates_url(api_base: &str) -> String {
    let ws_base = if let Some(rest) = api_base.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = api_base.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        api_base.to_string()
    };
    format!("{}/updates", ws_base.trim_end_matches('/'))
}

// ============ Response Types ============

#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

// ============ API Functions ============

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}{}", api_base, path))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let status = response.status();
        return Err(match response.json::<ApiError>().await {
            Ok(error) => format!("{} ({})", error.error.message, error.error.code),
            Err(_) => format!("Request failed with status {}", status),
        });
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch the state-wise document
pub async fn fetch_statewise() -> Result<StateWiseData, String> {
    get_json("/statewise").await
}

/// Fetch the demographic stats document
pub async fn fetch_stats() -> Result<DemographicStats, String> {
    get_json("/stats").await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_updates_url() {
        assert_eq!(
            updates_url("http://localhost:8082/api/v1"),
            "ws://localhost:8082/api/v1/updates"
        );
        assert_eq!(
            updates_url("https://stats.example.org/api/v1/"),
            "wss://stats.example.org/api/v1/updates"
        );
    }
}
