//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};
use statewise_core::{Count, SortDirection, StateSummary, TableView};

// ============================================
// DISTRICT DTOs
// ============================================

/// Query parameters for the district table
#[derive(Debug, Default, Deserialize)]
pub struct DistrictQuery {
    /// Metric to sort by (default: confirmed)
    #[serde(default)]
    pub sort: Option<String>,
    /// desc or asc (default: desc)
    #[serde(default)]
    pub order: Option<String>,
    /// Comma-separated metric columns (default: confirmed)
    #[serde(default)]
    pub columns: Option<String>,
}

/// Sorted district table for one state
#[derive(Debug, Serialize)]
pub struct DistrictTableResponse {
    /// State name
    pub state: String,
    /// Active sort key
    pub sort: String,
    /// Active direction
    pub order: SortDirection,
    /// Number of districts
    pub total: usize,
    /// Headers and rows in display order
    pub table: TableView,
}

// ============================================
// STATE DTOs
// ============================================

/// One state in the state list
#[derive(Debug, Serialize)]
pub struct StateListItem {
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub confirmed: Count,
    pub active: Count,
    pub recovered: Count,
    pub deaths: Count,
    pub districts: usize,
}

impl From<&StateSummary> for StateListItem {
    fn from(s: &StateSummary) -> Self {
        Self {
            state: s.state.clone(),
            code: s.code.clone(),
            confirmed: s.cases.confirmed,
            active: s.cases.active,
            recovered: s.cases.recovered,
            deaths: s.cases.deaths,
            districts: s.districts.len(),
        }
    }
}

/// State list response
#[derive(Debug, Serialize)]
pub struct StateListResponse {
    pub states: Vec<StateListItem>,
    /// Snapshot version the list was built from
    pub version: u64,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// healthy or loading
    pub status: String,
    /// Served snapshot version (0 before the first load)
    pub snapshot_version: u64,
    /// When the served snapshot was fetched (RFC 3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<String>,
    /// Live update subscriptions
    pub update_subscribers: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
