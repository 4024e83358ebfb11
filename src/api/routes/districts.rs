//! District Routes
//!
//! - GET /api/v1/states/:state/districts - Sorted district table
//!
//! Query parameters:
//! - `sort`: metric key (default `confirmed`)
//! - `order`: `desc` or `asc` (default `desc`)
//! - `columns`: comma-separated metric columns (default `confirmed`);
//!   the sort key is always shown

use axum::{
    extract::{Path, Query, State},
    Json,
};
use statewise_core::{Column, SortDirection, SortState, TableView, DEFAULT_SORT_KEY};
use std::sync::Arc;

use crate::api::dto::{DistrictQuery, DistrictTableResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::routes::payloads::current_snapshot;
use crate::api::state::AppState;
use crate::store::Snapshot;

/// GET /api/v1/states/:state/districts
pub async fn get_districts(
    State(state): State<Arc<AppState>>,
    Path(state_name): Path<String>,
    Query(query): Query<DistrictQuery>,
) -> ApiResult<Json<DistrictTableResponse>> {
    let snapshot = current_snapshot(&state).await?;
    let response = district_table(&snapshot, &state_name, &query)?;
    Ok(Json(response))
}

/// Build the sorted table for one state
pub fn district_table(
    snapshot: &Snapshot,
    state_name: &str,
    query: &DistrictQuery,
) -> ApiResult<DistrictTableResponse> {
    let region = snapshot
        .statewise
        .find_state(state_name)
        .ok_or_else(|| ApiError::NotFound(format!("state {}", state_name)))?;

    let direction = match query.order.as_deref() {
        Some(order) => order.parse::<SortDirection>()?,
        None => SortDirection::Descending,
    };
    let sort_key = query.sort.as_deref().unwrap_or(DEFAULT_SORT_KEY);
    let sort_state = SortState::try_with_key(&region.districts, sort_key, direction)?;

    let columns = table_columns(query.columns.as_deref(), sort_state.active_key());
    let table = TableView::build(&region.districts, &sort_state, &columns, false);

    tracing::debug!(
        state = %region.state,
        sort = %sort_state.active_key(),
        order = %direction,
        rows = table.rows.len(),
        "Built district table"
    );

    Ok(DistrictTableResponse {
        state: region.state.clone(),
        sort: sort_state.active_key().to_string(),
        order: direction,
        total: table.rows.len(),
        table,
    })
}

/// Requested columns with the sort key appended when missing
fn table_columns(requested: Option<&str>, sort_key: &str) -> Vec<Column> {
    let mut columns: Vec<Column> = match requested {
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(|k| {
                if k == DEFAULT_SORT_KEY {
                    Column::confirmed()
                } else {
                    Column::for_key(k)
                }
            })
            .collect(),
        None => vec![Column::confirmed()],
    };

    if !columns.iter().any(|c| c.key == sort_key) {
        columns.push(Column::for_key(sort_key));
    }

    columns
}
