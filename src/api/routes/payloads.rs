//! Dashboard Payload Routes
//!
//! - GET /api/v1/statewise - State-wise document
//! - GET /api/v1/stats - Demographic stats document
//! - GET /api/v1/states - States ordered by confirmed count

use axum::{extract::State, Json};
use statewise_core::{DemographicStats, StateWiseData};
use std::sync::Arc;

use crate::api::dto::{StateListItem, StateListResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::store::Snapshot;

pub(crate) async fn current_snapshot(state: &AppState) -> ApiResult<Arc<Snapshot>> {
    state.store.snapshot().await.ok_or(ApiError::NotReady)
}

/// GET /api/v1/statewise
pub async fn get_statewise(State(state): State<Arc<AppState>>) -> ApiResult<Json<StateWiseData>> {
    let snapshot = current_snapshot(&state).await?;
    Ok(Json(snapshot.statewise.clone()))
}

/// GET /api/v1/stats
pub async fn get_stats(State(state): State<Arc<AppState>>) -> ApiResult<Json<DemographicStats>> {
    let snapshot = current_snapshot(&state).await?;
    Ok(Json(snapshot.stats.clone()))
}

/// GET /api/v1/states
pub async fn list_states(State(state): State<Arc<AppState>>) -> ApiResult<Json<StateListResponse>> {
    let snapshot = current_snapshot(&state).await?;

    let states = snapshot
        .statewise
        .states_by_confirmed()
        .into_iter()
        .map(StateListItem::from)
        .collect();

    Ok(Json(StateListResponse {
        states,
        version: snapshot.version,
    }))
}
