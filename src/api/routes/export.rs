//! Export Routes
//!
//! - GET /api/v1/states/:state/districts/export - Sorted district table as CSV
//!
//! Accepts the same query parameters as the district table.

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::{DistrictQuery, DistrictTableResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::routes::districts::district_table;
use crate::api::routes::payloads::current_snapshot;
use crate::api::state::AppState;

/// GET /api/v1/states/:state/districts/export
pub async fn export_districts(
    State(state): State<Arc<AppState>>,
    Path(state_name): Path<String>,
    Query(query): Query<DistrictQuery>,
) -> ApiResult<Response> {
    if !state.config.enable_export {
        return Err(ApiError::Validation(
            "Export feature is disabled".to_string(),
        ));
    }

    let snapshot = current_snapshot(&state).await?;
    let response = district_table(&snapshot, &state_name, &query)?;
    let body = format_csv(&response)?;

    let filename = format!(
        "statewise_{}_districts_{}.csv",
        response.state.to_lowercase().replace(char::is_whitespace, "_"),
        Utc::now().format("%Y%m%d_%H%M%S")
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        Body::from(body),
    )
        .into_response())
}

/// Header row plus one row per district, in display order
pub fn format_csv(response: &DistrictTableResponse) -> ApiResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(response.table.headers.iter().map(|h| h.title.as_str()))
        .map_err(|e| ApiError::Internal(format!("CSV error: {}", e)))?;

    for row in &response.table.rows {
        writer
            .write_record(std::iter::once(row.name.as_str()).chain(row.values.iter().map(String::as_str)))
            .map_err(|e| ApiError::Internal(format!("CSV error: {}", e)))?;
    }

    writer
        .into_inner()
        .map_err(|e| ApiError::Internal(format!("CSV error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use statewise_core::{Column, DistrictMap, DistrictMetrics, SortDirection, SortState, TableView};

    #[test]
    fn test_format_csv() {
        let mut districts = DistrictMap::new();
        districts.insert("North, East".to_string(), DistrictMetrics::new().with("confirmed", 4));
        districts.insert("Unknown".to_string(), DistrictMetrics::new().with("confirmed", 9));
        districts.insert("South".to_string(), DistrictMetrics::new().with("confirmed", 7));

        let sort_state = SortState::new(&districts);
        let table = TableView::build(&districts, &sort_state, &[Column::confirmed()], false);
        let response = DistrictTableResponse {
            state: "Test".to_string(),
            sort: "confirmed".to_string(),
            order: SortDirection::Descending,
            total: table.rows.len(),
            table,
        };

        let csv = String::from_utf8(format_csv(&response).unwrap()).unwrap();
        assert_eq!(
            csv,
            "District,Confirmed\nSouth,7\n\"North, East\",4\nUnknown,9\n"
        );
    }
}
