//! Sample data route handler

use crate::db::RECENT_LIMIT;
use crate::error::ApiResult;
use crate::models::{utc_timestamp, DataResponse};
use crate::state::SharedState;
use axum::extract::State;
use axum::Json;
use tracing::info;

/// Record one row for this region and return the newest rows
///
/// Not idempotent: every call inserts a row.
pub async fn get_data(State(state): State<SharedState>) -> ApiResult<Json<DataResponse>> {
    let region = &state.app.region;
    let message = format!("Hello from {}", region);

    let data = state
        .samples
        .insert_and_fetch_recent(&message, region, RECENT_LIMIT)
        .await?;

    info!("Recorded sample row for region {}", region);

    Ok(Json(DataResponse {
        data,
        region: region.clone(),
        timestamp: utc_timestamp(),
    }))
}
