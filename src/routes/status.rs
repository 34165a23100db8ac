//! Application status route handler

use crate::models::StatusResponse;
use crate::state::SharedState;
use axum::extract::State;
use axum::Json;

/// Application name, version and deployment identity
pub async fn get_status(State(state): State<SharedState>) -> Json<StatusResponse> {
    Json(StatusResponse::new(&state.app))
}
