//! Welcome route handler

use crate::models::WelcomeResponse;
use crate::state::SharedState;
use axum::extract::State;
use axum::Json;

/// Welcome message with deployment identity
pub async fn welcome(State(state): State<SharedState>) -> Json<WelcomeResponse> {
    Json(WelcomeResponse::new(&state.app))
}
