//! Route definitions and router setup
//!
//! Configures all API routes and middleware.

mod data;
mod health;
mod home;
mod status;

use crate::state::SharedState;
use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    request_id::MakeRequestUuid,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    ServiceBuilderExt,
};
use tracing::Level;

/// Create the application router with all routes and middleware
pub fn create_router(state: SharedState) -> Router {
    // Build tracing/logging layer
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Build middleware stack
    let middleware = ServiceBuilder::new()
        .set_x_request_id(MakeRequestUuid)
        .layer(trace_layer)
        .layer(CompressionLayer::new())
        .layer(build_cors_layer())
        .propagate_x_request_id();

    Router::new()
        .route("/", get(home::welcome))
        .route("/health", get(health::health_check))
        .route("/api/status", get(status::get_status))
        .route("/api/data", get(data::get_data))
        .layer(middleware)
        .with_state(state)
}

/// Any origin, method and header, with credentials
fn build_cors_layer() -> CorsLayer {
    CorsLayer::very_permissive()
}
