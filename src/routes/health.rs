//! Health check route handler
//!
//! Used by the load balancer. Both probes run as separate tasks; their failures
//! only downgrade the reported status. A probe task that panics is the one way
//! this handler fails, and it answers 503.

use crate::error::AppError;
use crate::models::{utc_timestamp, HealthChecks, HealthErrorResponse, HealthResponse, HealthStatus};
use crate::probes::run_probe;
use crate::state::SharedState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

pub async fn health_check(State(state): State<SharedState>) -> Response {
    match run_checks(&state).await {
        Ok(checks) => Json(HealthResponse::new(&state.app, checks)).into_response(),
        Err(e) => {
            error!("Health check failed: {}", e);
            let body = HealthErrorResponse {
                status: HealthStatus::Unhealthy,
                error: e.to_string(),
                environment: state.app.environment.clone(),
                region: state.app.region.clone(),
                timestamp: utc_timestamp(),
            };
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
    }
}

async fn run_checks(state: &SharedState) -> Result<HealthChecks, AppError> {
    let database_probe = state.database_probe.clone();
    let storage_probe = state.storage_probe.clone();

    let database = tokio::spawn(async move { run_probe(database_probe.as_ref()).await });
    let s3 = tokio::spawn(async move { run_probe(storage_probe.as_ref()).await });

    let (database, s3) = tokio::join!(database, s3);

    Ok(HealthChecks {
        database: database.map_err(|e| AppError::Internal(format!("database probe: {}", e)))?,
        s3: s3.map_err(|e| AppError::Internal(format!("s3 probe: {}", e)))?,
    })
}
