//! Error handling module
//!
//! Provides unified error types and handling for the entire application.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{}", postgres_message(.0))]
    Database(#[from] tokio_postgres::Error),

    #[error("connection attempt timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("{0}")]
    Storage(String),

    #[error("{0}")]
    Internal(String),
}

/// Full text of a driver error
///
/// The driver's own `Display` stops at the error kind ("db error"), so the
/// server message or the chain of causes is appended here.
pub fn postgres_message(e: &tokio_postgres::Error) -> String {
    if let Some(db) = e.as_db_error() {
        let mut text = db.message().to_string();
        if let Some(detail) = db.detail() {
            text.push_str(": ");
            text.push_str(detail);
        }
        return text;
    }

    let mut text = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl AppError {
    /// Text shown to the caller, prefixed by the failing dependency
    pub fn detail(&self) -> String {
        match self {
            AppError::Database(_) | AppError::Timeout(_) => format!("Database error: {}", self),
            AppError::Storage(_) => format!("Storage error: {}", self),
            AppError::Internal(_) => format!("Internal error: {}", self),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let detail = self.detail();
        error!("{}", detail);

        let body = Json(ErrorResponse { detail });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;
