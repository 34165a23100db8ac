//! Data models and DTOs (Data Transfer Objects)
//!
//! Contains the persisted row type and every response structure used by the API.

use crate::config::AppConfig;
use chrono::{NaiveDateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Fixed greeting returned by `GET /`
pub const WELCOME_MESSAGE: &str = "Welcome to the Resilient Web Application";

/// Application name reported by `GET /api/status`
pub const APPLICATION_NAME: &str = "Resilient Web Application";

/// Current UTC time as an ISO-8601 string
pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// A row of the `sample_data` table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRecord {
    pub id: i32,
    pub message: Option<String>,
    pub region: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl From<&tokio_postgres::Row> for SampleRecord {
    fn from(row: &tokio_postgres::Row) -> Self {
        Self {
            id: row.get("id"),
            message: row.get("message"),
            region: row.get("region"),
            created_at: row.get("created_at"),
        }
    }
}

/// Response for `GET /`
#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: String,
    pub environment: String,
    pub region: String,
    pub hostname: String,
    pub timestamp: String,
}

impl WelcomeResponse {
    pub fn new(app: &AppConfig) -> Self {
        Self {
            message: WELCOME_MESSAGE.to_string(),
            environment: app.environment.clone(),
            region: app.region.clone(),
            hostname: app.hostname.clone(),
            timestamp: utc_timestamp(),
        }
    }
}

/// Outcome of a single probe as reported to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Error,
}

/// Overall health derived from the probes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Per-dependency probe results
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
    pub s3: CheckStatus,
}

impl HealthChecks {
    pub fn overall(&self) -> HealthStatus {
        if self.database == CheckStatus::Ok && self.s3 == CheckStatus::Ok {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        }
    }
}

/// Response for `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub environment: String,
    pub region: String,
    pub hostname: String,
    pub timestamp: String,
    pub checks: HealthChecks,
}

impl HealthResponse {
    pub fn new(app: &AppConfig, checks: HealthChecks) -> Self {
        Self {
            status: checks.overall(),
            environment: app.environment.clone(),
            region: app.region.clone(),
            hostname: app.hostname.clone(),
            timestamp: utc_timestamp(),
            checks,
        }
    }
}

/// Body of the 503 returned when the health handler itself fails
#[derive(Debug, Serialize)]
pub struct HealthErrorResponse {
    pub status: HealthStatus,
    pub error: String,
    pub environment: String,
    pub region: String,
    pub timestamp: String,
}

/// Response for `GET /api/status`
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub application: String,
    pub environment: String,
    pub region: String,
    pub hostname: String,
    pub timestamp: String,
    pub version: String,
}

impl StatusResponse {
    pub fn new(app: &AppConfig) -> Self {
        Self {
            application: APPLICATION_NAME.to_string(),
            environment: app.environment.clone(),
            region: app.region.clone(),
            hostname: app.hostname.clone(),
            timestamp: utc_timestamp(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Response for `GET /api/data`
#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub data: Vec<SampleRecord>,
    pub region: String,
    pub timestamp: String,
}
