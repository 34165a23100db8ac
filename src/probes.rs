//! Dependency probes used by the health endpoint
//!
//! Each probe reports an explicit `Result`; the caller reduces it to a
//! `CheckStatus` and logs the failure.

use crate::db::DbConnector;
use crate::error::AppError;
use crate::models::CheckStatus;
use crate::storage::StorageClient;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error};

/// Bound on the database probe's connection attempt
pub const DATABASE_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// A single connectivity check against an external dependency
#[async_trait]
pub trait Probe: Send + Sync {
    /// Label used in log lines
    fn name(&self) -> &'static str;

    async fn check(&self) -> Result<(), AppError>;
}

/// Run a probe and reduce it to a status, logging any failure
pub async fn run_probe(probe: &dyn Probe) -> CheckStatus {
    match probe.check().await {
        Ok(()) => {
            debug!("{} check passed", probe.name());
            CheckStatus::Ok
        }
        Err(e) => {
            error!("{} check failed: {}", probe.name(), e);
            CheckStatus::Error
        }
    }
}

/// Opens and immediately closes a database connection
pub struct DatabaseProbe {
    connector: DbConnector,
    timeout: Duration,
}

impl DatabaseProbe {
    pub fn new(connector: DbConnector) -> Self {
        Self::with_timeout(connector, DATABASE_PROBE_TIMEOUT)
    }

    pub fn with_timeout(connector: DbConnector, timeout: Duration) -> Self {
        Self { connector, timeout }
    }
}

#[async_trait]
impl Probe for DatabaseProbe {
    fn name(&self) -> &'static str {
        "Database"
    }

    async fn check(&self) -> Result<(), AppError> {
        let client = self.connector.connect(Some(self.timeout)).await?;
        drop(client);
        Ok(())
    }
}

/// Lists buckets through the storage client
pub struct StorageProbe {
    client: StorageClient,
}

impl StorageProbe {
    pub fn new(client: StorageClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Probe for StorageProbe {
    fn name(&self) -> &'static str {
        "S3"
    }

    async fn check(&self) -> Result<(), AppError> {
        self.client.list_buckets().await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;

    struct FailingProbe;

    #[async_trait]
    impl Probe for FailingProbe {
        fn name(&self) -> &'static str {
            "Failing"
        }

        async fn check(&self) -> Result<(), AppError> {
            Err(AppError::Storage("access denied".to_string()))
        }
    }

    #[tokio::test]
    async fn test_failure_maps_to_error_status() {
        assert_eq!(run_probe(&FailingProbe).await, CheckStatus::Error);
    }

    #[test]
    fn test_default_database_bound_is_five_seconds() {
        let check = DatabaseProbe::new(DbConnector::new(&DatabaseConfig::default()));
        assert_eq!(check.timeout, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_database_check_gives_up_on_silent_server() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let config = DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port,
            ..DatabaseConfig::default()
        };
        let check = DatabaseProbe::with_timeout(
            DbConnector::new(&config),
            Duration::from_millis(200),
        );

        let started = std::time::Instant::now();
        let err = check.check().await.unwrap_err();

        assert!(matches!(err, AppError::Timeout(_)));
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(run_probe(&check).await, CheckStatus::Error);
    }

    #[tokio::test]
    async fn test_storage_failure_maps_to_error_status() {
        let check = StorageProbe::new(StorageClient::unreachable());

        let err = check.check().await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert_eq!(run_probe(&check).await, CheckStatus::Error);
    }

    #[tokio::test]
    async fn test_database_check_against_closed_port() {
        let config = DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            ..DatabaseConfig::default()
        };
        let check = DatabaseProbe::new(DbConnector::new(&config));

        assert_eq!(run_probe(&check).await, CheckStatus::Error);
    }
}
