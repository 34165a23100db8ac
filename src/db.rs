//! Database connection management
//!
//! Every operation opens its own connection and drops it when done; there is no
//! pool. The background connection task ends as soon as the client is dropped.

pub mod queries;

use crate::config::{DatabaseConfig, SslMode};
use crate::error::AppError;
use crate::models::SampleRecord;
use async_trait::async_trait;
use std::time::Duration;
use tokio_postgres::error::SqlState;
use tokio_postgres::tls::{MakeTlsConnect, TlsConnect};
use tokio_postgres::{Client, Config, NoTls, Socket};
use tracing::{debug, warn};

/// Number of rows returned by the data endpoint
pub const RECENT_LIMIT: i64 = 10;

/// Opens fresh connections to the configured database
#[derive(Debug, Clone)]
pub struct DbConnector {
    config: Config,
    ssl_mode: SslMode,
}

impl DbConnector {
    pub fn new(db: &DatabaseConfig) -> Self {
        let mut config = Config::new();
        config
            .host(&db.host)
            .port(db.port)
            .user(&db.user)
            .password(&db.password)
            .dbname(&db.database)
            .application_name(env!("CARGO_PKG_NAME"));

        Self {
            config,
            ssl_mode: db.ssl_mode,
        }
    }

    /// Open a connection, optionally bounding the whole attempt by `timeout`
    pub async fn connect(&self, timeout: Option<Duration>) -> Result<Client, AppError> {
        match timeout {
            Some(limit) => {
                let mut config = self.config.clone();
                config.connect_timeout(limit);
                tokio::time::timeout(limit, self.open(&config))
                    .await
                    .map_err(|_| AppError::Timeout(limit))?
            }
            None => self.open(&self.config).await,
        }
    }

    async fn open(&self, config: &Config) -> Result<Client, AppError> {
        match self.ssl_mode {
            SslMode::Disable => spawn_connection(config, NoTls).await,
            SslMode::Require => spawn_connection(config, rustls_connector()).await,
        }
    }
}

/// Build a rustls connector trusting the platform's native roots
fn rustls_connector() -> tokio_postgres_rustls::MakeRustlsConnect {
    let certs = rustls_native_certs::load_native_certs();
    for err in &certs.errors {
        warn!("Failed to load a native certificate: {}", err);
    }

    let mut root_store = rustls::RootCertStore::empty();
    for cert in certs.certs {
        root_store.add(cert).ok();
    }

    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    tokio_postgres_rustls::MakeRustlsConnect::new(tls_config)
}

async fn spawn_connection<T>(config: &Config, tls: T) -> Result<Client, AppError>
where
    T: MakeTlsConnect<Socket> + Send,
    T::Stream: Send + 'static,
    T::TlsConnect: Send,
    <T::TlsConnect as TlsConnect<Socket>>::Future: Send,
{
    let (client, connection) = config.connect(tls).await?;

    tokio::spawn(async move {
        if let Err(e) = connection.await {
            debug!("Database connection closed with error: {}", e);
        }
    });

    Ok(client)
}

/// Create the sample table unless it exists
///
/// Concurrent `CREATE TABLE IF NOT EXISTS` statements race on the catalog and
/// the losers fail with a duplicate error even though the table now exists.
async fn ensure_sample_table(client: &Client) -> Result<(), AppError> {
    match client.batch_execute(queries::CREATE_SAMPLE_TABLE).await {
        Ok(()) => Ok(()),
        Err(e) if is_concurrent_create(&e) => {
            debug!("sample_data created by a concurrent request");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn is_concurrent_create(e: &tokio_postgres::Error) -> bool {
    matches!(
        e.code(),
        Some(code) if *code == SqlState::UNIQUE_VIOLATION || *code == SqlState::DUPLICATE_TABLE
    )
}

/// Persistence for sample rows
#[async_trait]
pub trait SampleStore: Send + Sync {
    /// Insert one row and return the `limit` newest rows, newest first
    async fn insert_and_fetch_recent(
        &self,
        message: &str,
        region: &str,
        limit: i64,
    ) -> Result<Vec<SampleRecord>, AppError>;
}

/// `SampleStore` backed by PostgreSQL, one connection per call
pub struct PgSampleStore {
    connector: DbConnector,
}

impl PgSampleStore {
    pub fn new(connector: DbConnector) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl SampleStore for PgSampleStore {
    async fn insert_and_fetch_recent(
        &self,
        message: &str,
        region: &str,
        limit: i64,
    ) -> Result<Vec<SampleRecord>, AppError> {
        let mut client = self.connector.connect(None).await?;

        ensure_sample_table(&client).await?;

        let tx = client.transaction().await?;
        tx.execute(queries::INSERT_SAMPLE, &[&message, &region]).await?;
        tx.commit().await?;

        let rows = client.query(queries::RECENT_SAMPLES, &[&limit]).await?;
        debug!("Fetched {} sample rows", rows.len());

        Ok(rows.iter().map(SampleRecord::from).collect())
    }
}
