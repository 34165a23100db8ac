//! Resilient Web Application
//!
//! A small regional web service: a welcome page, a load-balancer health probe
//! that checks the database and object storage, a status endpoint, and a data
//! endpoint that records and reads back sample rows.

mod config;
mod db;
mod error;
mod models;
mod probes;
mod routes;
mod state;
mod storage;

use crate::config::Settings;
use crate::db::{DbConnector, PgSampleStore};
use crate::probes::{DatabaseProbe, StorageProbe};
use crate::routes::create_router;
use crate::state::AppState;
use crate::storage::StorageClient;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber for structured logging
    init_tracing();

    info!("🚀 Starting Resilient Web Application v{}...", env!("CARGO_PKG_VERSION"));

    // Both the database TLS path and the S3 client use rustls
    if rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    // Load configuration
    let settings = Settings::load()?;
    info!("📋 Configuration loaded successfully");
    info!(
        "   environment={} region={} hostname={}",
        settings.app.environment, settings.app.region, settings.app.hostname
    );
    info!(
        "   database={}@{}:{}/{} (ssl: {:?})",
        settings.database.user,
        settings.database.host,
        settings.database.port,
        settings.database.database,
        settings.database.ssl_mode
    );

    // External clients
    let connector = DbConnector::new(&settings.database);
    let storage = StorageClient::for_region(&settings.app.region).await;

    let state = Arc::new(AppState::new(
        settings.app.clone(),
        Arc::new(DatabaseProbe::new(connector.clone())),
        Arc::new(StorageProbe::new(storage)),
        Arc::new(PgSampleStore::new(connector)),
    ));

    // Build the router
    let app = create_router(state);

    // Create socket address
    let addr = SocketAddr::from((settings.server.host, settings.server.port));

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📚 API Endpoints:");
    info!("   GET  /             - Welcome message");
    info!("   GET  /health       - Database and S3 health check");
    info!("   GET  /api/status   - Application status");
    info!("   GET  /api/data     - Record and list sample data");
    info!("");

    // Create TCP listener and serve
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutdown complete");
    Ok(())
}

/// Initialize tracing with structured logging
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,resilient_webapp=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("📴 Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("📴 Received terminate signal, initiating graceful shutdown...");
        },
    }
}
