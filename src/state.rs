//! Application state management
//!
//! Contains shared state accessible across all handlers. Nothing here is
//! mutated after start-up.

use crate::config::AppConfig;
use crate::db::SampleStore;
use crate::probes::Probe;
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState {
    /// Deployment identity (environment, region, host name)
    pub app: AppConfig,

    /// Relational database connectivity check
    pub database_probe: Arc<dyn Probe>,

    /// Object storage connectivity check
    pub storage_probe: Arc<dyn Probe>,

    /// Sample row persistence for the data endpoint
    pub samples: Arc<dyn SampleStore>,
}

impl AppState {
    pub fn new(
        app: AppConfig,
        database_probe: Arc<dyn Probe>,
        storage_probe: Arc<dyn Probe>,
        samples: Arc<dyn SampleStore>,
    ) -> Self {
        Self {
            app,
            database_probe,
            storage_probe,
            samples,
        }
    }
}

/// Type alias for shared state
pub type SharedState = Arc<AppState>;
