//! Application configuration module
//!
//! Handles loading configuration from environment variables. Everything is read
//! once at start-up and stays immutable for the lifetime of the process.

use std::net::Ipv4Addr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: Ipv4Addr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::new(0, 0, 0, 0), // Bind to 0.0.0.0 behind the load balancer
            port: 8000,
        }
    }
}

/// Deployment identity echoed back by every endpoint
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub region: String,
    pub hostname: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "unknown".to_string(),
            region: "unknown".to_string(),
            hostname: "unknown".to_string(),
        }
    }
}

/// TLS policy for database connections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SslMode {
    #[default]
    Disable,
    Require,
}

impl std::str::FromStr for SslMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disable" | "" => Ok(SslMode::Disable),
            "require" => Ok(SslMode::Require),
            other => Err(ConfigError::InvalidValue(format!(
                "DB_SSLMODE must be 'disable' or 'require', got '{}'",
                other
            ))),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub ssl_mode: SslMode,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "admin".to_string(),
            password: String::new(),
            database: "webapp".to_string(),
            ssl_mode: SslMode::Disable,
        }
    }
}

/// Complete application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub app: AppConfig,
    pub database: DatabaseConfig,
}

impl Settings {
    /// Load settings from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore errors if file not found)
        let _ = dotenvy::dotenv();

        let hostname = hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_else(|_| AppConfig::default().hostname);

        Self::from_lookup(|key| std::env::var(key).ok(), hostname)
    }

    /// Build settings from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F, hostname: String) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_defaults = ServerConfig::default();
        let server = ServerConfig {
            host: lookup("HOST")
                .and_then(|h| h.parse().ok())
                .unwrap_or(server_defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(server_defaults.port),
        };

        let app_defaults = AppConfig::default();
        let app = AppConfig {
            environment: lookup("ENVIRONMENT").unwrap_or(app_defaults.environment),
            region: lookup("REGION").unwrap_or(app_defaults.region),
            hostname,
        };

        let db_defaults = DatabaseConfig::default();
        let database = DatabaseConfig {
            host: lookup("DB_HOST").unwrap_or(db_defaults.host),
            port: lookup("DB_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(db_defaults.port),
            user: lookup("DB_USER").unwrap_or(db_defaults.user),
            password: lookup("DB_PASSWORD").unwrap_or(db_defaults.password),
            database: lookup("DB_NAME").unwrap_or(db_defaults.database),
            ssl_mode: match lookup("DB_SSLMODE") {
                Some(mode) => mode.parse()?,
                None => db_defaults.ssl_mode,
            },
        };

        Ok(Self {
            server,
            app,
            database,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned(), "test-host".to_string())
    }

    #[test]
    fn test_default_server_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, Ipv4Addr::new(0, 0, 0, 0));
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let settings = settings_from(&[]).unwrap();

        assert_eq!(settings.app.environment, "unknown");
        assert_eq!(settings.app.region, "unknown");
        assert_eq!(settings.app.hostname, "test-host");
        assert_eq!(settings.database.host, "localhost");
        assert_eq!(settings.database.port, 5432);
        assert_eq!(settings.database.user, "admin");
        assert_eq!(settings.database.password, "");
        assert_eq!(settings.database.database, "webapp");
        assert_eq!(settings.database.ssl_mode, SslMode::Disable);
    }

    #[test]
    fn test_values_are_taken_verbatim() {
        let settings = settings_from(&[
            ("ENVIRONMENT", "production"),
            ("REGION", "us-east-1"),
            ("DB_HOST", "db.internal"),
            ("DB_USER", "app"),
            ("DB_PASSWORD", "s3cret"),
            ("DB_NAME", "orders"),
            ("DB_SSLMODE", "Require"),
            ("PORT", "9090"),
        ])
        .unwrap();

        assert_eq!(settings.app.environment, "production");
        assert_eq!(settings.app.region, "us-east-1");
        assert_eq!(settings.database.host, "db.internal");
        assert_eq!(settings.database.user, "app");
        assert_eq!(settings.database.password, "s3cret");
        assert_eq!(settings.database.database, "orders");
        assert_eq!(settings.database.ssl_mode, SslMode::Require);
        assert_eq!(settings.server.port, 9090);
    }

    #[test]
    fn test_unparseable_port_falls_back() {
        let settings = settings_from(&[("PORT", "eighty"), ("DB_PORT", "-1")]).unwrap();
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.database.port, 5432);
    }

    #[test]
    fn test_unknown_ssl_mode_is_rejected() {
        let result = settings_from(&[("DB_SSLMODE", "verify-full")]);
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }
}
