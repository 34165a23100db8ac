//! Object storage client
//!
//! Thin wrapper over the S3 SDK. Credentials come from the SDK's default
//! provider chain; only the region is configured here.

use crate::error::AppError;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use tracing::debug;

/// S3 client bound to the deployment region
#[derive(Debug, Clone)]
pub struct StorageClient {
    client: Client,
}

impl StorageClient {
    /// Build a client for `region` using the default credential chain
    pub async fn for_region(region: &str) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        Self::from_client(Client::new(&sdk_config))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// List the buckets visible to the resolved credentials
    pub async fn list_buckets(&self) -> Result<Vec<String>, AppError> {
        let output = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|e| AppError::Storage(aws_sdk_s3::error::DisplayErrorContext(e).to_string()))?;

        let names: Vec<String> = output
            .buckets()
            .iter()
            .filter_map(|b| b.name().map(str::to_string))
            .collect();

        debug!("Listed {} buckets", names.len());
        Ok(names)
    }
}

#[cfg(test)]
impl StorageClient {
    /// Client with static credentials aimed at a host that never resolves
    pub fn unreachable() -> Self {
        use aws_sdk_s3::config::retry::RetryConfig;
        use aws_sdk_s3::config::Credentials;

        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("test", "test", None, None, "static"))
            .endpoint_url("http://s3.resilient-webapp.invalid")
            .force_path_style(true)
            .retry_config(RetryConfig::disabled())
            .build();

        Self::from_client(Client::from_conf(config))
    }
}
