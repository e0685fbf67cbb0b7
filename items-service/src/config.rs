//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following precedence (highest to lowest):
//! 1. Deployment variables `DYNAMODB_TABLE_NAME` and `AWS_REGION`
//! 2. Environment variables (prefix: `ITEMS_`, nesting separator `__`,
//!    e.g. `ITEMS_SERVICE__PORT=9000`)
//! 3. Current working directory: ./config.toml
//! 4. System directory: /etc/items-service/config.toml
//! 5. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Prefix for service environment variables
pub const ENV_PREFIX: &str = "ITEMS_";

/// Deployment variable naming the items table
pub const TABLE_NAME_VAR: &str = "DYNAMODB_TABLE_NAME";

/// Deployment variable naming the AWS region
pub const REGION_VAR: &str = "AWS_REGION";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service configuration
    pub service: ServiceConfig,

    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Middleware configuration
    #[serde(default)]
    pub middleware: MiddlewareConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    pub name: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level or `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Environment (dev, staging, production)
    #[serde(default = "default_environment")]
    pub environment: String,
}

/// Key-value store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Items table (required)
    #[serde(default)]
    pub table_name: String,

    /// AWS region (required)
    #[serde(default)]
    pub region: String,

    /// Endpoint override, e.g. DynamoDB Local
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Per-request storage deadline in milliseconds
    #[serde(default = "default_operation_timeout_ms")]
    pub operation_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            table_name: String::new(),
            region: String::new(),
            endpoint_url: None,
            operation_timeout_ms: default_operation_timeout_ms(),
        }
    }
}

impl StorageConfig {
    /// Per-request storage deadline
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }
}

/// Middleware configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// Request body size limit in megabytes
    #[serde(default = "default_body_limit_mb")]
    pub body_limit_mb: usize,

    /// CORS mode: permissive, restrictive or disabled
    #[serde(default = "default_cors_mode")]
    pub cors_mode: String,

    /// Convert handler panics into 500 responses
    #[serde(default = "default_true")]
    pub catch_panic: bool,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            body_limit_mb: default_body_limit_mb(),
            cors_mode: default_cors_mode(),
            catch_panic: true,
        }
    }
}

fn default_service_name() -> String {
    "items-service".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_environment() -> String {
    "dev".to_string()
}

fn default_operation_timeout_ms() -> u64 {
    5000
}

fn default_body_limit_mb() -> usize {
    1
}

fn default_cors_mode() -> String {
    "permissive".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from all sources
    ///
    /// Reads `/etc/items-service/config.toml` and then `./config.toml`, the
    /// latter taking priority. Environment variables override both.
    pub fn load() -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Lowest priority first
        for path in Self::config_paths().iter().rev() {
            if path.exists() {
                tracing::info!("Loading configuration from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
        }

        Self::extract(figment)
    }

    /// Load configuration from a specific file
    ///
    /// Environment variables still apply. A missing file is not an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path.as_ref()));

        Self::extract(figment)
    }

    /// Check that required values are present
    pub fn validate(&self) -> Result<()> {
        if self.service.name.trim().is_empty() {
            return Err(Error::MissingConfig("service.name"));
        }
        if self.storage.table_name.trim().is_empty() {
            return Err(Error::MissingConfig("storage.table_name (DYNAMODB_TABLE_NAME)"));
        }
        if self.storage.region.trim().is_empty() {
            return Err(Error::MissingConfig("storage.region (AWS_REGION)"));
        }
        Ok(())
    }

    /// Config file locations, highest priority first
    fn config_paths() -> Vec<PathBuf> {
        vec![
            PathBuf::from("config.toml"),
            PathBuf::from("/etc/items-service/config.toml"),
        ]
    }

    fn extract(figment: Figment) -> Result<Self> {
        let config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(deployment_env())
            .extract()?;
        Ok(config)
    }
}

/// `DYNAMODB_TABLE_NAME` and `AWS_REGION` mapped onto the storage section
fn deployment_env() -> Env {
    Env::raw().only(&[TABLE_NAME_VAR, REGION_VAR]).map(|key| {
        if key.as_str().eq_ignore_ascii_case(TABLE_NAME_VAR) {
            "storage.table_name".into()
        } else {
            "storage.region".into()
        }
    })
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                name: default_service_name(),
                port: default_port(),
                log_level: default_log_level(),
                timeout_secs: default_timeout(),
                environment: default_environment(),
            },
            storage: StorageConfig::default(),
            middleware: MiddlewareConfig::default(),
        }
    }
}
