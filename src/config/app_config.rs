//! Top-level application configuration.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use super::{BaseHttpClientConfig, EmailConfig, ServerConfig, SweepConfig};

/// Provides the default value for free_monitor_limit.
fn default_free_monitor_limit() -> u32 {
    2
}

/// Application configuration for PageWatch.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Database URL for the SQLite-backed key-value store.
    pub database_url: String,

    /// Maximum number of active, unpaid monitors per account.
    #[serde(default = "default_free_monitor_limit")]
    pub free_monitor_limit: u32,

    /// Configuration for the base HTTP client.
    #[serde(default)]
    pub http_base: BaseHttpClientConfig,

    /// Outbound email configuration.
    #[serde(default)]
    pub email: EmailConfig,

    /// Sweep configuration.
    #[serde(default)]
    pub sweep: SweepConfig,

    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Creates a new `AppConfig` by reading from the configuration directory,
    /// with `PAGEWATCH__`-prefixed environment variables taking precedence.
    pub fn new(config_dir: Option<&str>) -> Result<Self, ConfigError> {
        let config_dir_str = config_dir.unwrap_or("configs");
        let s = Config::builder()
            .add_source(File::with_name(&format!("{}/app.yaml", config_dir_str)))
            .add_source(Environment::with_prefix("PAGEWATCH").separator("__"))
            .build()?;
        s.try_deserialize()
    }
}
