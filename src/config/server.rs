//! Configuration for the HTTP server.

use serde::Deserialize;

/// Configuration for the REST API server.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ServerConfig {
    /// Address and port for the HTTP server to listen on.
    #[serde(default = "default_listen_address")]
    pub listen_address: String,

    /// Optional API key securing the payment webhook.
    /// If not set in config, falls back to the `PAGEWATCH_API_KEY` env var.
    #[serde(default = "default_api_key_from_env")]
    pub api_key: Option<String>,

    /// Shared secret the external scheduler must present to trigger a sweep.
    /// If not set in config, falls back to the `PAGEWATCH_CRON_SECRET` env
    /// var.
    #[serde(default = "default_cron_secret_from_env")]
    pub cron_secret: Option<String>,
}

/// Provides the default value for listen_address.
fn default_listen_address() -> String {
    "0.0.0.0:8080".to_string()
}

/// Loads the API key from the `PAGEWATCH_API_KEY` environment variable.
fn default_api_key_from_env() -> Option<String> {
    std::env::var("PAGEWATCH_API_KEY").ok()
}

/// Loads the cron secret from the `PAGEWATCH_CRON_SECRET` environment
/// variable.
fn default_cron_secret_from_env() -> Option<String> {
    std::env::var("PAGEWATCH_CRON_SECRET").ok()
}

#[cfg(test)]
mod tests {
    use config::Config;

    use super::*;

    #[test]
    fn test_default_server_config() {
        let yaml = r#""#; // Empty YAML should use defaults
        let config = Config::builder()
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize::<ServerConfig>()
            .unwrap();
        assert_eq!(config.listen_address, default_listen_address());
    }

    #[test]
    fn test_custom_server_config() {
        let yaml = r#"
          listen_address: "0.0.0.0:3333"
          cron_secret: "sweep-secret"
        "#;
        let config = Config::builder()
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize::<ServerConfig>()
            .unwrap();
        assert_eq!(config.listen_address, "0.0.0.0:3333");
        assert_eq!(config.cron_secret.as_deref(), Some("sweep-secret"));
    }
}
