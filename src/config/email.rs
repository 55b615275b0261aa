//! Configuration for outbound email delivery.

use serde::Deserialize;

/// Configuration for the HTTP email API used by the notification sink.
#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    /// Endpoint of the email API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bearer token for the email API.
    /// If not set in config, falls back to the `PAGEWATCH_EMAIL_API_KEY` env
    /// var.
    #[serde(default = "default_api_key_from_env")]
    pub api_key: Option<String>,

    /// Sender address carried in every message.
    #[serde(default = "default_from_address")]
    pub from_address: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: default_api_key_from_env(),
            from_address: default_from_address(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.resend.com/emails".to_string()
}

fn default_api_key_from_env() -> Option<String> {
    std::env::var("PAGEWATCH_EMAIL_API_KEY").ok()
}

fn default_from_address() -> String {
    "alerts@pagewatch.dev".to_string()
}
