//! Construction of the shared base HTTP client.

use crate::config::BaseHttpClientConfig;

/// Builds the base `reqwest::Client` used for page fetches and email
/// delivery. Per-request timeouts are applied by the callers.
pub fn create_base_http_client(
    config: &BaseHttpClientConfig,
) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .pool_max_idle_per_host(config.max_idle_per_host)
        .pool_idle_timeout(config.idle_timeout)
        .connect_timeout(config.connect_timeout)
        .build()
}
