//! Email delivery through an HTTP email API.

use async_trait::async_trait;
use serde_json::json;

use super::{error::NotificationError, NotificationSink};
use crate::config::EmailConfig;

/// Sends email by POSTing `{from, to, subject, text}` to a Resend-style HTTP
/// API, authenticated with a bearer token.
pub struct EmailNotifier {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from_address: String,
}

impl EmailNotifier {
    /// Creates a notifier from configuration. Fails if no API key is
    /// configured.
    pub fn new(client: reqwest::Client, config: &EmailConfig) -> Result<Self, NotificationError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            NotificationError::ConfigError("email API key is not configured".to_string())
        })?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key,
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl NotificationSink for EmailNotifier {
    #[tracing::instrument(skip(self, subject, body), level = "debug")]
    async fn send(
        &self,
        to_address: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), NotificationError> {
        let payload = json!({
            "from": self.from_address,
            "to": to_address,
            "subject": subject,
            "text": body,
        });

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(NotificationError::SendFailed(format!(
                "email API returned {status}: {detail}"
            )));
        }

        tracing::debug!(to = to_address, "Email accepted by API.");
        Ok(())
    }
}
