//! This module defines the interface for fetching remote pages.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Errors from fetching a target page.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request did not complete within the allotted timeout.
    #[error("request timed out")]
    Timeout,

    /// The request failed before a usable response was received.
    #[error("transport error: {0}")]
    Transport(String),
}

/// A fetched page: HTTP status and body text.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP status code of the response.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl FetchedPage {
    /// True for 2xx responses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A trait for fetching remote pages.
///
/// Targets are untrusted and potentially slow or hostile: every fetch carries
/// an explicit timeout and only the response status and body text are
/// consumed.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url`, giving up after `timeout`.
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchedPage, FetchError>;
}
