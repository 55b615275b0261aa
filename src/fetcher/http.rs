//! reqwest-backed page fetcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;

use super::traits::{FetchError, FetchedPage, PageFetcher};

const USER_AGENT: &str = "Mozilla/5.0 (compatible; PageWatchBot/1.0)";

/// Fetches pages over HTTP with a per-request timeout.
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    /// Creates a fetcher over the shared base HTTP client.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn map_reqwest_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(e.to_string())
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::ACCEPT, "text/html")
            .timeout(timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;

        Ok(FetchedPage { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> HttpPageFetcher {
        HttpPageFetcher::new(reqwest::Client::new())
    }

    #[tokio::test]
    async fn test_fetch_returns_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/jobs")
            .match_header("User-Agent", USER_AGENT)
            .with_status(200)
            .with_body("<html>opening</html>")
            .create_async()
            .await;

        let page =
            fetcher().fetch(&format!("{}/jobs", server.url()), Duration::from_secs(5)).await.unwrap();

        assert_eq!(page.status, 200);
        assert!(page.is_success());
        assert_eq!(page.body, "<html>opening</html>");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_passed_through() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("GET", "/gone").with_status(404).create_async().await;

        let page =
            fetcher().fetch(&format!("{}/gone", server.url()), Duration::from_secs(5)).await.unwrap();

        assert_eq!(page.status, 404);
        assert!(!page.is_success());
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // Nothing listens on this port.
        let result = fetcher().fetch("http://127.0.0.1:1/x", Duration::from_secs(5)).await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }
}
