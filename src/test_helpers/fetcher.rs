//! A page fetcher serving canned responses, for tests.

use std::{collections::HashMap, sync::Mutex, time::Duration};

use async_trait::async_trait;

use crate::fetcher::{FetchError, FetchedPage, PageFetcher};

enum CannedResponse {
    Page { status: u16, body: String },
    Failure,
}

/// A `PageFetcher` that serves canned per-URL responses.
///
/// URLs with no canned response fail with a transport error.
#[derive(Default)]
pub struct StaticPageFetcher {
    responses: Mutex<HashMap<String, CannedResponse>>,
}

impl StaticPageFetcher {
    /// Creates a fetcher with no canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` with status 200 for `url`.
    pub fn set_page(&self, url: &str, body: &str) {
        self.responses.lock().unwrap().insert(
            url.to_string(),
            CannedResponse::Page { status: 200, body: body.to_string() },
        );
    }

    /// Serves an empty body with the given status for `url`.
    pub fn set_status(&self, url: &str, status: u16) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), CannedResponse::Page { status, body: String::new() });
    }

    /// Makes fetches of `url` fail with a transport error.
    pub fn set_failure(&self, url: &str) {
        self.responses.lock().unwrap().insert(url.to_string(), CannedResponse::Failure);
    }
}

#[async_trait]
impl PageFetcher for StaticPageFetcher {
    async fn fetch(&self, url: &str, _timeout: Duration) -> Result<FetchedPage, FetchError> {
        match self.responses.lock().unwrap().get(url) {
            Some(CannedResponse::Page { status, body }) =>
                Ok(FetchedPage { status: *status, body: body.clone() }),
            Some(CannedResponse::Failure) =>
                Err(FetchError::Transport("connection refused".to_string())),
            None => Err(FetchError::Transport(format!("no canned response for {url}"))),
        }
    }
}
