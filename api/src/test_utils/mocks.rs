//! Mock implementations of port traits

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use axum::body::Bytes;

use crate::domain::ports::{FeedFetcher, FeedStore};
use crate::error::FeedError;

use super::fixtures::closed_port;

// ============================================================================
// In-Memory Feed Store
// ============================================================================

/// Feed store holding an optional in-memory feed
#[derive(Default)]
pub struct InMemoryFeedStore {
    feed: Option<Bytes>,
}

impl InMemoryFeedStore {
    pub fn with_feed(feed: &str) -> Self {
        Self {
            feed: Some(Bytes::copy_from_slice(feed.as_bytes())),
        }
    }

    /// A store whose feed file does not exist
    pub fn missing() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedStore for InMemoryFeedStore {
    async fn read_feed(&self) -> Result<Bytes, FeedError> {
        self.feed.clone().ok_or_else(|| FeedError::LocalRead {
            path: PathBuf::from("folkborsen_feed.xml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        })
    }
}

// ============================================================================
// Mock Feed Fetcher
// ============================================================================

enum FetchOutcome {
    Body(Bytes),
    Status(u16),
    Unreachable,
}

/// Fetcher with a fixed outcome that records every requested URL
pub struct MockFeedFetcher {
    outcome: FetchOutcome,
    requests: Arc<RwLock<Vec<String>>>,
}

impl MockFeedFetcher {
    fn new(outcome: FetchOutcome) -> Self {
        Self {
            outcome,
            requests: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn serving(body: &str) -> Self {
        Self::new(FetchOutcome::Body(Bytes::copy_from_slice(body.as_bytes())))
    }

    pub fn with_status(status: u16) -> Self {
        Self::new(FetchOutcome::Status(status))
    }

    /// A fetcher that behaves like an unreachable network
    pub fn failing() -> Self {
        Self::new(FetchOutcome::Unreachable)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.read().unwrap().clone()
    }
}

#[async_trait]
impl FeedFetcher for MockFeedFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, FeedError> {
        self.requests.write().unwrap().push(url.to_string());

        match &self.outcome {
            FetchOutcome::Body(body) => Ok(body.clone()),
            FetchOutcome::Status(status) => Err(FeedError::UpstreamStatus(*status)),
            FetchOutcome::Unreachable => Err(connection_refused().await),
        }
    }
}

/// A real transport error: a connect to a local port nobody listens on
async fn connection_refused() -> FeedError {
    let port = closed_port().await;
    match reqwest::get(format!("http://127.0.0.1:{port}/folkborsen_feed.xml")).await {
        Ok(response) => FeedError::UpstreamStatus(response.status().as_u16()),
        Err(e) => FeedError::Request(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failing_fetcher_reports_connection_error() {
        let fetcher = MockFeedFetcher::failing();

        let err = fetcher
            .fetch("https://www.folkborsen.se/folkborsen_feed.xml")
            .await
            .unwrap_err();

        match err {
            FeedError::Request(e) => assert!(e.is_connect()),
            other => panic!("expected a transport error, got {other:?}"),
        }
        assert_eq!(
            fetcher.requests(),
            vec!["https://www.folkborsen.se/folkborsen_feed.xml".to_string()]
        );
    }
}
