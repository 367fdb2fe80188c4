//! Feed source port traits

use async_trait::async_trait;
use axum::body::Bytes;

use crate::error::FeedError;

/// The feed file bundled next to the running process
#[async_trait]
pub trait FeedStore: Send + Sync {
    /// Read the whole feed file, verbatim
    async fn read_feed(&self) -> Result<Bytes, FeedError>;
}

/// Network access to a deployed copy of the feed
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// GET `url` and return the response body, verbatim
    async fn fetch(&self, url: &str) -> Result<Bytes, FeedError>;
}
