//! Feed service
//!
//! Resolves the feed document through three sources, first success wins:
//! 1. the local feed file
//! 2. the deployed copy on the host the request was addressed to
//! 3. the built-in fallback document
//!
//! Resolution never fails. Every source error is logged and absorbed.

use std::sync::Arc;

use axum::body::Bytes;

use crate::domain::feed::{FeedDocument, UpstreamOrigin};
use crate::domain::ports::{FeedFetcher, FeedStore};
use crate::error::FeedError;

/// Service that produces the feed served by the responder
pub struct FeedService {
    store: Arc<dyn FeedStore>,
    fetcher: Arc<dyn FeedFetcher>,
    feed_file: String,
}

impl FeedService {
    pub fn new(
        store: Arc<dyn FeedStore>,
        fetcher: Arc<dyn FeedFetcher>,
        feed_file: impl Into<String>,
    ) -> Self {
        Self {
            store,
            fetcher,
            feed_file: feed_file.into(),
        }
    }

    /// Resolve the feed for a request addressed to `origin`
    pub async fn resolve(&self, origin: &UpstreamOrigin) -> FeedDocument {
        let doc = match self.store.read_feed().await {
            Ok(body) => FeedDocument::local(body),
            Err(e) => {
                tracing::debug!(error = %e, "Local feed unavailable, trying upstream");
                match self.fetch_upstream(origin).await {
                    Ok(body) => FeedDocument::remote(body),
                    Err(e) => {
                        tracing::warn!(
                            kind = e.kind(),
                            error = %e,
                            "Upstream feed unavailable, serving fallback"
                        );
                        FeedDocument::fallback()
                    }
                }
            }
        };

        tracing::debug!(origin = doc.origin.as_str(), bytes = doc.body.len(), "Feed resolved");
        doc
    }

    async fn fetch_upstream(&self, origin: &UpstreamOrigin) -> Result<Bytes, FeedError> {
        let url = origin.feed_url(&self.feed_file);
        tracing::debug!(%url, "Fetching upstream feed");
        self.fetcher.fetch(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feed::{FeedOrigin, FALLBACK_FEED, FEED_FILE_NAME};
    use crate::test_utils::{InMemoryFeedStore, MockFeedFetcher, SAMPLE_FEED};

    fn create_service(store: InMemoryFeedStore, fetcher: Arc<MockFeedFetcher>) -> FeedService {
        FeedService::new(Arc::new(store), fetcher, FEED_FILE_NAME)
    }

    fn origin(scheme: &str, host: &str) -> UpstreamOrigin {
        UpstreamOrigin {
            scheme: scheme.to_string(),
            host: host.to_string(),
        }
    }

    #[tokio::test]
    async fn local_feed_wins_without_fetching() {
        let fetcher = Arc::new(MockFeedFetcher::serving("<rss>remote</rss>"));
        let service = create_service(InMemoryFeedStore::with_feed(SAMPLE_FEED), fetcher.clone());

        let doc = service.resolve(&origin("https", "example.com")).await;

        assert_eq!(doc.origin, FeedOrigin::Local);
        assert_eq!(&doc.body[..], SAMPLE_FEED.as_bytes());
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn missing_local_feed_fetches_upstream() {
        let fetcher = Arc::new(MockFeedFetcher::serving("<rss>remote</rss>"));
        let service = create_service(InMemoryFeedStore::missing(), fetcher.clone());

        let doc = service.resolve(&origin("http", "example.com")).await;

        assert_eq!(doc.origin, FeedOrigin::Remote);
        assert_eq!(&doc.body[..], b"<rss>remote</rss>");
        assert_eq!(
            fetcher.requests(),
            vec!["http://example.com/folkborsen_feed.xml".to_string()]
        );
    }

    #[tokio::test]
    async fn failed_upstream_serves_fallback() {
        let fetcher = Arc::new(MockFeedFetcher::failing());
        let service = create_service(InMemoryFeedStore::missing(), fetcher.clone());

        let doc = service.resolve(&origin("https", "www.folkborsen.se")).await;

        assert_eq!(doc.origin, FeedOrigin::Fallback);
        assert_eq!(&doc.body[..], FALLBACK_FEED.as_bytes());
        assert_eq!(fetcher.requests().len(), 1);
    }

    #[tokio::test]
    async fn upstream_error_status_serves_fallback() {
        let fetcher = Arc::new(MockFeedFetcher::with_status(502));
        let service = create_service(InMemoryFeedStore::missing(), fetcher);

        let doc = service.resolve(&origin("https", "example.com")).await;

        assert_eq!(doc.origin, FeedOrigin::Fallback);
    }

    #[tokio::test]
    async fn custom_feed_file_is_requested_upstream() {
        let fetcher = Arc::new(MockFeedFetcher::serving("<rss/>"));
        let service = FeedService::new(
            Arc::new(InMemoryFeedStore::missing()),
            fetcher.clone(),
            "feeds/latest.xml",
        );

        service.resolve(&origin("https", "cdn.example.com")).await;

        assert_eq!(
            fetcher.requests(),
            vec!["https://cdn.example.com/feeds/latest.xml".to_string()]
        );
    }
}
