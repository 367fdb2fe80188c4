//! Error types for the feed API
//!
//! `FeedError` covers every way a feed source can fail:
//! - `LocalRead`: the bundled feed file is missing or unreadable
//! - `InvalidUrl`: the upstream URL built from request headers does not parse
//! - `Request`: transport failure talking to the upstream (DNS, refused, timeout)
//! - `UpstreamStatus`: the upstream answered with a non-success status
//!
//! None of these reach the client. The responder turns all of them into
//! the fallback feed.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Local feed unavailable at {path:?}: {source}")]
    LocalRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid upstream URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Upstream returned status {0}")]
    UpstreamStatus(u16),
}

impl FeedError {
    /// Short label for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            FeedError::LocalRead { .. } => "local_read",
            FeedError::InvalidUrl { .. } => "invalid_url",
            FeedError::Request(e) if e.is_timeout() => "timeout",
            FeedError::Request(_) => "request",
            FeedError::UpstreamStatus(_) => "upstream_status",
        }
    }
}
