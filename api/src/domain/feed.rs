//! Feed document and upstream origin
//!
//! The feed itself is opaque: it is served byte-for-byte and never parsed.

use axum::body::Bytes;
use axum::http::{header, HeaderMap};

/// Default name of the feed file, both on disk and on the upstream host
pub const FEED_FILE_NAME: &str = "folkborsen_feed.xml";

/// Host used when the inbound request carries no `Host` header
pub const DEFAULT_HOST: &str = "www.folkborsen.se";

/// Content type of every feed response
pub const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";

/// Served when neither the local file nor the upstream copy is reachable
pub const FALLBACK_FEED: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rss version=\"2.0\"><channel><title>Folkbörsen Feed (fallback)</title><link>https://folkborsen.se</link><description>Fallback feed</description></channel></rss>";

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Where a served feed document came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOrigin {
    Local,
    Remote,
    Fallback,
}

impl FeedOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedOrigin::Local => "local",
            FeedOrigin::Remote => "remote",
            FeedOrigin::Fallback => "fallback",
        }
    }
}

/// A feed body ready to be written to the response
#[derive(Debug, Clone)]
pub struct FeedDocument {
    pub body: Bytes,
    pub origin: FeedOrigin,
}

impl FeedDocument {
    pub fn local(body: impl Into<Bytes>) -> Self {
        Self {
            body: body.into(),
            origin: FeedOrigin::Local,
        }
    }

    pub fn remote(body: impl Into<Bytes>) -> Self {
        Self {
            body: body.into(),
            origin: FeedOrigin::Remote,
        }
    }

    pub fn fallback() -> Self {
        Self {
            body: Bytes::from_static(FALLBACK_FEED.as_bytes()),
            origin: FeedOrigin::Fallback,
        }
    }
}

/// Scheme and host the inbound request was addressed to.
///
/// Used to locate the statically deployed copy of the feed when the
/// local file is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamOrigin {
    pub scheme: String,
    pub host: String,
}

impl UpstreamOrigin {
    /// Derive the origin from `x-forwarded-proto` (first comma-separated
    /// value, `https` when absent or blank) and `Host` (`default_host`
    /// when absent or blank).
    pub fn from_headers(headers: &HeaderMap, default_host: &str) -> Self {
        let scheme = header_str(headers, FORWARDED_PROTO)
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or("https")
            .to_string();

        let host = header_str(headers, header::HOST.as_str())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(default_host)
            .to_string();

        Self { scheme, host }
    }

    /// URL of `file` on this origin
    pub fn feed_url(&self, file: &str) -> String {
        format!(
            "{}://{}/{}",
            self.scheme,
            self.host,
            file.trim_start_matches('/')
        )
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
