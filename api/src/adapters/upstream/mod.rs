//! Upstream adapter
//!
//! HTTP client for the statically deployed copy of the feed.

pub mod client;

pub use client::HttpFeedFetcher;
