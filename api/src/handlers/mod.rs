//! HTTP handlers
//!
//! Axum request handlers for the feed endpoint and the dev server.

pub mod feed;

pub use feed::{generate_feed, not_found};
