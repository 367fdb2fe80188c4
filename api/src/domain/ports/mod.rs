//! Domain ports (traits)
//!
//! Port traits define the feed sources the responder depends on.
//! Adapters provide concrete implementations of these traits.

pub mod feed_source;

pub use feed_source::{FeedFetcher, FeedStore};
