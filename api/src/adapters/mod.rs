//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod filesystem;
pub mod upstream;

pub use filesystem::FsFeedStore;
pub use upstream::HttpFeedFetcher;
