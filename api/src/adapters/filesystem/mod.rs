//! Filesystem adapter
//!
//! Reads the feed file bundled with the deployment.

pub mod store;

pub use store::FsFeedStore;
