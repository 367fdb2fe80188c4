//! Application layer
//!
//! The feed responder's fallback chain, expressed as a service over the
//! domain ports.

pub mod feed_service;

pub use feed_service::FeedService;
