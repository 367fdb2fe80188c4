//! Test utilities
//!
//! Manual mock implementations of the feed ports and shared fixtures.
//! The mocks return canned data and record what they were asked for.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
