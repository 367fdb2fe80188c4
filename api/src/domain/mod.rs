//! Domain layer
//!
//! Feed document types and the ports the responder reads feeds through.

pub mod feed;
pub mod ports;
