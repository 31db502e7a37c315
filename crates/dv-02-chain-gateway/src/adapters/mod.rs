//! Adapters layer: concrete transports.

pub mod http;
