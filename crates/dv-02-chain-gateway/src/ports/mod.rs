//! Ports layer: inbound API and outbound transport SPI.

pub mod inbound;
pub mod outbound;
