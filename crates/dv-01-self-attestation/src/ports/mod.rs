//! Ports layer: the public API of this subsystem.
//!
//! Verification is pure, so there are no outbound ports.

pub mod inbound;
