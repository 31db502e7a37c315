//! Domain layer: pure proof decoding and verification, no I/O.

pub mod encoding;
pub mod entities;
pub mod errors;
pub mod verify;
