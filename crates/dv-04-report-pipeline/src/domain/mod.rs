//! # Domain Layer
//!
//! Pure pipeline logic. Nothing here performs I/O.

pub mod entities;
pub mod envelope;
pub mod errors;
pub mod reconcile;
pub mod report;
pub mod signer;
pub mod slash;
