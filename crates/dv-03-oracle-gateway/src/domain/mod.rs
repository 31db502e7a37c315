//! Domain layer: endpoint configuration, request bodies, errors.

pub mod entities;
pub mod errors;
