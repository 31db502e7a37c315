//! # Subsystem Container
//!
//! Builds every subsystem from `MiddlewareConfig` and wires the adapters
//! into the report pipeline.

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, MiddlewareConfig};
pub use subsystems::{ContainerError, MiddlewareContainer};
