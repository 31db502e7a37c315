//! # Node Runtime Library
//!
//! This library exposes the internal modules of the node runtime for testing.
//! The main entry point is the `main.rs` binary.
//!
//! ## Modules
//!
//! - `container/` - Configuration and subsystem wiring
//! - `adapters/` - Port implementations connecting the pipeline to dv-01..dv-03

pub mod adapters;
pub mod container;

pub use container::{ConfigError, ContainerError, MiddlewareConfig, MiddlewareContainer};
