//! # Designated Verifier Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── harness.rs          # In-process fake chain node and oracles
//!     ├── report_flow.rs      # Successful reports, end to end over HTTP
//!     └── failure_modes.rs    # Rejections and collaborator failures
//! tests/benches/
//! └── pipeline_benchmarks.rs  # Proof verification and slash arithmetic
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p dv-tests
//! cargo bench -p dv-tests
//! ```
//!
//! Every test starts its own deployment on ephemeral ports, so tests run in
//! parallel without sharing state.

pub mod integration;
