//! # Ports Layer
//!
//! - `inbound`: the pipeline API driven by the HTTP surface
//! - `outbound`: the collaborators the pipeline drives

pub mod inbound;
pub mod outbound;
