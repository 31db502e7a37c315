//! Cross-crate flows: the node-runtime container wired to real HTTP clients
//! talking to in-process fakes.

#[cfg(test)]
pub mod harness;

mod failure_modes;
mod report_flow;
