//! Dashboard orchestration for the bikedash binary.
//!
//! Everything the binary does besides argument parsing lives here so
//! integration tests can drive a full run in-process.

pub mod dashboard;

pub use dashboard::{Dashboard, RunSummary};
