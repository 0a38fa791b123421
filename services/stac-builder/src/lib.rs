//! STAC collection builder service internals.
//!
//! Exposed as a library so integration tests can drive the pipeline
//! without going through the binary.

pub mod config;
pub mod manifest;
pub mod pipeline;
