//! Engine error definitions.
//!
//! The arithmetic itself carries no error channel: overflow and underflow
//! resolve silently by clamping, observable only through the advisory
//! overflow output and the statistics counters. The errors here cover the
//! surrounding machinery (configuration parsing).

use thiserror::Error;

/// Errors reported by the engine's fallible APIs.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A configuration document failed to parse.
    #[error("invalid configuration: {0}")]
    Config(#[source] serde_json::Error),
    /// A statistics report failed to serialize.
    #[error("report serialization failed: {0}")]
    Report(#[source] serde_json::Error),
}
