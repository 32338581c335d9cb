//! Configuration system for the arithmetic engine.
//!
//! This module defines the configuration structures and enums used to
//! parameterize the engine. It provides:
//! 1. **Defaults:** Baseline behavior when no configuration is supplied.
//! 2. **Structures:** Hierarchical config for simulation and the division
//!    unit.
//! 3. **Policies:** The divide-by-zero resolution policy.
//!
//! Configuration is supplied as JSON (see [`Config::from_json`]) or via
//! `Config::default()` for embedders without a config file. Every field is
//! optional in the document; missing sections fall back to defaults.

use serde::Deserialize;

use crate::common::error::EngineError;

/// How the division unit resolves a zero divisor.
///
/// The format has no infinity and the engine has no error channel, so the
/// choice mirrors the clamping policy used for exponent overflow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum DivideByZeroPolicy {
    /// Produce the max-magnitude value with the computed sign and raise the
    /// advisory overflow output (default).
    #[default]
    Saturate,
    /// Produce zero with the computed sign.
    Zero,
}

/// Simulation-level settings.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Emit a per-tick trace event from the scheduler.
    pub trace: bool,
}

/// Division unit settings.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DividerConfig {
    /// Resolution policy for a zero divisor.
    pub divide_by_zero: DivideByZeroPolicy,
}

/// Root configuration type.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Simulation-level settings.
    pub sim: SimConfig,
    /// Division unit settings.
    pub divider: DividerConfig,
}

impl Config {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if the document is not valid JSON or
    /// contains unknown enum values.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(EngineError::Config)
    }
}
