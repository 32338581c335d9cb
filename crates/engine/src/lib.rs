//! Cycle-accurate floating-point arithmetic engine library.
//!
//! This crate simulates a fixed-format arithmetic engine built from
//! independently operating cycle-staged processing units, with the following:
//! 1. **Format:** The 32-bit excess-128 floating-point word (sign, 8-bit
//!    biased exponent, 23-bit mantissa with implicit leading one) and the
//!    conversions to and from signed fixed-point integers.
//! 2. **Units:** Add/subtract and multiply (fixed four-tick pipelines) and
//!    divide (non-restoring, one quotient bit per tick), each driven through
//!    a request/acknowledge handshake with a two-phase release.
//! 3. **Simulation:** A scheduler that replaces the physical clock with an
//!    explicit tick, advancing every unit one phase per call.
//! 4. **Configuration and statistics:** JSON-backed configuration and
//!    per-unit activity counters with a serializable report.
//!
//! Arithmetic follows the engine's clamping policy throughout: exponent
//! overflow saturates to the max-magnitude value, underflow flushes to
//! zero, and all mantissa rounding is truncation toward zero.

/// Common types and constants (format widths, masks, latencies, errors).
pub mod common;
/// Engine configuration (defaults, policies, JSON parsing).
pub mod config;
/// Float format codec and fixed-point conversions.
pub mod format;
/// Scheduler and logical clock.
pub mod sim;
/// Statistics collection and reporting.
pub mod stats;
/// Processing units and the handshake contract.
pub mod units;

/// Root configuration type; use `Config::default()` or [`Config::from_json`].
pub use crate::config::Config;
/// The canonical 32-bit floating-point value type.
pub use crate::format::FloatValue;
/// Scheduler advancing independent units one tick at a time.
pub use crate::sim::Scheduler;
/// The per-unit operation contract implemented by every unit.
pub use crate::units::FpUnit;
