//! Signal implementations for the Ronda ranking engine.
//!
//! Three signals feed the composite score:
//! - Momentum: weighted return relative to a benchmark over six horizons
//! - Oscillator: smoothed relative strength over the same horizons
//! - Value: trailing P/E drift against volume drift over three weeks
//!
//! All of them share the [`periods::PERIOD_WEIGHTS`] table.
//!
//! # Example
//!
//! ```ignore
//! use ronda_signals::momentum::RelativeMomentum;
//! use ronda_signals::registry::available_signals;
//!
//! let signal = RelativeMomentum::default();
//! let score = signal.compute("AAPL", &store, "SPY");
//!
//! let signals = available_signals();
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod momentum;
pub mod oscillator;
pub mod periods;
pub mod registry;
pub mod value;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key types
pub use periods::{PERIOD_WEIGHTS, PeriodWeight};
pub use registry::{SignalCategory, SignalInfo};
