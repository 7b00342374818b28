//! Oscillator signals.
//!
//! The relative strength oscillator blends a per-horizon RSI-style value into
//! a weighted average in roughly `[0, 100]`.

mod relative_strength;

pub use relative_strength::{RelativeStrength, RelativeStrengthConfig};
