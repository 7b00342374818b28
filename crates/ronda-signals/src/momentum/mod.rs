//! Momentum signals based on returns relative to a benchmark.
//!
//! The relative momentum signal sums, over each horizon in the period table,
//! the period weight times one plus the symbol's excess return over the
//! benchmark. A symbol tracking the benchmark exactly scores 100.

mod relative;

pub use relative::{RelativeMomentum, RelativeMomentumConfig};
