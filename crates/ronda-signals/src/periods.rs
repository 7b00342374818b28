//! Horizon weighting shared by the momentum and oscillator signals.

use serde::{Deserialize, Serialize};

/// Weight attached to one look-back horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodWeight {
    /// Horizon length in bars.
    pub period: usize,
    /// Relative weight of the horizon.
    pub weight: f64,
}

impl PeriodWeight {
    /// Creates a period weight.
    #[must_use]
    pub const fn new(period: usize, weight: f64) -> Self {
        Self { period, weight }
    }
}

/// Default horizons and weights. The weights sum to 100 and are processed in
/// this order, shortest horizon first.
pub const PERIOD_WEIGHTS: [PeriodWeight; 6] = [
    PeriodWeight::new(15, 20.0),
    PeriodWeight::new(20, 12.0),
    PeriodWeight::new(30, 10.0),
    PeriodWeight::new(50, 12.0),
    PeriodWeight::new(100, 17.0),
    PeriodWeight::new(200, 29.0),
];

/// Sum of the weights in a table.
#[must_use]
pub fn total_weight(weights: &[PeriodWeight]) -> f64 {
    weights.iter().map(|w| w.weight).sum()
}

/// Longest horizon in a table, or zero for an empty table.
#[must_use]
pub fn longest_period(weights: &[PeriodWeight]) -> usize {
    weights.iter().map(|w| w.period).max().unwrap_or(0)
}
