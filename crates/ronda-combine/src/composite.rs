//! Composite score types.

use serde::{Deserialize, Serialize};

/// Weights applied to each signal when forming the composite total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeWeights {
    /// Weight on the relative momentum score (default: 0.2)
    pub momentum: f64,
    /// Weight on the oscillator score (default: 0.3)
    pub oscillator: f64,
    /// Weight on the valuation contribution when present (default: 1.0)
    pub valuation: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            momentum: 0.2,
            oscillator: 0.3,
            valuation: 1.0,
        }
    }
}

/// One symbol's signal values and their weighted total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    /// Relative momentum score.
    pub momentum: f64,
    /// Oscillator score.
    pub oscillator: f64,
    /// Valuation contribution, `None` when the signal had nothing to add.
    pub valuation: Option<f64>,
    /// Weighted total used for ranking.
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = CompositeWeights::default();
        assert_eq!(weights.momentum, 0.2);
        assert_eq!(weights.oscillator, 0.3);
        assert_eq!(weights.valuation, 1.0);
    }
}
