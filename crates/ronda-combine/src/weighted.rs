//! Fixed-weight composite combination.

use serde::{Deserialize, Serialize};

use crate::{
    combiner::{Combiner, SignalComponents},
    composite::{CompositeScore, CompositeWeights},
};

/// Adds up the weighted momentum and oscillator scores, plus the weighted
/// valuation contribution when there is one.
///
/// An absent valuation is left out entirely rather than counted as zero, so
/// the symbol is ranked on momentum and oscillator alone.
///
/// # Examples
///
/// ```rust,no_run
/// use ronda_combine::{Combiner, CompositeWeights, SignalComponents, WeightedCombiner};
/// use ronda_traits::{Absence, Contribution};
///
/// let combiner = WeightedCombiner::new(CompositeWeights::default());
/// let score = combiner.combine(&SignalComponents {
///     momentum: 100.0,
///     oscillator: 50.0,
///     valuation: Contribution::Absent(Absence::NoData),
/// });
/// assert_eq!(score.valuation, None);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeightedCombiner {
    weights: CompositeWeights,
}

impl WeightedCombiner {
    /// Create a combiner with the given weights.
    pub const fn new(weights: CompositeWeights) -> Self {
        Self { weights }
    }

    /// Weights in use.
    pub const fn weights(&self) -> &CompositeWeights {
        &self.weights
    }
}

impl Combiner for WeightedCombiner {
    fn combine(&self, components: &SignalComponents) -> CompositeScore {
        let valuation = components.valuation.value();

        let mut total = 0.0;
        total += components.momentum * self.weights.momentum;
        total += components.oscillator * self.weights.oscillator;
        if let Some(value) = valuation {
            total += value * self.weights.valuation;
        }

        CompositeScore {
            momentum: components.momentum,
            oscillator: components.oscillator,
            valuation,
            total,
        }
    }

    fn name(&self) -> &str {
        "weighted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ronda_traits::{Absence, Contribution};

    #[test]
    fn test_weighted_total() {
        let combiner = WeightedCombiner::default();
        let score = combiner.combine(&SignalComponents {
            momentum: 110.0,
            oscillator: 60.0,
            valuation: Contribution::Value(9.0),
        });

        assert_relative_eq!(score.total, 0.2 * 110.0 + 0.3 * 60.0 + 9.0, epsilon = 1e-12);
        assert_eq!(score.valuation, Some(9.0));
        assert_eq!(score.momentum, 110.0);
    }

    #[test]
    fn test_absent_valuation_is_omitted() {
        let combiner = WeightedCombiner::default();
        let score = combiner.combine(&SignalComponents {
            momentum: 100.0,
            oscillator: 50.0,
            valuation: Contribution::Absent(Absence::LogDomain),
        });

        assert_eq!(score.valuation, None);
        assert_relative_eq!(score.total, 35.0, epsilon = 1e-12);
    }

    #[test]
    fn test_custom_weights() {
        let combiner = WeightedCombiner::new(CompositeWeights {
            momentum: 1.0,
            oscillator: 0.0,
            valuation: 0.5,
        });
        let score = combiner.combine(&SignalComponents {
            momentum: 80.0,
            oscillator: 99.0,
            valuation: Contribution::Value(10.0),
        });

        assert_eq!(score.total, 85.0);
        assert_eq!(combiner.name(), "weighted");
    }
}
