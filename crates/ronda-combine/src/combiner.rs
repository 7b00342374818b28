//! Core trait definition for composite combiners.

use ronda_traits::Contribution;

use crate::composite::CompositeScore;

/// Raw signal outputs for one symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalComponents {
    /// Relative momentum score.
    pub momentum: f64,
    /// Oscillator score.
    pub oscillator: f64,
    /// Valuation contribution, possibly absent.
    pub valuation: Contribution,
}

/// Combines one symbol's signal outputs into a composite score.
///
/// Implementations must be pure: the same components always produce the
/// same total, which keeps rankings reproducible.
///
/// # Examples
///
/// ```rust,no_run
/// use ronda_combine::{Combiner, CompositeScore, SignalComponents};
///
/// struct MomentumOnly;
///
/// impl Combiner for MomentumOnly {
///     fn combine(&self, components: &SignalComponents) -> CompositeScore {
///         CompositeScore {
///             momentum: components.momentum,
///             oscillator: components.oscillator,
///             valuation: components.valuation.value(),
///             total: components.momentum,
///         }
///     }
///
///     fn name(&self) -> &str {
///         "momentum_only"
///     }
/// }
/// ```
pub trait Combiner: Send + Sync {
    /// Combine the components into a composite score.
    fn combine(&self, components: &SignalComponents) -> CompositeScore;

    /// Name of this combination strategy.
    fn name(&self) -> &str;
}
