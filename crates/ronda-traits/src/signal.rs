//! Signal trait for scoring a single symbol.
//!
//! A signal reads a symbol's windows (and optionally the benchmark's and the
//! fundamentals provider) and produces a [`Contribution`]. Signals never
//! return errors: missing data and undefined arithmetic degrade to a value or
//! to an explicit [`Absence`] so that one bad symbol cannot abort a run.

use serde::{Deserialize, Serialize};

use crate::{FundamentalsProvider, PriceSeriesStore};

/// Everything a signal may read while scoring.
#[derive(Clone, Copy)]
pub struct ScoringContext<'a> {
    /// Price history for the whole universe.
    pub store: &'a PriceSeriesStore,
    /// Symbol that relative signals compare against.
    pub benchmark: &'a str,
    /// Trailing EPS lookup.
    pub fundamentals: &'a dyn FundamentalsProvider,
}

impl<'a> ScoringContext<'a> {
    /// Creates a context.
    pub const fn new(
        store: &'a PriceSeriesStore,
        benchmark: &'a str,
        fundamentals: &'a dyn FundamentalsProvider,
    ) -> Self {
        Self {
            store,
            benchmark,
            fundamentals,
        }
    }
}

impl std::fmt::Debug for ScoringContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringContext")
            .field("symbols", &self.store.len())
            .field("benchmark", &self.benchmark)
            .finish_non_exhaustive()
    }
}

/// Why a signal produced no value for a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Absence {
    /// The required window was empty or the symbol is unknown.
    NoData,
    /// A ratio's denominator was zero (opening volume, opening P/E, or a
    /// flat volume drift).
    ZeroDenominator,
    /// The comparison fell outside the log curve's domain (x <= 0).
    LogDomain,
    /// Sign combination with no defined weighting.
    UnhandledBranch,
}

impl Absence {
    /// Short human-readable reason.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::NoData => "insufficient history",
            Self::ZeroDenominator => "zero denominator",
            Self::LogDomain => "comparison outside log-curve domain",
            Self::UnhandledBranch => "no weighting defined for sign combination",
        }
    }
}

/// Output of a signal for one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Contribution {
    /// The signal produced a score.
    Value(f64),
    /// The signal has nothing to add for this symbol.
    Absent(Absence),
}

impl Contribution {
    /// The score, if present.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Absent(_) => None,
        }
    }

    /// The score, or zero when absent.
    #[must_use]
    pub fn value_or_zero(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }

    /// Whether the signal produced nothing.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent(_))
    }
}

/// A signal that scores one symbol at a time.
///
/// # Example
///
/// ```no_run
/// use ronda_traits::{Contribution, ScoringContext, Signal};
///
/// struct HistoryLength;
///
/// impl Signal for HistoryLength {
///     fn name(&self) -> &str {
///         "history_length"
///     }
///
///     fn score(&self, symbol: &str, ctx: &ScoringContext<'_>) -> Contribution {
///         let bars = ctx.store.get(symbol).map_or(0, |s| s.len());
///         Contribution::Value(bars as f64)
///     }
///
///     fn lookback(&self) -> usize {
///         0
///     }
///
///     fn required_columns(&self) -> &[&str] {
///         &["date"]
///     }
/// }
/// ```
pub trait Signal: Send + Sync {
    /// Unique name used in logs, the registry, and JSON output.
    fn name(&self) -> &str;

    /// Scores `symbol` against the data in `ctx`.
    fn score(&self, symbol: &str, ctx: &ScoringContext<'_>) -> Contribution;

    /// Longest window, in bars, the signal reads.
    fn lookback(&self) -> usize;

    /// Bar fields the signal reads.
    fn required_columns(&self) -> &[&str];
}
