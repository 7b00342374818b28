//! Multi-horizon momentum relative to a benchmark.

use ronda_traits::{Contribution, PriceSeriesStore, ScoringContext, Signal, Window};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::periods::{PERIOD_WEIGHTS, PeriodWeight, longest_period};

/// Configuration for the relative momentum signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelativeMomentumConfig {
    /// Horizons and their weights (default: [`PERIOD_WEIGHTS`]).
    pub periods: Vec<PeriodWeight>,
}

impl Default for RelativeMomentumConfig {
    fn default() -> Self {
        Self {
            periods: PERIOD_WEIGHTS.to_vec(),
        }
    }
}

/// Relative momentum signal.
///
/// For each horizon, adds `weight * (1 + stock_return - benchmark_return)`
/// where returns run from the first to the last close of the window. A
/// horizon is skipped when either window is missing or opens at a zero
/// close, so symbols with short histories score on a smaller scale.
///
/// # Example
///
/// ```ignore
/// use ronda_signals::momentum::RelativeMomentum;
///
/// let signal = RelativeMomentum::default();
/// let score = signal.compute("AAPL", &store, "SPY");
/// ```
#[derive(Debug, Clone)]
pub struct RelativeMomentum {
    config: RelativeMomentumConfig,
}

impl RelativeMomentum {
    /// Create a new relative momentum signal with the given configuration.
    #[must_use]
    pub const fn new(config: RelativeMomentumConfig) -> Self {
        Self { config }
    }

    /// Horizons scored by this signal.
    #[must_use]
    pub fn periods(&self) -> &[PeriodWeight] {
        &self.config.periods
    }

    /// Momentum score of `symbol` against `benchmark`.
    ///
    /// Returns exactly 0 when the symbol has no history.
    #[must_use]
    pub fn compute(&self, symbol: &str, store: &PriceSeriesStore, benchmark: &str) -> f64 {
        if !store.has_data(symbol) {
            warn!(%symbol, "no price history, momentum is zero");
            return 0.0;
        }

        let mut score = 0.0;
        for &PeriodWeight { period, weight } in self.periods() {
            let (Some(stock), Some(bench)) =
                (store.window(symbol, period), store.window(benchmark, period))
            else {
                debug!(%symbol, period, "window unavailable, skipping horizon");
                continue;
            };

            let (Some(stock_return), Some(bench_return)) =
                (window_return(&stock), window_return(&bench))
            else {
                debug!(%symbol, period, "zero opening close, skipping horizon");
                continue;
            };

            let comparison = stock_return - bench_return;
            score += weight * (1.0 + comparison);
        }

        score
    }
}

impl Default for RelativeMomentum {
    fn default() -> Self {
        Self::new(RelativeMomentumConfig::default())
    }
}

impl Signal for RelativeMomentum {
    fn name(&self) -> &str {
        "relative_momentum"
    }

    fn score(&self, symbol: &str, ctx: &ScoringContext<'_>) -> Contribution {
        Contribution::Value(self.compute(symbol, ctx.store, ctx.benchmark))
    }

    fn lookback(&self) -> usize {
        longest_period(self.periods())
    }

    fn required_columns(&self) -> &[&str] {
        &["date", "close"]
    }
}

/// Simple return from the first to the last close of a window.
fn window_return(window: &Window<'_>) -> Option<f64> {
    let first = window.first_close();
    if first == 0.0 {
        return None;
    }
    Some((window.last_close() - first) / first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{series, step_closes, store};
    use approx::assert_relative_eq;
    use ronda_traits::FundamentalsSnapshot;

    fn trending(len: usize) -> Vec<f64> {
        (0..len).map(|i| 50.0 + i as f64 * 0.25).collect()
    }

    #[test]
    fn test_tracking_benchmark_scores_hundred() {
        let closes = trending(250);
        let store = store(&[("AAPL", closes.clone()), ("SPY", closes)]);

        let score = RelativeMomentum::default().compute("AAPL", &store, "SPY");
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_outperformer_against_flat_benchmark() {
        let store = store(&[
            ("A", step_closes(250, 100.0, 110.0)),
            ("B", vec![100.0; 250]),
            ("SPY", vec![100.0; 250]),
        ]);

        let signal = RelativeMomentum::default();
        assert_relative_eq!(signal.compute("A", &store, "SPY"), 110.0, epsilon = 1e-9);
        assert_eq!(signal.compute("B", &store, "SPY"), 100.0);
    }

    #[test]
    fn test_missing_symbol_scores_zero() {
        let store = store(&[("SPY", vec![100.0; 250])]);
        assert_eq!(RelativeMomentum::default().compute("GONE", &store, "SPY"), 0.0);
    }

    #[test]
    fn test_short_history_scores_zero() {
        let store = store(&[("C", trending(10)), ("SPY", trending(250))]);
        assert_eq!(RelativeMomentum::default().compute("C", &store, "SPY"), 0.0);
    }

    #[test]
    fn test_partial_history_skips_long_horizons() {
        // 60 bars cover the 15, 20, 30 and 50 bar horizons only.
        let closes = trending(60);
        let store = store(&[("A", closes.clone()), ("SPY", closes)]);

        let score = RelativeMomentum::default().compute("A", &store, "SPY");
        assert_eq!(score, 20.0 + 12.0 + 10.0 + 12.0);
    }

    #[test]
    fn test_missing_benchmark_skips_every_horizon() {
        let store = store(&[("A", trending(250))]);
        assert_eq!(RelativeMomentum::default().compute("A", &store, "SPY"), 0.0);
    }

    #[test]
    fn test_zero_opening_close_skips_horizon() {
        // The 200 bar window opens on the zero close; all shorter ones do not.
        let mut closes = vec![100.0; 250];
        closes[50] = 0.0;
        let store = store(&[("A", closes), ("SPY", vec![100.0; 250])]);

        let score = RelativeMomentum::default().compute("A", &store, "SPY");
        assert_eq!(score, 100.0 - 29.0);
    }

    #[test]
    fn test_custom_horizons() {
        let signal = RelativeMomentum::new(RelativeMomentumConfig {
            periods: vec![PeriodWeight::new(5, 1.0), PeriodWeight::new(10, 2.0)],
        });
        assert_eq!(signal.periods().len(), 2);
        assert_eq!(signal.lookback(), 10);

        let store = store(&[("A", trending(12)), ("SPY", trending(12))]);
        assert_eq!(signal.compute("A", &store, "SPY"), 3.0);
        assert_eq!(RelativeMomentum::default().periods(), PERIOD_WEIGHTS.as_slice());
    }

    #[test]
    fn test_signal_trait() {
        let mut store = store(&[("SPY", trending(250))]);
        store.insert("AAPL", series(&trending(250)));
        let fundamentals = FundamentalsSnapshot::new();
        let ctx = ScoringContext::new(&store, "SPY", &fundamentals);

        let signal = RelativeMomentum::default();
        assert_eq!(signal.name(), "relative_momentum");
        assert_eq!(signal.lookback(), 200);
        assert_eq!(signal.score("AAPL", &ctx), Contribution::Value(100.0));
    }
}
