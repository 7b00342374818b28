//! Multi-horizon smoothed relative strength oscillator.

use ndarray::{ArrayView1, s};
use ronda_traits::{Contribution, PriceSeriesStore, ScoringContext, Signal};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::periods::{PERIOD_WEIGHTS, PeriodWeight, longest_period, total_weight};

/// Configuration for the relative strength oscillator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelativeStrengthConfig {
    /// Horizons and their weights. Weights are normalized by their total, so
    /// the default table becomes 0.20, 0.12, 0.10, 0.12, 0.17, 0.29.
    pub periods: Vec<PeriodWeight>,

    /// Multiplier applied to the average gain and loss before the most
    /// recent change is added (default: 13, Wilder's 14-period smoothing).
    pub smoothing: f64,
}

impl Default for RelativeStrengthConfig {
    fn default() -> Self {
        Self {
            periods: PERIOD_WEIGHTS.to_vec(),
            smoothing: 13.0,
        }
    }
}

/// Relative strength oscillator.
///
/// Each horizon's value follows the RSI form `100 - 100 / (1 + rs)` where
///
/// ```text
/// rs = (avg_gain * 13 + current_gain) / (avg_loss * 13 + current_loss)
/// ```
///
/// Flat days count as losses. `current_loss` keeps the sign of the latest
/// change while `avg_loss` is a magnitude. Horizons are processed shortest
/// first and processing stops at the first horizon whose window is missing.
///
/// When the denominator is zero the horizon scores 100 if there were gains
/// and 50 if the window never moved.
#[derive(Debug, Clone)]
pub struct RelativeStrength {
    config: RelativeStrengthConfig,
}

impl RelativeStrength {
    /// Create a new oscillator with the given configuration.
    #[must_use]
    pub const fn new(config: RelativeStrengthConfig) -> Self {
        Self { config }
    }

    /// Smoothing multiplier.
    #[must_use]
    pub const fn smoothing(&self) -> f64 {
        self.config.smoothing
    }

    /// Weighted oscillator value for `symbol`.
    #[must_use]
    pub fn compute(&self, symbol: &str, store: &PriceSeriesStore) -> f64 {
        let total = total_weight(&self.config.periods);
        let mut score = 0.0;

        for &PeriodWeight { period, weight } in &self.config.periods {
            let Some(window) = store.window(symbol, period) else {
                debug!(%symbol, period, "window unavailable, stopping");
                break;
            };
            let Some(value) = self.period_value(window.close()) else {
                debug!(%symbol, period, "undefined change in window, stopping");
                break;
            };
            score += weight / total * value;
        }

        score
    }

    /// Oscillator value of a single window of closes.
    ///
    /// Returns `None` when fewer than two closes are given or a close used as
    /// a change base is zero.
    #[must_use]
    pub fn period_value(&self, closes: ArrayView1<'_, f64>) -> Option<f64> {
        if closes.len() < 2 {
            return None;
        }
        let previous = closes.slice(s![..-1]);
        if previous.iter().any(|&close| close == 0.0) {
            return None;
        }

        let changes = (&closes.slice(s![1..]) - &previous) / &previous;
        let (gains, losses): (Vec<f64>, Vec<f64>) = changes.iter().partition(|&&c| c > 0.0);

        let avg_gain = mean(&gains).unwrap_or(0.0);
        let avg_loss = mean(&losses).map_or(0.0, |m| -m);

        let net = changes[changes.len() - 1];
        let (current_gain, current_loss) = if net > 0.0 { (net, 0.0) } else { (0.0, net) };

        let numerator = avg_gain * self.smoothing() + current_gain;
        let denominator = avg_loss * self.smoothing() + current_loss;

        if denominator == 0.0 {
            return Some(if numerator > 0.0 { 100.0 } else { 50.0 });
        }

        let rs = numerator / denominator;
        let value = 100.0 - 100.0 / (1.0 + rs);
        value.is_finite().then_some(value)
    }
}

impl Default for RelativeStrength {
    fn default() -> Self {
        Self::new(RelativeStrengthConfig::default())
    }
}

impl Signal for RelativeStrength {
    fn name(&self) -> &str {
        "relative_strength"
    }

    fn score(&self, symbol: &str, ctx: &ScoringContext<'_>) -> Contribution {
        Contribution::Value(self.compute(symbol, ctx.store))
    }

    fn lookback(&self) -> usize {
        longest_period(&self.config.periods)
    }

    fn required_columns(&self) -> &[&str] {
        &["date", "close"]
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
