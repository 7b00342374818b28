//! Trailing P/E drift against volume drift.

use ronda_traits::{
    Absence, Contribution, FundamentalsProvider, PriceSeriesStore, ScoringContext, Signal,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Log curve used to weight the P/E to volume ratio: `-0.1 * ln(x) + 0.2`.
///
/// Only defined for `x > 0`.
#[must_use]
pub fn log_curve(x: f64) -> Option<f64> {
    (x > 0.0).then(|| -0.1 * x.ln() + 0.2)
}

/// Configuration for the P/E versus volume divergence signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PeVolumeConfig {
    /// Bars in the comparison window (default: 21, about three weeks).
    pub window: usize,

    /// Curve input used when P/E rose while volume fell (default: 3.0).
    pub rising_pe_falling_volume: f64,

    /// Curve input used when P/E fell while volume rose (default: 0.8).
    pub falling_pe_rising_volume: f64,

    /// Multiplier applied to the curve output (default: 100).
    pub scale: f64,
}

impl Default for PeVolumeConfig {
    fn default() -> Self {
        Self {
            window: 21,
            rising_pe_falling_volume: 3.0,
            falling_pe_rising_volume: 0.8,
            scale: 100.0,
        }
    }
}

/// Which weighting rule produced the contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveBranch {
    /// Non-negative ratio, weighted by the curve at the ratio itself.
    Ratio,
    /// Negative ratio with P/E up and volume down.
    RisingPeFallingVolume,
    /// Negative ratio with P/E down and volume up.
    FallingPeRisingVolume,
    /// Negative ratio with no rule; contributes nothing.
    Unhandled,
}

/// Intermediate values of one valuation evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeVolumeBreakdown {
    /// Percent change in volume from the first to the second-to-last bar.
    pub volume_rate: f64,
    /// Percent change in trailing P/E across the window, zero without EPS.
    pub pe_rate: f64,
    /// `pe_rate / volume_rate`.
    pub comparison: f64,
    /// Weighting rule applied.
    pub branch: CurveBranch,
    /// Resulting contribution to the composite.
    pub contribution: Contribution,
}

/// P/E versus volume divergence signal.
///
/// Volume drift compares the first bar of the window to the second-to-last
/// one, leaving out the latest (possibly partial) session. P/E drift samples
/// `close / eps` at offsets 1 through `window` from the end and compares the
/// last sample to the first. The ratio of the two is mapped through
/// [`log_curve`]; negative ratios fall back to fixed curve inputs.
///
/// Without a positive trailing EPS the P/E drift is zero. The signal is
/// absent when the window is missing, a denominator is zero, or the ratio
/// lands outside every rule.
#[derive(Debug, Clone)]
pub struct PeVolumeDivergence {
    config: PeVolumeConfig,
}

impl PeVolumeDivergence {
    /// Create a new signal with the given configuration.
    #[must_use]
    pub const fn new(config: PeVolumeConfig) -> Self {
        Self { config }
    }

    /// Bars in the comparison window.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.config.window
    }

    /// Contribution of `symbol` to the composite.
    #[must_use]
    pub fn compute(
        &self,
        symbol: &str,
        store: &PriceSeriesStore,
        fundamentals: &dyn FundamentalsProvider,
    ) -> Contribution {
        match self.breakdown(symbol, store, fundamentals) {
            Ok(breakdown) => breakdown.contribution,
            Err(absence) => Contribution::Absent(absence),
        }
    }

    /// Full evaluation of `symbol`.
    ///
    /// # Errors
    ///
    /// Returns the [`Absence`] reason when the rates themselves cannot be
    /// computed. Absences decided by the weighting rules are reported inside
    /// the breakdown instead.
    pub fn breakdown(
        &self,
        symbol: &str,
        store: &PriceSeriesStore,
        fundamentals: &dyn FundamentalsProvider,
    ) -> Result<PeVolumeBreakdown, Absence> {
        let Some(window) = store.window(symbol, self.config.window).filter(|w| w.len() >= 2) else {
            warn!(%symbol, window = self.config.window, "no volume history, skipping valuation");
            return Err(Absence::NoData);
        };

        let volumes = window.volume();
        let base_volume = volumes[0];
        if base_volume == 0.0 {
            debug!(%symbol, "zero opening volume");
            return Err(Absence::ZeroDenominator);
        }
        let volume_rate = (volumes[volumes.len() - 2] - base_volume) / base_volume * 100.0;
        if volume_rate == 0.0 {
            debug!(%symbol, "flat volume drift");
            return Err(Absence::ZeroDenominator);
        }

        let pe_rate = match self.trailing_eps(symbol, fundamentals) {
            Some(eps) => {
                let closes = window.close();
                let len = closes.len();
                let pe: Vec<f64> = (1..=len).map(|k| closes[len - k] / eps).collect();
                let first = pe[0];
                if first == 0.0 {
                    debug!(%symbol, "zero latest close");
                    return Err(Absence::ZeroDenominator);
                }
                (pe[len - 1] - first) / first * 100.0
            }
            None => 0.0,
        };

        let comparison = pe_rate / volume_rate;

        let (branch, curve_input) = if comparison >= 0.0 {
            (CurveBranch::Ratio, Some(comparison))
        } else if pe_rate >= 0.0 && volume_rate < 0.0 {
            (
                CurveBranch::RisingPeFallingVolume,
                Some(self.config.rising_pe_falling_volume),
            )
        } else if pe_rate < 0.0 && volume_rate >= 0.0 {
            (
                CurveBranch::FallingPeRisingVolume,
                Some(self.config.falling_pe_rising_volume),
            )
        } else {
            (CurveBranch::Unhandled, None)
        };

        let contribution = match curve_input {
            Some(x) => log_curve(x).map_or(Contribution::Absent(Absence::LogDomain), |y| {
                Contribution::Value(y * self.config.scale)
            }),
            None => {
                warn!(%symbol, pe_rate, volume_rate, "no weighting rule for sign combination");
                Contribution::Absent(Absence::UnhandledBranch)
            }
        };

        Ok(PeVolumeBreakdown {
            volume_rate,
            pe_rate,
            comparison,
            branch,
            contribution,
        })
    }

    fn trailing_eps(&self, symbol: &str, fundamentals: &dyn FundamentalsProvider) -> Option<f64> {
        match fundamentals.trailing_eps(symbol) {
            Ok(Some(eps)) if eps > 0.0 && eps.is_finite() => Some(eps),
            Ok(_) => None,
            Err(e) => {
                warn!(%symbol, error = %e, "fundamentals lookup failed, treating EPS as unavailable");
                None
            }
        }
    }
}

impl Default for PeVolumeDivergence {
    fn default() -> Self {
        Self::new(PeVolumeConfig::default())
    }
}

impl Signal for PeVolumeDivergence {
    fn name(&self) -> &str {
        "pe_volume_divergence"
    }

    fn score(&self, symbol: &str, ctx: &ScoringContext<'_>) -> Contribution {
        self.compute(symbol, ctx.store, ctx.fundamentals)
    }

    fn lookback(&self) -> usize {
        self.window()
    }

    fn required_columns(&self) -> &[&str] {
        &["date", "close", "volume"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::series_with_volume;
    use approx::assert_relative_eq;
    use ronda_traits::{FundamentalsSnapshot, Result, RondaError};

    struct FailingProvider;

    impl FundamentalsProvider for FailingProvider {
        fn trailing_eps(&self, _symbol: &str) -> Result<Option<f64>> {
            Err(RondaError::DataFetch("timeout".to_string()))
        }
    }

    /// 21 bars: closes ramp from `first_close` to `last_close`; volume steps
    /// from `first_volume` to `later_volume` after the first bar.
    fn store_with(
        first_close: f64,
        last_close: f64,
        first_volume: f64,
        later_volume: f64,
    ) -> PriceSeriesStore {
        let closes: Vec<f64> = (0..21)
            .map(|i| first_close + (last_close - first_close) * i as f64 / 20.0)
            .collect();
        let mut volumes = vec![later_volume; 21];
        volumes[0] = first_volume;

        let mut store = PriceSeriesStore::new();
        store.insert("D", series_with_volume(&closes, &volumes));
        store
    }

    fn eps(value: f64) -> FundamentalsSnapshot {
        vec![("D".to_string(), value)].into_iter().collect()
    }

    #[test]
    fn test_log_curve_domain() {
        assert_relative_eq!(log_curve(1.0).unwrap(), 0.2);
        assert_relative_eq!(log_curve(3.0).unwrap(), -0.1 * 3.0_f64.ln() + 0.2);
        assert!(log_curve(0.0).is_none());
        assert!(log_curve(-1.0).is_none());
    }

    #[test]
    fn test_volume_rate_uses_second_to_last_bar() {
        let mut volumes = vec![100.0; 21];
        volumes[19] = 150.0;
        volumes[20] = 1_000.0;
        let mut store = PriceSeriesStore::new();
        store.insert("D", series_with_volume(&[10.0; 21], &volumes));

        let breakdown = PeVolumeDivergence::default()
            .breakdown("D", &store, &FundamentalsSnapshot::new())
            .unwrap();
        assert_relative_eq!(breakdown.volume_rate, 50.0);
    }

    #[test]
    fn test_pe_rate_runs_from_latest_to_oldest_close() {
        // Closes rise 100 -> 120, so the latest-first P/E sequence falls.
        let store = store_with(100.0, 120.0, 100.0, 200.0);
        let breakdown = PeVolumeDivergence::default()
            .breakdown("D", &store, &eps(5.0))
            .unwrap();

        assert_relative_eq!(breakdown.pe_rate, (100.0 - 120.0) / 120.0 * 100.0, epsilon = 1e-9);
        assert_relative_eq!(breakdown.volume_rate, 100.0);
        assert_eq!(breakdown.branch, CurveBranch::FallingPeRisingVolume);

        let expected = (-0.1 * 0.8_f64.ln() + 0.2) * 100.0;
        assert_relative_eq!(breakdown.contribution.value().unwrap(), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_positive_ratio_uses_curve() {
        // Closes fall 120 -> 100 (P/E drift +20%), volume doubles (+100%).
        let store = store_with(120.0, 100.0, 100.0, 200.0);
        let breakdown = PeVolumeDivergence::default()
            .breakdown("D", &store, &eps(4.0))
            .unwrap();

        assert_eq!(breakdown.branch, CurveBranch::Ratio);
        assert_relative_eq!(breakdown.comparison, 0.2, epsilon = 1e-9);
        let expected = (-0.1 * 0.2_f64.ln() + 0.2) * 100.0;
        assert_relative_eq!(breakdown.contribution.value().unwrap(), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_rising_pe_with_falling_volume() {
        let store = store_with(120.0, 100.0, 200.0, 100.0);
        let breakdown = PeVolumeDivergence::default()
            .breakdown("D", &store, &eps(4.0))
            .unwrap();

        assert_eq!(breakdown.branch, CurveBranch::RisingPeFallingVolume);
        let expected = (-0.1 * 3.0_f64.ln() + 0.2) * 100.0;
        assert_relative_eq!(breakdown.contribution.value().unwrap(), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_both_falling_is_a_positive_ratio() {
        // P/E down and volume down divide to a positive ratio.
        let store = store_with(100.0, 120.0, 200.0, 100.0);
        let breakdown = PeVolumeDivergence::default()
            .breakdown("D", &store, &eps(4.0))
            .unwrap();
        assert_eq!(breakdown.branch, CurveBranch::Ratio);
        assert!(breakdown.contribution.value().is_some());
    }

    #[test]
    fn test_missing_eps_lands_on_curve_origin() {
        let store = store_with(100.0, 120.0, 100.0, 200.0);
        let breakdown = PeVolumeDivergence::default()
            .breakdown("D", &store, &FundamentalsSnapshot::new())
            .unwrap();

        assert_eq!(breakdown.pe_rate, 0.0);
        assert_eq!(breakdown.comparison, 0.0);
        assert_eq!(breakdown.branch, CurveBranch::Ratio);
        assert_eq!(breakdown.contribution, Contribution::Absent(Absence::LogDomain));
    }

    #[test]
    fn test_non_positive_eps_is_unavailable() {
        let store = store_with(100.0, 120.0, 100.0, 200.0);
        let breakdown = PeVolumeDivergence::default()
            .breakdown("D", &store, &eps(-2.0))
            .unwrap();
        assert_eq!(breakdown.pe_rate, 0.0);
    }

    #[test]
    fn test_provider_failure_is_unavailable() {
        let store = store_with(100.0, 120.0, 100.0, 200.0);
        let breakdown = PeVolumeDivergence::default()
            .breakdown("D", &store, &FailingProvider)
            .unwrap();
        assert_eq!(breakdown.pe_rate, 0.0);
    }

    #[test]
    fn test_flat_volume_is_absent() {
        let store = store_with(100.0, 120.0, 100.0, 100.0);
        let contribution = PeVolumeDivergence::default().compute("D", &store, &eps(4.0));
        assert_eq!(contribution, Contribution::Absent(Absence::ZeroDenominator));
    }

    #[test]
    fn test_flat_volume_skips_eps_lookup() {
        struct UnreachableProvider;

        impl FundamentalsProvider for UnreachableProvider {
            fn trailing_eps(&self, symbol: &str) -> Result<Option<f64>> {
                panic!("EPS requested for {symbol} with flat volume");
            }
        }

        let store = store_with(100.0, 120.0, 100.0, 100.0);
        let result = PeVolumeDivergence::default().breakdown("D", &store, &UnreachableProvider);
        assert_eq!(result.unwrap_err(), Absence::ZeroDenominator);
    }

    #[test]
    fn test_flat_volume_with_zero_latest_close() {
        let mut closes = vec![100.0; 21];
        closes[20] = 0.0;
        let mut store = PriceSeriesStore::new();
        store.insert("D", series_with_volume(&closes, &[100.0; 21]));

        let contribution = PeVolumeDivergence::default().compute("D", &store, &eps(2.0));
        assert_eq!(contribution, Contribution::Absent(Absence::ZeroDenominator));
    }

    #[test]
    fn test_zero_latest_close_is_absent() {
        let mut closes = vec![100.0; 21];
        closes[20] = 0.0;
        let mut volumes = vec![200.0; 21];
        volumes[0] = 100.0;
        let mut store = PriceSeriesStore::new();
        store.insert("D", series_with_volume(&closes, &volumes));

        let signal = PeVolumeDivergence::default();
        assert_eq!(
            signal.breakdown("D", &store, &eps(2.0)).unwrap_err(),
            Absence::ZeroDenominator
        );
        assert_eq!(
            signal.compute("D", &store, &eps(2.0)),
            Contribution::Absent(Absence::ZeroDenominator)
        );
    }

    #[test]
    fn test_overflowing_pe_falls_through_to_unhandled() {
        // Subnormal EPS pushes every P/E to infinity, so the drift is NaN.
        let store = store_with(1e300, 1e300, 200.0, 100.0);
        let breakdown = PeVolumeDivergence::default()
            .breakdown("D", &store, &eps(1e-310))
            .unwrap();

        assert!(breakdown.pe_rate.is_nan());
        assert_relative_eq!(breakdown.volume_rate, -50.0);
        assert_eq!(breakdown.branch, CurveBranch::Unhandled);
        assert_eq!(breakdown.contribution, Contribution::Absent(Absence::UnhandledBranch));
    }

    #[test]
    fn test_lookback_matches_window() {
        let signal = PeVolumeDivergence::new(PeVolumeConfig {
            window: 42,
            ..PeVolumeConfig::default()
        });
        assert_eq!(signal.window(), 42);
        assert_eq!(signal.lookback(), 42);
    }

    #[test]
    fn test_zero_opening_volume_is_absent() {
        let store = store_with(100.0, 120.0, 0.0, 100.0);
        let contribution = PeVolumeDivergence::default().compute("D", &store, &eps(4.0));
        assert_eq!(contribution, Contribution::Absent(Absence::ZeroDenominator));
    }

    #[test]
    fn test_short_history_is_absent() {
        let mut store = PriceSeriesStore::new();
        store.insert("D", series_with_volume(&[10.0; 20], &[100.0; 20]));

        let signal = PeVolumeDivergence::default();
        assert_eq!(
            signal.compute("D", &store, &eps(1.0)),
            Contribution::Absent(Absence::NoData)
        );
        assert_eq!(
            signal.compute("GONE", &store, &eps(1.0)),
            Contribution::Absent(Absence::NoData)
        );
    }
}
