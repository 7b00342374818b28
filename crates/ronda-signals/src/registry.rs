//! Signal registry for discovering available signals.

use serde::{Deserialize, Serialize};

/// Signal category classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalCategory {
    /// Price momentum signals
    Momentum,
    /// Technical oscillators
    Technical,
    /// Valuation signals
    Value,
}

impl SignalCategory {
    /// Get a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::Momentum => "Price momentum relative to a benchmark",
            Self::Technical => "Technical oscillators over price changes",
            Self::Value => "Valuation drift compared with trading activity",
        }
    }
}

/// Metadata about a signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalInfo {
    /// Unique identifier for the signal
    pub name: &'static str,

    /// Category classification
    pub category: SignalCategory,

    /// Human-readable description
    pub description: &'static str,

    /// Longest window read, in bars
    pub typical_lookback: usize,

    /// Whether the signal requires fundamental data
    pub requires_fundamentals: bool,

    /// Default weight in the composite score
    pub composite_weight: f64,
}

/// Get information about all available signals.
#[must_use]
pub fn available_signals() -> Vec<SignalInfo> {
    vec![
        SignalInfo {
            name: "relative_momentum",
            category: SignalCategory::Momentum,
            description: "Weighted excess return over the benchmark across 15 to 200 bars",
            typical_lookback: 200,
            requires_fundamentals: false,
            composite_weight: 0.2,
        },
        SignalInfo {
            name: "relative_strength",
            category: SignalCategory::Technical,
            description: "Weighted smoothed relative strength across 15 to 200 bars",
            typical_lookback: 200,
            requires_fundamentals: false,
            composite_weight: 0.3,
        },
        SignalInfo {
            name: "pe_volume_divergence",
            category: SignalCategory::Value,
            description: "Trailing P/E drift against volume drift over 21 bars",
            typical_lookback: 21,
            requires_fundamentals: true,
            composite_weight: 1.0,
        },
    ]
}

/// Get all signals in a specific category.
#[must_use]
pub fn signals_by_category(category: &SignalCategory) -> Vec<SignalInfo> {
    available_signals()
        .into_iter()
        .filter(|info| &info.category == category)
        .collect()
}

/// Get information about a specific signal by name.
#[must_use]
pub fn get_signal_info(name: &str) -> Option<SignalInfo> {
    available_signals()
        .into_iter()
        .find(|info| info.name == name)
}
