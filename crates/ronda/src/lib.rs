#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # ronda
//!
//! Multi-factor stock ranking.
//!
//! ronda is an umbrella crate that re-exports the ronda sub-crates and hosts
//! the [`ScoringOrchestrator`], which drives the signals and the ranking
//! engine over a universe.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ronda::{FundamentalsSnapshot, PriceSeriesStore, RankingConfig, ScoringOrchestrator};
//!
//! let store = PriceSeriesStore::from_market_data(&market_data)?;
//! let fundamentals = FundamentalsSnapshot::new();
//!
//! let orchestrator = ScoringOrchestrator::new(RankingConfig::default());
//! let ranking = orchestrator.rank(&universe, &store, &fundamentals);
//!
//! for entry in ranking.entries() {
//!     println!("{:>2}. {}", entry.rank, entry.symbol);
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Core types, the price store, and the [`Signal`] trait
//! - [`signals`] - Momentum, oscillator, and valuation signals
//! - [`combine`] - Composite scoring and the insertion ranking

/// Version information for the ronda crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Traits
// ============================================================================

/// Core types and trait definitions.
pub mod traits {
    pub use ronda_traits::*;
}

pub use ronda_traits::{
    Absence, Bar, Contribution, Date, FundamentalsProvider, FundamentalsSnapshot, MarketData,
    PriceSeries, PriceSeriesStore, Result, RondaError, ScoringContext, Signal, Symbol,
};

// ============================================================================
// Signal Implementations
// ============================================================================

/// Signal implementations.
///
/// - [`signals::momentum`] - Relative momentum against the benchmark
/// - [`signals::oscillator`] - Smoothed relative strength
/// - [`signals::value`] - P/E versus volume divergence
pub mod signals {
    pub use ronda_signals::*;
}

// ============================================================================
// Combination and Ranking
// ============================================================================

/// Composite scoring and ranking.
pub mod combine {
    pub use ronda_combine::*;
}

pub use ronda_combine::{Combiner, CompositeScore, CompositeWeights, RankedSymbol, RankingEngine};

// ============================================================================
// Orchestration
// ============================================================================

mod orchestrator;

pub use orchestrator::{Ranking, RankingConfig, ScoringOrchestrator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_reexports() {
        let _ = RankingConfig::default();
        let _ = traits::PriceSeriesStore::new();
        let _ = combine::WeightedCombiner::default();
        assert_eq!(signals::PERIOD_WEIGHTS.len(), 6);
    }
}
