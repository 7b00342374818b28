//! Composite scoring and ranking for the Ronda engine.
//!
//! A [`Combiner`] folds one symbol's signal outputs into a
//! [`CompositeScore`]; the [`RankingEngine`] then places the symbol in an
//! ordered list by positional insertion.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ronda_combine::{Combiner, RankingEngine, SignalComponents, WeightedCombiner};
//! use ronda_traits::Contribution;
//!
//! let combiner = WeightedCombiner::default();
//! let score = combiner.combine(&SignalComponents {
//!     momentum: 104.0,
//!     oscillator: 61.0,
//!     valuation: Contribution::Value(12.5),
//! });
//!
//! let mut ranking = RankingEngine::new();
//! ranking.insert("AAPL", score.total);
//! ```

mod combiner;
mod composite;
mod ranking;
mod weighted;

// Re-export main types
pub use combiner::{Combiner, SignalComponents};
pub use composite::{CompositeScore, CompositeWeights};
pub use ranking::{RankedSymbol, RankingEngine};
pub use weighted::WeightedCombiner;
