//! Scoring a universe and building the final ranking.

use std::collections::HashMap;

use rayon::prelude::*;
use ronda_combine::{
    Combiner, CompositeScore, CompositeWeights, RankedSymbol, RankingEngine, SignalComponents,
    WeightedCombiner,
};
use ronda_signals::{
    momentum::{RelativeMomentum, RelativeMomentumConfig},
    oscillator::{RelativeStrength, RelativeStrengthConfig},
    value::{PeVolumeConfig, PeVolumeDivergence},
};
use ronda_traits::{FundamentalsProvider, PriceSeriesStore, ScoringContext, Signal, Symbol};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Settings for one ranking run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Symbol every momentum horizon is measured against (default: SPY).
    pub benchmark: String,

    /// Number of symbols kept in the final ranking (default: 20).
    pub top_n: usize,

    /// Composite weights.
    pub weights: CompositeWeights,

    /// Relative momentum settings.
    pub momentum: RelativeMomentumConfig,

    /// Oscillator settings.
    pub oscillator: RelativeStrengthConfig,

    /// Valuation settings.
    pub valuation: PeVolumeConfig,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            benchmark: "SPY".to_string(),
            top_n: 20,
            weights: CompositeWeights::default(),
            momentum: RelativeMomentumConfig::default(),
            oscillator: RelativeStrengthConfig::default(),
            valuation: PeVolumeConfig::default(),
        }
    }
}

/// Result of ranking a universe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ranking {
    entries: Vec<RankedSymbol>,
    scored: usize,
}

impl Ranking {
    /// Ranked rows, best first.
    #[must_use]
    pub fn entries(&self) -> &[RankedSymbol] {
        &self.entries
    }

    /// Ranked symbols, best first.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.symbol.as_str())
    }

    /// Number of symbols scored before truncation.
    #[must_use]
    pub const fn scored(&self) -> usize {
        self.scored
    }

    /// Number of ranked rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ranking is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Runs every signal over a universe and ranks the composites.
///
/// Symbols are scored in parallel but inserted into the [`RankingEngine`] in
/// universe order, so ties resolve the same way on every run.
#[derive(Debug, Clone)]
pub struct ScoringOrchestrator {
    config: RankingConfig,
    momentum: RelativeMomentum,
    oscillator: RelativeStrength,
    valuation: PeVolumeDivergence,
    combiner: WeightedCombiner,
}

impl ScoringOrchestrator {
    /// Create an orchestrator from the given settings.
    #[must_use]
    pub fn new(config: RankingConfig) -> Self {
        Self {
            momentum: RelativeMomentum::new(config.momentum.clone()),
            oscillator: RelativeStrength::new(config.oscillator.clone()),
            valuation: PeVolumeDivergence::new(config.valuation.clone()),
            combiner: WeightedCombiner::new(config.weights),
            config,
        }
    }

    /// Settings in use.
    #[must_use]
    pub const fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Relative momentum signal.
    #[must_use]
    pub const fn momentum(&self) -> &RelativeMomentum {
        &self.momentum
    }

    /// Oscillator signal.
    #[must_use]
    pub const fn oscillator(&self) -> &RelativeStrength {
        &self.oscillator
    }

    /// Valuation signal.
    #[must_use]
    pub const fn valuation(&self) -> &PeVolumeDivergence {
        &self.valuation
    }

    /// Raw signal outputs for `symbol`.
    #[must_use]
    pub fn components(&self, symbol: &str, ctx: &ScoringContext<'_>) -> SignalComponents {
        SignalComponents {
            momentum: self.momentum.score(symbol, ctx).value_or_zero(),
            oscillator: self.oscillator.score(symbol, ctx).value_or_zero(),
            valuation: self.valuation.score(symbol, ctx),
        }
    }

    /// Composite score of `symbol`.
    #[must_use]
    pub fn score_symbol(&self, symbol: &str, ctx: &ScoringContext<'_>) -> CompositeScore {
        let score = self.combiner.combine(&self.components(symbol, ctx));
        debug!(
            %symbol,
            momentum = score.momentum,
            oscillator = score.oscillator,
            valuation = ?score.valuation,
            total = score.total,
            "scored"
        );
        score
    }

    /// Score every symbol of `universe` and keep the best `top_n`.
    ///
    /// The benchmark is never ranked. Symbols without price history still
    /// take part with whatever the signals produce for them.
    pub fn rank<S>(
        &self,
        universe: &[S],
        store: &PriceSeriesStore,
        fundamentals: &dyn FundamentalsProvider,
    ) -> Ranking
    where
        S: AsRef<str> + Sync,
    {
        let benchmark = self.config.benchmark.as_str();
        if !store.has_data(benchmark) {
            warn!(%benchmark, "benchmark has no price history, momentum horizons will be skipped");
        }

        let ctx = ScoringContext::new(store, benchmark, fundamentals);
        let symbols: Vec<&str> = universe
            .iter()
            .map(AsRef::as_ref)
            .filter(|symbol| *symbol != benchmark)
            .collect();

        info!(symbols = symbols.len(), %benchmark, "scoring universe");

        let scores: Vec<CompositeScore> = symbols
            .par_iter()
            .map(|symbol| self.score_symbol(symbol, &ctx))
            .collect();

        let mut engine = RankingEngine::with_capacity(symbols.len());
        for (symbol, score) in symbols.iter().zip(&scores) {
            engine.insert(*symbol, score.total);
        }

        let by_symbol: HashMap<&str, &CompositeScore> =
            symbols.iter().copied().zip(&scores).collect();

        let entries: Vec<RankedSymbol> = engine
            .top(self.config.top_n)
            .iter()
            .enumerate()
            .filter_map(|(i, symbol)| {
                by_symbol.get(symbol.as_str()).map(|&&score| RankedSymbol {
                    rank: i + 1,
                    symbol: symbol.clone(),
                    score,
                })
            })
            .collect();

        info!(scored = engine.len(), ranked = entries.len(), "ranking complete");

        Ranking {
            entries,
            scored: engine.len(),
        }
    }

    /// Rank every symbol held by `store`, in the store's order.
    pub fn rank_store(
        &self,
        store: &PriceSeriesStore,
        fundamentals: &dyn FundamentalsProvider,
    ) -> Ranking {
        let universe: Vec<Symbol> = store.symbols().map(str::to_string).collect();
        self.rank(&universe, store, fundamentals)
    }
}

impl Default for ScoringOrchestrator {
    fn default() -> Self {
        Self::new(RankingConfig::default())
    }
}
