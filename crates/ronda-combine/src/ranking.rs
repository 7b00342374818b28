//! Incremental insertion ranking.

use std::collections::HashMap;

use ronda_traits::Symbol;
use serde::{Deserialize, Serialize};

use crate::composite::CompositeScore;

/// One row of a final ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSymbol {
    /// 1-based position.
    pub rank: usize,
    /// Ranked symbol.
    pub symbol: Symbol,
    /// Composite score the rank is based on.
    pub score: CompositeScore,
}

/// Ordered list of symbols built one insertion at a time.
///
/// A new symbol goes immediately before the first entry whose score it
/// equals or beats, or at the end if it beats none. Ties therefore favour
/// whichever symbol was inserted last, so the final order depends on the
/// insertion order and is not the same as a stable sort.
#[derive(Debug, Clone, Default)]
pub struct RankingEngine {
    order: Vec<Symbol>,
    scores: HashMap<Symbol, f64>,
}

impl RankingEngine {
    /// Creates an empty ranking.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty ranking with room for `capacity` symbols.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            order: Vec::with_capacity(capacity),
            scores: HashMap::with_capacity(capacity),
        }
    }

    /// Records `score` for `symbol` and places it in the ranking.
    ///
    /// Inserting a symbol that is already ranked moves it according to the
    /// new score.
    pub fn insert(&mut self, symbol: impl Into<Symbol>, score: f64) {
        let symbol = symbol.into();
        if self.scores.insert(symbol.clone(), score).is_some() {
            self.order.retain(|existing| existing != &symbol);
        }

        let position = self
            .order
            .iter()
            .position(|existing| self.scores.get(existing).is_some_and(|&other| score >= other))
            .unwrap_or(self.order.len());
        self.order.insert(position, symbol);
    }

    /// Score recorded for `symbol`.
    pub fn score(&self, symbol: &str) -> Option<f64> {
        self.scores.get(symbol).copied()
    }

    /// All symbols, best first.
    pub fn ranked(&self) -> &[Symbol] {
        &self.order
    }

    /// The best `n` symbols, or all of them if fewer are ranked.
    pub fn top(&self, n: usize) -> &[Symbol] {
        &self.order[..n.min(self.order.len())]
    }

    /// Number of ranked symbols.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing has been ranked.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
