//! Fundamentals lookup used by valuation signals.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Result, Symbol};

/// Source of trailing earnings-per-share figures.
///
/// Implementations must be safe to share across threads; scoring runs in
/// parallel over the universe.
pub trait FundamentalsProvider: Send + Sync {
    /// Trailing EPS for `symbol`, or `None` when the provider has no figure.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider itself fails (network, timeout,
    /// malformed response). Callers treat that the same as a missing figure.
    fn trailing_eps(&self, symbol: &str) -> Result<Option<f64>>;
}

/// A frozen map of trailing EPS by symbol.
///
/// Scoring against the same snapshot is deterministic, which is why the CLI
/// fetches fundamentals up front instead of querying mid-run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundamentalsSnapshot {
    eps: HashMap<Symbol, f64>,
}

impl FundamentalsSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the trailing EPS for a symbol.
    pub fn insert(&mut self, symbol: impl Into<Symbol>, eps: f64) {
        self.eps.insert(symbol.into(), eps);
    }

    /// Number of symbols with a recorded figure.
    pub fn len(&self) -> usize {
        self.eps.len()
    }

    /// Whether no figures are recorded.
    pub fn is_empty(&self) -> bool {
        self.eps.is_empty()
    }
}

impl FromIterator<(Symbol, f64)> for FundamentalsSnapshot {
    fn from_iter<I: IntoIterator<Item = (Symbol, f64)>>(iter: I) -> Self {
        Self {
            eps: iter.into_iter().collect(),
        }
    }
}

impl FundamentalsProvider for FundamentalsSnapshot {
    fn trailing_eps(&self, symbol: &str) -> Result<Option<f64>> {
        Ok(self.eps.get(symbol).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_lookup() {
        let mut snapshot = FundamentalsSnapshot::new();
        snapshot.insert("AAPL", 6.5);

        assert_eq!(snapshot.trailing_eps("AAPL").unwrap(), Some(6.5));
        assert_eq!(snapshot.trailing_eps("MSFT").unwrap(), None);
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_snapshot_from_iter() {
        let snapshot: FundamentalsSnapshot =
            vec![("A".to_string(), 1.0), ("B".to_string(), -2.0)].into_iter().collect();
        assert_eq!(snapshot.trailing_eps("B").unwrap(), Some(-2.0));
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn test_provider_is_object_safe() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn FundamentalsProvider>();
    }
}
