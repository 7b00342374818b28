//! Universe resolution and data loading for the Ronda CLI.

use anyhow::{Context, Result};
use chrono::Utc;
use ronda::{FundamentalsSnapshot, PriceSeriesStore, Symbol};
use ronda_fmp::{FmpClient, load_fundamentals, load_market_data, normalize_symbol};
use std::time::Duration;
use tracing::info;

/// Trading days of history requested per symbol, about one year.
pub(crate) const LOOKBACK_DAYS: usize = 252;

/// Built-in mixed-sector universe, in ticker order.
pub(crate) const SAMPLE_UNIVERSE: [&str; 20] = [
    "APH", "AVGO", "AXON", "DG", "GE", "GEV", "GILD", "HWM", "JBL", "JCI", "MOS", "NFLX", "NRG",
    "PAYC", "PLTR", "RL", "STX", "TPR", "ULTA", "VST",
];

/// Where the symbols to rank come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UniverseSource {
    /// [`SAMPLE_UNIVERSE`].
    Sample,
    /// Current S&P 500 constituents from FMP.
    Sp500,
    /// An explicit list.
    Symbols(Vec<Symbol>),
}

impl UniverseSource {
    /// Interpret a `--universe` argument.
    pub(crate) fn parse(arg: &str) -> Self {
        match arg.trim().to_lowercase().as_str() {
            "sample" => Self::Sample,
            "sp500" | "s&p500" => Self::Sp500,
            _ => Self::Symbols(parse_symbols(arg)),
        }
    }

    /// Resolve to a symbol list. Built-in and index universes come back in
    /// ticker order; explicit lists keep the order they were given in.
    pub(crate) async fn resolve(&self, client: &FmpClient) -> Result<Vec<Symbol>> {
        match self {
            Self::Sample => {
                let mut symbols: Vec<Symbol> =
                    SAMPLE_UNIVERSE.iter().map(|s| (*s).to_string()).collect();
                symbols.sort();
                Ok(symbols)
            }
            Self::Sp500 => client
                .sp500_symbols()
                .await
                .context("failed to fetch S&P 500 constituents"),
            Self::Symbols(symbols) => Ok(symbols.clone()),
        }
    }
}

/// Split a comma-separated list into normalized, upper-case tickers.
pub(crate) fn parse_symbols(list: &str) -> Vec<Symbol> {
    let mut symbols: Vec<Symbol> = Vec::new();
    for symbol in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let symbol = normalize_symbol(symbol).to_uppercase();
        if !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }
    symbols
}

/// Build an FMP client from the environment with a request timeout.
pub(crate) fn client(timeout_secs: u64) -> Result<FmpClient> {
    let client = FmpClient::from_env().context("FMP client unavailable")?;
    Ok(client.with_timeout(Duration::from_secs(timeout_secs))?)
}

/// Price history and trailing EPS for one run.
#[derive(Debug)]
pub(crate) struct LoadedData {
    pub(crate) store: PriceSeriesStore,
    pub(crate) fundamentals: FundamentalsSnapshot,
}

/// Fetch prices for the universe and the benchmark, and EPS for the universe.
pub(crate) async fn load(
    client: &FmpClient,
    universe: &[Symbol],
    benchmark: &str,
) -> Result<LoadedData> {
    let mut symbols = universe.to_vec();
    if !symbols.iter().any(|s| s == benchmark) {
        symbols.push(benchmark.to_string());
    }

    let today = Utc::now().date_naive();
    let market_data = load_market_data(client, &symbols, LOOKBACK_DAYS, today)
        .await
        .context("failed to load market data")?;
    let store = PriceSeriesStore::from_market_data(&market_data)
        .context("failed to build price store")?;
    let fundamentals = load_fundamentals(client, universe).await;

    info!(
        symbols = store.len(),
        eps = fundamentals.len(),
        "data ready"
    );

    Ok(LoadedData {
        store,
        fundamentals,
    })
}
