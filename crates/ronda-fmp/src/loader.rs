//! Turning FMP responses into market data and fundamentals.

use chrono::{Duration, NaiveDate};
use polars::prelude::*;
use ronda_traits::{FundamentalsSnapshot, MarketData};
use tracing::{debug, info, warn};

use crate::{Result, client::FmpClient, types::HistoricalPrice};

/// Replace class-share dots with dashes, e.g. `BRK.B` becomes `BRK-B`.
#[must_use]
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().replace('.', "-")
}

/// Long-format OHLCV frame for one symbol.
///
/// Rows whose date does not parse are dropped. Row order is kept; the price
/// store sorts by date when it loads the frame.
///
/// # Errors
///
/// Returns an error if the frame cannot be built.
pub fn prices_to_frame(symbol: &str, prices: &[HistoricalPrice]) -> Result<DataFrame> {
    let rows: Vec<(NaiveDate, &HistoricalPrice)> = prices
        .iter()
        .filter_map(|price| {
            let date = price.parsed_date();
            if date.is_none() {
                debug!(%symbol, date = %price.date, "unparseable date, dropping row");
            }
            date.map(|date| (date, price))
        })
        .collect();

    let symbols = vec![symbol; rows.len()];
    let dates: Vec<NaiveDate> = rows.iter().map(|(date, _)| *date).collect();
    let column = |f: fn(&HistoricalPrice) -> f64| -> Vec<f64> {
        rows.iter().map(|(_, price)| f(price)).collect()
    };

    Ok(df! {
        "symbol" => symbols,
        "date" => dates,
        "open" => column(|p| p.open),
        "high" => column(|p| p.high),
        "low" => column(|p| p.low),
        "close" => column(|p| p.close),
        "volume" => column(|p| p.volume),
    }?)
}

/// Fetch daily bars for every symbol over the `lookback_days` trading days
/// ending at `end`.
///
/// Symbols whose request fails are logged and left out; they score as
/// having no history.
///
/// # Errors
///
/// Returns an error if the combined frame cannot be built.
pub async fn load_market_data(
    client: &FmpClient,
    symbols: &[String],
    lookback_days: usize,
    end: NaiveDate,
) -> Result<MarketData> {
    // Trading days to calendar days, with a buffer for holidays
    let calendar_days = (lookback_days as f64 * 1.5) as i64 + 30;
    let start = end - Duration::days(calendar_days);
    let from = start.format("%Y-%m-%d").to_string();
    let to = end.format("%Y-%m-%d").to_string();

    let mut combined = MarketData::new(prices_to_frame("", &[])?);
    let mut loaded = 0usize;

    for symbol in symbols {
        match client.historical_prices(symbol, Some(&from), Some(&to)).await {
            Ok(prices) if prices.is_empty() => {
                warn!(%symbol, "no price history returned");
            }
            Ok(prices) => {
                let frame = prices_to_frame(symbol, &prices)?;
                combined.append(&MarketData::new(frame))?;
                loaded += 1;
            }
            Err(e) => {
                warn!(%symbol, error = %e, "failed to fetch prices");
            }
        }
    }

    info!(requested = symbols.len(), loaded, rows = combined.len(), "market data loaded");
    Ok(combined)
}

/// Fetch trailing EPS for every symbol into a frozen snapshot.
///
/// Symbols without usable EPS, or whose lookup fails, are left out so the
/// valuation signal treats their EPS as unavailable.
pub async fn load_fundamentals(client: &FmpClient, symbols: &[String]) -> FundamentalsSnapshot {
    let mut snapshot = FundamentalsSnapshot::new();

    for symbol in symbols {
        match client.trailing_eps(symbol).await {
            Ok(Some(eps)) => snapshot.insert(symbol.as_str(), eps),
            Ok(None) => debug!(%symbol, "no trailing eps"),
            Err(e) => warn!(%symbol, error = %e, "failed to fetch eps"),
        }
    }

    info!(requested = symbols.len(), loaded = snapshot.len(), "fundamentals loaded");
    snapshot
}
