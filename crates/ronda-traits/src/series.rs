//! Per-symbol price history with windowed, read-only access.
//!
//! A [`PriceSeries`] stores one symbol's bars column by column in ascending
//! date order. Scorers never see the whole series: they ask for a
//! [`Window`] holding the last `n` bars, and a series shorter than `n` has no
//! such window at all.

use std::collections::BTreeMap;

use ndarray::{Array1, ArrayView1, s};
use polars::prelude::*;
use tracing::{debug, warn};

use crate::{Bar, Date, MarketData, Result, RondaError, Symbol};

/// Days between 0001-01-01 (chrono's CE day 1) and the Unix epoch, which is
/// the origin of Polars' physical date representation.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Ordered daily bars for a single symbol, stored as columns.
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    dates: Vec<Date>,
    open: Array1<f64>,
    high: Array1<f64>,
    low: Array1<f64>,
    close: Array1<f64>,
    volume: Array1<f64>,
}

impl PriceSeries {
    /// Builds a series from bars in any order.
    ///
    /// Bars are sorted ascending by date.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidData`] if two bars share a date.
    pub fn from_bars(mut bars: Vec<Bar>) -> Result<Self> {
        bars.sort_by_key(|bar| bar.date);

        if let Some(pair) = bars.windows(2).find(|pair| pair[0].date == pair[1].date) {
            return Err(RondaError::InvalidData(format!(
                "duplicate bar for {}",
                pair[0].date
            )));
        }

        let column = |field: fn(&Bar) -> f64| bars.iter().map(field).collect::<Array1<f64>>();

        Ok(Self {
            dates: bars.iter().map(|bar| bar.date).collect(),
            open: column(|bar| bar.open),
            high: column(|bar| bar.high),
            low: column(|bar| bar.low),
            close: column(|bar| bar.close),
            volume: column(|bar| bar.volume),
        })
    }

    /// Number of bars in the series.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the series holds no bars.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Date of the most recent bar.
    pub fn last_date(&self) -> Option<Date> {
        self.dates.last().copied()
    }

    /// The last `len` bars, or `None` when the series is shorter than `len`
    /// (or `len` is zero).
    pub fn window(&self, len: usize) -> Option<Window<'_>> {
        if len == 0 || len > self.len() {
            return None;
        }
        let start = self.len() - len;

        Some(Window {
            dates: &self.dates[start..],
            open: self.open.slice(s![start..]),
            high: self.high.slice(s![start..]),
            low: self.low.slice(s![start..]),
            close: self.close.slice(s![start..]),
            volume: self.volume.slice(s![start..]),
        })
    }
}

/// A non-empty, read-only view over the most recent bars of a series.
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    dates: &'a [Date],
    open: ArrayView1<'a, f64>,
    high: ArrayView1<'a, f64>,
    low: ArrayView1<'a, f64>,
    close: ArrayView1<'a, f64>,
    volume: ArrayView1<'a, f64>,
}

impl<'a> Window<'a> {
    /// Number of bars in the window. Always at least one.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Always false; empty windows are represented by `None`.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Dates covered by the window, ascending.
    pub const fn dates(&self) -> &'a [Date] {
        self.dates
    }

    /// Opening prices.
    pub const fn open(&self) -> ArrayView1<'a, f64> {
        self.open
    }

    /// Session highs.
    pub const fn high(&self) -> ArrayView1<'a, f64> {
        self.high
    }

    /// Session lows.
    pub const fn low(&self) -> ArrayView1<'a, f64> {
        self.low
    }

    /// Closing prices.
    pub const fn close(&self) -> ArrayView1<'a, f64> {
        self.close
    }

    /// Traded volumes.
    pub const fn volume(&self) -> ArrayView1<'a, f64> {
        self.volume
    }

    /// Close of the oldest bar in the window.
    pub fn first_close(&self) -> f64 {
        self.close[0]
    }

    /// Close of the newest bar in the window.
    pub fn last_close(&self) -> f64 {
        self.close[self.len() - 1]
    }
}

/// In-memory table of price series keyed by symbol.
///
/// Populated once per run, then only read. Iteration order over symbols is
/// lexicographic.
#[derive(Debug, Clone, Default)]
pub struct PriceSeriesStore {
    series: BTreeMap<Symbol, PriceSeries>,
}

impl PriceSeriesStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a store from long-format market data.
    ///
    /// Rows with a missing field are dropped. Symbols whose rows contain
    /// duplicate dates are skipped with a warning rather than failing the
    /// whole load.
    ///
    /// # Errors
    ///
    /// Returns an error if a required column is absent or has an
    /// incompatible type.
    pub fn from_market_data(data: &MarketData) -> Result<Self> {
        for col in MarketData::REQUIRED_COLUMNS {
            if !data.has_column(col) {
                return Err(RondaError::MissingColumn(col.to_string()));
            }
        }

        let df = data.data();
        let symbols: Vec<Option<&str>> = df
            .column("symbol")?
            .as_materialized_series()
            .str()?
            .into_iter()
            .collect();
        let dates: Vec<Option<i32>> = df
            .column("date")?
            .as_materialized_series()
            .date()?
            .into_iter()
            .collect();
        let open = float_column(df, "open")?;
        let high = float_column(df, "high")?;
        let low = float_column(df, "low")?;
        let close = float_column(df, "close")?;
        let volume = float_column(df, "volume")?;

        let bar_at = |row: usize| -> Option<Bar> {
            let date = Date::from_num_days_from_ce_opt(dates[row]? + EPOCH_DAYS_FROM_CE)?;
            Some(Bar::new(
                date,
                open[row]?,
                high[row]?,
                low[row]?,
                close[row]?,
                volume[row]?,
            ))
        };

        let mut grouped: BTreeMap<Symbol, Vec<Bar>> = BTreeMap::new();
        let mut dropped = 0usize;

        for row in 0..df.height() {
            match (symbols[row], bar_at(row)) {
                (Some(symbol), Some(bar)) => grouped.entry(symbol.to_string()).or_default().push(bar),
                _ => dropped += 1,
            }
        }

        if dropped > 0 {
            debug!(dropped, "dropped incomplete market data rows");
        }

        let mut store = Self::new();
        for (symbol, bars) in grouped {
            match PriceSeries::from_bars(bars) {
                Ok(series) => {
                    store.insert(symbol, series);
                }
                Err(e) => warn!(%symbol, error = %e, "skipping symbol with malformed history"),
            }
        }

        Ok(store)
    }

    /// Adds a symbol's series, returning any series it replaced.
    pub fn insert(&mut self, symbol: impl Into<Symbol>, series: PriceSeries) -> Option<PriceSeries> {
        self.series.insert(symbol.into(), series)
    }

    /// Looks up a symbol's full series.
    pub fn get(&self, symbol: &str) -> Option<&PriceSeries> {
        self.series.get(symbol)
    }

    /// Looks up a symbol's series, failing if it was never loaded.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::SymbolNotFound`] if the symbol is absent.
    pub fn try_get(&self, symbol: &str) -> Result<&PriceSeries> {
        self.get(symbol)
            .ok_or_else(|| RondaError::SymbolNotFound(symbol.to_string()))
    }

    /// Whether the symbol has a series with at least one bar.
    pub fn has_data(&self, symbol: &str) -> bool {
        self.get(symbol).is_some_and(|series| !series.is_empty())
    }

    /// Window of the last `len` bars for `symbol`, if available.
    pub fn window(&self, symbol: &str, len: usize) -> Option<Window<'_>> {
        self.get(symbol)?.window(len)
    }

    /// Symbols in the store, in lexicographic order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Number of symbols in the store.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether the store holds no symbols.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series.f64()?.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn bars(closes: &[f64]) -> Vec<Bar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let date = start + chrono::Duration::days(i as i64);
                Bar::new(date, close, close, close, close, 1_000.0 + i as f64)
            })
            .collect()
    }

    #[test]
    fn test_from_bars_sorts_by_date() {
        let mut input = bars(&[1.0, 2.0, 3.0]);
        input.reverse();

        let series = PriceSeries::from_bars(input).unwrap();
        let window = series.window(3).unwrap();
        assert_eq!(window.close().to_vec(), vec![1.0, 2.0, 3.0]);
        assert!(window.dates().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_from_bars_rejects_duplicate_dates() {
        let mut input = bars(&[1.0, 2.0]);
        input[1].date = input[0].date;
        assert!(matches!(
            PriceSeries::from_bars(input),
            Err(RondaError::InvalidData(_))
        ));
    }

    #[test]
    fn test_window_takes_last_bars() {
        let series = PriceSeries::from_bars(bars(&[1.0, 2.0, 3.0, 4.0, 5.0])).unwrap();

        let window = series.window(2).unwrap();
        assert_eq!(window.len(), 2);
        assert_relative_eq!(window.first_close(), 4.0);
        assert_relative_eq!(window.last_close(), 5.0);
        assert_eq!(window.volume().to_vec(), vec![1_003.0, 1_004.0]);
    }

    #[test]
    fn test_window_slices_every_column() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let input = (0..4)
            .map(|i| {
                let base = 10.0 * (i + 1) as f64;
                let date = start + chrono::Duration::days(i);
                Bar::new(date, base, base + 2.0, base - 2.0, base + 1.0, 100.0 * base)
            })
            .collect();
        let series = PriceSeries::from_bars(input).unwrap();

        let window = series.window(2).unwrap();
        assert_eq!(window.dates()[0], start + chrono::Duration::days(2));
        assert_eq!(window.open().to_vec(), vec![30.0, 40.0]);
        assert_eq!(window.high().to_vec(), vec![32.0, 42.0]);
        assert_eq!(window.low().to_vec(), vec![28.0, 38.0]);
        assert_eq!(window.close().to_vec(), vec![31.0, 41.0]);
        assert_eq!(window.volume().to_vec(), vec![3_000.0, 4_000.0]);
    }

    #[test]
    fn test_short_series_has_no_window() {
        let series = PriceSeries::from_bars(bars(&[1.0, 2.0, 3.0])).unwrap();
        assert!(series.window(4).is_none());
        assert!(series.window(0).is_none());
        assert!(series.window(3).is_some());
    }

    #[test]
    fn test_store_window_for_missing_symbol() {
        let mut store = PriceSeriesStore::new();
        store.insert("AAPL", PriceSeries::from_bars(bars(&[1.0, 2.0])).unwrap());

        assert!(store.window("AAPL", 2).is_some());
        assert!(store.window("MSFT", 1).is_none());
        assert!(store.has_data("AAPL"));
        assert!(!store.has_data("MSFT"));
        assert!(matches!(
            store.try_get("MSFT"),
            Err(RondaError::SymbolNotFound(_))
        ));
    }

    #[test]
    fn test_store_from_market_data() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        let df = df! {
            "symbol" => &["MSFT", "AAPL", "AAPL", "MSFT"],
            "date" => &[d(3), d(3), d(2), d(2)],
            "open" => &[1.0, 1.0, 1.0, 1.0],
            "high" => &[1.0, 1.0, 1.0, 1.0],
            "low" => &[1.0, 1.0, 1.0, 1.0],
            "close" => &[31.0, 11.0, 10.0, 30.0],
            "volume" => &[100i64, 200, 300, 400],
        }
        .unwrap();

        let store = PriceSeriesStore::from_market_data(&MarketData::new(df)).unwrap();
        assert_eq!(store.symbols().collect::<Vec<_>>(), vec!["AAPL", "MSFT"]);

        let aapl = store.window("AAPL", 2).unwrap();
        assert_eq!(aapl.close().to_vec(), vec![10.0, 11.0]);
        assert_eq!(aapl.volume().to_vec(), vec![300.0, 200.0]);
        assert_eq!(store.get("MSFT").unwrap().last_date(), Some(d(3)));
    }

    #[test]
    fn test_store_skips_symbols_with_duplicate_dates() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let df = df! {
            "symbol" => &["AAPL", "AAPL", "MSFT"],
            "date" => &[d, d, d],
            "open" => &[1.0, 1.0, 1.0],
            "high" => &[1.0, 1.0, 1.0],
            "low" => &[1.0, 1.0, 1.0],
            "close" => &[1.0, 1.0, 1.0],
            "volume" => &[1.0, 1.0, 1.0],
        }
        .unwrap();

        let store = PriceSeriesStore::from_market_data(&MarketData::new(df)).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get("AAPL").is_none());
    }

    #[test]
    fn test_store_requires_columns() {
        let df = df! {
            "symbol" => &["AAPL"],
            "close" => &[1.0],
        }
        .unwrap();

        let result = PriceSeriesStore::from_market_data(&MarketData::new(df));
        assert!(matches!(result, Err(RondaError::MissingColumn(_))));
    }
}
