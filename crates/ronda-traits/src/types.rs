//! Common types used throughout the Ronda framework.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A market symbol identifier, typically a ticker such as "AAPL".
pub type Symbol = String;

/// One trading day's OHLCV observation for a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Trading date.
    pub date: Date,
    /// Opening price.
    pub open: f64,
    /// Session high.
    pub high: f64,
    /// Session low.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: f64,
}

impl Bar {
    /// Creates a new bar.
    #[must_use]
    pub const fn new(date: Date, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Container for long-format market data.
///
/// `MarketData` wraps a Polars DataFrame holding one row per symbol and day,
/// as returned by a market-data provider.
///
/// # Expected Schema
///
/// - `symbol`: Security identifier (string)
/// - `date`: Trading date (date)
/// - `open`, `high`, `low`, `close`: Price data
/// - `volume`: Trading volume
///
/// # Example
///
/// ```no_run
/// use ronda_traits::MarketData;
/// use polars::prelude::*;
///
/// let df = df! {
///     "symbol" => &["AAPL", "MSFT"],
///     "close" => &[150.0, 300.0],
///     "volume" => &[1000000, 2000000],
/// }.unwrap();
///
/// let market_data = MarketData::new(df);
/// ```
#[derive(Debug, Clone)]
pub struct MarketData {
    data: DataFrame,
}

impl MarketData {
    /// Columns a frame must carry to be loaded into a
    /// [`PriceSeriesStore`](crate::PriceSeriesStore).
    pub const REQUIRED_COLUMNS: [&'static str; 7] =
        ["symbol", "date", "open", "high", "low", "close", "volume"];

    /// Creates a new `MarketData` instance from a DataFrame.
    pub const fn new(data: DataFrame) -> Self {
        Self { data }
    }

    /// Returns a reference to the underlying DataFrame.
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Consumes self and returns the underlying DataFrame.
    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Returns the number of rows in the market data.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Returns whether the market data is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Checks if a column exists in the market data.
    pub fn has_column(&self, name: &str) -> bool {
        self.data
            .get_column_names()
            .iter()
            .any(|s| s.as_str() == name)
    }

    /// Vertically stacks another frame with the same schema onto this one.
    ///
    /// # Errors
    ///
    /// Returns an error if the schemas differ.
    pub fn append(&mut self, other: &Self) -> crate::Result<()> {
        self.data.vstack_mut(&other.data)?;
        Ok(())
    }
}

impl From<DataFrame> for MarketData {
    fn from(data: DataFrame) -> Self {
        Self::new(data)
    }
}

impl AsRef<DataFrame> for MarketData {
    fn as_ref(&self) -> &DataFrame {
        &self.data
    }
}
