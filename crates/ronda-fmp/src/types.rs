//! Data types for FMP API responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reporting period for financial statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    /// Annual reports (10-K filings).
    #[default]
    Annual,
    /// Quarterly reports (10-Q filings).
    Quarter,
}

impl Period {
    /// Get the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarter => "quarter",
        }
    }
}

/// Income statement data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    /// Filing date.
    pub date: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Reporting period (annual/quarterly).
    #[serde(default)]
    pub period: String,
    /// Total revenue.
    #[serde(default)]
    pub revenue: f64,
    /// Net income.
    #[serde(default)]
    pub net_income: f64,
    /// Earnings per share (basic).
    #[serde(default)]
    pub eps: f64,
    /// Earnings per share (diluted).
    #[serde(default)]
    pub eps_diluted: f64,
}

impl IncomeStatement {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// Real-time quote data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Ticker symbol.
    pub symbol: String,
    /// Company name.
    #[serde(default)]
    pub name: String,
    /// Current price.
    #[serde(default)]
    pub price: f64,
    /// Market cap.
    #[serde(default)]
    pub market_cap: f64,
    /// Volume.
    #[serde(default)]
    pub volume: f64,
    /// Average volume.
    #[serde(default)]
    pub avg_volume: f64,
    /// Trailing twelve month EPS. Zero when FMP omits it.
    #[serde(default)]
    pub eps: f64,
    /// P/E ratio.
    #[serde(default)]
    pub pe: f64,
}

/// Historical price data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalPrice {
    /// Date.
    pub date: String,
    /// Open price.
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Volume.
    #[serde(default)]
    pub volume: f64,
}

impl HistoricalPrice {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// One member of the S&P 500 index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constituent {
    /// Ticker symbol as FMP lists it, e.g. `BRK.B`.
    pub symbol: String,
    /// Company name.
    #[serde(default)]
    pub name: String,
    /// GICS sector.
    #[serde(default)]
    pub sector: String,
    /// GICS sub-industry.
    #[serde(default)]
    pub sub_sector: String,
}
