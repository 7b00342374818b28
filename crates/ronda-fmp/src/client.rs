//! FMP API client implementation.

use crate::{
    Result,
    error::FmpError,
    loader::normalize_symbol,
    types::{Constituent, HistoricalPrice, IncomeStatement, Period, Quote},
};
use reqwest::Client;
use std::{env, time::Duration};
use tracing::debug;

/// Base URL for the FMP stable API.
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Financial Modeling Prep API client.
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    api_key: String,
}

impl FmpClient {
    /// Create a new FMP client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create a new FMP client from the `FMP_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_key = env::var("FMP_API_KEY").map_err(|_| FmpError::MissingApiKey)?;

        Ok(Self::new(api_key))
    }

    /// Apply a per-request timeout. Requests that exceed it fail with
    /// [`FmpError::Request`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(self, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, ..self })
    }

    /// Build a URL with the API key.
    fn url(&self, endpoint: &str) -> String {
        if endpoint.contains('?') {
            format!("{FMP_BASE_URL}/{endpoint}&apikey={}", self.api_key)
        } else {
            format!("{FMP_BASE_URL}/{endpoint}?apikey={}", self.api_key)
        }
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.url(endpoint);
        debug!(%endpoint, "fmp request");
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FmpError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(FmpError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;

        if text.contains("\"Error Message\"") || text.contains("\"error\"") {
            return Err(FmpError::Api(text));
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Get income statements for a symbol, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn income_statement(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<IncomeStatement>> {
        let limit_param = limit.map(|l| format!("&limit={l}")).unwrap_or_default();
        let endpoint = format!(
            "income-statement?symbol={}&period={}{}",
            symbol.to_uppercase(),
            period.as_str(),
            limit_param
        );
        self.get(&endpoint).await
    }

    /// Get real-time quote for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or FMP has no quote.
    pub async fn quote(&self, symbol: &str) -> Result<Quote> {
        let endpoint = format!("quote?symbol={}", symbol.to_uppercase());
        let quotes: Vec<Quote> = self.get(&endpoint).await?;
        quotes
            .into_iter()
            .next()
            .ok_or_else(|| FmpError::SymbolNotFound(symbol.to_string()))
    }

    /// Get historical daily prices for a symbol, most recent first.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol
    /// * `from` - Start date (YYYY-MM-DD)
    /// * `to` - End date (YYYY-MM-DD)
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn historical_prices(
        &self,
        symbol: &str,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Vec<HistoricalPrice>> {
        let mut params = String::new();
        if let Some(f) = from {
            params.push_str(&format!("&from={f}"));
        }
        if let Some(t) = to {
            params.push_str(&format!("&to={t}"));
        }

        let endpoint = format!(
            "historical-price-eod/full?symbol={}{}",
            symbol.to_uppercase(),
            params
        );
        // The stable API returns a flat array, not a wrapped response
        self.get(&endpoint).await
    }

    /// Get the current S&P 500 constituents.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn sp500_constituents(&self) -> Result<Vec<Constituent>> {
        self.get("sp500-constituent").await
    }

    /// S&P 500 tickers with class-share dots replaced, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn sp500_symbols(&self) -> Result<Vec<String>> {
        let mut symbols: Vec<String> = self
            .sp500_constituents()
            .await?
            .iter()
            .map(|c| normalize_symbol(&c.symbol))
            .collect();
        symbols.sort();
        symbols.dedup();
        Ok(symbols)
    }

    /// Trailing EPS for a symbol.
    ///
    /// Reads the trailing twelve month EPS from the quote and falls back to
    /// the latest annual income statement when the quote has none. Returns
    /// `None` when neither source reports a usable figure.
    ///
    /// # Errors
    ///
    /// Returns an error if the income statement request fails.
    pub async fn trailing_eps(&self, symbol: &str) -> Result<Option<f64>> {
        match self.quote(symbol).await {
            Ok(quote) if usable_eps(quote.eps) => return Ok(Some(quote.eps)),
            Ok(_) => debug!(%symbol, "quote has no eps, trying income statement"),
            Err(e) => debug!(%symbol, error = %e, "quote failed, trying income statement"),
        }

        let statements = self
            .income_statement(symbol, Period::Annual, Some(1))
            .await?;
        Ok(statements
            .first()
            .map(|statement| statement.eps)
            .filter(|&eps| usable_eps(eps)))
    }
}

fn usable_eps(eps: f64) -> bool {
    eps != 0.0 && eps.is_finite()
}
