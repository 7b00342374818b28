//! Financial Modeling Prep (FMP) API client for Ronda.
//!
//! This crate fetches daily prices, trailing EPS and the S&P 500 constituent
//! list from the [Financial Modeling Prep](https://financialmodelingprep.com/)
//! API and turns them into the inputs the ranking engine reads.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ronda_fmp::{FmpClient, load_fundamentals, load_market_data};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FmpClient::from_env()?;
//!
//!     let symbols = client.sp500_symbols().await?;
//!     let market_data = load_market_data(&client, &symbols, 365, today).await?;
//!     let fundamentals = load_fundamentals(&client, &symbols).await;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `FMP_API_KEY` in your environment or `.env` file:
//!
//! ```bash
//! FMP_API_KEY=your_api_key_here
//! ```

mod client;
mod error;
mod loader;
mod types;

pub use client::FmpClient;
pub use error::FmpError;
pub use loader::{load_fundamentals, load_market_data, normalize_symbol, prices_to_frame};
pub use types::*;

/// Result type for FMP operations.
pub type Result<T> = std::result::Result<T, FmpError>;
