#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

//! Core trait definitions for the Ronda ranking engine.
//!
//! Everything a scorer needs to read lives here: the per-symbol price history
//! ([`PriceSeriesStore`]), the fundamentals lookup ([`FundamentalsProvider`]),
//! and the [`Signal`] trait itself.

/// The version of the ronda-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod fundamentals;
pub mod series;
pub mod signal;
pub mod types;

pub use error::{Result, RondaError};
pub use fundamentals::{FundamentalsProvider, FundamentalsSnapshot};
pub use series::{PriceSeries, PriceSeriesStore, Window};
pub use signal::{Absence, Contribution, ScoringContext, Signal};
pub use types::{Bar, Date, MarketData, Symbol};
