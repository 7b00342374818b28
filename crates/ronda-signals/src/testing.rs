//! Fixtures shared by the signal tests.

use chrono::{Duration, NaiveDate};
use ronda_traits::{Bar, PriceSeries, PriceSeriesStore};

/// Consecutive daily bars with the given closes and a constant volume.
pub(crate) fn series(closes: &[f64]) -> PriceSeries {
    let volumes = vec![1_000_000.0; closes.len()];
    series_with_volume(closes, &volumes)
}

/// Consecutive daily bars with the given closes and volumes.
pub(crate) fn series_with_volume(closes: &[f64], volumes: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let bars = closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| {
            Bar::new(start + Duration::days(i as i64), close, close, close, close, volume)
        })
        .collect();
    PriceSeries::from_bars(bars).unwrap()
}

/// A store holding the given `(symbol, closes)` pairs.
pub(crate) fn store(entries: &[(&str, Vec<f64>)]) -> PriceSeriesStore {
    let mut store = PriceSeriesStore::new();
    for (symbol, closes) in entries {
        store.insert(*symbol, series(closes));
    }
    store
}

/// Closes that sit at `base` and jump to `last` on the final bar.
pub(crate) fn step_closes(len: usize, base: f64, last: f64) -> Vec<f64> {
    let mut closes = vec![base; len];
    if let Some(tail) = closes.last_mut() {
        *tail = last;
    }
    closes
}
