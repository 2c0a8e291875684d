//! Candle builders and an in-memory market data source for unit tests.

use crate::models::Candle;
use crate::services::{DateRange, MarketDataSource, SourceError};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn day(i: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(i as i64)
}

pub fn ohlc(i: usize, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Candle {
    Candle::new(day(i), open, high, low, close, volume)
}

/// Flat-bodied candles with a 1% band around each close.
pub fn candle_series(bars: &[(f64, u64)]) -> Vec<Candle> {
    bars.iter()
        .enumerate()
        .map(|(i, &(close, volume))| ohlc(i, close, close * 1.01, close * 0.99, close, volume))
        .collect()
}

/// `n` sessions compounding by `pct` per session.
pub fn steady_uptrend(n: usize, start: f64, pct: f64, volume: u64) -> Vec<Candle> {
    let bars: Vec<(f64, u64)> = (0..n)
        .map(|i| (start * (1.0 + pct).powi(i as i32), volume))
        .collect();
    candle_series(&bars)
}

/// Serves canned series by symbol and counts calls.
#[derive(Default)]
pub struct StubSource {
    series: HashMap<String, Vec<Candle>>,
    failing: HashMap<String, String>,
    calls: AtomicUsize,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, symbol: &str, candles: Vec<Candle>) -> Self {
        self.series.insert(symbol.to_string(), candles);
        self
    }

    /// Every request for `symbol` fails with a transport error.
    pub fn failing(mut self, symbol: &str, reason: &str) -> Self {
        self.failing.insert(symbol.to_string(), reason.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataSource for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    async fn daily_history(
        &self,
        symbol: &str,
        range: DateRange,
    ) -> Result<Vec<Candle>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = self.failing.get(symbol) {
            return Err(SourceError::Transport(reason.clone()));
        }
        let candles: Vec<Candle> = self
            .series
            .get(symbol)
            .map(|candles| {
                candles
                    .iter()
                    .filter(|c| range.contains(c.date))
                    .copied()
                    .collect()
            })
            .unwrap_or_default();
        if candles.is_empty() {
            return Err(SourceError::NoData(symbol.to_string()));
        }
        Ok(candles)
    }
}
