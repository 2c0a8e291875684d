//! Market data adapter contract.
//!
//! | Source          | Backing store                       |
//! |-----------------|-------------------------------------|
//! | `CsvDataSource` | one `<SYMBOL>.csv` file per ticker   |
//! | `VciClient`     | Vietcap chart API (server crate)    |
//!
//! Sources make exactly one attempt per call. Callers decide what a failure
//! means; the analyzer treats a failed index or sector lookup as context it
//! can report, and a failed stock lookup as fatal.

use crate::models::Candle;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

/// Inclusive calendar range of sessions to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The `days` calendar days ending at `end`.
    pub fn ending_at(end: NaiveDate, days: u32) -> Self {
        Self::new(crate::utils::days_before(end, days), end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no data returned for {0}")]
    NoData(String),
    #[error("upstream request failed: {0}")]
    Transport(String),
    #[error("invalid upstream response: {0}")]
    InvalidResponse(String),
    #[error("failed to read market data: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse market data: {0}")]
    Csv(#[from] csv::Error),
}

/// Daily OHLCV provider.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Daily candles for `symbol` inside `range`, sorted by date ascending.
    async fn daily_history(
        &self,
        symbol: &str,
        range: DateRange,
    ) -> Result<Vec<Candle>, SourceError>;
}

#[async_trait]
impl<S: MarketDataSource + ?Sized> MarketDataSource for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn daily_history(
        &self,
        symbol: &str,
        range: DateRange,
    ) -> Result<Vec<Candle>, SourceError> {
        (**self).daily_history(symbol, range).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn range_is_inclusive() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31));
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2024, 2, 1)));
        assert_eq!(range.num_days(), 30);
    }

    #[test]
    fn ending_at_counts_back_calendar_days() {
        let range = DateRange::ending_at(date(2024, 12, 31), 365);
        assert_eq!(range.start, date(2024, 1, 1));
        assert_eq!(range.end, date(2024, 12, 31));
    }
}
