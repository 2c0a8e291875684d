use crate::{
    models::{Candle, RawCandle},
    services::data_source::{DateRange, MarketDataSource, SourceError},
    utils::Timer,
};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// Reads daily history from `<data_dir>/<SYMBOL>.csv`.
///
/// Expected header: `time,open,high,low,close,volume`. Extra columns (a
/// `ticker` column, for instance) are ignored.
pub struct CsvDataSource {
    data_dir: PathBuf,
}

impl CsvDataSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn file_for(&self, symbol: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", symbol.to_uppercase()))
    }

    /// Parse CSV content, keep rows inside `range`, sort by date.
    pub fn parse_csv_content(content: &str, range: DateRange) -> Result<Vec<Candle>, SourceError> {
        let mut reader = csv::Reader::from_reader(content.as_bytes());
        let mut candles = Vec::new();

        for (line, result) in reader.deserialize::<RawCandle>().enumerate() {
            let raw = result?;
            let candle = raw.to_candle().map_err(|e| {
                SourceError::InvalidResponse(format!("bad date '{}' on row {}: {}", raw.time, line + 1, e))
            })?;
            if range.contains(candle.date) {
                candles.push(candle);
            }
        }

        candles.sort_by_key(|c| c.date);
        candles.dedup_by_key(|c| c.date);
        Ok(candles)
    }
}

#[async_trait]
impl MarketDataSource for CsvDataSource {
    fn name(&self) -> &str {
        "csv"
    }

    async fn daily_history(&self, symbol: &str, range: DateRange) -> Result<Vec<Candle>, SourceError> {
        let path = self.file_for(symbol);
        if !tokio::fs::try_exists(&path).await? {
            return Err(SourceError::NoData(symbol.to_string()));
        }

        let timer = Timer::start("csv load");
        let content = tokio::fs::read_to_string(&path).await?;
        let candles = Self::parse_csv_content(&content, range)?;
        debug!(
            symbol,
            path = %path.display(),
            rows = candles.len(),
            elapsed_ms = timer.elapsed_ms(),
            "Loaded CSV history"
        );

        if candles.is_empty() {
            return Err(SourceError::NoData(symbol.to_string()));
        }
        Ok(candles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const SAMPLE: &str = "time,open,high,low,close,volume\n\
        2024-01-04,11,12,10,11.5,1200\n\
        2024-01-02,10,11,9,10.5,1000\n\
        2024-01-03,10.5,11.5,10,11,1100\n";

    #[test]
    fn parse_sorts_and_filters() {
        let range = DateRange::new(date(2024, 1, 3), date(2024, 1, 31));
        let candles = CsvDataSource::parse_csv_content(SAMPLE, range).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].date, date(2024, 1, 3));
        assert_eq!(candles[1].close, 11.5);
    }

    #[test]
    fn parse_rejects_bad_dates() {
        let content = "time,open,high,low,close,volume\nnot-a-date,1,1,1,1,1\n";
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31));
        let err = CsvDataSource::parse_csv_content(content, range).unwrap_err();
        assert!(matches!(err, SourceError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn reads_symbol_file_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("FPT.csv")).unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let source = CsvDataSource::new(dir.path());
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31));
        let candles = source.daily_history("fpt", range).await.unwrap();
        assert_eq!(candles.len(), 3);
        assert_eq!(source.name(), "csv");
    }

    #[tokio::test]
    async fn missing_file_is_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvDataSource::new(dir.path());
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31));
        let err = source.daily_history("ZZZ", range).await.unwrap_err();
        assert!(matches!(err, SourceError::NoData(symbol) if symbol == "ZZZ"));
    }

    #[tokio::test]
    async fn empty_range_is_no_data() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("VNM.csv"), SAMPLE).unwrap();
        let source = CsvDataSource::new(dir.path());
        let range = DateRange::new(date(2023, 1, 1), date(2023, 12, 31));
        assert!(matches!(
            source.daily_history("VNM", range).await,
            Err(SourceError::NoData(_))
        ));
    }
}
