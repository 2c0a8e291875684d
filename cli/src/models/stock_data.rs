use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily OHLCV session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Candle {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    pub fn upper_shadow(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    pub fn lower_shadow(&self) -> f64 {
        self.open.min(self.close) - self.low
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Body as a fraction of the high-low range, `None` for a flat session.
    pub fn body_ratio(&self) -> Option<f64> {
        let range = self.range();
        (range > 0.0).then(|| self.body() / range)
    }
}

/// Row layout of the `<SYMBOL>.csv` files read by the CSV data source.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCandle {
    pub time: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl RawCandle {
    /// Accepts `YYYY-MM-DD` or a timestamp starting with it (`2024-01-02 00:00:00`).
    pub fn to_candle(&self) -> Result<Candle, chrono::ParseError> {
        let day = self.time.get(..10).unwrap_or(&self.time);
        let date = NaiveDate::parse_from_str(day, "%Y-%m-%d")?;
        Ok(Candle::new(
            date,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume.max(0.0).round() as u64,
        ))
    }
}

/// Column views over a candle series, the shape the indicator functions consume.
#[derive(Debug, Clone, Default)]
pub struct SeriesColumns {
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,
}

impl SeriesColumns {
    pub fn from_candles(candles: &[Candle]) -> Self {
        let mut columns = Self {
            open: Vec::with_capacity(candles.len()),
            high: Vec::with_capacity(candles.len()),
            low: Vec::with_capacity(candles.len()),
            close: Vec::with_capacity(candles.len()),
            volume: Vec::with_capacity(candles.len()),
        };
        for candle in candles {
            columns.open.push(candle.open);
            columns.high.push(candle.high);
            columns.low.push(candle.low);
            columns.close.push(candle.close);
            columns.volume.push(candle.volume as f64);
        }
        columns
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn candle_geometry() {
        let candle = Candle::new(day(2), 100.0, 110.0, 90.0, 105.0, 1_000);
        assert_eq!(candle.body(), 5.0);
        assert_eq!(candle.range(), 20.0);
        assert_eq!(candle.upper_shadow(), 5.0);
        assert_eq!(candle.lower_shadow(), 10.0);
        assert!(candle.is_bullish());
        assert!(!candle.is_bearish());
        assert_eq!(candle.body_ratio(), Some(0.25));
    }

    #[test]
    fn flat_candle_has_no_body_ratio() {
        let candle = Candle::new(day(2), 100.0, 100.0, 100.0, 100.0, 0);
        assert_eq!(candle.body_ratio(), None);
        assert!(!candle.is_bullish());
        assert!(!candle.is_bearish());
    }

    #[test]
    fn raw_candle_accepts_datetime_prefix() {
        let raw = RawCandle {
            time: "2024-01-03 00:00:00".to_string(),
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close: 1.5,
            volume: 1234.4,
        };
        let candle = raw.to_candle().unwrap();
        assert_eq!(candle.date, day(3));
        assert_eq!(candle.volume, 1234);
    }

    #[test]
    fn raw_candle_rejects_bad_date() {
        let raw = RawCandle {
            time: "03/01/2024".to_string(),
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close: 1.5,
            volume: 1.0,
        };
        assert!(raw.to_candle().is_err());
    }

    #[test]
    fn columns_follow_candle_order() {
        let candles = vec![
            Candle::new(day(2), 1.0, 2.0, 0.5, 1.5, 10),
            Candle::new(day(3), 1.5, 2.5, 1.0, 2.0, 20),
        ];
        let columns = SeriesColumns::from_candles(&candles);
        assert_eq!(columns.len(), 2);
        assert_eq!(columns.close, vec![1.5, 2.0]);
        assert_eq!(columns.volume, vec![10.0, 20.0]);
    }
}
