//! GTI core: four swing-trading criteria scored 0-4.
//!
//! 1. Trend: EMA10 > EMA20 and close above both.
//! 2. Recent breakout: a session in the last five closed more than 3% up on
//!    volume above 1.5x its 20-session average.
//! 3. Near high: close within 15% of the one-year (252-session) high.
//! 4. Pullback: close within 2% of EMA10 or EMA20.

use crate::models::{Candle, GtiCriteria, GtiSignal, SeriesColumns};
use crate::utils::indicators::{self, round2, Series};

pub const ONE_YEAR_SESSIONS: usize = 252;
pub const BREAKOUT_VOLUME_RATIO: f64 = 1.5;
pub const BREAKOUT_PRICE_GAIN: f64 = 0.03;
pub const BREAKOUT_LOOKBACK: usize = 5;
pub const NEAR_HIGH_PERCENT: f64 = 15.0;
pub const PULLBACK_PERCENT: f64 = 2.0;

/// GTI indicator columns for a whole candle series.
#[derive(Debug, Clone, Default)]
pub struct GtiFrame {
    pub close: Vec<f64>,
    pub ema10: Series,
    pub ema20: Series,
    pub ema50: Series,
    pub ema200: Series,
    pub volume_avg_20: Series,
    pub high_1_year: Vec<f64>,
    pub trend_check: Vec<bool>,
    pub daily_breakout: Vec<bool>,
    pub recent_breakout: Vec<bool>,
    pub dist_to_high_percent: Vec<f64>,
    pub is_pullback: Vec<bool>,
    pub rsi: Series,
    pub macd: Series,
    pub macd_signal: Series,
    pub sma20: Series,
    pub score: Vec<u8>,
    pub signal: Vec<GtiSignal>,
}

/// GTI values of a single session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GtiSnapshot {
    pub close: f64,
    pub ema10: Option<f64>,
    pub ema20: Option<f64>,
    pub ema50: Option<f64>,
    pub ema200: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub sma20: Option<f64>,
    pub dist_to_high_percent: f64,
    pub criteria: GtiCriteria,
    pub score: u8,
    pub signal: GtiSignal,
}

impl GtiFrame {
    pub fn compute(candles: &[Candle]) -> Self {
        Self::from_columns(&SeriesColumns::from_candles(candles))
    }

    pub fn from_columns(columns: &SeriesColumns) -> Self {
        let n = columns.len();
        let close = &columns.close;
        let volume = &columns.volume;

        let ema10 = indicators::ema(close, 10);
        let ema20 = indicators::ema(close, 20);
        let ema50 = indicators::ema(close, 50);
        let ema200 = indicators::ema(close, 200);
        let volume_avg_20 = indicators::sma(volume, 20);
        let high_1_year = indicators::rolling_max_partial(&columns.high, ONE_YEAR_SESSIONS);

        let trend_check: Vec<bool> = (0..n)
            .map(|i| match (ema10[i], ema20[i]) {
                (Some(e10), Some(e20)) => e10 > e20 && close[i] > e10 && close[i] > e20,
                _ => false,
            })
            .collect();

        let daily_breakout: Vec<bool> = (0..n)
            .map(|i| {
                let volume_ok = volume_avg_20[i]
                    .map(|avg| volume[i] > avg * BREAKOUT_VOLUME_RATIO)
                    .unwrap_or(false);
                let price_ok = i > 0
                    && close[i - 1] != 0.0
                    && (close[i] - close[i - 1]) / close[i - 1] > BREAKOUT_PRICE_GAIN;
                volume_ok && price_ok
            })
            .collect();

        let recent_breakout: Vec<bool> = (0..n)
            .map(|i| {
                i + 1 >= BREAKOUT_LOOKBACK
                    && daily_breakout[i + 1 - BREAKOUT_LOOKBACK..=i].iter().any(|&b| b)
            })
            .collect();

        let dist_to_high_percent: Vec<f64> = (0..n)
            .map(|i| round2((high_1_year[i] - close[i]) / close[i] * 100.0))
            .collect();

        let is_pullback: Vec<bool> = (0..n)
            .map(|i| {
                within_percent(close[i], ema10[i], PULLBACK_PERCENT)
                    || within_percent(close[i], ema20[i], PULLBACK_PERCENT)
            })
            .collect();

        let rsi = indicators::rsi(close, 14);
        let macd = indicators::macd(close, 12, 26, 9);
        let sma20 = indicators::sma(close, 20);

        let score: Vec<u8> = (0..n)
            .map(|i| {
                GtiCriteria {
                    trend_check: trend_check[i],
                    recent_breakout: recent_breakout[i],
                    near_one_year_high: dist_to_high_percent[i] <= NEAR_HIGH_PERCENT,
                    is_pullback: is_pullback[i],
                }
                .score()
            })
            .collect();
        let signal = score.iter().map(|&s| GtiSignal::from_score(s)).collect();

        Self {
            close: close.clone(),
            ema10,
            ema20,
            ema50,
            ema200,
            volume_avg_20,
            high_1_year,
            trend_check,
            daily_breakout,
            recent_breakout,
            dist_to_high_percent,
            is_pullback,
            rsi,
            macd: macd.macd,
            macd_signal: macd.signal,
            sma20,
            score,
            signal,
        }
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    pub fn snapshot(&self, i: usize) -> Option<GtiSnapshot> {
        if i >= self.len() {
            return None;
        }
        let criteria = GtiCriteria {
            trend_check: self.trend_check[i],
            recent_breakout: self.recent_breakout[i],
            near_one_year_high: self.dist_to_high_percent[i] <= NEAR_HIGH_PERCENT,
            is_pullback: self.is_pullback[i],
        };
        Some(GtiSnapshot {
            close: self.close[i],
            ema10: self.ema10[i],
            ema20: self.ema20[i],
            ema50: self.ema50[i],
            ema200: self.ema200[i],
            rsi: self.rsi[i],
            macd: self.macd[i],
            macd_signal: self.macd_signal[i],
            sma20: self.sma20[i],
            dist_to_high_percent: self.dist_to_high_percent[i],
            criteria,
            score: self.score[i],
            signal: self.signal[i],
        })
    }

    pub fn latest(&self) -> Option<GtiSnapshot> {
        self.len().checked_sub(1).and_then(|i| self.snapshot(i))
    }
}

fn within_percent(price: f64, reference: Option<f64>, percent: f64) -> bool {
    match reference {
        Some(r) if r != 0.0 => ((price - r) / r * 100.0).abs() <= percent,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{candle_series, steady_uptrend};

    #[test]
    fn empty_series_has_no_snapshot() {
        let frame = GtiFrame::compute(&[]);
        assert!(frame.is_empty());
        assert!(frame.latest().is_none());
    }

    #[test]
    fn short_series_only_scores_near_high() {
        // Three flat sessions: no EMA yet, at the high, no breakout window.
        let candles = candle_series(&[(10.0, 1_000), (10.0, 1_000), (10.0, 1_000)]);
        let latest = GtiFrame::compute(&candles).latest().unwrap();
        assert!(!latest.criteria.trend_check);
        assert!(!latest.criteria.recent_breakout);
        assert!(latest.criteria.near_one_year_high);
        assert!(!latest.criteria.is_pullback);
        assert_eq!(latest.score, 1);
        assert_eq!(latest.signal, GtiSignal::Avoid);
        assert_eq!(latest.ema10, None);
    }

    #[test]
    fn steady_uptrend_passes_trend_check() {
        let candles = steady_uptrend(60, 100.0, 0.01, 1_000);
        let frame = GtiFrame::compute(&candles);
        let latest = frame.latest().unwrap();
        assert!(latest.criteria.trend_check);
        assert!(latest.criteria.near_one_year_high);
        assert!(latest.ema10.unwrap() > latest.ema20.unwrap());
        assert!(latest.score >= 2);
    }

    #[test]
    fn breakout_needs_volume_and_price() {
        let mut bars: Vec<(f64, u64)> = vec![(100.0, 1_000); 25];
        // +5% on 3x volume
        bars.push((105.0, 3_000));
        let frame = GtiFrame::compute(&candle_series(&bars));
        assert!(frame.daily_breakout[25]);
        assert!(frame.recent_breakout[25]);

        // +5% on average volume is not a breakout
        let mut quiet: Vec<(f64, u64)> = vec![(100.0, 1_000); 25];
        quiet.push((105.0, 1_000));
        let frame = GtiFrame::compute(&candle_series(&quiet));
        assert!(!frame.daily_breakout[25]);
    }

    #[test]
    fn recent_breakout_expires_after_five_sessions() {
        let mut bars: Vec<(f64, u64)> = vec![(100.0, 1_000); 25];
        bars.push((105.0, 3_000));
        bars.extend(std::iter::repeat((105.0, 1_000)).take(5));
        let frame = GtiFrame::compute(&candle_series(&bars));
        assert!(frame.recent_breakout[29]);
        assert!(!frame.recent_breakout[30]);
    }

    #[test]
    fn distance_to_high_is_rounded_percent() {
        let mut bars: Vec<(f64, u64)> = vec![(120.0, 1_000)];
        bars.push((100.0, 1_000));
        let frame = GtiFrame::compute(&candle_series(&bars));
        // high of the first candle is 120 * 1.01 = 121.2
        assert_eq!(frame.dist_to_high_percent[1], 21.2);
        assert!(!frame.latest().unwrap().criteria.near_one_year_high);
    }

    #[test]
    fn pullback_within_two_percent_of_ema() {
        assert!(within_percent(101.0, Some(100.0), 2.0));
        assert!(within_percent(98.0, Some(100.0), 2.0));
        assert!(!within_percent(103.0, Some(100.0), 2.0));
        assert!(!within_percent(100.0, None, 2.0));
    }
}
