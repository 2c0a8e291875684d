//! Single-session and short-sequence candlestick patterns.
//!
//! Each detector returns one flag per candle. Patterns that look back
//! (engulfing, stars, gaps) are false where the lookback is not available,
//! and volume/level conditions are false while their average or level is
//! still undefined.

use crate::models::Candle;
use crate::utils::indicators::Series;

pub const DOJI_BODY_RATIO: f64 = 0.1;
pub const STAR_BODY_RATIO: f64 = 0.3;
pub const LEVEL_WINDOW: usize = 20;
pub const BREAKOUT_VOLUME_RATIO: f64 = 1.2;
pub const SPIKE_VOLUME_RATIO: f64 = 2.0;
pub const UPTREND_LOOKBACK: usize = 4;

fn flags(candles: &[Candle], rule: impl Fn(usize) -> bool) -> Vec<bool> {
    (0..candles.len()).map(rule).collect()
}

fn volume_above(candle: &Candle, average: Option<f64>, ratio: f64) -> bool {
    average.is_some_and(|avg| candle.volume as f64 > avg * ratio)
}

/// Body under 10% of the session range.
pub fn doji(candles: &[Candle]) -> Vec<bool> {
    flags(candles, |i| {
        candles[i]
            .body_ratio()
            .is_some_and(|ratio| ratio < DOJI_BODY_RATIO)
    })
}

/// Lower shadow over twice the body, upper shadow shorter than the body.
pub fn hammer(candles: &[Candle]) -> Vec<bool> {
    flags(candles, |i| {
        let c = &candles[i];
        c.range() > 0.0 && c.lower_shadow() > 2.0 * c.body() && c.upper_shadow() < c.body()
    })
}

/// Hammer shape closing below the previous close.
pub fn hanging_man(candles: &[Candle], hammer: &[bool]) -> Vec<bool> {
    flags(candles, |i| {
        i > 0 && hammer[i] && candles[i].close < candles[i - 1].close
    })
}

pub fn bullish_engulfing(candles: &[Candle]) -> Vec<bool> {
    flags(candles, |i| {
        if i == 0 {
            return false;
        }
        let (prev, cur) = (&candles[i - 1], &candles[i]);
        prev.is_bearish() && cur.is_bullish() && cur.open <= prev.close && cur.close >= prev.open
    })
}

pub fn bearish_engulfing(candles: &[Candle]) -> Vec<bool> {
    flags(candles, |i| {
        if i == 0 {
            return false;
        }
        let (prev, cur) = (&candles[i - 1], &candles[i]);
        prev.is_bullish() && cur.is_bearish() && cur.open >= prev.close && cur.close <= prev.open
    })
}

fn small_body(candle: &Candle) -> bool {
    candle
        .body_ratio()
        .is_some_and(|ratio| ratio < STAR_BODY_RATIO)
}

/// Bearish session, small-bodied session, bullish close above the first close.
pub fn morning_star(candles: &[Candle]) -> Vec<bool> {
    flags(candles, |i| {
        i >= 2
            && candles[i - 2].is_bearish()
            && small_body(&candles[i - 1])
            && candles[i].is_bullish()
            && candles[i].close > candles[i - 2].close
    })
}

pub fn evening_star(candles: &[Candle]) -> Vec<bool> {
    flags(candles, |i| {
        i >= 2
            && candles[i - 2].is_bullish()
            && small_body(&candles[i - 1])
            && candles[i].is_bearish()
            && candles[i].close < candles[i - 2].close
    })
}

/// Close above the prior 20-session high on 1.2x average volume.
pub fn resistance_breakout(candles: &[Candle], resistance: &Series, volume_avg: &Series) -> Vec<bool> {
    flags(candles, |i| {
        resistance[i].is_some_and(|level| candles[i].close > level)
            && volume_above(&candles[i], volume_avg[i], BREAKOUT_VOLUME_RATIO)
    })
}

/// Close below the prior 20-session low on 1.2x average volume.
pub fn support_breakdown(candles: &[Candle], support: &Series, volume_avg: &Series) -> Vec<bool> {
    flags(candles, |i| {
        support[i].is_some_and(|level| candles[i].close < level)
            && volume_above(&candles[i], volume_avg[i], BREAKOUT_VOLUME_RATIO)
    })
}

pub fn volume_spike(candles: &[Candle], volume_avg: &Series) -> Vec<bool> {
    flags(candles, |i| {
        volume_above(&candles[i], volume_avg[i], SPIKE_VOLUME_RATIO)
    })
}

pub fn gap_up(candles: &[Candle]) -> Vec<bool> {
    flags(candles, |i| {
        i > 0 && candles[i].low > candles[i - 1].high && candles[i].is_bullish()
    })
}

pub fn gap_down(candles: &[Candle]) -> Vec<bool> {
    flags(candles, |i| {
        i > 0 && candles[i].high < candles[i - 1].low && candles[i].is_bearish()
    })
}

/// Up over five sessions, above SMA10, on above-average volume.
pub fn strong_uptrend(candles: &[Candle], sma10: &Series, volume_avg: &Series) -> Vec<bool> {
    flags(candles, |i| {
        i >= UPTREND_LOOKBACK
            && candles[i].close > candles[i - UPTREND_LOOKBACK].close
            && sma10[i].is_some_and(|sma| candles[i].close > sma)
            && volume_above(&candles[i], volume_avg[i], 1.0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ohlc;

    #[test]
    fn doji_and_flat_sessions() {
        let candles = vec![
            ohlc(0, 100.0, 105.0, 95.0, 100.5, 1_000),
            ohlc(1, 100.0, 100.0, 100.0, 100.0, 1_000),
            ohlc(2, 100.0, 105.0, 95.0, 104.0, 1_000),
        ];
        assert_eq!(doji(&candles), vec![true, false, false]);
    }

    #[test]
    fn hammer_and_hanging_man() {
        let candles = vec![
            ohlc(0, 101.0, 102.0, 100.0, 101.5, 1_000),
            // body 0.5, lower shadow 3, upper shadow 0.2
            ohlc(1, 100.5, 101.2, 97.5, 101.0, 1_000),
        ];
        let hammers = hammer(&candles);
        assert_eq!(hammers, vec![false, true]);
        // close 101.0 < previous close 101.5
        assert_eq!(hanging_man(&candles, &hammers), vec![false, true]);
    }

    #[test]
    fn engulfing_patterns() {
        let bullish = vec![
            ohlc(0, 105.0, 106.0, 99.0, 100.0, 1_000),
            ohlc(1, 99.5, 107.0, 99.0, 106.0, 1_000),
        ];
        assert_eq!(bullish_engulfing(&bullish), vec![false, true]);
        assert_eq!(bearish_engulfing(&bullish), vec![false, false]);

        let bearish = vec![
            ohlc(0, 100.0, 106.0, 99.0, 105.0, 1_000),
            ohlc(1, 105.5, 106.0, 98.0, 99.0, 1_000),
        ];
        assert_eq!(bearish_engulfing(&bearish), vec![false, true]);
    }

    #[test]
    fn morning_and_evening_star() {
        let morning = vec![
            ohlc(0, 110.0, 111.0, 99.0, 100.0, 1_000),
            ohlc(1, 99.0, 101.0, 97.0, 99.5, 1_000),
            ohlc(2, 100.0, 112.0, 99.0, 111.0, 1_000),
        ];
        assert_eq!(morning_star(&morning), vec![false, false, true]);
        assert_eq!(evening_star(&morning), vec![false, false, false]);

        let evening = vec![
            ohlc(0, 100.0, 111.0, 99.0, 110.0, 1_000),
            ohlc(1, 111.0, 113.0, 109.0, 110.5, 1_000),
            ohlc(2, 110.0, 111.0, 98.0, 99.0, 1_000),
        ];
        assert_eq!(evening_star(&evening), vec![false, false, true]);
    }

    #[test]
    fn gaps_need_matching_direction() {
        let candles = vec![
            ohlc(0, 100.0, 101.0, 99.0, 100.0, 1_000),
            ohlc(1, 102.0, 104.0, 101.5, 103.0, 1_000),
            ohlc(2, 100.0, 101.0, 98.0, 99.0, 1_000),
            ohlc(3, 105.0, 106.0, 104.0, 104.5, 1_000),
        ];
        assert_eq!(gap_up(&candles), vec![false, true, false, false]);
        assert_eq!(gap_down(&candles), vec![false, false, true, false]);
    }

    #[test]
    fn level_and_volume_rules_need_defined_inputs() {
        let candles = vec![
            ohlc(0, 100.0, 101.0, 99.0, 100.0, 1_000),
            ohlc(1, 100.0, 111.0, 99.0, 110.0, 3_000),
            ohlc(2, 100.0, 101.0, 89.0, 90.0, 3_000),
        ];
        let resistance = vec![None, Some(105.0), Some(105.0)];
        let support = vec![None, Some(95.0), Some(95.0)];
        let volume_avg = vec![None, Some(1_000.0), Some(2_000.0)];

        assert_eq!(
            resistance_breakout(&candles, &resistance, &volume_avg),
            vec![false, true, false]
        );
        assert_eq!(
            support_breakdown(&candles, &support, &volume_avg),
            vec![false, false, true]
        );
        // 3000 > 2 * 1000 but not > 2 * 2000
        assert_eq!(volume_spike(&candles, &volume_avg), vec![false, true, false]);
    }

    #[test]
    fn strong_uptrend_over_five_sessions() {
        let candles: Vec<Candle> = (0..6)
            .map(|i| {
                let close = 100.0 + i as f64;
                ohlc(i, close - 0.5, close + 1.0, close - 1.0, close, 2_000)
            })
            .collect();
        let sma10 = vec![Some(100.0); 6];
        let volume_avg = vec![Some(1_000.0); 6];
        let flags = strong_uptrend(&candles, &sma10, &volume_avg);
        assert_eq!(flags, vec![false, false, false, false, true, true]);
    }
}
