//! Column-wise technical indicators.
//!
//! Every function takes a full price/volume column and returns a column of the
//! same length. Positions where the indicator is not yet defined (not enough
//! observations) are `None`, and comparisons against `None` are treated as
//! false by the callers.
//!
//! Exponential averages use the recursive (non-adjusted) form seeded with the
//! first observation: `y[0] = x[0]`, `y[t] = (1 - a) * y[t-1] + a * x[t]`, and
//! are reported only once `period` observations have been seen.

/// An indicator column; `None` where the value is undefined.
pub type Series = Vec<Option<f64>>;

/// Exponential moving average with `alpha = 2 / (period + 1)`.
pub fn ema(values: &[f64], period: usize) -> Series {
    ewm(values, 2.0 / (period as f64 + 1.0), period)
}

/// EMA over a column that starts with undefined values; the recursion is
/// seeded at the first defined value.
pub fn ema_of_series(values: &[Option<f64>], period: usize) -> Series {
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut out = vec![None; values.len()];
    let mut state: Option<f64> = None;
    let mut seen = 0usize;

    for (i, value) in values.iter().enumerate() {
        let Some(x) = *value else {
            continue;
        };
        seen += 1;
        let next = match state {
            Some(prev) => (1.0 - alpha) * prev + alpha * x,
            None => x,
        };
        state = Some(next);
        if seen >= period.max(1) {
            out[i] = Some(next);
        }
    }
    out
}

fn ewm(values: &[f64], alpha: f64, min_periods: usize) -> Series {
    let mut out = Vec::with_capacity(values.len());
    let mut state = 0.0;
    for (i, &x) in values.iter().enumerate() {
        state = if i == 0 { x } else { (1.0 - alpha) * state + alpha * x };
        out.push((i + 1 >= min_periods.max(1)).then_some(state));
    }
    out
}

/// Simple moving average over a full window.
pub fn sma(values: &[f64], period: usize) -> Series {
    if period == 0 {
        return vec![None; values.len()];
    }
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, &x) in values.iter().enumerate() {
        sum += x;
        if i >= period {
            sum -= values[i - period];
        }
        out.push((i + 1 >= period).then(|| sum / period as f64));
    }
    out
}

/// Highest value over the last `window` positions, accepting partial windows.
pub fn rolling_max_partial(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            max_of(&values[start..=i])
        })
        .collect()
}

/// Highest value of the `window` positions strictly before each index.
pub fn prior_max(values: &[f64], window: usize) -> Series {
    (0..values.len())
        .map(|i| (window > 0 && i >= window).then(|| max_of(&values[i - window..i])))
        .collect()
}

/// Lowest value of the `window` positions strictly before each index.
pub fn prior_min(values: &[f64], window: usize) -> Series {
    (0..values.len())
        .map(|i| (window > 0 && i >= window).then(|| min_of(&values[i - window..i])))
        .collect()
}

/// Relative strength index with Wilder smoothing (`alpha = 1 / period`).
/// Reads 100 while the average loss is zero.
pub fn rsi(closes: &[f64], period: usize) -> Series {
    let mut gains = Vec::with_capacity(closes.len());
    let mut losses = Vec::with_capacity(closes.len());
    for i in 0..closes.len() {
        let diff = if i == 0 { 0.0 } else { closes[i] - closes[i - 1] };
        gains.push(diff.max(0.0));
        losses.push((-diff).max(0.0));
    }

    let alpha = 1.0 / period.max(1) as f64;
    let avg_gain = ewm(&gains, alpha, period);
    let avg_loss = ewm(&losses, alpha, period);

    avg_gain
        .into_iter()
        .zip(avg_loss)
        .map(|(up, down)| match (up, down) {
            (Some(_), Some(down)) if down == 0.0 => Some(100.0),
            (Some(up), Some(down)) => Some(100.0 - 100.0 / (1.0 + up / down)),
            _ => None,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Macd {
    pub macd: Series,
    pub signal: Series,
}

/// MACD line (fast EMA minus slow EMA) and its signal EMA.
pub fn macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> Macd {
    let fast_ema = ema(closes, fast);
    let slow_ema = ema(closes, slow);
    let line: Series = fast_ema
        .into_iter()
        .zip(slow_ema)
        .map(|(f, s)| Some(f? - s?))
        .collect();
    let signal = ema_of_series(&line, signal);
    Macd { macd: line, signal }
}

pub fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

pub fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

pub fn mean_of(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn ema_is_seeded_with_first_value() {
        let values = [1.0, 2.0, 3.0, 4.0];
        let out = ema(&values, 3);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        // alpha = 0.5: 1 -> 1.5 -> 2.25 -> 3.125
        assert!(approx(out[2].unwrap(), 2.25));
        assert!(approx(out[3].unwrap(), 3.125));
    }

    #[test]
    fn ema_of_constant_is_constant() {
        let values = vec![7.0; 30];
        let out = ema(&values, 10);
        assert!(out[..9].iter().all(Option::is_none));
        assert!(out[9..].iter().all(|v| approx(v.unwrap(), 7.0)));
    }

    #[test]
    fn ema_of_series_skips_leading_gaps() {
        let values = vec![None, None, Some(2.0), Some(4.0), Some(6.0)];
        let out = ema_of_series(&values, 3);
        assert_eq!(&out[..4], &[None, None, None, None]);
        // alpha = 0.5: 2 -> 3 -> 4.5
        assert!(approx(out[4].unwrap(), 4.5));
    }

    #[test]
    fn sma_needs_full_window() {
        let out = sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(out, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn rolling_max_accepts_partial_window() {
        let out = rolling_max_partial(&[3.0, 1.0, 4.0, 1.0, 2.0], 2);
        assert_eq!(out, vec![3.0, 3.0, 4.0, 4.0, 2.0]);
    }

    #[test]
    fn prior_levels_exclude_current_bar() {
        let values = [5.0, 1.0, 9.0, 3.0];
        assert_eq!(prior_max(&values, 2), vec![None, None, Some(5.0), Some(9.0)]);
        assert_eq!(prior_min(&values, 2), vec![None, None, Some(1.0), Some(1.0)]);
    }

    #[test]
    fn rsi_of_rising_series_is_100() {
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let out = rsi(&closes, 14);
        assert!(out[..13].iter().all(Option::is_none));
        assert_eq!(out[13], Some(100.0));
        assert_eq!(out[19], Some(100.0));
    }

    #[test]
    fn rsi_stays_in_bounds() {
        let closes: Vec<f64> = (0..60)
            .map(|i| 100.0 + ((i * 7) % 11) as f64 - 5.0)
            .collect();
        for value in rsi(&closes, 14).into_iter().flatten() {
            assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn macd_signal_starts_after_slow_and_signal_windows() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let out = macd(&closes, 12, 26, 9);
        assert!(out.macd[..25].iter().all(Option::is_none));
        assert!(out.macd[25].is_some());
        assert!(out.signal[..33].iter().all(Option::is_none));
        assert!(out.signal[33].is_some());
    }

    #[test]
    fn round2_rounds_half_away_from_zero() {
        assert_eq!(round2(1.005_000_1), 1.01);
        assert_eq!(round2(-2.345_6), -2.35);
        assert_eq!(round2(3.0), 3.0);
    }

    #[test]
    fn empty_helpers() {
        assert_eq!(mean_of(&[]), None);
        assert_eq!(mean_of(&[1.0, 3.0]), Some(2.0));
        assert_eq!(max_of(&[1.0, 3.0, 2.0]), 3.0);
        assert_eq!(min_of(&[1.0, 3.0, 2.0]), 1.0);
    }
}
