//! Multi-week chart patterns (cup & handle, bull flag, base n' break,
//! ascending triangle).
//!
//! Each window is evaluated independently, so the scans run on the rayon
//! pool. Bull flag, base n' break and ascending triangle only look at bars
//! before the flagged session, which lets them fire on the latest bar. The
//! cup & handle check needs the ten sessions that form the handle, so it
//! never flags the last ten bars.

use crate::models::SeriesColumns;
use crate::utils::indicators::{max_of, mean_of, min_of};
use rayon::prelude::*;

pub const CUP_WINDOW: usize = 50;
pub const HANDLE_LEN: usize = 10;
pub const CUP_DEPTH_MIN: f64 = 0.12;
pub const CUP_DEPTH_MAX: f64 = 0.33;

pub const FLAG_WINDOW: usize = 30;
pub const FLAG_LEN: usize = 10;
pub const FLAGPOLE_MIN_GAIN: f64 = 0.15;
pub const FLAG_SLOPE_MIN: f64 = -0.08;
pub const FLAG_SLOPE_MAX: f64 = 0.03;
pub const FLAG_MAX_RANGE: f64 = 0.15;

pub const BASE_WINDOW: usize = 40;
pub const BASE_MAX_RANGE: f64 = 0.20;
pub const BASE_BREAKOUT_VOLUME: f64 = 1.5;

pub const TRIANGLE_WINDOW: usize = 30;
pub const TRIANGLE_TOUCH_TOLERANCE: f64 = 0.99;
pub const TRIANGLE_MIN_TOUCHES: usize = 2;
pub const TRIANGLE_BREAKOUT_VOLUME: f64 = 1.3;

fn scan(len: usize, candidates: std::ops::Range<usize>, hit: impl Fn(usize) -> bool + Sync) -> Vec<bool> {
    let mut flags = vec![false; len];
    if candidates.is_empty() {
        return flags;
    }
    let hits: Vec<usize> = candidates.into_par_iter().filter(|&i| hit(i)).collect();
    for i in hits {
        flags[i] = true;
    }
    flags
}

pub fn cup_handle(columns: &SeriesColumns) -> Vec<bool> {
    let n = columns.len();
    let end = n.saturating_sub(HANDLE_LEN);
    scan(n, CUP_WINDOW..end.max(CUP_WINDOW), |i| is_cup_handle(columns, i))
}

fn is_cup_handle(columns: &SeriesColumns, i: usize) -> bool {
    let window = i - CUP_WINDOW..i + HANDLE_LEN;
    let left_peak = max_of(&columns.high[window.clone()]);
    if left_peak <= 0.0 {
        return false;
    }
    let depth = (left_peak - min_of(&columns.low[window])) / left_peak;
    if !(CUP_DEPTH_MIN..=CUP_DEPTH_MAX).contains(&depth) {
        return false;
    }

    let handle = i..i + HANDLE_LEN;
    let handle_high = max_of(&columns.high[handle.clone()]);
    if handle_high <= 0.0 {
        return false;
    }
    let handle_depth = (handle_high - min_of(&columns.low[handle])) / handle_high;
    handle_depth < depth * 0.5
}

/// Scans through the latest bar. Pole and flag both end before `i`.
pub fn bull_flag(columns: &SeriesColumns) -> Vec<bool> {
    let n = columns.len();
    scan(n, FLAG_WINDOW..n.max(FLAG_WINDOW), |i| is_bull_flag(columns, i))
}

fn is_bull_flag(columns: &SeriesColumns, i: usize) -> bool {
    let pole = i - FLAG_WINDOW..i - FLAG_LEN;
    let flag = i - FLAG_LEN..i;

    let pole_close = &columns.close[pole.clone()];
    let (pole_first, pole_last) = (pole_close[0], pole_close[pole_close.len() - 1]);
    if pole_first <= 0.0 || (pole_last - pole_first) / pole_first <= FLAGPOLE_MIN_GAIN {
        return false;
    }

    let flag_close = &columns.close[flag.clone()];
    let (flag_first, flag_last) = (flag_close[0], flag_close[flag_close.len() - 1]);
    if flag_first <= 0.0 {
        return false;
    }
    // per-session drift as a fraction of the first flag close, not an
    // absolute price change
    let slope = (flag_last - flag_first) / flag_close.len() as f64 / flag_first;
    if !(FLAG_SLOPE_MIN..=FLAG_SLOPE_MAX).contains(&slope) {
        return false;
    }

    let Some(flag_mean_close) = mean_of(flag_close) else {
        return false;
    };
    let flag_range = (max_of(&columns.high[flag.clone()]) - min_of(&columns.low[flag.clone()])) / flag_mean_close;
    if flag_range >= FLAG_MAX_RANGE {
        return false;
    }

    let flag_volume = &columns.volume[flag];
    let pole_volume = &columns.volume[pole];
    match (
        mean_of(&flag_volume[flag_volume.len() - 3..]),
        mean_of(&pole_volume[pole_volume.len() - 3..]),
    ) {
        (Some(flag_tail), Some(pole_tail)) => flag_tail < pole_tail,
        _ => false,
    }
}

/// Scans through the latest bar. The base is the 40 sessions before `i`.
pub fn base_n_break(columns: &SeriesColumns) -> Vec<bool> {
    let n = columns.len();
    scan(n, BASE_WINDOW..n.max(BASE_WINDOW), |i| is_base_n_break(columns, i))
}

fn volatility(columns: &SeriesColumns, range: std::ops::Range<usize>) -> Option<f64> {
    let spreads: Vec<f64> = range.clone().map(|j| columns.high[j] - columns.low[j]).collect();
    let mean_close = mean_of(&columns.close[range])?;
    (mean_close > 0.0).then(|| mean_of(&spreads).unwrap_or(0.0) / mean_close)
}

fn is_base_n_break(columns: &SeriesColumns, i: usize) -> bool {
    let base = i - BASE_WINDOW..i;
    let Some(mean_close) = mean_of(&columns.close[base.clone()]) else {
        return false;
    };
    if mean_close <= 0.0 {
        return false;
    }
    let base_high = max_of(&columns.high[base.clone()]);
    let base_range = (base_high - min_of(&columns.low[base.clone()])) / mean_close;
    if base_range >= BASE_MAX_RANGE {
        return false;
    }

    let mid = base.start + BASE_WINDOW / 2;
    match (volatility(columns, base.start..mid), volatility(columns, mid..base.end)) {
        (Some(early), Some(late)) if late < early => {}
        _ => return false,
    }

    let Some(avg_volume) = mean_of(&columns.volume[base]) else {
        return false;
    };
    columns.close[i] > base_high && columns.volume[i] > avg_volume * BASE_BREAKOUT_VOLUME
}

/// Scans through the latest bar. Touches and lows are taken from the 30
/// sessions before `i`.
pub fn ascending_triangle(columns: &SeriesColumns) -> Vec<bool> {
    let n = columns.len();
    scan(n, TRIANGLE_WINDOW..n.max(TRIANGLE_WINDOW), |i| {
        is_ascending_triangle(columns, i)
    })
}

fn is_ascending_triangle(columns: &SeriesColumns, i: usize) -> bool {
    let triangle = i - TRIANGLE_WINDOW..i;
    let highs = &columns.high[triangle.clone()];
    let lows = &columns.low[triangle.clone()];

    let resistance = max_of(highs);
    let touches = highs
        .iter()
        .filter(|&&h| h >= resistance * TRIANGLE_TOUCH_TOLERANCE)
        .count();

    let quarter = lows.len() / 4;
    let tail = lows.len().div_ceil(4);
    let first_quarter_low = min_of(&lows[..quarter]);
    let last_quarter_low = min_of(&lows[lows.len() - tail..]);

    if touches < TRIANGLE_MIN_TOUCHES || last_quarter_low <= first_quarter_low {
        return false;
    }

    let Some(avg_volume) = mean_of(&columns.volume[triangle]) else {
        return false;
    };
    columns.close[i] > resistance && columns.volume[i] > avg_volume * TRIANGLE_BREAKOUT_VOLUME
}
