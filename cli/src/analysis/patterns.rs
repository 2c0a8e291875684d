use crate::analysis::{candlestick, chart_patterns};
use crate::models::{Candle, PatternAnalysis, PatternCount, SeriesColumns};
use crate::utils::indicators::{self, Series};
use serde::{Deserialize, Serialize};

/// Sessions inspected when counting recent pattern occurrences.
pub const RECENT_SESSIONS: usize = 10;
/// Score weight of a large chart pattern.
pub const LARGE_PATTERN_POINTS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Doji,
    Hammer,
    HangingMan,
    BullishEngulfing,
    BearishEngulfing,
    MorningStar,
    EveningStar,
    ResistanceBreakout,
    SupportBreakdown,
    VolumeSpike,
    GapUp,
    GapDown,
    StrongUptrend,
    CupHandle,
    BullFlag,
    BaseNBreak,
    AscendingTriangle,
}

impl Pattern {
    pub const ALL: [Pattern; 17] = [
        Pattern::Doji,
        Pattern::Hammer,
        Pattern::HangingMan,
        Pattern::BullishEngulfing,
        Pattern::BearishEngulfing,
        Pattern::MorningStar,
        Pattern::EveningStar,
        Pattern::ResistanceBreakout,
        Pattern::SupportBreakdown,
        Pattern::VolumeSpike,
        Pattern::GapUp,
        Pattern::GapDown,
        Pattern::StrongUptrend,
        Pattern::CupHandle,
        Pattern::BullFlag,
        Pattern::BaseNBreak,
        Pattern::AscendingTriangle,
    ];

    pub const BASIC_BULLISH: [Pattern; 6] = [
        Pattern::BullishEngulfing,
        Pattern::MorningStar,
        Pattern::Hammer,
        Pattern::ResistanceBreakout,
        Pattern::GapUp,
        Pattern::StrongUptrend,
    ];

    pub const BASIC_BEARISH: [Pattern; 5] = [
        Pattern::BearishEngulfing,
        Pattern::EveningStar,
        Pattern::HangingMan,
        Pattern::SupportBreakdown,
        Pattern::GapDown,
    ];

    pub const NEUTRAL: [Pattern; 2] = [Pattern::Doji, Pattern::VolumeSpike];

    pub const LARGE: [Pattern; 4] = [
        Pattern::CupHandle,
        Pattern::BullFlag,
        Pattern::BaseNBreak,
        Pattern::AscendingTriangle,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn key(self) -> &'static str {
        match self {
            Pattern::Doji => "doji",
            Pattern::Hammer => "hammer",
            Pattern::HangingMan => "hanging_man",
            Pattern::BullishEngulfing => "bullish_engulfing",
            Pattern::BearishEngulfing => "bearish_engulfing",
            Pattern::MorningStar => "morning_star",
            Pattern::EveningStar => "evening_star",
            Pattern::ResistanceBreakout => "resistance_breakout",
            Pattern::SupportBreakdown => "support_breakdown",
            Pattern::VolumeSpike => "volume_spike",
            Pattern::GapUp => "gap_up",
            Pattern::GapDown => "gap_down",
            Pattern::StrongUptrend => "strong_uptrend",
            Pattern::CupHandle => "cup_handle",
            Pattern::BullFlag => "bull_flag",
            Pattern::BaseNBreak => "base_n_break",
            Pattern::AscendingTriangle => "ascending_triangle",
        }
    }

    /// Title-cased key, e.g. `base_n_break` -> `Base N Break`.
    pub fn display_name(self) -> String {
        self.key()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_large(self) -> bool {
        Pattern::LARGE.contains(&self)
    }
}

/// Pattern flags for every session of a series, plus the rolling
/// support/resistance levels the breakout rules use.
#[derive(Debug, Clone)]
pub struct PatternFrame {
    flags: Vec<Vec<bool>>,
    len: usize,
    pub support_level: Series,
    pub resistance_level: Series,
}

impl PatternFrame {
    pub fn detect(candles: &[Candle]) -> Self {
        let columns = SeriesColumns::from_candles(candles);
        let volume_avg = indicators::sma(&columns.volume, 20);
        let sma10 = indicators::sma(&columns.close, 10);
        let resistance_level = indicators::prior_max(&columns.high, candlestick::LEVEL_WINDOW);
        let support_level = indicators::prior_min(&columns.low, candlestick::LEVEL_WINDOW);

        let hammer = candlestick::hammer(candles);
        let mut flags = vec![Vec::new(); Pattern::ALL.len()];
        flags[Pattern::Doji.index()] = candlestick::doji(candles);
        flags[Pattern::HangingMan.index()] = candlestick::hanging_man(candles, &hammer);
        flags[Pattern::Hammer.index()] = hammer;
        flags[Pattern::BullishEngulfing.index()] = candlestick::bullish_engulfing(candles);
        flags[Pattern::BearishEngulfing.index()] = candlestick::bearish_engulfing(candles);
        flags[Pattern::MorningStar.index()] = candlestick::morning_star(candles);
        flags[Pattern::EveningStar.index()] = candlestick::evening_star(candles);
        flags[Pattern::ResistanceBreakout.index()] =
            candlestick::resistance_breakout(candles, &resistance_level, &volume_avg);
        flags[Pattern::SupportBreakdown.index()] =
            candlestick::support_breakdown(candles, &support_level, &volume_avg);
        flags[Pattern::VolumeSpike.index()] = candlestick::volume_spike(candles, &volume_avg);
        flags[Pattern::GapUp.index()] = candlestick::gap_up(candles);
        flags[Pattern::GapDown.index()] = candlestick::gap_down(candles);
        flags[Pattern::StrongUptrend.index()] =
            candlestick::strong_uptrend(candles, &sma10, &volume_avg);
        flags[Pattern::CupHandle.index()] = chart_patterns::cup_handle(&columns);
        flags[Pattern::BullFlag.index()] = chart_patterns::bull_flag(&columns);
        flags[Pattern::BaseNBreak.index()] = chart_patterns::base_n_break(&columns);
        flags[Pattern::AscendingTriangle.index()] = chart_patterns::ascending_triangle(&columns);

        Self {
            flags,
            len: candles.len(),
            support_level,
            resistance_level,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_active(&self, pattern: Pattern, i: usize) -> bool {
        self.flags[pattern.index()].get(i).copied().unwrap_or(false)
    }

    /// Patterns present on session `i`, in catalogue order.
    pub fn active_at(&self, i: usize) -> Vec<Pattern> {
        Pattern::ALL
            .into_iter()
            .filter(|&p| self.is_active(p, i))
            .collect()
    }

    /// Occurrences of `pattern` over the last `sessions` sessions.
    pub fn count_recent(&self, pattern: Pattern, sessions: usize) -> usize {
        let start = self.len.saturating_sub(sessions);
        self.flags[pattern.index()][start..]
            .iter()
            .filter(|&&hit| hit)
            .count()
    }

    /// Scores and pattern lists for the latest session.
    pub fn summary(&self) -> PatternSummary {
        let Some(latest) = self.len.checked_sub(1) else {
            return PatternSummary::default();
        };
        let count = |set: &[Pattern]| set.iter().filter(|&&p| self.is_active(p, latest)).count() as u32;

        PatternSummary {
            basic_bullish: count(&Pattern::BASIC_BULLISH[..]),
            basic_bearish: count(&Pattern::BASIC_BEARISH[..]),
            large_score: count(&Pattern::LARGE[..]) * LARGE_PATTERN_POINTS,
            current: self.active_at(latest),
            recent: Pattern::ALL
                .into_iter()
                .map(|p| (p, self.count_recent(p, RECENT_SESSIONS)))
                .filter(|&(_, n)| n > 0)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternSummary {
    pub basic_bullish: u32,
    pub basic_bearish: u32,
    pub large_score: u32,
    pub current: Vec<Pattern>,
    pub recent: Vec<(Pattern, usize)>,
}

impl PatternSummary {
    pub fn to_analysis(&self) -> PatternAnalysis {
        PatternAnalysis {
            basic_bullish_score: self.basic_bullish,
            basic_bearish_score: self.basic_bearish,
            large_patterns_score: self.large_score,
            current_patterns: self.current.iter().map(|p| p.display_name()).collect(),
            recent_patterns: self
                .recent
                .iter()
                .map(|&(p, count)| PatternCount {
                    pattern: p.display_name(),
                    count,
                })
                .collect(),
            pattern_summary: format!(
                "{}B/{}Be + {}L",
                self.basic_bullish,
                self.basic_bearish,
                self.large_score / LARGE_PATTERN_POINTS
            ),
        }
    }
}
