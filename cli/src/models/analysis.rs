//! Serialisable results of the GTI pipeline.
//!
//! Field names follow the JSON contract of the HTTP API, which is why a few
//! of them are renamed (`EMA10`, the Vietnamese keys of [`BasicAnalysis`]).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trade signal derived from the 0-4 GTI score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GtiSignal {
    Buy,
    Hold,
    Avoid,
}

impl GtiSignal {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 3 => GtiSignal::Buy,
            s if s <= 1 => GtiSignal::Avoid,
            _ => GtiSignal::Hold,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GtiSignal::Buy => "BUY",
            GtiSignal::Hold => "HOLD",
            GtiSignal::Avoid => "AVOID",
        }
    }
}

impl fmt::Display for GtiSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GtiCriteria {
    pub trend_check: bool,
    pub recent_breakout: bool,
    pub near_one_year_high: bool,
    pub is_pullback: bool,
}

impl GtiCriteria {
    pub fn score(&self) -> u8 {
        [
            self.trend_check,
            self.recent_breakout,
            self.near_one_year_high,
            self.is_pullback,
        ]
        .iter()
        .filter(|&&hit| hit)
        .count() as u8
    }
}

/// Latest-session GTI view returned by the basic analysis endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicAnalysis {
    #[serde(rename = "ma_co_phieu")]
    pub symbol: String,
    #[serde(rename = "ngay_cap_nhat")]
    pub date: NaiveDate,
    #[serde(rename = "gia_dong_cua")]
    pub close: f64,
    #[serde(rename = "gia_cao_nhat")]
    pub high: f64,
    #[serde(rename = "gia_thap_nhat")]
    pub low: f64,
    #[serde(rename = "khoi_luong")]
    pub volume: u64,
    #[serde(rename = "EMA10")]
    pub ema10: Option<f64>,
    #[serde(rename = "EMA20")]
    pub ema20: Option<f64>,
    #[serde(rename = "EMA50")]
    pub ema50: Option<f64>,
    #[serde(rename = "EMA200")]
    pub ema200: Option<f64>,
    #[serde(rename = "RSI")]
    pub rsi: Option<f64>,
    #[serde(rename = "MACD")]
    pub macd: Option<f64>,
    #[serde(rename = "MACD_signal")]
    pub macd_signal: Option<f64>,
    #[serde(rename = "SMA_20")]
    pub sma20: Option<f64>,
    pub gti_trend_check: bool,
    pub gti_recent_breakout: bool,
    pub gti_dist_to_high_percent: Option<f64>,
    pub gti_is_pullback: bool,
    pub gti_score: u8,
    pub gti_signal: GtiSignal,
    #[serde(rename = "he_thong")]
    pub system: String,
    #[serde(rename = "phien_ban")]
    pub version: String,
    #[serde(rename = "ghi_chu")]
    pub note: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketTrend {
    #[serde(rename = "UPTREND")]
    Uptrend,
    #[serde(rename = "SIDEWAY/DOWNTREND")]
    SidewayOrDowntrend,
}

impl fmt::Display for MarketTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketTrend::Uptrend => f.write_str("UPTREND"),
            MarketTrend::SidewayOrDowntrend => f.write_str("SIDEWAY/DOWNTREND"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub current_price: f64,
    pub gti_score: u8,
    pub trend: MarketTrend,
    pub trend_check: bool,
    pub recent_breakout: bool,
    pub near_high: bool,
    pub dist_to_high: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GtiEffectiveness {
    pub current_market: MarketTrend,
    pub effectiveness_rate: String,
    pub recommendation: String,
    pub max_position_size: String,
}

/// VNINDEX backdrop. A failed lookup is reported inline, not as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MarketContext {
    Success {
        vnindex: IndexSnapshot,
        gti_effectiveness: GtiEffectiveness,
        analysis_note: String,
    },
    Error {
        message: String,
    },
}

impl MarketContext {
    pub fn index_score(&self) -> Option<u8> {
        match self {
            MarketContext::Success { vnindex, .. } => Some(vnindex.gti_score),
            MarketContext::Error { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectorTrend {
    #[serde(rename = "TÍCH CỰC")]
    Positive,
    #[serde(rename = "TIÊU CỰC")]
    Negative,
}

impl fmt::Display for SectorTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectorTrend::Positive => f.write_str("TÍCH CỰC"),
            SectorTrend::Negative => f.write_str("TIÊU CỰC"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectorAnalysis {
    Success {
        sector_name: String,
        representative_stock: String,
        sector_gti_score: u8,
        sector_trend: SectorTrend,
        sector_price: f64,
        analysis_note: String,
    },
    UnknownSector {
        message: String,
    },
    Error {
        message: String,
    },
}

impl SectorAnalysis {
    /// Sector name, only when the representative stock was analysed.
    pub fn sector_name(&self) -> Option<&str> {
        match self {
            SectorAnalysis::Success { sector_name, .. } => Some(sector_name),
            _ => None,
        }
    }

    pub fn trend(&self) -> Option<SectorTrend> {
        match self {
            SectorAnalysis::Success { sector_trend, .. } => Some(*sector_trend),
            _ => None,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            SectorAnalysis::Success { .. } => "success",
            SectorAnalysis::UnknownSector { .. } => "unknown_sector",
            SectorAnalysis::Error { .. } => "error",
        }
    }
}

/// Search guidance handed to an LLM assistant alongside the numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsSearchContext {
    pub search_instruction: String,
    pub suggested_searches: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorInfo {
    pub sector_name: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsContextReport {
    pub stock_symbol: String,
    pub sector_info: SectorInfo,
    pub news_search_context: NewsSearchContext,
    pub important_note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GtiAnalysis {
    pub gti_score: u8,
    pub gti_criteria: GtiCriteria,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternCount {
    pub pattern: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternAnalysis {
    pub basic_bullish_score: u32,
    pub basic_bearish_score: u32,
    pub large_patterns_score: u32,
    pub current_patterns: Vec<String>,
    pub recent_patterns: Vec<PatternCount>,
    pub pattern_summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub level: String,
    pub action: String,
    pub emoji: String,
    pub position_size: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedAnalysis {
    pub base_score: i32,
    pub market_adjustment: f64,
    pub sector_adjustment: f64,
    pub total_score: f64,
    pub final_recommendation: Recommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalLevels {
    pub support_level: Option<f64>,
    pub resistance_level: Option<f64>,
    #[serde(rename = "EMA10")]
    pub ema10: Option<f64>,
    #[serde(rename = "EMA20")]
    pub ema20: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub version: String,
    pub scoring_range: String,
    pub enhanced_features: Vec<String>,
}

/// Everything `/full-analysis/{symbol}` reports for one stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullAnalysis {
    pub status: String,
    pub analysis_date: NaiveDate,
    pub stock_symbol: String,
    pub closing_price: f64,
    pub gti_analysis: GtiAnalysis,
    pub pattern_analysis: PatternAnalysis,
    pub market_context: MarketContext,
    pub sector_analysis: SectorAnalysis,
    pub combined_analysis: CombinedAnalysis,
    pub news_search_context: NewsSearchContext,
    pub technical_levels: TechnicalLevels,
    pub system_info: SystemInfo,
}
