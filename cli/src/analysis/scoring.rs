//! Combined score: GTI + patterns, nudged by the market and sector backdrop.
//!
//! ```text
//! base  = gti (0..4) + basic bullish - basic bearish + large patterns
//! total = base + market (+0.5 | 0 | -0.5) + sector (+0.25 | 0 | -0.25)
//! ```

use crate::analysis::patterns::PatternSummary;
use crate::models::{CombinedAnalysis, MarketContext, Recommendation, SectorAnalysis, SectorTrend};
use crate::utils::indicators::round2;

pub const MARKET_ADJUSTMENT: f64 = 0.5;
pub const SECTOR_ADJUSTMENT: f64 = 0.25;

pub fn base_score(gti_score: u8, patterns: &PatternSummary) -> i32 {
    i32::from(gti_score) + patterns.basic_bullish as i32 - patterns.basic_bearish as i32
        + patterns.large_score as i32
}

/// +0.5 when VNINDEX scores 3 or more, -0.5 at 1 or less, 0 otherwise or
/// when the index could not be analysed.
pub fn market_adjustment(market: &MarketContext) -> f64 {
    match market.index_score() {
        Some(score) if score >= 3 => MARKET_ADJUSTMENT,
        Some(score) if score <= 1 => -MARKET_ADJUSTMENT,
        _ => 0.0,
    }
}

pub fn sector_adjustment(sector: &SectorAnalysis) -> f64 {
    match sector.trend() {
        Some(SectorTrend::Positive) => SECTOR_ADJUSTMENT,
        Some(SectorTrend::Negative) => -SECTOR_ADJUSTMENT,
        None => 0.0,
    }
}

pub fn recommendation(total_score: f64) -> Recommendation {
    let (level, action, emoji, position_size, message) = if total_score >= 6.0 {
        (
            "CỰC KỲ TÍCH CỰC",
            "STRONG BUY",
            "🟢",
            "8-12% NAV",
            "Cơ hội đầu tư xuất sắc với điểm số cao",
        )
    } else if total_score >= 4.0 {
        (
            "RẤT TÍCH CỰC",
            "CÂN NHẮC MUA",
            "🟢",
            "5-8% NAV",
            "Cơ hội tốt, cân nhắc mua vào",
        )
    } else if total_score >= 2.0 {
        (
            "TÍCH CỰC",
            "THEO DÕI",
            "🟡",
            "3-5% NAV",
            "Theo dõi và chờ tín hiệu rõ hơn",
        )
    } else if total_score >= 0.0 {
        (
            "TRUNG TÍNH",
            "CHỜ TÍN HIỆU",
            "🟠",
            "0-3% NAV",
            "Chưa có tín hiệu rõ ràng, chờ đợi",
        )
    } else {
        (
            "TIÊU CỰC",
            "TRÁNH XA",
            "🔴",
            "0% NAV",
            "Tránh xa hoặc chờ cải thiện",
        )
    };

    Recommendation {
        level: level.to_string(),
        action: action.to_string(),
        emoji: emoji.to_string(),
        position_size: position_size.to_string(),
        message: message.to_string(),
    }
}

pub fn combine(
    gti_score: u8,
    patterns: &PatternSummary,
    market: &MarketContext,
    sector: &SectorAnalysis,
) -> CombinedAnalysis {
    let base = base_score(gti_score, patterns);
    let market_adjustment = market_adjustment(market);
    let sector_adjustment = sector_adjustment(sector);
    let total_score = round2(f64::from(base) + market_adjustment + sector_adjustment);

    CombinedAnalysis {
        base_score: base,
        market_adjustment,
        sector_adjustment,
        total_score,
        final_recommendation: recommendation(total_score),
    }
}
