//! Market (VNINDEX) and sector backdrop for a single-stock analysis.

use crate::analysis::gti::GtiFrame;
use crate::models::{
    Candle, GtiEffectiveness, IndexSnapshot, MarketContext, MarketTrend, SectorAnalysis,
    SectorTrend,
};
use crate::services::SourceError;
use crate::utils::indicators::round2;

pub const MARKET_INDEX: &str = "VNINDEX";

/// Ticker -> (sector, representative ticker) for the VN30 names we cover.
const SECTOR_MAP: &[(&str, &str, &str)] = &[
    ("ACB", "Ngân hàng", "VCB"),
    ("BID", "Ngân hàng", "VCB"),
    ("CTG", "Ngân hàng", "VCB"),
    ("HDB", "Ngân hàng", "VCB"),
    ("MBB", "Ngân hàng", "VCB"),
    ("STB", "Ngân hàng", "VCB"),
    ("TCB", "Ngân hàng", "VCB"),
    ("TPB", "Ngân hàng", "VCB"),
    ("VCB", "Ngân hàng", "VCB"),
    ("VPB", "Ngân hàng", "VCB"),
    ("VIB", "Ngân hàng", "VCB"),
    ("VHM", "Bất động sản", "VIC"),
    ("VIC", "Bất động sản", "VIC"),
    ("VRE", "Bất động sản", "VIC"),
    ("FPT", "Công nghệ", "FPT"),
    ("HPG", "Thép", "HPG"),
    ("MWG", "Bán lẻ", "MWG"),
    ("GAS", "Dầu khí", "GAS"),
    ("PLX", "Dầu khí", "GAS"),
    ("VNM", "Thực phẩm", "VNM"),
    ("MSN", "Thực phẩm", "VNM"),
    ("SAB", "Thực phẩm", "VNM"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorEntry {
    pub sector: &'static str,
    pub representative: &'static str,
}

pub fn sector_for(symbol: &str) -> Option<SectorEntry> {
    let symbol = symbol.trim().to_uppercase();
    SECTOR_MAP
        .iter()
        .find(|(ticker, _, _)| *ticker == symbol)
        .map(|&(_, sector, representative)| SectorEntry {
            sector,
            representative,
        })
}

pub fn unknown_sector(symbol: &str) -> SectorAnalysis {
    SectorAnalysis::UnknownSector {
        message: format!("Chưa có thông tin ngành cho {symbol}"),
    }
}

/// Market context from VNINDEX candles.
pub fn market_context_from(candles: &[Candle]) -> MarketContext {
    let Some(latest) = GtiFrame::compute(candles).latest() else {
        return market_context_error(&SourceError::NoData(MARKET_INDEX.to_string()));
    };

    let trend = if latest.criteria.trend_check {
        MarketTrend::Uptrend
    } else {
        MarketTrend::SidewayOrDowntrend
    };
    let score = latest.score;

    let (effectiveness, recommendation, max_position) = if trend == MarketTrend::Uptrend && score >= 3 {
        ("CAO (70-80%)", "Thích hợp cho chiến lược tích cực", "8-10% NAV per stock")
    } else if score >= 2 {
        ("TRUNG BÌNH (50-60%)", "Giảm tỷ trọng, chọn lọc kỹ", "5-7% NAV per stock")
    } else {
        ("THẤP (<50%)", "Tránh xa hoặc trade với điểm ≥5", "3-5% NAV per stock")
    };

    MarketContext::Success {
        vnindex: IndexSnapshot {
            current_price: round2(latest.close),
            gti_score: score,
            trend,
            trend_check: latest.criteria.trend_check,
            recent_breakout: latest.criteria.recent_breakout,
            near_high: latest.criteria.near_one_year_high,
            dist_to_high: round2(latest.dist_to_high_percent),
        },
        gti_effectiveness: GtiEffectiveness {
            current_market: trend,
            effectiveness_rate: effectiveness.to_string(),
            recommendation: recommendation.to_string(),
            max_position_size: max_position.to_string(),
        },
        analysis_note: format!(
            "VNINDEX đang ở giai đoạn {trend} với GTI score {score}/4. Độ chính xác hệ thống GTI ước tính: {effectiveness}."
        ),
    }
}

pub fn market_context_error(error: &SourceError) -> MarketContext {
    let message = match error {
        SourceError::NoData(_) => format!("Không thể lấy dữ liệu {MARKET_INDEX}"),
        other => format!("Lỗi phân tích thị trường: {other}"),
    };
    MarketContext::Error { message }
}

/// Sector analysis from the representative stock's candles.
pub fn sector_analysis_from(entry: SectorEntry, candles: &[Candle]) -> SectorAnalysis {
    let Some(latest) = GtiFrame::compute(candles).latest() else {
        return sector_analysis_error(entry, &SourceError::NoData(entry.representative.to_string()));
    };

    let trend = if latest.criteria.trend_check {
        SectorTrend::Positive
    } else {
        SectorTrend::Negative
    };

    SectorAnalysis::Success {
        sector_name: entry.sector.to_string(),
        representative_stock: entry.representative.to_string(),
        sector_gti_score: latest.score,
        sector_trend: trend,
        sector_price: round2(latest.close),
        analysis_note: format!(
            "Ngành {} (đại diện: {}) có GTI score {}/4, xu hướng {}.",
            entry.sector, entry.representative, latest.score, trend
        ),
    }
}

pub fn sector_analysis_error(entry: SectorEntry, error: &SourceError) -> SectorAnalysis {
    let message = match error {
        SourceError::NoData(_) => format!("Không thể lấy dữ liệu ngành {}", entry.sector),
        other => format!("Lỗi phân tích ngành: {other}"),
    };
    SectorAnalysis::Error { message }
}
