//! Static descriptions of the GTI system and the pattern catalogue.

use crate::analysis::patterns::{Pattern, LARGE_PATTERN_POINTS};
use serde_json::{json, Value};

pub const SYSTEM_NAME: &str = "GTI - Growth Trading Intelligence";
pub const ANALYSIS_VERSION: &str = "GTI Pro v2.0";
pub const SCORING_RANGE: &str = "-5 to +18 points";

pub fn gti_info() -> Value {
    json!({
        "ten_he_thong": SYSTEM_NAME,
        "muc_tieu": {
            "thoi_gian_nam_giu": "Tối đa 1 tháng",
            "sinh_loi_muc_tieu": "10-25%",
            "cat_lo": "5-8%"
        },
        "tieu_chi_loc": [
            "✅ Xu hướng kỹ thuật: EMA10 > EMA20 và giá nằm trên cả EMA10 & EMA20",
            "✅ Volume & breakout: Có ít nhất 1 phiên breakout với volume > 1.5x TB20",
            "✅ Vị trí giá: Ưu tiên cổ phiếu tiệm cận đỉnh 1 năm (< 15%)",
            "✅ Pullback đúng chuẩn: Sau breakout, pullback về EMA10 hoặc EMA20"
        ],
        "bang_diem_gti": {
            "4_diem": "🟢 RẤT TÍCH CỰC - BUY signal",
            "3_diem": "🟡 TÍCH CỰC - Theo dõi",
            "2_diem": "🟠 TRUNG TÍNH - HOLD",
            "0-1_diem": "🔴 TIÊU CỰC - AVOID"
        },
        "chi_so_tra_ve": {
            "gti_trend_check": "Kiểm tra xu hướng GTI (True/False)",
            "gti_recent_breakout": "Có breakout gần đây không (True/False)",
            "gti_dist_to_high_percent": "Khoảng cách đến đỉnh 1 năm (%)",
            "gti_is_pullback": "Đang pullback về EMA10/20 không (True/False)",
            "gti_score": "Điểm tổng GTI (0-4)",
            "gti_signal": "Tín hiệu GTI (BUY/HOLD/AVOID)"
        }
    })
}

fn keys(patterns: &[Pattern]) -> Vec<&'static str> {
    patterns.iter().map(|p| p.key()).collect()
}

pub fn patterns_info() -> Value {
    let basic_count = Pattern::ALL.len() - Pattern::LARGE.len();
    json!({
        "title": format!("🎯 {} Chart Patterns Detection", Pattern::ALL.len()),
        "version": "Enhanced v2.0",
        "basic_patterns": {
            "candlestick_patterns": [
                {"name": "Doji", "description": "Nến doji - biểu hiện sự do dự của thị trường", "points": 0},
                {"name": "Hammer", "description": "Nến búa - tín hiệu đảo chiều tăng", "points": "+1"},
                {"name": "Hanging Man", "description": "Nến treo cổ - tín hiệu đảo chiều giảm", "points": "-1"}
            ],
            "engulfing_patterns": [
                {"name": "Bullish Engulfing", "description": "Nến bao phủ tăng - tín hiệu mạnh", "points": "+1"},
                {"name": "Bearish Engulfing", "description": "Nến bao phủ giảm - tín hiệu yếu", "points": "-1"}
            ],
            "star_patterns": [
                {"name": "Morning Star", "description": "Sao mai - 3 nến đảo chiều tăng", "points": "+1"},
                {"name": "Evening Star", "description": "Sao hôm - 3 nến đảo chiều giảm", "points": "-1"}
            ],
            "breakout_patterns": [
                {"name": "Resistance Breakout", "description": "Vượt kháng cự với volume cao", "points": "+1"},
                {"name": "Support Breakdown", "description": "Thủng hỗ trợ với volume cao", "points": "-1"}
            ],
            "volume_patterns": [
                {"name": "Volume Spike", "description": "Khối lượng bất thường > 2x trung bình", "points": 0}
            ],
            "gap_patterns": [
                {"name": "Gap Up", "description": "Gap tăng với momentum", "points": "+1"},
                {"name": "Gap Down", "description": "Gap giảm với momentum", "points": "-1"}
            ],
            "trend_patterns": [
                {"name": "Strong Uptrend", "description": "Xu hướng tăng mạnh 5 ngày", "points": "+1"}
            ]
        },
        "large_patterns": {
            "description": format!("Large chart patterns (worth {LARGE_PATTERN_POINTS} points each)"),
            "patterns": [
                {"name": "Cup & Handle", "description": "Cup & Handle - mẫu hình chứa sâu + tay cầm", "points": "+2"},
                {"name": "Bull Flag", "description": "Bull Flag - cột cờ + consolidation", "points": "+2"},
                {"name": "Base n' Break", "description": "Base n' Break - tích lũy + breakout", "points": "+2"},
                {"name": "Ascending Triangle", "description": "Ascending Triangle - support tăng dần", "points": "+2"}
            ]
        },
        "scoring_system": {
            "basic_bullish": keys(&Pattern::BASIC_BULLISH),
            "basic_bearish": keys(&Pattern::BASIC_BEARISH),
            "neutral_patterns": keys(&Pattern::NEUTRAL),
            "large_bullish": keys(&Pattern::LARGE),
            "scoring_formula": "GTI (0-4) + Basic Bullish (+1 each) - Basic Bearish (-1 each) + Large Patterns (+2 each) + Market Context Adjustments"
        },
        "pattern_count": {
            "basic": basic_count,
            "large": Pattern::LARGE.len(),
            "total": Pattern::ALL.len()
        },
        "total_range": format!("Score range: {SCORING_RANGE}")
    })
}
