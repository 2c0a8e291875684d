//! Search guidance for pairing the numeric analysis with recent news.

use crate::models::NewsSearchContext;

pub const IMPORTANT_NOTE: &str = "📊 Tất cả dữ liệu về giá, volume, chỉ số kỹ thuật đã được cung cấp qua API - CHỈ search tin tức và sự kiện!";

/// Search queries and instructions for `symbol`. The sector defaults to the
/// broad market when unknown.
pub fn news_search_context(symbol: &str, sector: Option<&str>) -> NewsSearchContext {
    let company = format!("tin tức mới nhất về công ty {symbol} Việt Nam");
    let earnings = format!("kết quả kinh doanh {symbol} 2024 2025");
    let industry = format!("tin tức ngành {} Việt Nam", sector.unwrap_or("chứng khoán"));
    let policy = format!(
        "chính sách ảnh hưởng ngành {} Việt Nam",
        sector.unwrap_or("tài chính")
    );

    let search_instruction = format!(
        "🔍 HƯỚNG DẪN SEARCH TIN TỨC CHO {symbol}:\n\n\
         ✅ CẦN TÌM:\n\
         - Tin tức công ty: {company}\n\
         - Kết quả kinh doanh: {earnings}\n\
         - Sự kiện ngành: {industry}\n\
         - Chính sách liên quan: {policy}\n\n\
         ❌ TUYỆT ĐỐI KHÔNG TÌM:\n\
         - Dữ liệu giá cổ phiếu, volume, chỉ số kỹ thuật\n\
         - Dự đoán giá, forecast\n\
         - Phân tích kỹ thuật từ bên ngoài\n\n\
         📊 LƯU Ý: Tất cả dữ liệu về giá và chỉ số kỹ thuật đã được cung cấp qua API."
    );

    NewsSearchContext {
        search_instruction,
        suggested_searches: vec![company, earnings, industry, policy],
    }
}
