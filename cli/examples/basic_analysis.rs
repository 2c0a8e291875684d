//! Basic Analysis Example
//!
//! Runs the GTI pipeline over CSV files in `./data` (one `<SYMBOL>.csv` per
//! ticker with `time,open,high,low,close,volume` columns).
//!
//! ```bash
//! cargo run --example basic_analysis -- FPT
//! ```

use gti::prelude::*;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    gti::init_logger(false)?;

    let symbol = std::env::args().nth(1).unwrap_or_else(|| "FPT".to_string());
    let analyzer = StockAnalyzer::new(CsvDataSource::new("./data"));

    println!("🚀 GTI analysis for {symbol}");
    println!("{}", "=".repeat(60));

    match analyzer.basic_analysis(&symbol).await {
        Ok(basic) => {
            println!("📊 {} close {:.2} on {}", basic.symbol, basic.close, basic.date);
            println!("   GTI score: {}/4 ({})", basic.gti_score, basic.gti_signal);
        }
        Err(e) => {
            println!("❌ Basic analysis failed: {e}");
            return Ok(());
        }
    }

    let full = analyzer.full_analysis(&symbol).await?;
    let recommendation = &full.combined_analysis.final_recommendation;
    println!("\n🎯 Patterns: {}", full.pattern_analysis.pattern_summary);
    match full.market_context.index_score() {
        Some(score) => println!("🌊 VNINDEX GTI score: {score}/4"),
        None => println!("🌊 VNINDEX unavailable"),
    }
    println!("🏭 Sector: {}", full.sector_analysis.sector_name().unwrap_or("n/a"));
    println!(
        "⚡ Total score {:.2} -> {} {} ({})",
        full.combined_analysis.total_score,
        recommendation.emoji,
        recommendation.action,
        recommendation.position_size
    );

    Ok(())
}
