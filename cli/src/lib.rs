//! # GTI - Growth Trading Intelligence for Vietnamese stocks
//!
//! Swing-trading analysis over daily OHLCV history:
//! - GTI core score (trend, breakout, distance to one-year high, pullback)
//! - 13 candlestick/breakout patterns and 4 large chart patterns
//! - VNINDEX and sector context
//! - Combined score with a position-sizing recommendation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gti::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let analyzer = StockAnalyzer::new(CsvDataSource::new("./data"));
//!     let result = analyzer.full_analysis("FPT").await?;
//!     println!("{}: {}", result.stock_symbol, result.combined_analysis.total_score);
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub mod prelude {
    //! Commonly used types.
    //!
    //! ```rust
    //! use gti::prelude::*;
    //! ```

    pub use crate::analysis::{GtiFrame, Pattern, PatternFrame};
    pub use crate::api::{AnalysisError, StockAnalyzer};
    pub use crate::models::{BasicAnalysis, Candle, FullAnalysis, NewsContextReport};
    pub use crate::services::{CsvDataSource, DateRange, MarketDataSource, SourceError};
}

pub use utils::{init_logger, Timer};
