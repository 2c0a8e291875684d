//! GTI analysis pipeline.
//!
//! Pure functions over candle series. Fetching lives in
//! [`crate::services`] and orchestration in [`crate::api::StockAnalyzer`].

pub mod candlestick;
pub mod chart_patterns;
pub mod context;
pub mod gti;
pub mod info;
pub mod news;
pub mod patterns;
pub mod scoring;

pub use context::{sector_for, SectorEntry, MARKET_INDEX};
pub use gti::{GtiFrame, GtiSnapshot};
pub use patterns::{Pattern, PatternFrame, PatternSummary};
