//! High-level API for library users.
//!
//! [`StockAnalyzer`] ties a [`crate::services::MarketDataSource`] to the
//! analysis pipeline.

pub mod analyzer;

pub use analyzer::{AnalysisError, StockAnalyzer, DEFAULT_HISTORY_DAYS};
