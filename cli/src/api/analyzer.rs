//! High-level stock analyzer: fetch, compute, assemble.

use crate::analysis::context::{self, MARKET_INDEX};
use crate::analysis::info::{ANALYSIS_VERSION, SCORING_RANGE, SYSTEM_NAME};
use crate::analysis::{news, scoring, GtiFrame, PatternFrame};
use crate::models::{
    BasicAnalysis, Candle, FullAnalysis, GtiAnalysis, MarketContext, NewsContextReport,
    SectorAnalysis, SectorInfo, SystemInfo, TechnicalLevels,
};
use crate::services::{DateRange, MarketDataSource, SourceError};
use crate::utils::indicators::round2;
use crate::utils::{today_vietnam, Timer};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_HISTORY_DAYS: u32 = 365;
pub const BASIC_VERSION: &str = "3.0.0";
pub const BASIC_NOTE: &str =
    "Phân tích GTI cơ bản. Sử dụng /full-analysis/{ma_co_phieu} để có pattern detection.";

const ENHANCED_FEATURES: [&str; 4] = [
    "Large Patterns",
    "Market Context",
    "Sector Analysis",
    "News Integration",
];

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Không tìm thấy dữ liệu cho mã: {0}")]
    NoData(String),
    #[error("failed to load {symbol}: {source}")]
    Source {
        symbol: String,
        #[source]
        source: SourceError,
    },
}

/// Runs the GTI pipeline against any [`MarketDataSource`].
///
/// Only the analysed symbol is mandatory. VNINDEX and sector lookups that
/// fail are folded into the result as error contexts.
pub struct StockAnalyzer<S> {
    source: S,
    history_days: u32,
    reference_date: Option<NaiveDate>,
}

impl<S: MarketDataSource> StockAnalyzer<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            history_days: DEFAULT_HISTORY_DAYS,
            reference_date: None,
        }
    }

    pub fn with_history_days(mut self, days: u32) -> Self {
        self.history_days = days;
        self
    }

    /// Analyse as of `date` instead of today's Vietnam date.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    fn range(&self) -> DateRange {
        let end = self.reference_date.unwrap_or_else(today_vietnam);
        DateRange::ending_at(end, self.history_days)
    }

    async fn load(&self, symbol: &str, range: DateRange) -> Result<Vec<Candle>, AnalysisError> {
        match self.source.daily_history(symbol, range).await {
            Ok(candles) if candles.is_empty() => Err(AnalysisError::NoData(symbol.to_string())),
            Ok(candles) => {
                debug!(symbol, rows = candles.len(), source = self.source.name(), "Loaded history");
                Ok(candles)
            }
            Err(SourceError::NoData(_)) => Err(AnalysisError::NoData(symbol.to_string())),
            Err(source) => Err(AnalysisError::Source {
                symbol: symbol.to_string(),
                source,
            }),
        }
    }

    /// Latest-session GTI values for `symbol`.
    pub async fn basic_analysis(&self, symbol: &str) -> Result<BasicAnalysis, AnalysisError> {
        let symbol = normalize(symbol);
        let candles = self.load(&symbol, self.range()).await?;
        let frame = GtiFrame::compute(&candles);
        let (Some(latest), Some(last)) = (frame.latest(), candles.last()) else {
            return Err(AnalysisError::NoData(symbol));
        };

        Ok(BasicAnalysis {
            symbol,
            date: last.date,
            close: round2(last.close),
            high: round2(last.high),
            low: round2(last.low),
            volume: last.volume,
            ema10: latest.ema10.map(round2),
            ema20: latest.ema20.map(round2),
            ema50: latest.ema50.map(round2),
            ema200: latest.ema200.map(round2),
            rsi: latest.rsi.map(round2),
            macd: latest.macd.map(round2),
            macd_signal: latest.macd_signal.map(round2),
            sma20: latest.sma20.map(round2),
            gti_trend_check: latest.criteria.trend_check,
            gti_recent_breakout: latest.criteria.recent_breakout,
            gti_dist_to_high_percent: Some(round2(latest.dist_to_high_percent)),
            gti_is_pullback: latest.criteria.is_pullback,
            gti_score: latest.score,
            gti_signal: latest.signal,
            system: SYSTEM_NAME.to_string(),
            version: BASIC_VERSION.to_string(),
            note: BASIC_NOTE.to_string(),
        })
    }

    pub async fn market_context(&self) -> MarketContext {
        self.market_context_in(self.range()).await
    }

    async fn market_context_in(&self, range: DateRange) -> MarketContext {
        match self.source.daily_history(MARKET_INDEX, range).await {
            Ok(candles) => context::market_context_from(&candles),
            Err(e) => {
                warn!(error = %e, "Market context unavailable");
                context::market_context_error(&e)
            }
        }
    }

    pub async fn sector_analysis(&self, symbol: &str) -> SectorAnalysis {
        self.sector_analysis_in(&normalize(symbol), self.range()).await
    }

    async fn sector_analysis_in(&self, symbol: &str, range: DateRange) -> SectorAnalysis {
        let Some(entry) = context::sector_for(symbol) else {
            return context::unknown_sector(symbol);
        };
        match self.source.daily_history(entry.representative, range).await {
            Ok(candles) => context::sector_analysis_from(entry, &candles),
            Err(e) => {
                warn!(symbol, sector = entry.sector, error = %e, "Sector analysis unavailable");
                context::sector_analysis_error(entry, &e)
            }
        }
    }

    /// Sector lookup plus news search guidance for `symbol`.
    pub async fn news_context(&self, symbol: &str) -> NewsContextReport {
        let symbol = normalize(symbol);
        let sector = self.sector_analysis_in(&symbol, self.range()).await;
        let sector_name = sector.sector_name().map(str::to_string);

        NewsContextReport {
            news_search_context: news::news_search_context(&symbol, sector_name.as_deref()),
            stock_symbol: symbol,
            sector_info: SectorInfo {
                sector_name,
                status: sector.status().to_string(),
            },
            important_note: news::IMPORTANT_NOTE.to_string(),
        }
    }

    /// GTI, patterns, market and sector context, news guidance and the
    /// combined recommendation for `symbol`.
    pub async fn full_analysis(&self, symbol: &str) -> Result<FullAnalysis, AnalysisError> {
        let symbol = normalize(symbol);
        let timer = Timer::start("full_analysis");
        let range = self.range();

        let (stock, market, sector) = tokio::join!(
            self.load(&symbol, range),
            self.market_context_in(range),
            self.sector_analysis_in(&symbol, range),
        );
        let candles = stock?;

        let frame = GtiFrame::compute(&candles);
        let (Some(latest), Some(last)) = (frame.latest(), candles.last()) else {
            return Err(AnalysisError::NoData(symbol));
        };
        let i = candles.len() - 1;

        let patterns = PatternFrame::detect(&candles);
        let summary = patterns.summary();
        let combined = scoring::combine(latest.score, &summary, &market, &sector);

        info!(
            symbol = %symbol,
            gti_score = latest.score,
            total_score = combined.total_score,
            action = %combined.final_recommendation.action,
            "Full analysis complete"
        );
        timer.log_elapsed(&symbol);

        Ok(FullAnalysis {
            status: "success".to_string(),
            analysis_date: last.date,
            closing_price: round2(last.close),
            gti_analysis: GtiAnalysis {
                gti_score: latest.score,
                gti_criteria: latest.criteria,
            },
            pattern_analysis: summary.to_analysis(),
            news_search_context: news::news_search_context(&symbol, sector.sector_name()),
            technical_levels: TechnicalLevels {
                support_level: patterns.support_level[i].map(round2),
                resistance_level: patterns.resistance_level[i].map(round2),
                ema10: latest.ema10.map(round2),
                ema20: latest.ema20.map(round2),
            },
            system_info: SystemInfo {
                version: ANALYSIS_VERSION.to_string(),
                scoring_range: SCORING_RANGE.to_string(),
                enhanced_features: ENHANCED_FEATURES.iter().map(|f| f.to_string()).collect(),
            },
            stock_symbol: symbol,
            market_context: market,
            sector_analysis: sector,
            combined_analysis: combined,
        })
    }
}

fn normalize(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}
