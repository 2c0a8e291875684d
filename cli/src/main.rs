use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use gti::{
    api::{StockAnalyzer, DEFAULT_HISTORY_DAYS},
    models::{FullAnalysis, MarketContext},
    services::CsvDataSource,
    utils::init_logger,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gti")]
#[command(about = "Offline GTI analysis of Vietnamese stocks from CSV history files")]
pub struct Cli {
    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args)]
pub struct SourceArgs {
    /// Ticker symbol to analyze, e.g. FPT
    #[arg(short, long)]
    pub symbol: String,
    /// Directory holding <SYMBOL>.csv files (time,open,high,low,close,volume)
    #[arg(short, long, default_value = "./data")]
    pub data_dir: PathBuf,
    /// Analyse as of this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
    /// Calendar days of history to load
    #[arg(long, default_value_t = DEFAULT_HISTORY_DAYS)]
    pub days: u32,
    /// Print the raw JSON result
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Full analysis: GTI, patterns, market and sector context, recommendation
    Analyze(SourceArgs),
    /// Basic GTI analysis of the latest session
    Basic(SourceArgs),
}

fn analyzer(args: &SourceArgs) -> StockAnalyzer<CsvDataSource> {
    let analyzer =
        StockAnalyzer::new(CsvDataSource::new(&args.data_dir)).with_history_days(args.days);
    match args.as_of {
        Some(date) => analyzer.with_reference_date(date),
        None => analyzer,
    }
}

fn print_report(result: &FullAnalysis) {
    let recommendation = &result.combined_analysis.final_recommendation;
    println!(
        "{} {} | {} | close {:.2}",
        recommendation.emoji, result.stock_symbol, result.analysis_date, result.closing_price
    );
    println!(
        "GTI score: {}/4 | patterns: {}",
        result.gti_analysis.gti_score, result.pattern_analysis.pattern_summary
    );
    if !result.pattern_analysis.current_patterns.is_empty() {
        println!("Current patterns: {}", result.pattern_analysis.current_patterns.join(", "));
    }
    match &result.market_context {
        MarketContext::Success { analysis_note, .. } => println!("{analysis_note}"),
        MarketContext::Error { message } => println!("Market: {message}"),
    }
    println!(
        "Total score: {:.2} (base {} {:+} market {:+} sector)",
        result.combined_analysis.total_score,
        result.combined_analysis.base_score,
        result.combined_analysis.market_adjustment,
        result.combined_analysis.sector_adjustment
    );
    println!(
        "{} - {} ({}): {}",
        recommendation.level, recommendation.action, recommendation.position_size, recommendation.message
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose)?;

    match cli.command {
        Commands::Analyze(args) => {
            let result = analyzer(&args).full_analysis(&args.symbol).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_report(&result);
            }
        }
        Commands::Basic(args) => {
            let result = analyzer(&args).basic_analysis(&args.symbol).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!(
                    "{} {} | close {:.2} | GTI {}/4 {}",
                    result.symbol, result.date, result.close, result.gti_score, result.gti_signal
                );
            }
        }
    }

    Ok(())
}
