//! CLI argument definitions for tickerdesk.
//!
//! One subcommand per service operation, plus `watch` for the live-quote
//! poller.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `search` | Type-ahead instrument search |
//! | `show` | Snapshot: quote plus recent history |
//! | `live` | One live quote (the manual-refresh path) |
//! | `predict` | Multi-day price prediction |
//! | `analyze` | Qualitative sentiment analysis |
//! | `stocks` | Curated NSE instrument list |
//! | `health` | Service health probe |
//! | `watch` | Poll the live quote on the fixed period |
//!
//! The service base URL comes from `TICKERDESK_API_URL`; a missing or
//! invalid value is a fatal startup error.

use clap::{Args, Parser, Subcommand, ValueEnum};
use tickerdesk_core::{DEFAULT_HORIZON_DAYS, DEFAULT_PERIOD};

/// Client for the stock forecast service.
#[derive(Debug, Parser)]
#[command(
    name = "tickerdesk",
    author,
    version,
    about = "Stock forecast service client",
    long_about = "tickerdesk fetches quotes, price history, predictions, and sentiment \
analysis from a forecast service and keeps a live quote refreshing on a fixed period.\n\
\n\
Set TICKERDESK_API_URL to the service base URL before running."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Raw JSON.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
        })
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search instruments by symbol or company name.
    Search(SearchArgs),
    /// Show the snapshot for a symbol: quote plus recent history.
    Show(ShowArgs),
    /// Fetch one live quote for a symbol.
    Live(SymbolArg),
    /// Fetch a multi-day price prediction for a symbol.
    Predict(PredictArgs),
    /// Fetch a qualitative sentiment analysis for a symbol.
    Analyze(SymbolArg),
    /// List the curated NSE instruments.
    Stocks,
    /// Probe service health.
    Health,
    /// Poll the live quote, printing each refresh.
    Watch(WatchArgs),
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Query text.
    pub query: String,
}

#[derive(Debug, Args)]
pub struct SymbolArg {
    /// Ticker symbol, exactly as the service knows it (case-sensitive).
    pub symbol: String,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Ticker symbol, exactly as the service knows it (case-sensitive).
    pub symbol: String,

    /// History window passed through to the service.
    #[arg(long, default_value = DEFAULT_PERIOD)]
    pub period: String,
}

#[derive(Debug, Args)]
pub struct PredictArgs {
    /// Ticker symbol, exactly as the service knows it (case-sensitive).
    pub symbol: String,

    /// Prediction horizon in days.
    #[arg(long, default_value_t = DEFAULT_HORIZON_DAYS, value_parser = clap::value_parser!(u32).range(1..=30))]
    pub days: u32,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Ticker symbol, exactly as the service knows it (case-sensitive).
    pub symbol: String,

    /// Stop after this many refreshes; 0 runs until interrupted.
    #[arg(long, default_value_t = 0)]
    pub ticks: u64,
}
