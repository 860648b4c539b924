use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::{Symbol, TradingDate, UtcDateTime};

/// A searchable traded instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    pub symbol: Symbol,
    pub name: String,
    pub exchange: String,
}

/// One daily OHLCV record. History sequences are chronological with no
/// duplicate dates; the service owns that ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: TradingDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: u64,
}

/// Full point-in-time view of an instrument: quote fields plus recent
/// history. Replaced wholesale on each successful snapshot fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSnapshot {
    pub symbol: Symbol,
    pub name: String,
    pub exchange: String,
    pub currency: String,
    pub current_price: f64,
    pub previous_close: f64,
    pub change: f64,
    pub change_percent: f64,
    #[serde(default)]
    pub market_cap: f64,
    #[serde(default)]
    pub fifty_two_week_high: f64,
    #[serde(default)]
    pub fifty_two_week_low: f64,
    pub history: Vec<PriceBar>,
}

impl StockSnapshot {
    /// Chart scaling bounds: (lowest low, highest high) across the history.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        price_bounds(&self.history)
    }
}

/// Scaling bounds for a bar sequence: (lowest low, highest high).
pub fn price_bounds(history: &[PriceBar]) -> Option<(f64, f64)> {
    let mut bars = history.iter();
    let first = bars.next()?;
    let bounds = bars.fold((first.low, first.high), |(min, max), bar| {
        (min.min(bar.low), max.max(bar.high))
    });
    Some(bounds)
}

/// Service recommendation for a predicted trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
}

impl Recommendation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Hold => "HOLD",
        }
    }
}

impl Display for Recommendation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Technical indicators the service computed over the history it used.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub sma_5: f64,
    pub sma_20: f64,
    pub rsi: f64,
    pub volatility: f64,
    pub momentum: f64,
}

/// One forecast day with its confidence band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictedPoint {
    pub date: TradingDate,
    pub predicted_price: f64,
    pub low_bound: f64,
    pub high_bound: f64,
    /// Forecast confidence in [0, 1].
    pub confidence: f64,
}

/// Multi-day prediction produced by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub symbol: Symbol,
    pub current_price: f64,
    pub predictions: Vec<PredictedPoint>,
    #[serde(default)]
    pub indicators: IndicatorSet,
    /// News sentiment score in [0, 1].
    pub sentiment: f64,
    /// Forecast-horizon change versus the current price, in percent.
    pub overall_change: f64,
    pub recommendation: Recommendation,
    pub recommendation_detail: String,
    pub generated_at: UtcDateTime,
}

/// Qualitative sentiment label on an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Bullish,
    Bearish,
    Neutral,
}

impl SentimentLabel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bullish => "Bullish",
            Self::Bearish => "Bearish",
            Self::Neutral => "Neutral",
        }
    }
}

impl Display for SentimentLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive statistics the service derived from recent history.
///
/// The service sends an empty object when it had no history to work with,
/// so every field defaults to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisMetrics {
    pub average_price: f64,
    pub highest_price: f64,
    pub lowest_price: f64,
    pub price_range: f64,
    pub average_daily_return: f64,
    pub volatility: f64,
    pub win_rate: f64,
    pub average_volume: u64,
    pub total_trading_days: u32,
}

/// Qualitative analysis produced by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub symbol: Symbol,
    pub name: String,
    pub current_price: Option<f64>,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
    #[serde(default)]
    pub metrics: AnalysisMetrics,
    pub analysis: String,
    pub sentiment: SentimentLabel,
    pub generated_at: UtcDateTime,
}

/// Latest traded price for the active symbol. Ephemeral: each refresh
/// replaces the prior value and no history is retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveQuote {
    pub symbol: Symbol,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub volume: Option<u64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(rename = "timestamp", default = "UtcDateTime::now")]
    pub fetched_at: UtcDateTime,
}

fn default_currency() -> String {
    String::from("USD")
}

/// Service health probe response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub message: String,
}
