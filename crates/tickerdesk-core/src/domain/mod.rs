//! Canonical domain models shared by the client and its callers.

mod models;
mod symbol;
mod timestamp;

pub use models::{
    price_bounds, AnalysisMetrics, AnalysisResult, IndicatorSet, Instrument, LiveQuote,
    PredictedPoint, PredictionResult, PriceBar, Recommendation, SentimentLabel, ServiceHealth,
    StockSnapshot,
};
pub use symbol::Symbol;
pub use timestamp::{TradingDate, UtcDateTime};
