//! Core client contracts for tickerdesk.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - The API client and its error normalization
//! - The HTTP transport seam (reqwest in production, scripted in tests)
//! - The selection orchestration layer: controller, type-ahead search, and
//!   live-quote poller
//!
//! The orchestration layer is the interesting part. Everything asynchronous
//! is governed by a single last-selection-wins rule, enforced by tagging each
//! issued fetch with the identity it was issued under and discarding any
//! completion whose identity no longer matches. See [`session`] for the
//! full discipline.

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod poller;
pub mod search;
pub mod session;

pub use client::{ApiClient, DEFAULT_HORIZON_DAYS, DEFAULT_PERIOD};
pub use config::{ApiConfig, BASE_URL_VAR, REQUEST_TIMEOUT_MS};
pub use domain::{
    price_bounds, AnalysisMetrics, AnalysisResult, IndicatorSet, Instrument, LiveQuote,
    PredictedPoint, PredictionResult, PriceBar, Recommendation, SentimentLabel, ServiceHealth,
    StockSnapshot, Symbol, TradingDate, UtcDateTime,
};
pub use error::{ApiError, ConfigError, ValidationError};
pub use http::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use poller::{LiveQuotePoller, LiveQuoteState, POLL_PERIOD};
pub use search::{TypeaheadSearch, DEBOUNCE_WINDOW};
pub use session::{
    ActivationOutcome, ApplyOutcome, ResultTab, SelectionController, SelectionState, Session,
    SnapshotTicket, Tab, TabActivation, TabTicket,
};
