//! API client for the forecast service.
//!
//! One method per remote operation, GET only. Every failure mode
//! (transport, empty or undecodable body, explicit error payload) is
//! normalized here into a single [`ApiError`] message; callers never see
//! transport detail (it goes to the logs instead).

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::domain::{
    AnalysisResult, Instrument, LiveQuote, PredictionResult, ServiceHealth, StockSnapshot, Symbol,
};
use crate::error::ApiError;
use crate::http::{HttpClient, HttpRequest, HttpResponse};

/// Default history window for snapshot fetches.
pub const DEFAULT_PERIOD: &str = "1mo";

/// Fixed prediction horizon used by the orchestration layer.
pub const DEFAULT_HORIZON_DAYS: u32 = 7;

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    results: Vec<Instrument>,
}

#[derive(Debug, Deserialize)]
struct StockListEnvelope {
    stocks: Vec<Instrument>,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: Option<String>,
}

/// Client for the six service operations plus the health probe.
#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: Arc<dyn HttpClient>,
}

impl ApiClient {
    pub fn new(config: ApiConfig, http: Arc<dyn HttpClient>) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Type-ahead instrument search.
    pub async fn search(&self, query: &str) -> Result<Vec<Instrument>, ApiError> {
        let path = format!("/stock/search?q={}", urlencoding::encode(query));
        let envelope: SearchEnvelope = self.get_json(&path).await?;
        Ok(envelope.results)
    }

    /// Quote plus recent history for one instrument.
    pub async fn snapshot(&self, symbol: &Symbol, period: &str) -> Result<StockSnapshot, ApiError> {
        let path = format!(
            "/stock/{}?period={}",
            urlencoding::encode(symbol.as_str()),
            urlencoding::encode(period)
        );
        self.get_json(&path).await
    }

    /// Latest traded price for one instrument.
    pub async fn live_quote(&self, symbol: &Symbol) -> Result<LiveQuote, ApiError> {
        let path = format!("/stock/{}/live", urlencoding::encode(symbol.as_str()));
        self.get_json(&path).await
    }

    /// Multi-day price prediction.
    pub async fn prediction(
        &self,
        symbol: &Symbol,
        days: u32,
    ) -> Result<PredictionResult, ApiError> {
        let path = format!(
            "/stock/{}/predict?days={days}",
            urlencoding::encode(symbol.as_str())
        );
        self.get_json(&path).await
    }

    /// Qualitative sentiment analysis.
    pub async fn analysis(&self, symbol: &Symbol) -> Result<AnalysisResult, ApiError> {
        let path = format!("/stock/{}/analyze", urlencoding::encode(symbol.as_str()));
        self.get_json(&path).await
    }

    /// Curated NSE instrument list.
    pub async fn instrument_list(&self) -> Result<Vec<Instrument>, ApiError> {
        let envelope: StockListEnvelope = self.get_json("/nse/stocks").await?;
        Ok(envelope.stocks)
    }

    /// Service health probe.
    pub async fn health(&self) -> Result<ServiceHealth, ApiError> {
        self.get_json("/health").await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.config.endpoint(path);
        debug!(target: "tickerdesk::client", %url, "issuing request");

        let request = HttpRequest::get(&url).with_timeout_ms(self.config.timeout_ms());
        let response = self.http.execute(request).await.map_err(|error| {
            warn!(target: "tickerdesk::client", %url, error = %error, "transport failure");
            ApiError::service_unavailable()
        })?;

        if !response.is_success() {
            return Err(service_error(&url, &response));
        }

        if response.body.trim().is_empty() {
            warn!(target: "tickerdesk::client", %url, "empty success body");
            return Err(ApiError::empty_response());
        }

        serde_json::from_str(&response.body).map_err(|error| {
            warn!(target: "tickerdesk::client", %url, error = %error, "undecodable success body");
            ApiError::service_unavailable()
        })
    }
}

/// Surface the service's own message verbatim when it sent one; otherwise
/// fall back to the generic message.
fn service_error(url: &str, response: &HttpResponse) -> ApiError {
    warn!(
        target: "tickerdesk::client",
        %url,
        status = response.status,
        "service error response"
    );

    match serde_json::from_str::<ErrorPayload>(&response.body) {
        Ok(ErrorPayload {
            error: Some(message),
        }) if !message.trim().is_empty() => ApiError::new(message),
        _ => ApiError::service_unavailable(),
    }
}
