//! Shared behavior-test plumbing: a scripted transport with a request log,
//! and JSON fixtures matching the service wire format.

#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};
use tickerdesk_core::{ApiClient, ApiConfig, HttpClient, HttpError, HttpRequest, HttpResponse};

struct Route {
    fragment: String,
    delay: Duration,
    // None = unlimited uses; Some(n) = exhausted after n matches.
    remaining: Option<usize>,
    result: Result<HttpResponse, HttpError>,
}

/// Transport that answers by URL substring and records every request it saw.
/// Routes are matched in registration order; an exhausted route is skipped,
/// so "once this, then that" sequences are two registrations.
pub struct ScriptedHttpClient {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Self {
        Self {
            routes: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(self, fragment: &str, body: Value) -> Self {
        self.route(fragment, Duration::ZERO, None, Ok(HttpResponse::ok_json(body.to_string())))
    }

    /// Respond only after `delay` of (test-controlled) time has passed.
    pub fn respond_after(self, fragment: &str, delay: Duration, body: Value) -> Self {
        self.route(fragment, delay, None, Ok(HttpResponse::ok_json(body.to_string())))
    }

    /// Respond successfully to the first `times` matches, then fall through
    /// to later routes.
    pub fn respond_times(self, fragment: &str, times: usize, body: Value) -> Self {
        self.route(
            fragment,
            Duration::ZERO,
            Some(times),
            Ok(HttpResponse::ok_json(body.to_string())),
        )
    }

    pub fn respond_status(self, fragment: &str, status: u16, body: &str) -> Self {
        self.route(
            fragment,
            Duration::ZERO,
            None,
            Ok(HttpResponse {
                status,
                body: body.to_owned(),
            }),
        )
    }

    pub fn fail(self, fragment: &str, message: &str) -> Self {
        self.route(fragment, Duration::ZERO, None, Err(HttpError::new(message)))
    }

    fn route(
        self,
        fragment: &str,
        delay: Duration,
        remaining: Option<usize>,
        result: Result<HttpResponse, HttpError>,
    ) -> Self {
        self.routes.lock().unwrap().push(Route {
            fragment: fragment.to_owned(),
            delay,
            remaining,
            result,
        });
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// How many recorded request URLs contain `fragment`.
    pub fn request_count(&self, fragment: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|url| url.contains(fragment))
            .count()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.requests.lock().unwrap().push(request.url.clone());

        let matched = {
            let mut routes = self.routes.lock().unwrap();
            routes
                .iter_mut()
                .find(|route| {
                    route.remaining != Some(0) && request.url.contains(&route.fragment)
                })
                .map(|route| {
                    if let Some(remaining) = route.remaining.as_mut() {
                        *remaining -= 1;
                    }
                    (route.delay, route.result.clone())
                })
        };

        Box::pin(async move {
            match matched {
                Some((delay, result)) => {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    result
                }
                None => Err(HttpError::new(format!(
                    "no scripted route for {}",
                    request.url
                ))),
            }
        })
    }
}

pub fn api_client(script: ScriptedHttpClient) -> (ApiClient, Arc<ScriptedHttpClient>) {
    let transport = Arc::new(script);
    let config = ApiConfig::new("http://api.test").expect("valid base url");
    (ApiClient::new(config, transport.clone()), transport)
}

pub fn instrument_json(symbol: &str, name: &str) -> Value {
    json!({ "symbol": symbol, "name": name, "exchange": "NASDAQ" })
}

pub fn search_body(entries: &[(&str, &str)]) -> Value {
    let results: Vec<Value> = entries
        .iter()
        .map(|(symbol, name)| instrument_json(symbol, name))
        .collect();
    json!({ "results": results })
}

pub fn snapshot_body(symbol: &str, current_price: f64) -> Value {
    json!({
        "symbol": symbol,
        "name": format!("{symbol} Inc."),
        "exchange": "NASDAQ",
        "currency": "USD",
        "currentPrice": current_price,
        "previousClose": current_price - 2.0,
        "change": 2.0,
        "changePercent": 1.35,
        "marketCap": 2.5e12,
        "fiftyTwoWeekHigh": 199.62,
        "fiftyTwoWeekLow": 124.17,
        "history": [
            { "date": "2026-08-20", "open": 11.0, "high": 12.0, "low": 10.0, "close": 11.5, "volume": 1000 },
            { "date": "2026-08-21", "open": 11.5, "high": 15.0, "low": 8.0, "close": 14.0, "volume": 1200 },
            { "date": "2026-08-22", "open": 14.0, "high": 13.0, "low": 11.0, "close": 12.0, "volume": 900 }
        ]
    })
}

pub fn prediction_body(symbol: &str) -> Value {
    json!({
        "symbol": symbol,
        "currentPrice": 150.0,
        "predictions": [
            { "date": "2026-08-26", "predictedPrice": 151.2, "lowBound": 148.0, "highBound": 154.4, "confidence": 0.9 },
            { "date": "2026-08-27", "predictedPrice": 152.1, "lowBound": 147.5, "highBound": 156.7, "confidence": 0.85 }
        ],
        "indicators": { "sma_5": 149.8, "sma_20": 146.2, "rsi": 61.3, "volatility": 1.8, "momentum": 2.4 },
        "sentiment": 0.62,
        "overallChange": 3.2,
        "recommendation": "BUY",
        "recommendationDetail": "Positive momentum with moderate volatility.",
        "generatedAt": "2026-08-25T10:30:00Z"
    })
}

pub fn analysis_body(symbol: &str) -> Value {
    json!({
        "symbol": symbol,
        "name": format!("{symbol} Inc."),
        "currentPrice": 150.0,
        "change": 2.0,
        "changePercent": 1.35,
        "metrics": {
            "averagePrice": 148.3,
            "highestPrice": 155.0,
            "lowestPrice": 140.1,
            "priceRange": 14.9,
            "averageDailyReturn": 0.12,
            "volatility": 1.8,
            "winRate": 54.2,
            "totalTradingDays": 22
        },
        "analysis": "Steady accumulation over the last month.",
        "sentiment": "Bullish",
        "generatedAt": "2026-08-25T10:30:00Z"
    })
}

pub fn quote_body(symbol: &str, price: f64) -> Value {
    json!({
        "symbol": symbol,
        "price": price,
        "change": 0.8,
        "changePercent": 0.54,
        "open": price - 1.0,
        "high": price + 0.5,
        "low": price - 1.5,
        "volume": 3_200_000u64,
        "currency": "USD",
        "timestamp": "2026-08-25T14:45:00Z"
    })
}
