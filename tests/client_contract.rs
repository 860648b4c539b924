//! Behavior tests for the API client: URL construction, wire decoding, and
//! error normalization as observed through a scripted transport.

mod support;

use support::{
    analysis_body, api_client, prediction_body, quote_body, search_body, snapshot_body,
    ScriptedHttpClient,
};
use tickerdesk_core::{price_bounds, Recommendation, SentimentLabel, Symbol};

fn symbol(text: &str) -> Symbol {
    Symbol::parse(text).expect("valid symbol")
}

#[tokio::test]
async fn search_query_is_percent_encoded() {
    // given a transport scripted for the search endpoint
    let script = ScriptedHttpClient::new().respond(
        "/stock/search",
        search_body(&[("AAPL", "Apple Inc."), ("APLE", "Apple Hospitality REIT")]),
    );
    let (client, transport) = api_client(script);

    // when searching for a query containing a space and an ampersand
    let results = client.search("apple & co").await.expect("search succeeds");

    // then the query lands encoded and the envelope is unwrapped
    assert_eq!(
        transport.requests(),
        vec!["http://api.test/stock/search?q=apple%20%26%20co"]
    );
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].symbol.as_str(), "AAPL");
    assert_eq!(results[1].name, "Apple Hospitality REIT");
}

#[tokio::test]
async fn snapshot_request_carries_the_period() {
    let script =
        ScriptedHttpClient::new().respond("/stock/AAPL", snapshot_body("AAPL", 150.0));
    let (client, transport) = api_client(script);

    let snapshot = client
        .snapshot(&symbol("AAPL"), "3mo")
        .await
        .expect("snapshot succeeds");

    assert_eq!(
        transport.requests(),
        vec!["http://api.test/stock/AAPL?period=3mo"]
    );
    assert_eq!(snapshot.current_price, 150.0);
    assert_eq!(snapshot.change_percent, 1.35);
    assert_eq!(snapshot.history.len(), 3);
    // history bounds fold the per-bar lows and highs
    assert_eq!(price_bounds(&snapshot.history), Some((8.0, 15.0)));
}

#[tokio::test]
async fn prediction_request_carries_the_horizon() {
    let script =
        ScriptedHttpClient::new().respond("/predict", prediction_body("AAPL"));
    let (client, transport) = api_client(script);

    let prediction = client
        .prediction(&symbol("AAPL"), 7)
        .await
        .expect("prediction succeeds");

    assert_eq!(
        transport.requests(),
        vec!["http://api.test/stock/AAPL/predict?days=7"]
    );
    assert_eq!(prediction.recommendation, Recommendation::Buy);
    assert_eq!(prediction.overall_change, 3.2);
    assert_eq!(prediction.predictions.len(), 2);
    assert_eq!(prediction.indicators.sma_20, 146.2);
}

#[tokio::test]
async fn analysis_decodes_sentiment_and_metrics() {
    let script = ScriptedHttpClient::new().respond("/analyze", analysis_body("TCS.NS"));
    let (client, transport) = api_client(script);

    let analysis = client
        .analysis(&symbol("TCS.NS"))
        .await
        .expect("analysis succeeds");

    assert_eq!(
        transport.requests(),
        vec!["http://api.test/stock/TCS.NS/analyze"]
    );
    assert_eq!(analysis.sentiment, SentimentLabel::Bullish);
    assert_eq!(analysis.metrics.total_trading_days, 22);
    assert_eq!(analysis.change_percent, Some(1.35));
}

#[tokio::test]
async fn live_quote_fills_optional_fields() {
    let script = ScriptedHttpClient::new().respond("/live", quote_body("AAPL", 151.3));
    let (client, transport) = api_client(script);

    let quote = client
        .live_quote(&symbol("AAPL"))
        .await
        .expect("quote succeeds");

    assert_eq!(transport.requests(), vec!["http://api.test/stock/AAPL/live"]);
    assert_eq!(quote.price, 151.3);
    assert_eq!(quote.volume, Some(3_200_000));
    assert_eq!(quote.currency, "USD");
}

#[tokio::test]
async fn service_error_payload_is_surfaced_verbatim() {
    let script = ScriptedHttpClient::new().respond_status(
        "/stock/ZZZZ",
        404,
        r#"{"error": "Stock ZZZZ not found"}"#,
    );
    let (client, _) = api_client(script);

    let error = client
        .snapshot(&symbol("ZZZZ"), "1mo")
        .await
        .expect_err("must fail");

    assert_eq!(error.message(), "Stock ZZZZ not found");
}

#[tokio::test]
async fn transport_failure_is_normalized_for_every_operation() {
    let script = ScriptedHttpClient::new().fail("/", "connection refused");
    let (client, _) = api_client(script);

    let search = client.search("apple").await.expect_err("must fail");
    let quote = client
        .live_quote(&symbol("AAPL"))
        .await
        .expect_err("must fail");

    assert_eq!(search.message(), "Service temporarily unavailable");
    assert_eq!(quote.message(), "Service temporarily unavailable");
}

#[tokio::test]
async fn empty_success_body_gets_its_own_message() {
    let script = ScriptedHttpClient::new().respond_status("/health", 200, "  \n");
    let (client, _) = api_client(script);

    let error = client.health().await.expect_err("must fail");

    assert_eq!(error.message(), "Empty response from server");
}

#[tokio::test]
async fn instrument_list_unwraps_the_stocks_envelope() {
    let script = ScriptedHttpClient::new().respond(
        "/nse/stocks",
        serde_json::json!({
            "stocks": [
                { "symbol": "TCS.NS", "name": "Tata Consultancy Services", "exchange": "NSE" },
                { "symbol": "INFY.NS", "name": "Infosys", "exchange": "NSE" }
            ]
        }),
    );
    let (client, transport) = api_client(script);

    let stocks = client.instrument_list().await.expect("list succeeds");

    assert_eq!(transport.requests(), vec!["http://api.test/nse/stocks"]);
    assert_eq!(stocks.len(), 2);
    assert_eq!(stocks[0].exchange, "NSE");
}
