//! Debounce behavior of the type-ahead search under a paused clock.

mod support;

use std::time::Duration;

use support::{api_client, search_body, ScriptedHttpClient};
use tickerdesk_core::{TypeaheadSearch, DEBOUNCE_WINDOW};

/// Advance the paused clock, letting a just-spawned debounce task register
/// its timer first and letting woken tasks run to completion after.
async fn pass(duration: Duration) {
    tokio::task::yield_now().await;
    tokio::time::advance(duration).await;
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn rapid_keystrokes_collapse_into_one_fetch_for_the_final_string() {
    let script = ScriptedHttpClient::new().respond(
        "/stock/search",
        search_body(&[("AAPL", "Apple Inc.")]),
    );
    let (client, transport) = api_client(script);
    let mut search = TypeaheadSearch::new(client);

    // keystrokes arriving faster than the quiescence window
    search.set_query("a");
    pass(Duration::from_millis(100)).await;
    search.set_query("ap");
    pass(Duration::from_millis(100)).await;
    search.set_query("apple");

    // the window elapses undisturbed only after the last keystroke
    pass(DEBOUNCE_WINDOW).await;

    assert_eq!(transport.request_count("/stock/search"), 1);
    assert_eq!(transport.request_count("q=apple"), 1);
    assert_eq!(search.candidates().len(), 1);
    assert!(search.is_open());
    assert!(!search.is_searching());
}

#[tokio::test(start_paused = true)]
async fn no_fetch_is_issued_before_the_window_elapses() {
    let script = ScriptedHttpClient::new()
        .respond("/stock/search", search_body(&[("AAPL", "Apple Inc.")]));
    let (client, transport) = api_client(script);
    let mut search = TypeaheadSearch::new(client);

    search.set_query("apple");
    pass(DEBOUNCE_WINDOW - Duration::from_millis(1)).await;
    assert_eq!(transport.request_count("/stock/search"), 0);
    assert!(!search.is_open());

    pass(Duration::from_millis(1)).await;
    assert_eq!(transport.request_count("/stock/search"), 1);
    assert!(search.is_open());
}

#[tokio::test(start_paused = true)]
async fn clearing_the_query_cancels_the_pending_search() {
    let script = ScriptedHttpClient::new()
        .respond("/stock/search", search_body(&[("AAPL", "Apple Inc.")]));
    let (client, transport) = api_client(script);
    let mut search = TypeaheadSearch::new(client);

    search.set_query("apple");
    search.set_query("");
    pass(Duration::from_secs(2)).await;

    assert_eq!(transport.request_count("/stock/search"), 0);
    assert!(search.candidates().is_empty());
    assert!(!search.is_open());
    assert_eq!(search.query(), "");
}

#[tokio::test(start_paused = true)]
async fn a_response_in_flight_is_dropped_when_the_query_clears() {
    // the search response arrives three seconds after it is issued
    let script = ScriptedHttpClient::new().respond_after(
        "/stock/search",
        Duration::from_secs(3),
        search_body(&[("AAPL", "Apple Inc.")]),
    );
    let (client, transport) = api_client(script);
    let mut search = TypeaheadSearch::new(client);

    search.set_query("apple");
    pass(DEBOUNCE_WINDOW).await;
    assert_eq!(transport.request_count("/stock/search"), 1);

    // the user clears the field while the fetch is still in flight
    search.set_query("");
    pass(Duration::from_secs(5)).await;

    assert!(search.candidates().is_empty());
    assert!(!search.is_open());
}

#[tokio::test(start_paused = true)]
async fn empty_result_set_keeps_the_list_closed() {
    let script = ScriptedHttpClient::new().respond("/stock/search", search_body(&[]));
    let (client, _) = api_client(script);
    let mut search = TypeaheadSearch::new(client);

    search.set_query("zzzz");
    pass(DEBOUNCE_WINDOW).await;

    assert!(search.candidates().is_empty());
    assert!(!search.is_open());
    assert_eq!(search.error_message(), None);
}

#[tokio::test(start_paused = true)]
async fn search_failure_surfaces_the_normalized_message() {
    let script = ScriptedHttpClient::new().fail("/stock/search", "connection refused");
    let (client, _) = api_client(script);
    let mut search = TypeaheadSearch::new(client);

    search.set_query("apple");
    pass(DEBOUNCE_WINDOW).await;

    assert_eq!(
        search.error_message().as_deref(),
        Some("Service temporarily unavailable")
    );
    assert!(search.candidates().is_empty());
    assert!(!search.is_open());
}

#[tokio::test(start_paused = true)]
async fn selecting_a_candidate_closes_the_list_without_a_new_search() {
    let script = ScriptedHttpClient::new().respond(
        "/stock/search",
        search_body(&[("AAPL", "Apple Inc."), ("MSFT", "Microsoft Corporation")]),
    );
    let (client, transport) = api_client(script);
    let mut search = TypeaheadSearch::new(client);

    search.set_query("a");
    pass(DEBOUNCE_WINDOW).await;
    assert!(search.is_open());

    let chosen = search.select_candidate(1).expect("candidate exists");

    assert_eq!(chosen.symbol.as_str(), "MSFT");
    assert_eq!(search.query(), "MSFT");
    assert!(!search.is_open());

    // replacing the query display never schedules another fetch
    pass(Duration::from_secs(2)).await;
    assert_eq!(transport.request_count("/stock/search"), 1);
}
