//! Debounced type-ahead instrument search.
//!
//! Keystrokes land in [`TypeaheadSearch::set_query`]. Each keystroke restarts
//! the 300 ms quiescence timer by aborting the previously scheduled task and
//! spawning a new one; only a timer that elapses uninterrupted issues a
//! search fetch, tagged with the exact query string captured at spawn time.
//! At resolve time the tag is compared against the live query and a mismatch
//! is dropped; the abort handles the common restart and the tag guards the
//! completion races the abort cannot reach.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::client::ApiClient;
use crate::domain::Instrument;

/// Quiescence period before an input-driven search is issued.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

#[derive(Debug, Default)]
struct SearchState {
    query: String,
    candidates: Vec<Instrument>,
    open: bool,
    searching: bool,
    error: Option<String>,
}

/// Race-safe candidate list over a raw query string.
pub struct TypeaheadSearch {
    client: ApiClient,
    state: Arc<Mutex<SearchState>>,
    pending: Option<JoinHandle<()>>,
}

impl TypeaheadSearch {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(SearchState::default())),
            pending: None,
        }
    }

    /// Record a keystroke. An empty query clears the candidate list
    /// immediately with no fetch; anything else schedules a debounced
    /// search for the string as it stands right now.
    pub fn set_query(&mut self, text: &str) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        {
            let mut state = self.lock();
            state.query = text.to_owned();
            state.searching = false;
            if text.is_empty() {
                state.candidates.clear();
                state.open = false;
                state.error = None;
                return;
            }
        }

        let client = self.client.clone();
        let shared = Arc::clone(&self.state);
        let query = text.to_owned();

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(DEBOUNCE_WINDOW).await;

            {
                let mut state = shared.lock().unwrap();
                if state.query != query {
                    return;
                }
                state.searching = true;
            }

            let result = client.search(&query).await;

            let mut state = shared.lock().unwrap();
            if state.query != query {
                debug!(
                    target: "tickerdesk::search",
                    %query,
                    "dropping stale search response"
                );
                return;
            }

            state.searching = false;
            match result {
                Ok(candidates) => {
                    state.open = !candidates.is_empty();
                    state.candidates = candidates;
                    state.error = None;
                }
                Err(error) => {
                    state.candidates.clear();
                    state.open = false;
                    state.error = Some(error.message().to_owned());
                }
            }
        }));
    }

    /// Choose a candidate: closes the list, replaces the query display with
    /// the candidate's symbol without scheduling a new search, and hands the
    /// full instrument back for selection.
    pub fn select_candidate(&mut self, index: usize) -> Option<Instrument> {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        let mut state = self.lock();
        let candidate = state.candidates.get(index).cloned()?;
        state.query = candidate.symbol.to_string();
        state.open = false;
        state.searching = false;
        Some(candidate)
    }

    /// Focus-loss equivalent: close the list, keep the query.
    pub fn dismiss(&mut self) {
        self.lock().open = false;
    }

    pub fn query(&self) -> String {
        self.lock().query.clone()
    }

    pub fn candidates(&self) -> Vec<Instrument> {
        self.lock().candidates.clone()
    }

    pub fn is_open(&self) -> bool {
        self.lock().open
    }

    pub fn is_searching(&self) -> bool {
        self.lock().searching
    }

    pub fn error_message(&self) -> Option<String> {
        self.lock().error.clone()
    }

    fn lock(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().unwrap()
    }
}

impl Drop for TypeaheadSearch {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}
