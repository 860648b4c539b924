//! Periodic live-quote refresh for the active symbol.
//!
//! The poll task is an explicitly owned handle stored alongside the symbol
//! it was created for, and it is aborted on symbol change, on [`stop`], and
//! on drop; a timer that keeps fetching after teardown is a defect, not a
//! nuisance. Fetch failures never reach shared error state: they are logged
//! and the previous quote stays on display; the next scheduled tick is the
//! only retry.
//!
//! State lives in a `tokio::sync::watch` channel so consumers can either
//! read the current quote or await refreshes.
//!
//! [`stop`]: LiveQuotePoller::stop

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::domain::{LiveQuote, Symbol};

/// Fixed period at which the live quote is unconditionally re-fetched.
pub const POLL_PERIOD: Duration = Duration::from_secs(30);

/// Current poller state: the watched symbol and its latest quote.
#[derive(Debug, Clone, Default)]
pub struct LiveQuoteState {
    pub symbol: Option<Symbol>,
    pub quote: Option<LiveQuote>,
}

struct PollTask {
    symbol: Symbol,
    handle: JoinHandle<()>,
}

/// Continuously refreshing quote for exactly one symbol at a time.
pub struct LiveQuotePoller {
    client: ApiClient,
    updates: watch::Sender<LiveQuoteState>,
    task: Option<PollTask>,
}

impl LiveQuotePoller {
    pub fn new(client: ApiClient) -> Self {
        let (updates, _) = watch::channel(LiveQuoteState::default());
        Self {
            client,
            updates,
            task: None,
        }
    }

    /// Start polling `symbol`: one immediate fetch, then one every
    /// [`POLL_PERIOD`] until the symbol changes or the poller is torn down.
    ///
    /// Watching the symbol that is already being polled is a no-op; the
    /// running timer keeps its phase. A different symbol aborts the old task
    /// and discards the old quote before the first new fetch resolves.
    pub fn watch(&mut self, symbol: Symbol) {
        if self
            .task
            .as_ref()
            .is_some_and(|task| task.symbol == symbol)
        {
            return;
        }

        self.abort_task();
        self.updates.send_replace(LiveQuoteState {
            symbol: Some(symbol.clone()),
            quote: None,
        });

        let client = self.client.clone();
        let updates = self.updates.clone();
        let poll_symbol = symbol.clone();

        let handle = tokio::spawn(async move {
            let mut ticks = tokio::time::interval(POLL_PERIOD);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                fetch_and_store(&client, &updates, &poll_symbol).await;
            }
        });

        self.task = Some(PollTask { symbol, handle });
    }

    /// Manual refresh: one out-of-band fetch through the same path. The
    /// periodic timer is neither reset nor cancelled, and overlapping
    /// completions are not coalesced; the last writer wins.
    pub async fn refresh(&self) {
        let symbol = self.updates.borrow().symbol.clone();
        if let Some(symbol) = symbol {
            fetch_and_store(&self.client, &self.updates, &symbol).await;
        }
    }

    /// Tear down: stop the timer and forget the symbol and quote.
    pub fn stop(&mut self) {
        self.abort_task();
        self.updates.send_replace(LiveQuoteState::default());
    }

    /// Subscribe to refreshes. The receiver observes every applied quote
    /// and every symbol change; failed fetches produce no notification.
    pub fn subscribe(&self) -> watch::Receiver<LiveQuoteState> {
        self.updates.subscribe()
    }

    pub fn quote(&self) -> Option<LiveQuote> {
        self.updates.borrow().quote.clone()
    }

    pub fn symbol(&self) -> Option<Symbol> {
        self.updates.borrow().symbol.clone()
    }

    pub fn is_polling(&self) -> bool {
        self.task.is_some()
    }

    fn abort_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.handle.abort();
        }
    }
}

impl Drop for LiveQuotePoller {
    fn drop(&mut self) {
        self.abort_task();
    }
}

/// Shared fetch path for scheduled ticks and manual refresh. A completed
/// fetch is stored only while its symbol is still the watched one.
async fn fetch_and_store(
    client: &ApiClient,
    updates: &watch::Sender<LiveQuoteState>,
    symbol: &Symbol,
) {
    match client.live_quote(symbol).await {
        Ok(quote) => {
            updates.send_if_modified(|state| {
                if state.symbol.as_ref() == Some(symbol) {
                    state.quote = Some(quote);
                    true
                } else {
                    debug!(
                        target: "tickerdesk::poller",
                        %symbol,
                        "dropping stale live quote"
                    );
                    false
                }
            });
        }
        Err(error) => {
            // Keep the last good quote; the next tick is the only retry.
            warn!(
                target: "tickerdesk::poller",
                %symbol,
                error = %error,
                "live quote fetch failed"
            );
        }
    }
}
