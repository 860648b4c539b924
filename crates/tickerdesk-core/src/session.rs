//! Selection orchestration.
//!
//! [`SelectionController`] is the single writer of orchestration state: the
//! active instrument, the active tab, the snapshot, and the per-tab result
//! caches. It is a pure state machine: fetches are *issued* as tickets and
//! *applied* later, so every asynchronous completion passes an explicit
//! staleness check before it may mutate anything.
//!
//! The ordering rule is last-selection-wins. Each `select_instrument` bumps a
//! monotonic epoch; every ticket carries the epoch it was issued under, and a
//! completion whose epoch no longer matches is dropped without touching
//! state. The epoch subsumes a plain symbol comparison: re-selecting the same
//! symbol also invalidates outstanding work, because the caches were reset at
//! selection time. There is no transport-level abort; a slow stale response
//! is allowed to resolve and is then discarded here.
//!
//! [`Session`] wires the controller to an [`ApiClient`], implementing the
//! issue → await → apply cycle. The controller mutex is never held across a
//! suspension point.

use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::client::{ApiClient, DEFAULT_HORIZON_DAYS, DEFAULT_PERIOD};
use crate::domain::{AnalysisResult, Instrument, PredictionResult, StockSnapshot, Symbol};
use crate::error::ApiError;

/// The three content tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Prediction,
    Analysis,
}

impl Tab {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Prediction => "prediction",
            Self::Analysis => "analysis",
        }
    }
}

impl Display for Tab {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two tabs backed by a lazily filled cache slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultTab {
    Prediction,
    Analysis,
}

impl From<ResultTab> for Tab {
    fn from(value: ResultTab) -> Self {
        match value {
            ResultTab::Prediction => Self::Prediction,
            ResultTab::Analysis => Self::Analysis,
        }
    }
}

/// Coarse lifecycle state, derived from the concrete fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Empty,
    SnapshotLoading,
    Ready,
}

/// Identity a snapshot fetch was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotTicket {
    epoch: u64,
    symbol: Symbol,
}

impl SnapshotTicket {
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }
}

/// Identity a tab fetch was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabTicket {
    epoch: u64,
    symbol: Symbol,
    tab: ResultTab,
}

impl TabTicket {
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub const fn tab(&self) -> ResultTab {
        self.tab
    }
}

/// What a tab activation requires of the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabActivation {
    /// Cache hit or overview: the tab switched, nothing to fetch.
    Switched,
    /// Cache miss: fetch against this ticket, then apply.
    FetchNeeded(TabTicket),
    /// The same tab's fetch is already in flight; nothing new was issued.
    AlreadyLoading,
    /// No snapshot is present, so result tabs cannot activate.
    NotReady,
}

/// Whether a completed fetch was applied or discarded as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum ApplyOutcome {
    Applied,
    Stale,
}

/// State machine over the active selection. See the module docs for the
/// issue/apply discipline.
#[derive(Debug, Default)]
pub struct SelectionController {
    epoch: u64,
    active: Option<Instrument>,
    snapshot: Option<StockSnapshot>,
    prediction: Option<PredictionResult>,
    analysis: Option<AnalysisResult>,
    tab: Option<Tab>,
    error: Option<String>,
    snapshot_loading: bool,
    tab_loading: Option<ResultTab>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `instrument` the active selection and issue its snapshot fetch.
    ///
    /// Bumping the epoch cancels the relevance of every outstanding fetch.
    /// The prediction and analysis caches, the error slot, and any previous
    /// snapshot are cleared unconditionally.
    pub fn select_instrument(&mut self, instrument: Instrument) -> SnapshotTicket {
        self.epoch += 1;
        self.snapshot = None;
        self.prediction = None;
        self.analysis = None;
        self.error = None;
        self.tab_loading = None;
        self.snapshot_loading = true;

        let symbol = instrument.symbol.clone();
        self.active = Some(instrument);

        debug!(
            target: "tickerdesk::session",
            epoch = self.epoch,
            symbol = %symbol,
            "selection changed"
        );

        SnapshotTicket {
            epoch: self.epoch,
            symbol,
        }
    }

    /// Apply a completed snapshot fetch, unless it is stale.
    pub fn apply_snapshot(
        &mut self,
        ticket: SnapshotTicket,
        result: Result<StockSnapshot, ApiError>,
    ) -> ApplyOutcome {
        if ticket.epoch != self.epoch {
            debug!(
                target: "tickerdesk::session",
                symbol = %ticket.symbol,
                "dropping stale snapshot response"
            );
            return ApplyOutcome::Stale;
        }

        self.snapshot_loading = false;
        match result {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                self.tab = Some(Tab::Overview);
                self.error = None;
            }
            Err(error) => {
                // Back to the empty-equivalent state; the tab is untouched.
                self.snapshot = None;
                self.error = Some(error.message().to_owned());
            }
        }
        ApplyOutcome::Applied
    }

    /// Switch tabs, issuing a fetch only when a result tab's cache slot is
    /// empty. A populated slot switches with zero network calls.
    pub fn activate_tab(&mut self, tab: Tab) -> TabActivation {
        let result_tab = match tab {
            Tab::Overview => {
                // The snapshot is already present whenever a tab bar is
                // visible; overview never fetches.
                self.tab = Some(Tab::Overview);
                return TabActivation::Switched;
            }
            Tab::Prediction => ResultTab::Prediction,
            Tab::Analysis => ResultTab::Analysis,
        };

        if self.snapshot.is_none() {
            return TabActivation::NotReady;
        }

        let cached = match result_tab {
            ResultTab::Prediction => self.prediction.is_some(),
            ResultTab::Analysis => self.analysis.is_some(),
        };
        if cached {
            self.tab = Some(tab);
            return TabActivation::Switched;
        }

        if self.tab_loading == Some(result_tab) {
            return TabActivation::AlreadyLoading;
        }

        let symbol = match &self.active {
            Some(instrument) => instrument.symbol.clone(),
            None => return TabActivation::NotReady,
        };

        self.tab_loading = Some(result_tab);
        TabActivation::FetchNeeded(TabTicket {
            epoch: self.epoch,
            symbol,
            tab: result_tab,
        })
    }

    /// Apply a completed prediction fetch, unless it is stale. On success
    /// the tab switches; on failure the previous tab and every cached result
    /// stay as they were.
    pub fn apply_prediction(
        &mut self,
        ticket: TabTicket,
        result: Result<PredictionResult, ApiError>,
    ) -> ApplyOutcome {
        debug_assert_eq!(ticket.tab, ResultTab::Prediction);
        if self.tab_ticket_is_stale(&ticket) {
            return ApplyOutcome::Stale;
        }

        match result {
            Ok(prediction) => {
                self.prediction = Some(prediction);
                self.tab = Some(Tab::Prediction);
                self.error = None;
            }
            Err(error) => {
                self.error = Some(error.message().to_owned());
            }
        }
        ApplyOutcome::Applied
    }

    /// Apply a completed analysis fetch, unless it is stale. Same rules as
    /// [`Self::apply_prediction`].
    pub fn apply_analysis(
        &mut self,
        ticket: TabTicket,
        result: Result<AnalysisResult, ApiError>,
    ) -> ApplyOutcome {
        debug_assert_eq!(ticket.tab, ResultTab::Analysis);
        if self.tab_ticket_is_stale(&ticket) {
            return ApplyOutcome::Stale;
        }

        match result {
            Ok(analysis) => {
                self.analysis = Some(analysis);
                self.tab = Some(Tab::Analysis);
                self.error = None;
            }
            Err(error) => {
                self.error = Some(error.message().to_owned());
            }
        }
        ApplyOutcome::Applied
    }

    /// Retire the busy marker for a fetch that will never be applied, such
    /// as one whose driving future was cancelled between issue and apply.
    /// A stale ticket leaves newer state alone.
    pub fn abandon_tab_fetch(&mut self, ticket: &TabTicket) {
        if ticket.epoch == self.epoch && self.tab_loading == Some(ticket.tab) {
            self.tab_loading = None;
        }
    }

    /// Staleness gate shared by the tab applies. A current ticket also
    /// retires its busy marker.
    fn tab_ticket_is_stale(&mut self, ticket: &TabTicket) -> bool {
        if ticket.epoch != self.epoch {
            debug!(
                target: "tickerdesk::session",
                symbol = %ticket.symbol,
                tab = %Tab::from(ticket.tab),
                "dropping stale tab response"
            );
            return true;
        }

        if self.tab_loading == Some(ticket.tab) {
            self.tab_loading = None;
        }
        false
    }

    pub fn state(&self) -> SelectionState {
        if self.snapshot_loading {
            SelectionState::SnapshotLoading
        } else if self.snapshot.is_some() {
            SelectionState::Ready
        } else {
            SelectionState::Empty
        }
    }

    pub fn active_instrument(&self) -> Option<&Instrument> {
        self.active.as_ref()
    }

    pub fn active_symbol(&self) -> Option<&Symbol> {
        self.active.as_ref().map(|instrument| &instrument.symbol)
    }

    pub fn snapshot(&self) -> Option<&StockSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn prediction(&self) -> Option<&PredictionResult> {
        self.prediction.as_ref()
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn active_tab(&self) -> Option<Tab> {
        self.tab
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub const fn is_snapshot_loading(&self) -> bool {
        self.snapshot_loading
    }

    pub fn loading_tab(&self) -> Option<ResultTab> {
        self.tab_loading
    }
}

/// What an async tab activation did end to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// No fetch was needed.
    Switched,
    /// A fetch ran; the nested outcome says whether it was applied.
    Fetched(ApplyOutcome),
    AlreadyLoading,
    NotReady,
}

/// Async driver binding a [`SelectionController`] to an [`ApiClient`].
#[derive(Clone)]
pub struct Session {
    client: ApiClient,
    controller: Arc<Mutex<SelectionController>>,
}

impl Session {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            controller: Arc::new(Mutex::new(SelectionController::new())),
        }
    }

    /// Select an instrument and fetch its snapshot.
    pub async fn select(&self, instrument: Instrument) -> ApplyOutcome {
        let ticket = self.lock().select_instrument(instrument);
        let result = self.client.snapshot(ticket.symbol(), DEFAULT_PERIOD).await;
        self.lock().apply_snapshot(ticket, result)
    }

    /// Activate a tab, fetching its result on a cache miss. The prediction
    /// horizon is fixed at [`DEFAULT_HORIZON_DAYS`].
    ///
    /// Cancelling the returned future between issue and apply abandons the
    /// fetch: the tab's busy marker is released so a later activation can
    /// issue a fresh one.
    pub async fn activate(&self, tab: Tab) -> ActivationOutcome {
        let activation = self.lock().activate_tab(tab);
        let ticket = match activation {
            TabActivation::Switched => return ActivationOutcome::Switched,
            TabActivation::AlreadyLoading => return ActivationOutcome::AlreadyLoading,
            TabActivation::NotReady => return ActivationOutcome::NotReady,
            TabActivation::FetchNeeded(ticket) => ticket,
        };

        let mut guard = TabFetchGuard {
            controller: Arc::clone(&self.controller),
            ticket: Some(ticket.clone()),
        };

        let outcome = match ticket.tab() {
            ResultTab::Prediction => {
                let result = self
                    .client
                    .prediction(ticket.symbol(), DEFAULT_HORIZON_DAYS)
                    .await;
                guard.ticket = None;
                self.lock().apply_prediction(ticket, result)
            }
            ResultTab::Analysis => {
                let result = self.client.analysis(ticket.symbol()).await;
                guard.ticket = None;
                self.lock().apply_analysis(ticket, result)
            }
        };
        ActivationOutcome::Fetched(outcome)
    }

    /// Read a view of the orchestration state.
    pub fn read<R>(&self, f: impl FnOnce(&SelectionController) -> R) -> R {
        f(&self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SelectionController> {
        self.controller.lock().unwrap()
    }
}

/// Releases a tab's busy marker if the activation future is dropped before
/// its apply runs. Disarmed by taking the ticket out once the result is in
/// hand.
struct TabFetchGuard {
    controller: Arc<Mutex<SelectionController>>,
    ticket: Option<TabTicket>,
}

impl Drop for TabFetchGuard {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            if let Ok(mut controller) = self.controller.lock() {
                controller.abandon_tab_fetch(&ticket);
            }
        }
    }
}
