//! Paginated list controller (pure).
//!
//! Owns the search text, the debounced query, the page accumulator and the
//! in-flight bookkeeping for one list screen. It never performs I/O: every
//! action that needs data returns a [`FetchCommand`] for the shell to run,
//! and the shell hands the result back through [`ListController::settle`].
//!
//! Ordering rules:
//! - each new search and each refresh starts a new [`Generation`]; results
//!   tagged with an older generation are discarded when they settle
//! - within a generation at most one fetch is in flight, and only the
//!   ticket of that fetch is accepted
//! - `last_fetched_page` blocks a second request for the same next page

use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::model::{
    ControllerError, FetchError, FilterParams, Generation, PageRequest, PageResponse, RequestId,
};
use crate::state::accumulator::{Accumulator, MergeKind};
use crate::state::debounce::Debouncer;
use crate::state::snapshot::ListSnapshot;

// ===== Configuration =====

/// Fixed parameters of one controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Items per page. Must be > 0.
    pub page_size: u32,
    /// Quiet period before search text propagates.
    pub debounce: Duration,
    /// Extra filter fields sent with every request.
    pub filters: FilterParams,
}

impl ControllerConfig {
    /// Debounce applied when none is configured.
    pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

    /// Page size applied when none is configured.
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    /// Config with the given page size, default debounce and no filters.
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            debounce: Self::DEFAULT_DEBOUNCE,
            filters: FilterParams::new(),
        }
    }

    /// Override the search debounce.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set the fixed filter fields.
    pub fn with_filters(mut self, filters: FilterParams) -> Self {
        self.filters = filters;
        self
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE_SIZE)
    }
}

// ===== Fetch commands =====

/// Identity of one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    id: RequestId,
    generation: Generation,
    page: u32,
}

impl FetchTicket {
    /// Unique id of this fetch.
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Epoch the fetch was issued in.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Page this fetch asked for.
    pub fn page(&self) -> u32 {
        self.page
    }
}

/// A fetch the shell must perform, then report via `settle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCommand {
    /// Hand this back with the result.
    pub ticket: FetchTicket,
    /// What to fetch.
    pub request: PageRequest,
}

/// Why a fetch was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// First page at mount.
    Initial,
    /// First page of a new debounced search.
    Search,
    /// Next page.
    LoadMore,
    /// Pull-to-refresh.
    Refresh,
    /// Re-issue of a failed fetch.
    Retry,
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    ticket: FetchTicket,
    kind: FetchKind,
}

// ===== Settle outcome =====

/// What `settle` did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// Page merged into items.
    Merged(MergeKind),
    /// Fetch failed; error stored, items untouched.
    Failed,
    /// Result ignored, state untouched apart from in-flight bookkeeping.
    Discarded(DiscardReason),
}

/// Why a settled result was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// Issued before the latest search or refresh.
    StaleGeneration,
    /// Current generation, but not the fetch the controller is waiting for.
    NotInFlight,
    /// Response page does not fit the accumulated sequence.
    PageMismatch,
}

// ===== ListController =====

/// Incremental pagination and debounced search over one list.
#[derive(Debug)]
pub struct ListController<T> {
    config: ControllerConfig,
    search_text: String,
    search_query: String,
    debouncer: Debouncer<String>,
    generation: Generation,
    next_request: RequestId,
    accumulator: Accumulator<T>,
    last_fetched_page: u32,
    in_flight: Option<InFlight>,
    refreshing: bool,
    ready: bool,
    error: Option<FetchError>,
    failed_page: Option<u32>,
}

impl<T> ListController<T> {
    /// Mount a controller and issue the first page-1 fetch.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::InvalidPageSize` if `page_size` is 0.
    pub fn new(config: ControllerConfig) -> Result<(Self, FetchCommand), ControllerError> {
        if config.page_size == 0 {
            return Err(ControllerError::InvalidPageSize);
        }

        let debouncer = Debouncer::new(config.debounce);
        let mut controller = Self {
            config,
            search_text: String::new(),
            search_query: String::new(),
            debouncer,
            generation: Generation::initial(),
            next_request: RequestId::initial(),
            accumulator: Accumulator::new(),
            last_fetched_page: 0,
            in_flight: None,
            refreshing: false,
            ready: false,
            error: None,
            failed_page: None,
        };

        let command = controller.issue(1, FetchKind::Initial);
        Ok((controller, command))
    }

    /// Parameters fixed at mount.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Current search/refresh epoch.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Whether the current generation has a fetch in flight.
    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    // ----- Search -----

    /// Record a keystroke. The text is echoed immediately; the fetch layer
    /// only sees it once `debounce` passes without another change.
    pub fn set_search_text(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        trace!(text = %text, "search text changed");
        self.search_text = text.clone();
        self.debouncer.schedule(text, now);
    }

    /// When `poll_debounce` should next be called, if a search is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Timer callback: start a new search if the pending text has settled.
    ///
    /// Settling on the query that is already active fetches nothing.
    pub fn poll_debounce(&mut self, now: Instant) -> Option<FetchCommand> {
        let settled = self.debouncer.poll(now)?;

        if settled == self.search_query {
            trace!(query = %settled, "debounced query unchanged");
            return None;
        }

        debug!(from = %self.search_query, to = %settled, "new search");
        self.search_query = settled;
        self.start_generation();
        Some(self.issue(1, FetchKind::Search))
    }

    // ----- Actions -----

    /// Request the next page.
    ///
    /// No-op when there are no more pages or the next page was already
    /// requested.
    pub fn load_more(&mut self) -> Option<FetchCommand> {
        if !self.accumulator.has_more_pages() {
            debug!(page = self.accumulator.last_page(), "load_more ignored: no more pages");
            return None;
        }

        let next = self.accumulator.next_page();
        if next == self.last_fetched_page {
            debug!(page = next, "load_more ignored: page already requested");
            return None;
        }

        Some(self.issue(next, FetchKind::LoadMore))
    }

    /// Pull-to-refresh: clear items and refetch page 1 with the current
    /// debounced query. No-op while a refresh is already in flight.
    pub fn refresh(&mut self) -> Option<FetchCommand> {
        if self.refreshing {
            debug!("refresh ignored: already refreshing");
            return None;
        }

        self.start_generation();
        self.refreshing = true;
        Some(self.issue(1, FetchKind::Refresh))
    }

    /// Re-issue the fetch that last failed in this generation.
    ///
    /// No-op when nothing failed or a fetch is already in flight.
    pub fn retry(&mut self) -> Option<FetchCommand> {
        if self.in_flight.is_some() {
            debug!("retry ignored: fetch in flight");
            return None;
        }

        let Some(page) = self.failed_page else {
            debug!("retry ignored: nothing failed");
            return None;
        };

        Some(self.issue(page, FetchKind::Retry))
    }

    // ----- Results -----

    /// Apply a settled fetch.
    ///
    /// Results are applied in the order they settle. Anything that does not
    /// match the in-flight fetch of the current generation is discarded
    /// without touching items.
    pub fn settle(
        &mut self,
        ticket: FetchTicket,
        result: Result<PageResponse<T>, FetchError>,
    ) -> SettleOutcome {
        if ticket.generation != self.generation {
            debug!(
                request = %ticket.id,
                generation = %ticket.generation,
                current = %self.generation,
                "discarding stale response"
            );
            return SettleOutcome::Discarded(DiscardReason::StaleGeneration);
        }

        let in_flight = match self.in_flight {
            Some(f) if f.ticket == ticket => f,
            _ => {
                debug!(request = %ticket.id, "discarding response for fetch not in flight");
                return SettleOutcome::Discarded(DiscardReason::NotInFlight);
            }
        };
        self.in_flight = None;
        if in_flight.kind == FetchKind::Refresh {
            self.refreshing = false;
        }

        match result {
            Ok(response) => self.merge(ticket, response),
            Err(err) => {
                warn!(request = %ticket.id, page = ticket.page, error = %err, "fetch failed");
                self.last_fetched_page = self.accumulator.last_page();
                self.failed_page = Some(ticket.page);
                self.error = Some(err);
                SettleOutcome::Failed
            }
        }
    }

    fn merge(&mut self, ticket: FetchTicket, response: PageResponse<T>) -> SettleOutcome {
        if response.page != ticket.page {
            warn!(
                requested = ticket.page,
                received = response.page,
                "discarding response for a different page"
            );
            self.last_fetched_page = self.accumulator.last_page();
            return SettleOutcome::Discarded(DiscardReason::PageMismatch);
        }

        let received = response.data.len();
        match self.accumulator.merge(response) {
            Some(kind) => {
                debug!(
                    request = %ticket.id,
                    page = ticket.page,
                    received,
                    total = self.accumulator.items().len(),
                    ?kind,
                    "page merged"
                );
                self.ready = true;
                self.error = None;
                self.failed_page = None;
                SettleOutcome::Merged(kind)
            }
            None => {
                warn!(page = ticket.page, "discarding out-of-sequence page");
                self.last_fetched_page = self.accumulator.last_page();
                SettleOutcome::Discarded(DiscardReason::PageMismatch)
            }
        }
    }

    // ----- Snapshot -----

    /// Current UI state.
    pub fn snapshot(&self) -> ListSnapshot<'_, T> {
        let pagination = self.accumulator.pagination();
        ListSnapshot {
            items: self.accumulator.items(),
            is_loading: !self.ready && self.in_flight.is_some(),
            is_fetching: self.in_flight.is_some(),
            is_refreshing: self.refreshing,
            has_more_pages: self.accumulator.has_more_pages(),
            search_text: &self.search_text,
            search_query: &self.search_query,
            ready: self.ready,
            error: self.error.as_ref(),
            current_page: self.accumulator.last_page(),
            total_pages: pagination.map(|p| p.total_pages),
            total_count: pagination.and_then(|p| p.total_count),
        }
    }

    // ----- Internals -----

    /// Invalidate everything issued so far and empty the list.
    fn start_generation(&mut self) {
        self.generation = self.generation.next();
        self.accumulator.reset();
        self.last_fetched_page = 0;
        self.in_flight = None;
        self.refreshing = false;
        self.error = None;
        self.failed_page = None;
    }

    fn issue(&mut self, page: u32, kind: FetchKind) -> FetchCommand {
        let ticket = FetchTicket {
            id: self.next_request,
            generation: self.generation,
            page,
        };
        self.next_request = self.next_request.next();
        self.last_fetched_page = page;
        self.in_flight = Some(InFlight { ticket, kind });

        let request = PageRequest::new(
            page,
            self.config.page_size,
            &self.search_query,
            self.config.filters.clone(),
        );

        debug!(
            request = %ticket.id,
            generation = %ticket.generation,
            page,
            search = %self.search_query,
            ?kind,
            "fetch issued"
        );

        FetchCommand { ticket, request }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
