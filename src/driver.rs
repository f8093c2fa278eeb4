//! Event-loop shell around a [`ListController`].
//!
//! The controller state lives on the caller's thread and is only mutated
//! there. Fetches run on short-lived worker threads and come back through a
//! channel, so settled results are applied one at a time in settle order.
//! Every action returns immediately; effects show up in a later snapshot
//! after `poll` or `wait_until_idle`.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, error};

use crate::model::{ControllerError, FetchError, PageResponse};
use crate::source::PageSource;
use crate::state::{ControllerConfig, FetchCommand, FetchTicket, ListController, ListSnapshot};

/// A fetch result on its way back to the event loop.
struct Settled<T> {
    ticket: FetchTicket,
    result: Result<PageResponse<T>, FetchError>,
}

/// Controller plus the fetch capability it pages through.
pub struct ListDriver<T> {
    controller: ListController<T>,
    source: Arc<dyn PageSource<T>>,
    tx: Sender<Settled<T>>,
    rx: Receiver<Settled<T>>,
    outstanding: usize,
    dispatched: usize,
}

impl<T: Send + 'static> ListDriver<T> {
    /// Mount a controller over `source` and dispatch the first page.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError` if `config` is rejected.
    pub fn spawn(
        source: Arc<dyn PageSource<T>>,
        config: ControllerConfig,
    ) -> Result<Self, ControllerError> {
        let (controller, first) = ListController::new(config)?;
        let (tx, rx) = mpsc::channel();

        let mut driver = Self {
            controller,
            source,
            tx,
            rx,
            outstanding: 0,
            dispatched: 0,
        };
        driver.dispatch(first);
        Ok(driver)
    }

    // ----- Actions -----

    /// Forward a keystroke; the search fetch fires once it settles.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.controller.set_search_text(text, Instant::now());
    }

    /// Wire to the list's "reached end" event.
    pub fn load_more(&mut self) {
        if let Some(cmd) = self.controller.load_more() {
            self.dispatch(cmd);
        }
    }

    /// Wire to pull-to-refresh.
    pub fn refresh(&mut self) {
        if let Some(cmd) = self.controller.refresh() {
            self.dispatch(cmd);
        }
    }

    /// Wire to the error view's retry button.
    pub fn retry(&mut self) {
        if let Some(cmd) = self.controller.retry() {
            self.dispatch(cmd);
        }
    }

    // ----- Event loop -----

    /// Apply everything that is ready right now: settled fetches in arrival
    /// order, then the debounce timer if due. Never blocks.
    ///
    /// Returns the number of events handled.
    pub fn poll(&mut self, now: Instant) -> usize {
        let mut handled = 0;

        while let Ok(settled) = self.rx.try_recv() {
            self.apply(settled);
            handled += 1;
        }

        if let Some(cmd) = self.controller.poll_debounce(now) {
            self.dispatch(cmd);
            handled += 1;
        }

        handled
    }

    /// Pump events until no search is pending and no fetch (stale ones
    /// included) is outstanding, or until `timeout` passes.
    ///
    /// Returns `true` if the driver went idle.
    pub fn wait_until_idle(&mut self, timeout: Duration) -> bool {
        let give_up = Instant::now() + timeout;

        loop {
            self.poll(Instant::now());
            if self.is_idle() {
                return true;
            }

            let now = Instant::now();
            if now >= give_up {
                debug!(outstanding = self.outstanding, "wait_until_idle timed out");
                return false;
            }

            let wake = self
                .controller
                .next_deadline()
                .map_or(give_up, |deadline| deadline.min(give_up));

            match self.rx.recv_timeout(wake.saturating_duration_since(now)) {
                Ok(settled) => self.apply(settled),
                Err(RecvTimeoutError::Timeout) => {}
                // We hold a sender ourselves, so this cannot happen.
                Err(RecvTimeoutError::Disconnected) => return false,
            }
        }
    }

    /// Nothing pending: no debounce timer, no fetch outstanding.
    pub fn is_idle(&self) -> bool {
        self.outstanding == 0 && self.controller.next_deadline().is_none()
    }

    // ----- Observation -----

    /// Current UI state.
    pub fn snapshot(&self) -> ListSnapshot<'_, T> {
        self.controller.snapshot()
    }

    /// The wrapped controller.
    pub fn controller(&self) -> &ListController<T> {
        &self.controller
    }

    /// Fetches dispatched since mount, stale ones included.
    pub fn fetch_count(&self) -> usize {
        self.dispatched
    }

    // ----- Internals -----

    fn apply(&mut self, settled: Settled<T>) {
        self.outstanding = self.outstanding.saturating_sub(1);
        let outcome = self.controller.settle(settled.ticket, settled.result);
        debug!(request = %settled.ticket.id(), ?outcome, "fetch settled");
    }

    fn dispatch(&mut self, cmd: FetchCommand) {
        self.outstanding += 1;
        self.dispatched += 1;

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let FetchCommand { ticket, request } = cmd;

        let spawned = thread::Builder::new()
            .name(format!("pagectl-fetch-{}", ticket.id().get()))
            .spawn(move || {
                let result = source.fetch(&request);
                // Receiver gone means the driver was dropped; nothing to report to.
                let _ = tx.send(Settled { ticket, result });
            });

        if let Err(e) = spawned {
            error!(error = %e, "failed to spawn fetch worker");
            let result = Err(FetchError::Network(format!("failed to spawn fetch worker: {e}")));
            // Route through the channel so it settles like any other result.
            let _ = self.tx.send(Settled { ticket, result });
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
