//! Selection result passing between list screens.
//!
//! A screen opened to pick an item gets a [`SelectionSender`]; the screen that
//! opened it keeps the matching [`SelectionReceiver`]. The sender is consumed
//! by `select` or `cancel`, so a picker can answer at most once, and dropping
//! it unanswered reads as a cancellation.

use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};

/// Result of a pick as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome<T> {
    /// The picker chose an item.
    Selected(T),
    /// The picker closed without choosing.
    Cancelled,
    /// The picker is still open.
    Pending,
}

/// Picker side: answers exactly once.
#[derive(Debug)]
pub struct SelectionSender<T> {
    tx: SyncSender<T>,
}

/// Caller side: observes the answer.
#[derive(Debug)]
pub struct SelectionReceiver<T> {
    rx: Receiver<T>,
}

/// Create a connected sender/receiver pair for one pick.
pub fn selection_channel<T>() -> (SelectionSender<T>, SelectionReceiver<T>) {
    let (tx, rx) = mpsc::sync_channel(1);
    (SelectionSender { tx }, SelectionReceiver { rx })
}

impl<T> SelectionSender<T> {
    /// Deliver the chosen item.
    ///
    /// Returns the item back if the caller is gone.
    pub fn select(self, item: T) -> Result<(), T> {
        // Capacity 1 and a single send: try_send can only fail on disconnect.
        self.tx.try_send(item).map_err(|e| match e {
            mpsc::TrySendError::Full(item) | mpsc::TrySendError::Disconnected(item) => item,
        })
    }

    /// Close the picker without choosing.
    pub fn cancel(self) {}
}

impl<T> SelectionReceiver<T> {
    /// Non-blocking check for the answer.
    pub fn try_outcome(&self) -> SelectionOutcome<T> {
        match self.rx.try_recv() {
            Ok(item) => SelectionOutcome::Selected(item),
            Err(TryRecvError::Empty) => SelectionOutcome::Pending,
            Err(TryRecvError::Disconnected) => SelectionOutcome::Cancelled,
        }
    }

    /// Block until the picker answers or goes away.
    pub fn wait(self) -> SelectionOutcome<T> {
        match self.rx.recv() {
            Ok(item) => SelectionOutcome::Selected(item),
            Err(_) => SelectionOutcome::Cancelled,
        }
    }
}
