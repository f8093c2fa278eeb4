//! List state machine (pure).
//!
//! All state transitions are plain method calls testable without threads,
//! clocks or a backend. Time is passed in where it matters.

pub mod accumulator;
pub mod controller;
pub mod debounce;
pub mod selection;
pub mod snapshot;

// Re-export for convenience
pub use accumulator::{Accumulator, MergeKind, PageInfo};
pub use controller::{
    ControllerConfig, DiscardReason, FetchCommand, FetchKind, FetchTicket, ListController,
    SettleOutcome,
};
pub use debounce::Debouncer;
pub use selection::{selection_channel, SelectionOutcome, SelectionReceiver, SelectionSender};
pub use snapshot::ListSnapshot;
