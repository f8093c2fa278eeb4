//! pagectl
//!
//! Incremental pagination and debounced search for list screens.
//!
//! Pure core / impure shell:
//! - [`model`] and [`state`] hold the data contracts and the list state
//!   machine. Time is passed in; nothing here blocks or spawns.
//! - [`source`], [`driver`], [`config`], [`logging`] and [`script`] do the
//!   I/O: fetching pages, running the event loop, loading settings.

pub mod config;
pub mod driver;
pub mod logging;
pub mod model;
pub mod script;
pub mod source;
pub mod state;
