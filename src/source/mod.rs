//! Fetch capabilities.
//!
//! This module provides the sources a list controller can page through:
//! - [`PageSource`], the fetch capability contract
//! - [`MemorySource`], an in-memory record set with search and filters
//! - [`load_dataset`], loading records for a `MemorySource` from disk
//!
//! The controller never sees a source directly; the driver runs
//! `fetch` off the event loop and feeds the result back.

use crate::model::{FetchError, PageRequest, PageResponse};

pub mod file;
pub mod memory;

pub use file::load_dataset;
pub use memory::MemorySource;

/// Fetch capability: answer one page request.
///
/// Blocking. Implementations decide how the page is produced (REST call,
/// in-memory slice, fixture) and classify their own failures; the
/// controller surfaces any `FetchError` unchanged.
pub trait PageSource<T>: Send + Sync {
    /// Fetch the page described by `request`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` when the page could not be produced.
    fn fetch(&self, request: &PageRequest) -> Result<PageResponse<T>, FetchError>;
}

impl<T, F> PageSource<T> for F
where
    F: Fn(&PageRequest) -> Result<PageResponse<T>, FetchError> + Send + Sync,
{
    fn fetch(&self, request: &PageRequest) -> Result<PageResponse<T>, FetchError> {
        self(request)
    }
}
