//! Domain model types (pure).
//!
//! All types in this module are pure data: page contracts, fetch
//! identifiers and the error taxonomy.

pub mod error;
pub mod identifiers;
pub mod page;

// Re-export for convenience
pub use error::{AppError, ControllerError, DatasetError, FetchError};
pub use identifiers::{Generation, RequestId};
pub use page::{FilterParams, PageRequest, PageResponse};
