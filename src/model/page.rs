//! Page request/response contracts.
//!
//! These are the typed seam between the list controller and whatever
//! fetch capability backs it. Keeping them as explicit structs lets the
//! merge logic be tested without any backend.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Extra fixed filter fields sent with every page request
/// (e.g. `status=active`, `family_id=12`).
pub type FilterParams = BTreeMap<String, String>;

// ===== PageRequest =====

/// Parameters for fetching one page.
///
/// Built fresh for each fetch and immutable afterwards. `filters` are
/// flattened when serialized so an HTTP source can emit them as plain
/// query parameters next to `page`/`limit`/`search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    search: Option<String>,
    #[serde(flatten)]
    filters: FilterParams,
}

impl PageRequest {
    /// Build a request. An empty `search` is sent as no search at all.
    pub fn new(page: u32, limit: u32, search: &str, filters: FilterParams) -> Self {
        let search = if search.is_empty() {
            None
        } else {
            Some(search.to_string())
        };

        Self {
            page,
            limit,
            search,
            filters,
        }
    }

    /// 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Page size.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Search text, if any.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Fixed filter fields.
    pub fn filters(&self) -> &FilterParams {
        &self.filters
    }

    /// Zero-based index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.limit as usize
    }
}

// ===== PageResponse =====

/// One page as returned by a fetch capability.
///
/// `total_pages` and `total_count` are optional: some backends omit them,
/// and the controller infers pagination from the page fill instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// Items on this page, in backend order.
    pub data: Vec<T>,
    /// 1-based page number this response answers.
    pub page: u32,
    /// Page size the backend applied.
    pub limit: u32,
    /// Total number of pages, when the backend reports it.
    #[serde(default)]
    pub total_pages: Option<u32>,
    /// Total number of matching items, when the backend reports it.
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl<T> PageResponse<T> {
    /// Response without totals (partial backend contract).
    pub fn new(data: Vec<T>, page: u32, limit: u32) -> Self {
        Self {
            data,
            page,
            limit,
            total_pages: None,
            total_count: None,
        }
    }

    /// Attach backend-reported totals.
    pub fn with_totals(mut self, total_pages: u32, total_count: u64) -> Self {
        self.total_pages = Some(total_pages);
        self.total_count = Some(total_count);
        self
    }

    /// Whether the page came back full.
    pub fn is_full(&self) -> bool {
        self.data.len() == self.limit as usize
    }

    /// Total pages, inferred when the backend omitted it.
    ///
    /// Without a reported value, a full page implies at least one more
    /// page (`page + 1`); a short page is the last one. This misfires when
    /// the item count is an exact multiple of `limit`: the caller sees one
    /// extra, empty page.
    pub fn resolved_total_pages(&self) -> u32 {
        match self.total_pages {
            Some(total) => total,
            None if self.is_full() => self.page + 1,
            None => self.page,
        }
    }
}

// ===== Tests =====
