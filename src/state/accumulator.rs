//! Page accumulator.
//!
//! Merges successive page responses into one ordered list:
//! - page 1 replaces everything (new search, refresh)
//! - page `last_page + 1` appends in received order
//! - any other page is rejected and leaves the state untouched

use crate::model::PageResponse;

/// Pagination facts from the most recently merged page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Page number of the merged response.
    pub page: u32,
    /// Page size the backend applied.
    pub limit: u32,
    /// Total pages, as reported or inferred.
    pub total_pages: u32,
    /// Total matching items, when the backend reports it.
    pub total_count: Option<u64>,
}

/// How a response was merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeKind {
    /// Page 1: items were replaced wholesale.
    Replaced,
    /// Page > 1: items were appended.
    Appended,
}

/// Accumulated items across pages of one search.
#[derive(Debug, Clone)]
pub struct Accumulator<T> {
    items: Vec<T>,
    last_page: u32,
    pagination: Option<PageInfo>,
}

impl<T> Default for Accumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Accumulator<T> {
    /// Empty accumulator: no items, no page merged yet.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            last_page: 0,
            pagination: None,
        }
    }

    /// Items in page order, then within-page order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Last merged page, 0 if none.
    pub fn last_page(&self) -> u32 {
        self.last_page
    }

    /// Pagination from the last merged page.
    pub fn pagination(&self) -> Option<PageInfo> {
        self.pagination
    }

    /// True iff a page was merged and it is not the last page.
    pub fn has_more_pages(&self) -> bool {
        self.pagination
            .is_some_and(|info| self.last_page < info.total_pages)
    }

    /// The page that `load_more` would request next.
    pub fn next_page(&self) -> u32 {
        self.last_page + 1
    }

    /// Drop all items and pagination.
    pub fn reset(&mut self) {
        self.items.clear();
        self.last_page = 0;
        self.pagination = None;
    }

    /// Merge one settled page.
    ///
    /// Returns `None`, leaving the state untouched, when the page is neither
    /// 1 nor the next page in sequence.
    pub fn merge(&mut self, response: PageResponse<T>) -> Option<MergeKind> {
        let kind = if response.page == 1 {
            MergeKind::Replaced
        } else if response.page == self.next_page() {
            MergeKind::Appended
        } else {
            return None;
        };

        let info = PageInfo {
            page: response.page,
            limit: response.limit,
            total_pages: response.resolved_total_pages(),
            total_count: response.total_count,
        };

        match kind {
            MergeKind::Replaced => self.items = response.data,
            MergeKind::Appended => self.items.extend(response.data),
        }
        self.last_page = info.page;
        self.pagination = Some(info);

        Some(kind)
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "accumulator_tests.rs"]
mod tests;
