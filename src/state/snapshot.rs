//! Read-only list state exposed to the UI.
//!
//! A snapshot borrows from the controller; the screen renders it and
//! drops it before the next action.

use crate::model::FetchError;

/// Composite UI state of a paginated list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot<'a, T> {
    /// Accumulated items.
    pub items: &'a [T],
    /// No successful response yet and the first fetch is in flight.
    pub is_loading: bool,
    /// A fetch of the current generation is in flight.
    pub is_fetching: bool,
    /// A pull-to-refresh fetch is in flight.
    pub is_refreshing: bool,
    /// Another page can be requested.
    pub has_more_pages: bool,
    /// Raw text as typed, echoed by the search field.
    pub search_text: &'a str,
    /// Debounced query the current items belong to.
    pub search_query: &'a str,
    /// A response has been merged at least once.
    pub ready: bool,
    /// Error from the last failed fetch, unchanged.
    pub error: Option<&'a FetchError>,
    /// Last merged page, 0 if none.
    pub current_page: u32,
    /// Total pages as reported or inferred.
    pub total_pages: Option<u32>,
    /// Total matching items, when the backend reports it.
    pub total_count: Option<u64>,
}

impl<T> ListSnapshot<'_, T> {
    /// Footer spinner: loading more below existing items.
    pub fn is_fetching_more(&self) -> bool {
        self.is_fetching && !self.is_refreshing && !self.is_loading && !self.items.is_empty()
    }

    /// Settled on an empty result with nothing in flight.
    pub fn is_empty_result(&self) -> bool {
        self.ready && !self.is_fetching && self.error.is_none() && self.items.is_empty()
    }

    /// The search field shows text the list does not reflect yet.
    pub fn is_search_pending(&self) -> bool {
        self.search_text != self.search_query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base<'a>(items: &'a [u32]) -> ListSnapshot<'a, u32> {
        ListSnapshot {
            items,
            is_loading: false,
            is_fetching: false,
            is_refreshing: false,
            has_more_pages: false,
            search_text: "",
            search_query: "",
            ready: true,
            error: None,
            current_page: 1,
            total_pages: Some(1),
            total_count: None,
        }
    }

    #[test]
    fn fetching_more_requires_existing_items() {
        let snap = ListSnapshot {
            is_fetching: true,
            ..base(&[])
        };
        assert!(!snap.is_fetching_more());

        let items = [1, 2];
        let snap = ListSnapshot {
            is_fetching: true,
            ..base(&items)
        };
        assert!(snap.is_fetching_more());
    }

    #[test]
    fn refreshing_is_not_fetching_more() {
        let items = [1];
        let snap = ListSnapshot {
            is_fetching: true,
            is_refreshing: true,
            ..base(&items)
        };
        assert!(!snap.is_fetching_more());
    }

    #[test]
    fn empty_result_only_when_settled() {
        assert!(base(&[]).is_empty_result());

        let in_flight = ListSnapshot {
            is_fetching: true,
            ..base(&[])
        };
        assert!(!in_flight.is_empty_result());

        let not_ready = ListSnapshot {
            ready: false,
            ..base(&[])
        };
        assert!(!not_ready.is_empty_result());
    }

    #[test]
    fn failed_fetch_is_not_an_empty_result() {
        let err = FetchError::Network("down".to_string());
        let snap = ListSnapshot {
            error: Some(&err),
            ..base(&[])
        };
        assert!(!snap.is_empty_result());
    }

    #[test]
    fn search_pending_while_text_differs() {
        let snap = ListSnapshot {
            search_text: "abc",
            search_query: "ab",
            ..base(&[])
        };
        assert!(snap.is_search_pending());
        assert!(!base(&[]).is_search_pending());
    }
}
