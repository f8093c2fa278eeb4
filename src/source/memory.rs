//! In-memory page source over JSON records.
//!
//! Stands in for the REST backend: applies fixed filters as exact field
//! matches, the search as a case-insensitive substring match over string
//! fields, then slices the requested page.

use crate::model::{FetchError, PageRequest, PageResponse};
use crate::source::PageSource;
use serde_json::Value;
use std::time::Duration;

/// Record set served page by page.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<Value>,
    omit_totals: bool,
    latency: Duration,
}

impl MemorySource {
    /// Serve `records` in the given order.
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records,
            omit_totals: false,
            latency: Duration::ZERO,
        }
    }

    /// Leave `total_pages`/`total_count` out of responses, like a backend
    /// with a partial contract.
    pub fn omit_totals(mut self, omit: bool) -> Self {
        self.omit_totals = omit;
        self
    }

    /// Sleep this long before answering each fetch.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of records, ignoring filters and search.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// No records at all.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records matching the request's filters and search, in order.
    fn matching<'a>(&'a self, request: &'a PageRequest) -> impl Iterator<Item = &'a Value> + 'a {
        let needle = request.search().map(str::to_lowercase);
        self.records.iter().filter(move |record| {
            matches_filters(record, request) && needle.as_deref().is_none_or(|n| contains_text(record, n))
        })
    }
}

impl PageSource<Value> for MemorySource {
    fn fetch(&self, request: &PageRequest) -> Result<PageResponse<Value>, FetchError> {
        if request.page() == 0 || request.limit() == 0 {
            return Err(FetchError::Status {
                code: 400,
                message: format!("invalid page {} / limit {}", request.page(), request.limit()),
            });
        }

        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }

        let matching: Vec<&Value> = self.matching(request).collect();
        let total_count = matching.len();
        let limit = request.limit() as usize;

        let data: Vec<Value> = matching
            .into_iter()
            .skip(request.offset())
            .take(limit)
            .cloned()
            .collect();

        let response = PageResponse::new(data, request.page(), request.limit());
        if self.omit_totals {
            return Ok(response);
        }

        let total_pages = total_count.div_ceil(limit).max(1);
        Ok(response.with_totals(total_pages as u32, total_count as u64))
    }
}

/// Every fixed filter must equal the record's field (strings compared as-is,
/// other scalars by their JSON text).
fn matches_filters(record: &Value, request: &PageRequest) -> bool {
    request.filters().iter().all(|(key, expected)| match record.get(key) {
        Some(Value::String(s)) => s == expected,
        Some(Value::Null) | None => false,
        Some(other) => other.to_string() == *expected,
    })
}

/// Case-insensitive substring match over string fields, recursing into
/// nested objects and arrays. `needle` is already lowercase.
fn contains_text(value: &Value, needle: &str) -> bool {
    match value {
        Value::String(s) => s.to_lowercase().contains(needle),
        Value::Array(items) => items.iter().any(|v| contains_text(v, needle)),
        Value::Object(map) => map.values().any(|v| contains_text(v, needle)),
        _ => false,
    }
}
