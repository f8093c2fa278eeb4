//! Core identifier newtypes for fetch bookkeeping.
//!
//! Both identifiers are monotonically increasing counters. The raw
//! constructors are never exported; values only come from `initial()` and
//! `next()`, so a controller can never hand out a duplicate.

use std::fmt;

/// Search/refresh epoch of a list controller.
///
/// Incremented whenever a new search or a refresh invalidates every fetch
/// issued before it. Responses tagged with an older generation are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    /// The generation a controller starts in.
    pub fn initial() -> Self {
        Self(0)
    }

    /// The generation that supersedes this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Raw counter value, for logging.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen#{}", self.0)
    }
}

/// Identifier of one issued fetch, unique per controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    /// First request id handed out by a controller.
    pub fn initial() -> Self {
        Self(1)
    }

    /// The id following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req#{}", self.0)
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_next_is_strictly_greater() {
        let g = Generation::initial();
        assert!(g.next() > g);
        assert_eq!(g.next().get(), 1);
    }

    #[test]
    fn request_ids_start_at_one() {
        assert_eq!(RequestId::initial().get(), 1);
        assert_eq!(RequestId::initial().next().get(), 2);
    }

    #[test]
    fn display_is_tagged() {
        assert_eq!(Generation::initial().next().to_string(), "gen#1");
        assert_eq!(RequestId::initial().to_string(), "req#1");
    }
}
