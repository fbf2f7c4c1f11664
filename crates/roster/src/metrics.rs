use std::sync::atomic::{AtomicU64, Ordering};

use crate::resolver::MatchMethod;

/// Per-method resolution counters.
///
/// The resolver itself is pure over its tables; these atomics are the
/// observable side channel for how often each waterfall stage fired and how
/// often resolution fell back to `Unknown`.
#[derive(Debug, Default)]
pub struct ResolverMetrics {
    exact: AtomicU64,
    abbreviation: AtomicU64,
    alias: AtomicU64,
    name_substring: AtomicU64,
    alias_substring: AtomicU64,
    fallback_no_match: AtomicU64,
    fallback_empty: AtomicU64,
    ambiguous: AtomicU64,
}

impl ResolverMetrics {
    pub fn record(&self, method: MatchMethod, ambiguous: bool) {
        let counter = match method {
            MatchMethod::Exact => &self.exact,
            MatchMethod::Abbreviation => &self.abbreviation,
            MatchMethod::Alias => &self.alias,
            MatchMethod::NameSubstring => &self.name_substring,
            MatchMethod::AliasSubstring => &self.alias_substring,
            MatchMethod::FallbackNoMatch => &self.fallback_no_match,
            MatchMethod::FallbackEmpty => &self.fallback_empty,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        if ambiguous {
            self.ambiguous.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            exact: self.exact.load(Ordering::Relaxed),
            abbreviation: self.abbreviation.load(Ordering::Relaxed),
            alias: self.alias.load(Ordering::Relaxed),
            name_substring: self.name_substring.load(Ordering::Relaxed),
            alias_substring: self.alias_substring.load(Ordering::Relaxed),
            fallback_no_match: self.fallback_no_match.load(Ordering::Relaxed),
            fallback_empty: self.fallback_empty.load(Ordering::Relaxed),
            ambiguous: self.ambiguous.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub exact: u64,
    pub abbreviation: u64,
    pub alias: u64,
    pub name_substring: u64,
    pub alias_substring: u64,
    pub fallback_no_match: u64,
    pub fallback_empty: u64,
    pub ambiguous: u64,
}

impl MetricsSnapshot {
    /// Total number of resolutions observed.
    pub fn total(&self) -> u64 {
        self.exact
            + self.abbreviation
            + self.alias
            + self.name_substring
            + self.alias_substring
            + self.fallback_no_match
            + self.fallback_empty
    }
}
