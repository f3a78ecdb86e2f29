//! Resolution metrics and observability module.
//!
//! Counts lookups made through a resolver and how they ended. Counters are
//! never consulted when resolving, so they cannot change a result.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Per-resolver lookup counters.
#[derive(Debug, Default)]
pub struct ResolutionMetrics {
    /// Number of `resolve` calls
    lookups: AtomicUsize,

    /// Number of lookups that produced a translation
    hits: AtomicUsize,

    /// Number of lookups that exhausted the language chain
    misses: AtomicUsize,

    /// Hits found in a language other than the first one tried
    fallback_hits: AtomicUsize,
}

impl ResolutionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful lookup; `position` is the index in the language chain.
    pub fn record_hit(&self, position: usize) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.hits.fetch_add(1, Ordering::Relaxed);
        if position > 0 {
            self.fallback_hits.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_miss(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn fallback_hits(&self) -> usize {
        self.fallback_hits.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let lookups = self.lookups();
        let hits = self.hits();
        let hit_rate = if lookups > 0 {
            (hits as f64 / lookups as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            lookups,
            hits,
            misses: self.misses(),
            fallback_hits: self.fallback_hits(),
            hit_rate,
        }
    }
}

/// Snapshot of the resolution counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub lookups: usize,
    pub hits: usize,
    pub misses: usize,
    pub fallback_hits: usize,

    /// Hit rate as a percentage (0-100)
    pub hit_rate: f64,
}
