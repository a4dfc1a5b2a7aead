//! Global atomic counters for claimcheck observability.
//!
//! Counters are incremented silently at the call site. Call
//! [`Metrics::flush`] to emit current values as a single
//! `tracing::info!` event (e.g. at the end of a check).

use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// Lock-free atomic counters.
pub struct Metrics {
    claims_checked: AtomicU64,
    searches_issued: AtomicU64,
    search_failures: AtomicU64,
    candidates_scanned: AtomicU64,
    candidates_skipped: AtomicU64,
    evidence_accepted: AtomicU64,
    overrides_forced: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            claims_checked: AtomicU64::new(0),
            searches_issued: AtomicU64::new(0),
            search_failures: AtomicU64::new(0),
            candidates_scanned: AtomicU64::new(0),
            candidates_skipped: AtomicU64::new(0),
            evidence_accepted: AtomicU64::new(0),
            overrides_forced: AtomicU64::new(0),
        }
    }

    pub fn inc_claims_checked(&self) {
        self.claims_checked.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "claims_checked", "counter incremented");
    }

    pub fn inc_searches(&self) {
        self.searches_issued.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "searches_issued", "counter incremented");
    }

    pub fn inc_search_failures(&self) {
        self.search_failures.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "search_failures", "counter incremented");
    }

    pub fn inc_candidates_scanned(&self) {
        self.candidates_scanned.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "candidates_scanned", "counter incremented");
    }

    pub fn inc_candidates_skipped(&self) {
        self.candidates_skipped.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "candidates_skipped", "counter incremented");
    }

    pub fn inc_evidence_accepted(&self) {
        self.evidence_accepted.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "evidence_accepted", "counter incremented");
    }

    pub fn inc_overrides(&self) {
        self.overrides_forced.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "overrides_forced", "counter incremented");
    }

    /// Emit all current counter values as a single `info!` event.
    ///
    /// Call this at natural boundaries (end of a check, CLI exit)
    /// rather than on every increment.
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            claims_checked = self.claims_checked(),
            searches_issued = self.searches_issued(),
            search_failures = self.search_failures(),
            candidates_scanned = self.candidates_scanned(),
            candidates_skipped = self.candidates_skipped(),
            evidence_accepted = self.evidence_accepted(),
            overrides_forced = self.overrides_forced(),
        );
    }

    pub fn claims_checked(&self) -> u64 {
        self.claims_checked.load(Ordering::Relaxed)
    }

    pub fn searches_issued(&self) -> u64 {
        self.searches_issued.load(Ordering::Relaxed)
    }

    pub fn search_failures(&self) -> u64 {
        self.search_failures.load(Ordering::Relaxed)
    }

    pub fn candidates_scanned(&self) -> u64 {
        self.candidates_scanned.load(Ordering::Relaxed)
    }

    pub fn candidates_skipped(&self) -> u64 {
        self.candidates_skipped.load(Ordering::Relaxed)
    }

    pub fn evidence_accepted(&self) -> u64 {
        self.evidence_accepted.load(Ordering::Relaxed)
    }

    pub fn overrides_forced(&self) -> u64 {
        self.overrides_forced.load(Ordering::Relaxed)
    }

    /// Reset all counters to zero (useful in tests).
    pub fn reset(&self) {
        for counter in [
            &self.claims_checked,
            &self.searches_issued,
            &self.search_failures,
            &self.candidates_scanned,
            &self.candidates_skipped,
            &self.evidence_accepted,
            &self.overrides_forced,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}
