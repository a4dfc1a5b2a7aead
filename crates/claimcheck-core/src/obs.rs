//! Structured observability hooks for the fact-check lifecycle.
//!
//! This module provides:
//! - A check-scoped tracing span for instrumenting a whole request
//! - Emission functions for key lifecycle events: start, claim extraction,
//!   hard-check outcome, candidate skip, evidence acceptance, verdict, finish
//!
//! Events are emitted at `info!` level except per-candidate events, which are
//! `debug!`. Filter with `RUST_LOG`; pass `--json` to the CLI for JSON lines.

use tracing::{debug, info};

use crate::domain::{DecisionPath, Verdict};

/// The check-scoped span, for instrumenting async work.
///
/// Every event emitted inside it carries `check_id`.
pub fn check_span(check_id: &str) -> tracing::Span {
    tracing::info_span!("claimcheck.check", check_id = %check_id)
}

/// Emit event: check started for a text of the given length.
pub fn emit_check_started(check_id: &str, text_chars: usize) {
    info!(event = "check.started", check_id = %check_id, text_chars = text_chars);
}

/// Emit event: claims extracted from the input.
///
/// The check id comes from the enclosing [`check_span`], when there is one.
pub fn emit_claims_extracted(claims: usize) {
    info!(event = "claim.extracted", claims = claims);
}

/// Emit event: biography hard-check finished for a claim.
///
/// `outcome` is the forced verdict, or `None` when inconclusive.
pub fn emit_hard_check(claim: &str, outcome: Option<Verdict>, reason: &str) {
    info!(
        event = "claim.hard_check",
        claim = %claim,
        forced = outcome.map(|v| v.as_str()).unwrap_or("none"),
        reason = %reason,
    );
}

/// Emit event: a search query failed; remaining queries are not issued.
pub fn emit_search_failed(query: &str, error: &dyn std::fmt::Display) {
    tracing::warn!(event = "search.failed", query = %query, error = %error);
}

/// Emit event: a candidate source was skipped.
pub fn emit_candidate_skipped(url: &str, reason: &dyn std::fmt::Display) {
    debug!(event = "candidate.skipped", url = %url, reason = %reason);
}

/// Emit event: a candidate source produced evidence.
pub fn emit_evidence_accepted(url: &str, stance: &str, confidence: f64) {
    debug!(
        event = "evidence.accepted",
        url = %url,
        stance = %stance,
        confidence = confidence,
    );
}

/// Emit event: a claim received its verdict.
pub fn emit_claim_verdict(
    claim: &str,
    verdict: Verdict,
    truth_score: Option<f64>,
    decided_by: DecisionPath,
    evidence: usize,
) {
    info!(
        event = "claim.verdict",
        claim = %claim,
        verdict = verdict.as_str(),
        truth_score = ?truth_score,
        decided_by = ?decided_by,
        evidence = evidence,
    );
}

/// Emit event: check finished.
pub fn emit_check_finished(check_id: &str, duration_ms: u64, claims: usize) {
    info!(
        event = "check.finished",
        check_id = %check_id,
        duration_ms = duration_ms,
        claims = claims,
    );
}
