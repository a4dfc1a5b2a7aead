//! Observability tests for the fact-check lifecycle.
//!
//! These tests verify that structured tracing events are emitted for check
//! start, hard-check outcome, skipped candidates, verdicts and check finish.

use std::sync::Arc;

use claimcheck_backends::fakes::{FakeBackends, MemoryPages, ScriptedClassifier, ScriptedSearch};
use claimcheck_backends::Stance;
use claimcheck_core::obs::{
    check_span, emit_check_started, emit_claims_extracted, emit_search_failed,
};
use claimcheck_core::{CheckerConfig, FactChecker};
use tracing_test::traced_test;

/// Test: emit_check_started logs the event name and input size
#[traced_test]
#[test]
fn test_emit_check_started_logs_text_size() {
    emit_check_started("check-123", 42);

    assert!(logs_contain("check.started"));
    assert!(logs_contain("text_chars=42"));
}

/// Test: search failures are logged at warn level
#[traced_test]
#[test]
fn test_emit_search_failed_logs_query() {
    emit_search_failed("water boils", &"connection reset");

    assert!(logs_contain("search.failed"));
    assert!(logs_contain("connection reset"));
}

/// Test: events inside the check span carry its check id
#[traced_test]
#[test]
fn test_check_span_tags_nested_events() {
    check_span("test-span-check").in_scope(|| emit_claims_extracted(3));

    assert!(logs_contain("claim.extracted"));
    assert!(logs_contain("test-span-check"));
}

/// Test: a full check emits start, verdict and finish events
#[traced_test]
#[tokio::test]
async fn test_check_emits_lifecycle_events() {
    let search = ScriptedSearch::new()
        .with_fallback(["https://www.who.int/water", "https://gone.example.com"]);
    let pages = MemoryPages::new().with_page(
        "https://www.who.int/water",
        format!("Water boils at 100 degrees Celsius. {}", "More text here. ".repeat(20)),
    );
    let fakes = FakeBackends::new(
        search,
        pages,
        ScriptedClassifier::always(Stance::Supports, 0.9),
    );
    let checker = FactChecker::new(fakes.backends(), Arc::new(CheckerConfig::default()));

    let report = checker
        .check("Water boils at 100 degrees Celsius at sea level")
        .await;

    assert_eq!(report.response.claims.len(), 1);
    assert!(logs_contain("check.started"));
    assert!(logs_contain("claim.verdict"));
    assert!(logs_contain("evidence.accepted"));
    assert!(logs_contain("candidate.skipped"));
    assert!(logs_contain("check.finished"));
    assert!(logs_contain(&report.check_id.to_string()));
}

/// Test: a biographical claim logs its hard-check outcome
#[traced_test]
#[tokio::test]
async fn test_hard_check_outcome_is_logged() {
    let fakes = FakeBackends::empty();
    let checker = FactChecker::new(fakes.backends(), Arc::new(CheckerConfig::default()));

    checker.fact_check("Grace Hopper was born in New York City").await;

    assert!(logs_contain("claim.hard_check"));
    assert!(logs_contain("no_search_results"));
}
