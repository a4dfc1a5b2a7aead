//! Fact-check orchestration.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use claimcheck_backends::Backends;
use futures::stream::{self, StreamExt};
use tracing::Instrument;
use uuid::Uuid;

use crate::aggregate::aggregate_evidence;
use crate::biography::{hard_check, HardCheckOutcome};
use crate::collector::EvidenceCollector;
use crate::config::CheckerConfig;
use crate::domain::{Claim, ClaimResult, FactCheckReport, FactCheckResponse};
use crate::extract::extract_claims;
use crate::metrics::METRICS;
use crate::obs;
use crate::queries::generate_queries;
use crate::verdict::verdict_for;

/// Verifies free text against a set of backends.
///
/// Claims are independent: one claim's failures never affect its siblings,
/// and results always come back in extraction order.
#[derive(Debug, Clone)]
pub struct FactChecker {
    backends: Backends,
    config: Arc<CheckerConfig>,
}

impl FactChecker {
    pub fn new(backends: Backends, config: Arc<CheckerConfig>) -> Self {
        Self { backends, config }
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Fact-check `text`, wrapped with check bookkeeping.
    pub async fn check(&self, text: &str) -> FactCheckReport {
        let check_id = Uuid::new_v4();
        let id = check_id.to_string();

        async {
            let started_at = Utc::now();
            let start = Instant::now();
            obs::emit_check_started(&id, text.chars().count());

            let response = self.fact_check(text).await;

            let duration_ms = start.elapsed().as_millis() as u64;
            obs::emit_check_finished(&id, duration_ms, response.claims.len());

            FactCheckReport {
                check_id,
                started_at,
                finished_at: Utc::now(),
                duration_ms,
                response,
            }
        }
        .instrument(obs::check_span(&id))
        .await
    }

    /// Fact-check `text`: one result per extracted claim, in order.
    ///
    /// Blank input yields an empty claim list without touching any backend.
    pub async fn fact_check(&self, text: &str) -> FactCheckResponse {
        let claims = extract_claims(text, self.config.limits.min_claim_chars);
        obs::emit_claims_extracted(claims.len());

        let concurrency = self.config.runtime.claim_concurrency.max(1);
        let results: Vec<ClaimResult> = stream::iter(claims)
            .map(|claim| self.check_claim(claim))
            .buffered(concurrency)
            .collect()
            .await;

        FactCheckResponse {
            text: text.to_string(),
            claims: results,
        }
    }

    /// Verify a single claim: hard-check first, weighted evidence otherwise.
    pub async fn check_claim(&self, claim: Claim) -> ClaimResult {
        METRICS.inc_claims_checked();
        let config = &*self.config;

        let result = match hard_check(&claim, &self.backends, config).await {
            HardCheckOutcome::Forced(forced) => ClaimResult::forced(
                claim,
                forced.verdict,
                forced.confidence,
                forced.evidence,
                config.limits.max_cited,
            ),
            HardCheckOutcome::Inconclusive(_) => self.weighted(claim).await,
        };

        obs::emit_claim_verdict(
            result.claim.as_str(),
            result.verdict,
            result.truth_score,
            result.decided_by,
            result.evidence.len(),
        );
        result
    }

    async fn weighted(&self, claim: Claim) -> ClaimResult {
        let config = &*self.config;
        let queries = generate_queries(&claim);
        let collected = EvidenceCollector::new(&self.backends, config)
            .collect(&claim, &queries)
            .await;

        let metrics = aggregate_evidence(&collected.evidence, &config.sources);
        let verdict = verdict_for(metrics.as_ref(), &config.verdict);
        ClaimResult::weighted(
            claim,
            verdict,
            metrics,
            collected.evidence,
            config.limits.max_cited,
        )
    }
}
