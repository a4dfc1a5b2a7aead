//! Evidence collection.
//!
//! Drives search, fetch, summarize and stance detection for one claim:
//!
//! 1. issue every query and deduplicate hit URLs in first-seen order
//! 2. stable-sort candidates so trusted sources come first
//! 3. scan candidates in that order, turning each into a [`CandidateOutcome`]
//! 4. stop as soon as `max_evidence` items were accepted
//!
//! Collaborator failures never escape: a failed search truncates the
//! candidate list, any other failure skips the candidate with a
//! [`SkipReason`].

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use claimcheck_backends::{BackendError, Backends, Stance, StanceScore, SummaryLength};
use serde::{Deserialize, Serialize};

use crate::config::{CheckerConfig, SourcesConfig};
use crate::controls::with_timeout;
use crate::domain::{Claim, EvidenceItem};
use crate::keywords::{claim_keywords, keyword_hits};
use crate::metrics::METRICS;
use crate::obs;

/// Why a candidate source produced no evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// Candidate carried no usable URL.
    MissingUrl,
    /// Page text could not be fetched.
    FetchFailed { error: String },
    /// A collaborator call exceeded its time budget.
    Timeout { stage: String },
    /// Page text too short to summarize.
    SourceTooShort { chars: usize },
    /// Summarizer failed or returned nothing.
    SummarizeFailed { error: String },
    /// Summary mentions too few claim keywords.
    Irrelevant { hits: usize },
    /// Stance classifier failed.
    ClassifyFailed { error: String },
    /// Classifier judged the evidence unrelated.
    Unrelated,
    /// Stance below the confidence floor.
    LowConfidence { stance: Stance, score: f64 },
}

impl SkipReason {
    fn from_backend(stage: &str, err: BackendError) -> Self {
        match err {
            BackendError::Timeout { .. } => SkipReason::Timeout {
                stage: stage.to_string(),
            },
            other => match stage {
                "fetch" => SkipReason::FetchFailed {
                    error: other.to_string(),
                },
                "summarize" => SkipReason::SummarizeFailed {
                    error: other.to_string(),
                },
                _ => SkipReason::ClassifyFailed {
                    error: other.to_string(),
                },
            },
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingUrl => f.write_str("missing url"),
            SkipReason::FetchFailed { error } => write!(f, "fetch failed: {error}"),
            SkipReason::Timeout { stage } => write!(f, "{stage} timed out"),
            SkipReason::SourceTooShort { chars } => write!(f, "source too short ({chars} chars)"),
            SkipReason::SummarizeFailed { error } => write!(f, "summarize failed: {error}"),
            SkipReason::Irrelevant { hits } => write!(f, "irrelevant ({hits} keyword hits)"),
            SkipReason::ClassifyFailed { error } => write!(f, "classify failed: {error}"),
            SkipReason::Unrelated => f.write_str("unrelated stance"),
            SkipReason::LowConfidence { stance, score } => {
                write!(f, "low confidence {stance} ({score:.2})")
            }
        }
    }
}

/// Result of assessing one candidate source.
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateOutcome {
    Accepted(EvidenceItem),
    Skipped(SkipReason),
}

/// A fetched page and its summary.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSummary {
    pub text: String,
    pub summary: String,
}

/// Everything one evidence scan produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collected {
    /// Accepted evidence in scan order, at most `max_evidence` items.
    pub evidence: Vec<EvidenceItem>,
    /// Skipped candidates with their reasons, in scan order.
    pub skipped: Vec<(String, SkipReason)>,
    /// Candidates looked at before the scan ended.
    pub scanned: usize,
}

/// Stable partition of candidates: trusted sources first, input order kept
/// within each group.
pub fn trusted_first(candidates: Vec<String>, sources: &SourcesConfig) -> Vec<String> {
    let mut sorted = candidates;
    sorted.sort_by_key(|url| !sources.is_trusted(url));
    sorted
}

/// Run the per-candidate scan in order until `cap` items were accepted.
///
/// `assess` is called once per candidate, never after the cap is reached.
pub async fn scan_bounded<F, Fut>(candidates: &[String], cap: usize, mut assess: F) -> Collected
where
    F: FnMut(String) -> Fut,
    Fut: std::future::Future<Output = CandidateOutcome>,
{
    let mut collected = Collected::default();
    for url in candidates {
        if collected.evidence.len() >= cap {
            break;
        }
        collected.scanned += 1;
        METRICS.inc_candidates_scanned();

        match assess(url.clone()).await {
            CandidateOutcome::Accepted(item) => {
                METRICS.inc_evidence_accepted();
                obs::emit_evidence_accepted(
                    &item.source_url,
                    item.stance.as_str(),
                    item.confidence,
                );
                collected.evidence.push(item);
            }
            CandidateOutcome::Skipped(reason) => {
                METRICS.inc_candidates_skipped();
                obs::emit_candidate_skipped(url, &reason);
                collected.skipped.push((url.clone(), reason));
            }
        }
    }
    collected
}

/// Evidence gathering against a set of backends.
pub struct EvidenceCollector<'a> {
    backends: &'a Backends,
    config: &'a CheckerConfig,
}

impl<'a> EvidenceCollector<'a> {
    pub fn new(backends: &'a Backends, config: &'a CheckerConfig) -> Self {
        Self { backends, config }
    }

    fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.config.runtime.call_timeout_ms)
    }

    /// Issue `queries` and return unique hit URLs in first-seen order.
    ///
    /// The first failing query ends the search; hits gathered before it are
    /// kept.
    pub async fn search_candidates(&self, queries: &[String], max_results: usize) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut urls = Vec::new();

        for query in queries {
            METRICS.inc_searches();
            let hits = match with_timeout(
                self.call_timeout(),
                self.backends.search.search(query, max_results),
            )
            .await
            {
                Ok(hits) => hits,
                Err(e) => {
                    METRICS.inc_search_failures();
                    obs::emit_search_failed(query, &e);
                    break;
                }
            };

            for hit in hits {
                if let Some(url) = hit.url() {
                    if seen.insert(url.to_string()) {
                        urls.push(url.to_string());
                    }
                }
            }
        }
        urls
    }

    /// Fetch a page and summarize its leading chunk.
    pub async fn read_page(&self, url: &str) -> Result<PageSummary, SkipReason> {
        let timeout = self.call_timeout();
        let limits = &self.config.limits;
        if url.trim().is_empty() {
            return Err(SkipReason::MissingUrl);
        }

        let text = with_timeout(timeout, self.backends.fetcher.fetch(url))
            .await
            .map_err(|e| SkipReason::from_backend("fetch", e))?;

        let chars = text.chars().count();
        if chars < limits.min_summary_source_chars {
            return Err(SkipReason::SourceTooShort { chars });
        }

        let chunk: String = text.chars().take(limits.summary_chunk_chars).collect();
        let length = SummaryLength::for_input(chunk.chars().count());
        let summary = with_timeout(timeout, self.backends.summarizer.summarize(&chunk, length))
            .await
            .map_err(|e| SkipReason::from_backend("summarize", e))?;

        if summary.is_empty() {
            return Err(SkipReason::SummarizeFailed {
                error: "empty summary".to_string(),
            });
        }
        Ok(PageSummary { text, summary })
    }

    /// Classify the stance of `summary` toward `claim`.
    pub async fn classify(&self, claim: &Claim, summary: &str) -> Result<StanceScore, SkipReason> {
        with_timeout(
            self.call_timeout(),
            self.backends
                .classifier
                .classify(summary, claim.as_str(), &Stance::LABELS),
        )
        .await
        .map_err(|e| SkipReason::from_backend("classify", e))
    }

    /// Full standard-path assessment of one candidate.
    pub async fn assess(&self, claim: &Claim, keywords: &[String], url: &str) -> CandidateOutcome {
        match self.try_assess(claim, keywords, url).await {
            Ok(item) => CandidateOutcome::Accepted(item),
            Err(reason) => CandidateOutcome::Skipped(reason),
        }
    }

    async fn try_assess(
        &self,
        claim: &Claim,
        keywords: &[String],
        url: &str,
    ) -> Result<EvidenceItem, SkipReason> {
        let limits = &self.config.limits;
        let page = self.read_page(url).await?;

        let hits = keyword_hits(&page.summary, keywords);
        if hits < limits.min_keyword_hits {
            return Err(SkipReason::Irrelevant { hits });
        }

        let StanceScore { stance, score } = self.classify(claim, &page.summary).await?;
        if stance == Stance::Unrelated {
            return Err(SkipReason::Unrelated);
        }
        if score < limits.min_stance_confidence {
            return Err(SkipReason::LowConfidence { stance, score });
        }
        Ok(EvidenceItem::new(stance, score, url))
    }

    /// Collect up to `max_evidence` items for `claim` from `queries`.
    pub async fn collect(&self, claim: &Claim, queries: &[String]) -> Collected {
        let limits = &self.config.limits;
        let candidates = self
            .search_candidates(queries, limits.results_per_query)
            .await;
        let candidates = trusted_first(candidates, &self.config.sources);
        let keywords = claim_keywords(claim, &self.config.keywords);

        scan_bounded(&candidates, limits.max_evidence, |url| {
            let keywords = &keywords;
            async move { self.assess(claim, keywords, &url).await }
        })
        .await
    }
}
