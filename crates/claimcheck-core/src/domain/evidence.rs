//! Evidence items and the metrics derived from them.

use claimcheck_backends::Stance;
use serde::{Deserialize, Serialize};

/// One piece of stance-classified evidence for a claim.
///
/// Produced from a single scraped and summarized page. Sequences of these
/// keep processing order, which matters for citation truncation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub stance: Stance,
    /// Classifier confidence in 0.0–1.0.
    pub confidence: f64,
    pub source_url: String,
}

impl EvidenceItem {
    pub fn new(stance: Stance, confidence: f64, source_url: impl Into<String>) -> Self {
        Self {
            stance,
            confidence,
            source_url: source_url.into(),
        }
    }
}

/// Weighted summary of a claim's evidence.
///
/// # Invariants
///
/// `truth_score` lies in `[-1, 1]`; `cross_source_agreement` and
/// `source_credibility_score` lie in `[0, 1]`. Never constructed for an empty
/// evidence sequence or one whose total weight is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    /// Signed support-minus-refutation share of total weight.
    pub truth_score: f64,
    /// Share of total weight held by the dominant stance.
    pub cross_source_agreement: f64,
    /// Share of total weight coming from trusted sources.
    pub source_credibility_score: f64,
}
