//! Verdicts and per-claim results.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::claim::Claim;
use super::evidence::{AggregateMetrics, EvidenceItem};

/// Final classification of a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "TRUE")]
    True,
    #[serde(rename = "FALSE")]
    False,
    #[serde(rename = "NEEDS VERIFICATION")]
    NeedsVerification,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::True => "TRUE",
            Verdict::False => "FALSE",
            Verdict::NeedsVerification => "NEEDS VERIFICATION",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which path produced a claim's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionPath {
    /// Forced by the authoritative-source biography check.
    HardCheck,
    /// Threshold policy over weighted web evidence.
    WeightedEvidence,
}

/// Terminal output for one claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimResult {
    pub claim: Claim,
    pub verdict: Verdict,
    /// Forced confidence for hard-check verdicts, aggregate truth score
    /// otherwise. Absent when no usable evidence was found.
    pub truth_score: Option<f64>,
    /// Full aggregate metrics for weighted verdicts.
    pub metrics: Option<AggregateMetrics>,
    pub decided_by: DecisionPath,
    /// Citations in processing order.
    pub evidence: Vec<EvidenceItem>,
}

impl ClaimResult {
    /// Result decided by the weighted pipeline.
    ///
    /// `max_cited` bounds the evidence list, keeping the earliest items.
    pub fn weighted(
        claim: Claim,
        verdict: Verdict,
        metrics: Option<AggregateMetrics>,
        mut evidence: Vec<EvidenceItem>,
        max_cited: usize,
    ) -> Self {
        evidence.truncate(max_cited);
        Self {
            claim,
            verdict,
            truth_score: metrics.map(|m| m.truth_score),
            metrics,
            decided_by: DecisionPath::WeightedEvidence,
            evidence,
        }
    }

    /// Result forced by the hard-check.
    pub fn forced(
        claim: Claim,
        verdict: Verdict,
        confidence: f64,
        mut evidence: Vec<EvidenceItem>,
        max_cited: usize,
    ) -> Self {
        evidence.truncate(max_cited);
        Self {
            claim,
            verdict,
            truth_score: Some(confidence),
            metrics: None,
            decided_by: DecisionPath::HardCheck,
            evidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimcheck_backends::Stance;

    #[test]
    fn test_verdict_wire_names() {
        assert_eq!(serde_json::to_string(&Verdict::True).unwrap(), "\"TRUE\"");
        assert_eq!(serde_json::to_string(&Verdict::False).unwrap(), "\"FALSE\"");
        assert_eq!(
            serde_json::to_string(&Verdict::NeedsVerification).unwrap(),
            "\"NEEDS VERIFICATION\""
        );
        let parsed: Verdict = serde_json::from_str("\"NEEDS VERIFICATION\"").unwrap();
        assert_eq!(parsed, Verdict::NeedsVerification);
    }

    #[test]
    fn test_weighted_result_truncates_evidence_keeping_order() {
        let evidence: Vec<_> = (0..12)
            .map(|i| EvidenceItem::new(Stance::Supports, 0.9, format!("https://s{i}.org")))
            .collect();
        let result = ClaimResult::weighted(
            Claim::new("claim"),
            Verdict::True,
            None,
            evidence,
            10,
        );
        assert_eq!(result.evidence.len(), 10);
        assert_eq!(result.evidence[0].source_url, "https://s0.org");
        assert_eq!(result.evidence[9].source_url, "https://s9.org");
        assert_eq!(result.truth_score, None);
    }

    #[test]
    fn test_forced_result_reports_confidence() {
        let result = ClaimResult::forced(
            Claim::new("claim"),
            Verdict::False,
            0.99,
            vec![EvidenceItem::new(Stance::Refutes, 0.99, "https://en.wikipedia.org/x")],
            10,
        );
        assert_eq!(result.truth_score, Some(0.99));
        assert_eq!(result.decided_by, DecisionPath::HardCheck);
        assert!(result.metrics.is_none());
    }
}
