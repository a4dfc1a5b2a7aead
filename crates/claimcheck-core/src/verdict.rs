//! Verdict policy.
//!
//! Deterministic threshold classifier over [`AggregateMetrics`]. The TRUE
//! condition is evaluated strictly before FALSE and both boundaries are
//! inclusive.

use serde::{Deserialize, Serialize};

use crate::config::check_range;
use crate::domain::{AggregateMetrics, ConfigError, Verdict};

/// Thresholds for the verdict policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VerdictThresholds {
    /// Agreement or truth score at or above this yields TRUE.
    pub true_threshold: f64,
    /// Agreement or truth score at or below this yields FALSE.
    pub false_threshold: f64,
}

impl Default for VerdictThresholds {
    fn default() -> Self {
        Self {
            true_threshold: 0.70,
            false_threshold: 0.30,
        }
    }
}

impl VerdictThresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("verdict.true_threshold", self.true_threshold, -1.0, 1.0)?;
        check_range("verdict.false_threshold", self.false_threshold, -1.0, 1.0)?;
        if self.false_threshold > self.true_threshold {
            return Err(ConfigError::InvertedThresholds {
                true_threshold: self.true_threshold,
                false_threshold: self.false_threshold,
            });
        }
        Ok(())
    }
}

/// Classify a claim from its truth score and cross-source agreement.
///
/// Either input absent yields `NeedsVerification`.
pub fn classify_verdict(
    truth_score: Option<f64>,
    cross_source_agreement: Option<f64>,
    thresholds: &VerdictThresholds,
) -> Verdict {
    let (Some(truth), Some(agreement)) = (truth_score, cross_source_agreement) else {
        return Verdict::NeedsVerification;
    };

    if agreement >= thresholds.true_threshold || truth >= thresholds.true_threshold {
        return Verdict::True;
    }
    if agreement <= thresholds.false_threshold || truth <= thresholds.false_threshold {
        return Verdict::False;
    }
    Verdict::NeedsVerification
}

/// Classify from optional aggregate metrics.
pub fn verdict_for(metrics: Option<&AggregateMetrics>, thresholds: &VerdictThresholds) -> Verdict {
    classify_verdict(
        metrics.map(|m| m.truth_score),
        metrics.map(|m| m.cross_source_agreement),
        thresholds,
    )
}
