//! Evidence aggregation.
//!
//! Each item weighs `base_weight(source) * confidence`, where trusted sources
//! count double. The three metrics are shares of the total weight.

use claimcheck_backends::Stance;

use crate::config::SourcesConfig;
use crate::domain::{AggregateMetrics, EvidenceItem};

/// Weighted aggregate of a claim's evidence.
///
/// Returns `None` for an empty sequence or when the total weight is zero.
pub fn aggregate_evidence(
    evidence: &[EvidenceItem],
    sources: &SourcesConfig,
) -> Option<AggregateMetrics> {
    if evidence.is_empty() {
        return None;
    }

    let mut supports_weight = 0.0_f64;
    let mut refutes_weight = 0.0_f64;
    let mut total_weight = 0.0_f64;
    let mut trusted_weight = 0.0_f64;

    for item in evidence {
        let trusted = sources.is_trusted(&item.source_url);
        let w = sources.base_weight(&item.source_url) * item.confidence;

        total_weight += w;
        if trusted {
            trusted_weight += w;
        }
        match item.stance {
            Stance::Supports => supports_weight += w,
            Stance::Refutes => refutes_weight += w,
            Stance::Unrelated => {}
        }
    }

    if total_weight == 0.0 {
        return None;
    }

    Some(AggregateMetrics {
        truth_score: (supports_weight - refutes_weight) / total_weight,
        cross_source_agreement: supports_weight.max(refutes_weight) / total_weight,
        source_credibility_score: trusted_weight / total_weight,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(stance: Stance, confidence: f64, url: &str) -> EvidenceItem {
        EvidenceItem::new(stance, confidence, url)
    }

    #[test]
    fn test_empty_evidence_is_absent() {
        assert!(aggregate_evidence(&[], &SourcesConfig::default()).is_none());
    }

    #[test]
    fn test_zero_weight_is_absent() {
        let evidence = vec![item(Stance::Supports, 0.0, "https://who.int/a")];
        assert!(aggregate_evidence(&evidence, &SourcesConfig::default()).is_none());
    }

    #[test]
    fn test_unanimous_trusted_support() {
        let evidence = vec![
            item(Stance::Supports, 0.9, "https://www.nature.com/a"),
            item(Stance::Supports, 0.9, "https://www.bbc.com/b"),
        ];
        let m = aggregate_evidence(&evidence, &SourcesConfig::default()).unwrap();
        assert_eq!(m.truth_score, 1.0);
        assert_eq!(m.cross_source_agreement, 1.0);
        assert_eq!(m.source_credibility_score, 1.0);
    }

    #[test]
    fn test_untrusted_sources_count_half() {
        // trusted support 0.8, untrusted refute 0.5 * 0.8 = 0.4
        let evidence = vec![
            item(Stance::Supports, 0.8, "https://apnews.com/a"),
            item(Stance::Refutes, 0.8, "https://someblog.net/b"),
        ];
        let m = aggregate_evidence(&evidence, &SourcesConfig::default()).unwrap();
        assert!((m.truth_score - (0.4 / 1.2)).abs() < 1e-12);
        assert!((m.cross_source_agreement - (0.8 / 1.2)).abs() < 1e-12);
        assert!((m.source_credibility_score - (0.8 / 1.2)).abs() < 1e-12);
    }

    #[test]
    fn test_unrelated_weight_dilutes_scores() {
        let evidence = vec![
            item(Stance::Supports, 1.0, "https://who.int/a"),
            item(Stance::Unrelated, 1.0, "https://who.int/b"),
        ];
        let m = aggregate_evidence(&evidence, &SourcesConfig::default()).unwrap();
        assert_eq!(m.truth_score, 0.5);
        assert_eq!(m.cross_source_agreement, 0.5);
    }

    #[test]
    fn test_metrics_stay_in_bounds() {
        let stances = [Stance::Supports, Stance::Refutes, Stance::Unrelated];
        let urls = ["https://who.int/x", "https://blog.example/y"];
        let mut evidence = Vec::new();
        for (i, stance) in stances.iter().cycle().take(15).enumerate() {
            let confidence = (i as f64 * 0.13) % 1.0;
            evidence.push(item(*stance, confidence, urls[i % 2]));
            if let Some(m) = aggregate_evidence(&evidence, &SourcesConfig::default()) {
                assert!((-1.0..=1.0).contains(&m.truth_score));
                assert!((0.0..=1.0).contains(&m.cross_source_agreement));
                assert!((0.0..=1.0).contains(&m.source_credibility_score));
            }
        }
    }

    #[test]
    fn test_aggregation_is_repeatable() {
        let evidence = vec![
            item(Stance::Supports, 0.61, "https://un.org/a"),
            item(Stance::Refutes, 0.47, "https://x.example/b"),
            item(Stance::Supports, 0.93, "https://y.example/c"),
        ];
        let sources = SourcesConfig::default();
        let a = aggregate_evidence(&evidence, &sources).unwrap();
        let b = aggregate_evidence(&evidence, &sources).unwrap();
        assert_eq!(a.truth_score.to_bits(), b.truth_score.to_bits());
        assert_eq!(
            a.cross_source_agreement.to_bits(),
            b.cross_source_agreement.to_bits()
        );
        assert_eq!(
            a.source_credibility_score.to_bits(),
            b.source_credibility_score.to_bits()
        );
    }
}
