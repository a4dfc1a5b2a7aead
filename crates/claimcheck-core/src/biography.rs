//! Biographical hard-check.
//!
//! A narrow authoritative-source check that may force a verdict for
//! biography-style claims before the weighted pipeline runs. It never fails:
//! every collaborator error or thin result makes it inconclusive.

use claimcheck_backends::{Backends, Stance};
use serde::{Deserialize, Serialize};

use crate::collector::EvidenceCollector;
use crate::config::CheckerConfig;
use crate::domain::{Claim, ConfigError, EvidenceItem, Verdict};
use crate::metrics::METRICS;
use crate::obs;
use crate::queries::biography_queries;

/// A deterministic contradiction pattern.
///
/// Matches when the lower-cased claim contains every `claim_terms_all` entry
/// and the lower-cased page text contains at least one `page_terms_any`
/// entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContradictionRule {
    pub name: String,
    pub claim_terms_all: Vec<String>,
    pub page_terms_any: Vec<String>,
    pub verdict: Verdict,
}

impl ContradictionRule {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.claim_terms_all.is_empty() {
            return Err(ConfigError::EmptyRule {
                name: self.name.clone(),
                side: "claim",
            });
        }
        if self.page_terms_any.is_empty() {
            return Err(ConfigError::EmptyRule {
                name: self.name.clone(),
                side: "page",
            });
        }
        Ok(())
    }

    pub fn matches(&self, claim: &Claim, page_text: &str) -> bool {
        let claim = claim.normalized();
        if !self
            .claim_terms_all
            .iter()
            .all(|t| claim.contains(&t.to_lowercase()))
        {
            return false;
        }
        let page = page_text.to_lowercase();
        self.page_terms_any
            .iter()
            .any(|t| page.contains(&t.to_lowercase()))
    }

    /// Stance attached to the single citation of a forced verdict.
    fn citation_stance(&self) -> Stance {
        match self.verdict {
            Verdict::True => Stance::Supports,
            _ => Stance::Refutes,
        }
    }
}

/// Whether the claim mentions any biography keyword, ignoring case.
pub fn is_biographical(claim: &Claim, keywords: &[String]) -> bool {
    let lowered = claim.normalized();
    keywords.iter().any(|k| lowered.contains(&k.to_lowercase()))
}

/// Why the hard-check gave no verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inconclusive {
    NotBiographical,
    NoSearchResults,
    TooFewAuthoritative { found: usize },
    TooFewStances { kept: usize },
    Mixed { supports: usize, refutes: usize },
}

impl Inconclusive {
    pub fn as_str(&self) -> &'static str {
        match self {
            Inconclusive::NotBiographical => "not_biographical",
            Inconclusive::NoSearchResults => "no_search_results",
            Inconclusive::TooFewAuthoritative { .. } => "too_few_authoritative",
            Inconclusive::TooFewStances { .. } => "too_few_stances",
            Inconclusive::Mixed { .. } => "mixed",
        }
    }
}

/// A verdict forced by the hard-check.
#[derive(Debug, Clone, PartialEq)]
pub struct ForcedVerdict {
    pub verdict: Verdict,
    pub confidence: f64,
    pub evidence: Vec<EvidenceItem>,
    /// Contradiction rule name, or `None` for an agreement verdict.
    pub rule: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HardCheckOutcome {
    Forced(ForcedVerdict),
    Inconclusive(Inconclusive),
}

impl HardCheckOutcome {
    pub fn forced(&self) -> Option<&ForcedVerdict> {
        match self {
            HardCheckOutcome::Forced(f) => Some(f),
            HardCheckOutcome::Inconclusive(_) => None,
        }
    }
}

/// Run the hard-check for one claim.
pub async fn hard_check(
    claim: &Claim,
    backends: &Backends,
    config: &CheckerConfig,
) -> HardCheckOutcome {
    let outcome = run(claim, backends, config).await;
    match &outcome {
        HardCheckOutcome::Forced(forced) => {
            METRICS.inc_overrides();
            let reason = forced.rule.as_deref().unwrap_or("agreement");
            obs::emit_hard_check(claim.as_str(), Some(forced.verdict), reason);
        }
        HardCheckOutcome::Inconclusive(Inconclusive::NotBiographical) => {}
        HardCheckOutcome::Inconclusive(why) => {
            obs::emit_hard_check(claim.as_str(), None, why.as_str());
        }
    }
    outcome
}

async fn run(claim: &Claim, backends: &Backends, config: &CheckerConfig) -> HardCheckOutcome {
    use HardCheckOutcome::Inconclusive as Skip;

    if !is_biographical(claim, &config.biography.keywords) {
        return Skip(Inconclusive::NotBiographical);
    }

    let limits = &config.limits;
    let collector = EvidenceCollector::new(backends, config);
    let candidates = collector
        .search_candidates(&biography_queries(claim), limits.bio_results_per_query)
        .await;
    if candidates.is_empty() {
        return Skip(Inconclusive::NoSearchResults);
    }

    let authoritative: Vec<String> = candidates
        .into_iter()
        .filter(|url| config.sources.is_authoritative(url))
        .collect();
    if authoritative.len() < limits.min_authoritative_sources {
        return Skip(Inconclusive::TooFewAuthoritative {
            found: authoritative.len(),
        });
    }

    let mut kept = Vec::new();
    for url in authoritative {
        let page = match collector.read_page(&url).await {
            Ok(page) => page,
            Err(reason) => {
                obs::emit_candidate_skipped(&url, &reason);
                continue;
            }
        };

        if let Some(rule) = config
            .biography
            .contradiction_rules
            .iter()
            .find(|r| r.matches(claim, &page.text))
        {
            return HardCheckOutcome::Forced(ForcedVerdict {
                verdict: rule.verdict,
                confidence: limits.forced_confidence,
                evidence: vec![EvidenceItem::new(
                    rule.citation_stance(),
                    limits.forced_confidence,
                    url,
                )],
                rule: Some(rule.name.clone()),
            });
        }

        match collector.classify(claim, &page.summary).await {
            Ok(s) if s.stance.is_decisive() && s.score >= limits.bio_min_stance_confidence => {
                kept.push(EvidenceItem::new(s.stance, s.score, url));
            }
            Ok(_) => {}
            Err(reason) => obs::emit_candidate_skipped(&url, &reason),
        }
    }

    decide(kept, config)
}

/// Agreement rule over the kept authoritative stances.
fn decide(kept: Vec<EvidenceItem>, config: &CheckerConfig) -> HardCheckOutcome {
    let limits = &config.limits;
    if kept.len() < limits.min_bio_agreement {
        return HardCheckOutcome::Inconclusive(Inconclusive::TooFewStances { kept: kept.len() });
    }

    let (supports, refutes): (Vec<_>, Vec<_>) =
        kept.into_iter().partition(|e| e.stance == Stance::Supports);

    let forced = |verdict, evidence| {
        HardCheckOutcome::Forced(ForcedVerdict {
            verdict,
            confidence: limits.forced_confidence,
            evidence,
            rule: None,
        })
    };

    if supports.len() >= limits.min_bio_agreement && refutes.is_empty() {
        return forced(Verdict::True, supports);
    }
    if refutes.len() >= limits.min_bio_agreement && supports.is_empty() {
        return forced(Verdict::False, refutes);
    }
    HardCheckOutcome::Inconclusive(Inconclusive::Mixed {
        supports: supports.len(),
        refutes: refutes.len(),
    })
}
