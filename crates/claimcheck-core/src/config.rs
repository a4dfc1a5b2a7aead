//! Process-wide verification configuration.
//!
//! [`CheckerConfig`] holds the domain allowlists, keyword tables, caps and
//! thresholds the pipeline reads. It is built once (from defaults or a TOML
//! file), validated, and shared read-only as `Arc<CheckerConfig>`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::biography::ContradictionRule;
use crate::domain::{ConfigError, Result, Verdict};
use crate::keywords::KeywordExpansion;
use crate::verdict::VerdictThresholds;

/// General news, science and government authorities.
pub const TRUSTED_DOMAINS: &[&str] = &[
    ".gov",
    ".edu",
    "who.int",
    "nih.gov",
    "un.org",
    "reuters.com",
    "bbc.com",
    "apnews.com",
    "nature.com",
];

/// Encyclopedic and government sources accepted by the biography check.
pub const AUTHORITATIVE_DOMAINS: &[&str] = &["wikipedia.org", ".gov", ".gov.in", ".gov.uk"];

/// Words marking a claim as biographical.
pub const BIO_KEYWORDS: &[&str] = &[
    "nationality",
    "citizen",
    "citizenship",
    "born",
    "birthplace",
    "age",
    "years old",
    "gender",
    "president",
    "prime minister",
    "leader",
    "occupation",
    "scientist",
    "actor",
    "singer",
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Domain allowlists used by the credibility classifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourcesConfig {
    pub trusted_domains: Vec<String>,
    pub authoritative_domains: Vec<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            trusted_domains: strings(TRUSTED_DOMAINS),
            authoritative_domains: strings(AUTHORITATIVE_DOMAINS),
        }
    }
}

/// Biography gate keywords and the deterministic contradiction table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BiographyConfig {
    pub keywords: Vec<String>,
    pub contradiction_rules: Vec<ContradictionRule>,
}

impl Default for BiographyConfig {
    fn default() -> Self {
        Self {
            keywords: strings(BIO_KEYWORDS),
            contradiction_rules: vec![ContradictionRule {
                name: "modi-not-american".to_string(),
                claim_terms_all: strings(&["modi", "american"]),
                page_terms_any: strings(&["prime minister of india", "indian politician"]),
                verdict: Verdict::False,
            }],
        }
    }
}

/// Claim-keyword extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeywordConfig {
    /// Minimum characters for a claim token to count as a keyword.
    pub min_token_chars: usize,
    /// Named-entity synonym injections.
    pub expansions: Vec<KeywordExpansion>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            min_token_chars: 4,
            expansions: vec![KeywordExpansion {
                trigger: "modi".to_string(),
                extra: strings(&[
                    "narendra modi",
                    "modi",
                    "prime minister",
                    "prime minister of india",
                    "india",
                    "indian",
                    "nationality",
                    "citizenship",
                    "citizen",
                ]),
            }],
        }
    }
}

/// Caps and cut-offs for the evidence chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Limits {
    /// A fragment becomes a claim only when longer than this (trimmed chars).
    pub min_claim_chars: usize,
    /// Evidence items collected per claim before scanning stops.
    pub max_evidence: usize,
    /// Citations kept on a claim result.
    pub max_cited: usize,
    /// Search hits requested per query on the standard path.
    pub results_per_query: usize,
    /// Search hits requested per query by the biography check.
    pub bio_results_per_query: usize,
    /// Pages shorter than this are not summarized.
    pub min_summary_source_chars: usize,
    /// Leading characters of a page handed to the summarizer.
    pub summary_chunk_chars: usize,
    /// Claim keywords a summary must contain to count as relevant.
    pub min_keyword_hits: usize,
    /// Stance confidence floor on the standard path.
    pub min_stance_confidence: f64,
    /// Stance confidence floor in the biography check.
    pub bio_min_stance_confidence: f64,
    /// Authoritative URLs needed before the biography check reads pages.
    pub min_authoritative_sources: usize,
    /// Agreeing authoritative stances needed to force a verdict.
    pub min_bio_agreement: usize,
    /// Confidence attached to forced verdicts.
    pub forced_confidence: f64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            min_claim_chars: 20,
            max_evidence: 8,
            max_cited: 10,
            results_per_query: 20,
            bio_results_per_query: 10,
            min_summary_source_chars: 200,
            summary_chunk_chars: 3000,
            min_keyword_hits: 2,
            min_stance_confidence: 0.45,
            bio_min_stance_confidence: 0.6,
            min_authoritative_sources: 2,
            min_bio_agreement: 2,
            forced_confidence: 0.99,
        }
    }
}

/// Execution settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Time budget for a single collaborator call (milliseconds).
    pub call_timeout_ms: u64,
    /// Claims processed concurrently. 1 keeps the reference sequential order.
    pub claim_concurrency: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            call_timeout_ms: 20_000,
            claim_concurrency: 1,
        }
    }
}

/// Full checker configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CheckerConfig {
    pub sources: SourcesConfig,
    pub biography: BiographyConfig,
    pub keywords: KeywordConfig,
    pub limits: Limits,
    pub verdict: VerdictThresholds,
    pub runtime: RuntimeConfig,
}

impl CheckerConfig {
    /// Parse and validate a TOML document. Missing keys take defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: CheckerConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check ranges and non-empty tables.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.sources.trusted_domains.is_empty() {
            return Err(ConfigError::EmptyList {
                list: "sources.trusted_domains",
            });
        }
        if self.sources.authoritative_domains.is_empty() {
            return Err(ConfigError::EmptyList {
                list: "sources.authoritative_domains",
            });
        }

        let limits = &self.limits;
        for (field, value) in [
            ("limits.max_evidence", limits.max_evidence),
            ("limits.max_cited", limits.max_cited),
            ("limits.results_per_query", limits.results_per_query),
            ("limits.bio_results_per_query", limits.bio_results_per_query),
            ("limits.summary_chunk_chars", limits.summary_chunk_chars),
            ("limits.min_bio_agreement", limits.min_bio_agreement),
            ("runtime.claim_concurrency", self.runtime.claim_concurrency),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroLimit { field });
            }
        }
        if self.runtime.call_timeout_ms == 0 {
            return Err(ConfigError::ZeroLimit {
                field: "runtime.call_timeout_ms",
            });
        }

        for (field, value) in [
            ("limits.min_stance_confidence", limits.min_stance_confidence),
            (
                "limits.bio_min_stance_confidence",
                limits.bio_min_stance_confidence,
            ),
            ("limits.forced_confidence", limits.forced_confidence),
        ] {
            check_range(field, value, 0.0, 1.0)?;
        }

        self.verdict.validate()?;

        for rule in &self.biography.contradiction_rules {
            rule.validate()?;
        }
        Ok(())
    }
}

pub(crate) fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> std::result::Result<(), ConfigError> {
    if value.is_nan() || value < min || value > max {
        return Err(ConfigError::OutOfRange {
            field,
            min,
            max,
            value,
        });
    }
    Ok(())
}
