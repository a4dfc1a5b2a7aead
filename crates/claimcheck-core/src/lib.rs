//! claimcheck core library
//!
//! Extracts claims from text, gathers stance-classified web evidence for
//! each one and turns it into a verdict. External collaborators (search,
//! page fetch, summarizer, stance classifier) come from
//! `claimcheck_backends`.

pub mod aggregate;
pub mod biography;
pub mod collector;
pub mod config;
pub mod controls;
pub mod credibility;
pub mod domain;
pub mod extract;
pub mod keywords;
pub mod metrics;
pub mod obs;
pub mod pipeline;
pub mod queries;
pub mod telemetry;
pub mod verdict;

pub use domain::{
    AggregateMetrics, CheckError, Claim, ClaimResult, ConfigError, DecisionPath, EvidenceItem,
    FactCheckReport, FactCheckResponse, Result, Verdict,
};

pub use aggregate::aggregate_evidence;
pub use biography::{hard_check, is_biographical, ContradictionRule, HardCheckOutcome};
pub use collector::{CandidateOutcome, Collected, EvidenceCollector, SkipReason};
pub use config::CheckerConfig;
pub use credibility::SourceClass;
pub use extract::extract_claims;
pub use keywords::{claim_keywords, KeywordExpansion};
pub use pipeline::FactChecker;
pub use queries::{biography_queries, generate_queries};
pub use verdict::{classify_verdict, VerdictThresholds};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
