//! Domain models for claimcheck.
//!
//! Canonical definitions for the core entities:
//! - `Claim`: an atomic assertion, the unit of verification
//! - `EvidenceItem`: one stance-classified source for a claim
//! - `AggregateMetrics`: weighted scores derived from a claim's evidence
//! - `Verdict` / `ClaimResult`: the outcome for one claim
//! - `FactCheckResponse` / `FactCheckReport`: the outcome for one request

pub mod claim;
pub mod error;
pub mod evidence;
pub mod report;
pub mod verdict;

// Re-export main types and errors
pub use claim::Claim;
pub use error::{CheckError, ConfigError, Result};
pub use evidence::{AggregateMetrics, EvidenceItem};
pub use report::{FactCheckReport, FactCheckResponse};
pub use verdict::{ClaimResult, DecisionPath, Verdict};
