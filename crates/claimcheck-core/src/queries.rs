//! Search query expansion.
//!
//! Both generators are pure and deterministic. Order is part of the contract
//! because the search step deduplicates hits by first occurrence.

use crate::domain::Claim;

/// Diversified queries for the standard evidence path.
pub fn generate_queries(claim: &Claim) -> Vec<String> {
    let base = claim.normalized();
    vec![
        base.clone(),
        format!("Is it true that {base}?"),
        format!("{base} scientific evidence"),
        format!("{base} government report"),
        format!("{base} peer reviewed study"),
        format!("{base} fact check"),
        format!("{base} refuted"),
        format!("{base} verified"),
        format!("WHO report {base}"),
        format!("NIH study {base}"),
    ]
}

/// Narrow queries for the biography check.
pub fn biography_queries(claim: &Claim) -> Vec<String> {
    let base = claim.normalized();
    vec![
        base.clone(),
        format!("{base} nationality"),
        format!("{base} biography"),
        format!("{base} citizenship"),
    ]
}
