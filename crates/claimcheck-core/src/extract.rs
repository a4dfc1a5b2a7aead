//! Claim extraction.
//!
//! Splits raw text on sentence-terminating punctuation and newlines and keeps
//! fragments long enough to be checkable. Total: never fails.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::Claim;

fn sentence_boundary() -> &'static Regex {
    static BOUNDARY: OnceLock<Regex> = OnceLock::new();
    BOUNDARY.get_or_init(|| Regex::new(r"[.?!\n]+").expect("static pattern is valid"))
}

/// Break text into atomic claims.
///
/// A fragment is kept when its trimmed length exceeds `min_chars`. If no
/// fragment qualifies but the input is not blank, the whole trimmed input
/// becomes the single claim.
pub fn extract_claims(text: &str, min_chars: usize) -> Vec<Claim> {
    let claims: Vec<Claim> = sentence_boundary()
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().count() > min_chars)
        .map(Claim::new)
        .collect();

    if claims.is_empty() {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            return vec![Claim::new(trimmed)];
        }
    }
    claims
}
