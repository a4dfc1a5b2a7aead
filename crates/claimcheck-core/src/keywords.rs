//! Claim keywords and summary relevance.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::KeywordConfig;
use crate::domain::Claim;

/// Characters stripped from both ends of a claim token.
const TOKEN_PUNCTUATION: &[char] = &[',', '.', '?', '!', ' '];

/// Synonyms injected when a claim mentions a known named entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeywordExpansion {
    /// Substring that activates the expansion, matched case-insensitively.
    pub trigger: String,
    pub extra: Vec<String>,
}

/// Lower-cased claim tokens plus any triggered expansions, deduplicated in
/// first-occurrence order.
pub fn claim_keywords(claim: &Claim, config: &KeywordConfig) -> Vec<String> {
    let lowered = claim.as_str().to_lowercase();

    let mut words: Vec<String> = lowered
        .split_whitespace()
        .map(|w| w.trim_matches(TOKEN_PUNCTUATION))
        .filter(|w| w.chars().count() >= config.min_token_chars)
        .map(str::to_string)
        .collect();

    for expansion in &config.expansions {
        if lowered.contains(&expansion.trigger.to_lowercase()) {
            words.extend(expansion.extra.iter().map(|e| e.to_lowercase()));
        }
    }

    let mut seen = HashSet::new();
    words.retain(|w| seen.insert(w.clone()));
    words
}

/// Number of keywords that appear as substrings of the summary, ignoring case.
pub fn keyword_hits(summary: &str, keywords: &[String]) -> usize {
    let text = summary.to_lowercase();
    keywords
        .iter()
        .filter(|kw| text.contains(&kw.to_lowercase()))
        .count()
}
