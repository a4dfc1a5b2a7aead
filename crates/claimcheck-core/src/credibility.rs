//! Source credibility classification.
//!
//! Plain case-sensitive substring matching of domain fragments against the
//! whole URL. The low precision is accepted: `".gov"` also matches
//! `"example.com/.gov-archive"`.

use serde::{Deserialize, Serialize};

use crate::config::SourcesConfig;

/// Credibility class of a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceClass {
    pub trusted: bool,
    pub authoritative: bool,
}

fn matches_any(url: &str, domains: &[String]) -> bool {
    !url.is_empty() && domains.iter().any(|d| url.contains(d.as_str()))
}

impl SourcesConfig {
    /// URL contains any trusted domain fragment.
    pub fn is_trusted(&self, url: &str) -> bool {
        matches_any(url, &self.trusted_domains)
    }

    /// URL contains any authoritative domain fragment.
    pub fn is_authoritative(&self, url: &str) -> bool {
        matches_any(url, &self.authoritative_domains)
    }

    pub fn classify(&self, url: &str) -> SourceClass {
        SourceClass {
            trusted: self.is_trusted(url),
            authoritative: self.is_authoritative(url),
        }
    }

    /// Aggregation weight for a source: 1.0 if trusted, 0.5 otherwise.
    pub fn base_weight(&self, url: &str) -> f64 {
        if self.is_trusted(url) {
            1.0
        } else {
            0.5
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trusted_sources() {
        let sources = SourcesConfig::default();
        assert!(sources.is_trusted("https://www.who.int/news/item/1"));
        assert!(sources.is_trusted("https://www.cdc.gov/flu"));
        assert!(sources.is_trusted("https://www.reuters.com/fact-check/x"));
        assert!(!sources.is_trusted("https://randomblog.net/post"));
    }

    #[test]
    fn test_authoritative_sources() {
        let sources = SourcesConfig::default();
        assert!(sources.is_authoritative("https://en.wikipedia.org/wiki/Narendra_Modi"));
        assert!(sources.is_authoritative("https://www.pmindia.gov.in/en/"));
        assert!(!sources.is_authoritative("https://www.bbc.com/news"));
    }

    #[test]
    fn test_empty_url_is_neither() {
        let sources = SourcesConfig::default();
        assert_eq!(
            sources.classify(""),
            SourceClass {
                trusted: false,
                authoritative: false
            }
        );
    }

    #[test]
    fn test_matching_is_case_sensitive_substring() {
        let sources = SourcesConfig::default();
        assert!(!sources.is_trusted("https://WWW.WHO.INT/"));
        assert!(sources.is_trusted("https://blog.example.com/mirror/who.int/page"));
    }

    #[test]
    fn test_gov_sources_are_both() {
        let sources = SourcesConfig::default();
        let class = sources.classify("https://www.usa.gov/presidents");
        assert!(class.trusted && class.authoritative);
        assert_eq!(sources.base_weight("https://www.usa.gov/presidents"), 1.0);
        assert_eq!(sources.base_weight("https://example.com"), 0.5);
    }
}
