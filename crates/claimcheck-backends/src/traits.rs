//! Backend trait definitions for claimcheck
//!
//! These traits define the external collaborators the verification pipeline
//! consumes:
//! - `SearchBackend`: web search (query -> hits)
//! - `PageFetcher`: page text extraction (url -> text)
//! - `Summarizer`: abstractive summarization (text -> summary)
//! - `StanceClassifier`: NLI-style stance detection (evidence, claim -> stance)
//!
//! All traits are async and backend-agnostic. In-memory fakes are provided
//! for testing via the `fakes` module; HTTP implementations live in `http`.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BackendError;

/// Result type for backend operations
pub type BackendResult<T> = std::result::Result<T, BackendError>;

// ---------------------------------------------------------------------------
// SearchBackend
// ---------------------------------------------------------------------------

/// A single web search result.
///
/// Search engines disagree on which fields they fill; only `url` matters to
/// the pipeline and hits without one are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SearchHit {
    pub url: Option<String>,
    pub title: Option<String>,
    pub snippet: Option<String>,
}

impl SearchHit {
    /// Hit carrying only a URL.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// The URL, treating an empty string as absent.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }
}

/// Web search.
///
/// No ordering guarantee is assumed beyond "the order the backend returned".
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run one query, returning at most `max_results` hits.
    async fn search(&self, query: &str, max_results: usize) -> BackendResult<Vec<SearchHit>>;
}

// ---------------------------------------------------------------------------
// PageFetcher
// ---------------------------------------------------------------------------

/// Fetches the readable text of a web page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> BackendResult<String>;
}

// ---------------------------------------------------------------------------
// Summarizer
// ---------------------------------------------------------------------------

/// Target summary length in model tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLength {
    pub max_length: usize,
    pub min_length: usize,
}

impl SummaryLength {
    /// Derive a length hint from the input size in characters.
    ///
    /// Roughly four characters per token; the maximum is kept at or below the
    /// input size for short inputs (never under 30) and capped at 150.
    pub fn for_input(char_len: usize) -> Self {
        let approx_tokens = (char_len / 4).max(1);
        let ceiling = if approx_tokens > 1 {
            approx_tokens - 1
        } else {
            1
        };
        let max_length = ceiling.min(150).max(30);
        let min_length = (max_length / 3).max(10);
        Self {
            max_length,
            min_length,
        }
    }
}

/// Abstractive summarizer.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str, length: SummaryLength) -> BackendResult<String>;
}

// ---------------------------------------------------------------------------
// StanceClassifier
// ---------------------------------------------------------------------------

/// Relationship a piece of evidence expresses toward a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    Supports,
    Refutes,
    Unrelated,
}

impl Stance {
    /// Candidate labels handed to the classifier, in this order.
    pub const LABELS: [&'static str; 3] = ["supports", "refutes", "unrelated"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stance::Supports => "supports",
            Stance::Refutes => "refutes",
            Stance::Unrelated => "unrelated",
        }
    }

    /// Parse a classifier label. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "supports" => Some(Stance::Supports),
            "refutes" => Some(Stance::Refutes),
            "unrelated" => Some(Stance::Unrelated),
            _ => None,
        }
    }

    /// Whether this stance takes a side on the claim.
    pub fn is_decisive(&self) -> bool {
        !matches!(self, Stance::Unrelated)
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top label and its score from one classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StanceScore {
    pub stance: Stance,
    pub score: f64,
}

/// Stance classifier over `(evidence, claim)` pairs.
#[async_trait]
pub trait StanceClassifier: Send + Sync {
    /// Classify `evidence` against `claim` over `labels`, returning the top label.
    async fn classify(
        &self,
        evidence: &str,
        claim: &str,
        labels: &[&str],
    ) -> BackendResult<StanceScore>;
}

// ---------------------------------------------------------------------------
// Backends bundle
// ---------------------------------------------------------------------------

/// The four collaborators the pipeline needs, as shared trait objects.
#[derive(Clone)]
pub struct Backends {
    pub search: Arc<dyn SearchBackend>,
    pub fetcher: Arc<dyn PageFetcher>,
    pub summarizer: Arc<dyn Summarizer>,
    pub classifier: Arc<dyn StanceClassifier>,
}

impl Backends {
    pub fn new(
        search: Arc<dyn SearchBackend>,
        fetcher: Arc<dyn PageFetcher>,
        summarizer: Arc<dyn Summarizer>,
        classifier: Arc<dyn StanceClassifier>,
    ) -> Self {
        Self {
            search,
            fetcher,
            summarizer,
            classifier,
        }
    }
}

impl fmt::Debug for Backends {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backends").finish_non_exhaustive()
    }
}
