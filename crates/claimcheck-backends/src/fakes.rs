//! In-memory fakes for backend traits (testing only)
//!
//! Provides `ScriptedSearch`, `MemoryPages`, `PassthroughSummarizer`,
//! `FailingSummarizer`, `CannedSummarizer` and `ScriptedClassifier` that satisfy the trait
//! contracts without any network access. Each fake records its calls so
//! tests can assert on what the pipeline asked for.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::BackendError;
use crate::traits::*;

// ---------------------------------------------------------------------------
// ScriptedSearch
// ---------------------------------------------------------------------------

/// Search backend answering from a `HashMap<query, hits>`.
///
/// Unknown queries return no hits. Queries registered via `fail_on` return
/// `BackendError::Unavailable`.
#[derive(Debug, Default)]
pub struct ScriptedSearch {
    results: Mutex<HashMap<String, Vec<SearchHit>>>,
    fallback: Mutex<Vec<SearchHit>>,
    failing: Mutex<HashSet<String>>,
    calls: Mutex<Vec<(String, usize)>>,
}

impl ScriptedSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the hits for an exact query string.
    pub fn with_results<I, S>(self, query: &str, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.results.lock().unwrap().insert(
            query.to_string(),
            urls.into_iter().map(SearchHit::from_url).collect(),
        );
        self
    }

    /// Register raw hits (e.g. hits without a URL) for a query.
    pub fn with_hits(self, query: &str, hits: Vec<SearchHit>) -> Self {
        self.results.lock().unwrap().insert(query.to_string(), hits);
        self
    }

    /// Hits returned for any query without an explicit entry.
    pub fn with_fallback<I, S>(self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.fallback.lock().unwrap() = urls.into_iter().map(SearchHit::from_url).collect();
        self
    }

    /// Make an exact query fail.
    pub fn fail_on(self, query: &str) -> Self {
        self.failing.lock().unwrap().insert(query.to_string());
        self
    }

    /// Every `(query, max_results)` pair seen so far, in call order.
    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SearchBackend for ScriptedSearch {
    async fn search(&self, query: &str, max_results: usize) -> BackendResult<Vec<SearchHit>> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), max_results));

        if self.failing.lock().unwrap().contains(query) {
            return Err(BackendError::Unavailable(format!("scripted failure: {query}")));
        }

        let results = self.results.lock().unwrap();
        let hits = match results.get(query) {
            Some(hits) => hits.clone(),
            None => self.fallback.lock().unwrap().clone(),
        };
        Ok(hits.into_iter().take(max_results).collect())
    }
}

// ---------------------------------------------------------------------------
// MemoryPages
// ---------------------------------------------------------------------------

/// Page fetcher backed by a `HashMap<url, text>`. Unknown URLs fail.
#[derive(Debug, Default)]
pub struct MemoryPages {
    pages: Mutex<HashMap<String, String>>,
    fetched: Mutex<Vec<String>>,
}

impl MemoryPages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, text: impl Into<String>) -> Self {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), text.into());
        self
    }

    /// URLs fetched so far, in call order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.fetched.lock().unwrap().len()
    }
}

#[async_trait]
impl PageFetcher for MemoryPages {
    async fn fetch(&self, url: &str) -> BackendResult<String> {
        self.fetched.lock().unwrap().push(url.to_string());
        self.pages
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| BackendError::Status {
                code: 404,
                body: format!("no page for {url}"),
            })
    }
}

// ---------------------------------------------------------------------------
// Summarizers
// ---------------------------------------------------------------------------

/// Summarizer that returns its input unchanged.
///
/// Keeping the text intact lets tests control relevance and stance through
/// the page content alone.
#[derive(Debug, Default)]
pub struct PassthroughSummarizer {
    calls: Mutex<Vec<SummaryLength>>,
}

impl PassthroughSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Length hints received so far.
    pub fn calls(&self) -> Vec<SummaryLength> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Summarizer for PassthroughSummarizer {
    async fn summarize(&self, text: &str, length: SummaryLength) -> BackendResult<String> {
        self.calls.lock().unwrap().push(length);
        if text.trim().is_empty() {
            return Err(BackendError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}

/// Summarizer that always fails.
#[derive(Debug, Default)]
pub struct FailingSummarizer;

#[async_trait]
impl Summarizer for FailingSummarizer {
    async fn summarize(&self, _text: &str, _length: SummaryLength) -> BackendResult<String> {
        Err(BackendError::Unavailable("summarizer offline".to_string()))
    }
}

/// Summarizer that answers every page with the same text.
#[derive(Debug, Default)]
pub struct CannedSummarizer {
    reply: String,
}

impl CannedSummarizer {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl Summarizer for CannedSummarizer {
    async fn summarize(&self, _text: &str, _length: SummaryLength) -> BackendResult<String> {
        Ok(self.reply.clone())
    }
}

// ---------------------------------------------------------------------------
// ScriptedClassifier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct StanceRule {
    needle: String,
    score: StanceScore,
}

/// Stance classifier driven by substring rules over the evidence text.
///
/// Rules are checked in insertion order; the first whose needle appears in
/// the evidence wins. Without a match the default `(Unrelated, 0.0)` is
/// returned. Needles are matched case-insensitively.
#[derive(Debug)]
pub struct ScriptedClassifier {
    rules: Mutex<Vec<StanceRule>>,
    default: StanceScore,
    failing: bool,
    calls: Mutex<Vec<(String, String)>>,
}

impl Default for ScriptedClassifier {
    fn default() -> Self {
        Self {
            rules: Mutex::new(Vec::new()),
            default: StanceScore {
                stance: Stance::Unrelated,
                score: 0.0,
            },
            failing: false,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifier that returns the same stance for every input.
    pub fn always(stance: Stance, score: f64) -> Self {
        Self {
            default: StanceScore { stance, score },
            ..Self::default()
        }
    }

    /// Classifier that fails every call.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_rule(self, needle: &str, stance: Stance, score: f64) -> Self {
        self.rules.lock().unwrap().push(StanceRule {
            needle: needle.to_lowercase(),
            score: StanceScore { stance, score },
        });
        self
    }

    /// `(evidence, claim)` pairs seen so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl StanceClassifier for ScriptedClassifier {
    async fn classify(
        &self,
        evidence: &str,
        claim: &str,
        _labels: &[&str],
    ) -> BackendResult<StanceScore> {
        self.calls
            .lock()
            .unwrap()
            .push((evidence.to_string(), claim.to_string()));

        if self.failing {
            return Err(BackendError::Unavailable("classifier offline".to_string()));
        }

        let haystack = evidence.to_lowercase();
        let rules = self.rules.lock().unwrap();
        Ok(rules
            .iter()
            .find(|r| haystack.contains(&r.needle))
            .map(|r| r.score)
            .unwrap_or(self.default))
    }
}

// ---------------------------------------------------------------------------
// Bundle
// ---------------------------------------------------------------------------

/// Handles to the fakes behind a `Backends` bundle, for assertions.
///
/// The bundle summarizes through `summarizer` unless `with_summarizer`
/// swapped in another implementation.
#[derive(Clone)]
pub struct FakeBackends {
    pub search: Arc<ScriptedSearch>,
    pub pages: Arc<MemoryPages>,
    pub summarizer: Arc<PassthroughSummarizer>,
    pub classifier: Arc<ScriptedClassifier>,
    replacement_summarizer: Option<Arc<dyn Summarizer>>,
}

impl std::fmt::Debug for FakeBackends {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeBackends")
            .field("search", &self.search)
            .field("pages", &self.pages)
            .field("classifier", &self.classifier)
            .field("replaced_summarizer", &self.replacement_summarizer.is_some())
            .finish()
    }
}

impl FakeBackends {
    pub fn new(search: ScriptedSearch, pages: MemoryPages, classifier: ScriptedClassifier) -> Self {
        Self {
            search: Arc::new(search),
            pages: Arc::new(pages),
            summarizer: Arc::new(PassthroughSummarizer::new()),
            classifier: Arc::new(classifier),
            replacement_summarizer: None,
        }
    }

    /// Summarize through `summarizer` instead of the passthrough fake.
    pub fn with_summarizer(mut self, summarizer: impl Summarizer + 'static) -> Self {
        self.replacement_summarizer = Some(Arc::new(summarizer));
        self
    }

    /// Fakes that know nothing: every search is empty.
    pub fn empty() -> Self {
        Self::new(
            ScriptedSearch::new(),
            MemoryPages::new(),
            ScriptedClassifier::new(),
        )
    }

    pub fn backends(&self) -> Backends {
        let summarizer: Arc<dyn Summarizer> = match &self.replacement_summarizer {
            Some(replacement) => replacement.clone(),
            None => self.summarizer.clone(),
        };
        Backends::new(
            self.search.clone(),
            self.pages.clone(),
            summarizer,
            self.classifier.clone(),
        )
    }

    /// Total calls issued to any collaborator.
    pub fn total_calls(&self) -> usize {
        self.search.call_count()
            + self.pages.call_count()
            + self.summarizer.call_count()
            + self.classifier.call_count()
    }
}
