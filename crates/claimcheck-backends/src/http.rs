//! HTTP implementations of the backend traits
//!
//! - `SearxSearch`: SearXNG-compatible JSON search (`/search?format=json`)
//! - `ReaderFetcher`: plain-text page reader proxy (`{prefix}{url}`)
//! - `HfSummarizer`: hosted summarization model (inference API shape)
//! - `HfStanceClassifier`: hosted zero-shot classifier (inference API shape)
//!
//! Endpoints come from [`HttpBackendConfig`], usually built from environment
//! variables.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::error::BackendError;
use crate::traits::*;

/// Default per-request timeout for HTTP backends.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Endpoint configuration for the HTTP backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpBackendConfig {
    /// Base URL of a SearXNG-compatible search service
    pub search_url: Option<String>,
    /// Prefix prepended to page URLs to obtain plain text
    pub reader_url: Option<String>,
    /// Summarization model endpoint
    pub summarizer_url: Option<String>,
    /// Zero-shot classification model endpoint
    pub classifier_url: Option<String>,
    /// Bearer token for the model endpoints (optional)
    pub token: Option<String>,
    /// User agent sent with every request
    pub user_agent: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HttpBackendConfig {
    fn default() -> Self {
        HttpBackendConfig {
            search_url: std::env::var("CLAIMCHECK_SEARCH_URL").ok(),
            reader_url: std::env::var("CLAIMCHECK_READER_URL").ok(),
            summarizer_url: std::env::var("CLAIMCHECK_SUMMARIZER_URL").ok(),
            classifier_url: std::env::var("CLAIMCHECK_CLASSIFIER_URL").ok(),
            token: std::env::var("CLAIMCHECK_HF_TOKEN").ok(),
            user_agent: format!("claimcheck/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: std::env::var("CLAIMCHECK_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl HttpBackendConfig {
    /// Create a new config from environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    fn client(&self) -> Result<reqwest::Client, BackendError> {
        reqwest::Client::builder()
            .user_agent(self.user_agent.clone())
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(BackendError::from)
    }

    /// Build all four HTTP backends sharing one connection pool.
    ///
    /// Fails with `NotConfigured` naming the first missing endpoint.
    pub fn into_backends(self) -> Result<Backends, BackendError> {
        let client = self.client()?;
        let search_url = required(self.search_url, "CLAIMCHECK_SEARCH_URL")?;
        let reader_url = required(self.reader_url, "CLAIMCHECK_READER_URL")?;
        let summarizer_url = required(self.summarizer_url, "CLAIMCHECK_SUMMARIZER_URL")?;
        let classifier_url = required(self.classifier_url, "CLAIMCHECK_CLASSIFIER_URL")?;

        Ok(Backends::new(
            Arc::new(SearxSearch::new(client.clone(), search_url)),
            Arc::new(ReaderFetcher::new(client.clone(), reader_url)),
            Arc::new(HfSummarizer::new(
                client.clone(),
                summarizer_url,
                self.token.clone(),
            )),
            Arc::new(HfStanceClassifier::new(client, classifier_url, self.token)),
        ))
    }
}

fn required(value: Option<String>, name: &str) -> Result<String, BackendError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| BackendError::NotConfigured(name.to_string()))
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(BackendError::Status {
        code: status.as_u16(),
        body: body.chars().take(200).collect(),
    })
}

fn with_token(request: reqwest::RequestBuilder, token: &Option<String>) -> reqwest::RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

// ---------------------------------------------------------------------------
// SearxSearch
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearxResponse {
    #[serde(default)]
    results: Vec<SearxResult>,
}

#[derive(Debug, Deserialize)]
struct SearxResult {
    url: Option<String>,
    #[serde(alias = "href")]
    link: Option<String>,
    title: Option<String>,
    content: Option<String>,
}

impl From<SearxResult> for SearchHit {
    fn from(r: SearxResult) -> Self {
        SearchHit {
            url: r.url.or(r.link),
            title: r.title,
            snippet: r.content,
        }
    }
}

/// Search over a SearXNG-compatible JSON API.
pub struct SearxSearch {
    client: reqwest::Client,
    base_url: String,
}

impl SearxSearch {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl SearchBackend for SearxSearch {
    async fn search(&self, query: &str, max_results: usize) -> BackendResult<Vec<SearchHit>> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json")])
            .send()
            .await?;
        let body: SearxResponse = check_status(response).await?.json().await?;
        debug!(query = %query, hits = body.results.len(), "search returned");

        Ok(body
            .results
            .into_iter()
            .take(max_results)
            .map(SearchHit::from)
            .collect())
    }
}

// ---------------------------------------------------------------------------
// ReaderFetcher
// ---------------------------------------------------------------------------

/// Fetches page text through a reader proxy that returns plain text.
pub struct ReaderFetcher {
    client: reqwest::Client,
    prefix: String,
}

impl ReaderFetcher {
    pub fn new(client: reqwest::Client, prefix: impl Into<String>) -> Self {
        Self {
            client,
            prefix: prefix.into(),
        }
    }

    pub fn reader_url(&self, url: &str) -> String {
        format!("{}{}", self.prefix, url)
    }
}

#[async_trait]
impl PageFetcher for ReaderFetcher {
    async fn fetch(&self, url: &str) -> BackendResult<String> {
        let response = self.client.get(self.reader_url(url)).send().await?;
        let text = check_status(response).await?.text().await?;
        if text.trim().is_empty() {
            return Err(BackendError::EmptyResponse);
        }
        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// HfSummarizer
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SummaryOutput {
    summary_text: String,
}

/// Summarization through a hosted inference endpoint.
pub struct HfSummarizer {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl HfSummarizer {
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            token,
        }
    }
}

#[async_trait]
impl Summarizer for HfSummarizer {
    async fn summarize(&self, text: &str, length: SummaryLength) -> BackendResult<String> {
        let body = json!({
            "inputs": text,
            "parameters": {
                "max_length": length.max_length,
                "min_length": length.min_length,
                "do_sample": false,
            },
        });
        let request = with_token(self.client.post(&self.endpoint).json(&body), &self.token);
        let outputs: Vec<SummaryOutput> = check_status(request.send().await?).await?.json().await?;

        outputs
            .into_iter()
            .next()
            .map(|o| o.summary_text)
            .filter(|s| !s.trim().is_empty())
            .ok_or(BackendError::EmptyResponse)
    }
}

// ---------------------------------------------------------------------------
// HfStanceClassifier
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ZeroShotOutput {
    labels: Vec<String>,
    scores: Vec<f64>,
}

/// Zero-shot stance classification through a hosted inference endpoint.
///
/// Evidence and claim are joined as an NLI premise/hypothesis pair.
pub struct HfStanceClassifier {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl HfStanceClassifier {
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            token,
        }
    }

    /// Premise/hypothesis input in the separator format MNLI models expect.
    pub fn nli_input(evidence: &str, claim: &str) -> String {
        format!("{evidence} </s></s> {claim}")
    }
}

#[async_trait]
impl StanceClassifier for HfStanceClassifier {
    async fn classify(
        &self,
        evidence: &str,
        claim: &str,
        labels: &[&str],
    ) -> BackendResult<StanceScore> {
        let body = json!({
            "inputs": Self::nli_input(evidence, claim),
            "parameters": { "candidate_labels": labels },
        });
        let request = with_token(self.client.post(&self.endpoint).json(&body), &self.token);
        let output: ZeroShotOutput = check_status(request.send().await?).await?.json().await?;

        let label = output.labels.first().ok_or(BackendError::EmptyResponse)?;
        let score = output
            .scores
            .first()
            .copied()
            .ok_or(BackendError::EmptyResponse)?;
        let stance = Stance::from_label(label)
            .ok_or_else(|| BackendError::Decode(format!("unexpected label: {label}")))?;

        Ok(StanceScore { stance, score })
    }
}
