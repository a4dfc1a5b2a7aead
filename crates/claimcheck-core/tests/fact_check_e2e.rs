//! End-to-end fact-check scenarios against in-memory backends.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use claimcheck_backends::fakes::{
    FakeBackends, MemoryPages, PassthroughSummarizer, ScriptedClassifier, ScriptedSearch,
};
use claimcheck_backends::{BackendResult, Backends, PageFetcher, Stance};
use claimcheck_core::{CheckerConfig, DecisionPath, FactChecker, Verdict};

fn padded(body: &str) -> String {
    format!("{body} {}", "Additional reference material follows here. ".repeat(6))
}

fn checker(fakes: &FakeBackends) -> FactChecker {
    FactChecker::new(fakes.backends(), Arc::new(CheckerConfig::default()))
}

#[tokio::test]
async fn test_two_claims_trusted_support_is_true() {
    let search = ScriptedSearch::new().with_fallback([
        "https://www.nasa.gov/earth",
        "https://www.who.int/water",
        "https://www.bbc.com/science/water",
    ]);
    let pages = MemoryPages::new()
        .with_page(
            "https://www.nasa.gov/earth",
            padded("The Earth is round and orbits the Sun."),
        )
        .with_page(
            "https://www.who.int/water",
            padded("Pure water boils at 100 degrees Celsius at sea level."),
        )
        .with_page(
            "https://www.bbc.com/science/water",
            padded("Water boils at 100 degrees Celsius when pressure is at sea level."),
        );
    let fakes = FakeBackends::new(
        search,
        pages,
        ScriptedClassifier::always(Stance::Supports, 0.9),
    );

    let response = checker(&fakes)
        .fact_check(
            "The Earth is round and orbits the Sun once a year. \
             Water boils at 100 degrees Celsius at sea level.",
        )
        .await;

    assert_eq!(response.claims.len(), 2);
    assert_eq!(
        response.claims[0].claim.as_str(),
        "The Earth is round and orbits the Sun once a year"
    );

    let water = &response.claims[1];
    assert_eq!(water.claim.as_str(), "Water boils at 100 degrees Celsius at sea level");
    assert_eq!(water.verdict, Verdict::True);
    assert_eq!(water.decided_by, DecisionPath::WeightedEvidence);
    let metrics = water.metrics.unwrap();
    assert_eq!(metrics.truth_score, 1.0);
    assert_eq!(metrics.cross_source_agreement, 1.0);
    assert_eq!(metrics.source_credibility_score, 1.0);
    let urls: Vec<_> = water.evidence.iter().map(|e| e.source_url.as_str()).collect();
    assert_eq!(
        urls,
        vec!["https://www.who.int/water", "https://www.bbc.com/science/water"]
    );
    assert!(response.claims.iter().all(|c| c.verdict == Verdict::True));
}

#[tokio::test]
async fn test_nationality_contradiction_forces_false() {
    let search = ScriptedSearch::new().with_fallback([
        "https://en.wikipedia.org/wiki/Narendra_Modi",
        "https://www.pmindia.gov.in/en/",
    ]);
    let pages = MemoryPages::new()
        .with_page(
            "https://en.wikipedia.org/wiki/Narendra_Modi",
            padded(
                "Narendra Modi is an Indian politician who has served as \
                 the Prime Minister of India.",
            ),
        )
        .with_page(
            "https://www.pmindia.gov.in/en/",
            padded("Official website of the Prime Minister of India."),
        );
    let fakes = FakeBackends::new(
        search,
        pages,
        ScriptedClassifier::always(Stance::Supports, 0.9),
    );

    let response = checker(&fakes)
        .fact_check("Narendra Modi is an American citizen.")
        .await;

    assert_eq!(response.claims.len(), 1);
    let result = &response.claims[0];
    assert_eq!(result.verdict, Verdict::False);
    assert_eq!(result.truth_score, Some(0.99));
    assert_eq!(result.decided_by, DecisionPath::HardCheck);
    assert_eq!(result.evidence.len(), 1);
    assert_eq!(result.evidence[0].stance, Stance::Refutes);
    assert_eq!(
        result.evidence[0].source_url,
        "https://en.wikipedia.org/wiki/Narendra_Modi"
    );

    // short-circuit: only the biography queries ran, no stance was classified
    assert_eq!(fakes.search.call_count(), 4);
    assert_eq!(fakes.classifier.call_count(), 0);
}

#[tokio::test]
async fn test_empty_input_issues_no_calls() {
    let fakes = FakeBackends::empty();

    let response = checker(&fakes).fact_check("").await;

    assert_eq!(response.text, "");
    assert!(response.claims.is_empty());
    assert_eq!(fakes.total_calls(), 0);
}

#[tokio::test]
async fn test_inconclusive_hard_check_falls_back_to_weighted() {
    // biographical claim, but no authoritative sources at all
    let search = ScriptedSearch::new().with_fallback(["https://www.reuters.com/curie"]);
    let pages = MemoryPages::new().with_page(
        "https://www.reuters.com/curie",
        padded("Marie Curie was born in Warsaw, Poland."),
    );
    let fakes = FakeBackends::new(
        search,
        pages,
        ScriptedClassifier::always(Stance::Supports, 0.8),
    );

    let response = checker(&fakes)
        .fact_check("Marie Curie was born in Warsaw")
        .await;

    let result = &response.claims[0];
    assert_eq!(result.decided_by, DecisionPath::WeightedEvidence);
    assert_eq!(result.verdict, Verdict::True);
    assert_eq!(fakes.search.call_count(), 4 + 10);
}

#[tokio::test]
async fn test_evidence_capped_at_eight_trusted_first() {
    let mut urls: Vec<String> = (0..6)
        .map(|i| format!("https://blog{i}.example.com/water"))
        .collect();
    urls.extend((0..10).map(|i| format!("https://www.nature.com/articles/{i}")));
    let mut pages = MemoryPages::new();
    for url in &urls {
        pages = pages.with_page(url, padded("Water boils at 100 degrees Celsius."));
    }
    let search = ScriptedSearch::new().with_fallback(urls.clone());
    let fakes = FakeBackends::new(
        search,
        pages,
        ScriptedClassifier::always(Stance::Supports, 0.7),
    );

    let response = checker(&fakes)
        .fact_check("Water boils at 100 degrees Celsius at sea level")
        .await;

    let evidence = &response.claims[0].evidence;
    assert_eq!(evidence.len(), 8);
    assert!(evidence
        .iter()
        .all(|e| e.source_url.starts_with("https://www.nature.com/")));
    assert_eq!(evidence[0].source_url, "https://www.nature.com/articles/0");
    assert_eq!(evidence[7].source_url, "https://www.nature.com/articles/7");
    // scanning stopped at the cap
    assert_eq!(fakes.pages.call_count(), 8);
}

#[tokio::test]
async fn test_mixed_untrusted_evidence_leans_false() {
    let search = ScriptedSearch::new().with_fallback([
        "https://forum-a.example.com/t/1",
        "https://forum-b.example.com/t/2",
    ]);
    let pages = MemoryPages::new()
        .with_page(
            "https://forum-a.example.com/t/1",
            padded("Coffee consumption stunts growth in children. agree"),
        )
        .with_page(
            "https://forum-b.example.com/t/2",
            padded("Coffee consumption stunts growth in children. disagree"),
        );
    let classifier = ScriptedClassifier::new()
        .with_rule("disagree", Stance::Refutes, 0.8)
        .with_rule("agree", Stance::Supports, 0.6);
    let fakes = FakeBackends::new(search, pages, classifier);

    let response = checker(&fakes)
        .fact_check("Coffee consumption stunts growth in children")
        .await;

    let result = &response.claims[0];
    // supports 0.3, refutes 0.4: truth -1/7, agreement 4/7
    assert_eq!(result.verdict, Verdict::False);
    let metrics = result.metrics.unwrap();
    assert!(metrics.truth_score < 0.0);
    assert_eq!(metrics.source_credibility_score, 0.0);
}

/// Page fetcher that delays URLs containing "slow" and records completion
/// order.
struct DelayedPages {
    inner: MemoryPages,
    finished: Mutex<Vec<String>>,
}

#[async_trait]
impl PageFetcher for DelayedPages {
    async fn fetch(&self, url: &str) -> BackendResult<String> {
        if url.contains("slow") {
            tokio::time::sleep(Duration::from_secs(2)).await;
        }
        let text = self.inner.fetch(url).await;
        self.finished.lock().unwrap().push(url.to_string());
        text
    }
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_claims_keep_extraction_order() {
    let topics = [
        ("volcanoes erupt molten lava often", "https://slow.apnews.com/volcanoes"),
        ("glaciers retreat each summer quickly", "https://www.apnews.com/glaciers"),
        ("tides follow lunar cycles predictably", "https://www.apnews.com/tides"),
    ];
    let mut search = ScriptedSearch::new();
    let mut inner = MemoryPages::new();
    for (query, url) in topics {
        search = search.with_results(query, [url]);
        inner = inner.with_page(url, padded(query));
    }
    let pages = Arc::new(DelayedPages {
        inner,
        finished: Mutex::new(Vec::new()),
    });
    let backends = Backends::new(
        Arc::new(search),
        pages.clone(),
        Arc::new(PassthroughSummarizer::new()),
        Arc::new(ScriptedClassifier::always(Stance::Supports, 0.95)),
    );
    let mut config = CheckerConfig::default();
    config.runtime.claim_concurrency = 3;
    let checker = FactChecker::new(backends, Arc::new(config));

    let response = checker
        .fact_check(
            "Volcanoes erupt molten lava often!\n\
             Glaciers retreat each summer quickly?\n\
             Tides follow lunar cycles predictably.",
        )
        .await;

    // the first claim's page finished last
    assert_eq!(
        pages.finished.lock().unwrap().last().map(String::as_str),
        Some("https://slow.apnews.com/volcanoes")
    );
    let claims: Vec<_> = response.claims.iter().map(|c| c.claim.as_str()).collect();
    assert_eq!(
        claims,
        vec![
            "Volcanoes erupt molten lava often",
            "Glaciers retreat each summer quickly",
            "Tides follow lunar cycles predictably",
        ]
    );
    assert!(response.claims.iter().all(|c| c.verdict == Verdict::True));
    assert_eq!(
        response.claims[0].evidence[0].source_url,
        "https://slow.apnews.com/volcanoes"
    );
}

/// Page fetcher that stalls on URLs containing "slow".
struct StallingPages(MemoryPages);

#[async_trait]
impl PageFetcher for StallingPages {
    async fn fetch(&self, url: &str) -> BackendResult<String> {
        if url.contains("slow") {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        self.0.fetch(url).await
    }
}

#[tokio::test(start_paused = true)]
async fn test_stalled_fetch_is_skipped() {
    let search = Arc::new(
        ScriptedSearch::new().with_fallback(["https://slow.who.int/a", "https://www.who.int/b"]),
    );
    let pages = StallingPages(
        MemoryPages::new()
            .with_page("https://slow.who.int/a", padded("Water boils at 100 degrees Celsius."))
            .with_page("https://www.who.int/b", padded("Water boils at 100 degrees Celsius.")),
    );
    let backends = Backends::new(
        search,
        Arc::new(pages),
        Arc::new(PassthroughSummarizer::new()),
        Arc::new(ScriptedClassifier::always(Stance::Supports, 0.9)),
    );
    let mut config = CheckerConfig::default();
    config.runtime.call_timeout_ms = 500;
    let checker = FactChecker::new(backends, Arc::new(config));

    let response = checker
        .fact_check("Water boils at 100 degrees Celsius at sea level")
        .await;

    let evidence = &response.claims[0].evidence;
    assert_eq!(evidence.len(), 1);
    assert_eq!(evidence[0].source_url, "https://www.who.int/b");
}

#[tokio::test]
async fn test_search_failure_keeps_earlier_candidates() {
    let claim = "Water boils at 100 degrees Celsius at sea level";
    let base = claim.to_lowercase();
    let search = ScriptedSearch::new()
        .with_results(&base, ["https://www.who.int/water"])
        .fail_on(&format!("Is it true that {base}?"))
        .with_fallback(["https://www.bbc.com/never"]);
    let pages = MemoryPages::new().with_page(
        "https://www.who.int/water",
        padded("Water boils at 100 degrees Celsius."),
    );
    let fakes = FakeBackends::new(
        search,
        pages,
        ScriptedClassifier::always(Stance::Supports, 0.9),
    );

    let response = checker(&fakes).fact_check(claim).await;

    let result = &response.claims[0];
    assert_eq!(result.evidence.len(), 1);
    assert_eq!(result.verdict, Verdict::True);
    assert_eq!(fakes.search.call_count(), 2);
}
