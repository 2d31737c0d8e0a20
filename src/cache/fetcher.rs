//! Match Cache Module
//!
//! Owns the cached match document and the refresh-or-serve decision.
//! A fetched document stays fresh for [`CACHE_DURATION_SECS`]; once stale,
//! the next caller refreshes it from upstream. When a refresh fails and an
//! older document exists, that document is served instead of an error.

use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::cache::{FetchStats, MatchDocument, CACHE_DURATION_SECS, FETCH_TIMEOUT_SECS};
use crate::error::{ProxyError, Result};

// == Cache State ==
/// Shared mutable state guarded by the cache's RwLock.
///
/// Invariant: `payload` is None only before the first successful fetch;
/// once set it is only ever replaced, never cleared. `fetched_at` is set
/// together with `payload` under a single lock acquisition.
#[derive(Debug, Default)]
struct CacheState {
    /// Last successfully fetched document
    payload: Option<MatchDocument>,
    /// When the current payload was fetched
    fetched_at: Option<Instant>,
    /// Hit/miss counters
    stats: FetchStats,
}

impl CacheState {
    /// Returns the cached document and its age when still within `max_age` seconds.
    fn fresh(&self, max_age: u64) -> Option<(MatchDocument, u64)> {
        let age = self.fetched_at?.elapsed().as_secs();
        let doc = self.payload.as_ref()?;
        (age < max_age).then(|| (doc.clone(), age))
    }

    /// Returns the cached document and its age regardless of freshness.
    fn stale(&self) -> Option<(MatchDocument, u64)> {
        let age = self.fetched_at?.elapsed().as_secs();
        Some((self.payload.clone()?, age))
    }
}

// == Match Cache ==
/// Time-bounded cache over the upstream match document.
///
/// All HTTP handlers go through [`MatchCache::get_matches`]. The state
/// lock is never held across the upstream call; a separate refresh guard
/// single-flights concurrent misses so at most one fetch is in flight.
#[derive(Debug)]
pub struct MatchCache {
    /// Upstream URL serving the match document
    source_url: String,
    /// Outbound HTTP client with the fetch timeout applied
    client: reqwest::Client,
    /// Freshness window in seconds
    cache_duration: u64,
    /// Shared cache state
    state: RwLock<CacheState>,
    /// Held by the one caller allowed to refresh at a time
    refresh: Mutex<()>,
}

impl MatchCache {
    // == Constructor ==
    /// Creates a new MatchCache fetching from the given URL.
    ///
    /// The freshness window defaults to [`CACHE_DURATION_SECS`].
    pub fn new(source_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .expect("failed to build upstream HTTP client");

        Self {
            source_url: source_url.into(),
            client,
            cache_duration: CACHE_DURATION_SECS,
            state: RwLock::new(CacheState::default()),
            refresh: Mutex::new(()),
        }
    }

    /// Overrides the freshness window. Used by tests to force misses
    /// without waiting out the full window.
    pub fn with_cache_duration(mut self, secs: u64) -> Self {
        self.cache_duration = secs;
        self
    }

    /// Returns the freshness window in seconds.
    pub fn cache_duration_secs(&self) -> u64 {
        self.cache_duration
    }

    // == Get Matches ==
    /// Returns the match document and its cache age in seconds.
    ///
    /// Serves from cache while the entry is fresh; otherwise refreshes
    /// from upstream. A failed refresh falls back to the previous
    /// document, however old it is. The only error case is a failed
    /// fetch with nothing cached to fall back on.
    pub async fn get_matches(&self) -> Result<(MatchDocument, u64)> {
        // Fast path: fresh cache entry, no upstream call.
        {
            let mut state = self.state.write().await;
            if let Some((doc, age)) = state.fresh(self.cache_duration) {
                state.stats.record_hit();
                debug!(age_seconds = age, hits = state.stats.hits, "serving cached match data");
                return Ok((doc, age));
            }
        }

        // Slow path: at most one caller refreshes at a time.
        let _guard = self.refresh.lock().await;

        // Re-check: another caller may have refreshed while we waited.
        {
            let mut state = self.state.write().await;
            if let Some((doc, age)) = state.fresh(self.cache_duration) {
                state.stats.record_hit();
                debug!(age_seconds = age, "serving match data refreshed by concurrent caller");
                return Ok((doc, age));
            }
            state.stats.record_miss();
        }

        // The state lock is released here; readers with a fresh entry
        // are not blocked while the upstream call is in flight.
        info!(url = %self.source_url, "fetching fresh match data from upstream");
        match self.fetch_upstream().await {
            Ok(doc) => {
                let mut state = self.state.write().await;
                state.payload = Some(doc.clone());
                state.fetched_at = Some(Instant::now());
                info!(
                    matches_count = doc.matches_count,
                    misses = state.stats.misses,
                    "fetched match data from upstream"
                );
                Ok((doc, 0))
            }
            Err(err) => {
                error!(error = %err, "upstream fetch failed");
                let state = self.state.read().await;
                match state.stale() {
                    Some((doc, age)) => {
                        warn!(age_seconds = age, "serving expired cache as fallback");
                        Ok((doc, age))
                    }
                    None => Err(err),
                }
            }
        }
    }

    // == Stats ==
    /// Returns a snapshot of the hit/miss counters.
    pub async fn stats(&self) -> FetchStats {
        self.state.read().await.stats.clone()
    }

    // == Upstream Fetch ==
    /// Performs the upstream GET and parses the body as a match document.
    async fn fetch_upstream(&self) -> Result<MatchDocument> {
        let response = self
            .client
            .get(&self.source_url)
            .send()
            .await
            .map_err(|e| ProxyError::UpstreamUnreachable(e.to_string()))?
            .error_for_status()
            .map_err(|e| ProxyError::UpstreamUnreachable(e.to_string()))?;

        response
            .json::<MatchDocument>()
            .await
            .map_err(|e| ProxyError::UpstreamMalformed(e.to_string()))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn feed_body() -> serde_json::Value {
        json!({
            "matches_count": 2,
            "last_updated": "2025-08-01T09:30:00Z",
            "data": [{"home": "AFC", "away": "BFC"}, {"home": "CFC", "away": "DFC"}]
        })
    }

    async fn mock_feed(server: &MockServer, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/matches.json"))
            .respond_with(template)
            .mount(server)
            .await;
    }

    fn feed_url(server: &MockServer) -> String {
        format!("{}/matches.json", server.uri())
    }

    #[tokio::test]
    async fn test_first_call_fetches_upstream() {
        let server = MockServer::start().await;
        mock_feed(&server, ResponseTemplate::new(200).set_body_json(feed_body())).await;

        let cache = MatchCache::new(feed_url(&server));
        let (doc, age) = cache.get_matches().await.unwrap();

        assert_eq!(doc.matches_count, 2);
        assert_eq!(age, 0);

        let stats = cache.stats().await;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 0);
    }

    #[tokio::test]
    async fn test_second_call_within_window_is_a_hit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/matches.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(feed_body()))
            .expect(1)
            .mount(&server)
            .await;

        let cache = MatchCache::new(feed_url(&server));
        cache.get_matches().await.unwrap();
        let (doc, _age) = cache.get_matches().await.unwrap();

        assert_eq!(doc.matches_count, 2);

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[tokio::test]
    async fn test_failure_without_cache_propagates() {
        let server = MockServer::start().await;
        mock_feed(&server, ResponseTemplate::new(500)).await;

        let cache = MatchCache::new(feed_url(&server));
        let result = cache.get_matches().await;

        assert!(matches!(result, Err(ProxyError::UpstreamUnreachable(_))));
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_fetch_failure() {
        let server = MockServer::start().await;
        mock_feed(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})),
        )
        .await;

        let cache = MatchCache::new(feed_url(&server));
        let result = cache.get_matches().await;

        assert!(matches!(result, Err(ProxyError::UpstreamMalformed(_))));
    }

    #[tokio::test]
    async fn test_failed_refresh_serves_stale_payload() {
        let server = MockServer::start().await;
        // First request succeeds, everything after returns 500.
        Mock::given(method("GET"))
            .and(path("/matches.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(feed_body()))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        mock_feed(&server, ResponseTemplate::new(500)).await;

        // Zero-length window: every call is a refresh attempt.
        let cache = MatchCache::new(feed_url(&server)).with_cache_duration(0);

        let (first, _) = cache.get_matches().await.unwrap();
        assert_eq!(first.matches_count, 2);

        let (fallback, _age) = cache.get_matches().await.unwrap();
        assert_eq!(fallback.matches_count, 2);
        assert_eq!(fallback.last_updated, first.last_updated);

        let stats = cache.stats().await;
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.hits, 0);
    }

    #[tokio::test]
    async fn test_concurrent_misses_fetch_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/matches.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(feed_body())
                    .set_delay(Duration::from_millis(200)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let cache = Arc::new(MatchCache::new(feed_url(&server)));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move { cache.get_matches().await }));
        }

        for handle in handles {
            let (doc, _age) = handle.await.unwrap().unwrap();
            assert_eq!(doc.matches_count, 2);
        }

        // One caller paid the upstream latency; the rest were coalesced.
        let stats = cache.stats().await;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 7);
    }

    #[tokio::test]
    async fn test_refresh_replaces_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/matches.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(feed_body()))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        mock_feed(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({
                "matches_count": 5,
                "last_updated": "2025-08-01T10:00:00Z",
                "data": []
            })),
        )
        .await;

        let cache = MatchCache::new(feed_url(&server)).with_cache_duration(0);

        let (first, _) = cache.get_matches().await.unwrap();
        assert_eq!(first.matches_count, 2);

        let (second, age) = cache.get_matches().await.unwrap();
        assert_eq!(second.matches_count, 5);
        assert_eq!(age, 0);
    }
}
