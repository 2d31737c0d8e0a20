//! API Handlers
//!
//! HTTP request handlers for each match proxy endpoint.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::api::auth::RequireApiKey;
use crate::cache::MatchCache;
use crate::config::Config;
use crate::encoding;
use crate::error::{ProxyError, Result};
use crate::models::{
    DegradedResponse, EncodedResponse, HealthResponse, MatchesResponse, ServiceInfoResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The match cache every data endpoint reads through
    pub cache: Arc<MatchCache>,
    /// Accepted API keys; empty disables the /matches gate
    pub api_keys: Arc<Vec<String>>,
}

impl AppState {
    /// Creates a new AppState with the given cache and key set.
    pub fn new(cache: MatchCache, api_keys: Vec<String>) -> Self {
        Self {
            cache: Arc::new(cache),
            api_keys: Arc::new(api_keys),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        let cache = MatchCache::new(config.source_url.clone());
        Self::new(cache, config.api_keys.clone())
    }
}

/// Handler for GET /
///
/// Returns the static service description.
pub async fn root_handler() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse::new())
}

/// Handler for GET /health
///
/// Reports cache counters and upstream reachability. Never key-gated.
/// Returns 503 only when the fetch fails with nothing cached to fall
/// back on.
pub async fn health_handler(State(state): State<AppState>) -> Response {
    match state.cache.get_matches().await {
        Ok((doc, age)) => {
            let stats = state.cache.stats().await;
            let body =
                HealthResponse::healthy(&doc, age, state.cache.cache_duration_secs(), &stats);
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => {
            let body = DegradedResponse::new(err.client_message());
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
    }
}

/// Handler for GET /matches
///
/// Returns the proxied match listing. The [`RequireApiKey`] extractor
/// rejects unauthenticated requests before this body runs.
pub async fn matches_handler(
    _key: RequireApiKey,
    State(state): State<AppState>,
) -> Result<Json<MatchesResponse>> {
    let (doc, age) = state.cache.get_matches().await?;
    info!(age_seconds = age, matches_count = doc.matches_count, "serving match listing");

    let max_age = state.cache.cache_duration_secs();
    Ok(Json(MatchesResponse::new(doc, age, max_age)))
}

/// Handler for GET /encoded
///
/// Returns the match records serialized to JSON and re-encoded with the
/// 5-bit alphabet, alongside the original and encoded lengths.
pub async fn encoded_handler(State(state): State<AppState>) -> Result<Json<EncodedResponse>> {
    let (doc, age) = state.cache.get_matches().await?;

    let serialized =
        serde_json::to_string(&doc.data).map_err(|e| ProxyError::Encoding(e.to_string()))?;
    let encoded = encoding::encode(&serialized);
    info!(
        original_length = serialized.len(),
        encoded_length = encoded.len(),
        "serving encoded match listing"
    );

    let max_age = state.cache.cache_duration_secs();
    Ok(Json(EncodedResponse::new(
        doc,
        age,
        max_age,
        serialized.len(),
        encoded,
    )))
}
