//! API key authentication
//!
//! An extractor that gates a handler behind the configured key set. The
//! check runs during extraction, before the handler body, so a rejected
//! request never touches the cache.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use crate::api::AppState;
use crate::error::ProxyError;

/// Extractor that requires a valid API key when any keys are configured.
///
/// The key is read from the `Authorization` header, either as
/// `Bearer <key>` or as the raw key. With an empty configured set the
/// gate is disabled and every request passes.
#[derive(Debug, Clone, Copy)]
pub struct RequireApiKey;

#[async_trait]
impl FromRequestParts<AppState> for RequireApiKey {
    type Rejection = ProxyError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if state.api_keys.is_empty() {
            return Ok(RequireApiKey);
        }

        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(ProxyError::ApiKeyMissing)?;
        let raw = header_value
            .to_str()
            .map_err(|_| ProxyError::ApiKeyInvalid)?;

        // Accept both "Bearer <key>" and the bare key.
        let key = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();

        if state.api_keys.iter().any(|accepted| accepted == key) {
            debug!(
                key_prefix = %key.chars().take(8).collect::<String>(),
                "accepted API key"
            );
            Ok(RequireApiKey)
        } else {
            Err(ProxyError::ApiKeyInvalid)
        }
    }
}
