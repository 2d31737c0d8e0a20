//! Response DTOs for the match proxy API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::{FetchStats, MatchDocument};

/// Cache freshness block embedded in the data-serving responses.
#[derive(Debug, Clone, Serialize)]
pub struct CacheInfo {
    /// Seconds since the served document was fetched
    pub age_seconds: u64,
    /// Freshness window the age is measured against
    pub max_age_seconds: u64,
}

impl CacheInfo {
    /// Creates a new CacheInfo
    pub fn new(age_seconds: u64, max_age_seconds: u64) -> Self {
        Self {
            age_seconds,
            max_age_seconds,
        }
    }
}

/// Response body for GET /matches
#[derive(Debug, Clone, Serialize)]
pub struct MatchesResponse {
    /// Always true on the success path
    pub success: bool,
    /// Upstream generation timestamp, forwarded as-is
    pub last_updated: String,
    /// Number of matches in the listing
    pub matches_count: u64,
    /// Cache freshness info
    pub cache_info: CacheInfo,
    /// Opaque match records, forwarded as-is
    pub data: Vec<Value>,
}

impl MatchesResponse {
    /// Creates a new MatchesResponse from a cached document and its age
    pub fn new(doc: MatchDocument, age_seconds: u64, max_age_seconds: u64) -> Self {
        Self {
            success: true,
            last_updated: doc.last_updated,
            matches_count: doc.matches_count,
            cache_info: CacheInfo::new(age_seconds, max_age_seconds),
            data: doc.data,
        }
    }
}

/// Response body for GET /encoded
#[derive(Debug, Clone, Serialize)]
pub struct EncodedResponse {
    /// Always true on the success path
    pub success: bool,
    /// Upstream generation timestamp, forwarded as-is
    pub last_updated: String,
    /// Number of matches in the listing
    pub matches_count: u64,
    /// Cache freshness info
    pub cache_info: CacheInfo,
    /// The match records serialized and re-encoded
    pub encoded_data: String,
    /// Byte length of the serialized records before encoding
    pub original_length: usize,
    /// Character length of the encoded output
    pub encoded_length: usize,
}

impl EncodedResponse {
    /// Creates a new EncodedResponse
    pub fn new(
        doc: MatchDocument,
        age_seconds: u64,
        max_age_seconds: u64,
        original_length: usize,
        encoded_data: String,
    ) -> Self {
        Self {
            success: true,
            last_updated: doc.last_updated,
            matches_count: doc.matches_count,
            cache_info: CacheInfo::new(age_seconds, max_age_seconds),
            encoded_length: encoded_data.len(),
            encoded_data,
            original_length,
        }
    }
}

/// Cache block of the healthy /health response
#[derive(Debug, Clone, Serialize)]
pub struct CacheHealth {
    /// Always true; the cache cannot be switched off
    pub enabled: bool,
    /// Freshness window in seconds
    pub duration_seconds: u64,
    /// Seconds since the current payload was fetched
    pub current_age_seconds: u64,
    /// Requests served from a fresh cache entry
    pub hits: u64,
    /// Requests that attempted an upstream fetch
    pub misses: u64,
}

/// Response body for GET /health when the document is available
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status, "healthy"
    pub status: String,
    /// Upstream reachability, "online"
    pub source: String,
    /// Cache counters and freshness
    pub cache: CacheHealth,
    /// Number of matches in the current document
    pub matches_count: u64,
    /// Upstream generation timestamp
    pub last_updated: String,
    /// Current timestamp in RFC 3339 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a healthy response from the current document and counters
    pub fn healthy(
        doc: &MatchDocument,
        age_seconds: u64,
        duration_seconds: u64,
        stats: &FetchStats,
    ) -> Self {
        Self {
            status: "healthy".to_string(),
            source: "online".to_string(),
            cache: CacheHealth {
                enabled: true,
                duration_seconds,
                current_age_seconds: age_seconds,
                hits: stats.hits,
                misses: stats.misses,
            },
            matches_count: doc.matches_count,
            last_updated: doc.last_updated.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for GET /health when the fetch failed with nothing cached
#[derive(Debug, Clone, Serialize)]
pub struct DegradedResponse {
    /// Health status, "degraded"
    pub status: String,
    /// Upstream reachability, "offline"
    pub source: String,
    /// Generic failure message
    pub error: String,
    /// Current timestamp in RFC 3339 format
    pub timestamp: String,
}

impl DegradedResponse {
    /// Creates a degraded response with the given client-safe message
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            status: "degraded".to_string(),
            source: "offline".to_string(),
            error: error.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Static service description served at GET /
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfoResponse {
    /// Service name
    pub name: String,
    /// Always "running"
    pub status: String,
    /// Human-readable cache window
    pub cache_duration: String,
    /// Paths of the available endpoints
    pub endpoints: EndpointList,
}

/// Endpoint map embedded in the service description
#[derive(Debug, Clone, Serialize)]
pub struct EndpointList {
    pub health: String,
    pub matches: String,
    pub encoded: String,
}

impl ServiceInfoResponse {
    /// Creates the static service description
    pub fn new() -> Self {
        Self {
            name: "Football Matches Proxy API".to_string(),
            status: "running".to_string(),
            cache_duration: "10 minutes".to_string(),
            endpoints: EndpointList {
                health: "/health".to_string(),
                matches: "/matches".to_string(),
                encoded: "/encoded".to_string(),
            },
        }
    }
}

impl Default for ServiceInfoResponse {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_doc() -> MatchDocument {
        MatchDocument {
            matches_count: 3,
            last_updated: "2025-08-01T09:30:00Z".to_string(),
            data: vec![json!({"home": "AFC"}), json!({"home": "BFC"}), json!({"home": "CFC"})],
        }
    }

    #[test]
    fn test_matches_response_serialize() {
        let resp = MatchesResponse::new(sample_doc(), 42, 600);
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["matches_count"], 3);
        assert_eq!(json["cache_info"]["age_seconds"], 42);
        assert_eq!(json["cache_info"]["max_age_seconds"], 600);
        assert_eq!(json["data"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_encoded_response_lengths() {
        let resp = EncodedResponse::new(sample_doc(), 0, 600, 10, "MZXWe=".to_string());

        assert_eq!(resp.original_length, 10);
        assert_eq!(resp.encoded_length, 6);
        assert_eq!(resp.encoded_data, "MZXWe=");
    }

    #[test]
    fn test_health_response_serialize() {
        let stats = FetchStats {
            hits: 7,
            misses: 2,
        };
        let resp = HealthResponse::healthy(&sample_doc(), 120, 600, &stats);
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["status"], "healthy");
        assert_eq!(json["source"], "online");
        assert_eq!(json["cache"]["enabled"], true);
        assert_eq!(json["cache"]["hits"], 7);
        assert_eq!(json["cache"]["misses"], 2);
        assert_eq!(json["cache"]["current_age_seconds"], 120);
        assert!(json.get("timestamp").is_some());
    }

    #[test]
    fn test_degraded_response_serialize() {
        let resp = DegradedResponse::new("Failed to fetch matches data");
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["status"], "degraded");
        assert_eq!(json["source"], "offline");
        assert_eq!(json["error"], "Failed to fetch matches data");
        assert!(json.get("timestamp").is_some());
    }

    #[test]
    fn test_service_info_lists_endpoints() {
        let resp = ServiceInfoResponse::new();
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["status"], "running");
        assert_eq!(json["endpoints"]["health"], "/health");
        assert_eq!(json["endpoints"]["matches"], "/matches");
        assert_eq!(json["endpoints"]["encoded"], "/encoded");
    }
}
