//! Match Document Module
//!
//! Defines the expected shape of the upstream payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Match Document ==
/// The externally fetched match listing.
///
/// Only three fields are known to this system; the match records in `data`
/// are opaque and pass through unmodified. Unknown top-level fields are
/// ignored, but a body missing any of the three known fields is rejected
/// as malformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDocument {
    /// Number of matches in the listing
    pub matches_count: u64,
    /// Timestamp the upstream last regenerated the listing
    pub last_updated: String,
    /// Opaque match records, forwarded as-is
    pub data: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_deserialize() {
        let json = r#"{
            "matches_count": 2,
            "last_updated": "2025-08-01T09:30:00Z",
            "data": [{"home": "AFC"}, {"home": "BFC"}]
        }"#;
        let doc: MatchDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.matches_count, 2);
        assert_eq!(doc.last_updated, "2025-08-01T09:30:00Z");
        assert_eq!(doc.data.len(), 2);
    }

    #[test]
    fn test_document_ignores_unknown_fields() {
        let json = r#"{
            "matches_count": 0,
            "last_updated": "2025-08-01T09:30:00Z",
            "data": [],
            "generator": "v3"
        }"#;
        let doc: MatchDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.matches_count, 0);
    }

    #[test]
    fn test_document_missing_field_is_rejected() {
        let json = r#"{"matches_count": 1, "data": []}"#;
        let result: Result<MatchDocument, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_document_records_pass_through() {
        let json = r#"{
            "matches_count": 1,
            "last_updated": "now",
            "data": [{"nested": {"streams": [1, 2, 3]}}]
        }"#;
        let doc: MatchDocument = serde_json::from_str(json).unwrap();
        let round_trip = serde_json::to_value(&doc.data).unwrap();
        assert_eq!(round_trip[0]["nested"]["streams"][2], 3);
    }
}
