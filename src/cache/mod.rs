//! Cache Module
//!
//! Caches the upstream match document for a fixed window and degrades to
//! serving stale data when a refresh fails.

mod document;
mod fetcher;
mod stats;

// Re-export public types
pub use document::MatchDocument;
pub use fetcher::MatchCache;
pub use stats::FetchStats;

// == Public Constants ==
/// How long a fetched document stays fresh, in seconds (10 minutes)
pub const CACHE_DURATION_SECS: u64 = 600;

/// Upstream request timeout in seconds
pub const FETCH_TIMEOUT_SECS: u64 = 10;
