//! Match Proxy - A caching HTTP gateway for a football match feed
//!
//! Fronts a single remote JSON document with a time-bounded cache and
//! exposes it over a small REST surface, optionally gated by an API key.

pub mod api;
pub mod cache;
pub mod config;
pub mod encoding;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::MatchCache;
pub use config::Config;
