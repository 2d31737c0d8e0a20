//! API Module
//!
//! HTTP handlers and routing for the match proxy REST API.
//!
//! # Endpoints
//! - `GET /` - Service description
//! - `GET /health` - Health status with cache counters
//! - `GET /matches` - The proxied match listing (API key when configured)
//! - `GET /encoded` - The match listing re-encoded with the 5-bit alphabet

pub mod auth;
pub mod handlers;
pub mod routes;

pub use auth::RequireApiKey;
pub use handlers::*;
pub use routes::create_router;
