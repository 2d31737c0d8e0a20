//! Models Module
//!
//! Response DTOs for the match proxy REST API.

pub mod responses;

pub use responses::*;
