//! Request-manager HTTP client for direct icon request uploads.
//!
//! Async client using `reqwest` with token-header authentication. One
//! upload per call: a multipart POST carrying the request archive and the
//! JSON manifest text, answered with a small status document.

pub mod client;
pub mod types;

pub use client::{Client, DEFAULT_HOST, Error};
pub use types::ApiResponse;
