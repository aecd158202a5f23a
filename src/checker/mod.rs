// src/checker/mod.rs
// =============================================================================
// This module contains the per-link logic of the crawler.
//
// Submodules:
// - html: Extracts link targets from HTML pages
// - http: Makes HTTP requests to check if links are alive
//
// This file (mod.rs) is the module root - it re-exports the public API so
// the rest of the app can write `checker::extract_links()` instead of
// `checker::html::extract_links()`.
// =============================================================================

mod html;
mod http;

pub use html::extract_links;
pub use http::{HttpLivenessChecker, LinkStatus, LivenessChecker, REQUESTS_PER_CHECK};
pub(crate) use http::categorize_error;
