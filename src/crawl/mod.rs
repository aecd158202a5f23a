// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a URL
// - Stays on the start page's origin (doesn't crawl external sites)
// - Excluded path prefixes, optional page and depth limits
// - Every link on every crawled page is checked, and broken ones are
//   streamed to a ResultSink as they're found
//
// Submodules:
// - origin: origin/path splitting and href resolution
// - config: the immutable CrawlConfig
// - state: crawl targets, visited set, stop handle
// - children: which links on a page get queued
// - queue: the crawl engine itself
// =============================================================================

mod children;
mod config;
mod origin;
mod queue;
mod state;

pub use config::{CrawlConfig, ExclusionList, DEFAULT_CHECK_CONCURRENCY, DEFAULT_TIMEOUT};
pub use queue::Crawler;
