// src/page/mod.rs
// =============================================================================
// This module handles downloading pages for the crawler.
//
// Currently implements:
// - PageFetcher: the capability the crawl engine needs ("give me the HTML
//   behind this URL")
// - HttpPageFetcher: a plain HTTP GET implementation using reqwest
//
// A headless-browser fetcher could implement the same trait later without
// the crawl engine noticing.
// =============================================================================

mod fetch;

pub use fetch::{FetchedPage, HttpPageFetcher, PageFetcher};
