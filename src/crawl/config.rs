// src/crawl/config.rs
// =============================================================================
// Crawl configuration.
//
// Everything the engine needs to know about a run lives in one immutable
// CrawlConfig value, built once (usually from the command line) and moved
// into the Crawler. Nothing is read from globals.
// =============================================================================

use crate::crawl::origin::parse_absolute;
use crate::error::InvalidUrlError;
use std::time::Duration;
use url::Url;

/// Default timeout for every network call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of link checks in flight per page.
pub const DEFAULT_CHECK_CONCURRENCY: usize = 8;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Page the crawl starts from (already validated).
    pub start_url: Url,
    /// Follow same-origin links; when false only the start page is examined.
    pub recursive: bool,
    pub exclusions: ExclusionList,
    pub timeout: Duration,
    /// Stop after this many pages have been processed.
    pub max_pages: Option<usize>,
    /// Don't enqueue pages deeper than this (start page = depth 0).
    pub max_depth: Option<usize>,
    pub check_concurrency: usize,
}

impl CrawlConfig {
    /// Single-page config with default limits.
    pub fn new(start_url: &str) -> Result<Self, InvalidUrlError> {
        Ok(CrawlConfig {
            start_url: parse_absolute(start_url)?,
            recursive: false,
            exclusions: ExclusionList::default(),
            timeout: DEFAULT_TIMEOUT,
            max_pages: None,
            max_depth: None,
            check_concurrency: DEFAULT_CHECK_CONCURRENCY,
        })
    }
}

/// Path prefixes that are never queued for recursive traversal.
///
/// Links under an excluded prefix are still liveness-checked on the pages
/// that reference them; they just aren't crawled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionList {
    prefixes: Vec<String>,
}

impl ExclusionList {
    /// Builds the list from the `-x` argument: whitespace-separated paths.
    ///
    /// "admin /private" -> ["/admin", "/private"]
    pub fn parse(raw: &str) -> Self {
        raw.split_whitespace().collect()
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExclusionList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let prefixes = iter
            .into_iter()
            .map(|p| {
                let p = p.as_ref().trim();
                // URL paths always start with '/', so "admin" means "/admin"
                if p.starts_with('/') {
                    p.to_string()
                } else {
                    format!("/{}", p)
                }
            })
            .collect();
        ExclusionList { prefixes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let config = CrawlConfig::new("https://example.com").unwrap();
        assert_eq!(config.start_url.as_str(), "https://example.com/");
        assert!(!config.recursive);
        assert!(config.exclusions.is_empty());
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.max_pages, None);
    }

    #[test]
    fn test_new_rejects_bad_start_url() {
        assert!(CrawlConfig::new("not a url").is_err());
    }

    #[test]
    fn test_parse_exclusions() {
        let list = ExclusionList::parse("  /admin   private\t/tmp/ ");
        let prefixes: Vec<_> = list.iter().collect();
        assert_eq!(prefixes, vec!["/admin", "/private", "/tmp/"]);
    }

    #[test]
    fn test_empty_list_excludes_nothing() {
        let list = ExclusionList::parse("");
        assert!(list.is_empty());
        assert!(!list.is_excluded("/admin"));
    }

    #[test]
    fn test_prefix_matching() {
        let list = ExclusionList::parse("/admin");
        assert!(list.is_excluded("/admin"));
        assert!(list.is_excluded("/admin/login"));
        assert!(list.is_excluded("/administrator"));
        assert!(!list.is_excluded("/docs/admin"));
    }
}
