// src/crawl/state.rs
// =============================================================================
// Mutable crawl state: queued targets, the visited set and the stop flag.
//
// Rust concepts:
// - HashSet: O(1) membership checks for URLs we've already seen
// - Arc<AtomicBool>: a flag that can be flipped from another task (Ctrl-C)
//   and read by the crawl loop without locking
// =============================================================================

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use url::Url;

/// A page waiting in the crawl queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    pub url: Url,
    /// Link hops from the start page.
    pub depth: usize,
}

impl CrawlTarget {
    pub fn new(url: Url, depth: usize) -> Self {
        CrawlTarget { url, depth }
    }

    /// Dedup key: the normalized absolute URL.
    pub fn key(&self) -> &str {
        self.url.as_str()
    }
}

/// URLs the crawl already knows about.
///
/// `queued` holds every URL ever pushed onto the queue, so a page is
/// enqueued at most once per crawl. `visited` is the subset that has been
/// dequeued and processed.
#[derive(Debug, Default)]
pub struct VisitedSet {
    queued: HashSet<String>,
    visited: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the URL was queued or visited at some point.
    pub fn contains(&self, key: &str) -> bool {
        self.queued.contains(key) || self.visited.contains(key)
    }

    /// Records that a URL entered the queue. Returns false if it was known.
    pub fn mark_queued(&mut self, key: &str) -> bool {
        if self.contains(key) {
            return false;
        }
        self.queued.insert(key.to_string())
    }

    /// Records that a URL was processed. Returns false if it already was.
    pub fn mark_visited(&mut self, key: &str) -> bool {
        self.visited.insert(key.to_string())
    }

    /// Number of processed pages.
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }
}

/// Caller-side handle for stopping a crawl between queue steps.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queued_urls_are_known() {
        let mut set = VisitedSet::new();
        assert!(set.mark_queued("https://example.com/a"));
        assert!(!set.mark_queued("https://example.com/a"));
        assert!(set.contains("https://example.com/a"));
        assert_eq!(set.visited_len(), 0);
    }

    #[test]
    fn test_visited_urls_are_known() {
        let mut set = VisitedSet::new();
        assert!(set.mark_visited("https://example.com/"));
        assert!(!set.mark_visited("https://example.com/"));
        assert!(set.contains("https://example.com/"));
        assert!(!set.mark_queued("https://example.com/"));
        assert_eq!(set.visited_len(), 1);
    }

    #[test]
    fn test_stop_handle_is_shared() {
        let handle = StopHandle::default();
        let clone = handle.clone();
        assert!(!handle.is_stopped());
        clone.stop();
        assert!(handle.is_stopped());
    }
}
