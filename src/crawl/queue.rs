// src/crawl/queue.rs
// =============================================================================
// This module implements the crawl engine with a breadth-first approach.
//
// How it works:
// 1. Start with the start page in a queue
// 2. Take the front page off the queue, fetch its HTML
// 3. Extract all links from the page and check each one, reporting the
//    broken ones to the sink right away
// 4. In recursive mode, add same-origin, non-excluded, unseen links to the
//    back of the queue
// 5. Repeat until the queue is empty (or a limit / stop request kicks in)
//
// Failure handling:
// - A page that can't be fetched is reported and skipped
// - A link that can't be reached is reported as broken (status 0)
// - Only a failing sink (we can't write the report) ends the crawl early
//
// Rust concepts:
// - VecDeque: Double-ended queue for breadth-first crawling
// - Generics: Crawler<F, C> works with any PageFetcher / LivenessChecker
// - Streams: ordered, bounded-concurrency link checks with .buffered()
// =============================================================================

use crate::checker::{extract_links, LinkStatus, LivenessChecker, REQUESTS_PER_CHECK};
use crate::crawl::children::resolve_children;
use crate::crawl::config::CrawlConfig;
use crate::crawl::state::{CrawlTarget, StopHandle, VisitedSet};
use crate::crawl::origin::{resolve_link, split, Origin};
use crate::error::{CrawlError, FetchError, LinkCheckError};
use crate::page::{FetchedPage, PageFetcher};
use crate::report::{CrawlSummary, LinkRecord, ResultSink};
use futures::stream::{self, StreamExt};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, info, warn};
use url::Url;

/// The crawl engine.
pub struct Crawler<F, C> {
    config: CrawlConfig,
    origin: Origin,
    fetcher: F,
    checker: C,
    stop: StopHandle,
}

impl<F: PageFetcher, C: LivenessChecker> Crawler<F, C> {
    pub fn new(config: CrawlConfig, fetcher: F, checker: C) -> Result<Self, CrawlError> {
        let (origin, _) = split(config.start_url.as_str())?;

        Ok(Crawler {
            config,
            origin,
            fetcher,
            checker,
            stop: StopHandle::default(),
        })
    }

    /// Handle for stopping the crawl from elsewhere. The page being
    /// processed is finished first.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Runs the crawl, streaming results into `sink`.
    pub async fn run(&self, sink: &mut dyn ResultSink) -> Result<CrawlSummary, CrawlError> {
        let mut queue = VecDeque::new();
        let mut visited = VisitedSet::new();
        let mut statuses: HashMap<String, LinkStatus> = HashMap::new();
        let mut summary = CrawlSummary::default();

        let start = CrawlTarget::new(self.config.start_url.clone(), 0);
        visited.mark_queued(start.key());
        queue.push_back(start);

        info!(
            start = %self.config.start_url,
            origin = %self.origin,
            recursive = self.config.recursive,
            "starting crawl"
        );

        loop {
            // Checked between pages only, so a page is never half-reported
            if self.stop.is_stopped() {
                warn!(queued = queue.len(), "crawl stopped on request");
                summary.interrupted = true;
                break;
            }

            // Only "truncated" if there was actually something left to do
            if let Some(max_pages) = self.config.max_pages {
                if summary.pages_crawled >= max_pages && !queue.is_empty() {
                    warn!(max_pages, queued = queue.len(), "page limit reached, stopping crawl");
                    summary.truncated = true;
                    break;
                }
            }

            let Some(target) = queue.pop_front() else {
                break;
            };

            // Also catches a queued page that an earlier redirect already
            // landed on
            if !visited.mark_visited(target.key()) {
                debug!(url = %target.url, "already visited, skipping");
                continue;
            }

            info!(url = %target.url, depth = target.depth, "crawling page");

            let page = match self.fetch_page(&target.url).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(url = %target.url, error = %e, "failed to fetch page");
                    // A failed page still used up a fetch, so it counts
                    summary.pages_crawled += 1;
                    summary.pages_failed += 1;
                    sink.page_failed(&target.url, &e)?;
                    continue;
                }
            };

            // A redirect can leave the site; that page isn't ours to report on
            if !self.origin.contains(&page.url) {
                debug!(from = %target.url, to = %page.url, "redirected off origin, not examining");
                continue;
            }

            // A redirect may land on a page we've already processed
            if page.url.as_str() != target.key() && !visited.mark_visited(page.url.as_str()) {
                debug!(from = %target.url, to = %page.url, "redirected to an already visited page");
                continue;
            }

            summary.pages_crawled += 1;

            let hrefs = extract_links(&page.html);
            debug!(url = %page.url, links = hrefs.len(), "extracted links");

            // Broken links go to the sink as soon as they're known
            self.check_page_links(&page.url, &hrefs, &mut statuses, &mut summary, sink)
                .await?;

            if self.should_follow(target.depth) {
                // Relative links resolve against where we actually landed
                let children = resolve_children(
                    &page.url,
                    &hrefs,
                    &self.origin,
                    &visited,
                    &self.config.exclusions,
                    target.depth + 1,
                );

                for child in children {
                    // Mark at enqueue time so the queue never holds a URL twice
                    if visited.mark_queued(child.key()) {
                        debug!(url = %child.url, depth = child.depth, "queued page");
                        queue.push_back(child);
                    }
                }
            }
        }

        summary.pages_remaining = queue.len();
        info!(
            pages = summary.pages_crawled,
            visited = visited.visited_len(),
            links = summary.links_examined,
            broken = summary.links_broken,
            "crawl finished"
        );

        sink.finish(&summary)?;
        Ok(summary)
    }

    fn should_follow(&self, depth: usize) -> bool {
        self.config.recursive && self.config.max_depth.map_or(true, |max| depth < max)
    }

    async fn fetch_page(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        tokio::time::timeout(self.config.timeout, self.fetcher.fetch(url))
            .await
            .unwrap_or(Err(FetchError::Timeout))
    }

    // The checker may need a HEAD and a GET, each allowed the full timeout
    async fn check_link(&self, url: &Url) -> LinkStatus {
        let budget = self.config.timeout * REQUESTS_PER_CHECK;
        tokio::time::timeout(budget, self.checker.check(url))
            .await
            .unwrap_or(LinkStatus::Unreachable(LinkCheckError::Timeout))
    }

    // Checks every link on one page and reports the broken ones in the
    // order they appear on the page.
    //
    // Each distinct URL is only checked over the network once per crawl;
    // later occurrences reuse the stored status.
    async fn check_page_links(
        &self,
        page_url: &Url,
        hrefs: &[String],
        statuses: &mut HashMap<String, LinkStatus>,
        summary: &mut CrawlSummary,
        sink: &mut dyn ResultSink,
    ) -> Result<(), CrawlError> {
        let mut first_on_page = HashSet::new();
        let links: Vec<(&String, Url, bool)> = hrefs
            .iter()
            .filter_map(|href| {
                let url = resolve_link(page_url, href)?;
                let needs_check = !statuses.contains_key(url.as_str())
                    && first_on_page.insert(url.as_str().to_string());
                Some((href, url, needs_check))
            })
            .collect();

        // .buffered() runs up to N checks at once but yields results in the
        // original order
        let mut checks = stream::iter(links)
            .map(move |(href, url, needs_check)| async move {
                let fresh = if needs_check {
                    Some(self.check_link(&url).await)
                } else {
                    None
                };
                (href, url, fresh)
            })
            .buffered(self.config.check_concurrency.max(1));

        while let Some((href, url, fresh)) = checks.next().await {
            // Store fresh results so later pages reuse them
            match fresh {
                Some(status) => {
                    statuses.insert(url.as_str().to_string(), status);
                }
                None => debug!(url = %url, "already checked"),
            }

            let Some(status) = statuses.get(url.as_str()) else {
                continue;
            };

            // Every examined anchor counts, even repeats of a checked URL
            summary.links_examined += 1;
            if !status.is_broken() {
                continue;
            }

            summary.links_broken += 1;
            sink.broken_link(&LinkRecord {
                source_page: page_url.to_string(),
                href: href.clone(),
                url: url.to_string(),
                status_code: status.status_code(),
                is_broken: true,
                reason: status.reason(),
            })?;
        }

        Ok(())
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why breadth-first?
//    - Breadth-first: crawl all pages one hop away, then two hops, etc.
//    - Depth-first: follow one path all the way down, then backtrack
//    - With VecDeque, push_back() + pop_front() gives us breadth-first
//
// 2. Why check the visited set before enqueueing?
//    - Popular pages (home, about) are linked from every page
//    - Checking only when dequeuing would fill the queue with copies
//    - VisitedSet remembers both queued and processed URLs
//
// 3. What does tokio::time::timeout do?
//    - Runs a future but gives up after a duration
//    - Returns Err(Elapsed) if time ran out
//    - We wrap every fetch/check in it, so a misbehaving fetcher can't hang
//      the crawl even if it ignores its own timeout settings
//
// 4. buffered vs buffer_unordered
//    - Both run up to N futures concurrently
//    - buffer_unordered yields results as they finish
//    - buffered yields them in the order they went in, which keeps the
//      report in page order
// -----------------------------------------------------------------------------
