// src/crawl/children.rs
// =============================================================================
// Picks which links on a page become new crawl targets.
//
// A link is queued only if:
// 1. it resolves to an absolute http(s) URL
// 2. it is on the crawl's origin (we never leave the site)
// 3. its path doesn't start with an excluded prefix
// 4. we haven't queued or visited it before (and it isn't a repeat on
//    this same page)
//
// Survivors keep the order they appeared in on the page.
// =============================================================================

use crate::crawl::config::ExclusionList;
use crate::crawl::state::{CrawlTarget, VisitedSet};
use crate::crawl::origin::{resolve_link, Origin};
use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// Returns the same-origin, unseen, non-excluded children of `current_url`.
///
/// `depth` is the depth assigned to the returned targets.
pub fn resolve_children(
    current_url: &Url,
    raw_hrefs: &[String],
    origin: &Origin,
    visited: &VisitedSet,
    exclusions: &ExclusionList,
    depth: usize,
) -> Vec<CrawlTarget> {
    let mut seen_here = HashSet::new();
    let mut children = Vec::new();

    for href in raw_hrefs {
        // Empty, fragment-only and non-web links never become pages
        let Some(url) = resolve_link(current_url, href) else {
            continue;
        };

        // Off-origin links still get liveness-checked, just never crawled
        if !origin.contains(&url) {
            continue;
        }

        if exclusions.is_excluded(url.path()) {
            debug!(url = %url, "excluded from crawl");
            continue;
        }

        // seen_here catches repeats within this page, visited covers earlier pages
        if visited.contains(url.as_str()) || !seen_here.insert(url.as_str().to_string()) {
            continue;
        }

        children.push(CrawlTarget::new(url, depth));
    }

    children
}
