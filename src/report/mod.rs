// src/report/mod.rs
// =============================================================================
// Everything about reporting results.
//
// Submodules:
// - sink: the ResultSink trait and the line-based console/file sink
// - destination: turning the --file argument into an open sink, including
//   the "print to console instead?" prompt
//
// The crawl engine hands records to a sink one at a time as it finds them,
// so a long crawl shows broken links while it's still running.
// =============================================================================

mod destination;
mod sink;

pub use destination::{confirm_console_fallback, OutputDestination};
pub use sink::{LineSink, OutputFormat, ResultSink};

use serde::Serialize;

/// One examined anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRecord {
    /// Page the anchor was found on.
    pub source_page: String,
    /// The href exactly as written in the page.
    pub href: String,
    /// The absolute URL that was checked.
    pub url: String,
    /// HTTP status, or 0 when the server couldn't be reached.
    pub status_code: u16,
    pub is_broken: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Totals for a finished (or stopped) crawl.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlSummary {
    pub pages_crawled: usize,
    pub pages_failed: usize,
    pub links_examined: usize,
    pub links_broken: usize,
    /// Targets still queued when the crawl ended early.
    pub pages_remaining: usize,
    /// Stopped through the StopHandle (e.g. Ctrl-C).
    pub interrupted: bool,
    /// Stopped because the page limit was reached.
    pub truncated: bool,
}
