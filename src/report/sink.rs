// src/report/sink.rs
// =============================================================================
// Result sinks: where broken-link records end up.
//
// Console and file output share one implementation (LineSink) that is
// generic over std::io::Write, so both always produce the same lines.
//
// Rust concepts:
// - Generics with trait bounds: LineSink<W: Write> works for stdout,
//   a buffered file or an in-memory Vec<u8> in tests
// - Trait objects: main holds a Box<dyn ResultSink> without caring which
// =============================================================================

use crate::error::FetchError;
use crate::report::{CrawlSummary, LinkRecord};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use url::Url;

/// Line format for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One human-readable line per event.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Receives crawl results as they are produced.
pub trait ResultSink {
    fn broken_link(&mut self, record: &LinkRecord) -> io::Result<()>;

    fn page_failed(&mut self, url: &Url, error: &FetchError) -> io::Result<()>;

    /// Writes the summary and flushes. Called exactly once, last.
    fn finish(&mut self, summary: &CrawlSummary) -> io::Result<()>;
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum JsonLine<'a> {
    BrokenLink(&'a LinkRecord),
    PageFailure { url: &'a str, error: String },
    Summary(&'a CrawlSummary),
}

#[derive(Debug)]
pub struct LineSink<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> LineSink<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        LineSink { out, format }
    }

    fn write_json(&mut self, line: &JsonLine<'_>) -> io::Result<()> {
        // to_writer doesn't add a newline, and JSON Lines needs one per object
        serde_json::to_writer(&mut self.out, line)?;
        writeln!(self.out)
    }
}

impl LineSink<Stdout> {
    pub fn console(format: OutputFormat) -> Self {
        LineSink::new(io::stdout(), format)
    }
}

impl LineSink<BufWriter<File>> {
    // Buffered: a big crawl writes many small lines. finish() flushes.
    pub fn file(file: File, format: OutputFormat) -> Self {
        LineSink::new(BufWriter::new(file), format)
    }
}

impl<W: Write> ResultSink for LineSink<W> {
    fn broken_link(&mut self, record: &LinkRecord) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.write_json(&JsonLine::BrokenLink(record)),
            OutputFormat::Text => {
                write!(
                    self.out,
                    "BROKEN [{}] {} (found on {})",
                    record.status_code, record.url, record.source_page
                )?;
                // Only unreachable links carry a reason (timeout, DNS, ...)
                if let Some(reason) = &record.reason {
                    write!(self.out, " - {}", reason)?;
                }
                writeln!(self.out)
            }
        }
    }

    fn page_failed(&mut self, url: &Url, error: &FetchError) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.write_json(&JsonLine::PageFailure {
                url: url.as_str(),
                error: error.to_string(),
            }),
            OutputFormat::Text => writeln!(self.out, "PAGE FAILED {}: {}", url, error),
        }
    }

    fn finish(&mut self, summary: &CrawlSummary) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.write_json(&JsonLine::Summary(summary))?,
            OutputFormat::Text => {
                writeln!(
                    self.out,
                    "Crawled {} page(s), {} failed",
                    summary.pages_crawled, summary.pages_failed
                )?;
                // Say why the crawl ended early, if it did
                if summary.interrupted {
                    writeln!(
                        self.out,
                        "Crawl interrupted with {} page(s) still queued",
                        summary.pages_remaining
                    )?;
                } else if summary.truncated {
                    writeln!(
                        self.out,
                        "Stopped at the page limit with {} page(s) still queued",
                        summary.pages_remaining
                    )?;
                }
                writeln!(
                    self.out,
                    "Looked at {} links and found {} broken",
                    summary.links_examined, summary.links_broken
                )?;
            }
        }
        // Console output is line-buffered but a file isn't; make sure it all lands
        self.out.flush()
    }
}
