// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use clap's "derive" API: the struct below *is* the CLI definition.
// Doc comments on the fields become the --help text.
//
// The parsed arguments are turned into a CrawlConfig right away, so the
// rest of the program never looks at raw arguments again.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// =============================================================================

use crate::crawl::{CrawlConfig, ExclusionList, DEFAULT_CHECK_CONCURRENCY, DEFAULT_TIMEOUT};
use crate::error::InvalidUrlError;
use crate::report::OutputFormat;
use clap::Parser;
use std::time::Duration;

// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "link-sweeper",
    version,
    about = "Crawls a page (or a whole site) to find broken links",
    long_about = "link-sweeper checks every link on a web page and reports the ones that don't \
                  answer with a 2xx status. With --recursive it also follows links within the \
                  same site, so every page on the site gets checked."
)]
pub struct Cli {
    /// URL of the page to look for broken links on
    ///
    /// This is a positional argument (required, no flag needed)
    pub source_page: String,

    /// Write the report to this file instead of the console
    ///
    /// "console" also means print to the console
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<String>,

    /// Also check every linked page within the same site
    ///
    /// The crawl never leaves the start page's scheme + host (+ port)
    #[arg(short = 'r', long)]
    pub recursive: bool,

    /// Space-separated paths to skip when crawling, e.g. "/admin /private"
    ///
    /// No effect unless --recursive is given. Links to these paths are still
    /// checked, the pages just aren't crawled.
    #[arg(short = 'x', long, value_name = "PATHS")]
    pub exclude: Option<String>,

    /// Stop after crawling this many pages (0 = no limit)
    #[arg(long, value_name = "N", default_value_t = 1000)]
    pub max_pages: usize,

    /// Don't crawl pages more than N links away from the start page
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Timeout for each request, in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// How many links on a page are checked at the same time
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CHECK_CONCURRENCY)]
    pub concurrency: usize,

    /// Output JSON Lines instead of plain text
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Builds the crawl configuration, validating the start URL.
    pub fn crawl_config(&self) -> Result<CrawlConfig, InvalidUrlError> {
        let mut config = CrawlConfig::new(&self.source_page)?;

        config.recursive = self.recursive;
        config.exclusions = self
            .exclude
            .as_deref()
            .map(ExclusionList::parse)
            .unwrap_or_default();
        config.timeout = Duration::from_secs(self.timeout.max(1));
        config.max_pages = (self.max_pages > 0).then_some(self.max_pages);
        config.max_depth = self.max_depth;
        config.check_concurrency = self.concurrency.max(1);

        Ok(config)
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}
