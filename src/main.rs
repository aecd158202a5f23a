// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Validate the start URL (a bad one ends the run)
// 3. Open the output destination, asking to fall back to the console if the
//    file can't be written
// 4. Run the crawl, streaming broken links to the output as they're found
// 5. Exit with proper code (0 = no broken links, 1 = broken links, 2 = error)
//
// Rust concepts used:
// - async/await: Because we make many network requests
// - Result<T, E>: For error handling (T = success type, E = error type)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod checker; // src/checker/ - link extraction and liveness checks
mod cli; // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - the crawl engine
mod error; // src/error.rs - error types
mod page; // src/page/ - page fetching
mod report; // src/report/ - result sinks and output destinations

use anyhow::{Context, Result};
use clap::Parser;
use console::Term;
use checker::HttpLivenessChecker;
use cli::Cli;
use crawl::Crawler;
use page::HttpPageFetcher;
use report::{confirm_console_fallback, LineSink, OutputDestination, ResultSink};
use std::io;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const EXIT_CLEAN: i32 = 0;
const EXIT_BROKEN_LINKS: i32 = 1;
const EXIT_ERROR: i32 = 2;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    init_tracing();

    // run() owns the output sink, so the report file is flushed and closed
    // before we get here, on success and on error alike
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so they never mix with a console report on stdout.
// RUST_LOG overrides the default level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("link_sweeper=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version and usage errors
    let cli = Cli::parse();

    let config = cli.crawl_config()?;

    if !config.exclusions.is_empty() {
        let excluded: Vec<&str> = config.exclusions.iter().collect();
        info!(paths = ?excluded, "excluding paths from crawl");
    }

    let destination = OutputDestination::from_arg(cli.file.as_deref());
    let Some(mut sink) = open_sink(&destination, &cli)? else {
        eprintln!("Aborted: no output destination.");
        return Ok(EXIT_ERROR);
    };

    let fetcher = HttpPageFetcher::new(config.timeout).context("failed to build HTTP client")?;
    let checker = HttpLivenessChecker::new(config.timeout).context("failed to build HTTP client")?;
    let crawler = Crawler::new(config, fetcher, checker)?;

    // Ctrl-C finishes the current page, then stops and still writes the summary
    let stop = crawler.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, stopping after the current page");
            stop.stop();
        }
    });

    let summary = crawler.run(sink.as_mut()).await?;

    if summary.links_broken > 0 {
        Ok(EXIT_BROKEN_LINKS)
    } else {
        Ok(EXIT_CLEAN)
    }
}

// Opens the requested output, or asks the user whether to use the console
// instead. Returns None when the user declines.
fn open_sink(destination: &OutputDestination, cli: &Cli) -> Result<Option<Box<dyn ResultSink>>> {
    let format = cli.output_format();

    match destination.open(format) {
        Ok(sink) => Ok(Some(sink)),
        Err(e) => {
            let fallback = confirm_console_fallback(&e, &Term::stderr())
                .context("failed to read answer")?;

            if fallback {
                Ok(Some(Box::new(LineSink::console(format))))
            } else {
                Ok(None)
            }
        }
    }
}
