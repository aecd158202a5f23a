// src/error.rs
// =============================================================================
// Error types shared across the crawler.
//
// Only a few errors are allowed to stop a run:
// - InvalidUrlError for the *start* URL
// - OutputDestinationError when the user refuses the console fallback
// - an io::Error from the sink itself (CrawlError::Report)
//
// Everything else (a page that won't load, a link that times out) is turned
// into a report line or a skip decision by the crawl engine.
//
// Rust concepts:
// - thiserror: derives std::error::Error and Display from attributes
// - #[from]: lets `?` convert one error type into another automatically
// =============================================================================

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A URL that can't be split into scheme, host and path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidUrlError {
    #[error("'{url}' is not a valid URL: {reason}")]
    Malformed { url: String, reason: String },

    #[error("'{0}' has no scheme (did you mean https://{0}?)")]
    MissingScheme(String),

    #[error("'{0}' has no host")]
    MissingHost(String),

    #[error("'{url}' uses unsupported scheme '{scheme}' (only http and https can be crawled)")]
    UnsupportedScheme { url: String, scheme: String },
}

/// A page body that could not be retrieved.
///
/// Recorded as a page-level failure; the crawl carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("page returned HTTP {status}")]
    Status { status: u16 },

    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Transport(String),
}

/// Transport-level failure while checking a single link.
///
/// Never fatal: the link is reported as broken with status 0.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkCheckError {
    #[error("request timed out")]
    Timeout,

    #[error("could not resolve hostname")]
    Dns,

    #[error("connection failed")]
    Connect,

    #[error("too many redirects")]
    TooManyRedirects,

    #[error("TLS certificate error")]
    Tls,

    #[error("{0}")]
    Other(String),
}

/// The `--file` destination can't be written to.
#[derive(Debug, Error)]
pub enum OutputDestinationError {
    #[error("'{}' is a directory", .0.display())]
    IsDirectory(PathBuf),

    #[error("cannot write to '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors that abort a crawl.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid start URL: {0}")]
    InvalidStartUrl(#[from] InvalidUrlError),

    #[error("failed to write report: {0}")]
    Report(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_readable() {
        let err = InvalidUrlError::MissingScheme("example.com".to_string());
        assert_eq!(
            err.to_string(),
            "'example.com' has no scheme (did you mean https://example.com?)"
        );

        let err = FetchError::Status { status: 503 };
        assert_eq!(err.to_string(), "page returned HTTP 503");

        let err = OutputDestinationError::IsDirectory(PathBuf::from("/tmp"));
        assert_eq!(err.to_string(), "'/tmp' is a directory");
    }

    #[test]
    fn test_crawl_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let err: CrawlError = io_err.into();
        assert!(matches!(err, CrawlError::Report(_)));
    }
}
