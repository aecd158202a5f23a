// src/page/fetch.rs
// =============================================================================
// This module downloads the HTML of pages we crawl.
//
// Strategy:
// - Plain HTTP GET through a shared reqwest client (no headless browser)
// - Non-2xx answers are page failures, not crashes
// - Non-HTML responses (PDFs, images...) come back as an empty page, so
//   they contribute no links
//
// The crawl engine only sees the PageFetcher trait, which keeps it testable
// with canned HTML.
//
// Rust concepts:
// - async functions: For network I/O
// - Traits + generics: the engine works with any PageFetcher
// =============================================================================

use crate::checker::categorize_error;
use crate::error::{FetchError, LinkCheckError};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// A downloaded page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Where we ended up after redirects. Relative links resolve against this.
    pub url: Url,
    pub html: String,
}

/// Something that can turn a URL into page HTML.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError>;
}

/// Fetches pages over real HTTP.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(concat!("link-sweeper/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(HttpPageFetcher { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
            });
        }

        let final_url = response.url().clone();

        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map_or(true, is_html_content_type);

        if !is_html {
            debug!(url = %final_url, "not an HTML page, no links to follow");
            return Ok(FetchedPage {
                url: final_url,
                html: String::new(),
            });
        }

        let html = response.text().await.map_err(|e| transport_error(&e))?;
        Ok(FetchedPage {
            url: final_url,
            html,
        })
    }
}

fn transport_error(error: &reqwest::Error) -> FetchError {
    match categorize_error(error) {
        LinkCheckError::Timeout => FetchError::Timeout,
        other => FetchError::Transport(other.to_string()),
    }
}

fn is_html_content_type(content_type: &str) -> bool {
    let mime = content_type.split(';').next().unwrap_or(content_type).trim();
    mime.eq_ignore_ascii_case("text/html") || mime.eq_ignore_ascii_case("application/xhtml+xml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> HttpPageFetcher {
        HttpPageFetcher::new(Duration::from_secs(5)).unwrap()
    }

    fn url(server: &MockServer, p: &str) -> Url {
        Url::parse(&format!("{}{}", server.uri(), p)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doc"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><a href='/x'>x</a></html>", "text/html; charset=utf-8"),
            )
            .mount(&server)
            .await;

        let page = fetcher().fetch(&url(&server, "/doc")).await.unwrap();
        assert_eq!(page.url, url(&server, "/doc"));
        assert_eq!(page.html, "<html><a href='/x'>x</a></html>");
    }

    #[tokio::test]
    async fn test_fetch_reports_final_url_after_redirect() {
        let server = MockServer::start().await;
        Mock::given(path("/old"))
            .respond_with(
                ResponseTemplate::new(302).insert_header("Location", format!("{}/new/", server.uri())),
            )
            .mount(&server)
            .await;
        Mock::given(path("/new/"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("<p>moved</p>", "text/html"))
            .mount(&server)
            .await;

        let page = fetcher().fetch(&url(&server, "/old")).await.unwrap();
        assert_eq!(page.url, url(&server, "/new/"));
        assert_eq!(page.html, "<p>moved</p>");
    }

    #[tokio::test]
    async fn test_fetch_fails_on_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = fetcher().fetch(&url(&server, "/missing")).await.unwrap_err();
        assert_eq!(err, FetchError::Status { status: 404 });
    }

    #[tokio::test]
    async fn test_non_html_page_has_no_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/file.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0x25, 0x50, 0x44, 0x46], "application/pdf"))
            .mount(&server)
            .await;

        let page = fetcher().fetch(&url(&server, "/file.pdf")).await.unwrap();
        assert!(page.html.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let fetcher = HttpPageFetcher::new(Duration::from_millis(200)).unwrap();
        let err = fetcher.fetch(&url(&server, "/slow")).await.unwrap_err();
        assert_eq!(err, FetchError::Timeout);
    }

    #[test]
    fn test_html_content_types() {
        assert!(is_html_content_type("text/html"));
        assert!(is_html_content_type("TEXT/HTML; charset=utf-8"));
        assert!(is_html_content_type("application/xhtml+xml"));
        assert!(!is_html_content_type("application/json"));
        assert!(!is_html_content_type("image/png"));
    }
}
