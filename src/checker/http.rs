// src/checker/http.rs
// =============================================================================
// This module checks if URLs are alive by making HTTP requests.
//
// Key functionality:
// - Makes HTTP HEAD requests (lightweight, no body download)
// - Falls back to GET when the server says it doesn't support HEAD
//   (405 Method Not Allowed / 501 Not Implemented)
// - Follows up to 5 redirects; the final status decides
// - Turns network failures (timeout, DNS, refused connection...) into a
//   "broken" status instead of an error, so one bad link can't stop a crawl
//
// Rust concepts:
// - Traits: LivenessChecker is the interface, HttpLivenessChecker one
//   implementation (tests plug in their own)
// - async-trait: lets a trait have async methods
// - Enums: To represent different link states
// =============================================================================

use crate::error::LinkCheckError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::error::Error as _;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Outcome of checking one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStatus {
    /// The server answered with this status code.
    Http(u16),
    /// No HTTP answer at all.
    Unreachable(LinkCheckError),
}

impl LinkStatus {
    /// Status code to report; 0 when the server could not be reached.
    pub fn status_code(&self) -> u16 {
        match self {
            LinkStatus::Http(code) => *code,
            LinkStatus::Unreachable(_) => 0,
        }
    }

    /// Anything but a 2xx answer is broken.
    pub fn is_broken(&self) -> bool {
        match self {
            LinkStatus::Http(code) => !(200..=299).contains(code),
            LinkStatus::Unreachable(_) => true,
        }
    }

    /// Why the link couldn't be reached, if it couldn't.
    pub fn reason(&self) -> Option<String> {
        match self {
            LinkStatus::Http(_) => None,
            LinkStatus::Unreachable(err) => Some(err.to_string()),
        }
    }
}

/// Most requests a single check makes (HEAD, then GET when HEAD is refused).
///
/// Each request gets the full timeout, so callers bounding a whole check
/// should allow for all of them.
pub const REQUESTS_PER_CHECK: u32 = 2;

/// Something that can tell whether a URL is alive.
#[async_trait]
pub trait LivenessChecker: Send + Sync {
    async fn check(&self, url: &Url) -> LinkStatus;
}

/// Liveness checks over real HTTP.
#[derive(Debug, Clone)]
pub struct HttpLivenessChecker {
    client: Client,
}

impl HttpLivenessChecker {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        // One client for the whole crawl so connections get pooled
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(concat!("link-sweeper/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(HttpLivenessChecker { client })
    }

    async fn get(&self, url: &Url) -> LinkStatus {
        match self.client.get(url.clone()).send().await {
            Ok(response) => LinkStatus::Http(response.status().as_u16()),
            Err(e) => LinkStatus::Unreachable(categorize_error(&e)),
        }
    }
}

#[async_trait]
impl LivenessChecker for HttpLivenessChecker {
    async fn check(&self, url: &Url) -> LinkStatus {
        // First, try a HEAD request (faster, no body download)
        match self.client.head(url.clone()).send().await {
            Ok(response) if head_unsupported(response.status()) => {
                debug!(url = %url, status = response.status().as_u16(), "HEAD not supported, retrying with GET");
                self.get(url).await
            }
            Ok(response) => LinkStatus::Http(response.status().as_u16()),
            Err(e) => LinkStatus::Unreachable(categorize_error(&e)),
        }
    }
}

fn head_unsupported(status: StatusCode) -> bool {
    matches!(status, StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_IMPLEMENTED)
}

// Categorizes different error types from reqwest
//
// The top-level reqwest message is usually just "error sending request", so
// we look at the whole source chain to spot DNS and TLS problems.
pub(crate) fn categorize_error(error: &reqwest::Error) -> LinkCheckError {
    let details = error_chain(error).to_lowercase();

    if error.is_timeout() {
        LinkCheckError::Timeout
    } else if error.is_redirect() {
        LinkCheckError::TooManyRedirects
    } else if details.contains("certificate") || details.contains("tls") || details.contains("ssl") {
        LinkCheckError::Tls
    } else if error.is_connect() {
        if details.contains("dns") || details.contains("resolve") || details.contains("lookup") {
            LinkCheckError::Dns
        } else {
            LinkCheckError::Connect
        }
    } else {
        LinkCheckError::Other(error_chain(error))
    }
}

fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn checker() -> HttpLivenessChecker {
        HttpLivenessChecker::new(Duration::from_secs(5)).unwrap()
    }

    fn url(server: &MockServer, p: &str) -> Url {
        Url::parse(&format!("{}{}", server.uri(), p)).unwrap()
    }

    #[test]
    fn test_status_classification() {
        assert!(!LinkStatus::Http(200).is_broken());
        assert!(!LinkStatus::Http(204).is_broken());
        assert!(!LinkStatus::Http(299).is_broken());
        assert!(LinkStatus::Http(199).is_broken());
        assert!(LinkStatus::Http(301).is_broken());
        assert!(LinkStatus::Http(404).is_broken());
        assert!(LinkStatus::Http(500).is_broken());

        let unreachable = LinkStatus::Unreachable(LinkCheckError::Connect);
        assert!(unreachable.is_broken());
        assert_eq!(unreachable.status_code(), 0);
        assert_eq!(unreachable.reason().as_deref(), Some("connection failed"));
    }

    #[tokio::test]
    async fn test_live_link_uses_head() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let status = checker().check(&url(&server, "/ok")).await;
        assert_eq!(status, LinkStatus::Http(200));
        assert!(!status.is_broken());
    }

    #[tokio::test]
    async fn test_missing_link_is_broken() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let status = checker().check(&url(&server, "/missing")).await;
        assert_eq!(status, LinkStatus::Http(404));
        assert!(status.is_broken());
    }

    #[tokio::test]
    async fn test_falls_back_to_get_when_head_not_allowed() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/no-head"))
            .respond_with(ResponseTemplate::new(405))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/no-head"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .expect(1)
            .mount(&server)
            .await;

        let status = checker().check(&url(&server, "/no-head")).await;
        assert_eq!(status, LinkStatus::Http(200));
    }

    #[tokio::test]
    async fn test_follows_redirects() {
        let server = MockServer::start().await;
        Mock::given(path("/old"))
            .respond_with(
                ResponseTemplate::new(301).insert_header("Location", format!("{}/new", server.uri())),
            )
            .mount(&server)
            .await;
        Mock::given(path("/new"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let status = checker().check(&url(&server, "/old")).await;
        assert_eq!(status, LinkStatus::Http(200));
    }

    #[tokio::test]
    async fn test_slow_link_times_out() {
        let server = MockServer::start().await;
        Mock::given(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let checker = HttpLivenessChecker::new(Duration::from_millis(200)).unwrap();
        let status = checker.check(&url(&server, "/slow")).await;
        assert_eq!(status, LinkStatus::Unreachable(LinkCheckError::Timeout));
        assert_eq!(status.status_code(), 0);
    }

    #[tokio::test]
    async fn test_refused_connection_is_broken_not_error() {
        // Grab a free port, then close it so nothing is listening there
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let dead = Url::parse(&format!("http://127.0.0.1:{}/gone", port)).unwrap();

        let status = checker().check(&dead).await;
        assert!(status.is_broken());
        assert_eq!(status.status_code(), 0);
        assert!(matches!(status, LinkStatus::Unreachable(_)));
    }
}
