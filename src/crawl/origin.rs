// src/crawl/origin.rs
// =============================================================================
// URL splitting and link resolution.
//
// The crawl is scoped to an *origin*: scheme + host (+ port when it isn't the
// default one). Two URLs are "same-origin" when their origins are equal.
// The `url` crate already lowercases scheme and host and drops default
// ports, so comparing the parsed parts gives us case-insensitive matching
// for free.
//
// Rust concepts:
// - impl Display: lets an Origin be printed with {} and turned into a String
// - Option vs Result: resolve_link returns Option because a bad href is just
//   skipped, split returns Result because a bad start URL is fatal
// =============================================================================

use crate::error::InvalidUrlError;
use std::fmt;
use tracing::debug;
use url::{ParseError, Url};

/// The domain boundary of a crawl.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl Origin {
    /// Origin of an already-parsed URL, or None for URLs without a web
    /// origin (mailto:, data:, file:///...).
    pub fn of(url: &Url) -> Option<Origin> {
        if !is_web_scheme(url.scheme()) {
            return None;
        }

        Some(Origin {
            scheme: url.scheme().to_string(),
            host: url.host_str()?.to_string(),
            port: url.port(),
        })
    }

    pub fn contains(&self, url: &Url) -> bool {
        Origin::of(url).as_ref() == Some(self)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        Ok(())
    }
}

/// Splits an absolute URL into its origin and its path.
///
/// Example:
///   "https://Example.com/docs/intro?x=1" -> ("https://example.com", "/docs/intro")
pub fn split(url: &str) -> Result<(Origin, String), InvalidUrlError> {
    let parsed = parse_absolute(url)?;
    let origin = Origin::of(&parsed).ok_or_else(|| InvalidUrlError::MissingHost(url.to_string()))?;
    Ok((origin, parsed.path().to_string()))
}

/// Parses a user-supplied absolute URL, rejecting anything we can't crawl.
pub fn parse_absolute(url: &str) -> Result<Url, InvalidUrlError> {
    let trimmed = url.trim();

    let mut parsed = Url::parse(trimmed).map_err(|e| match e {
        ParseError::RelativeUrlWithoutBase => InvalidUrlError::MissingScheme(trimmed.to_string()),
        ParseError::EmptyHost => InvalidUrlError::MissingHost(trimmed.to_string()),
        other => InvalidUrlError::Malformed {
            url: trimmed.to_string(),
            reason: other.to_string(),
        },
    })?;

    if !is_web_scheme(parsed.scheme()) {
        return Err(InvalidUrlError::UnsupportedScheme {
            url: trimmed.to_string(),
            scheme: parsed.scheme().to_string(),
        });
    }

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(InvalidUrlError::MissingHost(trimmed.to_string()));
    }

    // "/page#a" and "/page#b" are the same page
    parsed.set_fragment(None);
    Ok(parsed)
}

/// Resolves an href found on `base` to an absolute, fragment-free http(s) URL.
///
/// Returns None for hrefs that don't point at another web resource:
/// empty hrefs, fragment-only hrefs (same page), mailto:/tel:/javascript:
/// and anything that fails to parse.
pub fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    // join() handles "../x", "//host/x" and absolute URLs alike
    let mut resolved = match base.join(href) {
        Ok(url) => url,
        Err(e) => {
            debug!(href, base = %base, error = %e, "skipping unparseable href");
            return None;
        }
    };

    if !is_web_scheme(resolved.scheme()) || resolved.host_str().is_none() {
        debug!(href, "skipping non-web link");
        return None;
    }

    resolved.set_fragment(None);
    Some(resolved)
}

fn is_web_scheme(scheme: &str) -> bool {
    scheme == "http" || scheme == "https"
}
