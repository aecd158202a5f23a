// src/checker/html.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser), so broken markup is
//   handled the way a browser would handle it
//
// Note that we return the raw href strings exactly as written in the page.
// Deciding what they point to (relative links, fragments, mailto:) is the
// crawl engine's job.
//
// Rust concepts:
// - LazyLock: a static that is built the first time it's used
// - Iterators: map/collect to turn matched elements into Strings
// =============================================================================

use scraper::{Html, Selector};
use std::sync::LazyLock;

// <a href> and image-map <area href> are the anchor-like elements.
// The selector is a constant, so parsing it can only fail on a typo here.
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href], area[href]").expect("anchor selector is valid"));

// Extracts every href on anchor-like elements, in document order
//
// Example:
//   html = "<a href='/docs'>Docs</a><a href='#top'>Top</a>"
//   result = ["/docs", "#top"]
pub fn extract_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is scraper and how does it work?
//    - scraper parses HTML into a tree structure (DOM)
//    - You can then query it using CSS selectors (like querySelectorAll)
//    - "a[href]" means "all <a> tags that have an href attribute"
//    - Results come back in the order the elements appear in the page
//
// 2. Why LazyLock instead of parsing the selector every call?
//    - Selector::parse does real work (it's a small CSS parser)
//    - We call extract_links once per page, possibly thousands of times
//    - LazyLock builds it once and shares it afterwards
//
// 3. What does .value() do?
//    - element is an ElementRef (reference to an HTML element)
//    - .value() gets the underlying Element
//    - .attr("href") gets the value of the href attribute
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_keeps_raw_hrefs() {
        let html = r#"<a href="https://www.rust-lang.org">Rust</a><a href="/docs">Docs</a>"#;
        assert_eq!(extract_links(html), vec!["https://www.rust-lang.org", "/docs"]);
    }

    #[test]
    fn test_extract_keeps_empty_fragment_and_special() {
        let html = r##"
            <a href="">Self</a>
            <a href="#section">Section</a>
            <a href="mailto:test@example.com">Email</a>
        "##;
        assert_eq!(extract_links(html), vec!["", "#section", "mailto:test@example.com"]);
    }

    #[test]
    fn test_extract_document_order_across_elements() {
        let html = r#"
            <p><a href="/one">1</a></p>
            <map name="m"><area href="/two" alt="2"></map>
            <div><span><a href="../three">3</a></span></div>
        "#;
        assert_eq!(extract_links(html), vec!["/one", "/two", "../three"]);
    }

    #[test]
    fn test_ignores_anchors_without_href() {
        let html = r#"<a name="top">Top</a><link href="/style.css"><a href="/x">x</a>"#;
        assert_eq!(extract_links(html), vec!["/x"]);
    }

    #[test]
    fn test_sloppy_markup() {
        let html = r#"<p>intro<p><a href=/bare>bare</a><p><A HREF="/upper">up</A>"#;
        assert_eq!(extract_links(html), vec!["/bare", "/upper"]);
    }
}
