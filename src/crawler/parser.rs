//! HTML link extraction
//!
//! This module pulls raw `href` values out of HTML documents. Resolution
//! against a base URL happens in the crawl loop, not here.

use crate::resource::Resource;
use scraper::{Html, Selector};
use std::collections::BTreeSet;

/// Extracts link targets from a fetched resource
///
/// Only resources whose `Content-Type` token set contains `text/html` are
/// parsed; anything else yields an empty set.
///
/// # Example
///
/// ```
/// use sumi_cache::crawler::extract_links;
/// use sumi_cache::{Headers, Resource};
///
/// let resource = Resource {
///     status: 200,
///     headers: [("Content-Type", "text/html")].into_iter().collect::<Headers>(),
///     data: br#"<a href="/about">About</a>"#.to_vec(),
/// };
/// assert!(extract_links(&resource).contains("/about"));
/// ```
pub fn extract_links(resource: &Resource) -> BTreeSet<String> {
    if !resource.is_html() {
        return BTreeSet::new();
    }
    extract_hrefs(&String::from_utf8_lossy(&resource.data))
}

/// Returns the trimmed `href` of every `<a>` element in `html`
///
/// Values are returned exactly as written, relative or not.
pub fn extract_hrefs(html: &str) -> BTreeSet<String> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("a[href]") else {
        return BTreeSet::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Headers;

    fn resource(content_type: Option<&str>, body: &str) -> Resource {
        let mut headers = Headers::new();
        if let Some(content_type) = content_type {
            headers.insert("Content-Type", content_type);
        }
        Resource {
            status: 200,
            headers,
            data: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_extract_relative_and_absolute() {
        let html = r#"
            <html>
            <body>
                <a href="page1">Link 1</a>
                <a href="/page2">Link 2</a>
                <a href="https://other.com/page3">Link 3</a>
            </body>
            </html>
        "#;
        let links = extract_hrefs(html);
        assert_eq!(links.len(), 3);
        assert!(links.contains("page1"));
        assert!(links.contains("/page2"));
        assert!(links.contains("https://other.com/page3"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let html = r#"<a href="/a">A</a><a href="/a">again</a><a href=" /a ">spaced</a>"#;
        assert_eq!(extract_hrefs(html).len(), 1);
    }

    #[test]
    fn test_anchor_without_href_is_skipped() {
        let html = r##"<a name="top">Top</a><a href="#top">Back</a>"##;
        let links = extract_hrefs(html);
        assert_eq!(links.len(), 1);
        assert!(links.contains("#top"));
    }

    #[test]
    fn test_other_elements_ignored() {
        let html = r#"
            <link rel="stylesheet" href="/style.css">
            <img src="/logo.png">
            <script src="/app.js"></script>
        "#;
        assert!(extract_hrefs(html).is_empty());
    }

    #[test]
    fn test_html_resource() {
        let r = resource(
            Some("text/html; charset=utf-8"),
            r#"<a href="/about">About</a>"#,
        );
        let links = extract_links(&r);
        assert!(links.contains("/about"));
    }

    #[test]
    fn test_non_html_resource() {
        let r = resource(Some("text/plain"), r#"<a href="/about">About</a>"#);
        assert!(extract_links(&r).is_empty());
    }

    #[test]
    fn test_missing_content_type() {
        let r = resource(None, r#"<a href="/about">About</a>"#);
        assert!(extract_links(&r).is_empty());
    }
}
