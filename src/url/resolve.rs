use crate::url::normalize::normalize;
use crate::url::parse::RawUrl;
use crate::url::Url;
use crate::UrlError;

/// Resolves a link found in a page against a base URL
///
/// # Resolution Rules
///
/// - No path in `relative`: keep the base path (query/fragment-only link)
/// - Path starting with `/`: used as-is
/// - Any other path: joined onto the directory of the base path. Dot segments
///   (`.` and `..`) are left in place.
/// - Scheme and host: taken from `relative` when present, else from `base`
/// - Query and fragment: always taken from `relative`, never inherited
///
/// # Examples
///
/// ```
/// use sumi_cache::url::{parse, resolve};
///
/// let base = parse("http://example.com/a/b").unwrap();
/// assert_eq!(resolve(&base, "c").unwrap().to_string(), "http://example.com/a/c");
/// assert_eq!(resolve(&base, "/c").unwrap().to_string(), "http://example.com/c");
/// assert_eq!(resolve(&base, "#top").unwrap().to_string(), "http://example.com/a/b#top");
/// ```
pub fn resolve(base: &Url, relative: &str) -> Result<Url, UrlError> {
    let rhs = RawUrl::split(relative)?;

    let path = match rhs.path {
        None => base.uri.path.clone(),
        Some(path) if path.starts_with('/') => path,
        Some(path) => join_path(&base.uri.path, &path),
    };

    let raw = RawUrl {
        scheme: rhs.scheme.or_else(|| Some(base.scheme.clone())),
        host: rhs.host.or_else(|| Some(base.uri.host.clone())),
        path: Some(path),
        query: rhs.query,
        fragment: rhs.fragment,
    };

    normalize(raw).ok_or_else(|| UrlError::MissingHost(relative.to_string()))
}

/// Joins a relative path onto the directory part of `base`
///
/// The directory is everything up to and including the last `/`, so
/// `/a/b` + `c` gives `/a/c` and `/a/` + `c` gives `/a/c`.
fn join_path(base: &str, relative: &str) -> String {
    match base.rfind('/') {
        Some(idx) => format!("{}{}", &base[..=idx], relative),
        None => format!("/{}", relative),
    }
}

impl Url {
    /// Resolves `relative` against this URL; see [`resolve`]
    pub fn join(&self, relative: &str) -> Result<Url, UrlError> {
        resolve(self, relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url::parse;

    fn base() -> Url {
        parse("http://example.com/a/b").unwrap()
    }

    #[test]
    fn test_relative_path() {
        let url = resolve(&base(), "c").unwrap();
        assert_eq!(url.to_string(), "http://example.com/a/c");
    }

    #[test]
    fn test_absolute_path() {
        let url = resolve(&base(), "/c").unwrap();
        assert_eq!(url.to_string(), "http://example.com/c");
    }

    #[test]
    fn test_relative_path_with_query() {
        let url = resolve(&base(), "c?x=1").unwrap();
        assert_eq!(url.to_string(), "http://example.com/a/c?x=1");
        assert_eq!(url.query.as_deref(), Some("x=1"));
    }

    #[test]
    fn test_fragment_only() {
        let url = resolve(&base(), "#top").unwrap();
        assert_eq!(url.to_string(), "http://example.com/a/b#top");
        assert_eq!(url.uri, base().uri);
    }

    #[test]
    fn test_query_not_inherited() {
        let base = parse("http://example.com/a/b?page=2#frag").unwrap();
        let url = resolve(&base, "c").unwrap();
        assert_eq!(url.query, None);
        assert_eq!(url.fragment, None);
    }

    #[test]
    fn test_query_only_keeps_path() {
        let url = resolve(&base(), "?sort=asc").unwrap();
        assert_eq!(url.uri.path, "/a/b");
        assert_eq!(url.query.as_deref(), Some("sort=asc"));
    }

    #[test]
    fn test_directory_base() {
        let base = parse("http://example.com/docs/").unwrap();
        let url = resolve(&base, "intro.html").unwrap();
        assert_eq!(url.uri.path, "/docs/intro.html");
    }

    #[test]
    fn test_root_base() {
        let base = parse("http://example.com/").unwrap();
        let url = resolve(&base, "about").unwrap();
        assert_eq!(url.uri.path, "/about");
    }

    #[test]
    fn test_dot_segments_are_kept() {
        let url = resolve(&base(), "../c").unwrap();
        assert_eq!(url.uri.path, "/a/../c");
    }

    #[test]
    fn test_absolute_url_replaces_everything() {
        let url = resolve(&base(), "https://other.com/x?y=1").unwrap();
        assert_eq!(url.scheme, "https");
        assert_eq!(url.uri.host, "other.com");
        assert_eq!(url.uri.path, "/x");
        assert_eq!(url.query.as_deref(), Some("y=1"));
    }

    #[test]
    fn test_protocol_relative_keeps_scheme() {
        let base = parse("https://example.com/a").unwrap();
        let url = resolve(&base, "//cdn.example.com/lib.js").unwrap();
        assert_eq!(url.scheme, "https");
        assert_eq!(url.uri.host, "cdn.example.com");
    }

    #[test]
    fn test_other_scheme_keeps_base_host() {
        let url = resolve(&base(), "mailto:someone@example.org").unwrap();
        assert_eq!(url.scheme, "mailto");
        assert_eq!(url.uri.host, "example.com");
    }

    #[test]
    fn test_join_method() {
        assert_eq!(base().join("c").unwrap(), resolve(&base(), "c").unwrap());
    }
}
