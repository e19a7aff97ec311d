use crate::url::parse::RawUrl;
use crate::url::{Uri, Url};

/// Scheme used when a URL does not name one
pub const DEFAULT_SCHEME: &str = "http";

/// Path used when a URL has none
pub const DEFAULT_PATH: &str = "/";

/// Establishes the [`Url`] invariants on raw components
///
/// # Normalization Steps
///
/// 1. Empty or missing scheme becomes `http`
/// 2. Empty or missing path becomes `/`
/// 3. Query and fragment pass through unchanged (absent stays absent)
///
/// Returns `None` when there is no host, since host is part of every URL's
/// identity.
///
/// # Examples
///
/// ```
/// use sumi_cache::url::{normalize, RawUrl};
///
/// let raw = RawUrl {
///     host: Some("example.com".to_string()),
///     ..RawUrl::default()
/// };
/// let url = normalize(raw).unwrap();
/// assert_eq!(url.to_string(), "http://example.com/");
/// ```
pub fn normalize(raw: RawUrl) -> Option<Url> {
    let host = raw.host.filter(|h| !h.is_empty())?;
    let scheme = raw
        .scheme
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_SCHEME.to_string());
    let path = raw
        .path
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_PATH.to_string());

    Some(Url {
        scheme,
        uri: Uri { host, path },
        query: raw.query,
        fragment: raw.fragment,
    })
}

impl From<Url> for RawUrl {
    fn from(url: Url) -> Self {
        Self {
            scheme: Some(url.scheme),
            host: Some(url.uri.host),
            path: Some(url.uri.path),
            query: url.query,
            fragment: url.fragment,
        }
    }
}
