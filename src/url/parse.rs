use crate::url::normalize::normalize;
use crate::url::Url;
use crate::UrlError;

/// URL components as written, before any defaults are applied
///
/// Every component is optional here. `host` is only present when the text
/// carries an authority (`//host`), except in [`parse`] which also accepts a
/// scheme-less `host/path` form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawUrl {
    pub scheme: Option<String>,
    pub host: Option<String>,
    pub path: Option<String>,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl RawUrl {
    /// Splits a URL reference into its components
    ///
    /// Follows the generic `scheme:[//authority]path[?query][#fragment]`
    /// layout. Scheme and host are lowercased; userinfo is dropped from the
    /// authority; the port stays attached to the host. Tabs and newlines are
    /// removed and spaces outside the host are percent-encoded, as browsers
    /// do with `href` values.
    pub fn split(text: &str) -> Result<Self, UrlError> {
        let text: String = text
            .trim()
            .chars()
            .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
            .collect();

        let (rest, fragment) = match text.split_once('#') {
            Some((rest, fragment)) => (rest, Some(encode_spaces(fragment))),
            None => (text.as_str(), None),
        };
        let (rest, query) = match rest.split_once('?') {
            Some((rest, query)) => (rest, Some(encode_spaces(query))),
            None => (rest, None),
        };

        let (scheme, rest) = match split_scheme(rest) {
            Some((scheme, rest)) => (Some(scheme.to_ascii_lowercase()), rest),
            None => (None, rest),
        };

        let (host, path) = match rest.strip_prefix("//") {
            Some(after) => {
                let end = after.find('/').unwrap_or(after.len());
                let authority = &after[..end];
                let host = authority
                    .rsplit_once('@')
                    .map_or(authority, |(_, host)| host)
                    .to_ascii_lowercase();
                validate_host(&host, &text)?;
                (Some(host).filter(|h| !h.is_empty()), &after[end..])
            }
            None => (None, rest),
        };

        Ok(Self {
            scheme,
            host,
            path: Some(encode_spaces(path)).filter(|p| !p.is_empty()),
            query,
            fragment,
        })
    }
}

/// Checks a `host[:port]` authority
///
/// The host name goes through [`::url::Host::parse`]; a port must be a
/// number in `0..=65535`. An empty authority is accepted here and treated as
/// a missing host later.
fn validate_host(host: &str, text: &str) -> Result<(), UrlError> {
    if host.is_empty() {
        return Ok(());
    }
    let malformed = || UrlError::Malformed(text.to_string());

    let (name, port) = split_port(host).ok_or_else(malformed)?;
    if let Some(port) = port {
        port.parse::<u16>().map_err(|_| malformed())?;
    }
    if name.is_empty() {
        return Err(malformed());
    }
    ::url::Host::parse(name).map_err(|_| malformed())?;
    Ok(())
}

/// Splits `host[:port]`, keeping IPv6 literals (`[::1]:8080`) intact
///
/// Returns `None` when text follows a closing `]` without a `:`.
fn split_port(host: &str) -> Option<(&str, Option<&str>)> {
    if host.starts_with('[') {
        let end = host.find(']').map_or(host.len(), |idx| idx + 1);
        let (name, rest) = host.split_at(end);
        return match rest {
            "" => Some((name, None)),
            _ => rest.strip_prefix(':').map(|port| (name, Some(port))),
        };
    }
    Some(match host.rsplit_once(':') {
        Some((name, port)) => (name, Some(port)),
        None => (host, None),
    })
}

fn encode_spaces(text: &str) -> String {
    text.replace(' ', "%20")
}

/// Returns `(scheme, rest)` when `text` starts with a valid scheme
///
/// A colon followed by a digit is read as a port (`localhost:8080`), not as
/// the end of a scheme.
fn split_scheme(text: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = text.split_once(':')?;
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid || rest.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some((scheme, rest))
}

/// Parses an absolute URL string into a normalized [`Url`]
///
/// A scheme-less string is read as `host/path` (so `example.com` parses to
/// `http://example.com/`). Fails with [`UrlError::MissingHost`] when no host
/// can be determined, e.g. for a bare `/path`.
///
/// # Examples
///
/// ```
/// use sumi_cache::url::parse;
///
/// let url = parse("example.com/docs?page=2").unwrap();
/// assert_eq!(url.to_string(), "http://example.com/docs?page=2");
///
/// assert!(parse("/just/a/path").is_err());
/// ```
pub fn parse(text: &str) -> Result<Url, UrlError> {
    let mut raw = RawUrl::split(text)?;

    if raw.host.is_none() && raw.scheme.is_none() {
        if let Some(path) = raw.path.take() {
            if path.starts_with('/') {
                raw.path = Some(path);
            } else {
                let end = path.find('/').unwrap_or(path.len());
                let host = path[..end].to_ascii_lowercase();
                validate_host(&host, text)?;
                raw.host = Some(host);
                raw.path = Some(path[end..].to_string()).filter(|p| !p.is_empty());
            }
        }
    }

    normalize(raw).ok_or_else(|| UrlError::MissingHost(text.to_string()))
}
