//! HTTP transport
//!
//! This module handles all network requests for the scraper:
//! - The [`Transport`] seam the fetch cache talks to
//! - Building the reqwest client from configuration
//! - Turning responses into status, headers and body
//! - Error classification (timeout, connection, other)

use crate::config::FetchConfig;
use crate::resource::Headers;
use crate::url::Url;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Browser-identifying User-Agent sent with every live request by default
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:102.0) Gecko/20100101 Firefox/102.0";

/// Errors raised by a transport while performing a GET
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request timeout")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] ::url::ParseError),

    #[error("Invalid request header: {0}")]
    InvalidHeader(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Raw result of one GET
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: Vec<u8>,
}

/// Performs GET requests on behalf of the fetch cache
///
/// Redirects, compression and TLS are the transport's business; the caller
/// only sees the final status, headers and body.
pub trait Transport {
    fn get(
        &self,
        url: &Url,
        headers: &Headers,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetch configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder().gzip(true).brotli(true);
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build()
}

/// [`Transport`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the client from `config`; see [`build_http_client`]
    pub fn from_config(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &Url, headers: &Headers) -> Result<TransportResponse, TransportError> {
        let target = ::url::Url::parse(&url.to_string())?;
        let response = self
            .client
            .get(target)
            .headers(to_header_map(headers)?)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status().as_u16();
        let headers = from_header_map(response.headers());
        let body = response.bytes().await.map_err(classify)?.to_vec();

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

fn classify(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Connection(e.to_string())
    } else {
        TransportError::Http(e)
    }
}

fn to_header_map(headers: &Headers) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::new();
    for (name, value) in headers.iter() {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| TransportError::InvalidHeader(format!("{}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| TransportError::InvalidHeader(format!("{}: {}", name, e)))?;
        map.insert(name, value);
    }
    Ok(map)
}

/// Collapses a response header map into [`Headers`]
///
/// Repeated headers are joined with `", "`, one logical entry per name.
fn from_header_map(map: &HeaderMap) -> Headers {
    let mut headers = Headers::new();
    for name in map.keys() {
        let joined = map
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(", ");
        headers.insert(name.as_str(), joined);
    }
    headers
}
