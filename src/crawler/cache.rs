//! Get-or-fetch cache over the resource store
//!
//! [`FetchCache`] answers from the store when the URI has been seen before
//! and otherwise performs one live GET, stores the result and returns it.

use crate::crawler::fetcher::{Transport, TransportResponse};
use crate::resource::{Headers, Resource};
use crate::storage::Storage;
use crate::url::Url;
use crate::ScrapeError;

/// HTTP fetch API backed by a [`Storage`]
pub struct FetchCache<S, T> {
    storage: S,
    transport: T,
    user_agent: String,
}

impl<S: Storage, T: Transport> FetchCache<S, T> {
    /// Creates a cache over `storage` that sends `user_agent` on live requests
    pub fn new(storage: S, transport: T, user_agent: impl Into<String>) -> Self {
        Self {
            storage,
            transport,
            user_agent: user_agent.into(),
        }
    }

    /// Returns the stored resource for `url.uri`, or fetches and stores it
    ///
    /// The lookup ignores query and fragment: any URL sharing host and path
    /// with a stored record is answered from the store without a request.
    pub async fn fetch(&mut self, url: &Url) -> Result<Resource, ScrapeError> {
        if let Some(hit) = self.storage.get(&url.uri)? {
            tracing::debug!("Cache hit for {}", url);
            return Ok(hit);
        }

        let resource = self.fetch_uncached(url).await?;
        self.storage.insert(url, &resource)?;
        Ok(resource)
    }

    /// Unconditionally performs a GET, without touching the store
    pub async fn fetch_uncached(&self, url: &Url) -> Result<Resource, ScrapeError> {
        tracing::info!("Fetching {}", url);

        let mut headers = Headers::new();
        headers.insert("User-Agent", self.user_agent.as_str());

        let TransportResponse {
            status,
            headers,
            body,
        } = self
            .transport
            .get(url, &headers)
            .await
            .map_err(|source| ScrapeError::Transport {
                url: url.to_string(),
                source,
            })?;

        Ok(Resource {
            status,
            headers,
            data: body,
        })
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::fetcher::TransportError;
    use crate::storage::SqliteStorage;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Transport that answers every request with the same page and records
    /// what it was asked for
    #[derive(Default)]
    struct RecordingTransport {
        requests: Mutex<Vec<(String, Option<String>)>>,
    }

    impl Transport for RecordingTransport {
        async fn get(
            &self,
            url: &Url,
            headers: &Headers,
        ) -> Result<TransportResponse, TransportError> {
            self.requests.lock().unwrap().push((
                url.to_string(),
                headers.get("user-agent").map(str::to_string),
            ));
            Ok(TransportResponse {
                status: 200,
                headers: [("Content-Type", "text/plain")].into_iter().collect(),
                body: url.to_string().into_bytes(),
            })
        }
    }

    struct FailingTransport;

    impl Transport for FailingTransport {
        async fn get(&self, _: &Url, _: &Headers) -> Result<TransportResponse, TransportError> {
            Err(TransportError::Connection("connection refused".to_string()))
        }
    }

    fn store(dir: &TempDir) -> SqliteStorage {
        let mut storage = SqliteStorage::new(dir.path().join("scraper.db"));
        storage.create(false).unwrap();
        storage
    }

    #[tokio::test]
    async fn test_miss_fetches_and_stores() {
        let dir = TempDir::new().unwrap();
        let mut cache = FetchCache::new(store(&dir), RecordingTransport::default(), "TestAgent/1.0");
        let url = Url::parse("http://example.com/page").unwrap();

        let resource = cache.fetch(&url).await.unwrap();

        assert_eq!(resource.status, 200);
        assert_eq!(resource.data, b"http://example.com/page");
        assert_eq!(cache.storage().get(&url.uri).unwrap(), Some(resource));
    }

    #[tokio::test]
    async fn test_sends_user_agent() {
        let dir = TempDir::new().unwrap();
        let mut cache = FetchCache::new(store(&dir), RecordingTransport::default(), "TestAgent/1.0");
        let url = Url::parse("http://example.com/").unwrap();

        cache.fetch(&url).await.unwrap();

        let requests = cache.transport.requests.lock().unwrap();
        assert_eq!(requests[0].1.as_deref(), Some("TestAgent/1.0"));
    }

    #[tokio::test]
    async fn test_one_request_per_uri() {
        let dir = TempDir::new().unwrap();
        let mut cache = FetchCache::new(store(&dir), RecordingTransport::default(), "TestAgent/1.0");
        let first = Url::parse("http://example.com/search?q=a").unwrap();
        let second = Url::parse("http://example.com/search?q=b").unwrap();

        let a = cache.fetch(&first).await.unwrap();
        let b = cache.fetch(&second).await.unwrap();

        assert_eq!(cache.transport.requests.lock().unwrap().len(), 1);
        assert_eq!(a, b);
        assert_eq!(b.data, b"http://example.com/search?q=a");
    }

    #[tokio::test]
    async fn test_fetch_uncached_skips_store() {
        let dir = TempDir::new().unwrap();
        let cache = FetchCache::new(store(&dir), RecordingTransport::default(), "TestAgent/1.0");
        let url = Url::parse("http://example.com/").unwrap();

        cache.fetch_uncached(&url).await.unwrap();
        cache.fetch_uncached(&url).await.unwrap();

        assert_eq!(cache.transport.requests.lock().unwrap().len(), 2);
        assert!(cache.storage().get(&url.uri).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let dir = TempDir::new().unwrap();
        let mut cache = FetchCache::new(store(&dir), FailingTransport, "TestAgent/1.0");
        let url = Url::parse("http://example.com/").unwrap();

        let err = cache.fetch(&url).await.unwrap_err();

        assert!(matches!(err, ScrapeError::Transport { .. }));
        assert!(cache.storage().get(&url.uri).unwrap().is_none());
    }
}
