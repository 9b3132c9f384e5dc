//! Upstream image fetching

use reqwest::Client;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::validation::CacheKey;

/// Default upstream image provider
pub const DEFAULT_UPSTREAM: &str = "https://http.cat";

/// HTTP client for fetching status code images from the upstream provider
pub struct ImageFetcher {
    client: Client,
    base_url: String,
}

impl ImageFetcher {
    /// Create a fetcher against the default upstream provider
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_UPSTREAM)
    }

    /// Create a fetcher against a specific upstream base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the image for a key from the upstream provider
    ///
    /// One request, no retries, transport-default timeouts only.
    pub async fn fetch(&self, key: &CacheKey) -> Result<Vec<u8>, FetchError> {
        let url = format!("{}/{}", self.base_url, key);
        debug!(key = %key, url = %url, "Fetching image from upstream");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            warn!(key = %key, "Upstream has no image for key");
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            warn!(key = %key, status = %status, "Upstream returned error status");
            return Err(FetchError::BadStatus(status));
        }

        let data = response.bytes().await?.to_vec();
        debug!(key = %key, size = data.len(), "Fetched image from upstream");
        Ok(data)
    }
}

impl Default for ImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}
