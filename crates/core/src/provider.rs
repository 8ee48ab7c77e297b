//! Traits at the network seam.
//!
//! The catalog search and the archiver only talk to the remote provider
//! through these traits, so tests can substitute in-memory fakes and the
//! HTTP client crate can stay free of domain rules.

use async_trait::async_trait;

use crate::photo::PhotoDescriptor;

/// Error type for a single remote call.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Transport-level failure (DNS, connect, TLS, reset).
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The call did not complete within its timeout.
    #[error("Request timed out")]
    Timeout,

    /// The remote server returned a non-2xx status code.
    #[error("Remote returned HTTP {0}")]
    HttpStatus(u16),

    /// The response body could not be decoded.
    #[error("Could not decode response: {0}")]
    Decode(String),
}

/// Remote photo catalog search.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch one page of results for `query`.
    ///
    /// Performs exactly one outbound call. An empty page is `Ok(vec![])`.
    async fn search_photos(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Vec<PhotoDescriptor>, ProviderError>;
}

/// Remote image access used by the archiver.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Fire the provider's download-intent tracking call.
    async fn track_download(&self, intent_url: &str) -> Result<(), ProviderError>;

    /// Fetch the full image bytes.
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ProviderError>;
}
