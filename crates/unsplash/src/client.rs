//! HTTP client for the Unsplash API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Url;

use photopack_core::catalog::{ORIENTATION, PAGE_SIZE};
use photopack_core::photo::PhotoDescriptor;
use photopack_core::provider::{CatalogClient, ImageSource, ProviderError};

use crate::models::SearchResponse;

/// Production API base URL.
pub const DEFAULT_API_URL: &str = "https://api.unsplash.com";

/// Identifying client signature sent with every request.
pub const USER_AGENT: &str = concat!("photopack/", env!("CARGO_PKG_VERSION"));

/// Per-call limits. The connect limit is separate from the whole-call ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Duration,
    /// Search round trip.
    pub search: Duration,
    /// Download-intent ping.
    pub track: Duration,
    /// Full-resolution image fetch.
    pub image: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(5),
            search: Duration::from_secs(15),
            track: Duration::from_secs(10),
            image: Duration::from_secs(30),
        }
    }
}

/// Credential and endpoint for the Unsplash API.
#[derive(Clone)]
pub struct UnsplashConfig {
    /// Access key, sent as `client_id`.
    pub access_key: String,
    /// Base URL (default: [`DEFAULT_API_URL`]).
    pub api_url: String,
    pub timeouts: Timeouts,
}

impl std::fmt::Debug for UnsplashConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnsplashConfig")
            .field("access_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

/// Stateless Unsplash client; one instance is shared by all requests.
pub struct UnsplashClient {
    client: reqwest::Client,
    config: UnsplashConfig,
}

impl UnsplashClient {
    /// Build a client with the tool's timeouts and client signature.
    pub fn new(config: UnsplashConfig) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert("accept-version", HeaderValue::from_static("v1"));

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(config.timeouts.connect)
            .default_headers(headers)
            .build()
            .map_err(map_reqwest_error)?;

        Ok(Self { client, config })
    }

    /// Full search URL for `query` and `page`, credential included.
    pub fn search_url(&self, query: &str, page: u32) -> Result<Url, ProviderError> {
        let endpoint = format!("{}/search/photos", self.config.api_url.trim_end_matches('/'));
        let per_page = PAGE_SIZE.to_string();
        let page = page.to_string();

        Url::parse_with_params(
            &endpoint,
            &[
                ("query", query),
                ("orientation", ORIENTATION),
                ("per_page", per_page.as_str()),
                ("page", page.as_str()),
                ("client_id", self.config.access_key.as_str()),
            ],
        )
        .map_err(|e| ProviderError::Request(format!("Invalid search URL: {e}")))
    }

    /// Provider-supplied download-intent URL with the credential appended.
    pub fn tracking_url(&self, intent_url: &str) -> Result<Url, ProviderError> {
        let mut url = Url::parse(intent_url)
            .map_err(|e| ProviderError::Request(format!("Invalid download-intent URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.access_key);
        Ok(url)
    }

    // ---- private helpers ----

    async fn get(&self, url: Url, timeout: Duration) -> Result<reqwest::Response, ProviderError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::HttpStatus(status.as_u16()));
        }
        Ok(response)
    }
}

#[async_trait]
impl CatalogClient for UnsplashClient {
    async fn search_photos(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Vec<PhotoDescriptor>, ProviderError> {
        let url = self.search_url(query, page)?;
        let response = self.get(url, self.config.timeouts.search).await?;
        let body: SearchResponse = response.json().await.map_err(map_reqwest_error)?;

        tracing::debug!(
            query,
            page,
            total = body.total,
            total_pages = body.total_pages,
            returned = body.results.len(),
            "Unsplash search response",
        );

        Ok(body.into_descriptors(query))
    }
}

#[async_trait]
impl ImageSource for UnsplashClient {
    async fn track_download(&self, intent_url: &str) -> Result<(), ProviderError> {
        let url = self.tracking_url(intent_url)?;
        self.get(url, self.config.timeouts.track).await?;
        Ok(())
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        let url = Url::parse(url)
            .map_err(|e| ProviderError::Request(format!("Invalid image URL: {e}")))?;
        let response = self.get(url, self.config.timeouts.image).await?;
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(bytes.to_vec())
    }
}

/// Classify a reqwest error. URLs are stripped so the credential never
/// ends up in logs or error bodies.
fn map_reqwest_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout
    } else if err.is_decode() {
        ProviderError::Decode(err.without_url().to_string())
    } else {
        ProviderError::Request(err.without_url().to_string())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn client(api_url: &str) -> UnsplashClient {
        UnsplashClient::new(UnsplashConfig {
            access_key: "test-key".to_string(),
            api_url: api_url.to_string(),
            timeouts: Timeouts::default(),
        })
        .unwrap()
    }

    fn query_pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn search_url_carries_all_parameters() {
        let url = client(DEFAULT_API_URL).search_url("rough cement", 3).unwrap();

        assert_eq!(url.path(), "/search/photos");
        assert_eq!(
            query_pairs(&url),
            vec![
                ("query".to_string(), "rough cement".to_string()),
                ("orientation".to_string(), "landscape".to_string()),
                ("per_page".to_string(), "20".to_string()),
                ("page".to_string(), "3".to_string()),
                ("client_id".to_string(), "test-key".to_string()),
            ]
        );
    }

    #[test]
    fn search_url_tolerates_trailing_slash() {
        let url = client("https://api.test/").search_url("x", 1).unwrap();
        assert_eq!(url.path(), "/search/photos");
    }

    #[test]
    fn search_url_rejects_garbage_base() {
        let result = client("not a url").search_url("x", 1);
        assert_matches!(result, Err(ProviderError::Request(_)));
    }

    #[test]
    fn tracking_url_keeps_existing_query() {
        let url = client(DEFAULT_API_URL)
            .tracking_url("https://api.unsplash.com/photos/abc/download?ixid=xyz")
            .unwrap();

        assert_eq!(url.path(), "/photos/abc/download");
        assert_eq!(
            query_pairs(&url),
            vec![
                ("ixid".to_string(), "xyz".to_string()),
                ("client_id".to_string(), "test-key".to_string()),
            ]
        );
    }

    #[test]
    fn tracking_url_without_query() {
        let url = client(DEFAULT_API_URL)
            .tracking_url("https://api.unsplash.com/photos/abc/download")
            .unwrap();
        assert_eq!(url.query(), Some("client_id=test-key"));
    }

    #[test]
    fn tracking_url_rejects_invalid() {
        let result = client(DEFAULT_API_URL).tracking_url("::nope");
        assert_matches!(result, Err(ProviderError::Request(msg)) if msg.contains("download-intent"));
    }

    #[test]
    fn debug_output_redacts_access_key() {
        let config = UnsplashConfig {
            access_key: "super-secret".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            timeouts: Timeouts::default(),
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn user_agent_names_the_tool() {
        assert!(USER_AGENT.starts_with("photopack/"));
    }
}
