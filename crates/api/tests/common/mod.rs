#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use photopack_api::config::ServerConfig;
use photopack_api::router::build_app_router;
use photopack_api::state::AppState;
use photopack_core::archiver::Archiver;
use photopack_core::photo::PhotoDescriptor;
use photopack_core::provider::{CatalogClient, ImageSource, ProviderError};
use photopack_unsplash::{Timeouts, UnsplashConfig};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5001".to_string()],
        request_timeout_secs: 30,
        archive_concurrency: 4,
        unsplash: UnsplashConfig {
            access_key: "test-key".to_string(),
            api_url: "http://unused.test".to_string(),
            timeouts: Timeouts::default(),
        },
    }
}

// ---------------------------------------------------------------------------
// Fake providers
// ---------------------------------------------------------------------------

/// Catalog returning `results` photos per page, or failing when `fail` is set.
#[derive(Default)]
pub struct FakeCatalog {
    pub results: usize,
    pub fail: bool,
    pub delay: Duration,
    pub calls: AtomicUsize,
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    async fn search_photos(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Vec<PhotoDescriptor>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(ProviderError::HttpStatus(503));
        }
        Ok((0..self.results)
            .map(|i| PhotoDescriptor {
                thumbnail_url: format!("https://img.test/p{page}/{i}?w=400"),
                full_res_url: format!("https://img.test/p{page}/{i}?w=1080"),
                download_intent_url: format!("https://api.test/photos/{i}/download"),
                attribution: format!("Photographer {i}"),
                alt_text: query.to_string(),
            })
            .collect())
    }
}

/// Image source serving bytes for known URLs; every other URL is a 404.
/// Each fetch takes `delay`.
#[derive(Default)]
pub struct FakeImages {
    pub images: HashMap<String, Vec<u8>>,
    pub delay: Duration,
    pub tracked: AtomicUsize,
    pub fetched: AtomicUsize,
}

impl FakeImages {
    pub fn with(mut self, url: &str, bytes: &[u8]) -> Self {
        self.images.insert(url.to_string(), bytes.to_vec());
        self
    }
}

#[async_trait]
impl ImageSource for FakeImages {
    async fn track_download(&self, _intent_url: &str) -> Result<(), ProviderError> {
        self.tracked.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        self.fetched.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.images
            .get(url)
            .cloned()
            .ok_or(ProviderError::HttpStatus(404))
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build the full application router over the given fakes.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_test_app(catalog: Arc<FakeCatalog>, images: Arc<FakeImages>) -> Router {
    build_test_app_with_config(test_config(), catalog, images)
}

/// Like [`build_test_app`], with a caller-supplied configuration.
pub fn build_test_app_with_config(
    config: ServerConfig,
    catalog: Arc<FakeCatalog>,
    images: Arc<FakeImages>,
) -> Router {
    let archiver = Archiver::new(images).with_concurrency(config.archive_concurrency);

    let state = AppState {
        catalog,
        archiver: Arc::new(archiver),
    };

    build_app_router(state, &config).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Entry names and contents of a zip archive, in archive order.
pub fn zip_entries(bytes: Vec<u8>) -> Vec<(String, Vec<u8>)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).unwrap();
            let mut content = Vec::new();
            file.read_to_end(&mut content).unwrap();
            (file.name().to_string(), content)
        })
        .collect()
}
