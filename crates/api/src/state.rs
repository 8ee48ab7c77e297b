use std::sync::Arc;

use photopack_core::archiver::Archiver;
use photopack_core::provider::CatalogClient;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Remote catalog used by the search endpoint.
    pub catalog: Arc<dyn CatalogClient>,
    /// Selection archiver used by the download endpoint.
    pub archiver: Arc<Archiver>,
}
