//! Catalog search entry point.
//!
//! Validates the query and page, performs the single provider round trip,
//! and bounds the result to one page. Pagination state lives with the
//! caller.

use crate::error::CoreError;
use crate::photo::PhotoDescriptor;
use crate::provider::CatalogClient;

/// Results requested per page.
pub const PAGE_SIZE: usize = 20;

/// Orientation filter sent with every search.
pub const ORIENTATION: &str = "landscape";

/// Placeholder credit for results without a photographer name.
pub const UNKNOWN_ATTRIBUTION: &str = "Unknown photographer";

/// Search the remote catalog.
///
/// An empty (or whitespace-only) query and page `0` are rejected without
/// contacting the provider. Transport, timeout, and decode failures come
/// back as [`CoreError::Remote`]; nothing is retried here.
pub async fn search(
    client: &dyn CatalogClient,
    query: &str,
    page: u32,
) -> Result<Vec<PhotoDescriptor>, CoreError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(CoreError::InvalidRequest("No query provided".to_string()));
    }
    if page == 0 {
        return Err(CoreError::InvalidRequest(
            "Page must be 1 or greater".to_string(),
        ));
    }

    let mut photos = client.search_photos(query, page).await.map_err(|e| {
        tracing::warn!(query, page, error = %e, "Catalog search failed");
        CoreError::Remote(e.to_string())
    })?;

    photos.truncate(PAGE_SIZE);
    tracing::debug!(query, page, count = photos.len(), "Catalog search completed");
    Ok(photos)
}
