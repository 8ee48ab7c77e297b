//! Handler for packaging a selection into a downloadable archive.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use photopack_core::photo::{ArchiveRequest, SelectionItem};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Response header carrying the number of images packed.
pub const SUCCEEDED_HEADER: &str = "x-archive-succeeded";
/// Response header carrying the number of images requested.
pub const ATTEMPTED_HEADER: &str = "x-archive-attempted";

/// Request body for `POST /download`.
///
/// The older `prefix` / `photos` / `download_url` / `download_location`
/// field names are accepted as aliases.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadPayload {
    #[serde(default, alias = "prefix")]
    pub name_prefix: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default, alias = "photos")]
    pub items: Vec<DownloadItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadItem {
    #[serde(alias = "download_url")]
    pub url: String,
    #[serde(alias = "download_location")]
    pub intent_url: String,
    /// Defaults to the item's 1-based index in `items`.
    #[serde(default)]
    pub position: Option<u32>,
}

impl DownloadPayload {
    fn into_request(self) -> ArchiveRequest {
        let items = self
            .items
            .into_iter()
            .enumerate()
            .map(|(index, item)| SelectionItem {
                full_res_url: item.url,
                download_intent_url: item.intent_url,
                position: item
                    .position
                    .unwrap_or_else(|| u32::try_from(index + 1).unwrap_or(u32::MAX)),
            })
            .collect();

        ArchiveRequest::new(
            self.name_prefix.as_deref().unwrap_or_default(),
            self.query.as_deref().unwrap_or_default(),
            items,
        )
    }
}

// ---------------------------------------------------------------------------
// POST /download
// ---------------------------------------------------------------------------

/// Fetch the selected images and return them as one zip attachment.
///
/// Partial failures still return the archive; the counts travel in the
/// `x-archive-*` headers.
pub async fn download_selection(
    State(state): State<AppState>,
    payload: Result<Json<DownloadPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let request = payload.into_request();

    tracing::info!(
        items = request.items.len(),
        prefix = %request.name_prefix,
        query = %request.query_slug,
        "Archive requested",
    );

    let result = state.archiver.archive(&request).await?;

    if result.is_partial() {
        tracing::warn!(
            succeeded = result.success_count,
            attempted = result.attempted_count,
            failures = ?result.failures,
            "Archive is missing some images",
        );
    }

    let disposition =
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", result.archive_name))
            .map_err(|e| AppError::InternalError(format!("Invalid archive name header: {e}")))?;

    let headers = [
        (CONTENT_TYPE, HeaderValue::from_static("application/zip")),
        (CONTENT_DISPOSITION, disposition),
        (
            HeaderName::from_static(SUCCEEDED_HEADER),
            HeaderValue::from(result.success_count),
        ),
        (
            HeaderName::from_static(ATTEMPTED_HEADER),
            HeaderValue::from(result.attempted_count),
        ),
    ];

    Ok((StatusCode::OK, headers, result.archive_bytes))
}
