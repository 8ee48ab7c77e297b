//! Handler for catalog search.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use photopack_core::catalog;
use photopack_core::photo::PhotoDescriptor;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default, alias = "query")]
    pub q: Option<String>,
    #[serde(default)]
    pub page: Option<i64>,
}

/// One page of normalized results.
#[derive(Debug, Serialize)]
pub struct SearchPage {
    pub photos: Vec<PhotoDescriptor>,
    pub query: String,
    pub page: u32,
}

// ---------------------------------------------------------------------------
// GET /search
// ---------------------------------------------------------------------------

/// Search the catalog. Pages below 1 are treated as page 1.
pub async fn search_photos(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let query = params.q.unwrap_or_default().trim().to_string();
    let page = params.page.unwrap_or(1).clamp(1, i64::from(u32::MAX)) as u32;

    let photos = catalog::search(state.catalog.as_ref(), &query, page).await?;

    tracing::info!(query = %query, page, count = photos.len(), "Search served");

    Ok(Json(DataResponse {
        data: SearchPage {
            photos,
            query,
            page,
        },
    }))
}
