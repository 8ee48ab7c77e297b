//! Unsplash response shapes and their mapping to [`PhotoDescriptor`].
//!
//! Only the fields the tool uses are modelled. Optional fields carry
//! explicit fallbacks instead of being probed ad hoc.

use serde::Deserialize;

use photopack_core::catalog::UNKNOWN_ATTRIBUTION;
use photopack_core::photo::PhotoDescriptor;

/// Body of `GET /search/photos`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub results: Vec<ApiPhoto>,
}

/// One photo in a search result set.
#[derive(Debug, Deserialize)]
pub struct ApiPhoto {
    pub urls: PhotoUrls,
    pub links: PhotoLinks,
    #[serde(default)]
    pub alt_description: Option<String>,
    #[serde(default)]
    pub user: Option<ApiUser>,
}

#[derive(Debug, Deserialize)]
pub struct PhotoUrls {
    /// 400px wide, used for previews.
    pub small: String,
    /// 1080px wide, used for downloads.
    pub regular: String,
}

#[derive(Debug, Deserialize)]
pub struct PhotoLinks {
    pub download_location: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiUser {
    #[serde(default)]
    pub name: Option<String>,
}

impl ApiPhoto {
    /// Reshape into a descriptor, filling gaps from `query`.
    pub fn into_descriptor(self, query: &str) -> PhotoDescriptor {
        let alt_text = non_blank(self.alt_description).unwrap_or_else(|| query.to_string());
        let attribution = non_blank(self.user.and_then(|u| u.name))
            .unwrap_or_else(|| UNKNOWN_ATTRIBUTION.to_string());

        PhotoDescriptor {
            thumbnail_url: self.urls.small,
            full_res_url: self.urls.regular,
            download_intent_url: self.links.download_location,
            attribution,
            alt_text,
        }
    }
}

impl SearchResponse {
    pub fn into_descriptors(self, query: &str) -> Vec<PhotoDescriptor> {
        self.results
            .into_iter()
            .map(|photo| photo.into_descriptor(query))
            .collect()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
