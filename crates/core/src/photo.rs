//! Photo descriptors, selections, and archive request/result types.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::naming::{self, MAX_POSITION};
use crate::slug::{self, DEFAULT_PREFIX, DEFAULT_QUERY};

/// One search result, already reshaped from the provider's format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoDescriptor {
    /// Small preview image.
    pub thumbnail_url: String,
    /// Fixed-size (1080px wide) variant used for the final download.
    pub full_res_url: String,
    /// Provider endpoint that must be pinged once per download.
    pub download_intent_url: String,
    /// Photographer credit, never empty.
    pub attribution: String,
    /// Alt text, defaults to the search query.
    pub alt_text: String,
}

/// One image the user picked for download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionItem {
    pub full_res_url: String,
    pub download_intent_url: String,
    /// 1-based output position, assigned by the caller.
    pub position: u32,
}

/// A single archive operation: slugged naming parts plus the selection.
#[derive(Debug, Clone)]
pub struct ArchiveRequest {
    pub name_prefix: String,
    pub query_slug: String,
    pub items: Vec<SelectionItem>,
}

impl ArchiveRequest {
    /// Build a request, slugging the raw prefix and query.
    ///
    /// An empty prefix becomes [`DEFAULT_PREFIX`] and an empty query
    /// becomes [`DEFAULT_QUERY`].
    pub fn new(name_prefix: &str, query: &str, items: Vec<SelectionItem>) -> Self {
        Self {
            name_prefix: slug::slugify_or(name_prefix, DEFAULT_PREFIX),
            query_slug: slug::slugify_or(query, DEFAULT_QUERY),
            items,
        }
    }

    /// Check the request before any network activity.
    ///
    /// Rejects an empty selection, positions outside `1..=999`, and
    /// duplicate positions (which would name two entries identically).
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.items.is_empty() {
            return Err(CoreError::InvalidRequest("No photos selected".to_string()));
        }

        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if item.position == 0 || item.position > MAX_POSITION {
                return Err(CoreError::InvalidRequest(format!(
                    "Position {} is out of range (1..={MAX_POSITION})",
                    item.position
                )));
            }
            if !seen.insert(item.position) {
                return Err(CoreError::InvalidRequest(format!(
                    "Duplicate position {}",
                    item.position
                )));
            }
        }

        Ok(())
    }

    /// Name of the archive file this request produces.
    pub fn archive_name(&self) -> String {
        naming::archive_filename(&self.name_prefix, &self.query_slug)
    }

    /// Name of the entry for `position` inside the archive.
    pub fn entry_name(&self, position: u32) -> String {
        naming::entry_filename(&self.name_prefix, &self.query_slug, position)
    }
}

/// Why one item contributed nothing to the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    pub position: u32,
    pub reason: String,
}

/// Outcome of an archive operation with at least one fetched image.
#[derive(Debug, Clone)]
pub struct ArchiveResult {
    pub archive_name: String,
    pub archive_bytes: Vec<u8>,
    /// Entry names in position order.
    pub entries: Vec<String>,
    pub success_count: usize,
    pub attempted_count: usize,
    /// Failed items in position order.
    pub failures: Vec<ItemFailure>,
}

impl ArchiveResult {
    /// Whether some, but not all, items failed.
    pub fn is_partial(&self) -> bool {
        self.success_count < self.attempted_count
    }
}
