//! Selection archiver.
//!
//! Fetches every selected image (after the provider's download-intent
//! call), then packs the successful ones into a single archive named by
//! position. Fetches run concurrently up to a fixed limit; entries are
//! written afterwards in position order, so network completion order never
//! affects the result.

use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::archive::ArchiveWriter;
use crate::error::CoreError;
use crate::photo::{ArchiveRequest, ArchiveResult, ItemFailure, SelectionItem};
use crate::provider::{ImageSource, ProviderError};

/// Items fetched in parallel when no limit is configured.
pub const DEFAULT_CONCURRENCY: usize = 6;

/// Upper bound on the configurable in-flight limit.
pub const MAX_CONCURRENCY: usize = 16;

/// Packs a user's selection into one archive.
pub struct Archiver {
    images: Arc<dyn ImageSource>,
    concurrency: usize,
}

impl Archiver {
    pub fn new(images: Arc<dyn ImageSource>) -> Self {
        Self {
            images,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Set the in-flight item limit, clamped to `1..=MAX_CONCURRENCY`.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, MAX_CONCURRENCY);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Run one archive operation.
    ///
    /// Rejects invalid requests before any network activity. Per-item
    /// failures are recorded in [`ArchiveResult::failures`] and never stop
    /// the batch; only when every item fails does this return
    /// [`CoreError::AllDownloadsFailed`].
    pub async fn archive(&self, request: &ArchiveRequest) -> Result<ArchiveResult, CoreError> {
        request.validate()?;
        let attempted_count = request.items.len();

        let mut outcomes: Vec<(u32, Result<Vec<u8>, ProviderError>)> =
            stream::iter(request.items.clone())
                .map(|item| async move { (item.position, self.fetch_item(&item).await) })
                .buffer_unordered(self.concurrency)
                .collect()
                .await;
        outcomes.sort_by_key(|(position, _)| *position);

        let mut writer = ArchiveWriter::new();
        let mut failures = Vec::new();

        for (position, outcome) in outcomes {
            match outcome {
                Ok(bytes) => {
                    let filename = request.entry_name(position);
                    writer.add_entry(&filename, &bytes)?;
                    tracing::info!(
                        position,
                        filename = %filename,
                        kb = bytes.len() / 1024,
                        "Image added to archive",
                    );
                }
                Err(e) => {
                    tracing::warn!(position, error = %e, "Image download failed");
                    failures.push(ItemFailure {
                        position,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let archive_name = request.archive_name();

        if writer.is_empty() {
            tracing::error!(
                attempted = attempted_count,
                archive = %archive_name,
                "All image downloads failed",
            );
            return Err(CoreError::AllDownloadsFailed {
                attempted: attempted_count,
                failures,
            });
        }

        let entries = writer.entries().to_vec();
        let success_count = entries.len();
        let archive_bytes = writer.finish()?;

        tracing::info!(
            succeeded = success_count,
            attempted = attempted_count,
            archive = %archive_name,
            bytes = archive_bytes.len(),
            "Archive assembled",
        );

        Ok(ArchiveResult {
            archive_name,
            archive_bytes,
            entries,
            success_count,
            attempted_count,
            failures,
        })
    }

    /// Tracking call (outcome only logged), then the image fetch.
    async fn fetch_item(&self, item: &SelectionItem) -> Result<Vec<u8>, ProviderError> {
        if let Err(e) = self.images.track_download(&item.download_intent_url).await {
            tracing::warn!(
                position = item.position,
                error = %e,
                "Download-intent call failed, fetching anyway",
            );
        }

        self.images.fetch_image(&item.full_res_url).await
    }
}
