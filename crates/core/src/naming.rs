//! Archive naming convention.
//!
//! Entries are named `{prefix}_{query}_{position:03}.jpg` and the archive
//! itself `{prefix}_{query}.zip`. Both parts are expected to be slugs
//! already (see [`crate::slug`]).

/// Largest position that fits the three-digit entry suffix.
pub const MAX_POSITION: u32 = 999;

/// File extension for archive entries.
pub const ENTRY_EXTENSION: &str = "jpg";

/// File extension for the archive itself.
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Filename of one image inside the archive.
///
/// ```
/// use photopack_core::naming::entry_filename;
///
/// assert_eq!(entry_filename("acme", "cement", 1), "acme_cement_001.jpg");
/// assert_eq!(entry_filename("acme", "cement", 42), "acme_cement_042.jpg");
/// ```
pub fn entry_filename(prefix: &str, query_slug: &str, position: u32) -> String {
    format!("{prefix}_{query_slug}_{position:03}.{ENTRY_EXTENSION}")
}

/// Filename of the archive offered for download.
pub fn archive_filename(prefix: &str, query_slug: &str) -> String {
    format!("{prefix}_{query_slug}.{ARCHIVE_EXTENSION}")
}
