//! Filesystem- and URL-safe slugs derived from free text.
//!
//! A slug is lowercase ASCII alphanumerics joined by single underscores,
//! with no leading or trailing underscore. Input that yields nothing usable
//! falls back to a caller-chosen default token.

/// Default token used when a name prefix slugs to nothing.
pub const DEFAULT_PREFIX: &str = "image";

/// Default token used when a search query slugs to nothing.
pub const DEFAULT_QUERY: &str = "search";

/// Slug a string, falling back to [`DEFAULT_PREFIX`] when empty.
///
/// ```
/// use photopack_core::slug::slugify;
///
/// assert_eq!(slugify("Rough  Cement, Surface!"), "rough_cement_surface");
/// assert_eq!(slugify("!!!"), "image");
/// ```
pub fn slugify(input: &str) -> String {
    slugify_or(input, DEFAULT_PREFIX)
}

/// Slug a string, falling back to `default` when nothing survives.
///
/// `default` is itself slugged, so the result is always a valid slug and
/// applying the function twice gives the same answer as applying it once.
pub fn slugify_or(input: &str, default: &str) -> String {
    let slug = collapse(input);
    if !slug.is_empty() {
        return slug;
    }

    let fallback = collapse(default);
    if fallback.is_empty() {
        DEFAULT_PREFIX.to_string()
    } else {
        fallback
    }
}

/// Lowercase, map every run of non-alphanumerics to one `_`, trim `_`.
fn collapse(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_sep = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }

    out
}
