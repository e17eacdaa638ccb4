//! Title sanitization for on-disk filenames.
//!
//! Display titles come from a remote platform and may contain anything:
//! punctuation, path separators, emoji. Every filename the pipeline writes
//! is derived from the sanitized form, so this is the single place where
//! untrusted text is turned into something filesystem-safe.

/// Maps an arbitrary display title to a filesystem-safe identifier.
///
/// Removes every character that is not alphanumeric, an underscore, or
/// whitespace (Unicode-aware), then replaces each maximal run of whitespace
/// with a single underscore. Pure and deterministic; never fails.
pub fn sanitize_title(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    // split_whitespace both trims the edges and collapses interior runs,
    // so no leading/trailing underscores can appear.
    cleaned.split_whitespace().collect::<Vec<_>>().join("_")
}
