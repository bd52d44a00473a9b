//! Turns a free-text query into a URL-safe path segment (a human slug).

use regex::Regex;
use std::sync::LazyLock;

use crate::core::patterns::SEPARATOR_PATTERN;

/// Anything that is not a word character or a hyphen once separators have
/// been collapsed.
static DISALLOWED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w-]").expect("valid disallowed-char pattern"));

/// Produce the slug form of a query: separators become single hyphens,
/// punctuation is dropped, Unicode letters pass through unencoded. The site
/// accepts raw UTF-8 path segments, so no percent-encoding happens here;
/// callers needing a strict URI must escape separately.
///
/// Idempotent: normalizing an already slug-form string is a no-op.
pub fn normalize(query: &str) -> String {
    let dashed = SEPARATOR_PATTERN.replace_all(query, "-");
    let stripped = DISALLOWED_PATTERN.replace_all(&dashed, "");
    // Stripping punctuation can leave adjacent hyphens behind.
    let collapsed = SEPARATOR_PATTERN.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}
