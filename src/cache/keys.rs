//! Key Normalization Module
//!
//! Deterministic mapping from free-text identifiers to canonical cache keys.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::{CacheError, Result};

/// Builds a canonical cache key from a namespace prefix and a free-text
/// identifier.
///
/// The identifier is lowercased, internal whitespace runs collapse to a
/// single underscore, and accents are stripped by NFD decomposition
/// followed by dropping combining marks. Two identifiers differing only
/// in case, accents, or whitespace run-length produce the same key:
/// `cache_key("city", "São Paulo")` == `cache_key("city", "sao   paulo")`
/// == `"city_sao_paulo"`.
///
/// Distinct identifiers that normalize identically intentionally collide;
/// this is the only place identifier identity collapsing happens.
pub fn cache_key(prefix: &str, identifier: &str) -> Result<String> {
    if prefix.trim().is_empty() {
        return Err(CacheError::InvalidArgument(
            "Key prefix cannot be empty".to_string(),
        ));
    }
    if identifier.trim().is_empty() {
        return Err(CacheError::InvalidArgument(
            "Identifier cannot be empty".to_string(),
        ));
    }

    Ok(format!("{}_{}", prefix, normalize_identifier(identifier)))
}

/// Applies the normalization pipeline: lowercase, whitespace collapse,
/// accent stripping.
fn normalize_identifier(identifier: &str) -> String {
    identifier
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}
