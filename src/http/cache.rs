//! HTTP cache validation module
//!
//! ETag generation and If-None-Match evaluation for static assets.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate a quoted `ETag` from content bytes
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.len().hash(&mut hasher);
    content.hash(&mut hasher);
    format!("\"{:016x}\"", hasher.finish())
}

/// Evaluate `If-None-Match` against the computed `ETag`.
///
/// Handles a single tag, a comma-separated list, and the `*` wildcard;
/// returns true when the client copy is current (respond 304).
pub fn etag_matches(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|header| {
        header
            .split(',')
            .map(str::trim)
            .any(|candidate| candidate == etag || candidate == "*")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etag_is_quoted_and_stable() {
        let first = generate_etag(b"pad contents");
        let second = generate_etag(b"pad contents");
        assert_eq!(first, second);
        assert!(first.starts_with('"') && first.ends_with('"'));
    }

    #[test]
    fn test_etag_changes_with_content() {
        assert_ne!(generate_etag(b"one"), generate_etag(b"two"));
    }

    #[test]
    fn test_if_none_match_evaluation() {
        let etag = generate_etag(b"asset");
        assert!(etag_matches(Some(&etag), &etag));
        assert!(etag_matches(Some("*"), &etag));
        assert!(etag_matches(Some(&format!("\"stale\", {etag}")), &etag));
        assert!(!etag_matches(Some("\"stale\""), &etag));
        assert!(!etag_matches(None, &etag));
    }
}
