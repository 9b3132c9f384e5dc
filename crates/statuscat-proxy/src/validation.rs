//! Cache key extraction and validation

use std::fmt;

/// Path segment browsers request on their own; never treated as a key
const FAVICON: &str = "favicon.ico";

/// A validated cache key in its original string form
///
/// The string form is kept so that keys with leading zeros map to stable,
/// distinct file names (`007` and `7` are different entries).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of validating the first path segment of a request
#[derive(Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// A valid numeric key
    Key(CacheKey),
    /// The favicon request; answered 404 with an empty body
    Ignore,
    /// Empty or non-numeric segment; answered 400
    Invalid,
}

/// Extract and classify the cache key from a raw request path
///
/// Only the first path segment is considered; anything after it is
/// ignored. A key is any non-empty run of ASCII digits, with no bound on
/// length, validated before any I/O happens.
pub fn extract_key(path: &str) -> KeyOutcome {
    let segment = path
        .strip_prefix('/')
        .unwrap_or(path)
        .split('/')
        .next()
        .unwrap_or("");

    if segment == FAVICON {
        return KeyOutcome::Ignore;
    }

    if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
        KeyOutcome::Key(CacheKey(segment.to_string()))
    } else {
        KeyOutcome::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_key(path: &str, expected: &str) {
        match extract_key(path) {
            KeyOutcome::Key(key) => assert_eq!(key.as_str(), expected),
            other => panic!("expected key for {path}, got {other:?}"),
        }
    }

    #[test]
    fn test_numeric_segment_is_a_key() {
        assert_key("/200", "200");
        assert_key("/0", "0");
        assert_key("/99999", "99999");
    }

    #[test]
    fn test_key_keeps_original_string_form() {
        assert_key("/007", "007");
    }

    #[test]
    fn test_keys_longer_than_any_integer_width_are_accepted() {
        assert_key("/123456789012345678901234567890", "123456789012345678901234567890");
    }

    #[test]
    fn test_only_first_segment_matters() {
        assert_key("/200/anything/else", "200");
    }

    #[test]
    fn test_favicon_is_ignored() {
        assert_eq!(extract_key("/favicon.ico"), KeyOutcome::Ignore);
    }

    #[test]
    fn test_empty_segment_is_invalid() {
        assert_eq!(extract_key("/"), KeyOutcome::Invalid);
        assert_eq!(extract_key(""), KeyOutcome::Invalid);
    }

    #[test]
    fn test_doubled_slash_means_empty_segment() {
        assert_eq!(extract_key("//200"), KeyOutcome::Invalid);
    }

    #[test]
    fn test_non_numeric_segments_are_invalid() {
        assert_eq!(extract_key("/cats"), KeyOutcome::Invalid);
        assert_eq!(extract_key("/12a"), KeyOutcome::Invalid);
        assert_eq!(extract_key("/-1"), KeyOutcome::Invalid);
        assert_eq!(extract_key("/3.14"), KeyOutcome::Invalid);
        assert_eq!(extract_key("/%20"), KeyOutcome::Invalid);
    }

    #[test]
    fn test_display_matches_original_segment() {
        match extract_key("/451") {
            KeyOutcome::Key(key) => assert_eq!(key.to_string(), "451"),
            other => panic!("expected key, got {other:?}"),
        }
    }
}
