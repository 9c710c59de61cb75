//! Path prefix matching.
//!
//! # Design Decisions
//! - Literal, case-sensitive `starts_with`; no segment boundary, so
//!   `/server1` also matches `/server1abc`
//! - No regex and no wildcards

/// Matches the request path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns true if the path starts with this prefix.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }

    /// The remainder of `path` after the prefix, or `None` when it doesn't match.
    pub fn strip<'a>(&self, path: &'a str) -> Option<&'a str> {
        path.strip_prefix(self.prefix.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_matcher() {
        let matcher = PathPrefixMatcher::new("/server1");

        assert!(matcher.matches("/server1"));
        assert!(matcher.matches("/server1/index.html"));
        assert!(matcher.matches("/server1abc"));
        assert!(!matcher.matches("/server2data"));
        assert!(!matcher.matches("/Server1"));
        assert!(!matcher.matches("/"));
    }

    #[test]
    fn test_strip() {
        let matcher = PathPrefixMatcher::new("/server1");

        assert_eq!(matcher.strip("/server1/a/b"), Some("/a/b"));
        assert_eq!(matcher.strip("/server1"), Some(""));
        assert_eq!(matcher.strip("/about"), None);
    }
}
