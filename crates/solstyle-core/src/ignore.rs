//! Path-based ignore policy for non-global rules.

use crate::rule::RuleDescriptor;
use glob::MatchOptions;
use std::sync::OnceLock;
use tracing::warn;

/// Files matching these patterns are ignored unless a rule is global.
pub const IGNORE_PATTERNS: &[&str] = &["test/**/*"];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Fixed, ordered set of glob patterns tested against normalized file paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnorePolicy {
    patterns: Vec<glob::Pattern>,
}

impl IgnorePolicy {
    /// Returns the policy compiled into the engine, built on first use.
    #[must_use]
    pub fn builtin() -> &'static Self {
        static BUILTIN: OnceLock<IgnorePolicy> = OnceLock::new();
        BUILTIN.get_or_init(|| Self::compile(IGNORE_PATTERNS))
    }

    /// Compiles `patterns` in order, skipping any that are not valid globs.
    fn compile(patterns: &[&str]) -> Self {
        let patterns = patterns
            .iter()
            .filter_map(|pattern| match glob::Pattern::new(pattern) {
                Ok(compiled) => Some(compiled),
                Err(e) => {
                    warn!("Skipping invalid ignore pattern {pattern:?}: {e}");
                    None
                }
            })
            .collect();
        Self { patterns }
    }

    /// Checks whether a file name matches any pattern after normalization.
    #[must_use]
    pub fn matches(&self, file_name: &str) -> bool {
        let normalized = normalize_path(file_name);
        self.patterns
            .iter()
            .any(|pattern| pattern.matches_with(&normalized, MATCH_OPTIONS))
    }

    /// Resolves whether a rule kind is ignored for a file.
    #[must_use]
    pub fn is_ignored(&self, descriptor: &RuleDescriptor, file_name: &str) -> bool {
        !descriptor.is_global && self.matches(file_name)
    }
}

/// Normalizes a path to forward slashes with `.` and `..` resolved lexically.
///
/// `test\\a.sol`, `./test/a.sol` and `test//x/../a.sol` all become `test/a.sol`,
/// so glob patterns behave the same on every platform.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let absolute = unified.starts_with('/');

    let mut parts: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("test/a.sol"), "test/a.sol");
        assert_eq!(normalize_path("./test/a.sol"), "test/a.sol");
        assert_eq!(normalize_path("test\\sub\\a.sol"), "test/sub/a.sol");
        assert_eq!(normalize_path("contracts/../test//a.sol"), "test/a.sol");
        assert_eq!(normalize_path("../test/a.sol"), "../test/a.sol");
        assert_eq!(normalize_path("/repo/./test/a.sol"), "/repo/test/a.sol");
        assert_eq!(normalize_path("/../a.sol"), "/a.sol");
        assert_eq!(normalize_path("./"), ".");
    }

    #[test]
    fn test_builtin_patterns_compile_once() {
        let policy = IgnorePolicy::builtin();
        assert_eq!(policy.patterns.len(), IGNORE_PATTERNS.len());
        assert!(std::ptr::eq(policy, IgnorePolicy::builtin()));
    }

    #[test]
    fn test_invalid_patterns_are_skipped() {
        let policy = IgnorePolicy::compile(&["[", "lib/*"]);
        assert_eq!(policy.patterns.len(), 1);
        assert!(policy.matches("lib/Math.sol"));
        assert!(!policy.matches("["));
    }

    #[test]
    fn test_matches_test_directory() {
        let policy = IgnorePolicy::builtin();
        assert!(policy.matches("test/Token.sol"));
        assert!(policy.matches("test/unit/Token.sol"));
        assert!(policy.matches("./test/Token.sol"));
        assert!(policy.matches("test\\unit\\Token.sol"));
        assert!(policy.matches("contracts/../test/Token.sol"));
    }

    #[test]
    fn test_does_not_match_other_paths() {
        let policy = IgnorePolicy::builtin();
        assert!(!policy.matches("contracts/Token.sol"));
        assert!(!policy.matches("contracts/test/Token.sol"));
        assert!(!policy.matches("tests/Token.sol"));
        assert!(!policy.matches("test"));
        assert!(!policy.matches("/repo/test/Token.sol"));
    }

    #[test]
    fn test_global_rules_never_ignored() {
        let policy = IgnorePolicy::builtin();
        let global = RuleDescriptor::global("always-on");
        let local = RuleDescriptor::new("local");

        assert!(!policy.is_ignored(&global, "test/Token.sol"));
        assert!(policy.is_ignored(&local, "test/Token.sol"));
        assert!(!policy.is_ignored(&local, "contracts/Token.sol"));
    }
}
