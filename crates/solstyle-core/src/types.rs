//! Core types for lint violations and results.

use crate::ast::NodeRef;
use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path as given to the reporter.
    pub file: PathBuf,
    /// Line number (1-indexed, 0 when unknown).
    pub line: usize,
    /// Column number (1-indexed, 0 when unknown).
    pub column: usize,
    /// Byte offset in file (for miette integration).
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Creates a location from a node's span, falling back to an unknown position.
    #[must_use]
    pub fn for_node(file: PathBuf, node: NodeRef<'_>) -> Self {
        match node.span() {
            Some(span) => {
                Self::new(file, span.line, span.column).with_span(span.offset, span.length)
            }
            None => Self::new(file, 0, 0),
        }
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// A rule violation recorded by a reporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule id (e.g., "leading-underscore").
    pub rule: String,
    /// Type of the node the violation was reported on.
    pub node_type: String,
    /// Primary location of the violation.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        rule: impl Into<String>,
        node_type: impl Into<String>,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            node_type: node_type.into(),
            location,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.rule,
            self.message
        )
    }
}

/// Converts a Violation to a miette Diagnostic for rich error display.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<&Violation> for ViolationDiagnostic {
    fn from(v: &Violation) -> Self {
        Self {
            message: format!("[{}] {}", v.rule, v.message),
            span: SourceSpan::from((v.location.offset, v.location.length)),
            label_message: v.node_type.clone(),
        }
    }
}

/// Result of running rules over one or more files.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Number of files checked.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any violations.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Counts violations per rule id.
    #[must_use]
    pub fn count_by_rule(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for v in &self.violations {
            *counts.entry(v.rule.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Sorts violations by file, then line, then column.
    pub fn sort(&mut self) {
        self.violations.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.location.column.cmp(&b.location.column))
        });
    }

    /// Formats the one-line summary printed after a run.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Found {} violation(s) in {} file(s)",
            self.violations.len(),
            self.files_checked
        )
    }

    /// Adds violations from another result.
    pub fn extend(&mut self, other: Self) {
        self.violations.extend(other.violations);
        self.files_checked += other.files_checked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(file: &str, line: usize, rule: &str) -> Violation {
        Violation::new(
            rule,
            "FunctionDefinition",
            Location::new(PathBuf::from(file), line, 5),
            "Private and internal functions must have leading underscore",
        )
    }

    #[test]
    fn violation_display() {
        let v = make_violation("contracts/Token.sol", 12, "leading-underscore");
        insta::assert_snapshot!(
            v.to_string(),
            @"contracts/Token.sol:12:5: [leading-underscore] Private and internal functions must have leading underscore"
        );
    }

    #[test]
    fn diagnostic_carries_rule_in_message() {
        let v = make_violation("a.sol", 1, "interface-names");
        let diag = ViolationDiagnostic::from(&v);
        assert!(diag.to_string().starts_with("[interface-names] "));
    }

    #[test]
    fn result_counts_and_sorts() {
        let mut result = LintResult::new();
        result.files_checked = 2;
        result.violations.push(make_violation("b.sol", 3, "leading-underscore"));
        result.violations.push(make_violation("a.sol", 9, "interface-names"));
        result.violations.push(make_violation("a.sol", 2, "leading-underscore"));

        result.sort();
        assert_eq!(result.violations[0].location.line, 2);
        assert_eq!(result.violations[2].location.file, PathBuf::from("b.sol"));

        let counts = result.count_by_rule();
        assert_eq!(counts.get("leading-underscore"), Some(&2));
        assert_eq!(counts.get("interface-names"), Some(&1));
        assert_eq!(result.summary(), "Found 3 violation(s) in 2 file(s)");
    }

    #[test]
    fn extend_merges_results() {
        let mut a = LintResult::new();
        a.files_checked = 1;
        let mut b = LintResult::new();
        b.files_checked = 1;
        b.violations.push(make_violation("b.sol", 1, "interface-names"));

        a.extend(b);
        assert!(a.has_violations());
        assert_eq!(a.files_checked, 2);
    }
}
