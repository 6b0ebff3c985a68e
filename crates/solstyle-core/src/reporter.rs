//! Reporter contract and the collecting reporter used by hosts and tests.

use crate::ast::NodeRef;
use crate::types::{Location, Violation};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// Sink for rule violations.
///
/// Reporting is fire-and-forget: implementations handle their own failures
/// and never hand them back to the rule.
pub trait Reporter {
    /// Records a violation of `rule_id` at `node`.
    fn error(&self, node: NodeRef<'_>, rule_id: &str, message: &str);
}

/// Reporter that accumulates violations for a single file.
#[derive(Debug)]
pub struct CollectingReporter {
    file: PathBuf,
    violations: RefCell<Vec<Violation>>,
}

impl CollectingReporter {
    /// Creates a reporter for the given file.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            violations: RefCell::new(Vec::new()),
        }
    }

    /// Returns the file this reporter collects for.
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Returns the number of violations collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.borrow().len()
    }

    /// Returns true if nothing has been reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.borrow().is_empty()
    }

    /// Returns a copy of the collected violations.
    #[must_use]
    pub fn violations(&self) -> Vec<Violation> {
        self.violations.borrow().clone()
    }

    /// Consumes the reporter and returns the collected violations.
    #[must_use]
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations.into_inner()
    }
}

impl Reporter for CollectingReporter {
    fn error(&self, node: NodeRef<'_>, rule_id: &str, message: &str) {
        let location = Location::for_node(self.file.clone(), node);
        self.violations.borrow_mut().push(Violation::new(
            rule_id,
            node.type_name(),
            location,
            message,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Ast, Node, NodeType, Span};

    #[test]
    fn test_collects_violations_with_location() {
        let mut ast = Ast::new();
        let id = ast.push_root(
            Node::new(NodeType::ContractDefinition)
                .with_name("Token")
                .with_span(Span::new(3, 1).with_range(40, 25)),
        );
        let node = ast.get(id).unwrap();

        let reporter = CollectingReporter::new("contracts/Token.sol");
        reporter.error(node, "interface-names", "bad name");

        assert_eq!(reporter.len(), 1);
        let violations = reporter.into_violations();
        assert_eq!(violations[0].rule, "interface-names");
        assert_eq!(violations[0].node_type, "ContractDefinition");
        assert_eq!(violations[0].location.line, 3);
        assert_eq!(violations[0].location.offset, 40);
        assert_eq!(violations[0].location.length, 25);
    }
}
