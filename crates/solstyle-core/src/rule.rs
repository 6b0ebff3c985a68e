//! Rule trait and static rule identity.

use crate::ast::{NodeRef, NodeType};
use crate::context::RuleContext;

/// Static identity of a rule kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleDescriptor {
    /// Unique kebab-case rule id (e.g., "interface-names").
    pub rule_id: &'static str,
    /// Global rules are never ignored by path.
    pub is_global: bool,
}

impl RuleDescriptor {
    /// Creates a descriptor for a non-global rule.
    #[must_use]
    pub const fn new(rule_id: &'static str) -> Self {
        Self {
            rule_id,
            is_global: false,
        }
    }

    /// Creates a descriptor for a global rule.
    #[must_use]
    pub const fn global(rule_id: &'static str) -> Self {
        Self {
            rule_id,
            is_global: true,
        }
    }

    /// Returns true if the descriptor carries a rule id.
    #[must_use]
    pub fn has_rule_id(&self) -> bool {
        !self.rule_id.is_empty()
    }
}

/// Callback invoked for a node whose type matches its table key.
pub type Handler = fn(&RuleContext<'_>, NodeRef<'_>);

/// A style rule evaluated during the host's traversal.
///
/// Rules are stateless: each handler is a function of the node and its
/// parent. Per-file state (ignore flag, reporter) lives in [`RuleContext`].
///
/// # Example
///
/// ```ignore
/// use solstyle_core::{report_if_not_ignored, Handler, NodeRef, NodeType, Rule, RuleContext, RuleDescriptor};
///
/// pub struct NoEmptyNames;
///
/// const HANDLERS: &[(NodeType, Handler)] = &[(NodeType::ContractDefinition, check_name)];
///
/// fn check_name(ctx: &RuleContext<'_>, node: NodeRef<'_>) {
///     if node.name().is_some_and(str::is_empty) {
///         report_if_not_ignored(ctx, node, "Contracts must be named");
///     }
/// }
///
/// impl Rule for NoEmptyNames {
///     fn descriptor(&self) -> RuleDescriptor { RuleDescriptor::new("no-empty-names") }
///     fn handlers(&self) -> &'static [(NodeType, Handler)] { HANDLERS }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the static identity of this rule kind.
    fn descriptor(&self) -> RuleDescriptor;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the handler table, keyed by node type.
    fn handlers(&self) -> &'static [(NodeType, Handler)];

    /// Looks up the handler for a node type.
    fn handler(&self, node_type: NodeType) -> Option<Handler> {
        self.handlers()
            .iter()
            .find(|(key, _)| *key == node_type)
            .map(|(_, handler)| *handler)
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRule;

    fn on_block(_ctx: &RuleContext<'_>, _node: NodeRef<'_>) {}

    const HANDLERS: &[(NodeType, Handler)] = &[(NodeType::Block, on_block)];

    impl Rule for TestRule {
        fn descriptor(&self) -> RuleDescriptor {
            RuleDescriptor::new("test-rule")
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }
        fn handlers(&self) -> &'static [(NodeType, Handler)] {
            HANDLERS
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.descriptor().rule_id, "test-rule");
        assert!(!rule.descriptor().is_global);
        assert!(rule.handler(NodeType::Block).is_some());
        assert!(rule.handler(NodeType::FunctionDefinition).is_none());
    }

    #[test]
    fn test_descriptor_constructors() {
        assert!(RuleDescriptor::global("g").is_global);
        assert!(!RuleDescriptor::new("").has_rule_id());
    }
}
