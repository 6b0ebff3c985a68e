//! Rule requiring interface names to carry a capital `I` prefix.
//!
//! # Rationale
//!
//! An `I` prefix lets readers tell interfaces apart from the contracts that
//! implement them (`IERC20` vs `ERC20`).
//!
//! Only `ContractDefinition` nodes of kind `interface` are checked. The name
//! must start with `I` followed by another uppercase ASCII letter.

use solstyle_core::{
    report_if_not_ignored, Handler, NodeRef, NodeType, Rule, RuleContext, RuleDescriptor,
};

/// Rule id for interface-names.
pub const NAME: &str = "interface-names";

const MESSAGE: &str = "Interface names should have a capital I prefix";

const HANDLERS: &[(NodeType, Handler)] = &[(NodeType::ContractDefinition, contract_definition)];

/// Requires interface names to start with `I` and an uppercase letter.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterfaceNames;

impl InterfaceNames {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for InterfaceNames {
    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor::new(NAME)
    }

    fn description(&self) -> &'static str {
        "Interface names should have a capital I prefix"
    }

    fn handlers(&self) -> &'static [(NodeType, Handler)] {
        HANDLERS
    }
}

fn contract_definition(ctx: &RuleContext<'_>, node: NodeRef<'_>) {
    let name = node.name().unwrap_or_default();
    if node.kind() == Some("interface") && !has_interface_prefix(name) {
        report_if_not_ignored(ctx, node, MESSAGE);
    }
}

fn has_interface_prefix(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next() == Some('I') && chars.next().is_some_and(|c| c.is_ascii_uppercase())
}
