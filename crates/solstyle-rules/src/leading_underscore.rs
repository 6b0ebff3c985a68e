//! Rule enforcing leading-underscore conventions on variables and functions.
//!
//! # Rationale
//!
//! A leading underscore marks members that are not part of a contract's
//! external surface. Constants and library internals are the exceptions:
//! they are referenced by name from other code and stay unprefixed.
//!
//! # Checks
//!
//! - Constant variables must not start with `_`.
//! - Non-constant `private` variables must start with `_`.
//! - `private` functions, and `internal` functions outside a library, must start with `_`.
//! - `internal` functions inside a library must not start with `_`.

use solstyle_core::{
    report_if_not_ignored, Handler, NodeRef, NodeType, Rule, RuleContext, RuleDescriptor,
    Visibility,
};

/// Rule id for leading-underscore.
pub const NAME: &str = "leading-underscore";

const CONSTANT_MESSAGE: &str = "Constant variables should not have leading underscore";
const PRIVATE_VARIABLE_MESSAGE: &str =
    "Non-constant private variables must have leading underscore";
const PRIVATE_FUNCTION_MESSAGE: &str =
    "Private and internal functions must have leading underscore";
const LIBRARY_FUNCTION_MESSAGE: &str =
    "Library internal functions should not have leading underscore";

const HANDLERS: &[(NodeType, Handler)] = &[
    (NodeType::VariableDeclaration, variable_declaration),
    (NodeType::FunctionDefinition, function_definition),
];

/// Enforces leading underscores on private members and forbids them on constants.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadingUnderscore;

impl LeadingUnderscore {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for LeadingUnderscore {
    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor::new(NAME)
    }

    fn description(&self) -> &'static str {
        "Private members need a leading underscore, constants and library internals must not have one"
    }

    fn handlers(&self) -> &'static [(NodeType, Handler)] {
        HANDLERS
    }
}

fn has_leading_underscore(node: NodeRef<'_>) -> bool {
    node.name().unwrap_or_default().starts_with('_')
}

fn variable_declaration(ctx: &RuleContext<'_>, node: NodeRef<'_>) {
    if node.is_declared_const() {
        if has_leading_underscore(node) {
            report_if_not_ignored(ctx, node, CONSTANT_MESSAGE);
        }
    } else if node.visibility() == Some(Visibility::Private) && !has_leading_underscore(node) {
        report_if_not_ignored(ctx, node, PRIVATE_VARIABLE_MESSAGE);
    }
}

fn function_definition(ctx: &RuleContext<'_>, node: NodeRef<'_>) {
    let visibility = node.visibility();
    let in_library = node.parent().and_then(NodeRef::kind) == Some("library");

    if (visibility == Some(Visibility::Private)
        || (visibility == Some(Visibility::Internal) && !in_library))
        && !has_leading_underscore(node)
    {
        report_if_not_ignored(ctx, node, PRIVATE_FUNCTION_MESSAGE);
    }

    // Evaluated separately from the check above, not as an else branch.
    if visibility == Some(Visibility::Internal) && in_library && has_leading_underscore(node) {
        report_if_not_ignored(ctx, node, LIBRARY_FUNCTION_MESSAGE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solstyle_core::{Ast, CollectingReporter, Config, Node, RuleInstance, Violation};

    fn run(ast: &Ast, file: &str) -> Vec<Violation> {
        let config = Config::default();
        let reporter = CollectingReporter::new(file);
        let rule = LeadingUnderscore::new();
        let instance = RuleInstance::new(&rule, &reporter, &config, "", file).unwrap();
        for node in ast.nodes() {
            instance.visit(node);
        }
        reporter.into_violations()
    }

    fn variable(name: &str, visibility: Visibility, is_const: bool) -> Vec<Violation> {
        let mut ast = Ast::new();
        let contract = ast.push_root(Node::new(NodeType::ContractDefinition).with_kind("contract"));
        let state = ast
            .push_child(contract, Node::new(NodeType::StateVariableDeclaration))
            .unwrap();
        ast.push_child(
            state,
            Node::new(NodeType::VariableDeclaration)
                .with_name(name)
                .with_visibility(visibility)
                .with_const(is_const),
        )
        .unwrap();
        run(&ast, "contracts/Token.sol")
    }

    fn function(name: &str, visibility: Visibility, parent_kind: &str) -> Vec<Violation> {
        let mut ast = Ast::new();
        let parent = ast.push_root(Node::new(NodeType::ContractDefinition).with_kind(parent_kind));
        ast.push_child(
            parent,
            Node::new(NodeType::FunctionDefinition)
                .with_name(name)
                .with_visibility(visibility),
        )
        .unwrap();
        run(&ast, "contracts/Token.sol")
    }

    fn messages(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.message.as_str()).collect()
    }

    #[test]
    fn test_constant_with_underscore() {
        let violations = variable("_X", Visibility::Default, true);
        assert_eq!(messages(&violations), vec![CONSTANT_MESSAGE]);
        assert_eq!(violations[0].node_type, "VariableDeclaration");
    }

    #[test]
    fn test_constant_without_underscore() {
        assert!(variable("X", Visibility::Default, true).is_empty());
        assert!(variable("X", Visibility::Private, true).is_empty());
    }

    #[test]
    fn test_private_variable_without_underscore() {
        let violations = variable("x", Visibility::Private, false);
        assert_eq!(messages(&violations), vec![PRIVATE_VARIABLE_MESSAGE]);
    }

    #[test]
    fn test_private_variable_with_underscore() {
        assert!(variable("_x", Visibility::Private, false).is_empty());
    }

    #[test]
    fn test_other_variable_visibilities_unchecked() {
        assert!(variable("x", Visibility::Public, false).is_empty());
        assert!(variable("x", Visibility::Internal, false).is_empty());
        assert!(variable("_x", Visibility::Public, false).is_empty());
        assert!(variable("x", Visibility::Default, false).is_empty());
    }

    #[test]
    fn test_library_internal_with_underscore() {
        let violations = function("_f", Visibility::Internal, "library");
        assert_eq!(messages(&violations), vec![LIBRARY_FUNCTION_MESSAGE]);
    }

    #[test]
    fn test_library_internal_without_underscore() {
        assert!(function("f", Visibility::Internal, "library").is_empty());
    }

    #[test]
    fn test_contract_internal_without_underscore() {
        let violations = function("f", Visibility::Internal, "contract");
        assert_eq!(messages(&violations), vec![PRIVATE_FUNCTION_MESSAGE]);
    }

    #[test]
    fn test_private_function() {
        assert_eq!(
            messages(&function("f", Visibility::Private, "contract")),
            vec![PRIVATE_FUNCTION_MESSAGE]
        );
        assert_eq!(
            messages(&function("f", Visibility::Private, "library")),
            vec![PRIVATE_FUNCTION_MESSAGE]
        );
        assert!(function("_f", Visibility::Private, "library").is_empty());
        assert!(function("_f", Visibility::Internal, "contract").is_empty());
    }

    #[test]
    fn test_public_and_external_functions_unchecked() {
        assert!(function("f", Visibility::Public, "contract").is_empty());
        assert!(function("_f", Visibility::External, "library").is_empty());
        assert!(function("f", Visibility::Default, "contract").is_empty());
    }

    #[test]
    fn test_function_without_parent_is_not_in_library() {
        let mut ast = Ast::new();
        ast.push_root(
            Node::new(NodeType::FunctionDefinition)
                .with_name("f")
                .with_visibility(Visibility::Internal),
        );
        let violations = run(&ast, "contracts/free.sol");
        assert_eq!(messages(&violations), vec![PRIVATE_FUNCTION_MESSAGE]);
    }

    #[test]
    fn test_ignored_in_test_directory() {
        let mut ast = Ast::new();
        let parent = ast.push_root(Node::new(NodeType::ContractDefinition).with_kind("contract"));
        ast.push_child(
            parent,
            Node::new(NodeType::FunctionDefinition)
                .with_name("f")
                .with_visibility(Visibility::Private),
        )
        .unwrap();
        assert!(run(&ast, "test/Token.t.sol").is_empty());
    }

    #[test]
    fn test_same_node_twice_reports_twice() {
        let mut ast = Ast::new();
        let parent = ast.push_root(Node::new(NodeType::ContractDefinition).with_kind("contract"));
        let id = ast
            .push_child(
                parent,
                Node::new(NodeType::FunctionDefinition)
                    .with_name("f")
                    .with_visibility(Visibility::Private),
            )
            .unwrap();

        let config = Config::default();
        let rule = LeadingUnderscore::new();
        let counts: Vec<usize> = (0..2)
            .map(|_| {
                let reporter = CollectingReporter::new("contracts/Token.sol");
                let instance =
                    RuleInstance::new(&rule, &reporter, &config, "", "contracts/Token.sol")
                        .unwrap();
                instance.visit(ast.get(id).unwrap());
                instance.visit(ast.get(id).unwrap());
                reporter.len()
            })
            .collect();
        assert_eq!(counts, vec![2, 2]);
    }
}
