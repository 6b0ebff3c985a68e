//! Rule registration and per-file dispatch.

use crate::ast::{NodeRef, NodeType};
use crate::config::Config;
use crate::context::{RuleError, RuleInstance};
use crate::reporter::Reporter;
use crate::rule::{Rule, RuleBox};

use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

/// Errors raised while validating rule kinds at registration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A rule kind declares an empty rule id.
    #[error("rule kind ({description:?}) is missing a rule id")]
    MissingRuleId {
        /// Description of the offending rule.
        description: &'static str,
    },

    /// Two rule kinds share a rule id.
    #[error("duplicate rule id '{0}'")]
    DuplicateRuleId(&'static str),

    /// A handler is keyed on a node type the engine cannot dispatch.
    #[error("rule '{0}' registers a handler for an unknown node type")]
    UnknownNodeType(&'static str),

    /// A rule kind registers two handlers for the same node type.
    #[error("rule '{rule_id}' registers more than one handler for {node_type}")]
    DuplicateHandler {
        /// Offending rule id.
        rule_id: &'static str,
        /// Node type with more than one handler.
        node_type: NodeType,
    },
}

/// Builder for a validated [`RuleRegistry`].
#[derive(Default)]
pub struct RuleRegistryBuilder {
    rules: Vec<RuleBox>,
}

impl RuleRegistryBuilder {
    /// Creates a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule kind.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule kind.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rule kinds.
    #[must_use]
    pub fn rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = RuleBox>,
    {
        self.rules.extend(rules);
        self
    }

    /// Validates every rule kind and builds the registry.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegistryError`] found, in registration order.
    pub fn build(self) -> Result<RuleRegistry, RegistryError> {
        let mut seen = HashSet::new();

        for rule in &self.rules {
            validate(&**rule)?;
            let rule_id = rule.descriptor().rule_id;
            if !seen.insert(rule_id) {
                return Err(RegistryError::DuplicateRuleId(rule_id));
            }
            debug!("Registered rule: {}", rule_id);
        }

        Ok(RuleRegistry { rules: self.rules })
    }
}

fn validate(rule: &dyn Rule) -> Result<(), RegistryError> {
    let descriptor = rule.descriptor();
    if !descriptor.has_rule_id() {
        return Err(RegistryError::MissingRuleId {
            description: rule.description(),
        });
    }

    let mut keys = HashSet::new();
    for (node_type, _) in rule.handlers() {
        if *node_type == NodeType::Unknown {
            return Err(RegistryError::UnknownNodeType(descriptor.rule_id));
        }
        if !keys.insert(*node_type) {
            return Err(RegistryError::DuplicateHandler {
                rule_id: descriptor.rule_id,
                node_type: *node_type,
            });
        }
    }

    Ok(())
}

/// Validated set of rule kinds.
///
/// Use [`RuleRegistry::builder()`] to construct an instance.
pub struct RuleRegistry {
    rules: Vec<RuleBox>,
}

impl RuleRegistry {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> RuleRegistryBuilder {
        RuleRegistryBuilder::new()
    }

    /// Returns the number of registered rule kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rule kinds are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over the registered rule kinds in registration order.
    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> + '_ {
        self.rules.iter().map(|rule| &**rule)
    }

    /// Finds a rule kind by id.
    #[must_use]
    pub fn get(&self, rule_id: &str) -> Option<&dyn Rule> {
        self.rules().find(|r| r.descriptor().rule_id == rule_id)
    }

    /// Creates one instance of every rule kind for a file.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleError`] if any rule kind cannot be instantiated.
    pub fn instantiate<'a>(
        &'a self,
        reporter: &'a dyn Reporter,
        config: &'a Config,
        source: &'a str,
        file_name: &'a str,
    ) -> Result<RuleSet<'a>, RuleError> {
        let instances = self
            .rules()
            .map(|rule| RuleInstance::new(rule, reporter, config, source, file_name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RuleSet { instances })
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.rules().map(|r| r.descriptor().rule_id))
            .finish()
    }
}

/// The rule instances for one file.
#[derive(Debug)]
pub struct RuleSet<'a> {
    instances: Vec<RuleInstance<'a>>,
}

impl<'a> RuleSet<'a> {
    /// Returns the instances in registration order.
    #[must_use]
    pub fn instances(&self) -> &[RuleInstance<'a>] {
        &self.instances
    }

    /// Returns the number of instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns true if there are no instances.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Invokes every handler registered for `node`'s type.
    ///
    /// Returns the number of handlers invoked.
    pub fn dispatch(&self, node: NodeRef<'_>) -> usize {
        let mut invoked = 0;
        for instance in &self.instances {
            if instance.visit(node) {
                invoked += 1;
            }
        }
        invoked
    }
}
