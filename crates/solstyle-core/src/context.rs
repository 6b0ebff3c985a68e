//! Per-file rule setup and guarded reporting.

use crate::ast::{NodeRef, NodeType};
use crate::config::Config;
use crate::ignore::IgnorePolicy;
use crate::reporter::Reporter;
use crate::rule::{Handler, Rule};
use thiserror::Error;
use tracing::debug;

/// Errors raised when a rule instance cannot be constructed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    /// The rule kind declares an empty rule id.
    #[error("missing rule id on rule kind ({description:?})")]
    MissingRuleId {
        /// Description of the offending rule, for locating it.
        description: &'static str,
    },
}

/// State shared by every handler of one rule instance for one file.
pub struct RuleContext<'a> {
    reporter: &'a dyn Reporter,
    ignored: bool,
    rule_id: &'static str,
    config: &'a Config,
    source: &'a str,
    file_name: &'a str,
}

impl<'a> RuleContext<'a> {
    /// Returns the rule id reported with every violation.
    #[must_use]
    pub fn rule_id(&self) -> &'static str {
        self.rule_id
    }

    /// Returns true if this rule is ignored for the current file.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        self.ignored
    }

    /// Returns the host configuration.
    #[must_use]
    pub fn config(&self) -> &'a Config {
        self.config
    }

    /// Returns the source text of the current file.
    #[must_use]
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Returns the file name as given by the host.
    #[must_use]
    pub fn file_name(&self) -> &'a str {
        self.file_name
    }
}

impl std::fmt::Debug for RuleContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleContext")
            .field("rule_id", &self.rule_id)
            .field("ignored", &self.ignored)
            .field("file_name", &self.file_name)
            .finish_non_exhaustive()
    }
}

/// Forwards a violation to the reporter unless the rule is ignored.
///
/// When the context is ignored this does nothing at all.
pub fn report_if_not_ignored(ctx: &RuleContext<'_>, node: NodeRef<'_>, message: &str) {
    if ctx.ignored {
        return;
    }
    ctx.reporter.error(node, ctx.rule_id, message);
}

/// One rule kind bound to one source file.
pub struct RuleInstance<'a> {
    rule: &'a dyn Rule,
    ctx: RuleContext<'a>,
}

impl<'a> RuleInstance<'a> {
    /// Constructs an instance of `rule` for `file_name`.
    ///
    /// `config` and `source` are kept on the context for rules that need them.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::MissingRuleId`] if the rule kind has no rule id.
    pub fn new(
        rule: &'a dyn Rule,
        reporter: &'a dyn Reporter,
        config: &'a Config,
        source: &'a str,
        file_name: &'a str,
    ) -> Result<Self, RuleError> {
        let descriptor = rule.descriptor();
        if !descriptor.has_rule_id() {
            return Err(RuleError::MissingRuleId {
                description: rule.description(),
            });
        }

        let ignored = IgnorePolicy::builtin().is_ignored(&descriptor, file_name);
        debug!(
            rule = descriptor.rule_id,
            file = file_name,
            ignored,
            "Constructed rule instance"
        );

        Ok(Self {
            rule,
            ctx: RuleContext {
                reporter,
                ignored,
                rule_id: descriptor.rule_id,
                config,
                source,
                file_name,
            },
        })
    }

    /// Returns the rule id.
    #[must_use]
    pub fn rule_id(&self) -> &'static str {
        self.ctx.rule_id
    }

    /// Returns true if this instance is ignored for its file.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        self.ctx.ignored
    }

    /// Returns the context handed to handlers.
    #[must_use]
    pub fn context(&self) -> &RuleContext<'a> {
        &self.ctx
    }

    /// Looks up the handler for a node type.
    #[must_use]
    pub fn handler(&self, node_type: NodeType) -> Option<Handler> {
        self.rule.handler(node_type)
    }

    /// Invokes the handler for `node`'s type, if any.
    ///
    /// Returns true if a handler ran.
    pub fn visit(&self, node: NodeRef<'_>) -> bool {
        match self.handler(node.node_type()) {
            Some(handler) => {
                handler(&self.ctx, node);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for RuleInstance<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleInstance")
            .field("ctx", &self.ctx)
            .finish_non_exhaustive()
    }
}
