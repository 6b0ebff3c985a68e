//! # solstyle-core
//!
//! Core rule engine for style-checking Solidity syntax trees.
//!
//! The host tool owns parsing and traversal. This crate supplies:
//!
//! - [`Ast`] arena with [`NodeRef`] handles and parent links
//! - [`Rule`] trait with a static [`RuleDescriptor`] and a per-node-type handler table
//! - [`RuleInstance`] / [`RuleContext`] for per-file setup and ignore resolution
//! - [`RuleRegistry`] and [`RuleSet`] for validation and dispatch
//! - [`Reporter`] contract plus a [`CollectingReporter`]
//!
//! ## Example
//!
//! ```ignore
//! use solstyle_core::{CollectingReporter, Config, RuleRegistry};
//!
//! let registry = RuleRegistry::builder()
//!     .rule(MyRule)
//!     .build()?;
//!
//! let reporter = CollectingReporter::new("contracts/Token.sol");
//! let rules = registry.instantiate(&reporter, &Config::default(), source, "contracts/Token.sol")?;
//! for node in ast.nodes() {
//!     rules.dispatch(node);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod ast;
mod config;
mod context;
mod ignore;
mod registry;
mod reporter;
mod rule;
mod types;

pub use ast::{Ast, AstError, Node, NodeId, NodeRef, NodeType, Span, Visibility};
pub use config::{Config, ConfigError};
pub use context::{report_if_not_ignored, RuleContext, RuleError, RuleInstance};
pub use ignore::{normalize_path, IgnorePolicy, IGNORE_PATTERNS};
pub use registry::{RegistryError, RuleRegistry, RuleRegistryBuilder, RuleSet};
pub use reporter::{CollectingReporter, Reporter};
pub use rule::{Handler, Rule, RuleBox, RuleDescriptor};
pub use types::{LintResult, Location, Violation, ViolationDiagnostic};
