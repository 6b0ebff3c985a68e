//! # solstyle-rules
//!
//! Built-in naming-convention rules for solstyle.
//!
//! ## Available Rules
//!
//! | Name | Checks |
//! |------|--------|
//! | `interface-names` | Interfaces are named with a capital `I` prefix |
//! | `leading-underscore` | Leading underscores on private members, none on constants and library internals |
//!
//! Neither rule is global: both are ignored for files under `test/`.
//!
//! ## Usage
//!
//! ```ignore
//! use solstyle_rules::builtin_registry;
//!
//! let registry = builtin_registry()?;
//! let rules = registry.instantiate(&reporter, &config, source, "contracts/Token.sol")?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod interface_names;
mod leading_underscore;
mod presets;

pub use interface_names::InterfaceNames;
pub use leading_underscore::LeadingUnderscore;
pub use presets::{all_rules, builtin_registry};

/// Re-export core types for convenience.
pub use solstyle_core::{Rule, RuleRegistry, Violation};
