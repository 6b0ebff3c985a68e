//! The built-in rule set.

use crate::{InterfaceNames, LeadingUnderscore};
use solstyle_core::{RegistryError, RuleBox, RuleRegistry};
use tracing::debug;

/// Returns every built-in rule, in dispatch order.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(InterfaceNames::new()),
        Box::new(LeadingUnderscore::new()),
    ]
}

/// Builds a validated registry holding every built-in rule.
///
/// # Errors
///
/// Returns a [`RegistryError`] if a built-in rule is malformed.
pub fn builtin_registry() -> Result<RuleRegistry, RegistryError> {
    let registry = RuleRegistry::builder().rules(all_rules()).build()?;
    debug!("Built-in registry holds {} rules", registry.len());
    Ok(registry)
}
