//! Check command implementation.

use anyhow::{Context, Result};
use solstyle_core::LintResult;
use solstyle_rules::builtin_registry;
use std::path::PathBuf;

use crate::config_resolver::ConfigSource;
use crate::host;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(paths: &[PathBuf], format: OutputFormat, source: &ConfigSource) -> Result<()> {
    let config = source.load()?;
    if let Some(p) = source.path() {
        tracing::debug!("Using config: {}", p.display());
    }

    let registry = builtin_registry().context("Failed to build rule registry")?;
    tracing::info!(
        "Checking {} file(s) with {} rules",
        paths.len(),
        registry.len()
    );

    let mut result = LintResult::new();
    for path in paths {
        result.extend(host::lint_file(&registry, &config, path)?);
    }
    result.sort();

    super::output::print(&result, format)?;

    if result.has_violations() {
        std::process::exit(1);
    }

    Ok(())
}
