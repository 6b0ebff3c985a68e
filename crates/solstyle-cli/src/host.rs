//! Host side of the rule engine: one traversal per file.

use crate::ast_import;
use anyhow::{Context, Result};
use solstyle_core::{Ast, CollectingReporter, Config, LintResult, NodeRef, RuleRegistry, RuleSet};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Returns the source file a JSON syntax tree was produced from.
///
/// `contracts/Token.sol.json` maps to `contracts/Token.sol`; paths without a
/// `.json` suffix are returned unchanged.
#[must_use]
pub fn source_path(ast_path: &Path) -> PathBuf {
    match ast_path.extension() {
        Some(ext) if ext == "json" => ast_path.with_extension(""),
        _ => ast_path.to_path_buf(),
    }
}

/// Loads a JSON syntax tree and runs every rule over it.
pub fn lint_file(registry: &RuleRegistry, config: &Config, ast_path: &Path) -> Result<LintResult> {
    let ast = ast_import::load_file(ast_path)
        .with_context(|| format!("Failed to import {}", ast_path.display()))?;

    let source_path = source_path(ast_path);
    let source = match std::fs::read_to_string(&source_path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No source next to {}", ast_path.display());
            String::new()
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read source {}", source_path.display()));
        }
    };
    let file_name = source_path.to_string_lossy();

    lint_ast(registry, config, &ast, &source, &file_name)
}

/// Runs every rule over an already imported tree.
pub fn lint_ast(
    registry: &RuleRegistry,
    config: &Config,
    ast: &Ast,
    source: &str,
    file_name: &str,
) -> Result<LintResult> {
    debug!("Checking {} ({} nodes)", file_name, ast.len());

    let reporter = CollectingReporter::new(file_name);
    let rules = registry
        .instantiate(&reporter, config, source, file_name)
        .with_context(|| format!("Failed to set up rules for {file_name}"))?;

    if let Some(root) = ast.root() {
        walk(&rules, root);
    }

    Ok(LintResult {
        violations: reporter.into_violations(),
        files_checked: 1,
    })
}

/// Depth-first, pre-order traversal dispatching each node to the rule set.
fn walk(rules: &RuleSet<'_>, node: NodeRef<'_>) {
    rules.dispatch(node);
    for child in node.children() {
        walk(rules, child);
    }
}
