//! List rules command implementation.

use anyhow::Result;
use solstyle_rules::builtin_registry;

/// Runs the list-rules command.
pub fn run() -> Result<()> {
    let registry = builtin_registry()?;

    println!("Available rules:\n");
    println!("{:<22} {:<8} Description", "Name", "Global");
    println!("{}", "-".repeat(80));

    for rule in registry.rules() {
        let descriptor = rule.descriptor();
        println!(
            "{:<22} {:<8} {}",
            descriptor.rule_id,
            if descriptor.is_global { "yes" } else { "no" },
            rule.description()
        );
    }

    println!("\nFiles matching these patterns are skipped by non-global rules:");
    for pattern in solstyle_core::IGNORE_PATTERNS {
        println!("  {pattern}");
    }

    Ok(())
}
