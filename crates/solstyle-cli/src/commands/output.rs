//! Shared output formatting for lint results.

use anyhow::Result;
use miette::{NamedSource, Report};
use solstyle_core::{LintResult, Violation, ViolationDiagnostic};
use std::collections::HashMap;
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(result)),
        OutputFormat::Json => println!("{}", render_json(result)?),
        OutputFormat::Compact => print!("{}", render_compact(result)),
        OutputFormat::Pretty => print_pretty(result),
    }
    Ok(())
}

fn render_text(result: &LintResult) -> String {
    let mut out = String::new();

    for violation in &result.violations {
        out.push_str(&format!(
            "{} at {}:{}:{}\n",
            violation.rule,
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
        ));
        out.push_str(&format!(
            "  \x1b[31merror\x1b[0m: {}\n\n",
            violation.message
        ));
    }

    let summary_color = if result.has_violations() {
        "\x1b[31m"
    } else {
        "\x1b[32m"
    };
    out.push_str(&format!("{summary_color}{}\x1b[0m\n", result.summary()));
    for (rule, count) in result.count_by_rule() {
        out.push_str(&format!("  {rule}: {count}\n"));
    }
    out
}

fn render_json(result: &LintResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

fn render_compact(result: &LintResult) -> String {
    result
        .violations
        .iter()
        .map(|v| format!("{v}\n"))
        .collect()
}

fn print_pretty(result: &LintResult) {
    let mut sources: HashMap<&Path, Option<String>> = HashMap::new();

    for violation in &result.violations {
        let file = violation.location.file.as_path();
        let source = sources
            .entry(file)
            .or_insert_with(|| std::fs::read_to_string(file).ok());
        eprintln!("{:?}", diagnostic(violation, source.as_deref()));
    }

    println!("{}", result.summary());
}

/// Builds a rich diagnostic, attaching the source only when the span fits in it.
///
/// Parser ranges count characters, so the span is mapped onto byte offsets
/// before miette sees it.
fn diagnostic(violation: &Violation, source: Option<&str>) -> Report {
    let location = &violation.location;
    let snippet = source.filter(|_| location.length > 0).and_then(|text| {
        byte_range(text, location.offset, location.length).map(|range| (text, range))
    });

    match snippet {
        Some((text, (offset, length))) => {
            let mut located = violation.clone();
            located.location = located.location.with_span(offset, length);
            Report::new(ViolationDiagnostic::from(&located)).with_source_code(NamedSource::new(
                location.file.display().to_string(),
                text.to_string(),
            ))
        }
        None => Report::new(ViolationDiagnostic::from(violation)),
    }
}

/// Maps a span of `length` characters starting at character `offset` onto
/// byte offsets in `text`. Returns `None` when the span runs past the end.
fn byte_range(text: &str, offset: usize, length: usize) -> Option<(usize, usize)> {
    let mut boundaries = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()));
    let start = boundaries.nth(offset)?;
    let end = match length {
        0 => start,
        n => boundaries.nth(n - 1)?,
    };
    Some((start, end - start))
}
