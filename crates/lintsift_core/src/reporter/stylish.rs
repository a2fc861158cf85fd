//! The built-in stylish diagnostic renderer.

use std::io::{self, Write};

use console::style;

use crate::diagnostic::{Diagnostic, Level};

/// Renders diagnostics as an underlined file header, aligned rows, and a
/// colored problem summary. Files without findings produce no output.
pub struct Stylish;

impl super::Report for Stylish {
    fn report(
        &self,
        out: &mut dyn Write,
        path: &str,
        diagnostics: &[Diagnostic],
    ) -> io::Result<()> {
        if diagnostics.is_empty() {
            return Ok(());
        }

        writeln!(out)?;
        writeln!(out, "{}", style(path).underlined())?;
        writeln!(out)?;

        let line_width = diagnostics
            .iter()
            .map(|d| digits(d.line_number))
            .max()
            .unwrap_or(1);

        let mut infos = 0usize;
        let mut warnings = 0usize;
        let mut errors = 0usize;

        for diagnostic in diagnostics {
            // Pad before styling so ANSI codes don't skew the columns.
            let label = match diagnostic.level {
                Level::Info => {
                    infos += 1;
                    style(format!("{:<7}", "info")).cyan()
                }
                Level::Warning => {
                    warnings += 1;
                    style(format!("{:<7}", "warning")).yellow()
                }
                Level::Error => {
                    errors += 1;
                    style(format!("{:<7}", "error")).red()
                }
                Level::Default => style(format!("{:<7}", "default")),
            };

            let line = format!("{:>width$}", diagnostic.line_number, width = line_width);
            writeln!(out, "  {}  {}  {}", style(line).dim(), label, diagnostic.message)?;
        }

        let total = infos + warnings + errors;
        let summary = format!(
            "\u{2716} {} {} ({} {}, {} {}, {} {})",
            total,
            pluralize("problem", total),
            errors,
            pluralize("error", errors),
            warnings,
            pluralize("warning", warnings),
            infos,
            pluralize("info", infos),
        );
        let summary = if errors > 0 {
            style(summary).red().bold()
        } else {
            style(summary).yellow().bold()
        };

        writeln!(out)?;
        writeln!(out, "{summary}")?;
        writeln!(out)
    }
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

fn digits(mut n: u32) -> usize {
    let mut width = 1;
    while n >= 10 {
        n /= 10;
        width += 1;
    }
    width
}
