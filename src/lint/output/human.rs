//! Human-readable output formatter.
//!
//! Formats lint diagnostics for terminal display with optional color support.

use std::io::Write;

use console::style;

use super::Formatter;
use crate::lint::{Diagnostic, FixStatus};

/// Formats lint output for human consumption.
pub struct HumanFormatter {
    /// Whether to use colors (ANSI escape codes).
    pub use_color: bool,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn status_label(&self, status: FixStatus) -> String {
        if !self.use_color {
            return status.as_str().to_string();
        }
        let label = match status {
            FixStatus::Fixed => style(status.as_str()).green(),
            FixStatus::Fixable => style(status.as_str()).yellow(),
            FixStatus::Error => style(status.as_str()).red(),
        };
        label.to_string()
    }
}

impl Formatter for HumanFormatter {
    fn format<W: Write>(
        &self,
        diagnostics: &[Diagnostic],
        writer: &mut W,
    ) -> std::io::Result<()> {
        for diag in diagnostics {
            // STATUS[c] file:line:column message
            writeln!(
                writer,
                "{}[{}] {}:{}:{} {}",
                self.status_label(diag.status()),
                diag.rule.code(),
                diag.file.display(),
                diag.line + 1,
                diag.column + 1,
                diag.message
            )?;
        }

        if !diagnostics.is_empty() {
            writeln!(
                writer,
                "Found {} issue(s): {} fixed, {} fixable, {} unfixable",
                diagnostics.len(),
                count(diagnostics, FixStatus::Fixed),
                count(diagnostics, FixStatus::Fixable),
                count(diagnostics, FixStatus::Error)
            )?;
        }

        Ok(())
    }
}

fn count(diagnostics: &[Diagnostic], status: FixStatus) -> usize {
    diagnostics
        .iter()
        .filter(|diag| diag.status() == status)
        .count()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::lint::Rule;

    fn diagnostic(rule: Rule, fixable: bool) -> Diagnostic {
        Diagnostic::new(
            Path::new("c.yaml"),
            2,
            9,
            rule,
            rule.message("main"),
            fixable,
        )
    }

    fn render(diagnostics: &[Diagnostic]) -> String {
        let formatter = HumanFormatter::new(false);
        let mut output = Vec::new();
        formatter.format(diagnostics, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn lines_carry_status_code_and_one_based_position() {
        let output = render(&[diagnostic(Rule::ForceFreeze, true)]);
        assert!(output.contains("FIXABLE[f] c.yaml:3:10 Unfrozen revision: main"));
    }

    #[test]
    fn fixed_diagnostics_are_labelled_fixed() {
        let mut diag = diagnostic(Rule::ForceFreeze, true);
        diag.mark_fixed();
        let output = render(&[diag]);
        assert!(output.contains("FIXED[f]"));
    }

    #[test]
    fn unfixable_diagnostics_are_labelled_error() {
        let output = render(&[diagnostic(Rule::NoAbbrev, false)]);
        assert!(output.contains("ERROR[a]"));
    }

    #[test]
    fn summary_counts_every_status() {
        let mut fixed = diagnostic(Rule::ForceFreeze, true);
        fixed.mark_fixed();
        let output = render(&[
            fixed,
            diagnostic(Rule::MissingFrozenComment, true),
            diagnostic(Rule::NoAbbrev, false),
        ]);
        assert!(output.contains("Found 3 issue(s): 1 fixed, 1 fixable, 1 unfixable"));
    }

    #[test]
    fn no_summary_when_no_issues() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn plain_output_has_no_escape_codes() {
        let output = render(&[diagnostic(Rule::ForceFreeze, true)]);
        assert!(!output.contains('\u{1b}'));
    }
}
