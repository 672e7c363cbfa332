//! Check command implementation.
//!
//! The `frostline check` command lints revision pins in the given
//! configuration files and optionally applies fixes.

use std::fs;
use std::str::FromStr;

use tracing::debug;

use crate::cli::args::CheckArgs;
use crate::error::{FrostlineError, Result};
use crate::git::GitResolver;
use crate::lint::{
    Diagnostic, DocumentLinter, FixStatus, Formatter, HumanFormatter, JsonFormatter, OutputFormat,
    RulePolicy, RuleSet, SarifFormatter,
};
use crate::ui::{should_use_colors, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(args: CheckArgs) -> Self {
        Self { args }
    }

    /// Build the rule policy from the command-line selections.
    fn policy(&self) -> Result<RulePolicy> {
        let enabled = if self.args.all_rules {
            RuleSet::all()
        } else {
            RuleSet::from_codes(&self.args.rules)?
        };
        let fix = if self.args.fix_all {
            RuleSet::all()
        } else {
            RuleSet::from_codes(&self.args.fix)?
        };
        RulePolicy::new(enabled, fix)
    }

    /// Format diagnostics using the appropriate formatter.
    fn format_output(&self, format: OutputFormat, diagnostics: &[Diagnostic]) -> String {
        let mut output = Vec::new();

        match format {
            OutputFormat::Json => {
                let formatter = JsonFormatter::new();
                formatter.format(diagnostics, &mut output).ok();
            }
            OutputFormat::Sarif => {
                let formatter = SarifFormatter::new("frostline", env!("CARGO_PKG_VERSION"));
                formatter.format(diagnostics, &mut output).ok();
            }
            OutputFormat::Human => {
                let formatter = HumanFormatter::new(should_use_colors());
                formatter.format(diagnostics, &mut output).ok();
            }
        }

        String::from_utf8(output).unwrap_or_default()
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let format = match OutputFormat::from_str(&self.args.format) {
            Ok(format) => format,
            Err(message) => {
                ui.error(&message);
                return Ok(CommandResult::failure(2));
            }
        };

        let policy = match self.policy() {
            Ok(policy) => policy,
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(2));
            }
        };

        let resolver = GitResolver::new()?;
        let linter = DocumentLinter::new(&policy, &resolver);

        let mut diagnostics = Vec::new();
        let mut parse_failed = false;

        for file in &self.args.files {
            let content = match fs::read_to_string(file) {
                Ok(content) => content,
                Err(e) => {
                    ui.error(&format!("Failed to read {}: {}", file.display(), e));
                    return Ok(CommandResult::failure(2));
                }
            };

            let outcome = match linter.lint(file, &content) {
                Ok(outcome) => outcome,
                Err(e @ FrostlineError::DocumentParse { .. }) => {
                    ui.error(&e.to_string());
                    parse_failed = true;
                    continue;
                }
                Err(e) => return Err(e),
            };

            debug!(
                "{}: {} diagnostic(s)",
                file.display(),
                outcome.diagnostics.len()
            );

            if self.args.print {
                print!("{}", outcome.output);
            } else if policy.fixes_requested() && outcome.output != content {
                fs::write(file, &outcome.output)?;
            }

            diagnostics.extend(outcome.diagnostics);
        }

        let unfixed = diagnostics
            .iter()
            .any(|diag| diag.status() != FixStatus::Fixed);

        if diagnostics.is_empty() {
            if format == OutputFormat::Human {
                if !parse_failed {
                    ui.success("No issues found");
                }
            } else {
                // For JSON/SARIF, still output the formatted result (empty diagnostics)
                let output = self.format_output(format, &diagnostics);
                ui.message(&output);
            }
        } else {
            let output = self.format_output(format, &diagnostics);

            // For human format, write each line so quiet mode can swallow them
            if format == OutputFormat::Human {
                for line in output.lines() {
                    ui.message(line);
                }
            } else {
                ui.message(&output);
            }
        }

        if parse_failed || unfixed {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}
