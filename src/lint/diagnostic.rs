//! Lint diagnostic messages.
//!
//! This module provides the [`Diagnostic`] type for representing issues
//! found on revision pins, with source location tracking for precise
//! reporting, and the [`FixStatus`] each diagnostic ends the run with.

use std::path::{Path, PathBuf};

use super::rule::Rule;

/// Resolution status of a diagnostic at the end of a lint pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixStatus {
    /// A fix existed, was selected, and was applied.
    Fixed,
    /// A fix exists but was not selected or not attempted.
    Fixable,
    /// No fix exists, or the fix attempt failed.
    Error,
}

impl FixStatus {
    /// Upper-case status label used in human output.
    pub fn as_str(self) -> &'static str {
        match self {
            FixStatus::Fixed => "FIXED",
            FixStatus::Fixable => "FIXABLE",
            FixStatus::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for FixStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A diagnostic produced for one revision pin.
///
/// Line and column are 0-based internally; formatters render them 1-based.
/// The line always points at the revision value, while the column may point
/// at either the revision or its trailing annotation depending on the rule.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// File the diagnostic was found in.
    pub file: PathBuf,
    /// 0-based line of the revision value.
    pub line: usize,
    /// 0-based column the rule anchors to.
    pub column: usize,
    /// The rule that produced this diagnostic.
    pub rule: Rule,
    /// Rendered human-readable message.
    pub message: String,
    fixable: bool,
    fixed: bool,
}

impl Diagnostic {
    /// Create a new, not-yet-fixed diagnostic.
    pub fn new(
        file: &Path,
        line: usize,
        column: usize,
        rule: Rule,
        message: impl Into<String>,
        fixable: bool,
    ) -> Self {
        Self {
            file: file.to_path_buf(),
            line,
            column,
            rule,
            message: message.into(),
            fixable,
            fixed: false,
        }
    }

    /// Whether a fix currently exists for this diagnostic.
    pub fn fixable(&self) -> bool {
        self.fixable
    }

    /// Records that the fix was applied.
    pub fn mark_fixed(&mut self) {
        debug_assert!(self.fixable, "only fixable diagnostics can be fixed");
        self.fixed = true;
    }

    /// Withdraws the fix, typically after a failed repair attempt. The
    /// diagnostic degrades to [`FixStatus::Error`] instead of being dropped.
    pub fn clear_fixable(&mut self) {
        debug_assert!(!self.fixed, "a fixed diagnostic cannot be withdrawn");
        self.fixable = false;
    }

    /// Status this diagnostic reports with.
    pub fn status(&self) -> FixStatus {
        if self.fixed {
            FixStatus::Fixed
        } else if self.fixable {
            FixStatus::Fixable
        } else {
            FixStatus::Error
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagnostic(fixable: bool) -> Diagnostic {
        Diagnostic::new(
            Path::new(".pre-commit-config.yaml"),
            4,
            9,
            Rule::ForceFreeze,
            Rule::ForceFreeze.message("main"),
            fixable,
        )
    }

    #[test]
    fn diagnostic_creation() {
        let diag = diagnostic(true);
        assert_eq!(diag.file, PathBuf::from(".pre-commit-config.yaml"));
        assert_eq!(diag.line, 4);
        assert_eq!(diag.column, 9);
        assert_eq!(diag.rule, Rule::ForceFreeze);
        assert_eq!(diag.message, "Unfrozen revision: main");
        assert!(diag.fixable());
    }

    #[test]
    fn unfixable_diagnostic_is_an_error() {
        assert_eq!(diagnostic(false).status(), FixStatus::Error);
    }

    #[test]
    fn fixable_diagnostic_awaits_a_fix() {
        assert_eq!(diagnostic(true).status(), FixStatus::Fixable);
    }

    #[test]
    fn marking_fixed_upgrades_the_status() {
        let mut diag = diagnostic(true);
        diag.mark_fixed();
        assert_eq!(diag.status(), FixStatus::Fixed);
    }

    #[test]
    fn clearing_fixable_degrades_to_error() {
        let mut diag = diagnostic(true);
        diag.clear_fixable();
        assert_eq!(diag.status(), FixStatus::Error);
    }

    #[test]
    fn status_labels() {
        assert_eq!(FixStatus::Fixed.as_str(), "FIXED");
        assert_eq!(FixStatus::Fixable.as_str(), "FIXABLE");
        assert_eq!(FixStatus::Error.to_string(), "ERROR");
    }
}
