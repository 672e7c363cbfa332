//! JSON output formatter.
//!
//! Formats lint diagnostics as machine-readable JSON for tooling integration.

use std::io::Write;

use serde::Serialize;

use super::Formatter;
use crate::lint::{Diagnostic, FixStatus};

/// Formats lint output as JSON.
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput {
    diagnostics: Vec<JsonDiagnostic>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonDiagnostic {
    file: String,
    line: usize,
    column: usize,
    code: char,
    rule: String,
    status: String,
    message: String,
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    fixed: usize,
    fixable: usize,
    errors: usize,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for JsonFormatter {
    fn format<W: Write>(
        &self,
        diagnostics: &[Diagnostic],
        writer: &mut W,
    ) -> std::io::Result<()> {
        let json_diagnostics: Vec<_> = diagnostics
            .iter()
            .map(|diag| JsonDiagnostic {
                file: diag.file.display().to_string(),
                line: diag.line + 1,
                column: diag.column + 1,
                code: diag.rule.code(),
                rule: diag.rule.id().to_string(),
                status: diag.status().as_str().to_string(),
                message: diag.message.clone(),
            })
            .collect();

        let count = |status: FixStatus| {
            diagnostics
                .iter()
                .filter(|diag| diag.status() == status)
                .count()
        };
        let summary = JsonSummary {
            total: diagnostics.len(),
            fixed: count(FixStatus::Fixed),
            fixable: count(FixStatus::Fixable),
            errors: count(FixStatus::Error),
        };

        let output = JsonOutput {
            diagnostics: json_diagnostics,
            summary,
        };

        serde_json::to_writer_pretty(writer, &output).map_err(std::io::Error::other)?;

        Ok(())
    }
}
