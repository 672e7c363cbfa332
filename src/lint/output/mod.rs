//! Lint output formatters.
//!
//! This module provides formatters for outputting lint diagnostics
//! in different formats (human-readable, JSON, SARIF).

pub mod human;
pub mod json;
pub mod sarif;

use std::io::Write;
use std::str::FromStr;

use crate::lint::Diagnostic;

/// Output format for lint results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
    Sarif,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            other => Err(format!(
                "unknown format `{other}` (expected human, json or sarif)"
            )),
        }
    }
}

/// Trait for formatting lint output.
pub trait Formatter {
    /// Format diagnostics to the given writer.
    fn format<W: Write>(&self, diagnostics: &[Diagnostic], writer: &mut W)
        -> std::io::Result<()>;
}

pub use human::HumanFormatter;
pub use json::JsonFormatter;
pub use sarif::SarifFormatter;
