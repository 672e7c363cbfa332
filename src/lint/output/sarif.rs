//! SARIF output formatter.
//!
//! SARIF (Static Analysis Results Interchange Format) is an OASIS standard
//! for static analysis tools, supported by GitHub, VS Code, and other tools.

use std::io::Write;

use serde::Serialize;

use super::Formatter;
use crate::lint::{Diagnostic, FixStatus, Rule};

/// SARIF version we generate.
const SARIF_VERSION: &str = "2.1.0";
const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";

/// Formats lint output as SARIF.
pub struct SarifFormatter {
    /// Tool name to report.
    pub tool_name: String,
    /// Tool version to report.
    pub tool_version: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLog {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<SarifRun>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifDriver {
    name: String,
    version: String,
    rules: Vec<SarifRule>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRule {
    id: String,
    short_description: SarifMessage,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: String,
    level: &'static str,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLocation {
    physical_location: SarifPhysicalLocation,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifPhysicalLocation {
    artifact_location: SarifArtifactLocation,
    region: SarifRegion,
}

#[derive(Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRegion {
    start_line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_column: Option<usize>,
}

impl SarifFormatter {
    /// Create a new SARIF formatter.
    pub fn new(tool_name: impl Into<String>, tool_version: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            tool_version: tool_version.into(),
        }
    }

    fn status_to_level(status: FixStatus) -> &'static str {
        match status {
            FixStatus::Fixed => "note",
            FixStatus::Fixable => "warning",
            FixStatus::Error => "error",
        }
    }
}

impl Formatter for SarifFormatter {
    fn format<W: Write>(
        &self,
        diagnostics: &[Diagnostic],
        writer: &mut W,
    ) -> std::io::Result<()> {
        // Declare only the rules that actually fired, in code order
        let rules: Vec<_> = Rule::ALL
            .iter()
            .filter(|rule| diagnostics.iter().any(|diag| diag.rule == **rule))
            .map(|rule| SarifRule {
                id: rule.id().to_string(),
                short_description: SarifMessage {
                    text: rule.summary().to_string(),
                },
            })
            .collect();

        let results: Vec<_> = diagnostics
            .iter()
            .map(|diag| {
                let column = diag.column + 1;
                SarifResult {
                    rule_id: diag.rule.id().to_string(),
                    level: Self::status_to_level(diag.status()),
                    message: SarifMessage {
                        text: diag.message.clone(),
                    },
                    locations: vec![SarifLocation {
                        physical_location: SarifPhysicalLocation {
                            artifact_location: SarifArtifactLocation {
                                uri: diag.file.display().to_string(),
                            },
                            region: SarifRegion {
                                start_line: diag.line + 1,
                                start_column: (column > 1).then_some(column),
                            },
                        },
                    }],
                }
            })
            .collect();

        let log = SarifLog {
            schema: SARIF_SCHEMA,
            version: SARIF_VERSION,
            runs: vec![SarifRun {
                tool: SarifTool {
                    driver: SarifDriver {
                        name: self.tool_name.clone(),
                        version: self.tool_version.clone(),
                        rules,
                    },
                },
                results,
            }],
        };

        serde_json::to_writer_pretty(writer, &log).map_err(std::io::Error::other)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn diagnostic(line: usize, column: usize, rule: Rule, fixable: bool) -> Diagnostic {
        Diagnostic::new(
            Path::new("c.yaml"),
            line,
            column,
            rule,
            rule.message("main"),
            fixable,
        )
    }

    fn render(diagnostics: &[Diagnostic]) -> serde_json::Value {
        let formatter = SarifFormatter::new("frostline", "0.3.1");
        let mut output = Vec::new();
        formatter.format(diagnostics, &mut output).unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn produces_valid_sarif() {
        let parsed = render(&[diagnostic(2, 9, Rule::ForceFreeze, true)]);

        assert_eq!(parsed["version"], "2.1.0");
        assert!(parsed["runs"].is_array());
        assert_eq!(parsed["runs"][0]["tool"]["driver"]["name"], "frostline");
    }

    #[test]
    fn maps_status_to_sarif_level() {
        assert_eq!(SarifFormatter::status_to_level(FixStatus::Fixed), "note");
        assert_eq!(
            SarifFormatter::status_to_level(FixStatus::Fixable),
            "warning"
        );
        assert_eq!(SarifFormatter::status_to_level(FixStatus::Error), "error");
    }

    #[test]
    fn declares_each_fired_rule_once() {
        let parsed = render(&[
            diagnostic(2, 9, Rule::ForceFreeze, true),
            diagnostic(4, 9, Rule::ForceFreeze, true),
            diagnostic(6, 9, Rule::NoAbbrev, false),
        ]);

        let rules = parsed["runs"][0]["tool"]["driver"]["rules"]
            .as_array()
            .unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0]["id"], "force-freeze");
        assert_eq!(rules[1]["id"], "no-abbrev");
    }

    #[test]
    fn includes_location_information() {
        let parsed = render(&[diagnostic(2, 9, Rule::ForceFreeze, true)]);

        let location = &parsed["runs"][0]["results"][0]["locations"][0];
        assert_eq!(
            location["physicalLocation"]["artifactLocation"]["uri"],
            "c.yaml"
        );
        assert_eq!(location["physicalLocation"]["region"]["startLine"], 3);
        assert_eq!(location["physicalLocation"]["region"]["startColumn"], 10);
    }

    #[test]
    fn omits_column_one() {
        let parsed = render(&[diagnostic(2, 0, Rule::ForceFreeze, true)]);

        let region = &parsed["runs"][0]["results"][0]["locations"][0]["physicalLocation"]["region"];
        assert!(region["startColumn"].is_null());
    }

    #[test]
    fn levels_follow_fix_status() {
        let mut fixed = diagnostic(2, 9, Rule::ForceFreeze, true);
        fixed.mark_fixed();
        let parsed = render(&[fixed, diagnostic(4, 9, Rule::NoAbbrev, false)]);

        assert_eq!(parsed["runs"][0]["results"][0]["level"], "note");
        assert_eq!(parsed["runs"][0]["results"][1]["level"], "error");
    }
}
