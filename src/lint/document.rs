//! Whole-document linting.
//!
//! [`DocumentLinter`] ties the parsed document model to the per-entry rule
//! pass: it parses one configuration file, lints every pinned repository
//! in order, and renders the result back to text. When no fix touched an
//! entry the rendered text is byte-identical to the input, so callers can
//! compare the two to decide whether to write anything.

use std::path::Path;

use super::diagnostic::{Diagnostic, FixStatus};
use super::entry::EntryLinter;
use super::policy::RulePolicy;
use crate::document::Document;
use crate::error::Result;
use crate::git::RemoteResolver;

/// The result of linting one document.
#[derive(Debug)]
pub struct LintOutcome {
    /// The document text after any fixes were applied.
    pub output: String,
    /// Diagnostics in document order.
    pub diagnostics: Vec<Diagnostic>,
}

impl LintOutcome {
    /// Whether every diagnostic was repaired. An empty run is clean too.
    pub fn is_clean(&self) -> bool {
        self.diagnostics
            .iter()
            .all(|diag| diag.status() == FixStatus::Fixed)
    }
}

/// Lints whole configuration documents against one policy and resolver.
pub struct DocumentLinter<'a, R: RemoteResolver + ?Sized> {
    policy: &'a RulePolicy,
    resolver: &'a R,
}

impl<'a, R: RemoteResolver + ?Sized> DocumentLinter<'a, R> {
    pub fn new(policy: &'a RulePolicy, resolver: &'a R) -> Self {
        Self { policy, resolver }
    }

    /// Parses `content` and runs every enabled rule over each pinned
    /// repository it declares.
    pub fn lint(&self, path: &Path, content: &str) -> Result<LintOutcome> {
        let mut document = Document::parse(path, content)?;
        let linter = EntryLinter::new(path, self.policy, self.resolver);
        let mut diagnostics = Vec::new();
        for entry in document.entries_mut() {
            linter.lint(entry, &mut diagnostics);
        }
        Ok(LintOutcome {
            output: document.render(),
            diagnostics,
        })
    }
}
