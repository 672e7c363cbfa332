//! Configuration document data model.
//!
//! Two views of the same file coexist here. [`ConfigFile`] is the typed
//! shape used to validate structure up front; [`RepoEntry`] is the
//! position-annotated working form the linter mutates, carrying enough
//! geometry to splice edits back into the original text.

use serde::Deserialize;

/// Typed shape of a pre-commit style configuration file. Only the parts
/// the linter cares about are modeled; all other keys pass through the
/// document untouched.
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub repos: Vec<RepoSpec>,
}

/// One element of the `repos` sequence.
///
/// `rev` is optional because `repo: local` and `repo: meta` entries pin
/// nothing; such entries are skipped rather than rejected.
#[derive(Debug, Deserialize)]
pub struct RepoSpec {
    pub repo: String,
    pub rev: Option<String>,
}

/// One lintable repository pin, tied to its location in the source text.
///
/// Lines and columns are 0-based. `column` counts characters for
/// diagnostics; the byte extents exist for splicing edits. The URL is
/// never mutated; the revision and annotation are each rewritten at most
/// once per lint pass.
#[derive(Debug, Clone)]
pub struct RepoEntry {
    pub url: String,
    pub rev: String,
    /// Trailing comment on the revision line, trimmed, including the `#`.
    pub annotation: Option<String>,
    pub line: usize,
    pub column: usize,
    pub(crate) rev_span: (usize, usize),
    pub(crate) quote: Option<char>,
    pub(crate) annotation_byte_start: Option<usize>,
    pub(crate) annotation_char_col: Option<usize>,
    pub(crate) rev_changed: bool,
    pub(crate) annotation_changed: bool,
}

impl RepoEntry {
    /// Character column of the annotation's `#`, when one exists.
    pub fn annotation_column(&self) -> Option<usize> {
        self.annotation_char_col
    }

    /// Column a diagnostic about the annotation anchors to: the annotation
    /// itself when present, the revision otherwise.
    pub fn diagnostic_column(&self) -> usize {
        self.annotation_char_col.unwrap_or(self.column)
    }

    /// Replaces the revision value.
    pub(crate) fn set_rev(&mut self, rev: String) {
        debug_assert!(!self.rev_changed, "revision rewritten twice in one pass");
        self.rev = rev;
        self.rev_changed = true;
    }

    /// Replaces or adds the trailing annotation. `text` includes the `#`.
    pub(crate) fn set_annotation(&mut self, text: String) {
        debug_assert!(
            !self.annotation_changed,
            "annotation rewritten twice in one pass"
        );
        self.annotation = Some(text);
        self.annotation_changed = true;
    }

    /// Removes the trailing annotation.
    pub(crate) fn clear_annotation(&mut self) {
        debug_assert!(
            !self.annotation_changed,
            "annotation rewritten twice in one pass"
        );
        self.annotation = None;
        self.annotation_changed = true;
    }

    pub(crate) fn dirty(&self) -> bool {
        self.rev_changed || self.annotation_changed
    }
}
