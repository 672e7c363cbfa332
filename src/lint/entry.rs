//! Per-entry linting.
//!
//! [`EntryLinter`] runs the rule set over one repository pin. The pass
//! classifies the revision, parses the trailing annotation, then walks a
//! fixed sequence of checks, emitting diagnostics in encounter order and
//! applying selected fixes to the entry in place. A successful unfreeze
//! fix reclassifies the entry as tag-pinned, so the remaining checks see
//! the entry as it now is, not as it was read.

use std::path::Path;

use tracing::warn;

use super::diagnostic::Diagnostic;
use super::policy::RulePolicy;
use super::revision::{
    frozen_annotation, is_abbreviated_hash, is_full_hash, note_annotation, parse_frozen_comment,
};
use super::rule::Rule;
use crate::document::RepoEntry;
use crate::git::RemoteResolver;

/// Lints single repository entries against one policy and resolver.
pub struct EntryLinter<'a, R: RemoteResolver + ?Sized> {
    file: &'a Path,
    policy: &'a RulePolicy,
    resolver: &'a R,
}

impl<'a, R: RemoteResolver + ?Sized> EntryLinter<'a, R> {
    pub fn new(file: &'a Path, policy: &'a RulePolicy, resolver: &'a R) -> Self {
        Self {
            file,
            policy,
            resolver,
        }
    }

    /// Lints `entry`, pushing diagnostics onto `sink` and applying any
    /// selected fixes in place.
    pub fn lint(&self, entry: &mut RepoEntry, sink: &mut Vec<Diagnostic>) {
        let spec = entry.rev.clone();
        let mut abbreviated = is_abbreviated_hash(&spec);
        let mut full = is_full_hash(&spec);

        // The version the annotation claims the pin was frozen from, plus
        // any free-form note. A comment that misses the grammar entirely is
        // all note.
        let (comment_rev, note) = match entry.annotation.as_deref() {
            None => (None, String::new()),
            Some(text) => match parse_frozen_comment(text) {
                Some(parsed) => (parsed.rev, parsed.note),
                None => (None, text.to_string()),
            },
        };

        if abbreviated && self.policy.is_enabled(Rule::NoAbbrev) {
            sink.push(self.diagnostic(entry, Rule::NoAbbrev, entry.column, false, &spec));
        }

        if (abbreviated || full) && self.policy.is_enabled(Rule::ForceUnfreeze) {
            // Only a full hash can be traded for a tag directly; an
            // abbreviated one would have to be resolved first, so it is
            // never auto-unfrozen
            let mut diag = self.diagnostic(entry, Rule::ForceUnfreeze, entry.column, full, &spec);
            if self.policy.should_fix(&diag) {
                match self.resolver.select_best_tag(&entry.url, &spec) {
                    Ok(Some(tag)) => {
                        entry.set_rev(tag);
                        diag.mark_fixed();
                        // Now tag-pinned: the frozen-only checks below no
                        // longer apply
                        abbreviated = false;
                        full = false;
                    }
                    Ok(None) => diag.clear_fixable(),
                    Err(err) => {
                        warn!("Could not unfreeze {} at {}: {}", spec, entry.url, err);
                        diag.clear_fixable();
                    }
                }
            }
            sink.push(diag);
        }

        if abbreviated || full {
            self.lint_frozen(entry, sink, &spec, full, comment_rev.as_deref(), &note);
        } else {
            self.lint_unfrozen(entry, sink, &spec, comment_rev.is_some(), &note);
        }
    }

    /// Checks that apply while the revision is a (possibly abbreviated)
    /// commit hash: the annotation must exist and must name a tag that
    /// actually sits at the pinned commit.
    fn lint_frozen(
        &self,
        entry: &mut RepoEntry,
        sink: &mut Vec<Diagnostic>,
        spec: &str,
        full: bool,
        comment_rev: Option<&str>,
        note: &str,
    ) {
        let Some(commented) = comment_rev else {
            if self.policy.is_enabled(Rule::MissingFrozenComment) {
                // Fixable only with a full hash, which could be looked up.
                // No repair is performed here though: synthesizing the
                // annotation is left to the freeze fixes, so this stays
                // FIXABLE even when selected
                sink.push(self.diagnostic(
                    entry,
                    Rule::MissingFrozenComment,
                    entry.diagnostic_column(),
                    full,
                    "",
                ));
            }
            return;
        };

        if !full || !self.policy.is_enabled(Rule::CheckCommentedTag) {
            return;
        }

        let tags = match self.resolver.tags_near(&entry.url, spec) {
            Ok(tags) => tags,
            Err(err) => {
                warn!("Skipping tag check for {} at {}: {}", spec, entry.url, err);
                return;
            }
        };
        if tags.iter().any(|tag| tag == commented) {
            return;
        }

        let mut diag = self.diagnostic(
            entry,
            Rule::CheckCommentedTag,
            entry.diagnostic_column(),
            true,
            commented,
        );
        if self.policy.should_fix(&diag) {
            match self.resolver.select_best_tag(&entry.url, spec) {
                Ok(Some(tag)) => {
                    entry.set_annotation(frozen_annotation(&tag, note));
                    diag.mark_fixed();
                }
                Ok(None) => diag.clear_fixable(),
                Err(err) => {
                    warn!(
                        "Could not rewrite annotation for {} at {}: {}",
                        spec, entry.url, err
                    );
                    diag.clear_fixable();
                }
            }
        }
        sink.push(diag);
    }

    /// Checks that apply to a tag- or branch-pinned revision: freeze it if
    /// demanded, otherwise clean up an annotation that wrongly claims it
    /// is frozen.
    fn lint_unfrozen(
        &self,
        entry: &mut RepoEntry,
        sink: &mut Vec<Diagnostic>,
        spec: &str,
        has_comment_rev: bool,
        note: &str,
    ) {
        if self.policy.is_enabled(Rule::ForceFreeze) {
            let mut diag = self.diagnostic(entry, Rule::ForceFreeze, entry.column, true, spec);
            if self.policy.should_fix(&diag) {
                match self.resolver.resolve_to_commit(&entry.url, spec) {
                    Ok(commit) => {
                        // The annotation records the specifier as written,
                        // not the commit it resolved to
                        entry.set_rev(commit);
                        entry.set_annotation(frozen_annotation(spec, note));
                        diag.mark_fixed();
                    }
                    Err(err) => {
                        warn!("Could not freeze {} at {}: {}", spec, entry.url, err);
                        diag.clear_fixable();
                    }
                }
            }
            sink.push(diag);
        } else if has_comment_rev && self.policy.is_enabled(Rule::ExcessFrozenComment) {
            let text = entry.annotation.clone().unwrap_or_default();
            let mut diag = self.diagnostic(
                entry,
                Rule::ExcessFrozenComment,
                entry.diagnostic_column(),
                true,
                &text,
            );
            if self.policy.should_fix(&diag) {
                if note.is_empty() {
                    entry.clear_annotation();
                } else {
                    entry.set_annotation(note_annotation(note));
                }
                diag.mark_fixed();
            }
            sink.push(diag);
        }
    }

    fn diagnostic(
        &self,
        entry: &RepoEntry,
        rule: Rule,
        column: usize,
        fixable: bool,
        subject: &str,
    ) -> Diagnostic {
        Diagnostic::new(
            self.file,
            entry.line,
            column,
            rule,
            rule.message(subject),
            fixable,
        )
    }
}
