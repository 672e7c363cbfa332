//! Lint rule definitions.
//!
//! The rule inventory is a closed set: every check Frostline performs on a
//! revision pin is one of the [`Rule`] variants below. Each rule has a
//! single-character code used on the command line (`--rules fm`) and a
//! kebab-case identifier used in structured output.

use crate::error::{FrostlineError, Result};

/// A revision-pin lint rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Revision is not frozen to a commit hash.
    ForceFreeze,
    /// Abbreviated hashes are forbidden.
    NoAbbrev,
    /// Frozen revisions are forbidden.
    ForceUnfreeze,
    /// Frozen revision lacks a comment naming the version it was frozen from.
    MissingFrozenComment,
    /// Comment claims a frozen revision but the rev is not frozen.
    ExcessFrozenComment,
    /// Comment names a version that does not match the frozen revision.
    CheckCommentedTag,
}

impl Rule {
    /// Every rule, in diagnostic-code order.
    pub const ALL: [Rule; 6] = [
        Rule::ForceFreeze,
        Rule::NoAbbrev,
        Rule::ForceUnfreeze,
        Rule::MissingFrozenComment,
        Rule::ExcessFrozenComment,
        Rule::CheckCommentedTag,
    ];

    /// Single-character code used for CLI selection and human output.
    pub fn code(self) -> char {
        match self {
            Rule::ForceFreeze => 'f',
            Rule::NoAbbrev => 'a',
            Rule::ForceUnfreeze => 'u',
            Rule::MissingFrozenComment => 'm',
            Rule::ExcessFrozenComment => 'e',
            Rule::CheckCommentedTag => 't',
        }
    }

    /// Kebab-case identifier used in JSON and SARIF output.
    pub fn id(self) -> &'static str {
        match self {
            Rule::ForceFreeze => "force-freeze",
            Rule::NoAbbrev => "no-abbrev",
            Rule::ForceUnfreeze => "force-unfreeze",
            Rule::MissingFrozenComment => "missing-frozen-comment",
            Rule::ExcessFrozenComment => "excess-frozen-comment",
            Rule::CheckCommentedTag => "check-commented-tag",
        }
    }

    /// One line summary of what the rule enforces.
    pub fn summary(self) -> &'static str {
        match self {
            Rule::ForceFreeze => "Revisions must be frozen to a full commit hash",
            Rule::NoAbbrev => "Abbreviated commit hashes are forbidden",
            Rule::ForceUnfreeze => "Frozen revisions are forbidden",
            Rule::MissingFrozenComment => {
                "Frozen revisions must carry a comment naming the frozen version"
            }
            Rule::ExcessFrozenComment => {
                "Comments must not claim a frozen revision when the rev is not frozen"
            }
            Rule::CheckCommentedTag => {
                "The commented version must match a tag on the frozen revision"
            }
        }
    }

    /// Renders the diagnostic message for the rule. `subject` is the one
    /// value each message template interpolates (the offending revision,
    /// comment text, or commented version).
    pub fn message(self, subject: &str) -> String {
        match self {
            Rule::ForceFreeze => format!("Unfrozen revision: {subject}"),
            Rule::NoAbbrev => format!("An abbreviated hash is specified for rev: {subject}"),
            Rule::ForceUnfreeze => format!("Frozen revision: {subject}"),
            Rule::MissingFrozenComment => "Missing comment specifying frozen version".to_string(),
            Rule::ExcessFrozenComment => {
                format!("Although rev isn't frozen the comment says so: {subject}")
            }
            Rule::CheckCommentedTag => format!("Tag doesn't match frozen rev: {subject}"),
        }
    }

    /// Looks a rule up by its single-character code.
    pub fn from_code(code: char) -> Option<Rule> {
        Rule::ALL.iter().copied().find(|rule| rule.code() == code)
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// A set of rules, as selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuleSet {
    bits: u8,
}

impl RuleSet {
    /// The empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The set containing every rule.
    pub fn all() -> Self {
        let mut set = Self::empty();
        for rule in Rule::ALL {
            set.insert(rule);
        }
        set
    }

    /// Parses a string of single-character codes, e.g. `"fmt"`. Duplicate
    /// codes are allowed; unknown codes are an error.
    pub fn from_codes(codes: &str) -> Result<Self> {
        let mut set = Self::empty();
        for code in codes.chars() {
            match Rule::from_code(code) {
                Some(rule) => set.insert(rule),
                None => {
                    return Err(FrostlineError::RuleSelection {
                        message: format!(
                            "unknown rule code `{code}` (valid codes: {})",
                            Self::valid_codes()
                        ),
                    })
                }
            }
        }
        Ok(set)
    }

    /// Adds a rule to the set.
    pub fn insert(&mut self, rule: Rule) {
        self.bits |= Self::bit(rule);
    }

    /// Returns true when the set contains `rule`.
    pub fn contains(self, rule: Rule) -> bool {
        self.bits & Self::bit(rule) != 0
    }

    /// Returns true when no rules are selected.
    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Iterates the selected rules in code order.
    pub fn iter(self) -> impl Iterator<Item = Rule> {
        Rule::ALL.into_iter().filter(move |rule| self.contains(*rule))
    }

    fn bit(rule: Rule) -> u8 {
        1 << Rule::ALL
            .iter()
            .position(|r| *r == rule)
            .unwrap_or_default()
    }

    fn valid_codes() -> String {
        Rule::ALL.iter().map(|rule| rule.code()).collect()
    }
}
