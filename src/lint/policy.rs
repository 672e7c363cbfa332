//! Rule enablement and fix selection.
//!
//! A [`RulePolicy`] captures which rules run and which of their fixes may
//! be applied for one invocation. It is validated once at construction,
//! before any entry is linted.

use super::diagnostic::Diagnostic;
use super::rule::{Rule, RuleSet};
use crate::error::{FrostlineError, Result};

/// Rule pairs that contradict each other when enabled together.
const EXCLUSIVE_RULES: [[Rule; 2]; 1] = [[Rule::ForceFreeze, Rule::ForceUnfreeze]];

/// The enabled-rule and fix-rule selections for one lint run.
#[derive(Debug, Clone, Copy)]
pub struct RulePolicy {
    enabled: RuleSet,
    fix: RuleSet,
}

impl RulePolicy {
    /// Builds a policy, rejecting contradictory selections. Demanding both
    /// frozen and unfrozen revisions at once is a configuration error, not
    /// something to report per entry.
    pub fn new(enabled: RuleSet, fix: RuleSet) -> Result<Self> {
        for pair in EXCLUSIVE_RULES {
            if pair.iter().all(|rule| enabled.contains(*rule)) {
                let codes: String = pair.iter().map(|rule| rule.code()).collect();
                return Err(FrostlineError::RuleSelection {
                    message: format!("Mutually exclusive rules `{codes}` specified"),
                });
            }
        }
        Ok(Self { enabled, fix })
    }

    /// Whether `rule` should run at all.
    pub fn is_enabled(&self, rule: Rule) -> bool {
        self.enabled.contains(rule)
    }

    /// Whether fixes for `rule` were requested. A fix request for a rule
    /// that is not enabled is inert.
    pub fn wants_fix(&self, rule: Rule) -> bool {
        self.is_enabled(rule) && self.fix.contains(rule)
    }

    /// Whether `diagnostic` should be repaired now: it must carry a fix and
    /// its rule must be both enabled and selected for fixing.
    pub fn should_fix(&self, diagnostic: &Diagnostic) -> bool {
        diagnostic.fixable() && self.wants_fix(diagnostic.rule)
    }

    /// Whether any fix was requested at all.
    pub fn fixes_requested(&self) -> bool {
        !self.fix.is_empty()
    }
}
