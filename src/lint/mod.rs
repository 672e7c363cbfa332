//! Revision-pin linting.
//!
//! This module implements the rule system at the heart of Frostline: the
//! closed set of checks on how a configuration pins its hook repositories,
//! the per-entry state machine that runs them, and the formatters that
//! report what was found.
//!
//! # Overview
//!
//! The lint system consists of:
//!
//! - **Rules** - The closed check inventory and CLI selection sets ([`Rule`], [`RuleSet`])
//! - **Policy** - Which rules run and which fixes apply ([`RulePolicy`])
//! - **Linters** - Per-entry and per-document passes ([`DocumentLinter`])
//! - **Diagnostics** - Issue reports with fix status tracking ([`Diagnostic`])
//!
//! # Example
//!
//! ```
//! use frostline::lint::{Rule, RuleSet};
//!
//! let set = RuleSet::from_codes("fm").unwrap();
//! assert!(set.contains(Rule::ForceFreeze));
//! assert!(!set.contains(Rule::NoAbbrev));
//! ```

pub mod diagnostic;
pub mod document;
pub mod entry;
pub mod output;
pub mod policy;
pub mod revision;
pub mod rule;

pub use diagnostic::{Diagnostic, FixStatus};
pub use document::{DocumentLinter, LintOutcome};
pub use entry::EntryLinter;
pub use output::{Formatter, HumanFormatter, JsonFormatter, OutputFormat, SarifFormatter};
pub use policy::RulePolicy;
pub use rule::{Rule, RuleSet};
