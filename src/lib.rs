//! Frostline - Lint and fix revision pins in pre-commit configurations.
//!
//! Frostline checks that the `rev` of every remote repository in a
//! `.pre-commit-config.yaml` is pinned the way you want it: frozen to a
//! full commit hash with a `# frozen: <version>` annotation, or kept on a
//! movable tag or branch without one. Fixes resolve revisions against the
//! remote and rewrite only the affected tokens, leaving the rest of the
//! file byte for byte intact.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`document`] - Configuration parsing and surgical editing
//! - [`error`] - Error types and result aliases
//! - [`git`] - Remote revision resolution
//! - [`lint`] - Rules, diagnostics, and output formatting
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use frostline::lint::revision::{is_abbreviated_hash, is_full_hash};
//!
//! assert!(is_abbreviated_hash("2f035c42"));
//! assert!(is_full_hash("2f035c421f1746ab2f48758db06fa32b5b9324f2"));
//! assert!(!is_full_hash("v24.4.2"));
//! ```
//!
//! For end-to-end checking, see the integration tests.

pub mod cli;
pub mod document;
pub mod error;
pub mod git;
pub mod lint;
pub mod ui;

pub use error::{FrostlineError, Result};
