//! Configuration document handling.
//!
//! Parses `.pre-commit-config.yaml` style documents into position-aware
//! repository entries and serializes them back with formatting preserved:
//!
//! - [`model`] - Typed document shape and the mutable [`RepoEntry`]
//! - [`parser`] - Two-phase parse recovering source positions
//! - [`editor`] - Byte-level splicing of fixes into the original text

pub mod editor;
pub mod model;
pub mod parser;

pub use model::{ConfigFile, RepoEntry, RepoSpec};
pub use parser::Document;
