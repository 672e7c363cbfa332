//! Error types for Frostline operations.
//!
//! This module defines [`FrostlineError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `FrostlineError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `FrostlineError::Other`) for unexpected errors
//! - Remote resolution failures keep their own type ([`ResolutionError`]) so
//!   the lint pass can recover from them per diagnostic instead of aborting

use std::path::PathBuf;
use thiserror::Error;

use crate::git::ResolutionError;

/// Core error type for Frostline operations.
#[derive(Debug, Error)]
pub enum FrostlineError {
    /// An invalid rule or fix selection was given on the command line.
    #[error("Invalid rule selection: {message}")]
    RuleSelection { message: String },

    /// Failed to parse a configuration document.
    #[error("Failed to parse {path}: {message}")]
    DocumentParse { path: PathBuf, message: String },

    /// A remote revision query failed.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error wrapper for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience Result type alias using [`FrostlineError`].
pub type Result<T> = std::result::Result<T, FrostlineError>;
