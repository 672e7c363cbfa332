//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Frostline - Lint and fix revision pins in pre-commit configurations.
#[derive(Debug, Parser)]
#[command(name = "frostline")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check revision pins in configuration files
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CheckArgs {
    /// Rules to enable, as single-character codes (e.g. "fm")
    #[arg(long, default_value = "", conflicts_with = "all_rules")]
    pub rules: String,

    /// Enable every rule
    #[arg(long)]
    pub all_rules: bool,

    /// Rules whose fixes should be applied, as single-character codes
    #[arg(long, default_value = "", conflicts_with = "fix_all")]
    pub fix: String,

    /// Apply every available fix
    #[arg(long)]
    pub fix_all: bool,

    /// Print fixed file contents to stdout instead of writing them back into the files
    #[arg(long)]
    pub print: bool,

    /// Output format: human, json, sarif
    #[arg(long, default_value = "human")]
    pub format: String,

    /// Configuration files to check
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

impl Default for CheckArgs {
    fn default() -> Self {
        Self {
            rules: String::new(),
            all_rules: false,
            fix: String::new(),
            fix_all: false,
            print: false,
            format: "human".to_string(),
            files: Vec::new(),
        }
    }
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
