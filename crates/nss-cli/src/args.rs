//! Command-line argument definitions for the NSS CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input script, what to emit and where,
//! configuration file selection, and logging verbosity.

use clap::{Parser, ValueEnum};

/// What the CLI writes for a script.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Emit {
    /// Report diagnostics and a short summary.
    #[default]
    Diagnostics,
    /// The token stream, one token per line.
    Tokens,
    /// The syntax tree, one node per line.
    Tree,
    /// The script re-emitted from its syntax tree.
    Source,
}

/// Command-line arguments for the NSS script tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input NSS script
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file. Standard output when omitted.
    #[arg(short, long)]
    pub output: Option<String>,

    /// What to emit
    #[arg(short, long, value_enum, default_value_t = Emit::Diagnostics)]
    pub emit: Emit,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
