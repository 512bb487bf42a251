//! Error types for NSS operations.
//!
//! This module provides the main error type [`NssError`] which wraps the
//! error conditions that can occur while loading and parsing scripts.

use std::io;

use thiserror::Error;

use nss_parser::error::ParseError;

/// The main error type for NSS operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the script text next to the diagnostics so that
/// callers can render them against the source.
#[derive(Debug, Error)]
pub enum NssError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl NssError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
