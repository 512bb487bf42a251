//! Configuration types for the NSS front end.
//!
//! All types implement [`serde::Deserialize`] and default every field, so an
//! empty document is a valid configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration.
//! - [`LexerConfig`] - Selects the [`InitialMode`] scripts are lexed in.
//! - [`DiagnosticsConfig`] - Controls how diagnostics decide success and how
//!   many are reported.
//!
//! # Example
//!
//! ```
//! # use nss::config::{AppConfig, InitialMode};
//! let config = AppConfig::default();
//! assert_eq!(config.lexer().initial_mode(), InitialMode::Normal);
//! assert!(!config.diagnostics().warnings_as_errors());
//! ```

use serde::Deserialize;

use nss_parser::LexingMode;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Lexer configuration section.
    #[serde(default)]
    lexer: LexerConfig,

    /// Diagnostics configuration section.
    #[serde(default)]
    diagnostics: DiagnosticsConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(lexer: LexerConfig, diagnostics: DiagnosticsConfig) -> Self {
        Self { lexer, diagnostics }
    }

    /// Returns the lexer configuration.
    pub fn lexer(&self) -> &LexerConfig {
        &self.lexer
    }

    /// Returns the diagnostics configuration.
    pub fn diagnostics(&self) -> &DiagnosticsConfig {
        &self.diagnostics
    }
}

/// The mode a script starts out in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialMode {
    /// Ordinary script syntax.
    #[default]
    Normal,
    /// Dialogue markup, for fragments cut from inside a `<PRE>` block.
    DialogueBlock,
}

impl From<InitialMode> for LexingMode {
    fn from(mode: InitialMode) -> Self {
        match mode {
            InitialMode::Normal => LexingMode::Normal,
            InitialMode::DialogueBlock => LexingMode::DialogueBlock,
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct LexerConfig {
    #[serde(default)]
    initial_mode: InitialMode,
}

impl LexerConfig {
    pub fn new(initial_mode: InitialMode) -> Self {
        Self { initial_mode }
    }

    pub fn initial_mode(&self) -> InitialMode {
        self.initial_mode
    }
}

/// How diagnostics are judged and reported.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DiagnosticsConfig {
    /// Treat warnings as errors when deciding whether a parse succeeded.
    #[serde(default)]
    warnings_as_errors: bool,

    /// Report at most this many diagnostics. `None` reports all of them.
    #[serde(default)]
    max_reported: Option<usize>,
}

impl DiagnosticsConfig {
    pub fn new(warnings_as_errors: bool, max_reported: Option<usize>) -> Self {
        Self {
            warnings_as_errors,
            max_reported,
        }
    }

    pub fn warnings_as_errors(&self) -> bool {
        self.warnings_as_errors
    }

    pub fn max_reported(&self) -> Option<usize> {
        self.max_reported
    }
}
