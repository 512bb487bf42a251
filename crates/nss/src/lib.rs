//! NSS - A front end for NSS narrative scripts.
//!
//! This library lexes and parses NSS scripts into a syntax tree, reports
//! diagnostics and writes trees back out as source. [`ScriptParser`] ties the
//! stages together under an [`AppConfig`].

pub mod config;

mod error;

pub use nss_core::{identifier, source_text};
pub use nss_parser::{syntax, visitor, writer};

pub use error::NssError;

use log::{debug, info, trace};

use nss_parser::{
    ParsedSource, SyntaxToken,
    error::{Diagnostic, ParseError, Severity},
};

use config::AppConfig;
use source_text::SourceText;
use syntax::SourceFileRoot;

/// A script that parsed without errors.
#[derive(Debug, Clone)]
pub struct Script {
    root: SourceFileRoot,
    warnings: Vec<Diagnostic>,
}

impl Script {
    /// The syntax tree of the script.
    pub fn root(&self) -> &SourceFileRoot {
        &self.root
    }

    /// Warnings reported while parsing, in source order per stage.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn into_root(self) -> SourceFileRoot {
        self.root
    }
}

/// Builder for parsing NSS scripts.
///
/// # Examples
///
/// ```rust
/// use nss::{ScriptParser, config::AppConfig};
///
/// let source = "chapter main { Wait(100); }";
///
/// let parser = ScriptParser::new(AppConfig::default());
/// let script = parser.parse(source).expect("Failed to parse");
/// assert_eq!(script.root().chapter_count, 1);
///
/// // Write the tree back out
/// let text = parser.write_source(script.root());
/// assert_eq!(text, "chapter main {\n    Wait(100);\n}\n");
/// ```
#[derive(Debug, Default)]
pub struct ScriptParser {
    config: AppConfig,
}

impl ScriptParser {
    /// Create a new script parser with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a script.
    ///
    /// # Errors
    ///
    /// Returns [`NssError::Parse`] carrying every diagnostic when any error
    /// was reported, or when any warning was reported and
    /// `warnings_as_errors` is set. Promoted warnings are reported as errors.
    pub fn parse(&self, source: &str) -> Result<Script, NssError> {
        let parsed = self.parse_lenient(source);
        let warnings_as_errors = self.config.diagnostics().warnings_as_errors();

        let failed = parsed.diagnostics.has_errors()
            || (warnings_as_errors && !parsed.diagnostics.is_empty());
        let diagnostics = parsed.diagnostics.into_vec();
        if failed {
            let diagnostics = if warnings_as_errors {
                diagnostics
                    .into_iter()
                    .map(|diagnostic| diagnostic.with_severity(Severity::Error))
                    .collect()
            } else {
                diagnostics
            };
            return Err(NssError::new_parse_error(ParseError::new(diagnostics), source));
        }

        debug!(warnings = diagnostics.len(); "Script parsed successfully");
        trace!(root:? = parsed.root; "Parsed script");
        Ok(Script {
            root: parsed.root,
            warnings: diagnostics,
        })
    }

    /// Parse a script and return whatever was recovered, errors included.
    pub fn parse_lenient(&self, source: &str) -> ParsedSource {
        let mode = self.config.lexer().initial_mode();
        info!(mode:?, bytes = source.len(); "Parsing script");
        nss_parser::parse_with_mode(&SourceText::new(source), mode.into())
    }

    /// Split a script into tokens.
    ///
    /// Lexical diagnostics are returned next to the tokens rather than as an
    /// error, since the token stream is complete either way.
    pub fn tokenize(&self, source: &str) -> (Vec<SyntaxToken>, Vec<Diagnostic>) {
        let mode = self.config.lexer().initial_mode();
        info!(mode:?; "Tokenizing script");
        let (tokens, diagnostics) = nss_parser::tokenize(source, mode.into());
        (tokens, diagnostics.into_vec())
    }

    /// Write a syntax tree back out as source.
    pub fn write_source(&self, root: &SourceFileRoot) -> String {
        writer::write_source(root)
    }

    /// Cap `diagnostics` at the configured `max_reported`.
    pub fn reported<'d>(&self, diagnostics: &'d [Diagnostic]) -> &'d [Diagnostic] {
        match self.config.diagnostics().max_reported() {
            Some(max) if max < diagnostics.len() => &diagnostics[..max],
            _ => diagnostics,
        }
    }
}
