//! The ParseError type for wrapping parsing diagnostics.
//!
//! [`ParseError`] wraps the diagnostics of a lex/parse run that reported at
//! least one error, for callers that want a `Result`.

use std::fmt;

use crate::error::Diagnostic;

/// Error type for the parsing lifecycle.
///
/// Wraps one or more diagnostics.
#[derive(Debug, Clone)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    /// Create a new parse error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.diagnostics.first() {
            write!(f, "{}", first)?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for ParseError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::DiagnosticId, span::Span};

    #[test]
    fn test_parse_error_from_diagnostic() {
        let diag = Diagnostic::new(DiagnosticId::UnterminatedString, Span::new(0..4));
        let err: ParseError = diag.into();

        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.diagnostics()[0].message(), "unterminated string literal");
    }

    #[test]
    fn test_parse_error_display_single() {
        let diag = Diagnostic::new(DiagnosticId::StrayPXmlElement, Span::new(0..4));
        let err: ParseError = diag.into();

        assert_eq!(
            err.to_string(),
            "error[E107]: dialogue markup outside of a dialogue block"
        );
    }

    #[test]
    fn test_parse_error_display_multiple() {
        let diags = vec![
            Diagnostic::new(DiagnosticId::TokenExpected, Span::new(0..1)).with_arg("("),
            Diagnostic::new(DiagnosticId::TokenExpected, Span::new(2..3)).with_arg(")"),
            Diagnostic::new(DiagnosticId::StrayToken, Span::new(4..5)).with_arg("]"),
        ];
        let err: ParseError = diags.into();

        assert_eq!(err.to_string(), "error[E106]: expected `(` (+2 more)");
    }
}
