//! Diagnostic ids for the NSS front end.
//!
//! Codes are organized by phase:
//! - `E0xx` - Lexer diagnostics
//! - `E1xx` - Parser diagnostics

use std::fmt;

use crate::error::Severity;

/// Identifies the kind of problem a diagnostic reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticId {
    // =========================================================================
    // Lexer Diagnostics (E0xx)
    // =========================================================================
    /// A string literal or quoted identifier was opened with `"` but never closed.
    UnterminatedString,

    /// A `/*` block comment runs to the end of the file.
    UnterminatedComment,

    /// A `<pre ...` dialogue block start tag is missing its closing `>`.
    UnterminatedDialogueBlockStartTag,

    /// A `[...]` dialogue block identifier is missing its closing `]`.
    UnterminatedDialogueBlockIdentifier,

    /// An integer literal does not fit in 32 bits.
    ///
    /// Arguments: the literal text.
    NumberTooLarge,

    // =========================================================================
    // Parser Diagnostics (E1xx)
    // =========================================================================
    /// A token that cannot appear here was skipped.
    ///
    /// Arguments: the token text.
    StrayToken,

    /// A `;` between file-level directives was discarded.
    MisplacedSemicolon,

    /// A statement is not followed by `;` or `:`.
    MissingStatementTerminator,

    /// Something other than a chapter, scene or function was found at file level.
    ExpectedSubroutineDeclaration,

    /// An expression with no effect was used as a statement.
    InvalidExpressionStatement,

    /// A token that cannot start an expression term was discarded.
    ///
    /// Arguments: the token text.
    InvalidExpressionTerm,

    /// A required token is missing; a placeholder was synthesized.
    ///
    /// Arguments: the expected token text.
    TokenExpected,

    /// Dialogue markup was found outside of a dialogue block.
    StrayPXmlElement,
}

impl DiagnosticId {
    /// Returns the code as a string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            // Lexer diagnostics
            DiagnosticId::UnterminatedString => "E001",
            DiagnosticId::UnterminatedComment => "E002",
            DiagnosticId::UnterminatedDialogueBlockStartTag => "E003",
            DiagnosticId::UnterminatedDialogueBlockIdentifier => "E004",
            DiagnosticId::NumberTooLarge => "E005",
            // Parser diagnostics
            DiagnosticId::StrayToken => "E100",
            DiagnosticId::MisplacedSemicolon => "E101",
            DiagnosticId::MissingStatementTerminator => "E102",
            DiagnosticId::ExpectedSubroutineDeclaration => "E103",
            DiagnosticId::InvalidExpressionStatement => "E104",
            DiagnosticId::InvalidExpressionTerm => "E105",
            DiagnosticId::TokenExpected => "E106",
            DiagnosticId::StrayPXmlElement => "E107",
        }
    }

    /// Returns a short description, used as the label of the primary span.
    pub fn description(&self) -> &'static str {
        match self {
            DiagnosticId::UnterminatedString => "unterminated string",
            DiagnosticId::UnterminatedComment => "unterminated comment",
            DiagnosticId::UnterminatedDialogueBlockStartTag => "unterminated start tag",
            DiagnosticId::UnterminatedDialogueBlockIdentifier => "unterminated identifier",
            DiagnosticId::NumberTooLarge => "number too large",
            DiagnosticId::StrayToken => "stray token",
            DiagnosticId::MisplacedSemicolon => "misplaced semicolon",
            DiagnosticId::MissingStatementTerminator => "missing terminator",
            DiagnosticId::ExpectedSubroutineDeclaration => "expected declaration",
            DiagnosticId::InvalidExpressionStatement => "invalid statement",
            DiagnosticId::InvalidExpressionTerm => "invalid term",
            DiagnosticId::TokenExpected => "token expected",
            DiagnosticId::StrayPXmlElement => "stray markup",
        }
    }

    /// Returns the message template. `{0}`, `{1}`, ... are replaced by the
    /// diagnostic's arguments.
    pub fn message_template(&self) -> &'static str {
        match self {
            DiagnosticId::UnterminatedString => "unterminated string literal",
            DiagnosticId::UnterminatedComment => "unterminated block comment",
            DiagnosticId::UnterminatedDialogueBlockStartTag => {
                "unterminated dialogue block start tag"
            }
            DiagnosticId::UnterminatedDialogueBlockIdentifier => {
                "unterminated dialogue block identifier"
            }
            DiagnosticId::NumberTooLarge => "numeric literal `{0}` is too large",
            DiagnosticId::StrayToken => "unexpected token `{0}`",
            DiagnosticId::MisplacedSemicolon => "misplaced semicolon",
            DiagnosticId::MissingStatementTerminator => "expected `;` after statement",
            DiagnosticId::ExpectedSubroutineDeclaration => {
                "expected a chapter, scene or function declaration"
            }
            DiagnosticId::InvalidExpressionStatement => {
                "only assignment and call expressions can be used as a statement"
            }
            DiagnosticId::InvalidExpressionTerm => "invalid expression term `{0}`",
            DiagnosticId::TokenExpected => "expected `{0}`",
            DiagnosticId::StrayPXmlElement => "dialogue markup outside of a dialogue block",
        }
    }

    /// Returns the severity a diagnostic with this id is reported at.
    pub fn default_severity(&self) -> Severity {
        match self {
            DiagnosticId::MisplacedSemicolon
            | DiagnosticId::MissingStatementTerminator
            | DiagnosticId::InvalidExpressionStatement => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for DiagnosticId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_id_display() {
        assert_eq!(DiagnosticId::UnterminatedString.to_string(), "E001");
        assert_eq!(DiagnosticId::StrayToken.to_string(), "E100");
        assert_eq!(DiagnosticId::StrayPXmlElement.to_string(), "E107");
    }

    #[test]
    fn test_diagnostic_id_description() {
        assert_eq!(
            DiagnosticId::UnterminatedComment.description(),
            "unterminated comment"
        );
        assert_eq!(DiagnosticId::TokenExpected.description(), "token expected");
    }

    #[test]
    fn test_default_severity() {
        assert!(DiagnosticId::TokenExpected.default_severity().is_error());
        assert!(DiagnosticId::MisplacedSemicolon.default_severity().is_warning());
        assert!(
            DiagnosticId::MissingStatementTerminator
                .default_severity()
                .is_warning()
        );
    }
}
