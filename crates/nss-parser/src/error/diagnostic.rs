//! The core diagnostic type for the NSS front end.
//!
//! A [`Diagnostic`] is a [`DiagnosticId`], the span it points at, and the
//! positional arguments its message template needs.

use std::fmt;

use crate::{
    error::{DiagnosticId, Severity},
    span::Span,
};

/// A diagnostic with source location information.
///
/// # Example
///
/// ```text
/// error[E106]: expected `)`
///   --> scripts/ch01.nss:4:11
///    |
///  4 |     if (x {
///    |          ^ token expected
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    id: DiagnosticId,
    span: Span,
    args: Vec<String>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic at the id's default severity.
    ///
    /// # Example
    ///
    /// ```
    /// # use nss_parser::error::{Diagnostic, DiagnosticId};
    /// # use nss_parser::Span;
    ///
    /// let diag = Diagnostic::new(DiagnosticId::InvalidExpressionTerm, Span::new(4..5))
    ///     .with_arg(")");
    /// assert_eq!(diag.message(), "invalid expression term `)`");
    /// ```
    pub fn new(id: DiagnosticId, span: Span) -> Self {
        Self {
            severity: id.default_severity(),
            id,
            span,
            args: Vec::new(),
            help: None,
        }
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn id(&self) -> DiagnosticId {
        self.id
    }

    /// Get the error code (e.g., "E001").
    pub fn code(&self) -> &'static str {
        self.id.code()
    }

    /// Get the span this diagnostic points at.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the message arguments.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Get the rendered message.
    pub fn message(&self) -> String {
        let mut message = self.id.message_template().to_string();
        for (index, arg) in self.args.iter().enumerate() {
            message = message.replace(&format!("{{{index}}}"), arg);
        }
        message
    }

    /// Get the label for the primary span.
    pub fn label(&self) -> &'static str {
        self.id.description()
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Append a message argument.
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Override the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E001]: message"
        write!(f, "{}[{}]: {}", self.severity, self.id, self.message())
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new(DiagnosticId::UnterminatedString, Span::new(3..9));

        assert!(diag.severity().is_error());
        assert_eq!(diag.id(), DiagnosticId::UnterminatedString);
        assert_eq!(diag.code(), "E001");
        assert_eq!(diag.span(), Span::new(3..9));
        assert!(diag.args().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_message_substitutes_args() {
        let diag = Diagnostic::new(DiagnosticId::NumberTooLarge, Span::new(0..11))
            .with_arg("99999999999");

        assert_eq!(diag.message(), "numeric literal `99999999999` is too large");
    }

    #[test]
    fn test_missing_args_leave_placeholder() {
        let diag = Diagnostic::new(DiagnosticId::TokenExpected, Span::default());
        assert_eq!(diag.message(), "expected `{0}`");
    }

    #[test]
    fn test_warning_display() {
        let diag = Diagnostic::new(DiagnosticId::MisplacedSemicolon, Span::new(0..1));
        assert_eq!(diag.to_string(), "warning[E101]: misplaced semicolon");
    }

    #[test]
    fn test_with_severity_promotes() {
        let diag = Diagnostic::new(DiagnosticId::MisplacedSemicolon, Span::new(0..1))
            .with_severity(Severity::Error);
        assert!(diag.severity().is_error());
        assert_eq!(diag.to_string(), "error[E101]: misplaced semicolon");
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::new(DiagnosticId::StrayToken, Span::new(100..101))
            .with_arg("}")
            .with_help("remove the extra brace");

        assert_eq!(diag.message(), "unexpected token `}`");
        assert_eq!(diag.label(), "stray token");
        assert_eq!(diag.help(), Some("remove the extra brace"));
    }
}
