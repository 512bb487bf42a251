//! Bag for accumulating diagnostics during lexing and parsing.
//!
//! The [`DiagnosticBag`] lets the lexer and parser report every problem they
//! find instead of stopping at the first one. Entries are kept in insertion
//! order and never modified once reported.

use crate::{
    error::{Diagnostic, DiagnosticId, ParseError},
    span::Span,
};

/// Ordered collection of diagnostics.
///
/// # Example
///
/// ```
/// # use nss_parser::error::{DiagnosticBag, DiagnosticId};
/// # use nss_parser::Span;
///
/// let mut bag = DiagnosticBag::new();
/// bag.report(DiagnosticId::UnterminatedString, Span::new(0..6));
/// bag.report_with(DiagnosticId::TokenExpected, Span::new(9..9), [";"]);
///
/// assert_eq!(bag.len(), 2);
/// assert!(bag.finish().is_err());
/// ```
#[derive(Debug, Default, Clone)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticBag {
    /// Create a new empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic to this bag.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Report a diagnostic without arguments.
    pub fn report(&mut self, id: DiagnosticId, span: Span) {
        self.emit(Diagnostic::new(id, span));
    }

    /// Report a diagnostic with message arguments.
    pub fn report_with<I, S>(&mut self, id: DiagnosticId, span: Span, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let diagnostic = args
            .into_iter()
            .fold(Diagnostic::new(id, span), |diag, arg| diag.with_arg(arg));
        self.emit(diagnostic);
    }

    /// Append every diagnostic of `other`, preserving order.
    pub fn extend(&mut self, other: DiagnosticBag) {
        for diagnostic in other.diagnostics {
            self.emit(diagnostic);
        }
    }

    /// Returns `true` if at least one error-severity diagnostic was reported.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Iterate over the diagnostics in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Consume the bag and return its diagnostics.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Finish collection and return a result.
    ///
    /// - If there are errors, returns `Err(ParseError)` with all diagnostics.
    /// - If there are no errors, returns `Ok(())`; warnings are dropped.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.has_errors {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bag_new_finish_ok() {
        let bag = DiagnosticBag::new();
        assert!(bag.is_empty());
        assert!(bag.finish().is_ok());
    }

    #[test]
    fn test_bag_report_error_finish_err() {
        let mut bag = DiagnosticBag::new();

        bag.report(DiagnosticId::UnterminatedComment, Span::new(0..2));

        assert!(bag.has_errors());
        assert!(bag.finish().is_err());
    }

    #[test]
    fn test_bag_report_warning_finish_ok() {
        let mut bag = DiagnosticBag::new();

        bag.report(DiagnosticId::MisplacedSemicolon, Span::new(0..1));

        assert!(!bag.has_errors());
        assert_eq!(bag.len(), 1);
        assert!(bag.finish().is_ok());
    }

    #[test]
    fn test_bag_preserves_insertion_order() {
        let mut bag = DiagnosticBag::new();

        bag.report_with(DiagnosticId::StrayToken, Span::new(20..21), ["}"]);
        bag.report(DiagnosticId::MisplacedSemicolon, Span::new(0..1));
        bag.report_with(DiagnosticId::TokenExpected, Span::new(5..5), [")"]);

        let ids: Vec<_> = bag.iter().map(|d| d.id()).collect();
        assert_eq!(
            ids,
            [
                DiagnosticId::StrayToken,
                DiagnosticId::MisplacedSemicolon,
                DiagnosticId::TokenExpected,
            ]
        );

        let err = bag.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 3);
        assert_eq!(err.diagnostics()[0].message(), "unexpected token `}`");
    }

    #[test]
    fn test_bag_extend() {
        let mut lexical = DiagnosticBag::new();
        lexical.report(DiagnosticId::UnterminatedString, Span::new(0..3));

        let mut bag = DiagnosticBag::new();
        bag.report(DiagnosticId::MisplacedSemicolon, Span::new(4..5));
        bag.extend(lexical);

        assert_eq!(bag.len(), 2);
        assert!(bag.has_errors());
    }
}
