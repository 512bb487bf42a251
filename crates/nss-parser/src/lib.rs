//! # NSS Parser
//!
//! Front end for NSS narrative scripts: a mode-aware lexer, a
//! recursive-descent parser producing a [`syntax`] tree, a diagnostics
//! model and a writer that turns the tree back into source.
//!
//! Nothing in this crate fails on malformed input. Every entry point returns
//! what it could build plus a [`DiagnosticBag`](error::DiagnosticBag)
//! describing what went wrong.
//!
//! ## Usage
//!
//! ```
//! # use nss_core::source_text::SourceText;
//! # use nss_parser::{parse, syntax::SubroutineKind};
//!
//! let source = SourceText::new(
//!     r#"
//!     #include "nss/function.nss"
//!
//!     chapter main {
//!         CreateTexture("bg", 100, 0, 0, "cg/bg01.png");
//!         Wait(500);
//!     }
//!     "#,
//! );
//!
//! let parsed = parse(&source);
//! assert!(parsed.diagnostics.is_empty());
//! assert_eq!(parsed.root.chapter_count, 1);
//! assert_eq!(parsed.root.subroutines[0].kind, SubroutineKind::Chapter);
//! ```

pub mod error;
mod lexer;
pub mod operators;
mod parser;
mod scanner;
mod span;
pub mod syntax;
pub mod syntax_facts;
mod tokens;
pub mod visitor;
pub mod writer;

pub use lexer::{Lexer, tokenize};
pub use parser::ParsedSource;
pub use span::{Span, Spanned};
pub use tokens::{LexingMode, SyntaxToken, TokenFlags, TokenKind};

use log::debug;

use nss_core::source_text::SourceText;

use error::DiagnosticBag;
use parser::Parser;
use syntax::{Expression, Statement};

/// Parse a whole script starting in [`LexingMode::Normal`].
pub fn parse(source: &SourceText) -> ParsedSource {
    parse_with_mode(source, LexingMode::Normal)
}

/// Parse a whole script starting in `initial_mode`.
///
/// Diagnostics are ordered lexer first, then parser.
pub fn parse_with_mode(source: &SourceText, initial_mode: LexingMode) -> ParsedSource {
    let parsed = parser::parse_source(source, initial_mode);
    debug!(
        mode:% = initial_mode,
        subroutines = parsed.root.subroutines.len(),
        errors = parsed.diagnostics.has_errors();
        "Parsing finished"
    );
    parsed
}

/// Parse a standalone expression such as `$x + 1`.
///
/// Anything after the expression is reported as a stray token.
///
/// ```
/// # use nss_parser::{parse_expression, syntax::Expression};
///
/// let (expression, diagnostics) = parse_expression("(0, 0, (10, 10), {20, 20})");
/// assert!(diagnostics.is_empty());
/// assert!(matches!(expression, Some(Expression::Bezier(_))));
/// ```
pub fn parse_expression(text: &str) -> (Option<Expression>, DiagnosticBag) {
    let source = SourceText::new(text);
    let mut parser = Parser::new(&source, LexingMode::Normal);
    let expression = parser.parse_expression();
    parser.report_trailing_tokens();
    (expression, parser.into_diagnostics())
}

/// Parse a standalone statement such as `Wait(100);`.
///
/// Anything after the statement is reported as a stray token.
pub fn parse_statement(text: &str) -> (Option<Statement>, DiagnosticBag) {
    parse_statement_with_mode(text, LexingMode::Normal)
}

/// Parse a standalone statement starting in `initial_mode`. In
/// [`LexingMode::DialogueBlock`] markup is accepted as a statement.
pub fn parse_statement_with_mode(
    text: &str,
    initial_mode: LexingMode,
) -> (Option<Statement>, DiagnosticBag) {
    let source = SourceText::new(text);
    let mut parser = Parser::new(&source, initial_mode);
    let statement = parser.parse_statement();
    parser.report_trailing_tokens();
    (statement, parser.into_diagnostics())
}
