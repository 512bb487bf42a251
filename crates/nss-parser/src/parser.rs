//! Recursive-descent parser for NSS scripts.
//!
//! The parser runs the [`lexer`](super::lexer) to exhaustion up front and
//! then walks the resulting token array with an index cursor, so any amount
//! of lookahead is a plain index. Parsing never fails: problems become
//! diagnostics, missing tokens are synthesized, and a construct that cannot
//! be salvaged yields `None` so the enclosing statement is dropped and
//! parsing resumes at the next one.
//!
//! Grammar rules are split by the kind of node they build:
//! [`declarations`] (file level and subroutines), [`statements`] and
//! [`expressions`].

mod declarations;
mod expressions;
mod statements;

use indexmap::IndexMap;

use nss_core::{identifier::Id, source_text::SourceText};

use crate::{
    error::{DiagnosticBag, DiagnosticId, ParseError},
    lexer,
    span::{Span, Spanned},
    syntax::{Parameter, SourceFileRoot},
    tokens::{LexingMode, SyntaxToken, TokenFlags, TokenKind},
};

/// The result of parsing a whole script.
///
/// The tree is always present; it may be partial when `diagnostics`
/// contains errors.
#[derive(Debug, Clone)]
pub struct ParsedSource {
    pub root: SourceFileRoot,
    pub diagnostics: DiagnosticBag,
}

impl ParsedSource {
    /// Keep the tree only if no error was reported. Warnings are dropped.
    pub fn into_result(self) -> Result<SourceFileRoot, ParseError> {
        self.diagnostics.finish()?;
        Ok(self.root)
    }
}

pub(crate) struct Parser<'a> {
    source: &'a SourceText,
    tokens: Vec<SyntaxToken>,
    position: usize,
    diagnostics: DiagnosticBag,
    /// Parameters of the function being parsed, by name.
    parameters: IndexMap<Id, Parameter>,
    /// Number of dialogue blocks enclosing the cursor.
    dialogue_depth: usize,
}

impl<'a> Parser<'a> {
    /// Lex `source` and prepare to parse it. Lexer diagnostics come first
    /// in the parser's bag.
    pub(crate) fn new(source: &'a SourceText, initial_mode: LexingMode) -> Self {
        let (tokens, diagnostics) = lexer::tokenize(source.as_str(), initial_mode);
        Self {
            source,
            tokens,
            position: 0,
            diagnostics,
            parameters: IndexMap::new(),
            dialogue_depth: usize::from(initial_mode == LexingMode::DialogueBlock),
        }
    }

    pub(crate) fn into_diagnostics(self) -> DiagnosticBag {
        self.diagnostics
    }

    /// Report everything left before the end of the file as one stray token.
    pub(crate) fn report_trailing_tokens(&mut self) {
        if self.at(TokenKind::EndOfFileToken) {
            return;
        }
        let token = self.peek();
        let text = self.display_text(token);
        self.diagnostics
            .report_with(DiagnosticId::StrayToken, token.span, [text]);
        while !self.at(TokenKind::EndOfFileToken) {
            self.advance();
        }
    }

    // ---------------------------------------------------------------------
    // Cursor
    // ---------------------------------------------------------------------

    fn peek(&self) -> SyntaxToken {
        self.peek_at(0)
    }

    /// Look `n` tokens ahead. Reads past the end return the end-of-file token.
    fn peek_at(&self, n: usize) -> SyntaxToken {
        let last = self.tokens.len().saturating_sub(1);
        self.tokens
            .get((self.position + n).min(last))
            .copied()
            .unwrap_or_else(|| SyntaxToken::new(TokenKind::EndOfFileToken, Span::default(), TokenFlags::empty()))
    }

    /// Consume the current token. The cursor never moves past end of file.
    fn advance(&mut self) -> SyntaxToken {
        let token = self.peek();
        if token.kind != TokenKind::EndOfFileToken {
            self.position += 1;
        }
        token
    }

    fn previous(&self) -> Option<SyntaxToken> {
        self.position
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
            .copied()
    }

    /// End offset of the last consumed token.
    fn previous_end(&self) -> usize {
        self.previous().map_or(0, |token| token.span.end())
    }

    /// Span from `start` to the end of the last consumed token.
    fn span_from(&self, start: usize) -> Span {
        Span::new(start..self.previous_end())
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn eat(&mut self, kind: TokenKind) -> Option<SyntaxToken> {
        self.at(kind).then(|| self.advance())
    }

    /// Consume a token of `kind`, or report it missing and synthesize a
    /// placeholder without consuming anything.
    fn expect(&mut self, kind: TokenKind) -> SyntaxToken {
        if let Some(token) = self.eat(kind) {
            return token;
        }
        let span = self.missing_token_span();
        self.diagnostics
            .report_with(DiagnosticId::TokenExpected, span, [kind.to_string()]);
        SyntaxToken::missing(span)
    }

    /// Where a missing token would have been inserted: right after the
    /// previous token when the current one starts a new line, otherwise the
    /// current token itself.
    fn missing_token_span(&self) -> Span {
        let current = self.peek();
        match self.previous() {
            Some(previous)
                if self.line_of(previous.span.end()) != self.line_of(current.span.start()) =>
            {
                Span::empty_at(previous.span.end())
            }
            _ => current.span,
        }
    }

    /// Consume one or more `;`/`:` terminators, warning when there are none.
    fn expect_terminator(&mut self) {
        let mut terminated = false;
        while self.peek().kind.is_statement_terminator() {
            self.advance();
            terminated = true;
        }
        if !terminated {
            self.diagnostics.report(
                DiagnosticId::MissingStatementTerminator,
                Span::empty_at(self.previous_end()),
            );
        }
    }

    // ---------------------------------------------------------------------
    // Recovery
    // ---------------------------------------------------------------------

    fn line_of(&self, offset: usize) -> usize {
        self.source.line_index(offset)
    }

    /// Consume the current token and everything after it on the same line.
    fn skip_to_next_line(&mut self) {
        let token = self.advance();
        let line = self.line_of(token.span.start());
        while !self.at(TokenKind::EndOfFileToken) && self.line_of(self.peek().span.start()) == line {
            self.advance();
        }
    }

    /// Consume the rest of a broken statement: everything up to and
    /// including the next `;`/`:` on the line of the last consumed token.
    /// Stops in front of a closing brace or the next line.
    fn skip_rest_of_statement(&mut self) {
        let Some(previous) = self.previous() else {
            return;
        };
        let line = self.line_of(previous.span.end());
        loop {
            let token = self.peek();
            if matches!(token.kind, TokenKind::CloseBrace | TokenKind::EndOfFileToken)
                || self.line_of(token.span.start()) != line
            {
                return;
            }
            self.advance();
            if token.kind.is_statement_terminator() {
                return;
            }
        }
    }

    // ---------------------------------------------------------------------
    // Token text
    // ---------------------------------------------------------------------

    fn text(&self, token: SyntaxToken) -> &'a str {
        token.text(self.source.as_str())
    }

    fn value_text(&self, token: SyntaxToken) -> &'a str {
        if token.is_missing() {
            return "";
        }
        token.value_text(self.source.as_str())
    }

    /// Source text of `token` for diagnostics, falling back to its kind.
    fn display_text(&self, token: SyntaxToken) -> String {
        match self.text(token) {
            "" => token.kind.to_string(),
            text => text.to_string(),
        }
    }

    /// The text between the quotes of a string literal, sigil included.
    fn quoted_text(&self, token: SyntaxToken) -> &'a str {
        let text = self.text(token);
        let text = text.strip_prefix('"').unwrap_or(text);
        if token.flags.contains(TokenFlags::HAS_DIAGNOSTICS) {
            text
        } else {
            text.strip_suffix('"').unwrap_or(text)
        }
    }

    /// The undecorated value of a name-like token, interned.
    fn name_of(&self, token: SyntaxToken) -> Spanned<Id> {
        Spanned::new(Id::new(self.value_text(token)), token.span)
    }

    /// Verbatim source between the first and last of `tokens`.
    fn raw_text(&self, first: SyntaxToken, last: SyntaxToken) -> &'a str {
        self.source
            .slice(first.span.start()..last.span.end().max(first.span.start()))
    }
}

/// Parse a whole script.
pub(crate) fn parse_source(source: &SourceText, initial_mode: LexingMode) -> ParsedSource {
    let mut parser = Parser::new(source, initial_mode);
    let root = parser.parse_source_file();
    ParsedSource {
        root,
        diagnostics: parser.into_diagnostics(),
    }
}
