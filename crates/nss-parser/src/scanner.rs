//! Character cursor used by the lexer.
//!
//! [`TextScanner`] wraps a winnow [`LocatingSlice`] and adds lexeme
//! bookkeeping plus the line-break, whitespace and comment primitives the
//! lexer is built from. It knows nothing about the language itself.

use winnow::{
    Parser,
    ascii::Caseless,
    error::{ContextError, ErrMode},
    stream::{LocatingSlice, Location, Stream},
    token::{literal, take_while},
};

use crate::span::Span;

type Input<'a> = LocatingSlice<&'a str>;
type ScanError = ErrMode<ContextError>;

/// A saved scanner position that can be restored with [`TextScanner::reset`].
pub(crate) type Checkpoint<'a> = <Input<'a> as Stream>::Checkpoint;

/// Low-level cursor over source text.
#[derive(Debug, Clone)]
pub(crate) struct TextScanner<'a> {
    text: &'a str,
    input: Input<'a>,
    lexeme_start: usize,
}

impl<'a> TextScanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            input: LocatingSlice::new(text),
            lexeme_start: 0,
        }
    }

    /// The full source text being scanned.
    pub fn source(&self) -> &'a str {
        self.text
    }

    /// Current byte offset into the source.
    pub fn position(&self) -> usize {
        self.input.current_token_start()
    }

    /// The unconsumed rest of the source.
    pub fn remaining(&self) -> &'a str {
        self.input.peek_slice(self.input.eof_offset())
    }

    pub fn is_at_end(&self) -> bool {
        self.input.eof_offset() == 0
    }

    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Look `n` characters past the cursor without consuming anything.
    pub fn peek_at(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    pub fn advance(&mut self) -> Option<char> {
        self.input.next_token()
    }

    /// Consume `c` if it is the next character.
    pub fn advance_if(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume `text` if the source continues with it.
    pub fn advance_if_text(&mut self, text: &str) -> bool {
        self.attempt(literal(text)).is_some()
    }

    /// Consume `text` if the source continues with it, ignoring ASCII case.
    pub fn advance_if_caseless(&mut self, text: &str) -> bool {
        self.attempt(literal(Caseless(text))).is_some()
    }

    pub fn at_text(&self, text: &str) -> bool {
        self.remaining().starts_with(text)
    }

    pub fn at_caseless(&self, text: &str) -> bool {
        self.clone().advance_if_caseless(text)
    }

    /// Consume characters while `predicate` holds and return them.
    pub fn advance_while(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
        self.attempt(take_while(0.., predicate)).unwrap_or_default()
    }

    /// Mark the current position as the start of the next lexeme.
    pub fn start_lexeme(&mut self) {
        self.lexeme_start = self.position();
    }

    /// Span from the lexeme start to the cursor.
    pub fn lexeme_span(&self) -> Span {
        Span::new(self.lexeme_start..self.position())
    }

    /// Text from the lexeme start to the cursor.
    pub fn lexeme(&self) -> &'a str {
        self.text
            .get(self.lexeme_start..self.position())
            .unwrap_or_default()
    }

    pub fn checkpoint(&self) -> Checkpoint<'a> {
        self.input.checkpoint()
    }

    pub fn reset(&mut self, checkpoint: &Checkpoint<'a>) {
        self.input.reset(checkpoint);
    }

    pub fn at_line_break(&self) -> bool {
        matches!(self.peek(), Some('\n' | '\r'))
    }

    /// Consume one line break (`\r\n`, `\n` or `\r`).
    pub fn advance_line_break(&mut self) -> bool {
        self.advance_if_text("\r\n") || self.advance_if('\n') || self.advance_if('\r')
    }

    /// Returns `true` if the next two line breaks follow each other directly.
    pub fn at_double_line_break(&self) -> bool {
        let mut probe = self.clone();
        probe.advance_line_break() && probe.at_line_break()
    }

    /// Consume everything up to, but not including, the next line break.
    pub fn skip_to_end_of_line(&mut self) {
        self.advance_while(|c| c != '\n' && c != '\r');
    }

    /// Consume whitespace. Line breaks are only consumed if asked for.
    pub fn skip_whitespace(&mut self, include_line_breaks: bool) -> bool {
        let skipped = self.advance_while(|c| {
            c.is_whitespace() && (include_line_breaks || (c != '\n' && c != '\r'))
        });
        !skipped.is_empty()
    }

    /// Run `parser` at the cursor, restoring the cursor if it fails.
    fn attempt<O, P>(&mut self, mut parser: P) -> Option<O>
    where
        P: Parser<Input<'a>, O, ScanError>,
    {
        let checkpoint = self.input.checkpoint();
        match parser.parse_next(&mut self.input) {
            Ok(output) => Some(output),
            Err(_) => {
                self.input.reset(&checkpoint);
                None
            }
        }
    }
}
