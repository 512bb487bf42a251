//! Token definitions produced by the [`lexer`](super::lexer).
//!
//! A [`SyntaxToken`] never stores its text. The source span plus
//! [`TokenFlags`] are enough to recover both the full lexeme and the
//! undecorated value text (see [`SyntaxToken::value_span`]).

use std::fmt;

use bitflags::bitflags;

use crate::{span::Span, syntax_facts};

/// Every kind of token the lexer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Sentinels
    None,
    BadToken,
    MissingToken,
    EndOfFileToken,

    // Literals
    Identifier,
    NumericLiteral,
    StringLiteralOrQuotedIdentifier,

    // Dialogue block markup
    DialogueBlockStartTag,
    DialogueBlockEndTag,
    DialogueBlockIdentifier,
    Markup,
    MarkupBlankLine,

    // Keywords
    ChapterKeyword,
    SceneKeyword,
    FunctionKeyword,
    IfKeyword,
    ElseKeyword,
    WhileKeyword,
    SelectKeyword,
    CaseKeyword,
    BreakKeyword,
    ReturnKeyword,
    CallSceneKeyword,
    CallChapterKeyword,
    NullKeyword,
    TrueKeyword,
    FalseKeyword,
    IncludeDirective,

    // Punctuation
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    Comma,
    Dot,
    Semicolon,
    Colon,
    Hash,
    Dollar,
    At,
    AtArrow,
    Arrow,
    Ampersand,
    AmpersandAmpersand,
    BarBar,
    Exclamation,
    ExclamationEquals,
    Equals,
    EqualsEquals,
    LessThan,
    LessThanEquals,
    GreaterThan,
    GreaterThanEquals,
    Plus,
    PlusEquals,
    PlusPlus,
    Minus,
    MinusEquals,
    MinusMinus,
    Asterisk,
    AsteriskEquals,
    Slash,
    SlashEquals,
    Percent,
}

impl TokenKind {
    /// Returns `true` for `;` and `:`, which both end a statement.
    pub fn is_statement_terminator(self) -> bool {
        matches!(self, TokenKind::Semicolon | TokenKind::Colon)
    }

    /// Returns `true` for the kinds that only appear inside dialogue blocks.
    pub fn is_markup(self) -> bool {
        matches!(
            self,
            TokenKind::Markup | TokenKind::MarkupBlankLine | TokenKind::DialogueBlockIdentifier
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = syntax_facts::token_text(*self) {
            return f.write_str(text);
        }
        let name = match self {
            TokenKind::None => "none",
            TokenKind::BadToken => "bad token",
            TokenKind::MissingToken => "missing token",
            TokenKind::EndOfFileToken => "end of file",
            TokenKind::Identifier => "identifier",
            TokenKind::NumericLiteral => "numeric literal",
            TokenKind::StringLiteralOrQuotedIdentifier => "string literal",
            TokenKind::DialogueBlockStartTag => "dialogue block start tag",
            TokenKind::DialogueBlockIdentifier => "dialogue block identifier",
            TokenKind::Markup => "markup",
            TokenKind::MarkupBlankLine => "blank line",
            _ => "token",
        };
        f.write_str(name)
    }
}

bitflags! {
    /// Lexical facts about a token that affect how its value is read.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u8 {
        /// The token was written inside double quotes.
        const IS_QUOTED = 1;
        /// The value is preceded by a `$` sigil.
        const HAS_DOLLAR_PREFIX = 1 << 1;
        /// The value is preceded by a `#` sigil.
        const HAS_HASH_PREFIX = 1 << 2;
        /// A numeric literal with a fractional part.
        const HAS_DECIMAL_POINT = 1 << 3;
        /// A `#RRGGBB` color literal.
        const IS_HEX_TRIPLET = 1 << 4;
        /// The lexer reported a diagnostic while scanning this token.
        const HAS_DIAGNOSTICS = 1 << 5;
    }
}

/// The lexing mode in effect at a given point of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LexingMode {
    /// Ordinary script syntax.
    #[default]
    Normal,
    /// Free-form dialogue markup between `<PRE>` and `</PRE>`.
    DialogueBlock,
}

impl fmt::Display for LexingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexingMode::Normal => write!(f, "normal"),
            LexingMode::DialogueBlock => write!(f, "dialogue block"),
        }
    }
}

/// A token with its source span and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxToken {
    pub kind: TokenKind,
    pub span: Span,
    pub flags: TokenFlags,
}

impl SyntaxToken {
    pub fn new(kind: TokenKind, span: Span, flags: TokenFlags) -> Self {
        Self { kind, span, flags }
    }

    /// A zero-width placeholder for a token the parser expected but did not find.
    pub fn missing(span: Span) -> Self {
        Self::new(TokenKind::MissingToken, span, TokenFlags::empty())
    }

    pub fn is_missing(&self) -> bool {
        self.kind == TokenKind::MissingToken
    }

    pub fn has_dollar_prefix(&self) -> bool {
        self.flags.contains(TokenFlags::HAS_DOLLAR_PREFIX)
    }

    pub fn has_hash_prefix(&self) -> bool {
        self.flags.contains(TokenFlags::HAS_HASH_PREFIX)
    }

    /// Span of the token's value, without quotes, sigils or tag delimiters.
    ///
    /// The closing delimiter is only stripped when the token was terminated,
    /// which the lexer records by leaving `HAS_DIAGNOSTICS` unset.
    pub fn value_span(&self) -> Span {
        let start = self.span.start();
        let end = self.span.end();
        let terminated = !self.flags.contains(TokenFlags::HAS_DIAGNOSTICS);
        let sigil = usize::from(
            self.flags
                .intersects(TokenFlags::HAS_DOLLAR_PREFIX | TokenFlags::HAS_HASH_PREFIX),
        );

        let (lead, trail) = if self.flags.contains(TokenFlags::IS_QUOTED) {
            (1 + sigil, usize::from(terminated))
        } else {
            match self.kind {
                TokenKind::NumericLiteral if self.flags.contains(TokenFlags::IS_HEX_TRIPLET) => {
                    (1, 0)
                }
                TokenKind::Identifier => (sigil, 0),
                TokenKind::DialogueBlockIdentifier => (1, usize::from(terminated)),
                TokenKind::DialogueBlockStartTag => ("<pre".len(), usize::from(terminated)),
                _ => (0, 0),
            }
        };

        let value_start = (start + lead).min(end);
        let value_end = end.saturating_sub(trail).max(value_start);
        Span::new(value_start..value_end)
    }

    /// The full lexeme, decorations included.
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        source.get(self.span.as_range()).unwrap_or_default()
    }

    /// The value text, see [`value_span`](Self::value_span).
    pub fn value_text<'src>(&self, source: &'src str) -> &'src str {
        source.get(self.value_span().as_range()).unwrap_or_default()
    }
}

impl fmt::Display for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)?;
        if !self.flags.is_empty() {
            write!(f, " {:?}", self.flags)?;
        }
        Ok(())
    }
}
