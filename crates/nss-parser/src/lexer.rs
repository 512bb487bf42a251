//! Lexical analyzer for NSS source text.
//!
//! The lexer turns source text into [`SyntaxToken`]s one at a time. What a
//! character means depends on the mode on top of the lexer's mode stack:
//! in [`LexingMode::Normal`] the text is script syntax, in
//! [`LexingMode::DialogueBlock`] it is free-form markup where only `{` and
//! the `</PRE>` closing tag switch back to syntax.
//!
//! Lexing never fails. Malformed input becomes a best-effort token plus a
//! diagnostic, and anything unscannable becomes a `BadToken` running to the
//! end of the line. The public entry point is [`tokenize`].

use log::debug;

use crate::{
    error::{DiagnosticBag, DiagnosticId},
    scanner::TextScanner,
    span::Span,
    syntax_facts,
    tokens::{LexingMode, SyntaxToken, TokenFlags, TokenKind},
};

/// Mode-aware lexer producing one token per [`lex`](Lexer::lex) call.
#[derive(Debug)]
pub struct Lexer<'a> {
    scanner: TextScanner<'a>,
    modes: Vec<LexingMode>,
    diagnostics: DiagnosticBag,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str, initial_mode: LexingMode) -> Self {
        Self {
            scanner: TextScanner::new(text),
            modes: vec![initial_mode],
            diagnostics: DiagnosticBag::new(),
        }
    }

    /// The mode on top of the stack.
    pub fn mode(&self) -> LexingMode {
        self.modes.last().copied().unwrap_or_default()
    }

    /// Number of modes on the stack. Never less than one.
    pub fn mode_depth(&self) -> usize {
        self.modes.len()
    }

    pub fn diagnostics(&self) -> &DiagnosticBag {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> DiagnosticBag {
        self.diagnostics
    }

    /// Produce the next token. Returns `EndOfFileToken` forever once the
    /// source is exhausted.
    pub fn lex(&mut self) -> SyntaxToken {
        let in_dialogue = self.mode() == LexingMode::DialogueBlock;
        if in_dialogue {
            self.skip_markup_comments();
        } else {
            self.skip_trivia(true);
        }

        self.scanner.start_lexeme();
        if self.scanner.is_at_end() {
            return self.token(TokenKind::EndOfFileToken, TokenFlags::empty());
        }

        if in_dialogue && !self.scanner.at_text("{") && !self.scanner.at_caseless("</pre>") {
            return self.lex_markup();
        }

        let token = self.lex_syntax_token();
        self.update_mode(token.kind);
        match self.mode() {
            LexingMode::Normal => self.skip_trivia(false),
            // The block identifier may sit on the line after the tag.
            LexingMode::DialogueBlock if token.kind == TokenKind::DialogueBlockStartTag => {
                self.scanner.skip_whitespace(true);
            }
            // Text after a closing `}` is markup and kept as written.
            LexingMode::DialogueBlock => {}
        }
        token
    }

    fn update_mode(&mut self, kind: TokenKind) {
        match kind {
            TokenKind::OpenBrace => self.modes.push(LexingMode::Normal),
            TokenKind::DialogueBlockStartTag => self.modes.push(LexingMode::DialogueBlock),
            TokenKind::CloseBrace | TokenKind::DialogueBlockEndTag => {
                if self.modes.len() > 1 {
                    self.modes.pop();
                }
            }
            _ => {}
        }
    }

    fn token(&self, kind: TokenKind, flags: TokenFlags) -> SyntaxToken {
        SyntaxToken::new(kind, self.scanner.lexeme_span(), flags)
    }

    fn report(&mut self, id: DiagnosticId, span: Span) {
        self.diagnostics.report(id, span);
    }

    // ---------------------------------------------------------------------
    // Trivia
    // ---------------------------------------------------------------------

    /// Skip whitespace and comments. Leading trivia also consumes line
    /// breaks; trailing trivia stops in front of the first one.
    fn skip_trivia(&mut self, include_line_breaks: bool) {
        loop {
            let before = self.scanner.position();
            self.scanner.skip_whitespace(include_line_breaks);

            if self.at_line_comment() {
                self.scanner.skip_to_end_of_line();
            } else if self.scanner.at_text("/*") {
                self.skip_block_comment();
            }

            if self.scanner.position() == before {
                break;
            }
        }
    }

    /// `//`, plus the legacy `.//`, `>//` and `..` spellings.
    fn at_line_comment(&self) -> bool {
        ["//", ".//", ">//", ".."]
            .iter()
            .any(|start| self.scanner.at_text(start))
    }

    /// Skip a `/* ... */` comment. A `*/` inside double quotes does not end it.
    fn skip_block_comment(&mut self) {
        let start = self.scanner.position();
        self.scanner.advance_if_text("/*");

        let mut in_quotes = false;
        loop {
            if !in_quotes && self.scanner.advance_if_text("*/") {
                return;
            }
            match self.scanner.advance() {
                Some('"') => in_quotes = !in_quotes,
                Some(_) => {}
                None => break,
            }
        }

        let end = self.scanner.position();
        self.report(DiagnosticId::UnterminatedComment, Span::new(start..end));
    }

    fn skip_markup_comments(&mut self) {
        while self.scanner.at_text("//") {
            self.scanner.skip_to_end_of_line();
        }
    }

    // ---------------------------------------------------------------------
    // Syntax tokens
    // ---------------------------------------------------------------------

    fn lex_syntax_token(&mut self) -> SyntaxToken {
        let Some(c) = self.scanner.peek() else {
            return self.token(TokenKind::EndOfFileToken, TokenFlags::empty());
        };

        match c {
            '"' => self.lex_string(),
            '0'..='9' => self.lex_number(),
            '#' => self.lex_hash(),
            '<' => self.lex_less_than(),
            '$' => self
                .lex_identifier()
                .unwrap_or_else(|| self.punctuation(TokenKind::Dollar)),
            '@' => {
                if self.scanner.advance_if_text("@->") {
                    self.token(TokenKind::AtArrow, TokenFlags::empty())
                } else {
                    self.punctuation(TokenKind::At)
                }
            }
            '{' => self.punctuation(TokenKind::OpenBrace),
            '}' => self.punctuation(TokenKind::CloseBrace),
            '(' => self.punctuation(TokenKind::OpenParen),
            ')' => self.punctuation(TokenKind::CloseParen),
            ',' => self.punctuation(TokenKind::Comma),
            '.' => self.punctuation(TokenKind::Dot),
            ';' => self.punctuation(TokenKind::Semicolon),
            ':' => self.punctuation(TokenKind::Colon),
            '%' => self.punctuation(TokenKind::Percent),
            '+' => self.compound(
                TokenKind::Plus,
                &[('=', TokenKind::PlusEquals), ('+', TokenKind::PlusPlus)],
            ),
            '-' => self.compound(
                TokenKind::Minus,
                &[
                    ('=', TokenKind::MinusEquals),
                    ('-', TokenKind::MinusMinus),
                    ('>', TokenKind::Arrow),
                ],
            ),
            '*' => self.compound(TokenKind::Asterisk, &[('=', TokenKind::AsteriskEquals)]),
            '/' => self.compound(TokenKind::Slash, &[('=', TokenKind::SlashEquals)]),
            '=' => self.compound(TokenKind::Equals, &[('=', TokenKind::EqualsEquals)]),
            '!' => self.compound(
                TokenKind::Exclamation,
                &[('=', TokenKind::ExclamationEquals)],
            ),
            '>' => self.compound(
                TokenKind::GreaterThan,
                &[('=', TokenKind::GreaterThanEquals)],
            ),
            '&' => self.compound(
                TokenKind::Ampersand,
                &[('&', TokenKind::AmpersandAmpersand)],
            ),
            '|' if self.scanner.at_text("||") => {
                self.scanner.advance_if_text("||");
                self.token(TokenKind::BarBar, TokenFlags::empty())
            }
            c if syntax_facts::is_identifier_start(c) => {
                self.lex_identifier().unwrap_or_else(|| self.lex_bad_token())
            }
            _ => self.lex_bad_token(),
        }
    }

    fn punctuation(&mut self, kind: TokenKind) -> SyntaxToken {
        self.scanner.advance();
        self.token(kind, TokenFlags::empty())
    }

    /// Single-character operator that may be extended by one of `suffixes`.
    fn compound(&mut self, single: TokenKind, suffixes: &[(char, TokenKind)]) -> SyntaxToken {
        self.scanner.advance();
        let kind = suffixes
            .iter()
            .find(|(suffix, _)| self.scanner.advance_if(*suffix))
            .map_or(single, |(_, kind)| *kind);
        self.token(kind, TokenFlags::empty())
    }

    /// Unscannable input: everything up to the end of the line.
    fn lex_bad_token(&mut self) -> SyntaxToken {
        self.scanner.advance();
        self.scanner.skip_to_end_of_line();
        self.token(TokenKind::BadToken, TokenFlags::empty())
    }

    /// Identifier with an optional `$`/`#` sigil, or a keyword.
    ///
    /// Returns `None`, without consuming anything, if no identifier
    /// characters follow the sigil.
    fn lex_identifier(&mut self) -> Option<SyntaxToken> {
        let checkpoint = self.scanner.checkpoint();
        let mut flags = TokenFlags::empty();
        if self.scanner.advance_if('$') {
            flags |= TokenFlags::HAS_DOLLAR_PREFIX;
        } else if self.scanner.advance_if('#') {
            flags |= TokenFlags::HAS_HASH_PREFIX;
        }

        let value = self.scanner.advance_while(syntax_facts::is_identifier_part);
        if value.is_empty() {
            self.scanner.reset(&checkpoint);
            return None;
        }

        let kind = if flags.is_empty() {
            syntax_facts::keyword_kind(value).unwrap_or(TokenKind::Identifier)
        } else {
            TokenKind::Identifier
        };
        Some(self.token(kind, flags))
    }

    /// Integer or decimal literal. A literal running straight into identifier
    /// characters (`215abc`) is rescanned as an identifier.
    fn lex_number(&mut self) -> SyntaxToken {
        let checkpoint = self.scanner.checkpoint();
        let mut flags = TokenFlags::empty();

        self.scanner.advance_while(|c| c.is_ascii_digit());
        if self.scanner.peek() == Some('.')
            && self.scanner.peek_at(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.scanner.advance();
            self.scanner.advance_while(|c| c.is_ascii_digit());
            flags |= TokenFlags::HAS_DECIMAL_POINT;
        }

        if self
            .scanner
            .peek()
            .is_some_and(syntax_facts::is_identifier_part)
        {
            self.scanner.reset(&checkpoint);
            return self.lex_identifier().unwrap_or_else(|| self.lex_bad_token());
        }

        let text = self.scanner.lexeme();
        if !flags.contains(TokenFlags::HAS_DECIMAL_POINT) && text.parse::<i32>().is_err() {
            self.diagnostics.report_with(
                DiagnosticId::NumberTooLarge,
                self.scanner.lexeme_span(),
                [text],
            );
            flags |= TokenFlags::HAS_DIAGNOSTICS;
        }
        self.token(TokenKind::NumericLiteral, flags)
    }

    /// `#include`, a `#RRGGBB` color, a `#`-sigiled identifier or a bare `#`.
    fn lex_hash(&mut self) -> SyntaxToken {
        let ends_word = |c: Option<char>| !c.is_some_and(syntax_facts::is_identifier_part);

        if self.scanner.at_text("#include") && ends_word(self.scanner.peek_at(8)) {
            self.scanner.advance_if_text("#include");
            return self.token(TokenKind::IncludeDirective, TokenFlags::empty());
        }

        let is_hex_triplet = (1..=6).all(|n| {
            self.scanner
                .peek_at(n)
                .is_some_and(|c| c.is_ascii_hexdigit())
        }) && ends_word(self.scanner.peek_at(7));
        if is_hex_triplet {
            for _ in 0..7 {
                self.scanner.advance();
            }
            return self.token(TokenKind::NumericLiteral, TokenFlags::IS_HEX_TRIPLET);
        }

        self.lex_identifier()
            .unwrap_or_else(|| self.punctuation(TokenKind::Hash))
    }

    /// `<=`, `</PRE>`, `<PRE ...>` or `<`. Tag names ignore case.
    fn lex_less_than(&mut self) -> SyntaxToken {
        if self.scanner.advance_if_text("<=") {
            return self.token(TokenKind::LessThanEquals, TokenFlags::empty());
        }
        if self.scanner.advance_if_caseless("</pre>") {
            return self.token(TokenKind::DialogueBlockEndTag, TokenFlags::empty());
        }

        let opens_tag = self.scanner.at_caseless("<pre")
            && self
                .scanner
                .peek_at(4)
                .is_none_or(|c| c == '>' || c.is_whitespace());
        if !opens_tag {
            return self.punctuation(TokenKind::LessThan);
        }

        self.scanner.advance_if_caseless("<pre");
        self.scanner
            .advance_while(|c| c != '>' && c != '\n' && c != '\r');
        let mut flags = TokenFlags::empty();
        if !self.scanner.advance_if('>') {
            self.report(
                DiagnosticId::UnterminatedDialogueBlockStartTag,
                self.scanner.lexeme_span(),
            );
            flags |= TokenFlags::HAS_DIAGNOSTICS;
        }
        self.token(TokenKind::DialogueBlockStartTag, flags)
    }

    /// String literal or quoted identifier, optionally with a `$`/`#` sigil
    /// after the opening quote. Quoted `null`/`true`/`false` become keywords.
    fn lex_string(&mut self) -> SyntaxToken {
        self.scanner.advance();
        let mut flags = TokenFlags::IS_QUOTED;
        if self.scanner.advance_if('$') {
            flags |= TokenFlags::HAS_DOLLAR_PREFIX;
        } else if self.scanner.advance_if('#') {
            flags |= TokenFlags::HAS_HASH_PREFIX;
        }

        self.scanner.advance_while(|c| c != '"');
        if !self.scanner.advance_if('"') {
            self.report(DiagnosticId::UnterminatedString, self.scanner.lexeme_span());
            flags |= TokenFlags::HAS_DIAGNOSTICS;
        }

        let mut token = self.token(TokenKind::StringLiteralOrQuotedIdentifier, flags);
        let has_sigil = flags.intersects(TokenFlags::HAS_DOLLAR_PREFIX | TokenFlags::HAS_HASH_PREFIX);
        if !has_sigil {
            let value = token.value_text(self.scanner.source());
            if let Some(kind) = syntax_facts::literal_keyword_kind(value) {
                token.kind = kind;
            }
        }
        token
    }

    // ---------------------------------------------------------------------
    // Markup
    // ---------------------------------------------------------------------

    /// Free text inside a dialogue block.
    ///
    /// Stops in front of `{`, the matching `</PRE>`, a `//` comment or a
    /// blank line. Nested `<PRE>...</PRE>` pairs are part of the text.
    fn lex_markup(&mut self) -> SyntaxToken {
        if self.scanner.at_double_line_break() {
            self.scanner.advance_line_break();
            self.scanner.advance_line_break();
            return self.token(TokenKind::MarkupBlankLine, TokenFlags::empty());
        }
        if self.scanner.peek() == Some('[') {
            return self.lex_dialogue_block_identifier();
        }

        let mut depth = 0usize;
        loop {
            if self.scanner.is_at_end() || self.scanner.at_text("{") {
                break;
            }
            if self.scanner.at_caseless("</pre>") {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                self.scanner.advance_if_caseless("</pre>");
                continue;
            }
            if self.scanner.advance_if_caseless("<pre") {
                depth += 1;
                continue;
            }
            if depth == 0 && self.scanner.at_text("//") {
                break;
            }
            if self.scanner.at_double_line_break() {
                break;
            }
            self.scanner.advance();
        }
        self.token(TokenKind::Markup, TokenFlags::empty())
    }

    fn lex_dialogue_block_identifier(&mut self) -> SyntaxToken {
        self.scanner.advance();
        self.scanner
            .advance_while(|c| c != ']' && c != '\n' && c != '\r');
        let mut flags = TokenFlags::empty();
        if !self.scanner.advance_if(']') {
            self.report(
                DiagnosticId::UnterminatedDialogueBlockIdentifier,
                self.scanner.lexeme_span(),
            );
            flags |= TokenFlags::HAS_DIAGNOSTICS;
        }
        self.token(TokenKind::DialogueBlockIdentifier, flags)
    }
}

/// Lex `text` to exhaustion.
///
/// The returned tokens always end with exactly one `EndOfFileToken`.
///
/// # Example
///
/// ```
/// # use nss_parser::{tokenize, LexingMode, TokenKind};
///
/// let (tokens, diagnostics) = tokenize("x = 215abc;", LexingMode::Normal);
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     [
///         TokenKind::Identifier,
///         TokenKind::Equals,
///         TokenKind::Identifier,
///         TokenKind::Semicolon,
///         TokenKind::EndOfFileToken,
///     ]
/// );
/// assert!(diagnostics.is_empty());
/// ```
pub fn tokenize(text: &str, initial_mode: LexingMode) -> (Vec<SyntaxToken>, DiagnosticBag) {
    let mut lexer = Lexer::new(text, initial_mode);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.lex();
        tokens.push(token);
        if token.kind == TokenKind::EndOfFileToken {
            break;
        }
    }

    debug!(
        tokens = tokens.len(),
        diagnostics = lexer.diagnostics().len(),
        mode_depth = lexer.mode_depth();
        "Tokenized source"
    );
    (tokens, lexer.into_diagnostics())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(text: &str, mode: LexingMode) -> (Vec<SyntaxToken>, DiagnosticBag) {
        let (mut tokens, diagnostics) = tokenize(text, mode);
        assert_eq!(tokens.pop().map(|t| t.kind), Some(TokenKind::EndOfFileToken));
        (tokens, diagnostics)
    }

    fn kinds(text: &str) -> Vec<TokenKind> {
        kinds_in(text, LexingMode::Normal)
    }

    fn kinds_in(text: &str, mode: LexingMode) -> Vec<TokenKind> {
        lex_all(text, mode).0.iter().map(|t| t.kind).collect()
    }

    fn single(text: &str) -> SyntaxToken {
        let (tokens, _) = lex_all(text, LexingMode::Normal);
        assert_eq!(tokens.len(), 1, "expected one token for {text:?}: {tokens:?}");
        tokens[0]
    }

    fn diagnostic_ids(text: &str) -> Vec<DiagnosticId> {
        lex_all(text, LexingMode::Normal)
            .1
            .iter()
            .map(|d| d.id())
            .collect()
    }

    #[test]
    fn test_empty_source() {
        let (tokens, diagnostics) = tokenize("", LexingMode::Normal);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::EndOfFileToken);
        assert!(tokens[0].span.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_keywords() {
        use TokenKind::*;
        assert_eq!(
            kinds("chapter scene function if else while select case break return"),
            [
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
            ]
        );
        assert_eq!(
            kinds("call_scene call_chapter null True FALSE"),
            [
                CallSceneKeyword,
                CallChapterKeyword,
                NullKeyword,
                TrueKeyword,
                FalseKeyword,
            ]
        );
        assert_eq!(kinds("chapters"), [Identifier]);
    }

    #[test]
    fn test_operators() {
        use TokenKind::*;
        assert_eq!(
            kinds("+= ++ + -= -- -> - *= * /= / % == = != ! <= < >= > && & || @-> @"),
            [
                PlusEquals,
                PlusPlus,
                Plus,
                MinusEquals,
                MinusMinus,
                Arrow,
                Minus,
                AsteriskEquals,
                Asterisk,
                SlashEquals,
                Slash,
                Percent,
                EqualsEquals,
                Equals,
                ExclamationEquals,
                Exclamation,
                LessThanEquals,
                LessThan,
                GreaterThanEquals,
                GreaterThan,
                AmpersandAmpersand,
                Ampersand,
                BarBar,
                AtArrow,
                At,
            ]
        );
        assert_eq!(
            kinds("{ } ( ) , . ; :"),
            [
                OpenBrace, CloseBrace, OpenParen, CloseParen, Comma, Dot, Semicolon, Colon,
            ]
        );
    }

    #[test]
    fn test_number_followed_by_identifier_chars_is_identifier() {
        let token = single("215abc");
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.span, Span::new(0..6));

        assert_eq!(
            kinds("215;"),
            [TokenKind::NumericLiteral, TokenKind::Semicolon]
        );
    }

    #[test]
    fn test_decimal_literal() {
        let token = single("12.50");
        assert_eq!(token.kind, TokenKind::NumericLiteral);
        assert!(token.flags.contains(TokenFlags::HAS_DECIMAL_POINT));

        // A dot without digits after it is punctuation.
        assert_eq!(
            kinds("3."),
            [TokenKind::NumericLiteral, TokenKind::Dot]
        );
    }

    #[test]
    fn test_number_too_large() {
        let (tokens, diagnostics) = lex_all("99999999999", LexingMode::Normal);
        assert_eq!(tokens[0].kind, TokenKind::NumericLiteral);
        assert!(tokens[0].flags.contains(TokenFlags::HAS_DIAGNOSTICS));
        let diag = diagnostics.iter().next().unwrap();
        assert_eq!(diag.id(), DiagnosticId::NumberTooLarge);
        assert_eq!(diag.args(), ["99999999999"]);
    }

    #[test]
    fn test_hex_triplet() {
        let source = "#AABBCC ";
        let token = single(source);
        assert_eq!(token.kind, TokenKind::NumericLiteral);
        assert!(token.flags.contains(TokenFlags::IS_HEX_TRIPLET));
        assert_eq!(token.value_text(source), "AABBCC");
    }

    #[test]
    fn test_hex_triplet_continuing_identifier() {
        let source = "#AABBCCz";
        let token = single(source);
        assert_eq!(token.kind, TokenKind::Identifier);
        assert!(token.has_hash_prefix());
        assert_eq!(token.value_text(source), "AABBCCz");
    }

    #[test]
    fn test_hash_forms() {
        assert_eq!(
            kinds("#include \"lib.nss\""),
            [
                TokenKind::IncludeDirective,
                TokenKind::StringLiteralOrQuotedIdentifier
            ]
        );
        assert_eq!(kinds("#includes"), [TokenKind::Identifier]);
        assert_eq!(kinds("# ;"), [TokenKind::Hash, TokenKind::Semicolon]);
        assert_eq!(kinds("#ABC"), [TokenKind::Identifier]);
    }

    #[test]
    fn test_dollar_sigil() {
        let source = "$flag";
        let token = single(source);
        assert_eq!(token.kind, TokenKind::Identifier);
        assert!(token.has_dollar_prefix());
        assert_eq!(token.value_text(source), "flag");

        // A sigil with nothing after it is its own token.
        assert_eq!(kinds("$ x"), [TokenKind::Dollar, TokenKind::Identifier]);
        // Sigiled keywords stay identifiers.
        assert_eq!(kinds("$while"), [TokenKind::Identifier]);
    }

    #[test]
    fn test_quoted_keyword_is_retagged() {
        let token = single("\"null\"");
        assert_eq!(token.kind, TokenKind::NullKeyword);
        assert!(token.flags.contains(TokenFlags::IS_QUOTED));

        assert_eq!(single("\"TRUE\"").kind, TokenKind::TrueKeyword);
        assert_eq!(single("\"False\"").kind, TokenKind::FalseKeyword);
        assert_eq!(
            single("\"while\"").kind,
            TokenKind::StringLiteralOrQuotedIdentifier
        );
        assert_eq!(
            single("\"$null\"").kind,
            TokenKind::StringLiteralOrQuotedIdentifier
        );
    }

    #[test]
    fn test_quoted_sigil_flags() {
        let source = "\"$name\"";
        let token = single(source);
        assert!(token.has_dollar_prefix());
        assert_eq!(token.value_text(source), "name");

        assert!(single("\"#FF0000\"").has_hash_prefix());
    }

    #[test]
    fn test_unterminated_string() {
        let source = "\"abc";
        let (tokens, diagnostics) = lex_all(source, LexingMode::Normal);
        assert_eq!(tokens[0].kind, TokenKind::StringLiteralOrQuotedIdentifier);
        assert!(tokens[0].flags.contains(TokenFlags::HAS_DIAGNOSTICS));
        assert_eq!(tokens[0].value_text(source), "abc");
        assert_eq!(
            diagnostics.iter().map(|d| d.id()).collect::<Vec<_>>(),
            [DiagnosticId::UnterminatedString]
        );
    }

    #[test]
    fn test_comment_variants_are_trivia() {
        for source in [
            "// comment text\nx",
            ".. comment text\nx",
            ".// comment text\nx",
            ">// comment text\nx",
            "/* block\ncomment */ x",
        ] {
            assert_eq!(kinds(source), [TokenKind::Identifier], "source: {source:?}");
        }
    }

    #[test]
    fn test_block_comment_tracks_quotes() {
        assert_eq!(kinds("/* \"*/\" */ x"), [TokenKind::Identifier]);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let (tokens, diagnostics) = lex_all("x /* never closed", LexingMode::Normal);
        assert_eq!(tokens.len(), 1);
        let diag = diagnostics.iter().next().unwrap();
        assert_eq!(diag.id(), DiagnosticId::UnterminatedComment);
        assert_eq!(diag.span(), Span::new(2..17));
    }

    #[test]
    fn test_trailing_trivia_does_not_cross_lines() {
        let (tokens, _) = lex_all("a // one\n  b", LexingMode::Normal);
        assert_eq!(tokens[0].span, Span::new(0..1));
        assert_eq!(tokens[1].span, Span::new(11..12));
    }

    #[test]
    fn test_bad_token_runs_to_end_of_line() {
        let source = "`foo bar\nx";
        let (tokens, diagnostics) = lex_all(source, LexingMode::Normal);
        assert_eq!(tokens[0].kind, TokenKind::BadToken);
        assert_eq!(tokens[0].span, Span::new(0..8));
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_less_than_forms() {
        assert_eq!(
            kinds("a < b <= c"),
            [
                TokenKind::Identifier,
                TokenKind::LessThan,
                TokenKind::Identifier,
                TokenKind::LessThanEquals,
                TokenKind::Identifier,
            ]
        );
        // `<prev` is not a tag.
        assert_eq!(kinds("a<prev"), [
            TokenKind::Identifier,
            TokenKind::LessThan,
            TokenKind::Identifier,
        ]);
    }

    #[test]
    fn test_dialogue_block() {
        use TokenKind::*;
        let source = "<PRE box01>\n[text001]\nHello\n\nWorld\n</PRE>";
        let (tokens, diagnostics) = lex_all(source, LexingMode::Normal);
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            [
                DialogueBlockStartTag,
                DialogueBlockIdentifier,
                Markup,
                MarkupBlankLine,
                Markup,
                DialogueBlockEndTag,
            ]
        );
        assert!(diagnostics.is_empty());
        assert_eq!(tokens[0].value_text(source).trim(), "box01");
        assert_eq!(tokens[1].value_text(source), "text001");
        assert_eq!(tokens[2].text(source), "\nHello");
        assert_eq!(tokens[4].text(source), "World\n");
    }

    #[test]
    fn test_dialogue_block_with_code() {
        use TokenKind::*;
        assert_eq!(
            kinds("<pre b>[t]Hi {Wait(1);} there</pre>"),
            [
                DialogueBlockStartTag,
                DialogueBlockIdentifier,
                Markup,
                OpenBrace,
                Identifier,
                OpenParen,
                NumericLiteral,
                CloseParen,
                Semicolon,
                CloseBrace,
                Markup,
                DialogueBlockEndTag,
            ]
        );
    }

    #[test]
    fn test_markup_after_code_keeps_its_whitespace() {
        let source = "<pre b>[t]Hi {Wait(1);} there</pre>";
        let (tokens, _) = lex_all(source, LexingMode::Normal);
        let markup: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Markup)
            .map(|t| t.text(source))
            .collect();
        assert_eq!(markup, ["Hi ", " there"]);
    }

    #[test]
    fn test_markup_after_code_is_not_a_comment() {
        use TokenKind::*;
        let source = "<pre a>[t]{Wait(1);}... she said.</pre>";
        let (tokens, diagnostics) = lex_all(source, LexingMode::Normal);
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            [
                DialogueBlockStartTag,
                DialogueBlockIdentifier,
                OpenBrace,
                Identifier,
                OpenParen,
                NumericLiteral,
                CloseParen,
                Semicolon,
                CloseBrace,
                Markup,
                DialogueBlockEndTag,
            ]
        );
        assert_eq!(tokens[9].text(source), "... she said.");
        assert!(diagnostics.is_empty());

        // `/*` after the brace is text as well.
        assert_eq!(
            kinds_in("{x}/* not a comment", LexingMode::DialogueBlock),
            [OpenBrace, Identifier, CloseBrace, Markup]
        );
    }

    #[test]
    fn test_markup_nested_pre_and_comments() {
        let source = "<pre a>[x]one <pre b> two </pre> three</pre>";
        let (tokens, _) = lex_all(source, LexingMode::Normal);
        assert_eq!(tokens[2].kind, TokenKind::Markup);
        assert_eq!(tokens[2].text(source), "one <pre b> two </pre> three");
        assert_eq!(tokens[3].kind, TokenKind::DialogueBlockEndTag);

        let source = "<pre a>[x]hi // note\nthere</pre>";
        let (tokens, _) = lex_all(source, LexingMode::Normal);
        let texts: Vec<_> = tokens[2..4].iter().map(|t| t.text(source)).collect();
        assert_eq!(texts, ["hi ", "\nthere"]);
    }

    #[test]
    fn test_dialogue_diagnostics() {
        assert_eq!(
            diagnostic_ids("<pre a>[abc\n</pre>"),
            [DiagnosticId::UnterminatedDialogueBlockIdentifier]
        );
        assert_eq!(
            diagnostic_ids("<pre a"),
            [DiagnosticId::UnterminatedDialogueBlockStartTag]
        );
    }

    #[test]
    fn test_initial_dialogue_mode() {
        assert_eq!(
            kinds_in("Hello {x}", LexingMode::DialogueBlock),
            [
                TokenKind::Markup,
                TokenKind::OpenBrace,
                TokenKind::Identifier,
                TokenKind::CloseBrace,
            ]
        );
    }

    #[test]
    fn test_mode_stack_balances() {
        let source = "{ <pre a>[x]text{ y }more</pre> }";
        let mut lexer = Lexer::new(source, LexingMode::Normal);
        let mut max_depth = 1;
        while lexer.lex().kind != TokenKind::EndOfFileToken {
            max_depth = max_depth.max(lexer.mode_depth());
        }
        assert_eq!(max_depth, 4);
        assert_eq!(lexer.mode_depth(), 1);
        assert_eq!(lexer.mode(), LexingMode::Normal);
    }

    #[test]
    fn test_mode_stack_never_underflows() {
        let mut lexer = Lexer::new("} } </pre> }", LexingMode::DialogueBlock);
        while lexer.lex().kind != TokenKind::EndOfFileToken {
            assert_eq!(lexer.mode_depth(), 1);
        }
        assert_eq!(lexer.mode(), LexingMode::DialogueBlock);
    }
}
