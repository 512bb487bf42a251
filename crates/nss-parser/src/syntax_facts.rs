//! Static facts about the surface syntax: keyword spellings, token text and
//! character classes.

use std::{collections::HashMap, sync::LazyLock};

use crate::tokens::TokenKind;

/// Every accepted keyword spelling. `null`, `true` and `false` have several.
static KEYWORDS: LazyLock<HashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    HashMap::from([
        ("chapter", TokenKind::ChapterKeyword),
        ("scene", TokenKind::SceneKeyword),
        ("function", TokenKind::FunctionKeyword),
        ("if", TokenKind::IfKeyword),
        ("else", TokenKind::ElseKeyword),
        ("while", TokenKind::WhileKeyword),
        ("select", TokenKind::SelectKeyword),
        ("case", TokenKind::CaseKeyword),
        ("break", TokenKind::BreakKeyword),
        ("return", TokenKind::ReturnKeyword),
        ("call_scene", TokenKind::CallSceneKeyword),
        ("call_chapter", TokenKind::CallChapterKeyword),
        ("null", TokenKind::NullKeyword),
        ("Null", TokenKind::NullKeyword),
        ("NULL", TokenKind::NullKeyword),
        ("true", TokenKind::TrueKeyword),
        ("True", TokenKind::TrueKeyword),
        ("TRUE", TokenKind::TrueKeyword),
        ("false", TokenKind::FalseKeyword),
        ("False", TokenKind::FalseKeyword),
        ("FALSE", TokenKind::FalseKeyword),
    ])
});

/// Look up the keyword kind for an identifier's text.
pub fn keyword_kind(text: &str) -> Option<TokenKind> {
    KEYWORDS.get(text).copied()
}

/// Look up `null`/`true`/`false` only. Used to re-tag quoted keywords.
pub fn literal_keyword_kind(text: &str) -> Option<TokenKind> {
    keyword_kind(text).filter(|kind| is_literal_keyword(*kind))
}

pub fn is_literal_keyword(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::NullKeyword | TokenKind::TrueKeyword | TokenKind::FalseKeyword
    )
}

/// Returns `true` for tokens that can be a term on their own: literals,
/// names and literal keywords.
pub fn is_literal_or_name(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier
            | TokenKind::NumericLiteral
            | TokenKind::StringLiteralOrQuotedIdentifier
    ) || is_literal_keyword(kind)
}

/// Canonical surface text of fixed-text token kinds.
pub fn token_text(kind: TokenKind) -> Option<&'static str> {
    let text = match kind {
        TokenKind::ChapterKeyword => "chapter",
        TokenKind::SceneKeyword => "scene",
        TokenKind::FunctionKeyword => "function",
        TokenKind::IfKeyword => "if",
        TokenKind::ElseKeyword => "else",
        TokenKind::WhileKeyword => "while",
        TokenKind::SelectKeyword => "select",
        TokenKind::CaseKeyword => "case",
        TokenKind::BreakKeyword => "break",
        TokenKind::ReturnKeyword => "return",
        TokenKind::CallSceneKeyword => "call_scene",
        TokenKind::CallChapterKeyword => "call_chapter",
        TokenKind::NullKeyword => "null",
        TokenKind::TrueKeyword => "true",
        TokenKind::FalseKeyword => "false",
        TokenKind::IncludeDirective => "#include",
        TokenKind::DialogueBlockEndTag => "</PRE>",
        TokenKind::OpenBrace => "{",
        TokenKind::CloseBrace => "}",
        TokenKind::OpenParen => "(",
        TokenKind::CloseParen => ")",
        TokenKind::Comma => ",",
        TokenKind::Dot => ".",
        TokenKind::Semicolon => ";",
        TokenKind::Colon => ":",
        TokenKind::Hash => "#",
        TokenKind::Dollar => "$",
        TokenKind::At => "@",
        TokenKind::AtArrow => "@->",
        TokenKind::Arrow => "->",
        TokenKind::Ampersand => "&",
        TokenKind::AmpersandAmpersand => "&&",
        TokenKind::BarBar => "||",
        TokenKind::Exclamation => "!",
        TokenKind::ExclamationEquals => "!=",
        TokenKind::Equals => "=",
        TokenKind::EqualsEquals => "==",
        TokenKind::LessThan => "<",
        TokenKind::LessThanEquals => "<=",
        TokenKind::GreaterThan => ">",
        TokenKind::GreaterThanEquals => ">=",
        TokenKind::Plus => "+",
        TokenKind::PlusEquals => "+=",
        TokenKind::PlusPlus => "++",
        TokenKind::Minus => "-",
        TokenKind::MinusEquals => "-=",
        TokenKind::MinusMinus => "--",
        TokenKind::Asterisk => "*",
        TokenKind::AsteriskEquals => "*=",
        TokenKind::Slash => "/",
        TokenKind::SlashEquals => "/=",
        TokenKind::Percent => "%",
        _ => return None,
    };
    Some(text)
}

pub fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

pub fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Returns `true` if `text` can be written as a bare identifier.
pub fn is_valid_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some_and(is_identifier_start)
        && chars.all(is_identifier_part)
        && keyword_kind(text).is_none()
}
