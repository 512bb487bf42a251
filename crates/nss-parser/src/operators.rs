//! Operator kinds, their precedence and the token kinds that spell them.

use std::fmt;

use crate::tokens::TokenKind;

/// Operator precedence levels, lowest first.
///
/// Binary operators at one level bind tighter than those at any level before
/// it. `Unary` applies to the prefix operators regardless of context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Assignment,
    Logical,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Primary,
}

impl Precedence {
    /// The next tighter level. `Primary` is its own successor.
    pub fn next(self) -> Self {
        match self {
            Precedence::Assignment => Precedence::Logical,
            Precedence::Logical => Precedence::Equality,
            Precedence::Equality => Precedence::Relational,
            Precedence::Relational => Precedence::Additive,
            Precedence::Additive => Precedence::Multiplicative,
            Precedence::Multiplicative => Precedence::Unary,
            Precedence::Unary | Precedence::Primary => Precedence::Primary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    // Unary
    Not,
    UnaryPlus,
    UnaryMinus,

    // Binary
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LogicalAnd,
    LogicalOr,

    // Assignment
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    Increment,
    Decrement,
}

impl OperatorKind {
    pub fn precedence(self) -> Precedence {
        match self {
            OperatorKind::Not | OperatorKind::UnaryPlus | OperatorKind::UnaryMinus => {
                Precedence::Unary
            }
            OperatorKind::Multiply | OperatorKind::Divide | OperatorKind::Remainder => {
                Precedence::Multiplicative
            }
            OperatorKind::Add | OperatorKind::Subtract => Precedence::Additive,
            OperatorKind::LessThan
            | OperatorKind::LessThanOrEqual
            | OperatorKind::GreaterThan
            | OperatorKind::GreaterThanOrEqual => Precedence::Relational,
            OperatorKind::Equals | OperatorKind::NotEquals => Precedence::Equality,
            OperatorKind::LogicalAnd | OperatorKind::LogicalOr => Precedence::Logical,
            _ => Precedence::Assignment,
        }
    }

    /// `++` and `--` take no right operand.
    pub fn is_postfix(self) -> bool {
        matches!(self, OperatorKind::Increment | OperatorKind::Decrement)
    }

    pub fn text(self) -> &'static str {
        match self {
            OperatorKind::Not => "!",
            OperatorKind::UnaryPlus | OperatorKind::Add => "+",
            OperatorKind::UnaryMinus | OperatorKind::Subtract => "-",
            OperatorKind::Multiply => "*",
            OperatorKind::Divide => "/",
            OperatorKind::Remainder => "%",
            OperatorKind::Equals => "==",
            OperatorKind::NotEquals => "!=",
            OperatorKind::LessThan => "<",
            OperatorKind::LessThanOrEqual => "<=",
            OperatorKind::GreaterThan => ">",
            OperatorKind::GreaterThanOrEqual => ">=",
            OperatorKind::LogicalAnd => "&&",
            OperatorKind::LogicalOr => "||",
            OperatorKind::Assign => "=",
            OperatorKind::AddAssign => "+=",
            OperatorKind::SubtractAssign => "-=",
            OperatorKind::MultiplyAssign => "*=",
            OperatorKind::DivideAssign => "/=",
            OperatorKind::Increment => "++",
            OperatorKind::Decrement => "--",
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Prefix operator spelled by `kind`, if any.
pub fn unary_operator(kind: TokenKind) -> Option<OperatorKind> {
    match kind {
        TokenKind::Exclamation => Some(OperatorKind::Not),
        TokenKind::Plus => Some(OperatorKind::UnaryPlus),
        TokenKind::Minus => Some(OperatorKind::UnaryMinus),
        _ => None,
    }
}

/// Binary operator spelled by `kind`, if any.
pub fn binary_operator(kind: TokenKind) -> Option<OperatorKind> {
    let op = match kind {
        TokenKind::Plus => OperatorKind::Add,
        TokenKind::Minus => OperatorKind::Subtract,
        TokenKind::Asterisk => OperatorKind::Multiply,
        TokenKind::Slash => OperatorKind::Divide,
        TokenKind::Percent => OperatorKind::Remainder,
        TokenKind::EqualsEquals => OperatorKind::Equals,
        TokenKind::ExclamationEquals => OperatorKind::NotEquals,
        TokenKind::LessThan => OperatorKind::LessThan,
        TokenKind::LessThanEquals => OperatorKind::LessThanOrEqual,
        TokenKind::GreaterThan => OperatorKind::GreaterThan,
        TokenKind::GreaterThanEquals => OperatorKind::GreaterThanOrEqual,
        TokenKind::AmpersandAmpersand => OperatorKind::LogicalAnd,
        TokenKind::BarBar => OperatorKind::LogicalOr,
        _ => return None,
    };
    Some(op)
}

/// Assignment operator spelled by `kind`, if any.
pub fn assignment_operator(kind: TokenKind) -> Option<OperatorKind> {
    let op = match kind {
        TokenKind::Equals => OperatorKind::Assign,
        TokenKind::PlusEquals => OperatorKind::AddAssign,
        TokenKind::MinusEquals => OperatorKind::SubtractAssign,
        TokenKind::AsteriskEquals => OperatorKind::MultiplyAssign,
        TokenKind::SlashEquals => OperatorKind::DivideAssign,
        TokenKind::PlusPlus => OperatorKind::Increment,
        TokenKind::MinusMinus => OperatorKind::Decrement,
        _ => return None,
    };
    Some(op)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_order() {
        assert!(Precedence::Logical < Precedence::Equality);
        assert!(Precedence::Equality < Precedence::Relational);
        assert!(Precedence::Additive < Precedence::Multiplicative);
        assert_eq!(Precedence::Multiplicative.next(), Precedence::Unary);
        assert_eq!(Precedence::Primary.next(), Precedence::Primary);
    }

    #[test]
    fn test_token_mapping_by_position() {
        assert_eq!(unary_operator(TokenKind::Minus), Some(OperatorKind::UnaryMinus));
        assert_eq!(binary_operator(TokenKind::Minus), Some(OperatorKind::Subtract));
        assert_eq!(assignment_operator(TokenKind::Minus), None);
        assert_eq!(
            assignment_operator(TokenKind::MinusMinus),
            Some(OperatorKind::Decrement)
        );
        assert_eq!(binary_operator(TokenKind::Equals), None);
    }

    #[test]
    fn test_operator_facts() {
        assert_eq!(OperatorKind::LogicalOr.precedence(), Precedence::Logical);
        assert_eq!(OperatorKind::Remainder.precedence(), Precedence::Multiplicative);
        assert!(OperatorKind::Increment.is_postfix());
        assert_eq!(OperatorKind::LessThanOrEqual.to_string(), "<=");
    }
}
