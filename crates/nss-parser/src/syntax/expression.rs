//! Expression nodes.

use std::fmt;

use nss_core::identifier::Id;

use crate::{
    operators::OperatorKind,
    span::{Span, Spanned},
};

/// The value of a literal expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstantValue {
    Null,
    Boolean(bool),
    Integer(i32),
    Float(f64),
    String(Id),
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Null => write!(f, "null"),
            ConstantValue::Boolean(value) => write!(f, "{value}"),
            ConstantValue::Integer(value) => write!(f, "{value}"),
            ConstantValue::Float(value) => write!(f, "{value}"),
            ConstantValue::String(value) => write!(f, "\"{value}\""),
        }
    }
}

/// The sigil a name was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sigil {
    /// `$name`: a global variable.
    Dollar,
    /// `#name`: a system variable.
    Hash,
}

impl Sigil {
    pub fn as_char(self) -> char {
        match self {
            Sigil::Dollar => '$',
            Sigil::Hash => '#',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(LiteralExpression),
    Name(NameExpression),
    Unary(UnaryExpression),
    Binary(BinaryExpression),
    Assignment(AssignmentExpression),
    FunctionCall(FunctionCallExpression),
    Bezier(BezierExpression),
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Expression::Literal(literal) => literal.span,
            Expression::Name(name) => name.span,
            Expression::Unary(unary) => unary.span,
            Expression::Binary(binary) => binary.span,
            Expression::Assignment(assignment) => assignment.span,
            Expression::FunctionCall(call) => call.span,
            Expression::Bezier(bezier) => bezier.span,
        }
    }

    /// Only assignments and calls have an effect when used as a statement.
    pub fn is_valid_statement(&self) -> bool {
        matches!(self, Expression::Assignment(_) | Expression::FunctionCall(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpression {
    pub value: ConstantValue,
    /// Written as a `#RRGGBB` color.
    pub is_hex_triplet: bool,
    pub span: Span,
}

/// A reference to a variable or parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct NameExpression {
    pub name: Id,
    pub sigil: Option<Sigil>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    pub operator: Spanned<OperatorKind>,
    pub operand: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    pub left: Box<Expression>,
    pub operator: Spanned<OperatorKind>,
    pub right: Box<Expression>,
    pub span: Span,
}

/// `target op value`. For `++`/`--` the value is a copy of the target.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpression {
    pub target: Box<Expression>,
    pub operator: Spanned<OperatorKind>,
    pub value: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCallExpression {
    pub target_name: Spanned<Id>,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

/// A cubic Bézier curve literal: `(x0, y0, (x1, y1), {x2, y2}, ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierExpression {
    pub control_points: Vec<BezierControlPoint>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BezierControlPoint {
    pub x: Expression,
    pub y: Expression,
    pub is_starting_point: bool,
}
