//! Syntax tree produced by the parser.
//!
//! Nodes are plain owned data: every parent owns its children and nothing
//! points back up the tree. Each node carries the span of its own subtree.
//! Typed consumers walk the tree through [`crate::visitor`]; generic tooling
//! can use [`SyntaxNodeRef::children`] instead.

mod declaration;
mod expression;
mod node;
mod statement;

pub use declaration::{Parameter, SourceFileRoot, Subroutine, SubroutineKind};
pub use expression::{
    AssignmentExpression, BezierControlPoint, BezierExpression, BinaryExpression, ConstantValue,
    Expression, FunctionCallExpression, LiteralExpression, NameExpression, Sigil,
    UnaryExpression,
};
pub use node::{SyntaxNodeKind, SyntaxNodeRef, dump_tree};
pub use statement::{
    Block, BreakStatement, CallChapterStatement, CallSceneStatement, DialogueBlock,
    ExpressionStatement, IfStatement, PXmlLineSeparator, PXmlString, ReturnStatement,
    SelectSection, SelectStatement, Statement, WhileStatement,
};
