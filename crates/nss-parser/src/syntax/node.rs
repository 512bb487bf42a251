//! Untyped view over syntax nodes for generic tree walking.

use std::fmt::{self, Write as _};

use crate::{
    span::Span,
    syntax::{Block, Expression, Parameter, SourceFileRoot, Statement, Subroutine, SubroutineKind},
};

/// The concrete kind of a syntax node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxNodeKind {
    SourceFileRoot,
    ChapterDeclaration,
    SceneDeclaration,
    FunctionDeclaration,
    Parameter,
    Block,
    IfStatement,
    WhileStatement,
    BreakStatement,
    ReturnStatement,
    ExpressionStatement,
    SelectStatement,
    SelectSection,
    CallSceneStatement,
    CallChapterStatement,
    DialogueBlock,
    PXmlString,
    PXmlLineSeparator,
    LiteralExpression,
    NameExpression,
    UnaryExpression,
    BinaryExpression,
    AssignmentExpression,
    FunctionCallExpression,
    BezierExpression,
}

impl fmt::Display for SyntaxNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A borrowed reference to any node of the tree.
#[derive(Debug, Clone, Copy)]
pub enum SyntaxNodeRef<'a> {
    SourceFile(&'a SourceFileRoot),
    Subroutine(&'a Subroutine),
    Parameter(&'a Parameter),
    Block(&'a Block),
    Statement(&'a Statement),
    Expression(&'a Expression),
}

impl<'a> SyntaxNodeRef<'a> {
    pub fn kind(&self) -> SyntaxNodeKind {
        match self {
            SyntaxNodeRef::SourceFile(_) => SyntaxNodeKind::SourceFileRoot,
            SyntaxNodeRef::Subroutine(sub) => match sub.kind {
                SubroutineKind::Chapter => SyntaxNodeKind::ChapterDeclaration,
                SubroutineKind::Scene => SyntaxNodeKind::SceneDeclaration,
                SubroutineKind::Function => SyntaxNodeKind::FunctionDeclaration,
            },
            SyntaxNodeRef::Parameter(_) => SyntaxNodeKind::Parameter,
            SyntaxNodeRef::Block(_) => SyntaxNodeKind::Block,
            SyntaxNodeRef::Statement(statement) => match statement {
                Statement::Block(_) => SyntaxNodeKind::Block,
                Statement::If(_) => SyntaxNodeKind::IfStatement,
                Statement::While(_) => SyntaxNodeKind::WhileStatement,
                Statement::Break(_) => SyntaxNodeKind::BreakStatement,
                Statement::Return(_) => SyntaxNodeKind::ReturnStatement,
                Statement::Expression(_) => SyntaxNodeKind::ExpressionStatement,
                Statement::Select(_) => SyntaxNodeKind::SelectStatement,
                Statement::SelectSection(_) => SyntaxNodeKind::SelectSection,
                Statement::CallScene(_) => SyntaxNodeKind::CallSceneStatement,
                Statement::CallChapter(_) => SyntaxNodeKind::CallChapterStatement,
                Statement::DialogueBlock(_) => SyntaxNodeKind::DialogueBlock,
                Statement::PXmlString(_) => SyntaxNodeKind::PXmlString,
                Statement::PXmlLineSeparator(_) => SyntaxNodeKind::PXmlLineSeparator,
            },
            SyntaxNodeRef::Expression(expression) => match expression {
                Expression::Literal(_) => SyntaxNodeKind::LiteralExpression,
                Expression::Name(_) => SyntaxNodeKind::NameExpression,
                Expression::Unary(_) => SyntaxNodeKind::UnaryExpression,
                Expression::Binary(_) => SyntaxNodeKind::BinaryExpression,
                Expression::Assignment(_) => SyntaxNodeKind::AssignmentExpression,
                Expression::FunctionCall(_) => SyntaxNodeKind::FunctionCallExpression,
                Expression::Bezier(_) => SyntaxNodeKind::BezierExpression,
            },
        }
    }

    pub fn span(&self) -> Span {
        match self {
            SyntaxNodeRef::SourceFile(root) => root.span,
            SyntaxNodeRef::Subroutine(sub) => sub.span,
            SyntaxNodeRef::Parameter(parameter) => parameter.span,
            SyntaxNodeRef::Block(block) => block.span,
            SyntaxNodeRef::Statement(statement) => statement.span(),
            SyntaxNodeRef::Expression(expression) => expression.span(),
        }
    }

    /// Child nodes in a stable, source-like order.
    ///
    /// The synthesized value of `++`/`--` is not a child.
    pub fn children(&self) -> Vec<SyntaxNodeRef<'a>> {
        match *self {
            SyntaxNodeRef::SourceFile(root) => root
                .subroutines
                .iter()
                .map(SyntaxNodeRef::Subroutine)
                .collect(),
            SyntaxNodeRef::Subroutine(sub) => sub
                .parameters
                .iter()
                .map(SyntaxNodeRef::Parameter)
                .chain([SyntaxNodeRef::Block(&sub.body)])
                .collect(),
            SyntaxNodeRef::Parameter(_) => Vec::new(),
            SyntaxNodeRef::Block(block) => statements(&block.statements),
            SyntaxNodeRef::Statement(statement) => statement_children(statement),
            SyntaxNodeRef::Expression(expression) => expression_children(expression),
        }
    }
}

impl<'a> From<&'a SourceFileRoot> for SyntaxNodeRef<'a> {
    fn from(root: &'a SourceFileRoot) -> Self {
        SyntaxNodeRef::SourceFile(root)
    }
}

impl<'a> From<&'a Statement> for SyntaxNodeRef<'a> {
    fn from(statement: &'a Statement) -> Self {
        SyntaxNodeRef::Statement(statement)
    }
}

impl<'a> From<&'a Expression> for SyntaxNodeRef<'a> {
    fn from(expression: &'a Expression) -> Self {
        SyntaxNodeRef::Expression(expression)
    }
}

fn statements(statements: &[Statement]) -> Vec<SyntaxNodeRef<'_>> {
    statements.iter().map(SyntaxNodeRef::Statement).collect()
}

fn statement_children(statement: &Statement) -> Vec<SyntaxNodeRef<'_>> {
    match statement {
        Statement::Block(block) => statements(&block.statements),
        Statement::If(statement) => {
            let mut children = vec![
                SyntaxNodeRef::Expression(&statement.condition),
                SyntaxNodeRef::Statement(&statement.if_true),
            ];
            if let Some(if_false) = &statement.if_false {
                children.push(SyntaxNodeRef::Statement(if_false));
            }
            children
        }
        Statement::While(statement) => vec![
            SyntaxNodeRef::Expression(&statement.condition),
            SyntaxNodeRef::Statement(&statement.body),
        ],
        Statement::Expression(statement) => vec![SyntaxNodeRef::Expression(&statement.expression)],
        Statement::Select(statement) => vec![SyntaxNodeRef::Block(&statement.body)],
        Statement::SelectSection(section) => vec![SyntaxNodeRef::Block(&section.body)],
        Statement::DialogueBlock(block) => statements(&block.body),
        Statement::Break(_)
        | Statement::Return(_)
        | Statement::CallScene(_)
        | Statement::CallChapter(_)
        | Statement::PXmlString(_)
        | Statement::PXmlLineSeparator(_) => Vec::new(),
    }
}

fn expression_children(expression: &Expression) -> Vec<SyntaxNodeRef<'_>> {
    match expression {
        Expression::Literal(_) | Expression::Name(_) => Vec::new(),
        Expression::Unary(unary) => vec![SyntaxNodeRef::Expression(&unary.operand)],
        Expression::Binary(binary) => vec![
            SyntaxNodeRef::Expression(&binary.left),
            SyntaxNodeRef::Expression(&binary.right),
        ],
        Expression::Assignment(assignment) if assignment.operator.is_postfix() => {
            vec![SyntaxNodeRef::Expression(&assignment.target)]
        }
        Expression::Assignment(assignment) => vec![
            SyntaxNodeRef::Expression(&assignment.target),
            SyntaxNodeRef::Expression(&assignment.value),
        ],
        Expression::FunctionCall(call) => call
            .arguments
            .iter()
            .map(SyntaxNodeRef::Expression)
            .collect(),
        Expression::Bezier(bezier) => bezier
            .control_points
            .iter()
            .flat_map(|point| {
                [
                    SyntaxNodeRef::Expression(&point.x),
                    SyntaxNodeRef::Expression(&point.y),
                ]
            })
            .collect(),
    }
}

/// Render the tree under `node` as indented `Kind @ start..end` lines.
pub fn dump_tree<'a>(node: impl Into<SyntaxNodeRef<'a>>) -> String {
    fn dump(node: SyntaxNodeRef<'_>, depth: usize, out: &mut String) {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{:indent$}{} @ {}", "", node.kind(), node.span(), indent = depth * 2);
        for child in node.children() {
            dump(child, depth + 1, out);
        }
    }

    let mut out = String::new();
    dump(node.into(), 0, &mut out);
    out
}
