//! Typed traversal of the syntax tree.
//!
//! [`SyntaxVisitor`] has one method per concrete node kind. Every method
//! defaults to doing nothing, so a consumer overrides only what it cares
//! about. Each node's `accept` dispatches to the matching method; the
//! `walk_*` functions visit a node's children and are what an overriding
//! method calls to keep descending.
//!
//! # Example
//!
//! ```
//! # use nss_parser::{parse, visitor::{self, SyntaxVisitor}, syntax::{Block, FunctionCallExpression, ExpressionStatement}};
//! # use nss_core::source_text::SourceText;
//!
//! #[derive(Default)]
//! struct CallCounter(usize);
//!
//! impl<'a> SyntaxVisitor<'a> for CallCounter {
//!     fn visit_block(&mut self, block: &'a Block) {
//!         visitor::walk_block(self, block);
//!     }
//!     fn visit_expression_statement(&mut self, statement: &'a ExpressionStatement) {
//!         visitor::walk_expression_statement(self, statement);
//!     }
//!     fn visit_function_call(&mut self, _call: &'a FunctionCallExpression) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let source = SourceText::new("chapter main { Wait(1); Wait(2); }");
//! let parsed = parse(&source);
//! let mut counter = CallCounter::default();
//! visitor::walk_subroutine(&mut counter, &parsed.root.subroutines[0]);
//! assert_eq!(counter.0, 2);
//! ```

use crate::syntax::{
    AssignmentExpression, BezierExpression, BinaryExpression, Block, BreakStatement,
    CallChapterStatement, CallSceneStatement, DialogueBlock, Expression, ExpressionStatement,
    FunctionCallExpression, IfStatement, LiteralExpression, NameExpression, PXmlLineSeparator,
    PXmlString, Parameter, ReturnStatement, SelectSection, SelectStatement, SourceFileRoot,
    Statement, Subroutine, UnaryExpression, WhileStatement,
};

/// Visitor over borrowed syntax nodes. `'a` is the lifetime of the tree.
#[allow(unused_variables)]
pub trait SyntaxVisitor<'a> {
    fn visit_source_file(&mut self, root: &'a SourceFileRoot) {}
    fn visit_subroutine(&mut self, subroutine: &'a Subroutine) {}
    fn visit_parameter(&mut self, parameter: &'a Parameter) {}

    // Statements
    fn visit_block(&mut self, block: &'a Block) {}
    fn visit_if_statement(&mut self, statement: &'a IfStatement) {}
    fn visit_while_statement(&mut self, statement: &'a WhileStatement) {}
    fn visit_break_statement(&mut self, statement: &'a BreakStatement) {}
    fn visit_return_statement(&mut self, statement: &'a ReturnStatement) {}
    fn visit_expression_statement(&mut self, statement: &'a ExpressionStatement) {}
    fn visit_select_statement(&mut self, statement: &'a SelectStatement) {}
    fn visit_select_section(&mut self, section: &'a SelectSection) {}
    fn visit_call_scene_statement(&mut self, statement: &'a CallSceneStatement) {}
    fn visit_call_chapter_statement(&mut self, statement: &'a CallChapterStatement) {}
    fn visit_dialogue_block(&mut self, block: &'a DialogueBlock) {}
    fn visit_pxml_string(&mut self, text: &'a PXmlString) {}
    fn visit_pxml_line_separator(&mut self, separator: &'a PXmlLineSeparator) {}

    // Expressions
    fn visit_literal(&mut self, literal: &'a LiteralExpression) {}
    fn visit_name(&mut self, name: &'a NameExpression) {}
    fn visit_unary(&mut self, unary: &'a UnaryExpression) {}
    fn visit_binary(&mut self, binary: &'a BinaryExpression) {}
    fn visit_assignment(&mut self, assignment: &'a AssignmentExpression) {}
    fn visit_function_call(&mut self, call: &'a FunctionCallExpression) {}
    fn visit_bezier(&mut self, bezier: &'a BezierExpression) {}
}

impl SourceFileRoot {
    pub fn accept<'a, V: SyntaxVisitor<'a> + ?Sized>(&'a self, visitor: &mut V) {
        visitor.visit_source_file(self);
    }
}

impl Subroutine {
    pub fn accept<'a, V: SyntaxVisitor<'a> + ?Sized>(&'a self, visitor: &mut V) {
        visitor.visit_subroutine(self);
    }
}

impl Parameter {
    pub fn accept<'a, V: SyntaxVisitor<'a> + ?Sized>(&'a self, visitor: &mut V) {
        visitor.visit_parameter(self);
    }
}

impl Block {
    pub fn accept<'a, V: SyntaxVisitor<'a> + ?Sized>(&'a self, visitor: &mut V) {
        visitor.visit_block(self);
    }
}

impl Statement {
    /// Dispatch to the visitor method for this statement's kind.
    pub fn accept<'a, V: SyntaxVisitor<'a> + ?Sized>(&'a self, visitor: &mut V) {
        match self {
            Statement::Block(block) => visitor.visit_block(block),
            Statement::If(statement) => visitor.visit_if_statement(statement),
            Statement::While(statement) => visitor.visit_while_statement(statement),
            Statement::Break(statement) => visitor.visit_break_statement(statement),
            Statement::Return(statement) => visitor.visit_return_statement(statement),
            Statement::Expression(statement) => visitor.visit_expression_statement(statement),
            Statement::Select(statement) => visitor.visit_select_statement(statement),
            Statement::SelectSection(section) => visitor.visit_select_section(section),
            Statement::CallScene(statement) => visitor.visit_call_scene_statement(statement),
            Statement::CallChapter(statement) => visitor.visit_call_chapter_statement(statement),
            Statement::DialogueBlock(block) => visitor.visit_dialogue_block(block),
            Statement::PXmlString(text) => visitor.visit_pxml_string(text),
            Statement::PXmlLineSeparator(separator) => {
                visitor.visit_pxml_line_separator(separator)
            }
        }
    }
}

impl Expression {
    /// Dispatch to the visitor method for this expression's kind.
    pub fn accept<'a, V: SyntaxVisitor<'a> + ?Sized>(&'a self, visitor: &mut V) {
        match self {
            Expression::Literal(literal) => visitor.visit_literal(literal),
            Expression::Name(name) => visitor.visit_name(name),
            Expression::Unary(unary) => visitor.visit_unary(unary),
            Expression::Binary(binary) => visitor.visit_binary(binary),
            Expression::Assignment(assignment) => visitor.visit_assignment(assignment),
            Expression::FunctionCall(call) => visitor.visit_function_call(call),
            Expression::Bezier(bezier) => visitor.visit_bezier(bezier),
        }
    }
}

pub fn walk_source_file<'a, V: SyntaxVisitor<'a> + ?Sized>(visitor: &mut V, root: &'a SourceFileRoot) {
    for subroutine in &root.subroutines {
        subroutine.accept(visitor);
    }
}

pub fn walk_subroutine<'a, V: SyntaxVisitor<'a> + ?Sized>(visitor: &mut V, subroutine: &'a Subroutine) {
    for parameter in &subroutine.parameters {
        parameter.accept(visitor);
    }
    subroutine.body.accept(visitor);
}

pub fn walk_block<'a, V: SyntaxVisitor<'a> + ?Sized>(visitor: &mut V, block: &'a Block) {
    for statement in &block.statements {
        statement.accept(visitor);
    }
}

pub fn walk_if_statement<'a, V: SyntaxVisitor<'a> + ?Sized>(visitor: &mut V, statement: &'a IfStatement) {
    statement.condition.accept(visitor);
    statement.if_true.accept(visitor);
    if let Some(if_false) = &statement.if_false {
        if_false.accept(visitor);
    }
}

pub fn walk_while_statement<'a, V: SyntaxVisitor<'a> + ?Sized>(
    visitor: &mut V,
    statement: &'a WhileStatement,
) {
    statement.condition.accept(visitor);
    statement.body.accept(visitor);
}

pub fn walk_expression_statement<'a, V: SyntaxVisitor<'a> + ?Sized>(
    visitor: &mut V,
    statement: &'a ExpressionStatement,
) {
    statement.expression.accept(visitor);
}

pub fn walk_select_statement<'a, V: SyntaxVisitor<'a> + ?Sized>(
    visitor: &mut V,
    statement: &'a SelectStatement,
) {
    statement.body.accept(visitor);
}

pub fn walk_select_section<'a, V: SyntaxVisitor<'a> + ?Sized>(
    visitor: &mut V,
    section: &'a SelectSection,
) {
    section.body.accept(visitor);
}

pub fn walk_dialogue_block<'a, V: SyntaxVisitor<'a> + ?Sized>(visitor: &mut V, block: &'a DialogueBlock) {
    for statement in &block.body {
        statement.accept(visitor);
    }
}

pub fn walk_unary<'a, V: SyntaxVisitor<'a> + ?Sized>(visitor: &mut V, unary: &'a UnaryExpression) {
    unary.operand.accept(visitor);
}

pub fn walk_binary<'a, V: SyntaxVisitor<'a> + ?Sized>(visitor: &mut V, binary: &'a BinaryExpression) {
    binary.left.accept(visitor);
    binary.right.accept(visitor);
}

pub fn walk_assignment<'a, V: SyntaxVisitor<'a> + ?Sized>(
    visitor: &mut V,
    assignment: &'a AssignmentExpression,
) {
    assignment.target.accept(visitor);
    if !assignment.operator.is_postfix() {
        assignment.value.accept(visitor);
    }
}

pub fn walk_function_call<'a, V: SyntaxVisitor<'a> + ?Sized>(
    visitor: &mut V,
    call: &'a FunctionCallExpression,
) {
    for argument in &call.arguments {
        argument.accept(visitor);
    }
}

pub fn walk_bezier<'a, V: SyntaxVisitor<'a> + ?Sized>(visitor: &mut V, bezier: &'a BezierExpression) {
    for point in &bezier.control_points {
        point.x.accept(visitor);
        point.y.accept(visitor);
    }
}
