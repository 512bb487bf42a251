//! Statement nodes.

use nss_core::identifier::Id;

use crate::{
    span::{Span, Spanned},
    syntax::Expression,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Block(Block),
    If(IfStatement),
    While(WhileStatement),
    Break(BreakStatement),
    Return(ReturnStatement),
    Expression(ExpressionStatement),
    Select(SelectStatement),
    SelectSection(SelectSection),
    CallScene(CallSceneStatement),
    CallChapter(CallChapterStatement),
    DialogueBlock(DialogueBlock),
    PXmlString(PXmlString),
    PXmlLineSeparator(PXmlLineSeparator),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Block(block) => block.span,
            Statement::If(statement) => statement.span,
            Statement::While(statement) => statement.span,
            Statement::Break(statement) => statement.span,
            Statement::Return(statement) => statement.span,
            Statement::Expression(statement) => statement.span,
            Statement::Select(statement) => statement.span,
            Statement::SelectSection(section) => section.span,
            Statement::CallScene(statement) => statement.span,
            Statement::CallChapter(statement) => statement.span,
            Statement::DialogueBlock(block) => block.span,
            Statement::PXmlString(text) => text.span,
            Statement::PXmlLineSeparator(separator) => separator.span,
        }
    }
}

/// `{ statements }`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub if_true: Box<Statement>,
    pub if_false: Option<Box<Statement>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Box<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakStatement {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub span: Span,
}

/// `select { case ...: { } ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    pub body: Block,
    pub span: Span,
}

/// One `case label: { ... }` choice of a select.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectSection {
    pub label: Spanned<Id>,
    pub body: Block,
    pub span: Span,
}

/// `call_scene @->name;` or `call_scene path->name;`
#[derive(Debug, Clone, PartialEq)]
pub struct CallSceneStatement {
    /// `None` refers to the current file.
    pub target_file: Option<Spanned<Id>>,
    pub scene_name: Spanned<Id>,
    pub span: Span,
}

/// `call_chapter path;`
#[derive(Debug, Clone, PartialEq)]
pub struct CallChapterStatement {
    pub target_file: Spanned<Id>,
    pub span: Span,
}

/// `<PRE box>[name] ... </PRE>`
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueBlock {
    /// The text box the dialogue is shown in.
    pub box_name: Id,
    pub block_name: Spanned<Id>,
    pub body: Vec<Statement>,
    pub span: Span,
}

/// A run of dialogue markup, kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct PXmlString {
    pub text: Id,
    pub span: Span,
}

/// A blank line inside a dialogue block.
#[derive(Debug, Clone, PartialEq)]
pub struct PXmlLineSeparator {
    pub span: Span,
}
