//! File-level nodes: the source file root, subroutines and parameters.

use std::fmt;

use nss_core::identifier::Id;

use crate::{
    span::{Span, Spanned},
    syntax::{Block, DialogueBlock, IfStatement, SelectSection, SelectStatement, WhileStatement},
    visitor::{self, SyntaxVisitor},
};

/// The root of a parsed script.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceFileRoot {
    /// Paths named by `#include` directives, in source order.
    pub file_references: Vec<Spanned<Id>>,
    pub subroutines: Vec<Subroutine>,
    pub chapter_count: usize,
    pub scene_count: usize,
    pub function_count: usize,
    pub span: Span,
}

impl SourceFileRoot {
    /// Find the first subroutine declared with `name`.
    pub fn subroutine(&self, name: &str) -> Option<&Subroutine> {
        self.subroutines.iter().find(|sub| *sub.name.inner() == name)
    }

    /// Iterate over the subroutines of one kind.
    pub fn subroutines_of_kind(&self, kind: SubroutineKind) -> impl Iterator<Item = &Subroutine> {
        self.subroutines.iter().filter(move |sub| sub.kind == kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubroutineKind {
    Chapter,
    Scene,
    Function,
}

impl fmt::Display for SubroutineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubroutineKind::Chapter => write!(f, "chapter"),
            SubroutineKind::Scene => write!(f, "scene"),
            SubroutineKind::Function => write!(f, "function"),
        }
    }
}

/// A `chapter`, `scene` or `function` declaration.
///
/// Only functions declare parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Subroutine {
    pub kind: SubroutineKind,
    pub name: Spanned<Id>,
    pub parameters: Vec<Parameter>,
    pub body: Block,
    pub span: Span,
}

impl Subroutine {
    /// Collect the dialogue blocks in this subroutine, in source order.
    ///
    /// Blocks nested inside control flow are included.
    pub fn dialogue_blocks(&self) -> Vec<&DialogueBlock> {
        let mut collector = DialogueBlockCollector::default();
        visitor::walk_block(&mut collector, &self.body);
        collector.blocks
    }
}

#[derive(Default)]
struct DialogueBlockCollector<'a> {
    blocks: Vec<&'a DialogueBlock>,
}

impl<'a> SyntaxVisitor<'a> for DialogueBlockCollector<'a> {
    fn visit_block(&mut self, block: &'a Block) {
        visitor::walk_block(self, block);
    }

    fn visit_if_statement(&mut self, statement: &'a IfStatement) {
        visitor::walk_if_statement(self, statement);
    }

    fn visit_while_statement(&mut self, statement: &'a WhileStatement) {
        visitor::walk_while_statement(self, statement);
    }

    fn visit_select_statement(&mut self, statement: &'a SelectStatement) {
        visitor::walk_select_statement(self, statement);
    }

    fn visit_select_section(&mut self, section: &'a SelectSection) {
        visitor::walk_select_section(self, section);
    }

    fn visit_dialogue_block(&mut self, block: &'a DialogueBlock) {
        self.blocks.push(block);
        visitor::walk_dialogue_block(self, block);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: Spanned<Id>,
    pub span: Span,
}
