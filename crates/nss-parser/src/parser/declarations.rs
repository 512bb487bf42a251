//! File-level rules: `#include` directives and subroutine declarations.

use log::{debug, trace};

use nss_core::identifier::Id;

use crate::{
    error::DiagnosticId,
    parser::Parser,
    span::{Span, Spanned},
    syntax::{Parameter, SourceFileRoot, Subroutine, SubroutineKind},
    tokens::TokenKind,
};

impl Parser<'_> {
    pub(crate) fn parse_source_file(&mut self) -> SourceFileRoot {
        let mut root = SourceFileRoot::default();

        loop {
            let token = self.peek();
            match token.kind {
                TokenKind::EndOfFileToken => break,
                TokenKind::IncludeDirective => {
                    self.advance();
                    if let Some(path) = self.parse_include_path() {
                        root.file_references.push(path);
                    }
                }
                TokenKind::Semicolon => {
                    self.diagnostics
                        .report(DiagnosticId::MisplacedSemicolon, token.span);
                    self.advance();
                }
                TokenKind::ChapterKeyword | TokenKind::SceneKeyword | TokenKind::FunctionKeyword => {
                    let subroutine = self.parse_subroutine();
                    match subroutine.kind {
                        SubroutineKind::Chapter => root.chapter_count += 1,
                        SubroutineKind::Scene => root.scene_count += 1,
                        SubroutineKind::Function => root.function_count += 1,
                    }
                    root.subroutines.push(subroutine);
                }
                TokenKind::DialogueBlockStartTag | TokenKind::DialogueBlockEndTag => {
                    self.diagnostics
                        .report(DiagnosticId::StrayPXmlElement, token.span);
                    self.advance();
                }
                kind if kind.is_markup() => {
                    self.diagnostics
                        .report(DiagnosticId::StrayPXmlElement, token.span);
                    self.advance();
                }
                _ => {
                    self.diagnostics
                        .report(DiagnosticId::ExpectedSubroutineDeclaration, token.span);
                    self.skip_to_next_line();
                }
            }
        }

        root.span = Span::new(0..self.source.len());
        debug!(
            subroutines = root.subroutines.len(),
            includes = root.file_references.len(),
            diagnostics = self.diagnostics.len();
            "Parsed source file"
        );
        root
    }

    /// The quoted path after `#include`.
    fn parse_include_path(&mut self) -> Option<Spanned<Id>> {
        let token = self.expect(TokenKind::StringLiteralOrQuotedIdentifier);
        (!token.is_missing()).then(|| self.name_of(token))
    }

    fn parse_subroutine(&mut self) -> Subroutine {
        let keyword = self.advance();
        let kind = match keyword.kind {
            TokenKind::ChapterKeyword => SubroutineKind::Chapter,
            TokenKind::SceneKeyword => SubroutineKind::Scene,
            _ => SubroutineKind::Function,
        };

        // Parameter names only resolve inside the function declaring them.
        self.parameters.clear();

        let name = self.parse_subroutine_name();
        let parameters = if kind == SubroutineKind::Function {
            self.parse_parameter_list()
        } else {
            Vec::new()
        };
        let body = self.parse_block();

        let subroutine = Subroutine {
            kind,
            name,
            parameters,
            body,
            span: self.span_from(keyword.span.start()),
        };
        trace!(
            kind:% = subroutine.kind,
            name:% = subroutine.name,
            statements = subroutine.body.statements.len();
            "Parsed subroutine"
        );
        subroutine
    }

    /// A bare or quoted name.
    fn parse_subroutine_name(&mut self) -> Spanned<Id> {
        match self.peek().kind {
            TokenKind::Identifier | TokenKind::StringLiteralOrQuotedIdentifier => {
                let token = self.advance();
                self.name_of(token)
            }
            _ => {
                let token = self.expect(TokenKind::Identifier);
                self.name_of(token)
            }
        }
    }

    /// `( name, "name", ... )`. Every parameter is also recorded so quoted
    /// references in the body resolve to it.
    fn parse_parameter_list(&mut self) -> Vec<Parameter> {
        let mut parameters = Vec::new();
        if self.expect(TokenKind::OpenParen).is_missing() {
            return parameters;
        }

        while !matches!(
            self.peek().kind,
            TokenKind::CloseParen | TokenKind::OpenBrace | TokenKind::EndOfFileToken
        ) {
            let token = self.peek();
            match token.kind {
                TokenKind::Identifier | TokenKind::StringLiteralOrQuotedIdentifier => {
                    self.advance();
                    let parameter = Parameter {
                        name: self.name_of(token),
                        span: token.span,
                    };
                    self.parameters
                        .insert(*parameter.name.inner(), parameter.clone());
                    parameters.push(parameter);
                }
                _ => {
                    let text = self.display_text(token);
                    self.diagnostics
                        .report_with(DiagnosticId::StrayToken, token.span, [text]);
                    self.advance();
                    continue;
                }
            }

            if self.eat(TokenKind::Comma).is_none() && !self.at(TokenKind::CloseParen) {
                self.expect(TokenKind::Comma);
            }
        }

        self.expect(TokenKind::CloseParen);
        parameters
    }
}
