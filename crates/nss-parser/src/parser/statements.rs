//! Statement rules, one per leading token kind.

use nss_core::identifier::Id;

use crate::{
    error::DiagnosticId,
    parser::Parser,
    span::{Span, Spanned},
    syntax::{
        Block, BreakStatement, CallChapterStatement, CallSceneStatement, ConstantValue,
        DialogueBlock, Expression, ExpressionStatement, FunctionCallExpression, IfStatement,
        LiteralExpression, PXmlLineSeparator, PXmlString, ReturnStatement, SelectSection,
        SelectStatement, Statement, WhileStatement,
    },
    syntax_facts,
    tokens::{SyntaxToken, TokenKind},
};

impl Parser<'_> {
    /// Parse one statement. `None` means nothing usable was found; any
    /// problem has already been reported and at least the offending token
    /// consumed when possible.
    pub(crate) fn parse_statement(&mut self) -> Option<Statement> {
        let token = self.peek();
        match token.kind {
            TokenKind::OpenBrace => Some(Statement::Block(self.parse_block())),
            TokenKind::IfKeyword => self.parse_if_statement().map(Statement::If),
            TokenKind::WhileKeyword => self.parse_while_statement().map(Statement::While),
            TokenKind::BreakKeyword => {
                self.advance();
                self.expect_terminator();
                Some(Statement::Break(BreakStatement {
                    span: self.span_from(token.span.start()),
                }))
            }
            TokenKind::ReturnKeyword => {
                self.advance();
                self.expect_terminator();
                Some(Statement::Return(ReturnStatement {
                    span: self.span_from(token.span.start()),
                }))
            }
            TokenKind::SelectKeyword => {
                self.advance();
                let body = self.parse_block();
                Some(Statement::Select(SelectStatement {
                    body,
                    span: self.span_from(token.span.start()),
                }))
            }
            TokenKind::CaseKeyword => Some(Statement::SelectSection(self.parse_select_section())),
            TokenKind::CallSceneKeyword => Some(Statement::CallScene(self.parse_call_scene())),
            TokenKind::CallChapterKeyword => {
                Some(Statement::CallChapter(self.parse_call_chapter()))
            }
            TokenKind::DialogueBlockStartTag => {
                Some(Statement::DialogueBlock(self.parse_dialogue_block()))
            }
            TokenKind::Markup | TokenKind::MarkupBlankLine | TokenKind::DialogueBlockIdentifier => {
                self.parse_markup()
            }
            TokenKind::DialogueBlockEndTag => {
                self.report_stray(token);
                self.advance();
                None
            }
            TokenKind::BadToken => {
                self.report_stray(token);
                self.advance();
                self.skip_rest_of_statement();
                None
            }
            // An empty statement.
            TokenKind::Semicolon | TokenKind::Colon => {
                self.advance();
                None
            }
            TokenKind::Identifier | TokenKind::StringLiteralOrQuotedIdentifier
                if self.at_call_without_parentheses() =>
            {
                let call = self.parse_call_without_parentheses();
                Some(self.finish_expression_statement(call))
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// `{ statements }`. Stops early in front of a subroutine keyword so a
    /// missing `}` does not swallow the next declaration.
    pub(crate) fn parse_block(&mut self) -> Block {
        let open = self.expect(TokenKind::OpenBrace);
        if open.is_missing() {
            return Block {
                statements: Vec::new(),
                span: open.span,
            };
        }

        let mut statements = Vec::new();
        while !matches!(
            self.peek().kind,
            TokenKind::CloseBrace
                | TokenKind::EndOfFileToken
                | TokenKind::ChapterKeyword
                | TokenKind::SceneKeyword
                | TokenKind::FunctionKeyword
        ) {
            self.parse_statement_into(&mut statements);
        }
        self.expect(TokenKind::CloseBrace);

        Block {
            statements,
            span: self.span_from(open.span.start()),
        }
    }

    /// Parse a statement into `statements`, consuming at least one token.
    fn parse_statement_into(&mut self, statements: &mut Vec<Statement>) {
        let start = self.position;
        if let Some(statement) = self.parse_statement() {
            statements.push(statement);
        }
        if self.position == start {
            let token = self.advance();
            self.report_stray(token);
        }
    }

    fn report_stray(&mut self, token: SyntaxToken) {
        let text = self.display_text(token);
        self.diagnostics
            .report_with(DiagnosticId::StrayToken, token.span, [text]);
    }

    /// `if (condition) statement [else statement]`
    ///
    /// `else if` chains need no special case: the false branch is just
    /// another statement. When the condition cannot be parsed the branches
    /// are still consumed, then the whole statement is dropped.
    fn parse_if_statement(&mut self) -> Option<IfStatement> {
        let keyword = self.advance();
        let condition = self.parse_condition();
        let if_true = self.parse_embedded_statement();
        let if_false = match self.eat(TokenKind::ElseKeyword) {
            Some(_) => Some(Box::new(self.parse_embedded_statement()?)),
            None => None,
        };

        Some(IfStatement {
            condition: condition?,
            if_true: Box::new(if_true?),
            if_false,
            span: self.span_from(keyword.span.start()),
        })
    }

    /// `while (condition) statement`
    fn parse_while_statement(&mut self) -> Option<WhileStatement> {
        let keyword = self.advance();
        let condition = self.parse_condition();
        let body = self.parse_embedded_statement();

        Some(WhileStatement {
            condition: condition?,
            body: Box::new(body?),
            span: self.span_from(keyword.span.start()),
        })
    }

    /// The statement governed by `if`, `else` or `while`. A lone `;` there
    /// becomes an empty block and is reported as misplaced.
    fn parse_embedded_statement(&mut self) -> Option<Statement> {
        let token = self.peek();
        if !token.kind.is_statement_terminator() {
            return self.parse_statement();
        }
        self.advance();
        self.diagnostics
            .report(DiagnosticId::MisplacedSemicolon, token.span);
        Some(Statement::Block(Block {
            statements: Vec::new(),
            span: token.span,
        }))
    }

    /// `( expression )`. The parentheses are required but recovered from.
    fn parse_condition(&mut self) -> Option<Expression> {
        self.expect(TokenKind::OpenParen);
        let condition = self.parse_expression();
        self.expect(TokenKind::CloseParen);
        condition
    }

    /// `case label: { ... }`. The colon is optional.
    fn parse_select_section(&mut self) -> SelectSection {
        let keyword = self.advance();
        let label = match self.peek().kind {
            TokenKind::Identifier | TokenKind::StringLiteralOrQuotedIdentifier => {
                let token = self.advance();
                self.name_of(token)
            }
            _ => {
                let token = self.expect(TokenKind::Identifier);
                self.name_of(token)
            }
        };
        self.eat(TokenKind::Colon);
        let body = self.parse_block();

        SelectSection {
            label,
            body,
            span: self.span_from(keyword.span.start()),
        }
    }

    /// `call_chapter path;`
    fn parse_call_chapter(&mut self) -> CallChapterStatement {
        let keyword = self.advance();
        let target_file = self.parse_raw_path(&[]);
        self.expect_terminator();

        CallChapterStatement {
            target_file,
            span: self.span_from(keyword.span.start()),
        }
    }

    /// `call_scene @->name;`, `call_scene path->name;` or `call_scene name;`
    fn parse_call_scene(&mut self) -> CallSceneStatement {
        let keyword = self.advance();
        let (target_file, scene_name) = if self.eat(TokenKind::AtArrow).is_some() {
            (None, self.parse_raw_path(&[]))
        } else {
            let first = self.parse_raw_path(&[TokenKind::Arrow]);
            if self.eat(TokenKind::Arrow).is_some() {
                (Some(first), self.parse_raw_path(&[]))
            } else {
                (None, first)
            }
        };
        self.expect_terminator();

        CallSceneStatement {
            target_file,
            scene_name,
            span: self.span_from(keyword.span.start()),
        }
    }

    /// File-path-like text: every token up to a terminator, a closing brace,
    /// one of `stop_at` or the end of the line, taken verbatim. A lone string
    /// literal yields its unquoted value.
    fn parse_raw_path(&mut self, stop_at: &[TokenKind]) -> Spanned<Id> {
        let Some(line) = self.previous().map(|token| self.line_of(token.span.end())) else {
            return Spanned::new(Id::new(""), Span::empty_at(0));
        };

        let mut tokens = Vec::new();
        loop {
            let token = self.peek();
            let ends_path = token.kind.is_statement_terminator()
                || matches!(
                    token.kind,
                    TokenKind::CloseBrace | TokenKind::EndOfFileToken
                )
                || stop_at.contains(&token.kind)
                || self.line_of(token.span.start()) != line;
            if ends_path {
                break;
            }
            tokens.push(self.advance());
        }

        match (tokens.as_slice(), tokens.first(), tokens.last()) {
            ([token], _, _) if token.kind == TokenKind::StringLiteralOrQuotedIdentifier => {
                Spanned::new(Id::new(self.quoted_text(*token)), token.span)
            }
            (_, Some(first), Some(last)) => {
                let text = self.raw_text(*first, *last);
                Spanned::new(Id::new(text), first.span.union(last.span))
            }
            _ => {
                let token = self.expect(TokenKind::Identifier);
                Spanned::new(Id::new(""), token.span)
            }
        }
    }

    /// `<PRE box>[name] ... </PRE>`
    fn parse_dialogue_block(&mut self) -> DialogueBlock {
        let tag = self.advance();
        let box_name = Id::new(self.value_text(tag).trim());

        self.dialogue_depth += 1;
        let identifier = self.expect(TokenKind::DialogueBlockIdentifier);
        let block_name = self.name_of(identifier);

        let mut body = Vec::new();
        while !matches!(
            self.peek().kind,
            TokenKind::DialogueBlockEndTag | TokenKind::CloseBrace | TokenKind::EndOfFileToken
        ) {
            self.parse_statement_into(&mut body);
        }
        self.expect(TokenKind::DialogueBlockEndTag);
        self.dialogue_depth -= 1;

        DialogueBlock {
            box_name,
            block_name,
            body,
            span: self.span_from(tag.span.start()),
        }
    }

    /// Markup passes through verbatim, but only inside a dialogue block.
    fn parse_markup(&mut self) -> Option<Statement> {
        let token = self.advance();
        if self.dialogue_depth == 0 {
            self.diagnostics
                .report(DiagnosticId::StrayPXmlElement, token.span);
            return None;
        }

        let statement = match token.kind {
            TokenKind::MarkupBlankLine => {
                Statement::PXmlLineSeparator(PXmlLineSeparator { span: token.span })
            }
            _ => Statement::PXmlString(PXmlString {
                text: Id::new(self.text(token)),
                span: token.span,
            }),
        };
        Some(statement)
    }

    /// Whether the tokens ahead read as `name arg, arg;`: only literals,
    /// names, commas and dots up to a `;` or `}`.
    fn at_call_without_parentheses(&self) -> bool {
        let head = self.peek();
        if head.has_dollar_prefix() || head.has_hash_prefix() {
            return false;
        }

        (1..)
            .map(|n| self.peek_at(n).kind)
            .find(|kind| {
                !(syntax_facts::is_literal_or_name(*kind)
                    || matches!(kind, TokenKind::Comma | TokenKind::Dot))
            })
            .is_some_and(|kind| matches!(kind, TokenKind::Semicolon | TokenKind::CloseBrace))
    }

    /// `name arg, arg;`. An argument spanning several tokens (`a.b`) becomes
    /// a string of its source text.
    fn parse_call_without_parentheses(&mut self) -> Expression {
        let name = self.advance();
        let mut arguments = Vec::new();
        let mut argument: Vec<SyntaxToken> = Vec::new();

        loop {
            let token = self.peek();
            match token.kind {
                TokenKind::Comma | TokenKind::Semicolon | TokenKind::CloseBrace => {
                    if let Some(expression) = self.bare_argument(&argument) {
                        arguments.push(expression);
                    }
                    argument.clear();
                    if token.kind != TokenKind::Comma {
                        break;
                    }
                    self.advance();
                }
                _ => argument.push(self.advance()),
            }
        }

        Expression::FunctionCall(FunctionCallExpression {
            target_name: self.name_of(name),
            arguments,
            span: self.span_from(name.span.start()),
        })
    }

    fn bare_argument(&mut self, tokens: &[SyntaxToken]) -> Option<Expression> {
        let (first, last) = (tokens.first()?, tokens.last()?);
        if tokens.len() == 1 && syntax_facts::is_literal_or_name(first.kind) {
            return Some(self.term(*first));
        }
        Some(Expression::Literal(LiteralExpression {
            value: ConstantValue::String(Id::new(self.raw_text(*first, *last))),
            is_hex_triplet: false,
            span: first.span.union(last.span),
        }))
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let start = self.position;
        let Some(expression) = self.parse_expression() else {
            if self.position == start
                && !matches!(
                    self.peek().kind,
                    TokenKind::CloseBrace | TokenKind::EndOfFileToken
                )
            {
                self.advance();
            }
            self.skip_rest_of_statement();
            return None;
        };

        if !expression.is_valid_statement() {
            self.diagnostics
                .report(DiagnosticId::InvalidExpressionStatement, expression.span());
        }
        Some(self.finish_expression_statement(expression))
    }

    fn finish_expression_statement(&mut self, expression: Expression) -> Statement {
        self.expect_terminator();
        let span = self.span_from(expression.span().start());
        Statement::Expression(ExpressionStatement { expression, span })
    }
}
