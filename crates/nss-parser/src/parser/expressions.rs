//! Expression rules: precedence climbing over binary operators, with
//! assignment handled above it and unary operators below it.

use nss_core::identifier::Id;

use crate::{
    error::DiagnosticId,
    operators::{self, Precedence},
    parser::Parser,
    span::Spanned,
    syntax::{
        AssignmentExpression, BezierControlPoint, BezierExpression, BinaryExpression,
        ConstantValue, Expression, FunctionCallExpression, LiteralExpression, NameExpression,
        Sigil, UnaryExpression,
    },
    tokens::{SyntaxToken, TokenFlags, TokenKind},
};

impl Parser<'_> {
    pub(crate) fn parse_expression(&mut self) -> Option<Expression> {
        self.parse_assignment()
    }

    /// `target op value`, right-associative. `++` and `--` take no value:
    /// the target is reused as the value.
    fn parse_assignment(&mut self) -> Option<Expression> {
        let target = self.parse_binary(Precedence::Logical)?;
        let token = self.peek();
        let Some(operator) = operators::assignment_operator(token.kind) else {
            return Some(target);
        };
        self.advance();

        let value = if operator.is_postfix() {
            target.clone()
        } else {
            self.parse_assignment()?
        };
        let span = self.span_from(target.span().start());
        Some(Expression::Assignment(AssignmentExpression {
            target: Box::new(target),
            operator: Spanned::new(operator, token.span),
            value: Box::new(value),
            span,
        }))
    }

    /// Left-associative binary operators binding at least as tight as `min`.
    fn parse_binary(&mut self, min: Precedence) -> Option<Expression> {
        let mut left = self.parse_unary()?;
        loop {
            let token = self.peek();
            let Some(operator) = operators::binary_operator(token.kind) else {
                break;
            };
            let precedence = operator.precedence();
            if precedence < min {
                break;
            }
            self.advance();

            let right = self.parse_binary(precedence.next())?;
            let span = left.span().union(right.span());
            left = Expression::Binary(BinaryExpression {
                left: Box::new(left),
                operator: Spanned::new(operator, token.span),
                right: Box::new(right),
                span,
            });
        }
        Some(left)
    }

    fn parse_unary(&mut self) -> Option<Expression> {
        let token = self.peek();
        let Some(operator) = operators::unary_operator(token.kind) else {
            return self.parse_primary();
        };
        self.advance();

        let operand = self.parse_unary()?;
        let span = token.span.union(operand.span());
        Some(Expression::Unary(UnaryExpression {
            operator: Spanned::new(operator, token.span),
            operand: Box::new(operand),
            span,
        }))
    }

    fn parse_primary(&mut self) -> Option<Expression> {
        let token = self.peek();
        match token.kind {
            TokenKind::Identifier | TokenKind::StringLiteralOrQuotedIdentifier
                if self.peek_at(1).kind == TokenKind::OpenParen =>
            {
                Some(self.parse_function_call())
            }
            TokenKind::Identifier
            | TokenKind::StringLiteralOrQuotedIdentifier
            | TokenKind::NumericLiteral
            | TokenKind::NullKeyword
            | TokenKind::TrueKeyword
            | TokenKind::FalseKeyword => {
                self.advance();
                Some(self.term(token))
            }
            TokenKind::OpenParen => self.parse_parenthesized_or_bezier(),
            // Left in place: these close the enclosing construct.
            TokenKind::CloseParen
            | TokenKind::CloseBrace
            | TokenKind::Semicolon
            | TokenKind::EndOfFileToken => {
                self.report_invalid_term(token);
                None
            }
            _ => {
                self.report_invalid_term(token);
                self.advance();
                None
            }
        }
    }

    fn report_invalid_term(&mut self, token: SyntaxToken) {
        let text = self.display_text(token);
        self.diagnostics
            .report_with(DiagnosticId::InvalidExpressionTerm, token.span, [text]);
    }

    /// A single-token term: a literal or a name. Quoted text names a
    /// parameter when one of the current function's parameters has that
    /// name, or when it carries a `$` sigil; otherwise it is a string.
    pub(super) fn term(&self, token: SyntaxToken) -> Expression {
        let literal = |value| {
            Expression::Literal(LiteralExpression {
                value,
                is_hex_triplet: false,
                span: token.span,
            })
        };

        match token.kind {
            TokenKind::NumericLiteral => Expression::Literal(self.numeric_literal(token)),
            TokenKind::NullKeyword => literal(ConstantValue::Null),
            TokenKind::TrueKeyword => literal(ConstantValue::Boolean(true)),
            TokenKind::FalseKeyword => literal(ConstantValue::Boolean(false)),
            TokenKind::StringLiteralOrQuotedIdentifier => {
                let value = self.value_text(token);
                let names_parameter = self.parameters.contains_key(&Id::new(value));
                if names_parameter || token.has_dollar_prefix() {
                    self.name_expression(token)
                } else {
                    literal(ConstantValue::String(Id::new(self.quoted_text(token))))
                }
            }
            _ => self.name_expression(token),
        }
    }

    fn name_expression(&self, token: SyntaxToken) -> Expression {
        let sigil = if token.has_dollar_prefix() {
            Some(Sigil::Dollar)
        } else if token.has_hash_prefix() {
            Some(Sigil::Hash)
        } else {
            None
        };
        Expression::Name(NameExpression {
            name: Id::new(self.value_text(token)),
            sigil,
            span: token.span,
        })
    }

    /// Integer, decimal or `#RRGGBB` literal. Out-of-range integers were
    /// already reported by the lexer and saturate.
    fn numeric_literal(&self, token: SyntaxToken) -> LiteralExpression {
        let text = self.value_text(token);
        let is_hex_triplet = token.flags.contains(TokenFlags::IS_HEX_TRIPLET);
        let value = if is_hex_triplet {
            ConstantValue::Integer(i32::from_str_radix(text, 16).unwrap_or(i32::MAX))
        } else if token.flags.contains(TokenFlags::HAS_DECIMAL_POINT) {
            ConstantValue::Float(text.parse().unwrap_or_default())
        } else {
            ConstantValue::Integer(text.parse().unwrap_or(i32::MAX))
        };
        LiteralExpression {
            value,
            is_hex_triplet,
            span: token.span,
        }
    }

    /// `name(arg, arg)`. `&` between arguments carries no meaning and is
    /// skipped.
    fn parse_function_call(&mut self) -> Expression {
        let name = self.advance();
        self.advance();

        let mut arguments = Vec::new();
        loop {
            self.skip_ampersands();
            if matches!(
                self.peek().kind,
                TokenKind::CloseParen
                    | TokenKind::CloseBrace
                    | TokenKind::Semicolon
                    | TokenKind::EndOfFileToken
            ) {
                break;
            }
            match self.parse_expression() {
                Some(argument) => arguments.push(argument),
                None => break,
            }
            self.skip_ampersands();
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::CloseParen);

        Expression::FunctionCall(FunctionCallExpression {
            target_name: self.name_of(name),
            arguments,
            span: self.span_from(name.span.start()),
        })
    }

    fn skip_ampersands(&mut self) {
        while self.eat(TokenKind::Ampersand).is_some() {}
    }

    /// `( expression )`, or a Bézier literal when a comma follows the first
    /// expression.
    fn parse_parenthesized_or_bezier(&mut self) -> Option<Expression> {
        let open = self.advance();
        let first = self.parse_expression()?;
        if self.at(TokenKind::Comma) {
            return self.parse_bezier(open, first);
        }
        self.expect(TokenKind::CloseParen);
        Some(first)
    }

    /// `(x0, y0, (x, y), {x, y}, ...)`. The leading pair and every braced
    /// pair start a segment; parenthesized pairs are handles.
    fn parse_bezier(&mut self, open: SyntaxToken, x: Expression) -> Option<Expression> {
        self.advance();
        let y = self.parse_expression()?;
        let mut control_points = vec![BezierControlPoint {
            x,
            y,
            is_starting_point: true,
        }];

        while self.at(TokenKind::Comma)
            && matches!(
                self.peek_at(1).kind,
                TokenKind::OpenParen | TokenKind::OpenBrace
            )
        {
            self.advance();
            let opener = self.advance();
            let is_starting_point = opener.kind == TokenKind::OpenBrace;
            let x = self.parse_expression()?;
            self.expect(TokenKind::Comma);
            let y = self.parse_expression()?;
            self.expect(if is_starting_point {
                TokenKind::CloseBrace
            } else {
                TokenKind::CloseParen
            });
            control_points.push(BezierControlPoint {
                x,
                y,
                is_starting_point,
            });
        }
        self.expect(TokenKind::CloseParen);

        Some(Expression::Bezier(BezierExpression {
            control_points,
            span: self.span_from(open.span.start()),
        }))
    }
}
