//! Round-trip writer: turns a syntax tree back into NSS source.
//!
//! The output is canonical rather than a copy of the original text:
//! statements are indented four spaces per level and end in `;`, calls
//! written without parentheses get them back, names are quoted only when
//! they cannot be written bare, and comments are gone. Dialogue markup is
//! the exception and is emitted verbatim, since its whitespace is content.
//!
//! Writing a tree, parsing the result and writing it again yields the same
//! text.

use std::fmt::Write as _;

use nss_core::identifier::Id;

use crate::{
    operators::{OperatorKind, Precedence},
    syntax::{
        AssignmentExpression, BezierExpression, BinaryExpression, Block, BreakStatement,
        CallChapterStatement, CallSceneStatement, ConstantValue, DialogueBlock, Expression,
        ExpressionStatement, FunctionCallExpression, IfStatement, LiteralExpression,
        NameExpression, PXmlLineSeparator, PXmlString, Parameter, ReturnStatement, SelectSection,
        SelectStatement, SourceFileRoot, Statement, Subroutine, SubroutineKind, UnaryExpression,
        WhileStatement,
    },
    syntax_facts,
    visitor::SyntaxVisitor,
};

const INDENT: &str = "    ";

/// A [`SyntaxVisitor`] that accumulates source text.
///
/// Every `visit_*` method writes its node starting at the current position
/// and stops right after it; line breaks and indentation between statements
/// are the enclosing block's business.
#[derive(Debug, Default)]
pub struct CodeWriter {
    out: String,
    depth: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The text written so far.
    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }

    /// A name, bare when the lexer would read it back as one identifier.
    fn write_name(&mut self, name: Id) {
        name.with_str(|text| {
            if is_bare_name(text) {
                self.out.push_str(text);
            } else {
                push_quoted(&mut self.out, text);
            }
        });
    }

    fn write_sigil_name(&mut self, sigil: char, name: Id) {
        name.with_str(|text| {
            if !text.is_empty() && text.chars().all(syntax_facts::is_identifier_part) {
                self.out.push(sigil);
                self.out.push_str(text);
            } else {
                self.out.push('"');
                self.out.push(sigil);
                self.out.push_str(text);
                self.out.push('"');
            }
        });
    }

    /// Write `expression`, parenthesized when `needs_parentheses`.
    fn write_operand(&mut self, expression: &Expression, needs_parentheses: bool) {
        if needs_parentheses {
            self.write("(");
            expression.accept(self);
            self.write(")");
        } else {
            expression.accept(self);
        }
    }
}

/// Whether `text` lexes back as a single unsigiled identifier.
///
/// Identifiers may start with a digit as long as they are not all digits
/// (`215abc`).
fn is_bare_name(text: &str) -> bool {
    if syntax_facts::is_valid_identifier(text) {
        return true;
    }
    text.starts_with(|c: char| c.is_ascii_digit())
        && text.chars().all(syntax_facts::is_identifier_part)
        && !text.chars().all(|c| c.is_ascii_digit())
}

fn push_quoted(out: &mut String, text: &str) {
    out.push('"');
    out.push_str(text);
    out.push('"');
}

/// Decimal literals keep their point so they lex back as decimals.
fn format_float(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

fn binary_precedence(expression: &Expression) -> Option<Precedence> {
    match expression {
        Expression::Binary(binary) => Some(binary.operator.precedence()),
        Expression::Assignment(_) => Some(Precedence::Assignment),
        _ => None,
    }
}

impl<'a> SyntaxVisitor<'a> for CodeWriter {
    fn visit_source_file(&mut self, root: &'a SourceFileRoot) {
        for path in &root.file_references {
            self.write("#include ");
            path.with_str(|text| push_quoted(&mut self.out, text));
            self.write("\n");
        }
        for (index, subroutine) in root.subroutines.iter().enumerate() {
            if index > 0 || !root.file_references.is_empty() {
                self.write("\n");
            }
            subroutine.accept(self);
            self.write("\n");
        }
    }

    fn visit_subroutine(&mut self, subroutine: &'a Subroutine) {
        let _ = write!(self.out, "{} ", subroutine.kind);
        self.write_name(*subroutine.name.inner());
        if subroutine.kind == SubroutineKind::Function {
            self.write("(");
            for (index, parameter) in subroutine.parameters.iter().enumerate() {
                if index > 0 {
                    self.write(", ");
                }
                parameter.accept(self);
            }
            self.write(")");
        }
        self.write(" ");
        subroutine.body.accept(self);
    }

    fn visit_parameter(&mut self, parameter: &'a Parameter) {
        self.write_name(*parameter.name.inner());
    }

    fn visit_block(&mut self, block: &'a Block) {
        self.write("{");
        self.depth += 1;
        for statement in &block.statements {
            self.newline();
            statement.accept(self);
        }
        self.depth -= 1;
        self.newline();
        self.write("}");
    }

    fn visit_if_statement(&mut self, statement: &'a IfStatement) {
        self.write("if (");
        statement.condition.accept(self);
        self.write(") ");
        statement.if_true.accept(self);
        if let Some(if_false) = &statement.if_false {
            if matches!(*statement.if_true, Statement::Block(_)) {
                self.write(" ");
            } else {
                self.newline();
            }
            self.write("else ");
            if_false.accept(self);
        }
    }

    fn visit_while_statement(&mut self, statement: &'a WhileStatement) {
        self.write("while (");
        statement.condition.accept(self);
        self.write(") ");
        statement.body.accept(self);
    }

    fn visit_break_statement(&mut self, _statement: &'a BreakStatement) {
        self.write("break;");
    }

    fn visit_return_statement(&mut self, _statement: &'a ReturnStatement) {
        self.write("return;");
    }

    fn visit_expression_statement(&mut self, statement: &'a ExpressionStatement) {
        statement.expression.accept(self);
        self.write(";");
    }

    fn visit_select_statement(&mut self, statement: &'a SelectStatement) {
        self.write("select ");
        statement.body.accept(self);
    }

    fn visit_select_section(&mut self, section: &'a SelectSection) {
        self.write("case ");
        self.write_name(*section.label.inner());
        self.write(": ");
        section.body.accept(self);
    }

    fn visit_call_scene_statement(&mut self, statement: &'a CallSceneStatement) {
        self.write("call_scene ");
        match &statement.target_file {
            Some(file) => {
                self.write_name(*file.inner());
                self.write("->");
            }
            None => self.write("@->"),
        }
        self.write_name(*statement.scene_name.inner());
        self.write(";");
    }

    fn visit_call_chapter_statement(&mut self, statement: &'a CallChapterStatement) {
        self.write("call_chapter ");
        self.write_name(*statement.target_file.inner());
        self.write(";");
    }

    /// The body is written without indentation: markup whitespace is text.
    fn visit_dialogue_block(&mut self, block: &'a DialogueBlock) {
        self.write("<PRE");
        if !block.box_name.is_empty() {
            let _ = write!(self.out, " {}", block.box_name);
        }
        let _ = write!(self.out, ">\n[{}]", block.block_name);
        for statement in &block.body {
            statement.accept(self);
        }
        self.write("</PRE>");
    }

    fn visit_pxml_string(&mut self, text: &'a PXmlString) {
        text.text.with_str(|text| self.out.push_str(text));
    }

    fn visit_pxml_line_separator(&mut self, _separator: &'a PXmlLineSeparator) {
        self.write("\n\n");
    }

    fn visit_literal(&mut self, literal: &'a LiteralExpression) {
        match literal.value {
            ConstantValue::Null => self.write("null"),
            ConstantValue::Boolean(value) => self.write(if value { "true" } else { "false" }),
            ConstantValue::Integer(value) if literal.is_hex_triplet => {
                let _ = write!(self.out, "#{value:06X}");
            }
            ConstantValue::Integer(value) => {
                let _ = write!(self.out, "{value}");
            }
            ConstantValue::Float(value) => self.write(&format_float(value)),
            ConstantValue::String(value) => value.with_str(|text| push_quoted(&mut self.out, text)),
        }
    }

    fn visit_name(&mut self, name: &'a NameExpression) {
        match name.sigil {
            Some(sigil) => self.write_sigil_name(sigil.as_char(), name.name),
            None => self.write_name(name.name),
        }
    }

    fn visit_unary(&mut self, unary: &'a UnaryExpression) {
        self.write(unary.operator.text());
        // `-(-x)` rather than `--x`, which is a decrement.
        let nested = matches!(
            *unary.operand,
            Expression::Unary(_) | Expression::Binary(_) | Expression::Assignment(_)
        );
        self.write_operand(&unary.operand, nested);
    }

    fn visit_binary(&mut self, binary: &'a BinaryExpression) {
        let precedence = binary.operator.precedence();
        let left = binary_precedence(&binary.left).is_some_and(|p| p < precedence);
        let right = binary_precedence(&binary.right).is_some_and(|p| p <= precedence);

        self.write_operand(&binary.left, left);
        let _ = write!(self.out, " {} ", binary.operator.text());
        self.write_operand(&binary.right, right);
    }

    fn visit_assignment(&mut self, assignment: &'a AssignmentExpression) {
        let target_is_assignment = matches!(*assignment.target, Expression::Assignment(_));
        self.write_operand(&assignment.target, target_is_assignment);
        match *assignment.operator.inner() {
            operator @ (OperatorKind::Increment | OperatorKind::Decrement) => {
                self.write(operator.text());
            }
            operator => {
                let _ = write!(self.out, " {} ", operator.text());
                assignment.value.accept(self);
            }
        }
    }

    fn visit_function_call(&mut self, call: &'a FunctionCallExpression) {
        self.write_name(*call.target_name.inner());
        self.write("(");
        for (index, argument) in call.arguments.iter().enumerate() {
            if index > 0 {
                self.write(", ");
            }
            argument.accept(self);
        }
        self.write(")");
    }

    fn visit_bezier(&mut self, bezier: &'a BezierExpression) {
        self.write("(");
        for (index, point) in bezier.control_points.iter().enumerate() {
            let (open, close) = match (index, point.is_starting_point) {
                (0, _) => ("", ""),
                (_, true) => (", {", "}"),
                (_, false) => (", (", ")"),
            };
            self.write(open);
            point.x.accept(self);
            self.write(", ");
            point.y.accept(self);
            self.write(close);
        }
        self.write(")");
    }
}

/// Write a whole script.
pub fn write_source(root: &SourceFileRoot) -> String {
    let mut writer = CodeWriter::new();
    root.accept(&mut writer);
    writer.finish()
}

/// Write a single statement at indentation level zero.
pub fn write_statement(statement: &Statement) -> String {
    let mut writer = CodeWriter::new();
    statement.accept(&mut writer);
    writer.finish()
}

/// Write a single expression.
pub fn write_expression(expression: &Expression) -> String {
    let mut writer = CodeWriter::new();
    expression.accept(&mut writer);
    writer.finish()
}

#[cfg(test)]
mod tests {
    use nss_core::source_text::SourceText;

    use super::*;
    use crate::{parse, parse_expression, parse_statement};

    fn rewrite_expression(text: &str) -> String {
        let (expression, diagnostics) = parse_expression(text);
        assert!(diagnostics.is_empty(), "{:?}", diagnostics.into_vec());
        write_expression(&expression.expect("expression should parse"))
    }

    fn rewrite_source(text: &str) -> String {
        let parsed = parse(&SourceText::new(text));
        write_source(&parsed.root)
    }

    #[test]
    fn test_nested_negation_is_not_a_decrement() {
        assert_eq!(rewrite_expression("-(-x)"), "-(-x)");
    }

    #[test]
    fn test_parentheses_follow_associativity() {
        assert_eq!(rewrite_expression("a - (b - c)"), "a - (b - c)");
        assert_eq!(rewrite_expression("(a - b) - c"), "a - b - c");
        assert_eq!(rewrite_expression("(1 + 2) * 3"), "(1 + 2) * 3");
        assert_eq!(rewrite_expression("1 + 2 * 3"), "1 + 2 * 3");
    }

    #[test]
    fn test_literals() {
        assert_eq!(rewrite_expression("2.0"), "2.0");
        assert_eq!(rewrite_expression("#ff8000"), "#FF8000");
        assert_eq!(rewrite_expression("TRUE"), "true");
        assert_eq!(rewrite_expression(r#""a b""#), r#""a b""#);
    }

    #[test]
    fn test_names() {
        assert_eq!(rewrite_expression("$score += 1"), "$score += 1");
        assert_eq!(rewrite_expression("#SYSTEM_skip"), "#SYSTEM_skip");
        assert_eq!(rewrite_expression("$i++"), "$i++");
        assert_eq!(rewrite_expression("215abc"), "215abc");
    }

    #[test]
    fn test_bezier() {
        assert_eq!(
            rewrite_expression("(0,0,(10,10),{20,20})"),
            "(0, 0, (10, 10), {20, 20})"
        );
    }

    #[test]
    fn test_if_else_without_blocks() {
        let (statement, _) = parse_statement("if ($a) Wait(1); else Wait(2);");
        assert_eq!(
            write_statement(&statement.expect("statement")),
            "if ($a) Wait(1);\nelse Wait(2);"
        );
    }

    #[test]
    fn test_call_without_parentheses_is_normalized() {
        assert_eq!(
            rewrite_source("chapter main { Wait 100; }"),
            "chapter main {\n    Wait(100);\n}\n"
        );
    }

    #[test]
    fn test_calls_to_other_files() {
        let written = rewrite_source(
            "chapter main {\ncall_chapter nss/0010.nss;\ncall_scene @->s1;\ncall_scene x.nss->s2;\n}",
        );
        assert_eq!(
            written,
            "chapter main {\n    call_chapter \"nss/0010.nss\";\n    call_scene @->s1;\n    call_scene \"x.nss\"->s2;\n}\n"
        );
    }

    #[test]
    fn test_includes_and_subroutines() {
        let written = rewrite_source(
            "#include \"nss/function.nss\"\nfunction f(a,\"b\"){return;}\nscene s{}",
        );
        assert_eq!(
            written,
            "#include \"nss/function.nss\"\n\nfunction f(a, b) {\n    return;\n}\n\nscene s {\n}\n"
        );
    }

    #[test]
    fn test_dialogue_body_is_verbatim() {
        let source = "chapter main {\n    <PRE box00>\n[text001]\nHello.\n\nBye.\n</PRE>\n}\n";
        assert_eq!(rewrite_source(source), source);
    }

    #[test]
    fn test_dialogue_text_after_code_is_verbatim() {
        let source = "chapter main {\n    <PRE box00>\n[t]\nHi {\n        Wait(1);\n    } there... she said.\n</PRE>\n}\n";
        assert_eq!(rewrite_source(source), source);
    }

    #[test]
    fn test_rewriting_is_idempotent() {
        let source = r#"
            #include "nss/function.nss"

            chapter main {
                $count = 0;
                while ($count < 3) { $count++; }
                if ($count == 3 && !#SYSTEM_skip) {
                    Fade("bg", 1000, 0, null, true);
                } else if ($count > 3) Wait 100;
                select {
                    case choice_a: { call_scene @->scene01; }
                    case "choice b": { return; }
                }
                Move("bg", 500, 0, 0, (0, 0, (10, 20), {30, 40}), true);
            }

            scene scene01 {
                CreateColor("black", 100, 0, 0, 800, 600, #000000);
            }
        "#;
        let once = rewrite_source(source);
        let twice = rewrite_source(&once);
        assert_eq!(once, twice);
    }
}
