use nss_core::source_text::SourceText;
use nss_parser::{
    LexingMode, TokenKind,
    error::{DiagnosticId, Severity},
    parse, parse_with_mode, tokenize,
    syntax::{ConstantValue, Expression, Statement, SubroutineKind},
    visitor::{self, SyntaxVisitor},
    writer::write_source,
};

const OPENING: &str = r#"
#include "nss/function.nss"

//=============================================================================
// Opening chapter
//=============================================================================
chapter main
{
    $GameStart = 1;
    CreateColor("black", 1000, 0, 0, 1280, 720, "BLACK");
    Fade("black", 0, 1000, null, true);

    call_scene @->scene01;
    call_chapter nss/0020_second.nss;
}

scene scene01
{
    /* The first scene shows the title card
       and waits for input. */
    CreateTexture("title", 100, Center, Middle, "cg/title.png");
    FadeDelete("title", 500, true);

    <PRE box00>
[text001]
It was raining that day.

Nobody noticed the door.
</PRE>

    if ($GameStart == 1 && !#SYSTEM_skip) {
        WaitKey;
    } else {
        Wait(100);
    }

    select {
        case choice_01: {
            $route = "left";
        }
        case choice_02: {
            $route = "right";
        }
    }
}

function Fade("name", time, start, tempo, wait)
{
    Fade("name", time, start, tempo, wait);
    while ($counter < 10) {
        $counter++;
    }
}
"#;

#[test]
fn test_full_script_parses_cleanly() {
    let source = SourceText::new(OPENING);
    let parsed = parse(&source);

    assert!(
        parsed.diagnostics.is_empty(),
        "Unexpected diagnostics: {:?}",
        parsed.diagnostics.into_vec()
    );

    let root = parsed.root;
    assert_eq!(root.file_references.len(), 1);
    assert_eq!(root.chapter_count, 1);
    assert_eq!(root.scene_count, 1);
    assert_eq!(root.function_count, 1);

    let main = root.subroutine("main").expect("chapter main");
    assert_eq!(main.kind, SubroutineKind::Chapter);
    assert_eq!(main.body.statements.len(), 5);

    let scene = root.subroutine("scene01").expect("scene01");
    let dialogue = scene.dialogue_blocks();
    assert_eq!(dialogue.len(), 1);
    assert_eq!(dialogue[0].box_name, "box00");
    assert_eq!(*dialogue[0].block_name.inner(), "text001");

    let function = root.subroutine("Fade").expect("function Fade");
    assert_eq!(function.parameters.len(), 5);
}

#[test]
fn test_full_script_round_trips() {
    let source = SourceText::new(OPENING);
    let first = write_source(&parse(&source).root);

    let reparsed = parse(&SourceText::new(&first));
    assert!(
        reparsed.diagnostics.is_empty(),
        "Written script does not parse cleanly:\n{first}\n{:?}",
        reparsed.diagnostics.into_vec()
    );
    assert_eq!(write_source(&reparsed.root), first);
}

#[test]
fn test_recovers_and_keeps_going() {
    let source = SourceText::new(
        r#"
        chapter main {
            Wait(100)
            CreateTexture("bg", 100, 0, 0, "cg/bg.png";
            if ($flag {
                Wait(1);
            }
        }

        garbage at file level

        scene after {
            Wait(2);
        }
        "#,
    );
    let parsed = parse(&source);

    let ids: Vec<_> = parsed.diagnostics.iter().map(|d| d.id()).collect();
    assert_eq!(
        ids,
        [
            DiagnosticId::MissingStatementTerminator,
            DiagnosticId::TokenExpected,
            DiagnosticId::TokenExpected,
            DiagnosticId::ExpectedSubroutineDeclaration,
        ]
    );
    assert!(parsed.diagnostics.has_errors());
    assert_eq!(parsed.root.subroutines.len(), 2);
    assert_eq!(parsed.root.subroutines[0].body.statements.len(), 3);
    assert_eq!(*parsed.root.subroutines[1].name.inner(), "after");

    let error = parsed
        .into_result()
        .expect_err("errors should fail the conversion");
    assert_eq!(error.diagnostics().len(), 4);
}

#[test]
fn test_warnings_alone_do_not_fail() {
    let parsed = parse(&SourceText::new("chapter main { 1 + 1; };"));

    assert!(!parsed.diagnostics.has_errors());
    assert!(
        parsed
            .diagnostics
            .iter()
            .all(|d| d.severity() == Severity::Warning)
    );
    assert!(parsed.into_result().is_ok());
}

#[test]
fn test_lexer_diagnostics_come_first() {
    let parsed = parse(&SourceText::new("chapter main { Wait(1) }\n/* never closed"));

    let ids: Vec<_> = parsed.diagnostics.iter().map(|d| d.id()).collect();
    assert_eq!(
        ids,
        [
            DiagnosticId::UnterminatedComment,
            DiagnosticId::MissingStatementTerminator,
        ]
    );
}

#[test]
fn test_dialogue_mode_fragment() {
    let (tokens, diagnostics) = tokenize("Line one{ Wait(1); }\n\nLine two", LexingMode::DialogueBlock);

    assert!(diagnostics.is_empty());
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        [
            TokenKind::Markup,
            TokenKind::OpenBrace,
            TokenKind::Identifier,
            TokenKind::OpenParen,
            TokenKind::NumericLiteral,
            TokenKind::CloseParen,
            TokenKind::Semicolon,
            TokenKind::CloseBrace,
            TokenKind::MarkupBlankLine,
            TokenKind::Markup,
            TokenKind::EndOfFileToken,
        ]
    );

    let parsed = parse_with_mode(
        &SourceText::new("Line one"),
        LexingMode::DialogueBlock,
    );
    assert_eq!(
        parsed.diagnostics.iter().next().map(|d| d.id()),
        Some(DiagnosticId::StrayPXmlElement)
    );
}

/// Counts every call to a named function, wherever it appears.
#[derive(Default)]
struct CallCounter {
    name: &'static str,
    count: usize,
}

impl<'a> SyntaxVisitor<'a> for CallCounter {
    fn visit_block(&mut self, block: &'a nss_parser::syntax::Block) {
        visitor::walk_block(self, block);
    }

    fn visit_if_statement(&mut self, statement: &'a nss_parser::syntax::IfStatement) {
        visitor::walk_if_statement(self, statement);
    }

    fn visit_expression_statement(
        &mut self,
        statement: &'a nss_parser::syntax::ExpressionStatement,
    ) {
        visitor::walk_expression_statement(self, statement);
    }

    fn visit_function_call(&mut self, call: &'a nss_parser::syntax::FunctionCallExpression) {
        if *call.target_name.inner() == self.name {
            self.count += 1;
        }
        visitor::walk_function_call(self, call);
    }
}

#[test]
fn test_custom_visitor() {
    let root = parse(&SourceText::new(
        "chapter main { Wait(1); if ($a) { Wait(2); } else Wait 3; Other(Wait(4)); }",
    ))
    .root;

    let mut counter = CallCounter {
        name: "Wait",
        ..CallCounter::default()
    };
    visitor::walk_subroutine(&mut counter, &root.subroutines[0]);
    assert_eq!(counter.count, 4);
}

#[test]
fn test_argument_values() {
    let root = parse(&SourceText::new(
        r##"chapter main { Draw(-5, 1.25, #00FF00, "text", $var, FALSE); }"##,
    ))
    .root;

    let Statement::Expression(statement) = &root.subroutines[0].body.statements[0] else {
        panic!("Expected expression statement");
    };
    let Expression::FunctionCall(call) = &statement.expression else {
        panic!("Expected call");
    };

    assert!(matches!(call.arguments[0], Expression::Unary(_)));
    let literals: Vec<_> = call.arguments[1..]
        .iter()
        .filter_map(|argument| match argument {
            Expression::Literal(literal) => Some(literal.value),
            _ => None,
        })
        .collect();
    assert_eq!(
        literals,
        [
            ConstantValue::Float(1.25),
            ConstantValue::Integer(0x00FF00),
            ConstantValue::String("text".into()),
            ConstantValue::Boolean(false),
        ]
    );
}
