//! Integration tests for the ScriptParser API

use nss::{
    NssError, ScriptParser,
    config::{AppConfig, InitialMode},
    syntax::Statement,
};
use nss_parser::{
    TokenKind,
    error::{DiagnosticId, Severity},
};

fn config_from_toml(text: &str) -> AppConfig {
    toml::from_str(text).expect("config should deserialize")
}

#[test]
fn test_parse_simple_script() {
    let source = r#"
        chapter main {
            CreateTexture("bg", 100, 0, 0, "cg/bg.png");
            Wait(500);
        }
    "#;

    let result = ScriptParser::default().parse(source);
    assert!(result.is_ok(), "Should parse valid script: {:?}", result.err());

    let script = result.expect("checked above");
    assert_eq!(script.root().chapter_count, 1);
    assert!(script.warnings().is_empty());
}

#[test]
fn test_parse_error_keeps_source() {
    let source = "chapter main { Wait(1 }";

    match ScriptParser::default().parse(source) {
        Err(NssError::Parse { err, src }) => {
            assert_eq!(src, source);
            assert_eq!(err.diagnostics()[0].id(), DiagnosticId::TokenExpected);
            assert!(err.to_string().starts_with("error[E106]"));
        }
        other => panic!("Expected parse error, got {other:?}"),
    }
}

#[test]
fn test_warnings_are_returned_with_the_script() {
    let script = ScriptParser::default()
        .parse("chapter main { $a; }")
        .expect("warnings alone should not fail");

    assert_eq!(script.warnings().len(), 1);
    assert_eq!(
        script.warnings()[0].id(),
        DiagnosticId::InvalidExpressionStatement
    );
}

#[test]
fn test_warnings_as_errors() {
    let config = config_from_toml(
        r#"
        [diagnostics]
        warnings_as_errors = true
        "#,
    );

    match ScriptParser::new(config).parse("chapter main { $a; }") {
        Err(NssError::Parse { err, .. }) => {
            assert_eq!(err.diagnostics().len(), 1);
            assert_eq!(err.diagnostics()[0].severity(), Severity::Error);
        }
        other => panic!("Expected parse error, got {other:?}"),
    }
}

#[test]
fn test_config_defaults_from_empty_document() {
    let config = config_from_toml("");

    assert_eq!(config.lexer().initial_mode(), InitialMode::Normal);
    assert!(!config.diagnostics().warnings_as_errors());
    assert_eq!(config.diagnostics().max_reported(), None);
}

#[test]
fn test_config_rejects_unknown_mode() {
    let result: Result<AppConfig, _> = toml::from_str(
        r#"
        [lexer]
        initial_mode = "sideways"
        "#,
    );
    assert!(result.is_err());
}

#[test]
fn test_dialogue_block_initial_mode() {
    let config = config_from_toml(
        r#"
        [lexer]
        initial_mode = "dialogue_block"
        "#,
    );
    let parser = ScriptParser::new(config);

    let (tokens, diagnostics) = parser.tokenize("Hello{ Wait(1); }");
    assert!(diagnostics.is_empty());
    assert_eq!(tokens[0].kind, TokenKind::Markup);

    let parsed = parser.parse_lenient("Hello");
    assert_eq!(
        parsed.diagnostics.iter().next().map(|d| d.id()),
        Some(DiagnosticId::StrayPXmlElement)
    );
}

#[test]
fn test_max_reported_truncates() {
    let config = config_from_toml(
        r#"
        [diagnostics]
        max_reported = 2
        "#,
    );
    let parser = ScriptParser::new(config);

    let parsed = parser.parse_lenient("a\nb\nc\nd");
    let diagnostics = parsed.diagnostics.into_vec();
    assert_eq!(diagnostics.len(), 4);
    assert_eq!(parser.reported(&diagnostics).len(), 2);
}

#[test]
fn test_write_source_round_trip() {
    let parser = ScriptParser::default();
    let script = parser
        .parse("scene s { if ($a) WaitKey; else { return; } }")
        .expect("Failed to parse");

    let text = parser.write_source(script.root());
    let reparsed = parser.parse(&text).expect("Written source should parse");
    assert_eq!(parser.write_source(reparsed.root()), text);

    let Statement::If(statement) = &reparsed.root().subroutines[0].body.statements[0] else {
        panic!("Expected if statement");
    };
    assert!(statement.if_false.is_some());
}
