use std::fs;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

use minipas::lexer::{LexError, VarType};
use minipas::parser::{
    parse, parse_with, ExprKind, LiteralValue, ParseError, ParseOutcome, ParserOptions, StatementKind, UnaryOp,
};

fn parse_file(source_path: &str) -> ParseOutcome {
    let source = fs::read_to_string(source_path)
        .unwrap_or_else(|e| panic!("Failed to read {source_path}: {e}"));
    parse(&source)
}

fn errors(outcome: &ParseOutcome) -> Vec<ParseError> {
    outcome.diagnostics.iter().map(|d| d.error.clone()).collect()
}

fn first_error(outcome: &ParseOutcome) -> ParseError {
    outcome
        .diagnostics
        .iter()
        .next()
        .map(|d| d.error.clone())
        .expect("expected at least one diagnostic")
}

#[test]
fn test_assign_and_write() {
    let outcome = parse("program p; var x : integer; begin x := 5; write(x) end.");
    assert!(outcome.is_success(), "{:?}", errors(&outcome));
    assert_eq!(outcome.error_count(), 0);

    let program = outcome.program.unwrap();
    assert_eq!(program.name, "p");
    assert_eq!(program.body.statements.len(), 2);
    assert!(matches!(
        &program.body.statements[1].kind,
        StatementKind::Write { newline: false, args } if args.len() == 1
    ));
}

#[test]
fn test_write_is_not_required() {
    let outcome = parse("program p; var x : integer; begin x := 5 end.");
    assert!(outcome.is_success(), "{:?}", errors(&outcome));
}

#[test]
fn test_redeclaration_in_one_list() {
    let outcome = parse("program p; var x, x : integer; begin end.");
    assert!(!outcome.is_success());

    let redeclared = errors(&outcome)
        .into_iter()
        .filter(|e| matches!(e, ParseError::Redeclared(name) if name == "x"))
        .count();
    assert_eq!(redeclared, 1);
    assert_eq!(first_error(&outcome), ParseError::Redeclared("x".to_string()));
}

#[test]
fn test_redeclaration_across_statements() {
    let outcome = parse("program p; var x : integer; y : real; x : string; begin x := 1 end.");
    assert_eq!(first_error(&outcome), ParseError::Redeclared("x".to_string()));
    assert_eq!(outcome.symbols.lookup("x"), Some(VarType::Integer));
    assert_eq!(outcome.symbols.lookup("y"), Some(VarType::Real));
}

#[test]
fn test_string_spanning_lines() {
    let outcome = parse("program p;\nvar s : string;\nbegin s := 'abc\ndef'; write(s) end.");
    assert!(!outcome.is_success());
    assert_eq!(
        first_error(&outcome),
        ParseError::UnrecognizedInput {
            lexeme: "'abc".to_string(),
            cause: Some(LexError::UnterminatedString),
        }
    );

    let first = outcome.diagnostics.iter().next().unwrap();
    assert_eq!(first.to_string(), "4: Unrecognized Input Pattern\n('abc)");
}

#[test]
fn test_sign_before_boolean() {
    let outcome = parse("program p; var x : integer; begin x := -true end.");
    assert_eq!(first_error(&outcome), ParseError::SignedBoolean(UnaryOp::Minus));
}

#[test]
fn test_sign_rules_on_factors() {
    let cases = [
        ("x := -x", ParseError::SignedIdentifier { op: UnaryOp::Minus, name: "x".to_string() }),
        ("s := +'a'", ParseError::SignedString(UnaryOp::Plus)),
        ("x := not 5", ParseError::NotOnNumber),
        ("b := +false", ParseError::SignedBoolean(UnaryOp::Plus)),
    ];
    for (statement, expected) in cases {
        let source = format!("program p; var x : integer; s : string; b : boolean; begin {statement} end.");
        let outcome = parse(&source);
        assert_eq!(first_error(&outcome), expected, "{statement}");
    }
}

#[test]
fn test_legal_signs() {
    let outcome = parse(
        "program p; var x : integer; r : real; b : boolean; begin x := -5; r := +2.5; b := not true end.",
    );
    assert!(outcome.is_success(), "{:?}", errors(&outcome));

    let program = outcome.program.unwrap();
    let StatementKind::Assign { value, .. } = &program.body.statements[0].kind else {
        panic!("expected assignment");
    };
    assert!(matches!(
        &value.kind,
        ExprKind::Unary { op: UnaryOp::Minus, operand }
            if operand.kind == ExprKind::Literal(LiteralValue::Integer(5))
    ));
}

#[test]
fn test_undeclared_variable() {
    let outcome = parse_file("tests/programs/errors.pas");
    assert!(!outcome.is_success());
    assert_eq!(outcome.error_count(), 3);

    let printed: Vec<String> = outcome.diagnostics.iter().map(ToString::to_string).collect();
    assert_eq!(
        printed,
        vec![
            "6: Undeclared Variable: y",
            "6: Incorrect Simple Statement.",
            "6: Incorrect Program Body.",
        ]
    );
}

#[test]
fn test_undeclared_in_expression() {
    let outcome = parse("program p; var x : integer; begin x := z + 1 end.");
    assert_eq!(first_error(&outcome), ParseError::UndeclaredVariable("z".to_string()));
}

#[test]
fn test_full_sample_program() {
    let outcome = parse_file("tests/programs/valid.pas");
    assert!(outcome.is_success(), "{:?}", errors(&outcome));

    let names: Vec<_> = outcome.symbols.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["count", "total", "ratio", "done", "name"]);

    let program = outcome.program.unwrap();
    assert_eq!(program.name, "Sample");
    assert_eq!(program.declarations.len(), 4);
    assert!(program.declarations[1].initializer.is_some());
    assert!(program.declarations[0].initializer.is_none());
    assert_eq!(program.body.statements.len(), 6);
    assert!(matches!(
        &program.body.statements[4].kind,
        StatementKind::If { else_branch: Some(_), .. }
    ));
}

#[test]
fn test_keywords_any_case() {
    let outcome = parse("PROGRAM P; VAR X : INTEGER; BEGIN X := 1; WriteLn(X) END.");
    assert!(outcome.is_success(), "{:?}", errors(&outcome));
}

#[test]
fn test_missing_var_aborts_declarations() {
    let outcome = parse("program p; begin x := 1 end.");
    assert_eq!(
        errors(&outcome),
        vec![
            ParseError::Missing {
                expected: "Var keyword",
                found: "begin".to_string(),
            },
            ParseError::Context("Incorrect Declaration Section."),
        ]
    );
}

#[test]
fn test_missing_then() {
    let outcome = parse("program p; var x : integer; begin if x > 1 x := 2 end.");
    assert_eq!(
        first_error(&outcome),
        ParseError::Missing {
            expected: "then keyword in if statement",
            found: "x".to_string(),
        }
    );
}

#[test]
fn test_missing_right_parenthesis() {
    let outcome = parse("program p; var x : integer; begin writeln(x, 1 end.");
    assert_eq!(
        errors(&outcome)[..2],
        [
            ParseError::Missing {
                expected: "Right Parenthesis",
                found: "end".to_string(),
            },
            ParseError::Context("Incorrect Simple Statement."),
        ]
    );
}

#[test]
fn test_relational_is_not_associative() {
    let outcome = parse("program p; var b : boolean; x : integer; begin b := x < 5 = 3 end.");
    assert_eq!(
        first_error(&outcome),
        ParseError::Missing {
            expected: "end of compound statement",
            found: "=".to_string(),
        }
    );
}

#[test]
fn test_malformed_real() {
    let outcome = parse("program p; var r : real; begin r := 1.2.3 end.");
    assert_eq!(
        first_error(&outcome),
        ParseError::UnrecognizedInput {
            lexeme: "1.2.".to_string(),
            cause: Some(LexError::MalformedReal),
        }
    );
}

#[test]
fn test_unrecognized_character_in_list() {
    let outcome = parse("program p; var x : integer; begin write(x, 2 ? 3) end.");
    assert_eq!(
        first_error(&outcome),
        ParseError::UnrecognizedInput {
            lexeme: "?".to_string(),
            cause: Some(LexError::UnrecognizedChar('?')),
        }
    );
    let unrecognized = errors(&outcome)
        .iter()
        .filter(|e| matches!(e, ParseError::UnrecognizedInput { .. }))
        .count();
    assert_eq!(unrecognized, 1);
}

#[test]
fn test_missing_comma_in_declaration() {
    let outcome = parse("program p; var a b : integer; begin a := 1 end.");
    assert_eq!(
        first_error(&outcome),
        ParseError::Missing {
            expected: "comma in declaration statement",
            found: "b".to_string(),
        }
    );
}

#[test]
fn test_empty_compound_is_rejected() {
    let outcome = parse("program p; var x : integer; begin end.");
    assert_eq!(
        first_error(&outcome),
        ParseError::Missing {
            expected: "statement",
            found: "end".to_string(),
        }
    );
}

#[test]
fn test_trailing_dot_is_optional() {
    let outcome = parse("program p; var x : integer; begin x := 1 end");
    assert!(outcome.is_success(), "{:?}", errors(&outcome));
}

#[test]
fn test_nesting_limit() {
    let nested = format!("{}1{}", "(".repeat(20), ")".repeat(20));
    let source = format!("program p; var x : integer; begin x := {nested} end.");

    let outcome = parse_with(&source, ParserOptions { max_depth: 8 });
    assert_eq!(first_error(&outcome), ParseError::NestingTooDeep(8));

    let outcome = parse(&source);
    assert!(outcome.is_success(), "{:?}", errors(&outcome));
}

#[test]
fn test_independent_runs() {
    let first = parse("program p; var x : integer; begin x := 1 end.");
    let second = parse("program q; var y : integer; begin x := 1 end.");
    assert!(first.is_success());
    assert_eq!(first_error(&second), ParseError::UndeclaredVariable("x".to_string()));
    assert!(!second.symbols.is_declared("x"));
}

fn run_cli(args: &[&str]) -> (bool, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_minipas"))
        .args(args)
        .output()
        .expect("Failed to run minipas");
    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).into_owned(),
    )
}

#[test]
fn test_cli_parse_success() {
    let (ok, stdout) = run_cli(&["parse", "tests/programs/valid.pas"]);
    assert!(ok, "{stdout}");
    assert!(stdout.ends_with("(DONE)\n"), "{stdout}");
}

#[test]
fn test_cli_parse_failure() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(file, "program p; var x : integer; begin x := -true end.").unwrap();

    let (ok, stdout) = run_cli(&["parse", file.path().to_str().unwrap()]);
    assert!(!ok);
    assert!(stdout.starts_with("1: Illegal use of sign '-' before a boolean constant\n"), "{stdout}");
    assert!(stdout.contains("Unsuccessful Parsing"), "{stdout}");
    assert!(stdout.contains("Number of Syntax Errors 4"), "{stdout}");
}

#[test]
fn test_cli_lex_listing() {
    let (ok, stdout) = run_cli(&["lex", "tests/programs/lexemes.pas"]);
    assert!(ok, "{stdout}");

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "PROGRAM");
    assert_eq!(lines[1], "IDENT: \"lex\"");
    assert_eq!(lines[2], "SEMICOL");
    assert_eq!(lines[3], "VAR");
    assert_eq!(lines[4], "IDENT: \"a1$\"");
    assert_eq!(lines[8], "RCONST: \"3.14\"");
    assert!(stdout.contains("Lines: 4\n"), "{stdout}");
    assert!(stdout.ends_with("Total tokens: 16\n"), "{stdout}");
}

#[test]
fn test_cli_lex_reports_errors() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(file, "x := 'open\ny").unwrap();

    let (ok, stdout) = run_cli(&["lex", file.path().to_str().unwrap()]);
    assert!(!ok);
    assert!(stdout.contains("Error in line 1: Unrecognized Lexeme {'open}"), "{stdout}");
}

#[test]
fn test_cli_missing_file() {
    let (ok, _) = run_cli(&["parse", "tests/programs/does_not_exist.pas"]);
    assert!(!ok);
}
