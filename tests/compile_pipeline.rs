use std::path::Path;

use apbl_studio::apbl::ast::Stmt;
use apbl_studio::apbl::report::{LEXICAL_HEADER, SYNTAX_HEADER};
use apbl_studio::apbl::{compile_file, compile_source, CompileError, LEXICAL_FILE, SYNTAX_FILE};

fn sample() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/sample_code.apbl"))
}

#[test]
fn sample_program_compiles() {
    let source = std::fs::read_to_string(sample()).unwrap();
    let compilation = compile_source(&source).unwrap();
    let statements = &compilation.program.statements;
    assert_eq!(statements.len(), 10);
    assert!(matches!(statements[5], Stmt::FunctionDef { .. }));
    assert!(matches!(statements[8], Stmt::If { else_block: Some(_), .. }));
    assert!(matches!(statements[9], Stmt::While { .. }));
}

#[test]
fn compile_file_writes_both_reports() {
    let out = tempfile::tempdir().unwrap();
    compile_file(sample(), out.path()).unwrap();

    let lexical = std::fs::read_to_string(out.path().join(LEXICAL_FILE)).unwrap();
    assert!(lexical.starts_with(LEXICAL_HEADER));
    assert!(lexical.contains("Line 5: STRING_TYPE(string)"));
    assert!(lexical.contains("Line 7: FLOAT_NUM(12.5)"));
    assert!(lexical.contains("Line 8: DATE_VAL(2025-03-14)"));

    let syntax = std::fs::read_to_string(out.path().join(SYNTAX_FILE)).unwrap();
    assert!(syntax.starts_with(SYNTAX_HEADER));
    assert!(syntax.contains("function_def 'total' : int"));
    assert!(syntax.contains("function_call 'book'"));
}

#[test]
fn syntax_failure_still_writes_marker() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("broken.apbl");
    std::fs::write(&src, "int x = .").unwrap();

    let err = compile_file(&src, dir.path()).unwrap_err();
    assert!(matches!(err, CompileError::Parse(_)));
    let syntax = std::fs::read_to_string(dir.path().join(SYNTAX_FILE)).unwrap();
    assert!(syntax.ends_with("Failed to generate AST\n"));
    assert!(dir.path().join(LEXICAL_FILE).exists());
}

#[test]
fn missing_source_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = compile_file(&dir.path().join("absent.apbl"), dir.path()).unwrap_err();
    assert!(matches!(err, CompileError::Io { .. }));
}

#[test]
fn lexical_failure_replaces_stale_reports() {
    let out = tempfile::tempdir().unwrap();
    compile_file(sample(), out.path()).unwrap();

    let src = out.path().join("broken.apbl");
    std::fs::write(&src, "int x = 1 # 2.").unwrap();
    let err = compile_file(&src, out.path()).unwrap_err();
    assert!(matches!(err, CompileError::Lex(_)));

    let lexical = std::fs::read_to_string(out.path().join(LEXICAL_FILE)).unwrap();
    assert_eq!(
        lexical,
        format!("{LEXICAL_HEADER}Failed to tokenize: Invalid character at line 1: '#'\n")
    );
    let syntax = std::fs::read_to_string(out.path().join(SYNTAX_FILE)).unwrap();
    assert!(syntax.ends_with("Failed to generate AST\n"));
}
