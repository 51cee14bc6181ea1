//! APBL compiler front-end: lexing, parsing and analysis reports.

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod report;
pub mod token;

use std::path::{Path, PathBuf};

use thiserror::Error;

use self::ast::Program;
use self::diagnostics::ErrorCollector;
use self::lexer::LexError;
use self::parser::ParseError;
use self::token::Token;

pub const LEXICAL_FILE: &str = "lexical_analysis.txt";
pub const SYNTAX_FILE: &str = "syntax_analysis.txt";

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Lexical analysis failed: {0}")]
    Lex(#[from] LexError),

    #[error("Syntax analysis failed with {} error(s)", .0.len())]
    Parse(Vec<ParseError>),

    #[error("I/O error on `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CompileError {
    /// Numbered error listing, as shown in the output panel.
    pub fn report(&self) -> String {
        let mut collector = ErrorCollector::new();
        match self {
            CompileError::Lex(e) => collector.add(e),
            CompileError::Parse(errors) => errors.iter().for_each(|e| collector.add(e)),
            CompileError::Io { .. } => return format!("{}\n", self),
        }
        collector.report()
    }
}

#[derive(Debug, Clone)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub program: Program,
}

impl Compilation {
    pub fn lexical_report(&self) -> String {
        report::lexical_analysis(&self.tokens)
    }

    pub fn syntax_report(&self) -> String {
        report::syntax_analysis(Some(&self.program))
    }
}

pub fn compile_source(source: &str) -> Result<Compilation, CompileError> {
    let tokens = lexer::tokenize(source)?;
    tracing::debug!(count = tokens.len(), "lexical analysis done");
    let program = parser::parse(&tokens).map_err(CompileError::Parse)?;
    tracing::debug!(statements = program.statements.len(), "syntax analysis done");
    Ok(Compilation { tokens, program })
}

/// Compiles `path` and writes both analysis files into `out_dir`.
///
/// Both files are always written. A phase that fails, or never runs because
/// an earlier one failed, gets a failure marker in place of its listing.
pub fn compile_file(path: &Path, out_dir: &Path) -> Result<Compilation, CompileError> {
    let source = std::fs::read_to_string(path).map_err(|source| CompileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::create_dir_all(out_dir).map_err(|source| CompileError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let syntax_path = out_dir.join(SYNTAX_FILE);
    let tokens = match lexer::tokenize(&source) {
        Ok(tokens) => tokens,
        Err(e) => {
            write_report(&out_dir.join(LEXICAL_FILE), &report::lexical_failure(&e))?;
            write_report(&syntax_path, &report::syntax_analysis(None))?;
            return Err(e.into());
        }
    };
    write_report(&out_dir.join(LEXICAL_FILE), &report::lexical_analysis(&tokens))?;

    match parser::parse(&tokens) {
        Ok(program) => {
            write_report(&syntax_path, &report::syntax_analysis(Some(&program)))?;
            tracing::info!(file = %path.display(), "compiled");
            Ok(Compilation { tokens, program })
        }
        Err(errors) => {
            write_report(&syntax_path, &report::syntax_analysis(None))?;
            Err(CompileError::Parse(errors))
        }
    }
}

fn write_report(path: &Path, contents: &str) -> Result<(), CompileError> {
    std::fs::write(path, contents).map_err(|source| CompileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_failure_surfaces_as_compile_error() {
        let err = compile_source("int x = 1 @ 2.").unwrap_err();
        assert!(matches!(err, CompileError::Lex(_)));
        assert_eq!(
            err.report(),
            "Lexical Errors:\n1. Invalid character at line 1: '@'\n\nTotal Errors: 1\n"
        );
    }

    #[test]
    fn parse_failure_lists_every_error() {
        let err = compile_source("int = 1.\nstring s \"x\".").unwrap_err();
        let CompileError::Parse(errors) = &err else {
            panic!("expected parse failure");
        };
        assert_eq!(errors.len(), 2);
        assert!(err.report().ends_with("Total Errors: 2\n"));
    }
}
