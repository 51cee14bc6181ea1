use std::fmt;

use super::lexer::LexError;
use super::parser::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Lexical,
    Syntax,
}

/// A phase error as it appears in the report. `line` only orders entries;
/// the message already names it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationError {
    pub phase: Phase,
    pub message: String,
    pub line: Option<usize>,
}

impl fmt::Display for CompilationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<&LexError> for CompilationError {
    fn from(e: &LexError) -> Self {
        Self {
            phase: Phase::Lexical,
            message: e.to_string(),
            line: Some(e.line),
        }
    }
}

impl From<&ParseError> for CompilationError {
    fn from(e: &ParseError) -> Self {
        Self {
            phase: Phase::Syntax,
            message: e.to_string(),
            line: e.line(),
        }
    }
}

/// Accumulates errors across compiler phases and renders them as one report.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<CompilationError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: impl Into<CompilationError>) {
        self.errors.push(error.into());
    }

    /// Errors sorted by line; errors without a line (end of input) sort last.
    pub fn sorted(&self) -> Vec<&CompilationError> {
        let mut errors: Vec<_> = self.errors.iter().collect();
        errors.sort_by_key(|e| (e.line.unwrap_or(usize::MAX), e.phase));
        errors
    }

    /// Empty string when nothing was collected.
    pub fn report(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        let sorted = self.sorted();
        let mut out = String::new();
        for (phase, heading) in [
            (Phase::Lexical, "Lexical Errors:"),
            (Phase::Syntax, "Syntax Errors:"),
        ] {
            let group: Vec<_> = sorted.iter().filter(|e| e.phase == phase).collect();
            if group.is_empty() {
                continue;
            }
            out.push_str(heading);
            out.push('\n');
            for (i, error) in group.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", i + 1, error));
            }
            out.push('\n');
        }
        out.push_str(&format!("Total Errors: {}\n", self.errors.len()));
        out
    }
}
