//! Hooks invoked when run is clicked with valid input.

use crate::apbl;
use crate::settings::OnRun;

pub trait RunHandler: Send + Sync {
    /// `Some` replaces the output panel text; `None` leaves the window alone.
    fn on_run(&self, source: &str) -> Option<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRunHandler;

impl RunHandler for NoopRunHandler {
    fn on_run(&self, _source: &str) -> Option<String> {
        None
    }
}

/// Runs the APBL front-end and reports tokens and tree, or the errors.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompileRunHandler;

impl RunHandler for CompileRunHandler {
    fn on_run(&self, source: &str) -> Option<String> {
        let report = match apbl::compile_source(source) {
            Ok(compilation) => {
                tracing::info!(
                    tokens = compilation.tokens.len(),
                    statements = compilation.program.statements.len(),
                    "compilation succeeded"
                );
                format!(
                    "{}\n{}",
                    compilation.lexical_report(),
                    compilation.syntax_report()
                )
            }
            Err(e) => {
                tracing::warn!(error = %e, "compilation failed");
                e.report()
            }
        };
        Some(report)
    }
}

pub fn handler_for(on_run: OnRun) -> Box<dyn RunHandler> {
    match on_run {
        OnRun::None => Box::new(NoopRunHandler),
        OnRun::Compile => Box::new(CompileRunHandler),
    }
}
