//! APBL Studio: a small editor window for APBL sources, plus the lexer and
//! parser that back its run button.

pub mod apbl;
pub mod app;
pub mod assets;
pub mod editor;
pub mod file;
pub mod layout;
pub mod logging;
pub mod run;
pub mod settings;
pub mod ui;

pub use crate::app::{App, Message};
pub use crate::editor::{EditorState, RunOutcome, INVALID_INPUT_MESSAGE};
pub use crate::run::{CompileRunHandler, NoopRunHandler, RunHandler};
pub use crate::settings::Settings;
