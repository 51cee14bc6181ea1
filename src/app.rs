use std::path::PathBuf;

use iced::widget::text_editor;
use iced::{Element, Task};

use crate::assets::Icons;
use crate::editor::{EditorState, RunOutcome};
use crate::file::{self, FileError};
use crate::layout::{Layout, MenuAction, MenuId};
use crate::run::RunHandler;
use crate::settings::Settings;

pub struct App {
    pub settings: Settings,
    pub layout: Layout,
    pub icons: Icons,

    editor: EditorState,
    // what the input widget displays; mirrors `editor.input_text`
    content: text_editor::Content,
    output: String,

    open_menu: Option<MenuId>,
    current_path: Option<PathBuf>,
    run_handler: Box<dyn RunHandler>,
}

#[derive(Debug, Clone)]
pub enum Message {
    // Input panel
    InputAction(text_editor::Action),
    InputFocusLost,
    RunClicked,

    // Menu bar
    MenuToggled(MenuId),
    MenuSelected(MenuAction),

    // File
    FileOpened(Result<(PathBuf, String), FileError>),
    FileSaved(Result<PathBuf, FileError>),
}

/// Exact widget text. `Content::text` appends a newline to single-line text,
/// which would make `"a"` and `"a\n"` indistinguishable.
fn content_text(content: &text_editor::Content) -> String {
    content
        .lines()
        .map(|line| String::from(&*line))
        .collect::<Vec<_>>()
        .join("\n")
}

impl App {
    pub fn new(settings: Settings, icons: Icons, run_handler: Box<dyn RunHandler>) -> Self {
        let editor = EditorState::new(&settings.placeholder_text);
        let content = text_editor::Content::with_text(&editor.input_text);
        let output = settings.error_placeholder_text.clone();
        Self {
            settings,
            layout: Layout::default(),
            icons,
            editor,
            content,
            output,
            open_menu: None,
            current_path: None,
            run_handler,
        }
    }

    pub fn input_text(&self) -> &str {
        &self.editor.input_text
    }

    pub fn output_text(&self) -> &str {
        &self.output
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn content(&self) -> &text_editor::Content {
        &self.content
    }

    pub fn open_menu(&self) -> Option<MenuId> {
        self.open_menu
    }

    pub fn current_path(&self) -> Option<&PathBuf> {
        self.current_path.as_ref()
    }

    fn apply(&mut self, f: impl FnOnce(EditorState, &str) -> EditorState) {
        let state = std::mem::take(&mut self.editor);
        self.editor = f(state, &self.settings.placeholder_text);
        if content_text(&self.content) != self.editor.input_text {
            self.content = text_editor::Content::with_text(&self.editor.input_text);
        }
    }

    pub fn focus_gained(&mut self) {
        self.apply(EditorState::focus_gained);
    }

    pub fn focus_lost(&mut self) {
        self.apply(EditorState::focus_lost);
    }

    /// Returns the diagnostic written to the log, if the input was rejected.
    pub fn run_clicked(&mut self) -> Option<&'static str> {
        match self.editor.run_clicked(&self.settings.placeholder_text) {
            RunOutcome::Rejected { diagnostic } => {
                tracing::warn!("{}", diagnostic);
                Some(diagnostic)
            }
            RunOutcome::Accepted { source } => {
                if let Some(report) = self.run_handler.on_run(&source) {
                    self.output = report;
                }
                None
            }
        }
    }

    fn load_text(&mut self, text: String) {
        self.apply(move |_, placeholder| {
            let fresh = EditorState::new(placeholder);
            if text.is_empty() {
                fresh
            } else {
                fresh.edited(text)
            }
        });
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::InputAction(action) => {
                self.open_menu = None;
                if let text_editor::Action::Click(_) = action {
                    self.focus_gained();
                }
                let is_edit = action.is_edit();
                self.content.perform(action);
                if is_edit {
                    let text = content_text(&self.content);
                    self.apply(move |state, _| state.edited(text));
                }
            }
            Message::InputFocusLost => {
                self.open_menu = None;
                self.focus_lost();
            }
            Message::RunClicked => {
                self.open_menu = None;
                self.run_clicked();
            }
            Message::MenuToggled(id) => {
                self.open_menu = if self.open_menu == Some(id) {
                    None
                } else {
                    Some(id)
                };
            }
            Message::MenuSelected(action) => {
                self.open_menu = None;
                return self.menu_action(action);
            }
            Message::FileOpened(result) => match result {
                Ok((path, text)) => {
                    tracing::info!(path = %path.display(), "opened file");
                    self.load_text(text);
                    self.current_path = Some(path);
                }
                Err(FileError::Cancelled) => tracing::debug!("open cancelled"),
                Err(e) => tracing::error!(error = %e, "open failed"),
            },
            Message::FileSaved(result) => match result {
                Ok(path) => {
                    tracing::info!(path = %path.display(), "saved file");
                    self.current_path = Some(path);
                }
                Err(FileError::Cancelled) => tracing::debug!("save cancelled"),
                Err(e) => tracing::error!(error = %e, "save failed"),
            },
        }
        Task::none()
    }

    fn menu_action(&mut self, action: MenuAction) -> Task<Message> {
        match action {
            MenuAction::NewFile => {
                self.load_text(String::new());
                self.current_path = None;
                Task::none()
            }
            MenuAction::OpenFile => Task::perform(file::open_file(), Message::FileOpened),
            MenuAction::SaveFile => {
                let contents = self
                    .editor
                    .user_text(&self.settings.placeholder_text)
                    .unwrap_or_default()
                    .to_string();
                Task::perform(
                    file::save_file(self.current_path.clone(), contents),
                    Message::FileSaved,
                )
            }
        }
    }

    pub fn view(&self) -> Element<Message> {
        crate::ui::view(self)
    }
}
