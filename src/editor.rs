//! Placeholder state of the input panel and the run-click validation.
//!
//! Handlers take the state by value and hand back the updated state, so the
//! window never pokes at the text from more than one place.

/// Emitted on the diagnostic stream when run is clicked without real input.
pub const INVALID_INPUT_MESSAGE: &str = "Please enter valid input!";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    pub input_text: String,
    pub placeholder_shown: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Input was empty or still the placeholder.
    Rejected { diagnostic: &'static str },
    /// Input is ready for the run hook.
    Accepted { source: String },
}

impl EditorState {
    pub fn new(placeholder: &str) -> Self {
        Self {
            input_text: placeholder.to_string(),
            placeholder_shown: true,
        }
    }

    pub fn focus_gained(mut self, placeholder: &str) -> Self {
        if self.input_text == placeholder {
            self.input_text.clear();
            self.placeholder_shown = false;
        }
        self
    }

    pub fn focus_lost(mut self, placeholder: &str) -> Self {
        if self.input_text.is_empty() {
            self.input_text = placeholder.to_string();
            self.placeholder_shown = true;
        }
        self
    }

    /// Text typed or loaded through the toolkit.
    pub fn edited(mut self, text: String) -> Self {
        self.input_text = text;
        self.placeholder_shown = false;
        self
    }

    pub fn run_clicked(&self, placeholder: &str) -> RunOutcome {
        if self.input_text.is_empty() || self.input_text == placeholder {
            RunOutcome::Rejected {
                diagnostic: INVALID_INPUT_MESSAGE,
            }
        } else {
            RunOutcome::Accepted {
                source: self.input_text.clone(),
            }
        }
    }

    /// User text worth saving; `None` while only the placeholder is shown.
    pub fn user_text(&self, placeholder: &str) -> Option<&str> {
        if self.placeholder_shown && self.input_text == placeholder {
            None
        } else {
            Some(&self.input_text)
        }
    }
}
