use apbl_studio::assets::Icons;
use apbl_studio::{App, Message, NoopRunHandler, RunHandler, Settings, INVALID_INPUT_MESSAGE};
use iced::widget::text_editor::{Action, Edit};
use iced::Point;

const PLACEHOLDER: &str = "[ Please Type Here ]";
const ERROR_PLACEHOLDER: &str = "[ Error Messages ]";

fn window() -> App {
    App::new(Settings::default(), Icons::embedded(), Box::new(NoopRunHandler))
}

fn click_input(app: &mut App) {
    let _ = app.update(Message::InputAction(Action::Click(Point::ORIGIN)));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        let _ = app.update(Message::InputAction(Action::Edit(Edit::Insert(c))));
    }
}

fn window_with_text(text: &str) -> App {
    let mut app = window();
    click_input(&mut app);
    type_text(&mut app, text);
    app
}

#[test]
fn opens_with_both_placeholders() {
    let app = window();
    assert_eq!(app.input_text(), PLACEHOLDER);
    assert_eq!(app.output_text(), ERROR_PLACEHOLDER);
}

#[test]
fn focus_gained_clears_placeholder() {
    let mut app = window();
    app.focus_gained();
    assert_eq!(app.input_text(), "");
}

#[test]
fn clicking_the_input_clears_placeholder() {
    let mut app = window();
    click_input(&mut app);
    assert_eq!(app.input_text(), "");
    assert!(!app.editor().placeholder_shown);
}

#[test]
fn keystrokes_reach_the_editor_state() {
    let mut app = window();
    click_input(&mut app);
    type_text(&mut app, "book(1).");
    assert_eq!(app.input_text(), "book(1).");
    assert!(!app.editor().placeholder_shown);

    click_input(&mut app);
    assert_eq!(app.input_text(), "book(1).");
}

#[test]
fn erased_text_gives_way_to_placeholder_on_focus_loss() {
    let mut app = window_with_text("ab");
    for _ in 0..2 {
        let _ = app.update(Message::InputAction(Action::Edit(Edit::Backspace)));
    }
    assert_eq!(app.input_text(), "");

    let _ = app.update(Message::InputFocusLost);
    assert_eq!(app.input_text(), PLACEHOLDER);
    assert!(app.editor().placeholder_shown);
}

#[test]
fn focus_lost_on_empty_restores_placeholder() {
    let mut app = window();
    app.focus_gained();
    let _ = app.update(Message::InputFocusLost);
    assert_eq!(app.input_text(), PLACEHOLDER);
}

#[test]
fn focus_lost_keeps_user_text() {
    let mut app = window_with_text("SELECT * FROM bookings");
    let _ = app.update(Message::InputFocusLost);
    assert_eq!(app.input_text(), "SELECT * FROM bookings");
    assert!(!app.editor().placeholder_shown);
}

#[test]
fn opened_file_counts_as_user_text() {
    let mut app = window();
    let _ = app.update(Message::FileOpened(Ok(("input.apbl".into(), "hello".into()))));
    let _ = app.update(Message::InputFocusLost);
    assert_eq!(app.input_text(), "hello");
}

#[test]
fn run_on_empty_or_placeholder_only_emits_diagnostic() {
    let mut app = window();
    assert_eq!(app.run_clicked(), Some(INVALID_INPUT_MESSAGE));
    assert_eq!(app.input_text(), PLACEHOLDER);
    assert_eq!(app.output_text(), ERROR_PLACEHOLDER);

    app.focus_gained();
    assert_eq!(app.run_clicked(), Some("Please enter valid input!"));
    assert_eq!(app.input_text(), "");
    assert_eq!(app.output_text(), ERROR_PLACEHOLDER);
}

#[test]
fn run_on_text_with_noop_hook_changes_nothing() {
    let mut app = window_with_text("hello");
    assert_eq!(app.run_clicked(), None);
    assert_eq!(app.input_text(), "hello");
    assert_eq!(app.output_text(), ERROR_PLACEHOLDER);
}

struct Echo;

impl RunHandler for Echo {
    fn on_run(&self, source: &str) -> Option<String> {
        Some(format!("ran: {source}"))
    }
}

#[test]
fn run_hook_report_replaces_output_panel() {
    let mut app = App::new(Settings::default(), Icons::embedded(), Box::new(Echo));
    click_input(&mut app);
    type_text(&mut app, "book(1).");
    let _ = app.update(Message::RunClicked);
    assert_eq!(app.output_text(), "ran: book(1).");
}

#[test]
fn configured_placeholder_is_used() {
    let settings = Settings {
        placeholder_text: "type here".into(),
        ..Settings::default()
    };
    let mut app = App::new(settings, Icons::embedded(), Box::new(NoopRunHandler));
    assert_eq!(app.input_text(), "type here");
    assert_eq!(app.run_clicked(), Some(INVALID_INPUT_MESSAGE));
    app.focus_gained();
    assert_eq!(app.input_text(), "");
}
