//! Screen state and key routing for the terminal app.
//!
//! # Responsibility
//! - Track which screen is active (list or modal add form).
//! - Route key presses to list navigation, the add form, or the controller.
//!
//! # Invariants
//! - Leaving the add form always returns to the list screen.
//! - A failed insert never ends the event loop; the current mirror stays.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::warn;
use notes_core::{AddForm, AddOutcome, ListController, NoteStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    List,
    Add(AddForm),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
}

pub struct App<S: NoteStore> {
    controller: ListController<S>,
    screen: Screen,
    selected: usize,
}

impl<S: NoteStore> App<S> {
    pub fn new(controller: ListController<S>) -> Self {
        Self {
            controller,
            screen: Screen::List,
            selected: 0,
        }
    }

    pub fn controller(&self) -> &ListController<S> {
        &self.controller
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Highlighted row, `None` when the list is empty.
    pub fn selected(&self) -> Option<usize> {
        let len = self.controller.notes().len();
        (len > 0).then(|| self.selected.min(len - 1))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return AppAction::Quit;
        }

        match std::mem::replace(&mut self.screen, Screen::List) {
            Screen::List => self.handle_list_key(key),
            Screen::Add(form) => {
                self.handle_add_key(form, key);
                AppAction::Continue
            }
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,
            KeyCode::Char('a') | KeyCode::Char('+') => {
                self.screen = Screen::Add(AddForm::new());
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected().unwrap_or(0).saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(current) = self.selected() {
                    let last = self.controller.notes().len() - 1;
                    self.selected = (current + 1).min(last);
                }
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_add_key(&mut self, mut form: AddForm, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.finish_add(form.submit()),
            KeyCode::Esc => self.finish_add(form.cancel()),
            KeyCode::Backspace => {
                form.backspace();
                self.screen = Screen::Add(form);
            }
            KeyCode::Char(ch) => {
                form.insert_char(ch);
                self.screen = Screen::Add(form);
            }
            _ => self.screen = Screen::Add(form),
        }
    }

    fn finish_add(&mut self, outcome: AddOutcome) {
        match self.controller.handle_add_outcome(outcome) {
            Ok(Some(_)) => {
                self.selected = self.controller.notes().len().saturating_sub(1);
            }
            Ok(None) => {}
            Err(err) => {
                warn!("event=add_submit module=app status=error error={err}");
            }
        }
        self.screen = Screen::List;
    }
}

#[cfg(test)]
mod tests {
    use super::{App, AppAction, Screen};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use notes_core::db::open_db_in_memory;
    use notes_core::{ListController, NoteStore, SqliteNoteStore};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text<S: NoteStore>(app: &mut App<S>, text: &str) {
        for ch in text.chars() {
            app.handle_key(press(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn add_key_opens_form_and_enter_inserts_note() {
        let conn = open_db_in_memory().unwrap();
        let mut controller = ListController::new(SqliteNoteStore::new(&conn));
        controller.mount().unwrap();
        let mut app = App::new(controller);

        app.handle_key(press(KeyCode::Char('a')));
        assert!(matches!(app.screen(), Screen::Add(_)));
        type_text(&mut app, "Buy eggs");
        app.handle_key(press(KeyCode::Enter));

        assert_eq!(app.screen(), &Screen::List);
        let rows: Vec<&str> = app.controller().rows().collect();
        assert_eq!(rows, vec!["Buy eggs"]);
        assert_eq!(app.selected(), Some(0));
    }

    #[test]
    fn quit_keys_inside_form_are_typed_not_handled() {
        let conn = open_db_in_memory().unwrap();
        let mut controller = ListController::new(SqliteNoteStore::new(&conn));
        controller.mount().unwrap();
        let mut app = App::new(controller);

        app.handle_key(press(KeyCode::Char('+')));
        assert_eq!(app.handle_key(press(KeyCode::Char('q'))), AppAction::Continue);
        app.handle_key(press(KeyCode::Char('x')));
        app.handle_key(press(KeyCode::Backspace));
        app.handle_key(press(KeyCode::Enter));

        let rows: Vec<&str> = app.controller().rows().collect();
        assert_eq!(rows, vec!["q"]);
    }

    #[test]
    fn escape_cancels_form_without_inserting() {
        let conn = open_db_in_memory().unwrap();
        let mut controller = ListController::new(SqliteNoteStore::new(&conn));
        controller.mount().unwrap();
        let mut app = App::new(controller);

        app.handle_key(press(KeyCode::Char('a')));
        type_text(&mut app, "never saved");
        assert_eq!(app.handle_key(press(KeyCode::Esc)), AppAction::Continue);

        assert_eq!(app.screen(), &Screen::List);
        assert!(app.controller().notes().is_empty());
        assert_eq!(app.handle_key(press(KeyCode::Esc)), AppAction::Quit);
    }

    #[test]
    fn failed_insert_keeps_list_running() {
        let conn = open_db_in_memory().unwrap();
        let mut controller = ListController::new(SqliteNoteStore::new(&conn));
        controller.mount().unwrap();
        let mut app = App::new(controller);
        app.handle_key(press(KeyCode::Char('a')));
        type_text(&mut app, "kept");
        app.handle_key(press(KeyCode::Enter));

        conn.execute_batch("DROP TABLE notes;").unwrap();
        app.handle_key(press(KeyCode::Char('a')));
        type_text(&mut app, "lost");
        assert_eq!(app.handle_key(press(KeyCode::Enter)), AppAction::Continue);

        assert_eq!(app.screen(), &Screen::List);
        let rows: Vec<&str> = app.controller().rows().collect();
        assert_eq!(rows, vec!["kept"]);
    }

    #[test]
    fn submission_is_stored_when_first_refresh_failed() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteNoteStore::new(&conn);
        store.ensure_schema().unwrap();
        conn.execute_batch("INSERT INTO notes (done, title) VALUES (2, 'odd');")
            .unwrap();
        let mut controller = ListController::new(store);
        controller.mount().unwrap();
        assert!(!controller.is_ready());
        let mut app = App::new(controller);

        app.handle_key(press(KeyCode::Char('a')));
        type_text(&mut app, "new");
        app.handle_key(press(KeyCode::Enter));

        assert_eq!(app.screen(), &Screen::List);
        let stored: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM notes WHERE title = 'new';",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(stored, 1);
    }

    #[test]
    fn selection_stays_within_list_bounds() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteNoteStore::new(&conn);
        store.ensure_schema().unwrap();
        store.insert("one").unwrap();
        store.insert("two").unwrap();
        let mut controller = ListController::new(store);
        controller.mount().unwrap();
        let mut app = App::new(controller);

        app.handle_key(press(KeyCode::Up));
        assert_eq!(app.selected(), Some(0));
        app.handle_key(press(KeyCode::Down));
        app.handle_key(press(KeyCode::Char('j')));
        assert_eq!(app.selected(), Some(1));
    }

    #[test]
    fn ctrl_c_quits_from_any_screen() {
        let conn = open_db_in_memory().unwrap();
        let mut controller = ListController::new(SqliteNoteStore::new(&conn));
        controller.mount().unwrap();
        let mut app = App::new(controller);

        app.handle_key(press(KeyCode::Char('a')));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(ctrl_c), AppAction::Quit);
    }

    #[test]
    fn empty_list_has_no_selection() {
        let conn = open_db_in_memory().unwrap();
        let mut controller = ListController::new(SqliteNoteStore::new(&conn));
        controller.mount().unwrap();
        let mut app = App::new(controller);

        app.handle_key(press(KeyCode::Down));
        assert_eq!(app.selected(), None);
    }
}
