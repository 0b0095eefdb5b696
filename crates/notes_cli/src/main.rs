//! Terminal entry point for the Notes to-do app.
//!
//! # Responsibility
//! - Resolve configuration, start logging, open the notes database.
//! - Mount the list controller and drive the draw/key event loop.
//! - Restore the terminal on every exit path.

mod app;
mod ui;

use app::{App, AppAction};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use notes_core::db::open_db;
use notes_core::{init_logging, AppConfig, ListController, NoteStore, SqliteNoteStore};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    init_logging(&config.log)?;
    info!(
        "event=app_config module=cli status=ok db_path={}",
        config.db_path.display()
    );

    let conn = open_db(&config.db_path)?;
    let mut controller = ListController::new(SqliteNoteStore::new(&conn));
    controller.mount()?;
    let mut app = App::new(controller);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        error!("event=event_loop module=cli status=error error={err}");
    }
    result.map_err(Into::into)
}

fn run_app<B: Backend, S: NoteStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(key) == AppAction::Quit {
                return Ok(());
            }
        }
    }
}
