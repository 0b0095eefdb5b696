use crate::app::{App, Screen};
use notes_core::{core_version, AddForm, NoteStore};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

const HEADER_HINT: &str = " [a] new note  [q] quit ";
const FORM_HINT: &str = " [Enter] submit  [Esc] cancel ";

pub fn draw<S: NoteStore>(f: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3), Constraint::Min(1)])
        .split(f.area());

    draw_header(f, chunks[0]);
    draw_notes(f, app, chunks[1]);

    if let Screen::Add(form) = app.screen() {
        draw_add_form(f, form);
    }
}

fn draw_header(f: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled("Notes App", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("  v{}", core_version())),
    ]);
    let header = Paragraph::new(title).block(
        Block::default()
            .borders(Borders::ALL)
            .title_top(Line::from(HEADER_HINT).right_aligned())
            .border_style(Style::default().fg(Color::Magenta)),
    );
    f.render_widget(header, area);
}

fn draw_notes<S: NoteStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let items: Vec<ListItem> = app
        .controller()
        .rows()
        .map(|title| ListItem::new(Line::from(title.to_string())))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(app.selected());
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_add_form(f: &mut Frame, form: &AddForm) {
    let area = centered_rect(60, 5, f.area());
    f.render_widget(Clear, area);

    let input = Paragraph::new(Line::from(vec![
        Span::raw(form.text().to_string()),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ]))
    .block(
        Block::default()
            .title("Add your todo")
            .title_bottom(FORM_HINT)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(input, area);
}

/// Rect of `percent_x` width and `height` rows centered inside `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::{centered_rect, draw};
    use crate::app::App;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use notes_core::db::open_db_in_memory;
    use notes_core::{ListController, NoteStore, SqliteNoteStore};
    use ratatui::{backend::TestBackend, layout::Rect, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn list_screen_shows_titles_only() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteNoteStore::new(&conn);
        store.ensure_schema().unwrap();
        store.insert("Walk the cat").unwrap();
        let mut controller = ListController::new(store);
        controller.mount().unwrap();
        let app = App::new(controller);

        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Notes App"));
        assert!(text.contains("Walk the cat"));
        assert!(!text.contains("Add your todo"));
    }

    #[test]
    fn add_screen_overlays_form_with_typed_text() {
        let conn = open_db_in_memory().unwrap();
        let mut controller = ListController::new(SqliteNoteStore::new(&conn));
        controller.mount().unwrap();
        let mut app = App::new(controller);
        app.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Char('i'), KeyModifiers::NONE));

        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Add your todo"));
        assert!(text.contains("hi_"));
    }

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 20);
        let rect = centered_rect(60, 5, area);
        assert_eq!(rect.height, 5);
        assert_eq!(rect.width, 60);
        assert!(rect.x >= area.x && rect.right() <= area.right());
        assert!(rect.y >= area.y && rect.bottom() <= area.bottom());
    }
}
