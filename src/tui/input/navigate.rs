use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

/// Page size for PageUp/PageDown in the task list
const PAGE: isize = 10;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    app.status = None;
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => app.should_quit = true,

        // Cursor
        (_, KeyCode::Char('j') | KeyCode::Down) => app.move_cursor(1),
        (_, KeyCode::Char('k') | KeyCode::Up) => app.move_cursor(-1),
        (_, KeyCode::PageDown) => app.move_cursor(PAGE),
        (_, KeyCode::PageUp) => app.move_cursor(-PAGE),
        (_, KeyCode::Char('g') | KeyCode::Home) => app.cursor = 0,
        (_, KeyCode::Char('G') | KeyCode::End) => app.move_cursor(isize::MAX),

        // Filters
        (_, KeyCode::Char('/')) => app.mode = Mode::Search,
        (_, KeyCode::Char('s')) => app.cycle_status_filter(),
        (_, KeyCode::Char('r')) | (KeyModifiers::CONTROL, KeyCode::Char('l')) => app.request_reload(),

        // Task actions
        (_, KeyCode::Char('a')) => app.open_task_form(),
        (_, KeyCode::Char(' ') | KeyCode::Enter) => app.toggle_selected(),
        (_, KeyCode::Char('d') | KeyCode::Delete) => app.request_delete(),

        // Bulk
        (_, KeyCode::Char('i')) => app.open_import_prompt(),
        (_, KeyCode::Char('e')) => app.export(chrono::Utc::now().date_naive()),
        (_, KeyCode::Char('J')) => app.open_json_overlay(),

        (_, KeyCode::Char('L')) => app.logout(),
        _ => {}
    }
}
