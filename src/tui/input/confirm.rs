use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => app.resolve_confirm(true),
        KeyCode::Char('n' | 'N') | KeyCode::Esc => app.resolve_confirm(false),
        _ => {}
    }
}
