use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

/// Search box: every edit restarts the debounce, Enter sends it now,
/// Esc clears the term.
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            app.mode = Mode::Navigate;
            app.flush_search();
        }
        KeyCode::Esc => {
            app.mode = Mode::Navigate;
            if !app.search_input.is_empty() {
                app.search_input.clear();
                app.client.filter.search.clear();
                app.request_reload();
            }
        }
        _ => {
            if app.search_input.handle_key(key) {
                app.on_search_changed(Instant::now());
            }
        }
    }
}
