use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::AuthAction;
use crate::tui::app::App;

/// Login/register form: Tab switches field, Enter logs in, Ctrl-R registers
pub(super) fn handle_auth(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => app.should_quit = true,
        (_, KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down) => app.auth.toggle_focus(),
        (_, KeyCode::Enter) => app.submit_auth(AuthAction::Login),
        (KeyModifiers::CONTROL, KeyCode::Char('r')) => app.submit_auth(AuthAction::Register),
        _ => {
            if app.auth.focused_input().handle_key(key) {
                app.auth.message = None;
            }
        }
    }
}
