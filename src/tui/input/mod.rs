mod auth;
mod confirm;
mod form;
mod navigate;
mod overlay;
mod prompt;
mod search;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode, Screen};

use auth::handle_auth;
use confirm::handle_confirm;
use form::handle_form;
use navigate::handle_navigate;
use overlay::handle_json_overlay;
use prompt::handle_import_prompt;
use search::handle_search;

pub use overlay::handle_mouse;

/// Handle a key event on the current screen and mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    let key = normalize_key(key);
    if app.screen == Screen::Auth {
        handle_auth(app, key);
        return;
    }
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Search => handle_search(app, key),
        Mode::Form => handle_form(app, key),
        Mode::Confirm => handle_confirm(app, key),
        Mode::ImportPrompt => handle_import_prompt(app, key),
        Mode::JsonOverlay => handle_json_overlay(app, key),
    }
}

/// Handle a bracketed paste: inserted into whichever text field has focus.
/// Newlines are flattened since every field is single-line.
pub fn handle_paste(app: &mut App, text: &str) {
    if text.is_empty() {
        return;
    }
    let clean = text.replace(['\n', '\r'], " ");
    if app.screen == Screen::Auth {
        app.auth.focused_input().insert_str(&clean);
        return;
    }
    match app.mode {
        Mode::Search => {
            app.search_input.insert_str(&clean);
            app.on_search_changed(std::time::Instant::now());
        }
        Mode::Form => app.task_form.focused_input().insert_str(&clean),
        Mode::ImportPrompt => app.import_input.insert_str(&clean),
        _ => {}
    }
}

/// Shift+letter arrives with the SHIFT modifier and sometimes a lowercase
/// char; fold it to the uppercase char so bindings can match on `'J'` alone.
fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
        key.modifiers.remove(KeyModifiers::SHIFT);
    }
    key
}

#[cfg(test)]
pub(crate) mod test_keys {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub fn ch(c: char) -> KeyEvent {
        key(KeyCode::Char(c))
    }

    pub fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    pub fn type_str(app: &mut crate::tui::app::App, s: &str) {
        for c in s.chars() {
            super::handle_key(app, ch(c));
        }
    }
}
