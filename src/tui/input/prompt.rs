use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

/// Single-line path prompt for `i`mport
pub(super) fn handle_import_prompt(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.import_input.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => {
            if app.import_input.text().trim().is_empty() {
                app.mode = Mode::Navigate;
            } else {
                app.submit_import();
            }
        }
        _ => {
            app.import_input.handle_key(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::tui::app::Mode;
    use crate::tui::input::handle_key;
    use crate::tui::input::test_keys::*;
    use crate::tui::render::test_helpers::{logged_in_app, with_snapshot};
    use crate::tui::worker::Job;
    use crossterm::event::KeyCode;

    #[test]
    fn enter_on_blank_path_just_closes() {
        let (_dir, mut app) = logged_in_app();
        with_snapshot(&mut app, vec![]);
        handle_key(&mut app, ch('i'));
        assert_eq!(app.mode, Mode::ImportPrompt);
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.status.is_none());
    }

    #[test]
    fn missing_file_reports_error() {
        let (dir, mut app) = logged_in_app();
        with_snapshot(&mut app, vec![]);
        handle_key(&mut app, ch('i'));
        type_str(&mut app, &dir.path().join("nope.json").to_string_lossy());
        handle_key(&mut app, key(KeyCode::Enter));
        assert!(app.status.as_ref().is_some_and(|s| s.is_error));
        assert!(!app.outbox.iter().any(|j| matches!(j, Job::Import(_))));
    }
}
