use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.mode = Mode::Navigate,
        KeyCode::Tab | KeyCode::Down => app.task_form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.task_form.focus_prev(),
        KeyCode::Enter => app.submit_task_form(),
        _ => {
            if app.task_form.focused_input().handle_key(key) {
                app.task_form.error = None;
            }
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
    fn fill_and_submit() {
        let (_dir, mut app) = logged_in_app();
        with_snapshot(&mut app, vec![]);
        handle_key(&mut app, ch('a'));
        type_str(&mut app, "Call mom");
        handle_key(&mut app, key(KeyCode::Tab));
        type_str(&mut app, "Sunday");
        handle_key(&mut app, key(KeyCode::Tab));
        // Replace the prefilled category
        handle_key(&mut app, ctrl('u'));
        type_str(&mut app, "Family");
        handle_key(&mut app, key(KeyCode::Tab));
        type_str(&mut app, "2025-05-11");
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.mode, Mode::Navigate);
        match app.outbox.as_slice() {
            [Job::Create(task)] => {
                assert_eq!(task.title, "Call mom");
                assert_eq!(task.description, "Sunday");
                assert_eq!(task.category, "Family");
                assert_eq!(task.due_date.as_deref(), Some("2025-05-11"));
            }
            other => panic!("expected create, got {:?}", other),
        }
    }

    #[test]
    fn bad_due_date_keeps_form_open() {
        let (_dir, mut app) = logged_in_app();
        with_snapshot(&mut app, vec![]);
        handle_key(&mut app, ch('a'));
        type_str(&mut app, "x");
        handle_key(&mut app, key(KeyCode::BackTab));
        type_str(&mut app, "soon");
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Form);
        assert!(app.task_form.error.as_deref().is_some_and(|e| e.contains("soon")));

        // Editing clears the error
        handle_key(&mut app, key(KeyCode::Backspace));
        assert!(app.task_form.error.is_none());
    }

    #[test]
    fn esc_keeps_draft() {
        let (_dir, mut app) = logged_in_app();
        with_snapshot(&mut app, vec![]);
        handle_key(&mut app, ch('a'));
        type_str(&mut app, "draft");
        handle_key(&mut app, key(KeyCode::Esc));
        handle_key(&mut app, ch('a'));
        assert_eq!(app.task_form.fields[0].text(), "draft");
    }
}
