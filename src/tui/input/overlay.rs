use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::tui::app::{App, Mode};

pub(super) fn handle_json_overlay(app: &mut App, key: KeyEvent) {
    let Some(overlay) = &mut app.json_overlay else {
        app.mode = Mode::Navigate;
        return;
    };
    let last = overlay.line_count().saturating_sub(1);
    match key.code {
        KeyCode::Esc | KeyCode::Char('q' | 'J') => app.close_json_overlay(),
        KeyCode::Char('c' | 'y') => app.copy_json(),
        KeyCode::Char('j') | KeyCode::Down => overlay.scroll = (overlay.scroll + 1).min(last),
        KeyCode::Char('k') | KeyCode::Up => overlay.scroll = overlay.scroll.saturating_sub(1),
        KeyCode::Char('g') | KeyCode::Home => overlay.scroll = 0,
        KeyCode::Char('G') | KeyCode::End => overlay.scroll = last,
        KeyCode::PageDown => overlay.scroll = (overlay.scroll + 20).min(last),
        KeyCode::PageUp => overlay.scroll = overlay.scroll.saturating_sub(20),
        _ => {}
    }
}

/// Mouse input only matters for the JSON overlay: a click outside it
/// dismisses it and the wheel scrolls it.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.mode != Mode::JsonOverlay {
        return;
    }
    let Some(overlay) = &mut app.json_overlay else {
        return;
    };
    let last = overlay.line_count().saturating_sub(1);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let inside = overlay
                .area
                .is_some_and(|area| area.contains(Position::new(mouse.column, mouse.row)));
            if !inside {
                app.close_json_overlay();
            }
        }
        MouseEventKind::ScrollDown => overlay.scroll = (overlay.scroll + 3).min(last),
        MouseEventKind::ScrollUp => overlay.scroll = overlay.scroll.saturating_sub(3),
        _ => {}
    }
}
