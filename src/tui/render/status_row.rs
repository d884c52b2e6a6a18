use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

use super::helpers::{input_spans, pad_to_width, spans_width};

const NAVIGATE_HINT: &str =
    "a add  space toggle  d delete  / search  s status  i import  e export  J json  L logout  q quit";

/// Key hint for the current mode
fn mode_hint(mode: Mode) -> &'static str {
    match mode {
        Mode::Navigate => NAVIGATE_HINT,
        Mode::Search => "Enter search  Esc clear",
        Mode::Form => "Tab next field  Enter create  Esc close",
        Mode::Confirm => "y delete  n cancel",
        Mode::ImportPrompt => "Enter import  Esc cancel",
        Mode::JsonOverlay => "c copy  j/k scroll  Esc close",
    }
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let cursor_style = Style::default().fg(app.theme.highlight).bg(bg);

    let mut spans: Vec<Span> = match app.mode {
        Mode::Search => {
            let mut spans = vec![Span::styled("/", text_style)];
            spans.extend(input_spans(&app.search_input, text_style, cursor_style, true, None));
            spans
        }
        Mode::ImportPrompt => {
            let mut spans = vec![Span::styled(
                "Import JSON file: ",
                Style::default().fg(app.theme.dim).bg(bg),
            )];
            spans.extend(input_spans(&app.import_input, text_style, cursor_style, true, None));
            spans
        }
        _ => match &app.status {
            Some(status) => {
                let color = if status.is_error {
                    app.theme.red
                } else {
                    app.theme.green
                };
                vec![Span::styled(format!(" {}", status.text), Style::default().fg(color).bg(bg))]
            }
            None => Vec::new(),
        },
    };

    // Right-aligned hint when it fits
    let hint = mode_hint(app.mode);
    let content_width = spans_width(&spans);
    let hint_width = hint.chars().count() + 1;
    if content_width + hint_width < width {
        pad_to_width(&mut spans, width - hint_width, Style::default().bg(bg));
        spans.push(Span::styled(format!("{} ", hint), Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    fn status_line(app: &App, width: u16) -> String {
        render_to_string(width, 1, |frame, area| render_status_row(frame, app, area))
    }

    #[test]
    fn navigate_shows_hint() {
        let (_dir, mut app) = logged_in_app();
        with_snapshot(&mut app, vec![]);
        assert!(status_line(&app, 120).ends_with("q quit"));
    }

    #[test]
    fn search_prompt_shows_cursor() {
        let (_dir, mut app) = logged_in_app();
        app.mode = Mode::Search;
        app.search_input.insert_str("milk");
        assert!(status_line(&app, TERM_W).starts_with("/milk\u{258C}"));
    }

    #[test]
    fn message_replaces_blank_left_side() {
        let (_dir, mut app) = logged_in_app();
        app.set_error("Failed to load tasks: down");
        let line = status_line(&app, 40);
        // Hint does not fit, message wins
        assert_eq!(line, " Failed to load tasks: down");
    }
}
