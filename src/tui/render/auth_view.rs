use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, AuthField};

use super::helpers::{centered_rect, input_spans};

const LABEL_WIDTH: usize = 11;

/// Render the login/register form, centered
pub fn render_auth_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let bright_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let cursor_style = Style::default().fg(app.theme.highlight).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let form = &app.auth;

    let field = |label: &str, focus: AuthField, mask: Option<char>| {
        let focused = form.focus == focus;
        let label_style = if focused {
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            text_style
        };
        let input = match focus {
            AuthField::Username => &form.username,
            AuthField::Password => &form.password,
        };
        let mut spans = vec![Span::styled(format!("  {:<w$}", label, w = LABEL_WIDTH), label_style)];
        spans.extend(input_spans(input, bright_style, cursor_style, focused, mask));
        Line::from(spans)
    };

    let mut lines = vec![
        Line::from(""),
        field("Username", AuthField::Username, None),
        Line::from(""),
        field("Password", AuthField::Password, Some('*')),
        Line::from(""),
    ];
    if form.pending {
        lines.push(Line::from(Span::styled("  Signing in...", dim_style)));
    } else if let Some(message) = &form.message {
        lines.push(Line::from(Span::styled(
            format!("  {}", message),
            Style::default().fg(app.theme.red).bg(bg),
        )));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Enter log in  Ctrl-R register  Tab switch  Esc quit",
        dim_style,
    )));

    let popup = centered_rect(60, lines.len() as u16 + 2, area);
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .title(Span::styled(
            " taskdeck ",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.selection_border).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

#[cfg(test)]
mod tests {
    use crate::tui::app::AuthField;
    use crate::tui::render::test_helpers::*;
    use crate::tui::text_input::TextInput;

    #[test]
    fn password_is_masked() {
        let (_dir, mut app) = logged_out_app();
        app.auth.username = TextInput::with_text("ada");
        app.auth.password = TextInput::with_text("hunter2");
        app.auth.focus = AuthField::Password;
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("Username   ada"));
        assert!(out.contains("*******\u{258C}"));
        assert!(!out.contains("hunter2"));
    }

    #[test]
    fn error_message_is_shown() {
        let (_dir, mut app) = logged_out_app();
        app.auth.message = Some("Invalid username or password".into());
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("Invalid username or password"));
    }

    #[test]
    fn pending_replaces_message() {
        let (_dir, mut app) = logged_out_app();
        app.auth.message = Some("old error".into());
        app.auth.pending = true;
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("Signing in..."));
        assert!(!out.contains("old error"));
    }
}
