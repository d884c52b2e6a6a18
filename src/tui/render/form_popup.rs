use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, FORM_LABELS};

use super::helpers::{centered_rect, input_spans};

/// Render the new-task form popup
pub fn render_form_popup(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let bright_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let cursor_style = Style::default().fg(app.theme.highlight).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let form = &app.task_form;

    let mut lines: Vec<Line> = vec![Line::from("")];
    for (i, (label, input)) in FORM_LABELS.iter().zip(form.fields.iter()).enumerate() {
        let focused = i == form.focus;
        let label_style = if focused {
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            text_style
        };
        let mut spans = vec![Span::styled(format!("  {:<13}", label), label_style)];
        spans.extend(input_spans(input, bright_style, cursor_style, focused, None));
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(Span::styled("  Due date is YYYY-MM-DD or blank", dim_style)));
    lines.push(Line::from(""));
    match &form.error {
        Some(error) => lines.push(Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(app.theme.red).bg(bg),
        ))),
        None => lines.push(Line::from("")),
    }

    let popup = centered_rect(64, lines.len() as u16 + 2, area);
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .title(Span::styled(
            " New task ",
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
