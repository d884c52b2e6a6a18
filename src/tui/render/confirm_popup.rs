use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, ConfirmAction};
use crate::util::unicode;

use super::helpers::centered_rect;

/// Render the yes/no confirmation popup
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(confirm) = &app.confirm else {
        return;
    };
    let bg = app.theme.background;
    let popup_w: u16 = 54;
    let inner_w = popup_w.saturating_sub(4) as usize;

    let subject = match &confirm.action {
        ConfirmAction::DeleteTask { title, .. } => unicode::truncate_to_width(title, inner_w),
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", confirm.message),
            Style::default().fg(app.theme.text).bg(bg),
        )),
        Line::from(Span::styled(
            format!(" {}", subject),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " y yes   n no",
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ];

    let popup = centered_rect(popup_w, lines.len() as u16 + 2, area);
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.red).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
