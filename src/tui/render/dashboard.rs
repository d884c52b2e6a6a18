use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::DashboardSummary;
use crate::tui::app::App;
use crate::tui::theme::Theme;

use super::helpers::pad_to_width;

/// Title on the left, active filters on the right
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let mut spans = vec![Span::styled(
        " taskdeck",
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(session) = app.client.session() {
        spans.push(Span::styled(
            format!("  {}", session.username),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let filter = &app.client.filter;
    let mut right = format!("status: {}", filter.status_label());
    if !filter.search.trim().is_empty() {
        right.push_str(&format!("  search: {}", filter.search.trim()));
    }
    right.push(' ');

    let width = area.width as usize;
    let left_width = super::helpers::spans_width(&spans);
    let right_width = crate::util::unicode::display_width(&right);
    if left_width + right_width < width {
        pad_to_width(&mut spans, width - right_width, Style::default().bg(bg));
        spans.push(Span::styled(right, Style::default().fg(app.theme.dim).bg(bg)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)), area);
}

/// The four dashboard counters with their colors
pub fn stat_cells(summary: &DashboardSummary, theme: &Theme) -> [(&'static str, u64, Color); 4] {
    let overdue_color = if summary.overdue_tasks > 0 {
        theme.red
    } else {
        theme.dim
    };
    [
        ("Total", summary.total_tasks, theme.text_bright),
        ("To Do", summary.todo_tasks, theme.yellow),
        ("Done", summary.done_tasks, theme.green),
        ("Overdue", summary.overdue_tasks, overdue_color),
    ]
}

pub fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let cells = stat_cells(&app.client.dashboard(), &app.theme);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((label, value, color), column) in cells.into_iter().zip(columns.iter()) {
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", label),
                Style::default().fg(app.theme.dim).bg(bg),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.dim).bg(bg))
            .style(Style::default().bg(bg));
        let count = Paragraph::new(Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(color).bg(bg).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(count, *column);
    }
}
