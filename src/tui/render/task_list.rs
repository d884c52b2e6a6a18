use chrono::NaiveDate;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use regex::Regex;

use crate::model::Task;
use crate::tui::app::App;
use crate::tui::theme::Theme;

use super::helpers::{pad_to_width, status_symbol};
use super::push_highlighted_spans;

/// Lines for one task row: the title line, plus a description line when the
/// task has one. A pure function of its inputs.
pub fn task_lines(
    task: &Task,
    theme: &Theme,
    width: usize,
    selected: bool,
    today: NaiveDate,
    search_re: Option<&Regex>,
) -> Vec<Line<'static>> {
    let bg = if selected {
        theme.selection_bg
    } else {
        theme.background
    };
    let base = Style::default().bg(bg);
    let match_style = Style::default()
        .fg(theme.search_match_fg)
        .bg(theme.search_match_bg);
    let done = task.status.is_done();

    let mut spans: Vec<Span<'static>> = Vec::new();
    spans.push(if selected {
        Span::styled("\u{258E}", base.fg(theme.selection_border))
    } else {
        Span::styled(" ", base)
    });
    spans.push(Span::styled(
        status_symbol(&task.status),
        base.fg(theme.status_color(&task.status)),
    ));
    spans.push(Span::styled(" ", base));

    let title_style = if done {
        base.fg(theme.dim).add_modifier(Modifier::CROSSED_OUT)
    } else {
        base.fg(theme.text_bright)
    };
    push_highlighted_spans(&mut spans, &task.title, title_style, match_style, search_re);

    if !task.category.is_empty() {
        spans.push(Span::styled(format!("  {}", task.category), base.fg(theme.cyan)));
    }
    if let Some(due) = task.due_label() {
        let overdue = !done && task.due().is_some_and(|d| d < today);
        let color = if overdue { theme.red } else { theme.yellow };
        spans.push(Span::styled(format!("  due {}", due), base.fg(color)));
    }
    if let crate::model::TaskStatus::Other(status) = &task.status {
        spans.push(Span::styled(format!("  ({})", status), base.fg(theme.dim)));
    }
    pad_to_width(&mut spans, width, base);

    let mut lines = vec![Line::from(spans)];

    if let Some(desc) = task.description_text() {
        let first = desc.lines().next().unwrap_or_default();
        let mut desc_spans = vec![Span::styled("     ", base)];
        push_highlighted_spans(&mut desc_spans, first, base.fg(theme.dim), match_style, search_re);
        pad_to_width(&mut desc_spans, width, base);
        lines.push(Line::from(desc_spans));
    }
    lines
}

/// Render the task list, scrolling so the cursor row stays visible
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let tasks = app.client.todos();

    if tasks.is_empty() {
        let filtered = !app.client.filter.search.trim().is_empty() || app.client.filter.status.is_some();
        let text = if filtered {
            " No tasks match the current filters"
        } else {
            " No tasks yet. Press a to add one."
        };
        let empty = Paragraph::new(text).style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let width = area.width as usize;
    let visible_height = area.height as usize;
    let cursor = app.cursor.min(tasks.len() - 1);
    let today = chrono::Local::now().date_naive();
    let search_re = app.active_search_re();

    let rows: Vec<Vec<Line>> = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| task_lines(task, &app.theme, width, i == cursor, today, search_re.as_ref()))
        .collect();

    // Keep the cursor row within the window
    let mut scroll = app.scroll_offset.min(cursor);
    while scroll < cursor && rows[scroll..=cursor].iter().map(Vec::len).sum::<usize>() > visible_height {
        scroll += 1;
    }
    app.cursor = cursor;
    app.scroll_offset = scroll;

    let lines: Vec<Line> = rows
        .into_iter()
        .skip(scroll)
        .flatten()
        .take(visible_height)
        .collect();
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}
