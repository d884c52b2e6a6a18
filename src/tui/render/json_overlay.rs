use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::tui::theme::Theme;

/// Color one line of pretty-printed JSON: object keys stand out from values
pub fn json_line(line: &str, theme: &Theme, bg: Color) -> Line<'static> {
    let text = Style::default().fg(theme.text).bg(bg);
    let trimmed = line.trim_start();
    let indent = &line[..line.len() - trimmed.len()];
    if trimmed.starts_with('"')
        && let Some(split) = trimmed.find("\": ")
    {
        let (key, value) = trimmed.split_at(split + 1);
        return Line::from(vec![
            Span::styled(indent.to_string(), text),
            Span::styled(key.to_string(), Style::default().fg(theme.cyan).bg(bg)),
            Span::styled(value.to_string(), text),
        ]);
    }
    Line::from(Span::styled(line.to_string(), text))
}

/// Render the JSON overlay (centered popup over the task list). Records the
/// popup area so clicks outside it can dismiss it.
pub fn render_json_overlay(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let bright = app.theme.text_bright;
    let dim = app.theme.dim;
    let theme = app.theme.clone();
    let Some(overlay) = &mut app.json_overlay else {
        return;
    };

    // Size: centered, taking most of the screen
    let margin_x = 4u16.min(area.width / 8);
    let margin_y = 2u16.min(area.height / 8);
    let popup_area = Rect::new(
        area.x + margin_x,
        area.y + margin_y,
        area.width.saturating_sub(margin_x * 2),
        area.height.saturating_sub(margin_y * 2),
    );
    overlay.area = Some(popup_area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(Span::styled(
            " Tasks JSON  (c copy, Esc close) ",
            Style::default()
                .fg(bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(dim).bg(bg))
        .style(Style::default().bg(bg));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let visible_height = inner.height as usize;
    let total_lines = overlay.line_count();
    let scroll = overlay
        .scroll
        .min(total_lines.saturating_sub(visible_height));
    overlay.scroll = scroll;

    let lines: Vec<Line> = overlay
        .text
        .lines()
        .skip(scroll)
        .take(visible_height)
        .map(|l| json_line(l, &theme, bg))
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, inner);

    // Scroll indicator
    if total_lines > visible_height {
        let indicator = format!(
            " {}/{} ",
            scroll + 1,
            total_lines.saturating_sub(visible_height) + 1
        );
        let indicator_style = Style::default()
            .fg(Color::Black)
            .bg(dim)
            .add_modifier(Modifier::BOLD);
        let indicator_width = indicator.len() as u16;
        let indicator_x = popup_area.x + popup_area.width.saturating_sub(indicator_width + 1);
        let indicator_y = popup_area.y + popup_area.height.saturating_sub(1);
        if indicator_x < popup_area.x + popup_area.width && indicator_y < area.y + area.height {
            let indicator_area = Rect::new(indicator_x, indicator_y, indicator_width, 1);
            let indicator_widget =
                Paragraph::new(Line::from(Span::styled(indicator, indicator_style)));
            frame.render_widget(indicator_widget, indicator_area);
        }
    }
}
