use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;

use crate::model::TaskStatus;
use crate::tui::text_input::TextInput;
use crate::util::unicode;

/// Checkbox symbol for a task status
pub(super) fn status_symbol(status: &TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "[ ]",
        TaskStatus::Done => "[x]",
        TaskStatus::Other(_) => "[?]",
    }
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Pad `spans` with `style` out to `width` cells
pub(super) fn pad_to_width(spans: &mut Vec<Span<'_>>, width: usize, style: Style) {
    let used = spans_width(spans);
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), style));
    }
}

/// A `width` x `height` rect centered in `area`, shrunk to fit
pub(super) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

/// Spans for a text field, with a `▌` cursor when focused. `mask` replaces
/// every character (password fields).
pub(super) fn input_spans<'a>(
    input: &'a TextInput,
    style: Style,
    cursor_style: Style,
    focused: bool,
    mask: Option<char>,
) -> Vec<Span<'a>> {
    let (before, after) = input.split_at_cursor();
    let shown = |s: &'a str| -> Span<'a> {
        match mask {
            Some(m) => Span::styled(m.to_string().repeat(s.chars().count()), style),
            None => Span::styled(s, style),
        }
    };
    if focused {
        vec![shown(before), Span::styled("\u{258C}", cursor_style), shown(after)]
    } else {
        vec![shown(before), shown(after)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_area() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(40, 10, area), Rect::new(20, 7, 40, 10));
        assert_eq!(centered_rect(100, 30, area), area);
    }

    #[test]
    fn masked_input_hides_text() {
        let input = TextInput::with_text("secret");
        let spans = input_spans(&input, Style::default(), Style::default(), true, Some('*'));
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "******\u{258C}");
    }

    #[test]
    fn pad_fills_to_width() {
        let mut spans = vec![Span::raw("abc")];
        pad_to_width(&mut spans, 6, Style::default());
        assert_eq!(spans_width(&spans), 6);
    }
}
