use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Terminal cells occupied by `s`
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Clip `s` to at most `max_cells` cells, ending in `…` when clipped.
/// Never splits a grapheme cluster.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    let budget = max_cells - 1;
    let mut used = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let w = display_width(g);
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// Byte offset of the grapheme after the one at `offset`, or None at the end
pub fn next_grapheme_boundary(s: &str, offset: usize) -> Option<usize> {
    let rest = s.get(offset..).filter(|r| !r.is_empty())?;
    let len = rest.graphemes(true).next().map_or(rest.len(), str::len);
    Some(offset + len)
}

/// Byte offset of the grapheme before `offset`, or None at the start
pub fn prev_grapheme_boundary(s: &str, offset: usize) -> Option<usize> {
    let head = s.get(..offset).filter(|h| !h.is_empty())?;
    head.grapheme_indices(true).last().map(|(i, _)| i)
}

/// Display column of the byte `offset`
pub fn byte_offset_to_display_col(s: &str, offset: usize) -> usize {
    display_width(&s[..offset.min(s.len())])
}

/// Start of the whitespace-delimited word left of `offset`
pub fn word_boundary_left(s: &str, offset: usize) -> usize {
    let head = &s[..offset.min(s.len())];
    let trimmed = head.trim_end();
    trimmed
        .rfind(char::is_whitespace)
        .map_or(0, |i| i + trimmed[i..].chars().next().map_or(1, char::len_utf8))
}
