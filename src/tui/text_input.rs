use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::unicode;

/// A single-line editable buffer with a grapheme-aware cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    buffer: String,
    /// Byte offset into `buffer`, always on a grapheme boundary
    cursor: usize,
}

impl TextInput {
    pub fn with_text(text: &str) -> Self {
        TextInput {
            buffer: text.to_string(),
            cursor: text.len(),
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Display column of the cursor
    pub fn cursor_col(&self) -> usize {
        unicode::byte_offset_to_display_col(&self.buffer, self.cursor)
    }

    /// Text before and after the cursor, for drawing an inline cursor
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.buffer.split_at(self.cursor)
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn insert_str(&mut self, text: &str) {
        let clean: String = text.chars().filter(|c| !c.is_control()).collect();
        self.buffer.insert_str(self.cursor, &clean);
        self.cursor += clean.len();
    }

    /// Apply an editing key. Returns true when the text changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match (key.modifiers, key.code) {
            (m, KeyCode::Char(c)) if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.buffer.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                true
            }
            (_, KeyCode::Backspace) => match unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
                Some(prev) => {
                    self.buffer.replace_range(prev..self.cursor, "");
                    self.cursor = prev;
                    true
                }
                None => false,
            },
            (_, KeyCode::Delete) => match unicode::next_grapheme_boundary(&self.buffer, self.cursor) {
                Some(next) => {
                    self.buffer.replace_range(self.cursor..next, "");
                    true
                }
                None => false,
            },
            (KeyModifiers::CONTROL, KeyCode::Char('w')) => {
                let start = unicode::word_boundary_left(&self.buffer, self.cursor);
                let changed = start < self.cursor;
                self.buffer.replace_range(start..self.cursor, "");
                self.cursor = start;
                changed
            }
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                let changed = self.cursor > 0;
                self.buffer.replace_range(..self.cursor, "");
                self.cursor = 0;
                changed
            }
            (_, KeyCode::Left) => {
                if let Some(prev) = unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
                    self.cursor = prev;
                }
                false
            }
            (_, KeyCode::Right) => {
                if let Some(next) = unicode::next_grapheme_boundary(&self.buffer, self.cursor) {
                    self.cursor = next;
                }
                false
            }
            (_, KeyCode::Home) | (KeyModifiers::CONTROL, KeyCode::Char('a')) => {
                self.cursor = 0;
                false
            }
            (_, KeyCode::End) | (KeyModifiers::CONTROL, KeyCode::Char('e')) => {
                self.cursor = self.buffer.len();
                false
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn typed(text: &str) -> TextInput {
        let mut input = TextInput::default();
        for c in text.chars() {
            input.handle_key(key(KeyCode::Char(c)));
        }
        input
    }

    #[test]
    fn typing_and_backspace() {
        let mut input = typed("milk");
        assert_eq!(input.text(), "milk");
        assert!(input.handle_key(key(KeyCode::Backspace)));
        assert_eq!(input.text(), "mil");
        assert_eq!(input.cursor_col(), 3);
    }

    #[test]
    fn backspace_at_start_is_no_change() {
        let mut input = TextInput::default();
        assert!(!input.handle_key(key(KeyCode::Backspace)));
    }

    #[test]
    fn cursor_movement_and_mid_insert() {
        let mut input = typed("ac");
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Char('b')));
        assert_eq!(input.text(), "abc");
        input.handle_key(key(KeyCode::Home));
        assert!(input.handle_key(key(KeyCode::Delete)));
        assert_eq!(input.text(), "bc");
        input.handle_key(key(KeyCode::End));
        assert_eq!(input.cursor_col(), 2);
    }

    #[test]
    fn backspace_removes_whole_grapheme() {
        let mut input = TextInput::with_text("cafe\u{301}");
        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.text(), "caf");
    }

    #[test]
    fn ctrl_w_and_ctrl_u() {
        let mut input = typed("buy some milk");
        assert!(input.handle_key(ctrl('w')));
        assert_eq!(input.text(), "buy some ");
        assert!(input.handle_key(ctrl('u')));
        assert_eq!(input.text(), "");
    }

    #[test]
    fn control_chars_are_not_inserted() {
        let mut input = TextInput::default();
        assert!(!input.handle_key(ctrl('x')));
        input.insert_str("a\nb\tc");
        assert_eq!(input.text(), "abc");
    }
}
