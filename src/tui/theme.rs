use ratatui::style::Color;

use crate::model::{TaskStatus, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub blue: Color,
    pub selection_bg: Color,
    pub selection_border: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x10, 0x14, 0x1C),
            text: Color::Rgb(0xC8, 0xCE, 0xDA),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x25, 0x63, 0xEB),
            dim: Color::Rgb(0x6B, 0x72, 0x80),
            red: Color::Rgb(0xEF, 0x44, 0x44),
            yellow: Color::Rgb(0xF5, 0x9E, 0x0B),
            green: Color::Rgb(0x22, 0xC5, 0x5E),
            cyan: Color::Rgb(0x06, 0xB6, 0xD4),
            blue: Color::Rgb(0x60, 0xA5, 0xFA),
            selection_bg: Color::Rgb(0x1E, 0x29, 0x3B),
            selection_border: Color::Rgb(0x25, 0x63, 0xEB),
            search_match_bg: Color::Rgb(0xF5, 0x9E, 0x0B),
            search_match_fg: Color::Rgb(0x10, 0x14, 0x1C),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

impl Theme {
    /// Create a theme from the `[ui.colors]` config table, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(key, value, "ignoring invalid theme color");
                continue;
            };
            let slot = match key.as_str() {
                "background" => &mut theme.background,
                "text" => &mut theme.text,
                "text_bright" => &mut theme.text_bright,
                "highlight" => &mut theme.highlight,
                "dim" => &mut theme.dim,
                "red" => &mut theme.red,
                "yellow" => &mut theme.yellow,
                "green" => &mut theme.green,
                "cyan" => &mut theme.cyan,
                "blue" => &mut theme.blue,
                "selection_bg" => &mut theme.selection_bg,
                "selection_border" => &mut theme.selection_border,
                "search_match_bg" => &mut theme.search_match_bg,
                "search_match_fg" => &mut theme.search_match_fg,
                _ => continue,
            };
            *slot = color;
        }
        theme
    }

    /// Status badge color: green when done, red otherwise
    pub fn status_color(&self, status: &TaskStatus) -> Color {
        if status.is_done() { self.green } else { self.red }
    }
}
