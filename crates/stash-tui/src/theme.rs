//! Terminal color theme system
//!
//! Adaptive palettes for dark and light terminal backgrounds,
//! auto-detected via COLORFGBG or overridden with --light. All widget
//! code goes through the theme instead of hardcoding Color:: values.

use ratatui::style::{Color, Modifier, Style};

use stash_core::CellStyle;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Primary foreground text
    pub text: Color,
    /// Secondary text (stats, hints, footers)
    pub text_dim: Color,
    /// Default border color
    pub border: Color,
    /// Border of the active column or pane
    pub border_active: Color,
    /// Category header lines
    pub header: Color,
    /// Highlighted entry foreground (item navigation)
    pub cursor_fg: Color,
    /// Highlighted entry background (item navigation)
    pub cursor_bg: Color,
    /// Highlighted entry background in category navigation mode
    pub cursor_category_bg: Color,
    /// Entries with a nonzero chosen count
    pub selected: Color,
    /// Denied entries and their reasons
    pub denied: Color,
    /// Positive balance / under capacity
    pub good: Color,
    /// Negative balance / over capacity
    pub bad: Color,
}

impl Theme {
    /// Dark terminal background theme (default)
    pub fn dark() -> Self {
        Self {
            text: Color::White,
            text_dim: Color::DarkGray,
            border: Color::White,
            border_active: Color::Yellow,
            header: Color::Yellow,
            cursor_fg: Color::White,
            cursor_bg: Color::Red,
            cursor_category_bg: Color::DarkGray,
            selected: Color::Green,
            denied: Color::Red,
            good: Color::Green,
            bad: Color::Red,
        }
    }

    /// Light terminal background theme
    pub fn light() -> Self {
        Self {
            text: Color::Black,
            text_dim: Color::Gray,
            border: Color::Black,
            border_active: Color::Blue,
            header: Color::Blue,
            cursor_fg: Color::White,
            cursor_bg: Color::Red,
            cursor_category_bg: Color::Gray,
            selected: Color::Green,
            denied: Color::Red,
            good: Color::Green,
            bad: Color::Red,
        }
    }

    /// Pick a theme from the environment: NH-style COLORFGBG
    /// detection, where a light background is reported as 7 or 15.
    pub fn auto() -> Self {
        if let Ok(var) = std::env::var("COLORFGBG") {
            if let Some(bg) = var.rsplit(';').next() {
                if matches!(bg, "7" | "15") {
                    return Theme::light();
                }
            }
        }
        Theme::dark()
    }

    /// Map an engine cell style to concrete colors.
    pub fn style_for(&self, style: CellStyle) -> Style {
        match style {
            CellStyle::Normal => Style::default().fg(self.text),
            CellStyle::Header => Style::default()
                .fg(self.header)
                .add_modifier(Modifier::BOLD),
            CellStyle::Highlight => Style::default().fg(self.cursor_fg).bg(self.cursor_bg),
            CellStyle::HighlightCategory => Style::default()
                .fg(self.cursor_fg)
                .bg(self.cursor_category_bg),
            CellStyle::Selected => Style::default().fg(self.selected),
            CellStyle::Denied => Style::default().fg(self.denied),
            CellStyle::Dim => Style::default().fg(self.text_dim),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_styles_differ_between_navigation_modes() {
        let theme = Theme::dark();
        assert_ne!(
            theme.style_for(CellStyle::Highlight),
            theme.style_for(CellStyle::HighlightCategory)
        );
    }
}
