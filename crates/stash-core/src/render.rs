//! Abstract render output
//!
//! Columns lay entries out into [`DisplayRow`]s of styled text. The
//! engine knows nothing about terminals; the TUI layer maps
//! [`CellStyle`] to concrete colors and paints the rows onto whatever
//! fixed-width character grid it owns.

use unicode_width::UnicodeWidthStr;

/// Semantic style of one rendered cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Normal,
    /// Category header line.
    Header,
    /// Highlighted entry in item navigation mode.
    Highlight,
    /// Highlighted entry in category navigation mode.
    HighlightCategory,
    /// Entry with a nonzero chosen count.
    Selected,
    /// Entry carrying a denial.
    Denied,
    /// Secondary text (stats, counts, hints).
    Dim,
}

/// One styled run of text within a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCell {
    pub text: String,
    pub style: CellStyle,
}

impl DisplayCell {
    pub fn new(text: impl Into<String>, style: CellStyle) -> Self {
        DisplayCell {
            text: text.into(),
            style,
        }
    }
}

/// One laid-out line of a column page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayRow {
    pub cells: Vec<DisplayCell>,
}

impl DisplayRow {
    pub fn new() -> Self {
        DisplayRow::default()
    }

    pub fn push(&mut self, cell: DisplayCell) {
        self.cells.push(cell);
    }

    /// Total display width of the row in terminal cells.
    pub fn width(&self) -> usize {
        self.cells.iter().map(|c| c.text.width()).sum()
    }

    /// Concatenated text, for tests and plain-text surfaces.
    pub fn plain_text(&self) -> String {
        self.cells.iter().map(|c| c.text.as_str()).collect()
    }
}

/// Trim `text` to at most `width` display cells, appending an
/// ellipsis when something was cut.
pub fn trim_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width.saturating_sub(1) {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Right-pad `text` with spaces out to `width` display cells.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let w = text.width();
    if w >= width {
        return text.to_string();
    }
    let mut out = String::from(text);
    out.extend(std::iter::repeat_n(' ', width - w));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_keeps_short_text_untouched() {
        assert_eq!(trim_to_width("rock", 10), "rock");
    }

    #[test]
    fn trim_cuts_and_marks_long_text() {
        let trimmed = trim_to_width("military rucksack", 8);
        assert!(trimmed.ends_with('…'));
        assert!(trimmed.width() <= 8);
    }

    #[test]
    fn trim_handles_wide_glyphs() {
        // each CJK glyph is two cells wide
        let trimmed = trim_to_width("背嚢のアイテム", 5);
        assert!(trimmed.width() <= 5);
    }

    #[test]
    fn pad_fills_to_width() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("abcd", 2), "abcd");
    }

    #[test]
    fn row_width_sums_cells() {
        let mut row = DisplayRow::new();
        row.push(DisplayCell::new("a - ", CellStyle::Normal));
        row.push(DisplayCell::new("rock", CellStyle::Normal));
        assert_eq!(row.width(), 8);
        assert_eq!(row.plain_text(), "a - rock");
    }
}
