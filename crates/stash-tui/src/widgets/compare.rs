//! Side-by-side item comparison popup

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use stash_core::{ItemFlags, ItemHandle};

use crate::theme::Theme;

/// Paint the comparison popup over the selector.
pub fn render_compare_popup(
    frame: &mut Frame<'_>,
    area: Rect,
    left: &ItemHandle,
    right: &ItemHandle,
    theme: &Theme,
) {
    let popup = centered_rect(area, 70, 60);
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_active))
        .title("Compare");
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);
    frame.render_widget(Paragraph::new(item_lines(left, theme)), halves[0]);
    frame.render_widget(Paragraph::new(item_lines(right, theme)), halves[1]);
}

fn item_lines<'a>(item: &ItemHandle, theme: &Theme) -> Vec<Line<'a>> {
    let label = Style::default().fg(theme.text_dim);
    let value = Style::default().fg(theme.text);
    let mut lines = vec![
        Line::from(Span::styled(
            item.display_name(item.count),
            Style::default().fg(theme.header),
        )),
        Line::default(),
        stat("Weight", format!("{:.2} kg", item.weight_g as f64 / 1000.0), label, value),
        stat("Volume", format!("{:.2} L", item.volume_ml as f64 / 1000.0), label, value),
        stat("Length", format!("{} mm", item.length_mm), label, value),
        stat("Value", format!("${:.2}", item.value as f64 / 100.0), label, value),
        stat("Category", item.category.name.clone(), label, value),
    ];
    let mut traits = Vec::new();
    if item.flags.contains(ItemFlags::WORN) {
        traits.push("worn");
    }
    if item.flags.contains(ItemFlags::WIELDED) {
        traits.push("wielded");
    }
    if item.flags.contains(ItemFlags::LIQUID) {
        traits.push("liquid");
    }
    if item.flags.contains(ItemFlags::FAVORITE) {
        traits.push("favorite");
    }
    if !traits.is_empty() {
        lines.push(stat("Traits", traits.join(", "), label, value));
    }
    if let Some(cap) = &item.capacity {
        lines.push(stat(
            "Holds",
            format!("{:.2} L", cap.volume_ml as f64 / 1000.0),
            label,
            value,
        ));
    }
    lines
}

fn stat<'a>(name: &str, text: String, label: Style, value: Style) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{name:>10}: "), label),
        Span::styled(text, value),
    ])
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
