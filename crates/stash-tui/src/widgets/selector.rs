//! Selector screen widget
//!
//! One bordered frame holding the title, a carried weight/volume bar,
//! the populated columns side by side, and a footer with paging
//! hints, the filter line and any pending prompt.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use stash_core::{CellStyle, ColumnView, NavigationMode, Selector};

use crate::theme::Theme;

/// Paint a selector into `area`.
pub fn render_selector(frame: &mut Frame<'_>, area: Rect, sel: &mut Selector, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(sel.title().to_string());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // weight/volume bar
            Constraint::Min(1),    // columns
            Constraint::Length(1), // paging / navigation hints
            Constraint::Length(1), // filter line or prompt
        ])
        .split(inner);

    render_totals_bar(frame, chunks[0], sel, theme);

    let views = sel.layout_views();
    render_columns(frame, chunks[1], &views, theme);
    render_footer(frame, chunks[2], sel, &views, theme);
    render_status_line(frame, chunks[3], sel, theme);
}

fn render_totals_bar(frame: &mut Frame<'_>, area: Rect, sel: &Selector, theme: &Theme) {
    let (weight_g, volume_ml) = sel.carried_totals();
    let line = Line::from(vec![
        Span::styled("Weight: ", Style::default().fg(theme.text_dim)),
        Span::styled(
            format!("{:.2} kg", weight_g as f64 / 1000.0),
            Style::default().fg(theme.text),
        ),
        Span::styled("   Volume: ", Style::default().fg(theme.text_dim)),
        Span::styled(
            format!("{:.2} L", volume_ml as f64 / 1000.0),
            Style::default().fg(theme.text),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_columns(frame: &mut Frame<'_>, area: Rect, views: &[ColumnView], theme: &Theme) {
    let mut x = area.x;
    for view in views {
        let width = (view.width as u16).min(area.width.saturating_sub(x - area.x));
        if width == 0 {
            break;
        }
        let column_area = Rect::new(x, area.y, width, area.height);
        let mut lines: Vec<Line> = Vec::new();
        for row in &view.rows {
            let spans: Vec<Span> = row
                .cells
                .iter()
                .map(|cell| Span::styled(cell.text.clone(), theme.style_for(cell.style)))
                .collect();
            lines.push(Line::from(spans));
        }
        frame.render_widget(Paragraph::new(lines), column_area);
        x += width + 2;
        if x >= area.right() {
            break;
        }
    }
}

fn render_footer(
    frame: &mut Frame<'_>,
    area: Rect,
    sel: &Selector,
    views: &[ColumnView],
    theme: &Theme,
) {
    let mut spans: Vec<Span> = Vec::new();
    if let Some(view) = views.iter().find(|v| v.active) {
        if view.page_index > 0 {
            spans.push(Span::styled("< Go Back  ", Style::default().fg(theme.text)));
        }
        if view.page_index + 1 < view.pages {
            spans.push(Span::styled("> More items  ", Style::default().fg(theme.text)));
        }
        if view.pages > 1 {
            spans.push(Span::styled(
                format!("[page {}/{}]  ", view.page_index + 1, view.pages),
                Style::default().fg(theme.text_dim),
            ));
        }
    }
    let mode = match sel.navigation_mode() {
        NavigationMode::Item => "item navigation",
        NavigationMode::Category => "category navigation",
    };
    spans.push(Span::styled(
        format!("[{mode}]"),
        theme.style_for(if sel.navigation_mode() == NavigationMode::Category {
            CellStyle::HighlightCategory
        } else {
            CellStyle::Dim
        }),
    ));
    if sel.pending_count() > 0 {
        spans.push(Span::styled(
            format!("  count: {}", sel.pending_count()),
            Style::default().fg(theme.text),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_line(frame: &mut Frame<'_>, area: Rect, sel: &Selector, theme: &Theme) {
    let line = if let Some(prompt) = sel.prompt() {
        Line::from(Span::styled(
            prompt.to_string(),
            Style::default().fg(theme.denied),
        ))
    } else if sel.is_editing_filter() {
        Line::from(vec![
            Span::styled("filter: ", Style::default().fg(theme.text_dim)),
            Span::styled(sel.filter_text().to_string(), Style::default().fg(theme.text)),
            Span::styled("_", Style::default().fg(theme.text)),
        ])
    } else if !sel.filter_text().is_empty() {
        Line::from(vec![
            Span::styled("filtered: ", Style::default().fg(theme.text_dim)),
            Span::styled(sel.filter_text().to_string(), Style::default().fg(theme.text)),
        ])
    } else {
        Line::from(Span::styled(
            "space toggles, / filters, enter confirms, esc cancels",
            Style::default().fg(theme.text_dim),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}
