//! Trade screen widget
//!
//! Both panes side by side with a balance bar between the header and
//! the lists, colored by who currently comes out ahead.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use stash_core::TradeSession;

use crate::theme::Theme;
use crate::widgets::render_selector;

/// Paint a trade session into `area`.
pub fn render_trade(frame: &mut Frame<'_>, area: Rect, session: &mut TradeSession, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(3)])
        .split(area);

    render_balance_bar(frame, chunks[0], session, theme);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    let active = session.active_index();
    for (i, pane_area) in halves.iter().enumerate() {
        let border = if i == active {
            theme.border_active
        } else {
            theme.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        let inner = block.inner(*pane_area);
        frame.render_widget(block, *pane_area);
        render_selector(
            frame,
            inner,
            session.panes_mut()[i].selector_mut(),
            theme,
        );
    }
}

fn render_balance_bar(
    frame: &mut Frame<'_>,
    area: Rect,
    session: &TradeSession,
    theme: &Theme,
) {
    let balance = session.balance();
    let color = match balance.signum() {
        1 => theme.good,
        -1 => theme.bad,
        _ => theme.text,
    };
    let mut lines = vec![Line::from(vec![
        Span::styled("Balance: ", Style::default().fg(theme.text_dim)),
        Span::styled(
            format!("${:.2}", balance as f64 / 100.0),
            Style::default().fg(color),
        ),
        Span::styled(
            format!(
                "   {} offers ${:.2}, {} offers ${:.2}",
                session.panes()[0].party().name,
                session.panes()[0].offered_value() as f64 / 100.0,
                session.panes()[1].party().name,
                session.panes()[1].offered_value() as f64 / 100.0,
            ),
            Style::default().fg(theme.text_dim),
        ),
    ])];
    if let Some(prompt) = session.prompt() {
        lines.push(Line::from(Span::styled(
            prompt.to_string(),
            Style::default().fg(theme.denied),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}
