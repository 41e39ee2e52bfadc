//! Terminal session and event plumbing
//!
//! [`TerminalSession`] owns raw mode and the alternate screen and
//! restores both on drop, so a panic mid-session still leaves the
//! shell usable. [`EventInput`] adapts blocking crossterm events to
//! the engine's [`InputSource`].

use std::io::{self, Stdout};

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{error, warn};

use stash_core::{Action, InputSource};

use crate::input::key_to_action;

/// Raw-mode terminal wrapped for the duration of a selector run.
pub struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(TerminalSession { terminal })
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    pub fn size(&self) -> (u16, u16) {
        match self.terminal.size() {
            Ok(size) => (size.width, size.height),
            Err(e) => {
                warn!("terminal size unavailable, assuming 80x24: {e}");
                (80, 24)
            }
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            error!("failed to disable raw mode: {e}");
        }
        if let Err(e) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen) {
            error!("failed to leave alternate screen: {e}");
        }
        if let Err(e) = self.terminal.show_cursor() {
            error!("failed to restore cursor: {e}");
        }
    }
}

/// Blocking crossterm event reader as an engine input source.
///
/// Tracks whether the filter line is being edited so printable keys
/// route to the filter; resize events surface as [`Action::Resize`].
#[derive(Debug, Default)]
pub struct EventInput {
    editing_filter: bool,
}

impl EventInput {
    pub fn new() -> Self {
        EventInput::default()
    }
}

impl InputSource for EventInput {
    fn next_action(&mut self) -> Action {
        loop {
            let event = match event::read() {
                Ok(event) => event,
                Err(e) => {
                    error!("input read failed: {e}");
                    return Action::Cancel;
                }
            };
            match event {
                Event::Key(key) if key.kind != event::KeyEventKind::Release => {
                    if let Some(action) = key_to_action(key, self.editing_filter) {
                        match action {
                            Action::Filter(stash_core::FilterEdit::Start) => {
                                self.editing_filter = true;
                            }
                            Action::Filter(stash_core::FilterEdit::Accept)
                            | Action::Filter(stash_core::FilterEdit::Clear) => {
                                self.editing_filter = false;
                            }
                            _ => {}
                        }
                        return action;
                    }
                }
                Event::Resize(width, height) => return Action::Resize { width, height },
                _ => {}
            }
        }
    }
}
