//! stash-tui: Terminal front end for the inventory selection engine
//!
//! Maps crossterm key events to engine actions, paints selector
//! columns with ratatui, and owns the terminal session lifecycle.

pub mod app;
pub mod input;
pub mod sample;
pub mod theme;
pub mod widgets;

pub use app::{EventInput, TerminalSession};
pub use theme::Theme;
