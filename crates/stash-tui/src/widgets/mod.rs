//! Widgets painting engine state onto ratatui frames

pub mod compare;
pub mod selector;
pub mod trade;

pub use compare::render_compare_popup;
pub use selector::render_selector;
pub use trade::render_trade;
