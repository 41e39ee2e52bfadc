//! Input actions
//!
//! The engine consumes logical actions, not key codes; the mapping
//! from raw keys lives in the TUI layer. Keeping the alphabet a
//! closed enum means a selector that forgets to handle a case fails
//! to compile, not silently at runtime.

use strum::{Display, EnumDiscriminants};

/// Edit operation on the filter line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEdit {
    /// Begin editing (clears nothing; cursor at end).
    Start,
    Push(char),
    Backspace,
    /// Accept the edited text.
    Accept,
    /// Abandon the edit and clear the filter.
    Clear,
}

/// One logical input event.
#[derive(Debug, Clone, PartialEq, Eq, Display, EnumDiscriminants)]
#[strum_discriminants(name(ActionKind), derive(Display, Hash))]
#[strum_discriminants(vis(pub))]
pub enum Action {
    // Cursor movement
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,

    // Column / pane movement
    NextColumn,
    PrevColumn,
    /// Switch the active pane (trade sessions).
    Switch,

    // Display modes
    /// Item-at-a-time vs category-at-a-time navigation.
    ToggleNavigationMode,
    /// Hierarchy (by container) vs flat category display.
    ToggleHierarchyMode,
    /// Collapse or expand the highlighted collation group.
    ToggleCollapse,

    // Selection
    ToggleEntry,
    ToggleAll,
    /// Numeric prefix digit for count-then-toggle.
    Digit(u8),
    /// Quick-select letter press.
    Invlet(char),
    ToggleFavorite,
    Examine,

    // Direct commit paths (pickup variant)
    Wield,
    Wear,

    // Filter editing
    Filter(FilterEdit),

    // Session control
    Confirm,
    Cancel,
    /// Terminal geometry changed; relayout before the next render.
    Resize { width: u16, height: u16 },
}

/// Blocking provider of the next logical action.
///
/// This is the selector's only suspension point: one synchronous read
/// per loop iteration, no timeout, no background work.
pub trait InputSource {
    fn next_action(&mut self) -> Action;
}

/// Replays a fixed action sequence; ends with `Cancel` so a selector
/// under test always terminates.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    actions: std::collections::VecDeque<Action>,
}

impl ScriptedInput {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        ScriptedInput {
            actions: actions.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn next_action(&mut self) -> Action {
        self.actions.pop_front().unwrap_or(Action::Cancel)
    }
}
