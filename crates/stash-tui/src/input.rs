//! Input handling - convert key events to engine actions
//!
//! Bindings follow the usual roguelike inventory conventions: vi keys
//! and arrows move, TAB switches columns, `/` filters, digits build a
//! count, letters quick-select by invlet.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use stash_core::{Action, FilterEdit};

/// Convert a key event to an engine action.
///
/// While the filter line is being edited, printable characters feed
/// the filter instead of acting as invlets or counts.
pub fn key_to_action(key: KeyEvent, editing_filter: bool) -> Option<Action> {
    if editing_filter {
        return match key.code {
            KeyCode::Char(c) => Some(Action::Filter(FilterEdit::Push(c))),
            KeyCode::Backspace => Some(Action::Filter(FilterEdit::Backspace)),
            KeyCode::Enter => Some(Action::Filter(FilterEdit::Accept)),
            KeyCode::Esc => Some(Action::Filter(FilterEdit::Clear)),
            _ => None,
        };
    }

    // Ctrl key combos
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('f') => Some(Action::Filter(FilterEdit::Start)),
            KeyCode::Char('a') => Some(Action::ToggleAll),
            _ => None,
        };
    }

    match key.code {
        // Vi keys and arrows
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
        KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevColumn),
        KeyCode::Char('l') | KeyCode::Right => Some(Action::NextColumn),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Home => Some(Action::Home),
        KeyCode::End => Some(Action::End),

        // Column / pane movement
        KeyCode::Tab => Some(Action::Switch),

        // Display modes
        KeyCode::Char(';') => Some(Action::ToggleNavigationMode),
        KeyCode::Char('\\') => Some(Action::ToggleHierarchyMode),
        KeyCode::Char('>') => Some(Action::ToggleCollapse),

        // Selection
        KeyCode::Char(' ') => Some(Action::ToggleEntry),
        KeyCode::Char('@') => Some(Action::ToggleAll),
        KeyCode::Char('*') => Some(Action::ToggleFavorite),
        KeyCode::Char('e') => Some(Action::Examine),
        KeyCode::Char(c @ '0'..='9') => Some(Action::Digit(c as u8 - b'0')),

        // Direct commit paths (pickup)
        KeyCode::Char('w') => Some(Action::Wield),
        KeyCode::Char('W') => Some(Action::Wear),

        // Filter
        KeyCode::Char('/') => Some(Action::Filter(FilterEdit::Start)),

        // Quick-select letters; anything not bound above
        KeyCode::Char(c) if c.is_ascii_alphabetic() => Some(Action::Invlet(c)),

        // Session control
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc => Some(Action::Cancel),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    #[test]
    fn movement_keys_map_to_cursor_actions() {
        assert_eq!(key_to_action(key(KeyCode::Char('j')), false), Some(Action::Down));
        assert_eq!(key_to_action(key(KeyCode::Up), false), Some(Action::Up));
        assert_eq!(key_to_action(key(KeyCode::Tab), false), Some(Action::Switch));
    }

    #[test]
    fn digits_become_counts_and_letters_invlets() {
        assert_eq!(key_to_action(key(KeyCode::Char('3')), false), Some(Action::Digit(3)));
        assert_eq!(
            key_to_action(key(KeyCode::Char('d')), false),
            Some(Action::Invlet('d'))
        );
    }

    #[test]
    fn filter_editing_captures_printables() {
        assert_eq!(
            key_to_action(key(KeyCode::Char('j')), true),
            Some(Action::Filter(FilterEdit::Push('j')))
        );
        assert_eq!(
            key_to_action(key(KeyCode::Enter), true),
            Some(Action::Filter(FilterEdit::Accept))
        );
    }

    #[test]
    fn bound_letters_never_leak_as_invlets() {
        // w/W are wield/wear, not quick-select
        assert_eq!(key_to_action(key(KeyCode::Char('w')), false), Some(Action::Wield));
        assert_eq!(key_to_action(key(KeyCode::Char('W')), false), Some(Action::Wear));
    }
}
