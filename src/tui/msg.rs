//! Terminal input actions
//!
//! Keys map to actions first; the app turns actions into explorer messages.
//! Keeping this mapping pure makes the key bindings testable without a
//! terminal.

use crossterm::event::{KeyCode, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Pin (or unpin) the cell under the cursor
    Select,
    /// Drop the cursor, like the pointer leaving the grid
    Leave,
    ClearPin,
    NextTfCount,
    PrevTfCount,
    ToggleHelp,
    Quit,
    None,
}

/// Map a key press to an action
pub fn key_to_action(code: KeyCode, modifiers: KeyModifiers, show_help: bool) -> Action {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Action::Quit;
    }

    // Help overlay swallows everything except its own close keys
    if show_help {
        return match code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Action::ToggleHelp,
            _ => Action::None,
        };
    }

    match code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('?') => Action::ToggleHelp,

        KeyCode::Up | KeyCode::Char('k') => Action::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => Action::MoveDown,
        KeyCode::Left | KeyCode::Char('h') => Action::MoveLeft,
        KeyCode::Right | KeyCode::Char('l') => Action::MoveRight,

        KeyCode::Enter | KeyCode::Char(' ') => Action::Select,
        KeyCode::Esc => Action::Leave,
        KeyCode::Char('c') => Action::ClearPin,

        KeyCode::Char(']') | KeyCode::Char('n') | KeyCode::Tab => Action::NextTfCount,
        KeyCode::Char('[') | KeyCode::Char('p') | KeyCode::BackTab => Action::PrevTfCount,

        _ => Action::None,
    }
}
