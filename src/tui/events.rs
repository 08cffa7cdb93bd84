//! Event handling for the TUI

use crossterm::event::{KeyEvent, KeyEventKind};

use super::app::App;
use super::msg::key_to_action;

/// Handle a key event, returns true if app should quit
pub fn handle_event(app: &mut App, key: KeyEvent) -> bool {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return false;
    }
    let action = key_to_action(key.code, key.modifiers, app.show_help);
    app.apply(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures;
    use crate::explorer::Explorer;
    use crate::render::Layout;
    use crate::view::TfCounts;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn app() -> App {
        App::new(Explorer::new(
            fixtures::small(),
            TfCounts::default(),
            10,
            Layout::default(),
        ))
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert!(handle_event(&mut app, KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(handle_event(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_help_swallows_keys() {
        let mut app = app();
        handle_event(&mut app, KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE));
        assert!(app.show_help);
        assert!(!handle_event(&mut app, KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(!app.show_help);
        handle_event(&mut app, KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE));
        assert_eq!(app.cursor, Some((0, 0)));
    }
}
