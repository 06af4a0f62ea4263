use crossterm::event::{KeyCode, KeyEvent};
use smoothscroll_core::scroll::Clock;

use crate::app::App;
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    // Manual scrolling
    LineDown,
    LineUp,
    // Animated scrolling
    HalfPageDown,
    HalfPageUp,
    PageDown,
    PageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    NextSection,
    PrevSection,
    // Search
    StartSearch,
    NextMatch,
    PrevMatch,
    Confirm,
    Cancel,
    InputChar(char),
    Backspace,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event<C: Clock>(key: KeyEvent, app: &App<C>, keymap: &Keymap) -> Action {
    // Handle input mode (search)
    if app.is_input_mode() {
        return handle_input_mode(key);
    }

    let binding = KeyBinding::from_event(&key);

    // gg requires double press
    if keymap.is_g_prefix(&binding) {
        return if app.pending_key == Some('g') {
            keymap
                .get_pending_g_action()
                .cloned()
                .unwrap_or(Action::None)
        } else {
            Action::PendingG
        };
    }

    keymap.get(&binding).cloned().unwrap_or(Action::None)
}

/// Handle key events in input mode (search)
fn handle_input_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::Confirm,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Mode;
    use crate::document::Document;
    use crossterm::event::KeyModifiers;
    use smoothscroll_core::scroll::ManualClock;
    use smoothscroll_core::AppConfig;
    use std::sync::Arc;

    fn app() -> App<ManualClock> {
        let doc = Document::from_text("t", "a\nb\nc");
        App::with_clock(doc, Arc::new(AppConfig::default()), ManualClock::new())
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_normal_mode_bindings() {
        let app = app();
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('j'), KeyModifiers::NONE), &app, &keymap),
            Action::LineDown
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('d'), KeyModifiers::CONTROL), &app, &keymap),
            Action::HalfPageDown
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('G'), KeyModifiers::SHIFT), &app, &keymap),
            Action::JumpToBottom
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('x'), KeyModifiers::NONE), &app, &keymap),
            Action::None
        );
    }

    #[test]
    fn test_double_g_sequence() {
        let mut app = app();
        let keymap = Keymap::default();
        let g = key(KeyCode::Char('g'), KeyModifiers::NONE);

        assert_eq!(handle_key_event(g, &app, &keymap), Action::PendingG);
        app.pending_key = Some('g');
        assert_eq!(handle_key_event(g, &app, &keymap), Action::JumpToTop);
    }

    #[test]
    fn test_search_mode_captures_chars() {
        let mut app = app();
        app.mode = Mode::Search(String::new());
        let keymap = Keymap::default();

        assert_eq!(
            handle_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE), &app, &keymap),
            Action::InputChar('q')
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Enter, KeyModifiers::NONE), &app, &keymap),
            Action::Confirm
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Esc, KeyModifiers::NONE), &app, &keymap),
            Action::Cancel
        );
    }
}
