//! Keybinding dispatcher for pairpad.
//!
//! Translates crossterm key and mouse events into `AppState` mutations and
//! returns a `KeyAction` telling the event loop whether to continue or quit.
//! Dispatch branches on `state.mode` first so each mode has its own handler.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::app::{AppState, Mode, PanelFocus};

/// Control-flow signal returned from the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::Input => handle_input(key, state),
        Mode::Normal => handle_normal(key, state),
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

fn handle_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    if let Some(action) = handle_scroll_key(key, state) {
        return action;
    }

    match key.code {
        KeyCode::Char('H') | KeyCode::BackTab => {
            state.focus = state.focus.prev();
        }
        KeyCode::Char('L') | KeyCode::Tab => {
            state.focus = state.focus.next();
        }

        KeyCode::Char('i') | KeyCode::Enter => {
            state.mode = Mode::Input;
        }
        KeyCode::Char('s') => state.take_snapshot(),
        KeyCode::Char('c') => state.compare(),

        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
        }

        KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,
        _ => {}
    }
    KeyAction::Continue
}

/// j / k / g / G and the Ctrl page keys. `None` when the key is not a
/// scroll key.
fn handle_scroll_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => state.scroll_up(1),
        KeyCode::Char('g') | KeyCode::Home => state.scroll_top(),
        KeyCode::Char('G') | KeyCode::End => state.scroll_bottom(),
        KeyCode::Char('d') if ctrl => state.half_page_down(),
        KeyCode::Char('u') if ctrl => state.half_page_up(),
        KeyCode::Char('f') if ctrl => state.full_page_down(),
        KeyCode::Char('b') if ctrl => state.full_page_up(),
        KeyCode::PageDown => state.full_page_down(),
        KeyCode::PageUp => state.full_page_up(),
        _ => return None,
    }
    Some(KeyAction::Continue)
}

// ---------------------------------------------------------------------------
// Input mode
// ---------------------------------------------------------------------------

/// Edits the chat input line. Stays in input mode after sending so several
/// messages can be typed in a row.
fn handle_input(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => state.mode = Mode::Normal,
        KeyCode::Enter => {
            state.submit_input();
        }
        KeyCode::Backspace => {
            state.input.pop();
        }
        KeyCode::Char('u') if ctrl => state.input.clear(),
        KeyCode::Char('c') if ctrl => return KeyAction::Quit,
        KeyCode::Char(c) if !ctrl => state.input.push(c),
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// HelpOverlay mode
// ---------------------------------------------------------------------------

fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.help_scroll = state.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('g') => state.help_scroll = 0,
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Left click focuses the panel under the cursor; the wheel scrolls 3 rows.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let pos = Position { x: mouse.column, y: mouse.row };
            let [chat, editor, diff] = state.panel_rects;
            if chat.contains(pos) {
                state.focus = PanelFocus::Chat;
            } else if editor.contains(pos) {
                state.focus = PanelFocus::Editor;
            } else if diff.contains(pos) {
                state.focus = PanelFocus::Diff;
            }
        }
        MouseEventKind::ScrollUp => {
            if state.mode == Mode::HelpOverlay {
                state.help_scroll = state.help_scroll.saturating_sub(3);
            } else {
                state.scroll_up(3);
            }
        }
        MouseEventKind::ScrollDown => {
            if state.mode == Mode::HelpOverlay {
                state.help_scroll = state.help_scroll.saturating_add(3);
            } else {
                state.scroll_down(3);
            }
        }
        _ => {}
    }
    KeyAction::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairpad_core::selftest::SelfTestReport;
    use pairpad_core::EditorSession;

    fn state() -> AppState {
        AppState::new(EditorSession::new(), SelfTestReport::default())
    }

    fn press(state: &mut AppState, code: KeyCode) -> KeyAction {
        handle_key(KeyEvent::new(code, KeyModifiers::NONE), state)
    }

    fn type_line(state: &mut AppState, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
        press(state, KeyCode::Enter);
    }

    #[test]
    fn typing_a_write_file_call_updates_the_buffer() {
        let mut s = state();
        press(&mut s, KeyCode::Char('i'));
        assert_eq!(s.mode, Mode::Input);

        type_line(&mut s, r#"{"tool":"write_file","content":"X","language":"go"}"#);
        assert_eq!(s.session.code(), "X");
        assert_eq!(s.session.language(), "go");
        assert_eq!(s.mode, Mode::Input, "stays in input mode after sending");
        assert!(s.input.is_empty());

        press(&mut s, KeyCode::Esc);
        assert_eq!(s.mode, Mode::Normal);
    }

    #[test]
    fn normal_mode_letters_do_not_reach_the_input() {
        let mut s = state();
        press(&mut s, KeyCode::Char('s'));
        assert!(s.input.is_empty());
        assert_eq!(s.session.messages().len(), 1, "s takes a snapshot");

        press(&mut s, KeyCode::Char('c'));
        assert!(!s.session.diff_text().is_empty());
        assert_eq!(s.session.messages().len(), 1, "compare is silent");
    }

    #[test]
    fn backspace_and_clear_edit_the_line() {
        let mut s = state();
        press(&mut s, KeyCode::Enter);
        press(&mut s, KeyCode::Char('a'));
        press(&mut s, KeyCode::Char('b'));
        press(&mut s, KeyCode::Backspace);
        assert_eq!(s.input, "a");
        handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL), &mut s);
        assert!(s.input.is_empty());
    }

    #[test]
    fn quit_keys() {
        let mut s = state();
        assert_eq!(press(&mut s, KeyCode::Char('?')), KeyAction::Continue);
        assert_eq!(s.mode, Mode::HelpOverlay);
        assert_eq!(press(&mut s, KeyCode::Char('q')), KeyAction::Continue);
        assert_eq!(s.mode, Mode::Normal);
        assert_eq!(press(&mut s, KeyCode::Char('q')), KeyAction::Quit);
    }

    #[test]
    fn tab_cycles_focus() {
        let mut s = state();
        press(&mut s, KeyCode::Tab);
        assert_eq!(s.focus, PanelFocus::Editor);
        press(&mut s, KeyCode::BackTab);
        assert_eq!(s.focus, PanelFocus::Chat);
    }
}
