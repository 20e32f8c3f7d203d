//! UI rendering for pairpad.
//!
//! `render()` is the single entry point called from the event loop's
//! `terminal.draw()` closure. Layout arithmetic lives in `layout.rs`; each
//! panel has its own module.

mod layout;
pub mod chat;
pub mod diff_view;
pub mod editor;
pub mod help;
pub mod keybindings;

use ratatui::Frame;

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use layout::{compute_layout, inner_rect, render_status_bar};

/// Renders one complete frame.
///
/// Viewport heights and panel rects are written back into `state` first so
/// the next key or mouse event can compute page distances and hit-test
/// clicks against what is on screen.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let areas = compute_layout(frame);

    let chat_inner = inner_rect(areas.chat);
    state.chat_viewport_height = chat_inner.height;
    state.chat_viewport_width = chat_inner.width;
    state.editor_viewport_height = inner_rect(areas.editor).height;
    state.diff_viewport_height = inner_rect(areas.diff).height;
    state.panel_rects = [areas.chat, areas.editor, areas.diff];

    chat::render_chat(frame, areas.chat, state, theme);
    chat::render_input(frame, areas.input, state, theme);
    editor::render_editor(frame, areas.editor, state, theme);
    diff_view::render_diff(frame, areas.diff, state, theme);
    render_status_bar(frame, areas.status_bar, state, theme);

    if state.mode == Mode::HelpOverlay {
        help::render_help_overlay(frame, theme, state.help_scroll);
    }
}
