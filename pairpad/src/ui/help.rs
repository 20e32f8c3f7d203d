//! Help overlay: key reference, tool call formats, and the system prompt.
//!
//! Drawn last inside the same `terminal.draw()` closure, over a `Clear`ed
//! area, so it sits on top of the panels without a second draw call.

use pairpad_core::session::SYSTEM_PROMPT;
use ratatui::{
    Frame,
    layout::Constraint,
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the overlay at 80% of the screen, scrolled by `help_scroll` rows.
/// Skipped on terminals narrower than 60 columns.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 60 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(80), Constraint::Percentage(80));

    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help · j/k scroll, ? or Esc to dismiss ")
        .border_style(Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

fn build_help_text() -> Text<'static> {
    let heading = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::styled("Session", heading),
        Line::from("  i / Enter     Start typing a message"),
        Line::from("  s             Snapshot the editor buffer"),
        Line::from("  c             Compare snapshot against the buffer"),
        Line::from(""),
        Line::styled("Typing", heading),
        Line::from("  Enter         Send the line (blank lines are ignored)"),
        Line::from("  Backspace     Delete one character"),
        Line::from("  Ctrl-u        Clear the line"),
        Line::from("  Esc           Stop typing"),
        Line::from(""),
        Line::styled("Navigation", heading),
        Line::from("  j / k         Scroll down / up one line"),
        Line::from("  g / G         Jump to top / bottom"),
        Line::from("  Ctrl-d / u    Scroll half page down / up"),
        Line::from("  Ctrl-f / b    Scroll full page down / up"),
        Line::from("  H / L / Tab   Move panel focus"),
        Line::from(""),
        Line::styled("Tool calls (one JSON object per line)", heading),
        Line::from(r#"  {"tool":"write_file","language":"go","content":"..."}"#),
        Line::from(r#"  {"tool":"show_diff","from":"...","to":"...","file":"snippet.ts"}"#),
        Line::from(""),
        Line::styled("General", heading),
        Line::from("  ?             Open / close this help overlay"),
        Line::from("  q / Esc       Quit"),
        Line::from(""),
        Line::styled("System prompt", heading),
    ];
    lines.extend(SYSTEM_PROMPT.lines().map(|l| Line::from(format!("  {l}"))));
    Text::from(lines)
}
