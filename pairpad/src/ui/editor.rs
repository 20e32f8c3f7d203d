//! Editor panel: the session's code buffer with line numbers.
//!
//! Shows the worker's highlighted lines when they match the current buffer,
//! plain text otherwise. The panel is a view; the buffer only changes through
//! `write_file` tool calls.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem},
};

use crate::app::{AppState, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

pub fn render_editor(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let title = if state.highlight_is_current() && !state.syntax_name.is_empty() {
        format!("Editor · Language: {} ({})", state.session.language(), state.syntax_name)
    } else {
        format!("Editor · Language: {}", state.session.language())
    };
    let block = panel_block(title, state.focus == PanelFocus::Editor, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let plain: Vec<Line<'static>>;
    let lines: &[Line<'static>] = if state.highlight_is_current() {
        &state.editor_lines
    } else {
        plain = state.session.code().split('\n').map(|l| Line::raw(l.to_owned())).collect();
        &plain
    };

    let total = lines.len();
    let gutter_width = total.to_string().len();
    let visible_start = state.editor_scroll.min(total.saturating_sub(1));
    let visible_end = (visible_start + inner.height as usize).min(total);

    let items: Vec<ListItem> = lines[visible_start..visible_end]
        .iter()
        .enumerate()
        .map(|(offset, line)| {
            let number = visible_start + offset + 1;
            let mut spans = vec![Span::styled(
                format!("{number:>gutter_width$} "),
                Style::default().fg(theme.line_number),
            )];
            spans.extend(line.spans.iter().cloned());
            ListItem::new(Line::from(spans))
        })
        .collect();
    frame.render_widget(List::new(items), inner);
}
