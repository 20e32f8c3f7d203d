//! Diff panel renderer.
//!
//! Lines are classified on every frame from the session's diff text and only
//! the visible window is turned into list items.

use pairpad_core::{DiffLine, DiffLineKind};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{List, ListItem},
};

use crate::app::{AppState, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

const EMPTY_DIFF: &str =
    "No diff to display. Take a snapshot then press c (compare), or call the show_diff tool.";

pub fn render_diff(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = panel_block("Diff", state.focus == PanelFocus::Diff, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let lines = state.session.diff_lines();
    if lines.is_empty() {
        let placeholder = Line::styled(EMPTY_DIFF, Style::default().fg(theme.hint));
        frame.render_widget(List::new(vec![ListItem::new(placeholder)]), inner);
        return;
    }

    let total = lines.len();
    let visible_start = state.diff_scroll.min(total.saturating_sub(1));
    let visible_end = (visible_start + inner.height as usize).min(total);

    let items: Vec<ListItem> = lines[visible_start..visible_end]
        .iter()
        .map(|l| ListItem::new(styled_diff_line(l, theme)))
        .collect();
    frame.render_widget(List::new(items), inner);
}

fn styled_diff_line(line: &DiffLine, theme: &Theme) -> Line<'static> {
    let style = match line.kind {
        DiffLineKind::Meta => Style::default().fg(theme.diff_meta).add_modifier(Modifier::BOLD),
        DiffLineKind::Add => Style::default().fg(theme.diff_added),
        DiffLineKind::Del => Style::default().fg(theme.diff_removed),
        DiffLineKind::Context => Style::default().fg(theme.diff_context),
    };
    Line::styled(line.text.clone(), style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_kind_gets_its_theme_color() {
        let theme = Theme::dark();
        let cases = [
            ("@@ -1,1 +1,1 @@", theme.diff_meta),
            ("+x", theme.diff_added),
            ("-x", theme.diff_removed),
            (" x", theme.diff_context),
        ];
        for (text, color) in cases {
            let line = DiffLine { text: text.to_owned(), kind: pairpad_core::classify(text) };
            assert_eq!(styled_diff_line(&line, &theme).style.fg, Some(color), "line {text:?}");
        }
    }
}
