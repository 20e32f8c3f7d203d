//! Responsive panel layout for pairpad.
//!
//! Pure layout arithmetic, recomputed on every draw so it always matches the
//! current terminal size.
//!
//! # Panel geometry
//!
//! | Terminal width | Layout |
//! |----------------|--------|
//! | `>= 100` cols  | Chat + input on the left (40%), editor over diff on the right (60%) |
//! | `< 100` cols   | Chat, input, editor, and diff stacked top to bottom |
//!
//! `Spacing::Overlap(1)` together with `MergeStrategy::Fuzzy` lets adjacent
//! borders share one cell and merge their junction characters.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect, Spacing},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::app::{AppState, Mode, PanelFocus};
use crate::theme::Theme;

/// Outer rects for one frame. Valid only inside the current draw closure.
#[derive(Debug, Clone, Copy)]
pub struct PanelAreas {
    pub chat: Rect,
    pub input: Rect,
    pub editor: Rect,
    pub diff: Rect,
    pub status_bar: Rect,
}

/// Height of the bordered one-line input box.
const INPUT_HEIGHT: u16 = 3;

pub fn compute_layout(frame: &Frame) -> PanelAreas {
    let [main_area, status_bar] =
        frame.area().layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]));

    if main_area.width >= 100 {
        let [left, right] = main_area.layout(
            &Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
                .spacing(Spacing::Overlap(1)),
        );
        let [chat, input] = left.layout(
            &Layout::vertical([Constraint::Fill(1), Constraint::Length(INPUT_HEIGHT)])
                .spacing(Spacing::Overlap(1)),
        );
        let [editor, diff] = right.layout(
            &Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)])
                .spacing(Spacing::Overlap(1)),
        );
        PanelAreas { chat, input, editor, diff, status_bar }
    } else {
        let [chat, input, editor, diff] = main_area.layout(
            &Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(INPUT_HEIGHT),
                Constraint::Fill(1),
                Constraint::Fill(1),
            ])
            .spacing(Spacing::Overlap(1)),
        );
        PanelAreas { chat, input, editor, diff, status_bar }
    }
}

/// The panel area inside its 1-cell border.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Bordered block for a panel: thick border in the active color when focused.
pub fn panel_block<'a>(title: impl Into<Line<'a>>, is_focused: bool, theme: &Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// One-row status bar: mode, focused panel, language, self-test summary, and
/// a short key hint.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (mode_text, mode_fg) = match state.mode {
        Mode::Input => (" INPUT ", theme.status_mode_input),
        Mode::Normal | Mode::HelpOverlay => (" NORMAL ", theme.status_mode_normal),
    };
    let focus_text = match state.focus {
        PanelFocus::Chat => "chat",
        PanelFocus::Editor => "editor",
        PanelFocus::Diff => "diff",
    };
    let report = &state.selftest;
    let selftest_fg = if report.all_passed() { theme.selftest_ok } else { theme.selftest_failed };
    let hint = match state.mode {
        Mode::Input => "Enter send · Esc stop typing",
        Mode::Normal | Mode::HelpOverlay => "i type · s snapshot · c compare · ? help · q quit",
    };

    let status_line = Line::from(vec![
        Span::styled(mode_text, Style::default().fg(mode_fg).add_modifier(Modifier::BOLD)),
        Span::raw(format!(" {focus_text} │ lang: {} │ ", state.session.language())),
        Span::styled(
            format!("self-test {}/{}", report.passed(), report.total()),
            Style::default().fg(selftest_fg),
        ),
        Span::raw(format!(" │ {hint}")),
    ]);

    frame.render_widget(
        Paragraph::new(status_line)
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
