//! Central application state for pairpad.
//!
//! `AppState` wraps the [`EditorSession`] together with everything the
//! terminal front end needs around it: mode, focus, scroll offsets, cached
//! viewport heights, the chat input line, and the highlighted editor lines.
//! No rendering happens here; `ui/` reads this state and `ui/keybindings.rs`
//! mutates it.

use crossbeam_channel::Sender;
use pairpad_core::selftest::SelfTestReport;
use pairpad_core::EditorSession;
use ratatui::layout::Rect;
use ratatui::text::Line;

use crate::highlight::{HighlightPayload, HighlightRequest};
use crate::ui::chat;

/// Which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Keys edit the chat input line; `Enter` submits.
    Input,
    /// Help overlay is shown above all panels.
    HelpOverlay,
}

/// Which panel receives scroll keys.
///
/// Cycle order: `Chat` → `Editor` → `Diff` → `Chat`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    #[default]
    Chat,
    Editor,
    Diff,
}

impl PanelFocus {
    pub fn prev(self) -> Self {
        match self {
            PanelFocus::Chat => PanelFocus::Diff,
            PanelFocus::Editor => PanelFocus::Chat,
            PanelFocus::Diff => PanelFocus::Editor,
        }
    }

    pub fn next(self) -> Self {
        match self {
            PanelFocus::Chat => PanelFocus::Editor,
            PanelFocus::Editor => PanelFocus::Diff,
            PanelFocus::Diff => PanelFocus::Chat,
        }
    }
}

/// All mutable UI state passed through every render cycle.
pub struct AppState {
    pub session: EditorSession,
    pub mode: Mode,
    pub focus: PanelFocus,

    /// Text typed into the chat input line, not yet submitted.
    pub input: String,

    /// First visible chat row. Ignored while `chat_follow` is set.
    pub chat_scroll: usize,
    /// Keep the newest chat rows in view. Cleared by scrolling up.
    pub chat_follow: bool,
    pub editor_scroll: usize,
    pub diff_scroll: usize,
    pub help_scroll: u16,

    /// Inner panel heights cached after each render, used for page scrolling.
    pub chat_viewport_height: u16,
    pub editor_viewport_height: u16,
    pub diff_viewport_height: u16,
    /// Inner chat width from the last render; chat rows wrap at this width.
    pub chat_viewport_width: u16,

    /// `[chat, editor, diff]` outer rects from the last render, for mouse focus.
    pub panel_rects: [Rect; 3],

    /// Bumped whenever the buffer or language changes.
    pub highlight_generation: u64,
    /// Highlighted buffer for `highlighted_generation`.
    pub editor_lines: Vec<Line<'static>>,
    pub highlighted_generation: u64,
    /// Syntax the editor lines were highlighted with.
    pub syntax_name: String,
    pub highlight_tx: Option<Sender<HighlightRequest>>,

    /// Start-up self-test result, shown in the status bar.
    pub selftest: SelfTestReport,
}

impl AppState {
    pub fn new(session: EditorSession, selftest: SelfTestReport) -> Self {
        Self {
            session,
            mode: Mode::default(),
            focus: PanelFocus::default(),
            input: String::new(),
            chat_scroll: 0,
            chat_follow: true,
            editor_scroll: 0,
            diff_scroll: 0,
            help_scroll: 0,
            chat_viewport_height: 0,
            editor_viewport_height: 0,
            diff_viewport_height: 0,
            chat_viewport_width: 0,
            panel_rects: [Rect::default(); 3],
            highlight_generation: 0,
            editor_lines: Vec::new(),
            highlighted_generation: 0,
            syntax_name: String::new(),
            highlight_tx: None,
            selftest,
        }
    }

    /// True when `editor_lines` matches the current buffer.
    pub fn highlight_is_current(&self) -> bool {
        self.highlighted_generation == self.highlight_generation && !self.editor_lines.is_empty()
    }

    /// Number of rows the chat panel renders once messages are wrapped to
    /// `chat_viewport_width`.
    pub fn chat_row_count(&self) -> usize {
        let width = self.chat_viewport_width as usize;
        self.session
            .messages()
            .iter()
            .map(|m| chat::message_row_count(m, width))
            .sum()
    }

    /// Submits the input line to the session.
    ///
    /// The line is trimmed first; an empty line is dropped without touching
    /// the session. Returns `true` when something was sent.
    pub fn submit_input(&mut self) -> bool {
        let text = self.input.trim().to_owned();
        self.input.clear();
        if text.is_empty() {
            return false;
        }

        let code_before = self.session.code().to_owned();
        let language_before = self.session.language().to_owned();
        let diff_before = self.session.diff_text().to_owned();

        self.session.send(text);

        if self.session.code() != code_before || self.session.language() != language_before {
            self.editor_scroll = 0;
            self.request_highlight();
        }
        if self.session.diff_text() != diff_before {
            self.diff_scroll = 0;
        }
        self.chat_follow = true;
        true
    }

    pub fn take_snapshot(&mut self) {
        self.session.snapshot();
        self.chat_follow = true;
    }

    pub fn compare(&mut self) {
        self.session.compare();
        self.diff_scroll = 0;
    }

    /// Appends pasted text to the input line. Line breaks become spaces since
    /// a chat line is submitted as a single line.
    pub fn paste(&mut self, text: &str) {
        let flattened: String = text
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        self.input.push_str(&flattened);
    }

    /// Queues a highlight of the current buffer on the worker thread.
    pub fn request_highlight(&mut self) {
        self.highlight_generation += 1;
        let Some(tx) = self.highlight_tx.as_ref() else {
            return;
        };
        let request = HighlightRequest {
            generation: self.highlight_generation,
            code: self.session.code().to_owned(),
            language: self.session.language().to_owned(),
        };
        if tx.send(request).is_err() {
            tracing::warn!("highlight worker is gone; editor stays unhighlighted");
            self.highlight_tx = None;
        }
    }

    /// Stores a worker result unless a newer request has been queued since.
    pub fn apply_highlight(&mut self, payload: HighlightPayload) {
        if payload.generation != self.highlight_generation {
            return;
        }
        self.highlighted_generation = payload.generation;
        self.syntax_name = payload.syntax_name;
        self.editor_lines = payload.lines;
    }

    fn editor_line_count(&self) -> usize {
        self.session.code().split('\n').count()
    }

    fn diff_line_count(&self) -> usize {
        self.session.diff_lines().len()
    }

    /// Scrolls the focused panel down by `lines` rows.
    pub fn scroll_down(&mut self, lines: u16) {
        match self.focus {
            PanelFocus::Chat => {
                let max = self.chat_max_scroll();
                let from = if self.chat_follow { max } else { self.chat_scroll };
                self.chat_scroll = from.saturating_add(lines as usize).min(max);
                self.chat_follow = self.chat_scroll >= max;
            }
            PanelFocus::Editor => {
                let last = self.editor_line_count().saturating_sub(1);
                self.editor_scroll = self.editor_scroll.saturating_add(lines as usize).min(last);
            }
            PanelFocus::Diff => {
                let last = self.diff_line_count().saturating_sub(1);
                self.diff_scroll = self.diff_scroll.saturating_add(lines as usize).min(last);
            }
        }
    }

    /// Scrolls the focused panel up by `lines` rows.
    pub fn scroll_up(&mut self, lines: u16) {
        match self.focus {
            PanelFocus::Chat => {
                let from = if self.chat_follow { self.chat_max_scroll() } else { self.chat_scroll };
                self.chat_scroll = from.saturating_sub(lines as usize);
                self.chat_follow = false;
            }
            PanelFocus::Editor => {
                self.editor_scroll = self.editor_scroll.saturating_sub(lines as usize);
            }
            PanelFocus::Diff => {
                self.diff_scroll = self.diff_scroll.saturating_sub(lines as usize);
            }
        }
    }

    pub fn scroll_top(&mut self) {
        match self.focus {
            PanelFocus::Chat => {
                self.chat_scroll = 0;
                self.chat_follow = false;
            }
            PanelFocus::Editor => self.editor_scroll = 0,
            PanelFocus::Diff => self.diff_scroll = 0,
        }
    }

    pub fn scroll_bottom(&mut self) {
        match self.focus {
            PanelFocus::Chat => self.chat_follow = true,
            PanelFocus::Editor => {
                self.editor_scroll = self.editor_line_count().saturating_sub(1);
            }
            PanelFocus::Diff => {
                self.diff_scroll = self.diff_line_count().saturating_sub(1);
            }
        }
    }

    fn focused_viewport_height(&self) -> u16 {
        match self.focus {
            PanelFocus::Chat => self.chat_viewport_height,
            PanelFocus::Editor => self.editor_viewport_height,
            PanelFocus::Diff => self.diff_viewport_height,
        }
    }

    /// Half of the cached viewport height; at least one row so the first
    /// frame (height 0) still moves.
    pub fn half_page_down(&mut self) {
        self.scroll_down((self.focused_viewport_height() / 2).max(1));
    }

    pub fn half_page_up(&mut self) {
        self.scroll_up((self.focused_viewport_height() / 2).max(1));
    }

    pub fn full_page_down(&mut self) {
        self.scroll_down(self.focused_viewport_height().max(1));
    }

    pub fn full_page_up(&mut self) {
        self.scroll_up(self.focused_viewport_height().max(1));
    }

    /// First chat row that keeps the newest row at the bottom of the panel.
    fn chat_max_scroll(&self) -> usize {
        self.chat_row_count()
            .saturating_sub(self.chat_viewport_height as usize)
    }

    /// First visible chat row for the current frame.
    pub fn chat_visible_start(&self) -> usize {
        if self.chat_follow {
            self.chat_max_scroll()
        } else {
            self.chat_scroll.min(self.chat_max_scroll())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(EditorSession::new(), SelfTestReport::default())
    }

    #[test]
    fn focus_cycles_both_ways() {
        let f = PanelFocus::Chat;
        assert_eq!(f.next().next().next(), f);
        assert_eq!(f.prev(), PanelFocus::Diff);
        assert_eq!(f.next().prev(), f);
    }

    #[test]
    fn blank_input_is_not_sent() {
        let mut s = state();
        s.input = "   ".to_owned();
        assert!(!s.submit_input());
        assert!(s.session.messages().is_empty());
        assert!(s.input.is_empty());
    }

    #[test]
    fn submitted_input_is_trimmed() {
        let mut s = state();
        s.input = "  hi  ".to_owned();
        assert!(s.submit_input());
        assert_eq!(s.session.messages()[0].content, "hi");
    }

    #[test]
    fn write_file_requests_highlight_and_drops_stale_results() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut s = state();
        s.highlight_tx = Some(tx);

        s.input = r#"{"tool":"write_file","content":"fn main() {}","language":"rust"}"#.to_owned();
        s.submit_input();
        let request = rx.try_recv().unwrap();
        assert_eq!(request.code, "fn main() {}");
        assert_eq!(request.language, "rust");

        s.input = r#"{"tool":"write_file","content":"x"}"#.to_owned();
        s.submit_input();
        let stale = HighlightPayload {
            generation: request.generation,
            syntax_name: "Rust".into(),
            lines: vec![Line::raw("fn main() {}")],
        };
        s.apply_highlight(stale);
        assert!(!s.highlight_is_current());

        let fresh = HighlightPayload {
            generation: s.highlight_generation,
            syntax_name: "JavaScript".into(),
            lines: vec![Line::raw("x")],
        };
        s.apply_highlight(fresh);
        assert!(s.highlight_is_current());
        assert_eq!(s.syntax_name, "JavaScript");
    }

    #[test]
    fn echo_does_not_rehighlight() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut s = state();
        s.highlight_tx = Some(tx);
        s.input = "hello".to_owned();
        s.submit_input();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn paste_flattens_newlines() {
        let mut s = state();
        s.input.push_str("say ");
        s.paste("a\r\nb");
        assert_eq!(s.input, "say a  b");
    }

    #[test]
    fn chat_scroll_follows_tail_until_scrolled_up() {
        let mut s = state();
        s.chat_viewport_height = 2;
        for i in 0..3 {
            s.input = format!("msg {i}");
            s.submit_input();
        }
        // Three sends, each a user row plus a two-row echo.
        assert_eq!(s.chat_row_count(), 9);
        assert_eq!(s.chat_visible_start(), 7);

        s.scroll_up(3);
        assert!(!s.chat_follow);
        assert_eq!(s.chat_visible_start(), 4);

        s.scroll_down(10);
        assert!(s.chat_follow);
        assert_eq!(s.chat_visible_start(), 7);
    }

    #[test]
    fn chat_row_count_tracks_wrapped_width() {
        let mut s = state();
        s.input = "msg 0".to_owned();
        s.submit_input();
        assert_eq!(s.chat_row_count(), 3, "unwrapped before the first render");

        // 19 text columns after "Assistant: "; the 65-char hint takes 4 rows.
        s.chat_viewport_width = 30;
        s.chat_viewport_height = 2;
        assert_eq!(s.chat_row_count(), 6);
        assert_eq!(s.chat_visible_start(), 4);
    }

    #[test]
    fn snapshot_then_compare_shows_unchanged_buffer() {
        let mut s = state();
        s.focus = PanelFocus::Diff;
        s.take_snapshot();
        s.compare();
        let diff = s.session.diff_text();
        assert!(!diff.lines().any(|l| l.starts_with(['+', '-'])));
        s.scroll_bottom();
        assert_eq!(s.diff_scroll, s.session.diff_lines().len() - 1);
    }
}
