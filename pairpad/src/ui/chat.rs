//! Chat history panel and the input line below it.

use pairpad_core::{ChatMessage, Role};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use crate::app::{AppState, Mode, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

const TIP_EXAMPLE: &str =
    r#"{"tool":"show_diff","from":"console.log('a')","to":"console.log('b')","file":"demo.ts"}"#;

/// Renders the chat history, newest rows at the bottom while following.
pub fn render_chat(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let count = state.session.messages().len();
    let title = if count > 0 { format!("Chat ({count})") } else { "Chat".to_owned() };
    let block = panel_block(title, state.focus == PanelFocus::Chat, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    if count == 0 {
        let hint = Style::default().fg(theme.hint);
        let tip = vec![
            ListItem::new(Line::styled("Tip: send a tool call JSON like:", hint)),
            ListItem::new(Line::styled(TIP_EXAMPLE, hint.add_modifier(Modifier::ITALIC))),
        ];
        frame.render_widget(List::new(tip), inner);
        return;
    }

    let rows: Vec<Line<'static>> = state
        .session
        .messages()
        .iter()
        .flat_map(|m| message_rows(m, inner.width as usize, theme))
        .collect();
    let start = state.chat_visible_start().min(rows.len());
    let end = (start + inner.height as usize).min(rows.len());

    let items: Vec<ListItem> = rows[start..end].iter().cloned().map(ListItem::new).collect();
    frame.render_widget(List::new(items), inner);
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "You: ",
        Role::Assistant => "Assistant: ",
    }
}

/// Splits `content` into display rows: one per `\n`-separated line, each
/// broken into pieces of at most `width` characters. `width == 0` means
/// unbounded.
fn wrap_content(content: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    for line in content.split('\n') {
        if width == 0 || line.is_empty() {
            rows.push(line.to_owned());
            continue;
        }
        let chars: Vec<char> = line.chars().collect();
        rows.extend(chars.chunks(width).map(|chunk| chunk.iter().collect::<String>()));
    }
    rows
}

fn text_width(label: &str, panel_width: usize) -> usize {
    if panel_width == 0 {
        0
    } else {
        panel_width.saturating_sub(label.len()).max(1)
    }
}

/// Number of rows `message_rows` produces for `message` at `panel_width`.
pub fn message_row_count(message: &ChatMessage, panel_width: usize) -> usize {
    let label = role_label(message.role);
    wrap_content(&message.content, text_width(label, panel_width)).len()
}

/// Wrapped rows of one message. The role label is shown on the first row
/// and continuation rows are indented to line up with it.
fn message_rows(message: &ChatMessage, panel_width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let label = role_label(message.role);
    let color = match message.role {
        Role::User => theme.chat_user,
        Role::Assistant => theme.chat_assistant,
    };
    let indent = " ".repeat(label.len());
    wrap_content(&message.content, text_width(label, panel_width))
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let lead = if i == 0 {
                Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD))
            } else {
                Span::raw(indent.clone())
            };
            Line::from(vec![lead, Span::raw(text)])
        })
        .collect()
}

/// Renders the input box. In input mode the terminal cursor is placed after
/// the typed text; long input scrolls so its tail stays visible.
pub fn render_input(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let typing = state.mode == Mode::Input;
    let block = panel_block("Message", typing, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    if state.input.is_empty() && !typing {
        let placeholder = Line::styled(
            "Type a message or a tool call JSON… (press i)",
            Style::default().fg(theme.hint),
        );
        frame.render_widget(Paragraph::new(placeholder), inner);
        return;
    }

    let width = inner.width.saturating_sub(1) as usize;
    let len = state.input.chars().count();
    let skip = len.saturating_sub(width);
    let visible: String = state.input.chars().skip(skip).collect();
    let cursor_x = inner.x + (len - skip) as u16;

    frame.render_widget(Paragraph::new(visible), inner);
    if typing && inner.height > 0 {
        frame.set_cursor_position(Position { x: cursor_x, y: inner.y });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairpad_core::selftest::SelfTestReport;
    use pairpad_core::EditorSession;
    use ratatui::{Terminal, backend::TestBackend};

    fn row_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn multi_line_message_is_indented_under_label() {
        let theme = Theme::dark();
        let rows = message_rows(&ChatMessage::assistant("You said: hi\nTry it"), 0, &theme);
        let texts: Vec<String> = rows.iter().map(row_text).collect();
        assert_eq!(texts, vec!["Assistant: You said: hi", "           Try it"]);
    }

    #[test]
    fn user_rows_use_user_color() {
        let theme = Theme::dark();
        let rows = message_rows(&ChatMessage::user("hello"), 40, &theme);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].spans[0].style.fg, Some(theme.chat_user));
    }

    #[test]
    fn long_rows_wrap_under_the_label() {
        let theme = Theme::dark();
        let rows = message_rows(&ChatMessage::user("abcdefghij"), 9, &theme);
        let texts: Vec<String> = rows.iter().map(row_text).collect();
        assert_eq!(texts, vec!["You: abcd", "     efgh", "     ij"]);
        assert_eq!(message_row_count(&ChatMessage::user("abcdefghij"), 9), 3);
    }

    #[test]
    fn long_tool_call_is_fully_visible() {
        let mut state = AppState::new(EditorSession::new(), SelfTestReport::default());
        state.input = TIP_EXAMPLE.to_owned();
        assert!(state.submit_input());

        let (width, height) = (50u16, 12u16);
        state.chat_viewport_width = width - 2;
        state.chat_viewport_height = height - 2;
        let theme = Theme::dark();
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal
            .draw(|frame| render_chat(frame, frame.area(), &state, &theme))
            .expect("draw");

        let buffer = terminal.backend().buffer();
        let mut shown = String::new();
        for y in 1..height - 1 {
            for x in 1..width - 1 {
                shown.push_str(buffer[(x, y)].symbol());
            }
        }
        let shown: String = shown.chars().filter(|c| !c.is_whitespace()).collect();
        assert!(
            shown.contains(TIP_EXAMPLE),
            "the whole tool call should be on screen, got {shown:?}"
        );
        assert!(shown.contains("Assistant:Showingdiffforde"), "reply rows follow the call");
    }
}
