//! Background thread that highlights the editor buffer with syntect.
//!
//! The worker drains its queue before each job so that a burst of edits only
//! costs one highlight pass for the newest buffer.

use std::sync::LazyLock;

use crossbeam_channel::Receiver;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::{SyntaxReference, SyntaxSet};
use tokio::sync::mpsc::UnboundedSender;

use crate::event::AppEvent;
use crate::highlight::{HighlightPayload, HighlightRequest};

static PS: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static TS: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const SYNTECT_THEME: &str = "base16-ocean.dark";

/// Entry point for the highlight thread.
///
/// Runs until every request sender is dropped. Results go back through
/// `event_tx`; if the main loop is gone the thread exits.
pub fn highlight_worker_loop(rx: Receiver<HighlightRequest>, event_tx: UnboundedSender<AppEvent>) {
    // Load the syntax and theme sets up front instead of on the first request.
    let _ = &*PS;
    let _ = &*TS;

    while let Ok(first) = rx.recv() {
        let request = rx.try_iter().last().unwrap_or(first);
        let payload = highlight_code(request.generation, &request.code, &request.language);
        tracing::debug!(
            generation = payload.generation,
            syntax = %payload.syntax_name,
            lines = payload.lines.len(),
            "buffer highlighted"
        );
        if event_tx.send(AppEvent::Highlighted(Box::new(payload))).is_err() {
            break;
        }
    }
}

/// Maps an editor language identifier to a syntect syntax.
///
/// The default syntax set has no TypeScript grammar, so TypeScript and JSX
/// variants use JavaScript. Anything unknown is plain text.
pub fn resolve_syntax<'a>(ps: &'a SyntaxSet, language: &str) -> &'a SyntaxReference {
    let token = match language.to_ascii_lowercase().as_str() {
        "typescript" | "ts" | "tsx" | "javascript" | "jsx" | "js" => "js".to_owned(),
        other => other.to_owned(),
    };
    if token.is_empty() {
        return ps.find_syntax_plain_text();
    }
    ps.find_syntax_by_token(&token).unwrap_or_else(|| ps.find_syntax_plain_text())
}

/// Highlights `code` line by line. One output line per `'\n'`-separated
/// source line, matching how the editor panel numbers lines.
pub fn highlight_code(generation: u64, code: &str, language: &str) -> HighlightPayload {
    let syntax = resolve_syntax(&PS, language);
    let theme = TS.themes.get(SYNTECT_THEME).or_else(|| TS.themes.values().next());

    let lines = match theme {
        Some(theme) => {
            let mut h = HighlightLines::new(syntax, theme);
            code.split('\n')
                .map(|line| Line::from(build_syntect_spans(line, &mut h, &PS)))
                .collect()
        }
        None => code.split('\n').map(|line| Line::raw(line.to_owned())).collect(),
    };

    HighlightPayload { generation, syntax_name: syntax.name.clone(), lines }
}

/// Converts a syntect style to an owned ratatui span.
///
/// Built by hand instead of through syntect-tui so the span uses this
/// crate's ratatui version.
fn syntect_to_span(style: syntect::highlighting::Style, content: &str) -> Span<'static> {
    use syntect::highlighting::{Color as SC, FontStyle};
    let to_color = |c: SC| -> Option<Color> {
        if c.a > 0 { Some(Color::Rgb(c.r, c.g, c.b)) } else { None }
    };
    let mut ratatui_style = Style::default();
    if let Some(fg) = to_color(style.foreground) {
        ratatui_style = ratatui_style.fg(fg);
    }
    if style.font_style.contains(FontStyle::BOLD) {
        ratatui_style = ratatui_style.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        ratatui_style = ratatui_style.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        ratatui_style = ratatui_style.add_modifier(Modifier::UNDERLINED);
    }
    Span::styled(content.to_owned(), ratatui_style)
}

/// Highlights one source line (without its newline).
///
/// The newline-aware syntax set expects each line to end in `'\n'`, so one
/// is appended for the highlighter and stripped from the spans. Falls back to
/// a plain span on error.
fn build_syntect_spans(line: &str, h: &mut HighlightLines, ps: &SyntaxSet) -> Vec<Span<'static>> {
    let with_newline = format!("{line}\n");
    let ranges = h.highlight_line(&with_newline, ps).unwrap_or_default();
    let spans: Vec<Span<'static>> = ranges
        .into_iter()
        .map(|(style, text)| (style, text.trim_end_matches('\n')))
        .filter(|(_, text)| !text.is_empty())
        .map(|(style, text)| syntect_to_span(style, text))
        .collect();
    if spans.is_empty() {
        vec![Span::raw(line.to_owned())]
    } else {
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn typescript_uses_javascript_grammar() {
        assert_eq!(resolve_syntax(&PS, "typescript").name, "JavaScript");
        assert_eq!(resolve_syntax(&PS, "TSX").name, "JavaScript");
    }

    #[test]
    fn known_and_unknown_languages() {
        assert_eq!(resolve_syntax(&PS, "go").name, "Go");
        assert_eq!(resolve_syntax(&PS, "rust").name, "Rust");
        assert_eq!(resolve_syntax(&PS, "no-such-language").name, "Plain Text");
        assert_eq!(resolve_syntax(&PS, "").name, "Plain Text");
    }

    #[test]
    fn one_line_per_source_line_with_text_preserved() {
        let code = "package main\n\nfunc main() {}\n";
        let payload = highlight_code(7, code, "go");
        assert_eq!(payload.generation, 7);
        assert_eq!(payload.lines.len(), 4);
        let texts: Vec<String> = payload.lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["package main", "", "func main() {}", ""]);
    }

    #[test]
    fn worker_answers_latest_request() {
        let (req_tx, req_rx) = crossbeam_channel::unbounded();
        let (event_tx, mut event_rx) = tokio::sync::mpsc::unbounded_channel();
        req_tx
            .send(HighlightRequest { generation: 1, code: "a".into(), language: "txt".into() })
            .unwrap();
        req_tx
            .send(HighlightRequest { generation: 2, code: "b".into(), language: "txt".into() })
            .unwrap();
        drop(req_tx);

        highlight_worker_loop(req_rx, event_tx);

        let mut generations = Vec::new();
        while let Ok(AppEvent::Highlighted(payload)) = event_rx.try_recv() {
            generations.push(payload.generation);
        }
        assert_eq!(generations.last(), Some(&2));
    }
}
