//! Editor session state machine.
//!
//! An [`EditorSession`] is the single owner of the code buffer, its language,
//! the snapshot, the last rendered diff, and the chat history. All changes go
//! through [`EditorSession::apply`], a pure `(state, action) -> (state,
//! appended messages)` transition; `send`, `snapshot`, and `compare` are thin
//! in-place wrappers for the event loop.

use crate::command::{self, ToolCall, DEFAULT_LANGUAGE};
use crate::diff;
use crate::types::{ChatMessage, DiffLine};

/// Buffer contents at the start of every session.
pub const STARTER_CODE: &str = "export function hello(name: string){\n  return \"Hello, \" + name;\n}\n\nconsole.log(hello('world'));";

/// Appended to every echoed chat line.
pub const ECHO_HINT: &str = "Try sending a tool call JSON to update the editor or show a diff.";

/// Assistant reply to a snapshot.
pub const SNAPSHOT_ACK: &str = "Snapshot taken. Use \"Compare\" to diff.";

/// System instruction handed to completion collaborators.
pub const SYSTEM_PROMPT: &str = "You are a coding copilot that can update an in-page editor or render diffs.\n\
Prefer tool calls over plain text when changing files.\n\
Tools available:\n\
- write_file(path, language, content): overwrites the visible file and sets editor language.\n\
- show_diff(from, to, file?): renders a human-friendly diff between \"from\" and \"to\" for preview.\n\
When producing normal chat explanations, also summarize what changed.";

/// A user-initiated session action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A submitted chat line.
    Send(String),
    /// Copy the buffer into the snapshot slot.
    Snapshot,
    /// Diff the snapshot against the buffer. Appends no message.
    Compare,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSession {
    code: String,
    language: String,
    previous_code: String,
    diff_text: String,
    messages: Vec<ChatMessage>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    /// Seeds the buffer and snapshot with [`STARTER_CODE`].
    pub fn new() -> Self {
        Self::with_language(DEFAULT_LANGUAGE)
    }

    /// Like [`EditorSession::new`] with a different initial language.
    pub fn with_language(language: impl Into<String>) -> Self {
        Self {
            code: STARTER_CODE.to_owned(),
            language: language.into(),
            previous_code: STARTER_CODE.to_owned(),
            diff_text: String::new(),
            messages: Vec::new(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn previous_code(&self) -> &str {
        &self.previous_code
    }

    /// Last rendered diff; empty until a diff-producing action runs.
    pub fn diff_text(&self) -> &str {
        &self.diff_text
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Classified view of [`EditorSession::diff_text`], or nothing when no
    /// diff has been produced yet.
    pub fn diff_lines(&self) -> Vec<DiffLine> {
        if self.diff_text.is_empty() {
            return Vec::new();
        }
        diff::diff_lines(&self.diff_text)
    }

    /// Applies one action and returns the new state with the messages it
    /// appended, in order.
    pub fn apply(mut self, action: Action) -> (Self, Vec<ChatMessage>) {
        let start = self.messages.len();
        match action {
            Action::Send(text) => {
                let call = command::parse(&text);
                self.messages.push(ChatMessage::user(text));
                self.run_tool_call(call);
            }
            Action::Snapshot => {
                self.previous_code.clone_from(&self.code);
                tracing::info!(chars = self.code.chars().count(), "snapshot taken");
                self.messages.push(ChatMessage::assistant(SNAPSHOT_ACK));
            }
            Action::Compare => {
                self.diff_text = diff::unified_diff(&self.previous_code, &self.code);
                tracing::info!(lines = self.diff_text.lines().count(), "compared snapshot");
            }
        }
        let appended = self.messages[start..].to_vec();
        (self, appended)
    }

    pub fn send(&mut self, text: impl Into<String>) -> Vec<ChatMessage> {
        self.apply_in_place(Action::Send(text.into()))
    }

    pub fn snapshot(&mut self) -> Vec<ChatMessage> {
        self.apply_in_place(Action::Snapshot)
    }

    pub fn compare(&mut self) -> Vec<ChatMessage> {
        self.apply_in_place(Action::Compare)
    }

    fn apply_in_place(&mut self, action: Action) -> Vec<ChatMessage> {
        let (next, appended) = std::mem::take(self).apply(action);
        *self = next;
        appended
    }

    fn run_tool_call(&mut self, call: ToolCall) {
        match call {
            ToolCall::WriteFile { content, language } => {
                let chars = content.encode_utf16().count();
                let suffix = match language.as_deref() {
                    Some(lang) if !lang.is_empty() => format!(" (lang: {lang})"),
                    _ => String::new(),
                };
                self.language = language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned());
                self.code = content;
                tracing::info!(chars, language = %self.language, "write_file applied");
                self.messages
                    .push(ChatMessage::assistant(format!("Wrote {chars} chars{suffix}.")));
            }
            ToolCall::ShowDiff { from, to, file } => {
                self.diff_text = diff::unified_diff(&from, &to);
                tracing::info!(%file, "show_diff applied");
                self.messages
                    .push(ChatMessage::assistant(format!("Showing diff for {file}.")));
            }
            ToolCall::Echo { text } => {
                tracing::debug!("echoing chat line");
                self.messages
                    .push(ChatMessage::assistant(format!("You said: {text}\n{ECHO_HINT}")));
            }
        }
    }
}
