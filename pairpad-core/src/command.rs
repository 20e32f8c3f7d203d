//! Chat-line command decoding.
//!
//! A chat line is either a JSON tool call or plain chat. Decoding is strict
//! (`decode` returns a typed error) but `parse` is total: every failure is
//! downgraded to [`ToolCall::Echo`] here and nowhere else.

use serde::Deserialize;

/// Language used when a `write_file` call does not name one.
pub const DEFAULT_LANGUAGE: &str = "typescript";

/// File label used when a `show_diff` call does not name one.
pub const DEFAULT_DIFF_FILE: &str = "snippet.ts";

/// A decoded chat line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    /// Replace the editor buffer. `language` is `None` when the call omitted it.
    WriteFile { content: String, language: Option<String> },
    /// Render a diff between two texts. `file` is only used for the reply.
    ShowDiff { from: String, to: String, file: String },
    /// Anything that is not a recognised tool call.
    Echo { text: String },
}

/// Why a chat line is not a tool call. Never shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("invalid tool call JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("not a tool call object")]
    NotACommand,

    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

/// Wire shape of a tool call, tagged by the `tool` field.
#[derive(Debug, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
enum RawCommand {
    WriteFile {
        #[serde(default)]
        content: Option<String>,
        #[serde(default)]
        language: Option<String>,
    },
    ShowDiff {
        #[serde(default)]
        from: Option<String>,
        #[serde(default)]
        to: Option<String>,
        #[serde(default)]
        file: Option<String>,
    },
}

const KNOWN_TOOLS: [&str; 2] = ["write_file", "show_diff"];

/// Strictly decodes `input` as a tool call.
///
/// Missing or `null` optional fields are filled with their defaults; a field
/// of the wrong type is a decode error.
pub fn decode(input: &str) -> Result<ToolCall, CommandError> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    let tool = value
        .as_object()
        .and_then(|obj| obj.get("tool"))
        .and_then(|tool| tool.as_str())
        .ok_or(CommandError::NotACommand)?;
    if !KNOWN_TOOLS.contains(&tool) {
        return Err(CommandError::UnknownTool(tool.to_owned()));
    }

    let call = match serde_json::from_value::<RawCommand>(value)? {
        RawCommand::WriteFile { content, language } => ToolCall::WriteFile {
            content: content.unwrap_or_default(),
            language,
        },
        RawCommand::ShowDiff { from, to, file } => ToolCall::ShowDiff {
            from: from.unwrap_or_default(),
            to: to.unwrap_or_default(),
            file: file.unwrap_or_else(|| DEFAULT_DIFF_FILE.to_owned()),
        },
    };
    Ok(call)
}

/// Interprets one chat line. Never fails: anything that does not decode as a
/// tool call becomes `Echo` carrying the original input.
pub fn parse(input: &str) -> ToolCall {
    match decode(input) {
        Ok(call) => call,
        Err(err) => {
            tracing::debug!(%err, "chat line is not a tool call");
            ToolCall::Echo { text: input.to_owned() }
        }
    }
}
