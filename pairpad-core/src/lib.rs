//! Core of pairpad: chat-line command decoding, the positional line diff,
//! diff-line classification, and the editor session state machine.
//!
//! Nothing here performs I/O. The terminal front end lives in the `pairpad`
//! crate and drives an [`EditorSession`] from its event loop.

pub mod command;
pub mod diff;
pub mod selftest;
pub mod session;
pub mod types;

pub use command::{parse, CommandError, ToolCall};
pub use diff::{classify, diff_lines, unified_diff};
pub use session::{Action, EditorSession};
pub use types::{ChatMessage, DiffLine, DiffLineKind, Role};
