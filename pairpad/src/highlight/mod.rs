//! Syntax highlighting for the editor panel.
//!
//! A background `std::thread` owns the syntect syntax and theme sets and turns
//! buffer snapshots into styled ratatui lines. Requests go in over a
//! crossbeam channel; results come back as `AppEvent::Highlighted`.

pub mod worker;

/// Owned copy of the buffer sent to the worker.
#[derive(Debug, Clone)]
pub struct HighlightRequest {
    /// Increases with every buffer or language change; stale results are dropped.
    pub generation: u64,
    pub code: String,
    pub language: String,
}

/// Highlighted buffer, one `Line` per source line.
#[derive(Debug)]
pub struct HighlightPayload {
    pub generation: u64,
    /// Name of the syntect syntax that was used, e.g. `"Go"` or `"Plain Text"`.
    pub syntax_name: String,
    pub lines: Vec<ratatui::text::Line<'static>>,
}
