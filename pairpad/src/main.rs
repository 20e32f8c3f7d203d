//! pairpad: a chat-driven code buffer with snapshot and diff in the terminal.
//!
//! # Startup sequence
//!
//! 1. Load `config.toml` (soft failure: defaults are used).
//! 2. Start file logging under `.pairpad/` so nothing is written to the
//!    terminal the TUI draws on.
//! 3. Run the diff self-test once and log the report.
//! 4. `install_panic_hook()`, then `register_sigterm()`, then `init_tui()`.
//! 5. Spawn the event task and the highlight worker thread.
//!
//! `restore_tui()` runs after the event loop exits. Nothing inside the loop
//! uses `?`: a failed draw is logged and leaves via `break`, so the terminal
//! is always restored.

mod app;
mod config;
mod event;
mod highlight;
mod theme;
mod tui;
mod ui;

use std::fs::OpenOptions;
use std::sync::atomic::Ordering;
use std::sync::Mutex;

use pairpad_core::{selftest, EditorSession};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::ui::keybindings::{self, KeyAction};

const LOG_DIR: &str = ".pairpad";
const LOG_FILE: &str = ".pairpad/pairpad.log";

/// Sends `tracing` output to `.pairpad/pairpad.log`.
///
/// `PAIRPAD_LOG` overrides the configured filter.
fn init_logging(default_filter: &str) -> std::io::Result<()> {
    std::fs::create_dir_all(LOG_DIR)?;
    let file = OpenOptions::new().create(true).append(true).open(LOG_FILE)?;
    let filter = EnvFilter::try_from_env("PAIRPAD_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config_path = config::config_path();
    let (config, config_err) = match Config::load_from(&config_path) {
        Ok(c) => (c, None),
        Err(e) => (Config::default(), Some(e)),
    };

    init_logging(&config.log_filter)?;
    tracing::info!(config = %config_path.display(), "pairpad starting");
    if let Some(err) = config_err {
        tracing::warn!(%err, "using default configuration");
    }

    let report = selftest::run();
    tracing::info!(
        passed = report.passed(),
        total = report.total(),
        "diff self-test\n{report}"
    );
    for failure in report.failures() {
        tracing::warn!(check = failure.name, "self-test check failed");
    }

    let theme = theme::Theme::from_name(&config.theme);
    let mut state = app::AppState::new(EditorSession::with_language(config.language.clone()), report);

    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;
    let mut terminal = tui::init_tui()?;

    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());

    let (highlight_tx, highlight_rx) = crossbeam_channel::unbounded();
    let worker_tx = handler.tx.clone();
    std::thread::spawn(move || highlight::worker::highlight_worker_loop(highlight_rx, worker_tx));
    state.highlight_tx = Some(highlight_tx);
    state.request_highlight();

    let mut rx = handler.rx;

    // Exits only via `break` so `restore_tui()` below always runs.
    'event_loop: loop {
        tokio::select! {
            // Heartbeat so SIGTERM is noticed even when no events arrive.
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(event::AppEvent::Render) => {
                        if let Err(err) = terminal.draw(|frame| ui::render(frame, &mut state, &theme)) {
                            tracing::error!(%err, "draw failed");
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Key(key)) => {
                        if keybindings::handle_key(key, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Mouse(mouse)) => {
                        keybindings::handle_mouse(mouse, &mut state);
                    }
                    Some(event::AppEvent::Paste(text)) => {
                        if state.mode == app::Mode::Input {
                            state.paste(&text);
                        }
                    }
                    Some(event::AppEvent::Highlighted(payload)) => {
                        state.apply_highlight(*payload);
                    }
                    Some(event::AppEvent::Resize(cols, rows)) => {
                        // Layout is recomputed from frame.area() on the next draw.
                        tracing::debug!(cols, rows, "terminal resized");
                    }
                    Some(event::AppEvent::Quit) | None => break 'event_loop,
                }
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    tui::restore_tui()?;
    tracing::info!(messages = state.session.messages().len(), "pairpad exiting");
    Ok(())
}
