//! Event bus for pairpad.
//!
//! Terminal input, render ticks, and highlight-worker results are normalised
//! into one `AppEvent` enum and sent over a tokio unbounded channel. The main
//! loop receives from it and dispatches one event at a time, so every session
//! transition finishes before the next event is looked at.
//!
//! A 33 ms render interval (≈ 30 FPS) triggers `terminal.draw()`.

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

use crate::highlight::HighlightPayload;

/// All events the application can receive from any source.
#[derive(Debug)]
#[non_exhaustive]
pub enum AppEvent {
    /// A key press (`KeyEventKind::Press` only; release/repeat are dropped).
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Bracketed paste into the terminal.
    Paste(String),
    /// Terminal was resized to (columns, rows).
    Resize(u16, u16),
    Render,
    /// Highlighted editor lines from the highlight worker thread.
    Highlighted(Box<HighlightPayload>),
    Quit,
}

/// Holds both ends of the event channel.
///
/// `tx` is cloned into every producer; `rx` is owned by the main loop.
pub struct EventHandler {
    pub tx: mpsc::UnboundedSender<AppEvent>,
    pub rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns the tokio task that feeds terminal input and render ticks into `tx`.
///
/// `reader.next().fuse()` keeps `select!` from polling a finished stream.
/// Send errors are ignored: once the receiver is gone the loop has exited.
pub fn spawn_event_task(tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut render_interval = interval(Duration::from_millis(33));
        let mut reader = EventStream::new();

        loop {
            let render_tick = render_interval.tick();
            let crossterm_event = reader.next().fuse();

            tokio::select! {
                _ = render_tick => {
                    let _ = tx.send(AppEvent::Render);
                }
                maybe_event = crossterm_event => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) => {
                            if key.kind == KeyEventKind::Press {
                                let _ = tx.send(AppEvent::Key(key));
                            }
                        }
                        Some(Ok(Event::Paste(text))) => {
                            let _ = tx.send(AppEvent::Paste(text));
                        }
                        Some(Ok(Event::Resize(w, h))) => {
                            let _ = tx.send(AppEvent::Resize(w, h));
                        }
                        Some(Ok(Event::Mouse(mouse))) => {
                            let _ = tx.send(AppEvent::Mouse(mouse));
                        }
                        Some(Err(err)) => {
                            tracing::warn!(%err, "terminal event stream error");
                        }
                        None => {
                            let _ = tx.send(AppEvent::Quit);
                            break;
                        }
                        _ => {}
                    }
                }
            }
        }
    });
}
