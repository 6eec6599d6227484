//! Event handling for TUI

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::debug;

/// Application events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard event
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Animation frame with the time elapsed since the previous one
    Frame(Duration),
}

/// Terminal input plus a steady frame clock, merged into one channel.
///
/// Frames come from a tokio interval and carry their measured delta, so the
/// animations never read the clock themselves. Input is read on a blocking
/// thread that only ever waits on the terminal.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    frames: tokio::task::JoinHandle<()>,
    stop: Arc<AtomicBool>,
}

impl EventHandler {
    pub fn new(frame_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel(100);
        let stop = Arc::new(AtomicBool::new(false));

        let frames = tokio::spawn(frame_clock(frame_rate, tx.clone()));

        let reader_stop = stop.clone();
        tokio::task::spawn_blocking(move || read_input(frame_rate, tx, reader_stop));

        Self { rx, frames, stop }
    }

    /// Get the next event
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.frames.abort();
        self.stop.store(true, Ordering::Relaxed);
    }
}

async fn frame_clock(frame_rate: Duration, tx: mpsc::Sender<AppEvent>) {
    let mut ticker = interval(frame_rate);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last = Instant::now();

    loop {
        let now = ticker.tick().await;
        let dt = now.saturating_duration_since(last);
        last = now;
        if tx.send(AppEvent::Frame(dt)).await.is_err() {
            break;
        }
    }
}

fn read_input(poll_timeout: Duration, tx: mpsc::Sender<AppEvent>, stop: Arc<AtomicBool>) {
    while !stop.load(Ordering::Relaxed) {
        match event::poll(poll_timeout) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                debug!(error = %e, "terminal poll failed");
                break;
            }
        }
        let Ok(evt) = event::read() else {
            continue;
        };
        if let Some(app_event) = translate(evt) {
            if tx.blocking_send(app_event).is_err() {
                break;
            }
        }
    }
}

/// Map a terminal event to the events the app reacts to.
///
/// Key releases are dropped; some platforms report them alongside presses.
pub fn translate(evt: CrosstermEvent) -> Option<AppEvent> {
    match evt {
        CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => Some(AppEvent::Key(key)),
        CrosstermEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

/// Ctrl+C always quits, even while typing
pub fn is_interrupt_key(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Helper to check for quit key combinations outside text input
pub fn is_quit_key(key: &KeyEvent) -> bool {
    is_interrupt_key(key)
        || matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('q'),
                modifiers: KeyModifiers::NONE,
                ..
            }
        )
}

/// Helper to check for back/escape key
pub fn is_back_key(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Esc,
            ..
        } | KeyEvent {
            code: KeyCode::Backspace,
            modifiers: KeyModifiers::NONE,
            ..
        }
    )
}
