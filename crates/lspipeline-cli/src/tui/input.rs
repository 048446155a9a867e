//! Keyboard listener thread.

use std::thread::JoinHandle;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// How long each `event::poll` waits before re-checking the token.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Esc quits. Raw mode swallows SIGINT, so Ctrl+C quits too.
pub fn is_cancel_key(key: &KeyEvent) -> bool {
    // Windows emits Press + Release per keystroke
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Spawn the listener on a dedicated OS thread.
///
/// The thread cancels `cancel` when a cancel key arrives and exits. It also
/// exits once `cancel` is cancelled from elsewhere. It never touches the
/// screen.
pub fn spawn_listener(cancel: CancellationToken) -> JoinHandle<()> {
    std::thread::spawn(move || listen(&cancel))
}

/// Wait for the listener to exit without blocking a runtime worker.
///
/// The thread only notices cancellation between polls, so this can take up
/// to one [`POLL_INTERVAL`].
pub async fn join_listener(handle: JoinHandle<()>) {
    match tokio::task::spawn_blocking(move || handle.join()).await {
        Ok(Ok(())) => {}
        Ok(Err(_)) => warn!("Input thread panicked"),
        Err(e) => warn!(%e, "Failed to join input thread"),
    }
}

fn listen(cancel: &CancellationToken) {
    while !cancel.is_cancelled() {
        match event::poll(POLL_INTERVAL) {
            Ok(false) => {}
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if is_cancel_key(&key) => {
                    debug!(?key.code, "Cancel key pressed");
                    cancel.cancel();
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(?e, "Terminal input failed, stopping dashboard");
                    cancel.cancel();
                }
            },
            Err(e) => {
                warn!(?e, "Terminal input failed, stopping dashboard");
                cancel.cancel();
            }
        }
    }
}
