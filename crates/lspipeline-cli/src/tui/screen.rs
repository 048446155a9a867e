//! Terminal surface ownership.

use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use lspipeline_core::RenderError;
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, warn};

/// Something frames can be drawn on.
///
/// `init` must be idempotent. `finalize` restores whatever `init` changed
/// and is a no-op when called again.
pub trait Surface {
    fn init(&mut self) -> Result<(), RenderError>;

    fn draw<F>(&mut self, render: F) -> Result<(), RenderError>
    where
        F: FnOnce(&mut Frame<'_>);

    fn finalize(&mut self) -> Result<(), RenderError>;
}

static SCREEN_ACQUIRED: AtomicBool = AtomicBool::new(false);

/// The process's one handle on the real terminal.
///
/// Raw mode and the alternate screen are entered lazily on first use and
/// left on [`Surface::finalize`] or drop.
pub struct TerminalScreen {
    terminal: Option<Terminal<CrosstermBackend<Stdout>>>,
}

impl TerminalScreen {
    /// Take the terminal. Fails if a handle was already taken in this process.
    pub fn acquire() -> Result<Self, RenderError> {
        if SCREEN_ACQUIRED.swap(true, Ordering::SeqCst) {
            return Err(RenderError::AlreadyAcquired);
        }
        Ok(Self { terminal: None })
    }
}

impl Surface for TerminalScreen {
    fn init(&mut self) -> Result<(), RenderError> {
        if self.terminal.is_some() {
            return Ok(());
        }

        enable_raw_mode().map_err(|e| RenderError::Init(e.to_string()))?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(RenderError::Init(e.to_string()));
        }
        let mut terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(t) => t,
            Err(e) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                return Err(RenderError::Init(e.to_string()));
            }
        };
        if let Err(e) = terminal.hide_cursor() {
            warn!(?e, "Could not hide cursor");
        }

        debug!("Terminal initialized");
        self.terminal = Some(terminal);
        Ok(())
    }

    fn draw<F>(&mut self, render: F) -> Result<(), RenderError>
    where
        F: FnOnce(&mut Frame<'_>),
    {
        self.init()?;
        let Some(terminal) = self.terminal.as_mut() else {
            return Err(RenderError::Draw("terminal not initialized".to_string()));
        };
        terminal
            .draw(render)
            .map_err(|e| RenderError::Draw(e.to_string()))?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), RenderError> {
        let Some(mut terminal) = self.terminal.take() else {
            return Ok(());
        };

        let raw = disable_raw_mode();
        let screen = execute!(terminal.backend_mut(), LeaveAlternateScreen);
        let cursor = terminal.show_cursor();
        debug!("Terminal restored");

        raw.and(screen)
            .and(cursor)
            .map_err(|e| RenderError::Finalize(e.to_string()))
    }
}

impl Drop for TerminalScreen {
    fn drop(&mut self) {
        if let Err(e) = self.finalize() {
            warn!(%e, "Terminal restore on drop failed");
        }
    }
}
