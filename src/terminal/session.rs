//! Terminal session: raw mode and the alternate screen for the editor's
//! lifetime.

use crate::error::{Error, Result};
use crate::render::Viewport;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Owns the terminal configuration while the editor runs.
///
/// Entering raw mode and the alternate screen happens in
/// [`TerminalSession::start`]; dropping the session restores the terminal,
/// including on early returns and panics that unwind.
#[derive(Debug)]
pub struct TerminalSession {
    /// Whether the alternate screen was entered.
    alternate_screen: bool,
}

impl TerminalSession {
    /// Switch the terminal into raw mode with bracketed paste, optionally on
    /// the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Terminal`] if the terminal cannot be configured.
    pub fn start(alternate_screen: bool) -> Result<Self> {
        terminal::enable_raw_mode().map_err(Error::Terminal)?;

        // From here on, Drop undoes whatever succeeded.
        let session = Self { alternate_screen };
        let mut stdout = io::stdout();
        if alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        execute!(stdout, EnableBracketedPaste)?;
        stdout.write_all(b"\x1b[H")?;
        stdout.flush()?;

        tracing::debug!(alternate_screen, "terminal session started");
        Ok(session)
    }

    /// Query the current terminal size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Terminal`] if the size cannot be read.
    pub fn viewport() -> Result<Viewport> {
        let (cols, rows) = terminal::size()?;
        Ok(Viewport::new(rows, cols))
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, DisableBracketedPaste);
        if self.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
        tracing::debug!("terminal session restored");
    }
}
