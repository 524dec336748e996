//! Main loop: owns the terminal, the actor threads and the editor state.
//!
//! ```text
//! ┌─────────────┐ InputEvent       ┌──────────────────────────────┐
//! │ InputActor  │ ───────────────▶ │                              │
//! └─────────────┘                  │  Editor (main thread)        │
//! ┌─────────────┐ AutosaveRequest  │  select! → execute → draw    │ ──▶ stdout
//! │AutosaveTimer│ ───────────────▶ │                              │
//! └─────────────┘                  └──────────────────────────────┘
//! ```
//!
//! Every file write and every byte sent to the terminal happens on the main
//! thread, between frames.

use super::command::Command;
use super::file;
use super::splash::render_splash;
use super::state::{EditorState, Outcome};
use crate::actor::{AutosaveRequest, AutosaveTimer, InputActor, InputEvent};
use crate::config::EditorConfig;
use crate::error::{Error, Result};
use crate::render::{render_frame, Viewport};
use crate::terminal::{OutputBuffer, TerminalSession};
use crossbeam_channel::{after, bounded, never, select, Receiver};
use std::io::{self, Write};
use std::time::Instant;

/// Capacity of the input channel.
const INPUT_CHANNEL_CAPACITY: usize = 64;

/// Whether the loop keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep going.
    Continue,
    /// Leave the editor.
    Quit,
}

/// The editor bound to an output stream.
#[derive(Debug)]
pub struct Editor<W: Write> {
    config: EditorConfig,
    state: EditorState,
    out: OutputBuffer,
    writer: W,
    splash_visible: bool,
}

/// Run an editing session on the real terminal until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be configured, a thread cannot
/// be spawned, or a buffer cannot grow. The terminal is restored before
/// this returns.
pub fn run(config: EditorConfig) -> Result<()> {
    let session = TerminalSession::start(config.alternate_screen)?;
    let viewport = TerminalSession::viewport()?;

    let mut editor = Editor::new(config, viewport, io::stdout());
    editor.load()?;

    let (input_tx, input_rx) = bounded(INPUT_CHANNEL_CAPACITY);
    let input = InputActor::spawn(input_tx, editor.config.input_poll_timeout)?;
    let autosave = editor.config.autosave.map(AutosaveTimer::spawn).transpose()?;

    let result = editor.event_loop(&input_rx, autosave.as_ref().map(AutosaveTimer::receiver));

    // The input thread may be blocked on a full channel; dropping the
    // receiver releases it.
    drop(input_rx);
    input.join();
    if let Some(autosave) = autosave {
        autosave.join();
    }
    drop(session);

    tracing::info!(ok = result.is_ok(), "editor stopped");
    result
}

impl<W: Write> Editor<W> {
    /// Create an editor with an empty document.
    pub fn new(config: EditorConfig, viewport: Viewport, writer: W) -> Self {
        let state = EditorState::new(config.path.clone(), viewport, config.format);
        let splash_visible = config.splash;
        Self {
            config,
            state,
            out: OutputBuffer::new(),
            writer,
            splash_visible,
        }
    }

    /// Current editor state.
    #[inline]
    pub const fn state(&self) -> &EditorState {
        &self.state
    }

    /// The output stream frames are written to.
    #[inline]
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// Whether the welcome box is still on screen.
    #[inline]
    pub const fn splash_visible(&self) -> bool {
        self.splash_visible
    }

    /// Load the document from disk.
    ///
    /// A missing file starts an empty document. An unreadable one also
    /// starts empty, with the error on the status line so a save does not
    /// silently replace a file that was never shown. Only a failed
    /// allocation is fatal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if the content does not fit in memory.
    pub fn load(&mut self) -> Result<()> {
        let path = self.state.path().to_path_buf();
        match file::load(&path) {
            Ok(Some(bytes)) => {
                tracing::info!(path = %path.display(), bytes = bytes.len(), "loaded document");
                self.state.load(&bytes)
            }
            Ok(None) => {
                tracing::info!(path = %path.display(), "new document");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not read document, starting empty");
                self.state
                    .set_status(e.to_string(), Instant::now(), self.config.status_duration);
                Ok(())
            }
        }
    }

    /// Compose the current frame and write it in one go.
    ///
    /// # Errors
    ///
    /// Returns an error if composing fails or the writer rejects the frame.
    pub fn draw(&mut self) -> Result<()> {
        let now = Instant::now();
        self.state.clear_expired_status(now);

        render_frame(
            self.state.content(),
            self.state.stages(),
            self.state.viewport(),
            self.state.status_message(now),
            &mut self.out,
        )?;
        if self.splash_visible {
            render_splash(self.state.viewport(), &mut self.out);
        }

        self.out.flush_to(&mut self.writer).map_err(Error::Terminal)
    }

    /// Apply one input event.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot grow.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<Flow> {
        match event {
            InputEvent::Bytes(bytes) => {
                self.splash_visible = false;
                for byte in bytes {
                    match self.state.execute(Command::from_byte(byte))? {
                        Outcome::Continue => {}
                        Outcome::Save => self.save(),
                        Outcome::Quit => {
                            tracing::info!("quit requested");
                            return Ok(Flow::Quit);
                        }
                    }
                }
            }
            InputEvent::Resize { width, height } => {
                tracing::debug!(width, height, "terminal resized");
                self.state.set_viewport(Viewport::new(height, width));
            }
            InputEvent::Error(message) => {
                tracing::warn!(%message, "input error");
            }
            InputEvent::Shutdown => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Write the document to disk and report the result on the status line.
    pub fn save(&mut self) {
        let now = Instant::now();
        let path = self.state.path().to_path_buf();

        match file::save(&path, self.state.content().as_bytes()) {
            Ok(()) => {
                tracing::info!(path = %path.display(), bytes = self.state.content().len(), "saved");
                self.state.mark_saved();
                let message = format!("Saved to {}", path.display());
                self.state.set_status(message, now, self.config.status_duration);
            }
            Err(e) => {
                tracing::warn!(error = %e, "save failed");
                self.state.set_status(e.to_string(), now, self.config.status_duration);
            }
        }
    }

    /// Save in response to the timer, unless nothing changed.
    pub fn autosave(&mut self, request: AutosaveRequest) {
        if self.state.is_modified() {
            tracing::debug!(sequence = request.sequence, elapsed = ?request.elapsed, "autosave");
            self.save();
        } else {
            tracing::trace!(sequence = request.sequence, "autosave skipped, no changes");
        }
    }

    /// Fires when the visible status message expires; never fires when
    /// there is none, so an idle editor is not redrawn.
    fn status_expiry(&self) -> Receiver<Instant> {
        self.state
            .status_expires_in(Instant::now())
            .map_or_else(never, after)
    }

    /// Draw, wait for the next event, repeat until quit.
    fn event_loop(
        &mut self,
        input_rx: &Receiver<InputEvent>,
        autosave_rx: Option<&Receiver<AutosaveRequest>>,
    ) -> Result<()> {
        let disabled = never();
        let autosave_rx = autosave_rx.unwrap_or(&disabled);

        loop {
            self.draw()?;

            let status_expiry = self.status_expiry();

            select! {
                recv(input_rx) -> event => match event {
                    Ok(event) => {
                        if self.handle_input(event)? == Flow::Quit {
                            return Ok(());
                        }
                    }
                    Err(_) => {
                        return Err(Error::Terminal(io::Error::other("input thread stopped")));
                    }
                },
                recv(autosave_rx) -> request => {
                    if let Ok(request) = request {
                        self.autosave(request);
                    }
                },
                recv(status_expiry) -> _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use std::time::Duration;

    fn editor(path: &Path) -> Editor<Vec<u8>> {
        let config = EditorConfig {
            splash: false,
            ..EditorConfig::new(path)
        };
        Editor::new(config, Viewport::new(24, 80), Vec::new())
    }

    fn keys(bytes: &[u8]) -> InputEvent {
        InputEvent::Bytes(bytes.to_vec())
    }

    fn screen(editor: &Editor<Vec<u8>>) -> vt100::Parser {
        let viewport = editor.state().viewport();
        let mut parser = vt100::Parser::new(viewport.rows, viewport.cols, 0);
        parser.process(editor.writer());
        parser
    }

    #[test]
    fn test_typing_then_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        let mut editor = editor(&path);

        assert_eq!(editor.handle_input(keys(b"hi\rthere\x13")).unwrap(), Flow::Continue);
        assert_eq!(fs::read(&path).unwrap(), b"hi\nthere");
        assert!(!editor.state().is_modified());

        let status = editor.state().status_message(Instant::now()).unwrap();
        assert!(status.starts_with("Saved to "));
        assert!(status.ends_with("notes.md"));
    }

    #[test]
    fn test_quit_stops_processing_remaining_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor(&dir.path().join("a.txt"));

        assert_eq!(editor.handle_input(keys(b"ab\x11cd")).unwrap(), Flow::Quit);
        assert_eq!(editor.state().content().as_bytes(), b"ab");
    }

    #[test]
    fn test_load_existing_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.md");
        fs::write(&path, b"existing").unwrap();

        let mut editor = editor(&path);
        editor.load().unwrap();
        assert_eq!(editor.state().content().as_bytes(), b"existing");

        let mut fresh = self::editor(&dir.path().join("missing.md"));
        fresh.load().unwrap();
        assert!(fresh.state().content().is_empty());
    }

    #[test]
    fn test_unreadable_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor(dir.path());
        editor.load().unwrap();
        assert!(editor.state().content().is_empty());
    }

    #[test]
    fn test_unreadable_file_is_reported_on_status_line() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor(dir.path());
        editor.load().unwrap();

        let status = editor.state().status_message(Instant::now()).unwrap();
        assert!(status.starts_with("I/O error on"));

        editor.draw().unwrap();
        let rows: Vec<String> = screen(&editor).screen().rows(0, 80).collect();
        assert!(rows[0].starts_with("I/O error on"));
    }

    #[test]
    fn test_status_expiry_only_fires_with_a_pending_message() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig {
            splash: false,
            status_duration: Duration::from_millis(10),
            ..EditorConfig::new(dir.path().join("a.txt"))
        };
        let mut editor = Editor::new(config, Viewport::new(24, 80), Vec::new());

        let idle = editor.status_expiry();
        assert!(idle.recv_timeout(Duration::from_millis(50)).is_err());

        editor.handle_input(keys(b"x\x13")).unwrap();
        let pending = editor.status_expiry();
        assert!(pending.recv_timeout(Duration::from_millis(500)).is_ok());
        assert_eq!(editor.state().status_message(Instant::now()), None);
    }

    #[test]
    fn test_save_failure_is_reported_on_status_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("notes.md");
        let mut editor = editor(&path);

        editor.handle_input(keys(b"x\x13")).unwrap();
        let status = editor.state().status_message(Instant::now()).unwrap();
        assert!(status.starts_with("I/O error on"));
        assert!(editor.state().is_modified());
    }

    #[test]
    fn test_autosave_skips_unchanged_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auto.md");
        let mut editor = editor(&path);
        let request = AutosaveRequest {
            sequence: 1,
            elapsed: Duration::from_secs(30),
        };

        editor.autosave(request);
        assert!(!path.exists());

        editor.handle_input(keys(b"draft")).unwrap();
        editor.autosave(request);
        assert_eq!(fs::read(&path).unwrap(), b"draft");
    }

    #[test]
    fn test_resize_updates_viewport() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor(&dir.path().join("a.txt"));
        editor
            .handle_input(InputEvent::Resize { width: 120, height: 40 })
            .unwrap();
        assert_eq!(editor.state().viewport(), Viewport::new(40, 120));
    }

    #[test]
    fn test_input_error_keeps_running() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor(&dir.path().join("a.txt"));
        let flow = editor.handle_input(InputEvent::Error("bad read".into())).unwrap();
        assert_eq!(flow, Flow::Continue);
        assert_eq!(editor.handle_input(InputEvent::Shutdown).unwrap(), Flow::Quit);
    }

    #[test]
    fn test_draw_places_text_on_center_row() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor(&dir.path().join("a.txt"));
        editor.handle_input(keys(b"hello")).unwrap();
        editor.draw().unwrap();

        let parser = screen(&editor);
        let rows: Vec<String> = parser.screen().rows(0, 80).collect();
        assert_eq!(rows[10].trim(), "hello");
        assert_eq!(parser.screen().cursor_position(), (10, 5));
    }

    #[test]
    fn test_draw_censored_text() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor(&dir.path().join("a.txt"));
        editor.handle_input(keys(b"Secret123\x03")).unwrap();
        editor.draw().unwrap();

        let rows: Vec<String> = screen(&editor).screen().rows(0, 80).collect();
        assert_eq!(rows[10].trim(), "________3");
        assert_eq!(editor.state().content().as_bytes(), b"Secret123");
    }

    #[test]
    fn test_splash_is_dismissed_by_first_key() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig::new(dir.path().join("a.txt"));
        let mut editor = Editor::new(config, Viewport::new(24, 80), Vec::new());

        editor.draw().unwrap();
        assert!(screen(&editor).screen().contents().contains("Welcome to PORTA"));

        editor.handle_input(keys(b"a")).unwrap();
        assert!(!editor.splash_visible());
        assert_eq!(editor.state().content().as_bytes(), b"a");
    }
}
