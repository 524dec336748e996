//! Editor state: the document, display toggles and the transient status
//! line.
//!
//! Everything here is plain data driven by [`Command`]s, so the whole
//! editing model runs without a terminal.

use super::command::Command;
use crate::buffer::TextBuffer;
use crate::error::Result;
use crate::render::{Stages, Viewport};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// What the event loop must do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep editing.
    Continue,
    /// Write the document to disk.
    Save,
    /// Leave the editor.
    Quit,
}

/// A message shown at the top-left until it expires.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StatusLine {
    message: String,
    expires_at: Instant,
}

/// Mutable state of one editing session.
#[derive(Debug)]
pub struct EditorState {
    content: TextBuffer,
    path: PathBuf,
    viewport: Viewport,
    censored: bool,
    format: bool,
    modified: bool,
    status: Option<StatusLine>,
}

impl EditorState {
    /// Fresh state with an empty document.
    pub fn new(path: impl Into<PathBuf>, viewport: Viewport, format: bool) -> Self {
        Self {
            content: TextBuffer::new(),
            path: path.into(),
            viewport,
            censored: false,
            format,
            modified: false,
            status: None,
        }
    }

    /// The document being edited.
    #[inline]
    pub const fn content(&self) -> &TextBuffer {
        &self.content
    }

    /// File the document is saved to.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current terminal dimensions.
    #[inline]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Record a new terminal size.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Whether redaction is on.
    #[inline]
    pub const fn is_censored(&self) -> bool {
        self.censored
    }

    /// Whether the document changed since it was loaded or last saved.
    #[inline]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    /// Render stages for the next frame.
    pub fn stages(&self) -> Stages {
        let mut stages = Stages::empty();
        stages.set(Stages::CENSOR, self.censored);
        stages.set(Stages::FORMAT, self.format);
        stages
    }

    /// Replace the document with bytes read from disk.
    pub fn load(&mut self, bytes: &[u8]) -> Result<()> {
        self.content.replace_with(bytes)?;
        self.modified = false;
        Ok(())
    }

    /// Apply one command.
    ///
    /// Saving and quitting need I/O or teardown, so they are handed back to
    /// the caller as an [`Outcome`].
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::Insert(byte) => {
                self.content.append_char(byte)?;
                self.modified = true;
            }
            Command::NewLine => {
                self.content.append_char(b'\n')?;
                self.modified = true;
            }
            Command::DeleteLast => {
                if !self.content.is_empty() {
                    self.content.delete_last_char();
                    self.modified = true;
                }
            }
            Command::ToggleCensor => self.censored = !self.censored,
            Command::Save => return Ok(Outcome::Save),
            Command::Quit => return Ok(Outcome::Quit),
        }
        Ok(Outcome::Continue)
    }

    /// Note that the current content is on disk.
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Show `message` until `now + duration`.
    pub fn set_status(&mut self, message: impl Into<String>, now: Instant, duration: Duration) {
        self.status = Some(StatusLine {
            message: message.into(),
            expires_at: now + duration,
        });
    }

    /// The status message still visible at `now`, if any.
    pub fn status_message(&self, now: Instant) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|status| now < status.expires_at)
            .map(|status| status.message.as_str())
    }

    /// Time left until the visible status message expires.
    pub fn status_expires_in(&self, now: Instant) -> Option<Duration> {
        self.status
            .as_ref()
            .and_then(|status| status.expires_at.checked_duration_since(now))
            .filter(|left| !left.is_zero())
    }

    /// Drop the status message once it has expired.
    pub fn clear_expired_status(&mut self, now: Instant) {
        if self.status_message(now).is_none() {
            self.status = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> EditorState {
        EditorState::new("notes.md", Viewport::new(24, 80), false)
    }

    fn type_bytes(state: &mut EditorState, bytes: &[u8]) {
        for &byte in bytes {
            assert_eq!(state.execute(Command::from_byte(byte)).unwrap(), Outcome::Continue);
        }
    }

    #[test]
    fn test_typing_appends_and_marks_modified() {
        let mut state = state();
        assert!(!state.is_modified());

        type_bytes(&mut state, b"hi\rthere");
        assert_eq!(state.content().as_bytes(), b"hi\nthere");
        assert!(state.is_modified());
    }

    #[test]
    fn test_backspace_deletes_last_byte() {
        let mut state = state();
        type_bytes(&mut state, b"help!\x7f");
        assert_eq!(state.content().as_bytes(), b"help");
    }

    #[test]
    fn test_backspace_on_empty_document_is_noop() {
        let mut state = state();
        type_bytes(&mut state, b"\x7f\x08");
        assert!(state.content().is_empty());
        assert!(!state.is_modified());
    }

    #[test]
    fn test_save_and_quit_are_handed_back() {
        let mut state = state();
        assert_eq!(state.execute(Command::Save).unwrap(), Outcome::Save);
        assert_eq!(state.execute(Command::Quit).unwrap(), Outcome::Quit);
        assert!(state.content().is_empty());
    }

    #[test]
    fn test_censor_toggle_controls_stages() {
        let mut state = EditorState::new("a", Viewport::new(24, 80), true);
        assert_eq!(state.stages(), Stages::FORMAT);

        state.execute(Command::ToggleCensor).unwrap();
        assert!(state.is_censored());
        assert_eq!(state.stages(), Stages::FORMAT | Stages::CENSOR);

        state.execute(Command::ToggleCensor).unwrap();
        assert_eq!(state.stages(), Stages::FORMAT);
        assert!(!state.is_modified());
    }

    #[test]
    fn test_load_then_save_tracks_modification() {
        let mut state = state();
        state.load(b"draft").unwrap();
        assert_eq!(state.content().as_bytes(), b"draft");
        assert!(!state.is_modified());

        type_bytes(&mut state, b"!");
        assert!(state.is_modified());
        state.mark_saved();
        assert!(!state.is_modified());
    }

    #[test]
    fn test_status_line_expires() {
        let mut state = state();
        let now = Instant::now();
        state.set_status("Saved to notes.md", now, Duration::from_secs(1));

        assert_eq!(state.status_message(now), Some("Saved to notes.md"));
        assert_eq!(state.status_expires_in(now), Some(Duration::from_secs(1)));

        let later = now + Duration::from_secs(1);
        assert_eq!(state.status_message(later), None);
        assert_eq!(state.status_expires_in(later), None);

        state.clear_expired_status(later);
        assert_eq!(state.status_message(now), None);
    }

    #[test]
    fn test_viewport_update() {
        let mut state = state();
        state.set_viewport(Viewport::new(50, 200));
        assert_eq!(state.viewport(), Viewport::new(50, 200));
        assert_eq!(state.path(), Path::new("notes.md"));
    }
}
