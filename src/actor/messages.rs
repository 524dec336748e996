//! Message types for actor communication.
//!
//! These enums define the protocol between the helper threads and the main
//! loop. Helpers only ever post messages; all editing happens on the main
//! loop.

use std::time::Duration;

/// Events from the input thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Bytes produced by a key press or a paste.
    ///
    /// Keys are translated to the bytes a raw terminal would send, so
    /// control keys arrive as control bytes (Ctrl-S as `0x13`).
    Bytes(Vec<u8>),

    /// Terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Input thread encountered an error.
    Error(String),

    /// Input thread is shutting down.
    Shutdown,
}

/// A request from the autosave timer to save the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosaveRequest {
    /// Requests posted since the timer started, this one included.
    pub sequence: u64,
    /// Time elapsed since the timer started.
    pub elapsed: Duration,
}
