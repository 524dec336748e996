//! Key dispatch: what each input byte asks the editor to do.

/// Byte for Ctrl-C.
pub const CTRL_C: u8 = ctrl(b'c');
/// Byte for Ctrl-Q.
pub const CTRL_Q: u8 = ctrl(b'q');
/// Byte for Ctrl-S.
pub const CTRL_S: u8 = ctrl(b's');

/// The control byte a terminal sends for Ctrl-`key`.
pub const fn ctrl(key: u8) -> u8 {
    key & 0x1f
}

/// An editing command decoded from one input byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Insert the byte at the end of the document.
    Insert(u8),
    /// Insert a line break (Enter).
    NewLine,
    /// Delete the last byte (Backspace).
    DeleteLast,
    /// Leave the editor.
    Quit,
    /// Write the document to its file.
    Save,
    /// Flip redaction on or off.
    ToggleCensor,
}

impl Command {
    /// Decode one input byte.
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            b'\r' => Self::NewLine,
            0x7f | 0x08 => Self::DeleteLast,
            CTRL_Q => Self::Quit,
            CTRL_S => Self::Save,
            CTRL_C => Self::ToggleCensor,
            other => Self::Insert(other),
        }
    }
}
