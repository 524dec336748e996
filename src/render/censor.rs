//! Censor transform: in-place redaction of typed text.

use crate::buffer::TextBuffer;

/// Byte that replaces every redacted character.
///
/// Not alphanumeric, so censoring is idempotent, and not a markup
/// character, so censored text never grows formatting it did not have.
pub const REDACTION_GLYPH: u8 = b'_';

/// Redact every ASCII alphanumeric byte except the last one.
///
/// The final byte is left as typed so the writer still sees what they
/// just pressed.
pub fn censor(text: &mut TextBuffer) {
    let bytes = text.as_bytes_mut();
    let Some((_, head)) = bytes.split_last_mut() else {
        return;
    };

    for byte in head.iter_mut().filter(|b| b.is_ascii_alphanumeric()) {
        *byte = REDACTION_GLYPH;
    }
}
