//! Inline Formatter: lightweight markup to terminal control sequences.
//!
//! A single left-to-right scan over the raw text. At each position one of
//! three recognizers may fire; each appends its rendering to the output and
//! returns the position where scanning resumes. Anything else is copied
//! through one byte at a time.
//!
//! | Markup          | Rendering                                   |
//! |-----------------|---------------------------------------------|
//! | `# Title\n`     | `ESC ] 66 ; s=<level> ; Title BEL` + breaks |
//! | `**bold**`      | `ESC [1m` bold `ESC [0m`                    |
//! | `[[Page\|Alias]]` | `ESC [4m` Alias `ESC [0m`                 |
//!
//! Unterminated markup is not an error: the opening marker is copied
//! literally and scanning continues after it.

use crate::buffer::TextBuffer;
use crate::error::Result;

/// Heading runs longer than this are treated as this many `#`.
pub const MAX_HEADING_HASHES: usize = 4;

/// Turn bold on.
pub const BOLD_ON: &[u8] = b"\x1b[1m";
/// Turn underline on.
pub const UNDERLINE_ON: &[u8] = b"\x1b[4m";
/// Reset all attributes; closes bold and underline spans.
pub const RESET: &[u8] = b"\x1b[0m";

/// Render the markup in `input` into a new buffer.
pub fn format_markup(input: &TextBuffer) -> Result<TextBuffer> {
    format_bytes(input.as_bytes())
}

/// Render the markup in `input` into a new buffer.
pub fn format_bytes(input: &[u8]) -> Result<TextBuffer> {
    let mut out = TextBuffer::new();
    let mut pos = 0;

    while pos < input.len() {
        let rest = &input[pos..];
        pos = if rest[0] == b'#' && (pos == 0 || input[pos - 1] == b'\n') {
            heading(input, pos, &mut out)?
        } else if rest.starts_with(b"**") {
            bold(input, pos, &mut out)?
        } else if rest.starts_with(b"[[") {
            wikilink(input, pos, &mut out)?
        } else {
            out.append_char(rest[0])?;
            pos + 1
        };
    }

    Ok(out)
}

/// The control sequence for a heading of the given size level.
pub fn heading_sequence(level: usize, text: &[u8]) -> Vec<u8> {
    let mut sequence = format!("\x1b]66;s={level};").into_bytes();
    sequence.extend_from_slice(text);
    sequence.push(super::escape::BEL);
    sequence
}

/// `pos` points at the first `#` of a run that starts a line.
fn heading(input: &[u8], pos: usize, out: &mut TextBuffer) -> Result<usize> {
    let hashes = input[pos..].iter().take_while(|&&b| b == b'#').count();
    let after_hashes = pos + hashes;

    let line_end = match (input.get(after_hashes), find(input, pos, b"\n")) {
        (Some(b' '), Some(line_end)) => line_end,
        _ => {
            out.append_char(b'#')?;
            return Ok(pos + 1);
        }
    };

    let level = MAX_HEADING_HASHES - hashes.min(MAX_HEADING_HASHES);
    let text = &input[after_hashes + 1..line_end];
    out.append(&heading_sequence(level, text))?;
    for _ in 0..=level {
        out.append_char(b'\n')?;
    }

    Ok(line_end + 1)
}

/// `pos` points at an opening `**`.
fn bold(input: &[u8], pos: usize, out: &mut TextBuffer) -> Result<usize> {
    let text_start = pos + 2;
    let Some(end) = find(input, text_start, b"**") else {
        out.append(b"**")?;
        return Ok(text_start);
    };

    out.append(BOLD_ON)?;
    out.append(&input[text_start..end])?;
    out.append(RESET)?;
    Ok(end + 2)
}

/// `pos` points at an opening `[[`.
fn wikilink(input: &[u8], pos: usize, out: &mut TextBuffer) -> Result<usize> {
    let text_start = pos + 2;
    let Some(end) = find(input, text_start, b"]]") else {
        out.append(b"[[")?;
        return Ok(text_start);
    };

    // Only the alias after the last pipe is shown.
    let span = &input[text_start..end];
    let shown = span
        .iter()
        .rposition(|&b| b == b'|')
        .map_or(span, |pipe| &span[pipe + 1..]);

    out.append(UNDERLINE_ON)?;
    out.append(shown)?;
    out.append(RESET)?;
    Ok(end + 2)
}

/// First index at or after `from` where `needle` starts.
fn find(haystack: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|i| from + i)
}
