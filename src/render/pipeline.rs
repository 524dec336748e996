//! Render pipeline: one frame from the edit buffer to terminal bytes.
//!
//! ```text
//! edit buffer ─▶ snapshot ─▶ censor? ─▶ format? ─▶ wrap ─▶ place ─▶ OutputBuffer
//! ```
//!
//! Every intermediate buffer is owned by the frame and dropped when it
//! ends; the edit buffer itself is only read.

use super::censor::censor;
use super::format::format_markup;
use super::screen::{render_lines, Viewport};
use super::wrap::wrap;
use crate::buffer::TextBuffer;
use crate::error::Result;
use crate::terminal::OutputBuffer;
use bitflags::bitflags;

bitflags! {
    /// Optional transforms applied before wrapping.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Stages: u8 {
        /// Redact the text.
        const CENSOR = 0b0000_0001;
        /// Render headings, bold spans and wikilinks.
        const FORMAT = 0b0000_0010;
    }
}

/// Run the transforms and wrap the result into lines.
pub fn compose(content: &TextBuffer, stages: Stages) -> Result<Vec<TextBuffer>> {
    let mut text = TextBuffer::from_bytes(content.as_bytes())?;

    if stages.contains(Stages::CENSOR) {
        censor(&mut text);
    }
    if stages.contains(Stages::FORMAT) {
        text = format_markup(&text)?;
    }

    wrap(&text)
}

/// Build a complete frame for `content` into `out`.
///
/// `out` is cleared first and holds the whole frame afterwards, ready to be
/// flushed in one write.
pub fn render_frame(
    content: &TextBuffer,
    stages: Stages,
    viewport: Viewport,
    status: Option<&str>,
    out: &mut OutputBuffer,
) -> Result<()> {
    let lines = compose(content, stages)?;
    tracing::debug!(
        bytes = content.len(),
        lines = lines.len(),
        ?stages,
        "composed frame"
    );

    out.clear();
    render_lines(&lines, viewport, status, out);
    Ok(())
}
