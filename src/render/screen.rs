//! Renderer: typewriter placement of wrapped lines.
//!
//! The newest line is always drawn on the center row and older lines climb
//! upward from it, so typing appears to push the text up the page:
//!
//! ```text
//!   row 1          line N-4
//!   ...            line N-3
//!   center - 1     line N-2
//!   center         line N-1   <- cursor ends here
//!   (below empty)
//! ```
//!
//! Lines are drawn bottom-up, then the newest line is drawn a second time
//! so the terminal's own cursor is left right after the last typed byte no
//! matter how many rows were painted above it.

use super::wrap::TEXT_WIDTH;
use crate::buffer::TextBuffer;
use crate::terminal::OutputBuffer;

/// Terminal dimensions used to place the text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Terminal height in rows.
    pub rows: u16,
    /// Terminal width in columns.
    pub cols: u16,
}

impl Viewport {
    /// Create a viewport of the given size.
    pub const fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }

    /// Row (1-indexed) where the newest line is drawn.
    ///
    /// Also the number of rows available for the text.
    pub const fn center_row(&self) -> u16 {
        self.rows.saturating_sub(1) / 2
    }

    /// Column (1-indexed) where every line starts, centering the text block.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn start_col(&self) -> u16 {
        self.cols.saturating_sub(TEXT_WIDTH as u16) / 2
    }
}

/// Draw `lines` into `out` for one frame.
///
/// The screen is cleared first. An optional `status` message is drawn at
/// the top-left before the text so it never disturbs the final cursor.
pub fn render_lines(
    lines: &[TextBuffer],
    viewport: Viewport,
    status: Option<&str>,
    out: &mut OutputBuffer,
) {
    out.clear_screen();

    if let Some(status) = status {
        out.reset_attrs();
        out.cursor_move(1, 1);
        out.write_str(status);
    }

    let Some(newest) = lines.last() else {
        return;
    };

    let center_row = viewport.center_row();
    let start_col = viewport.start_col();

    for (i, line) in lines
        .iter()
        .rev()
        .take(usize::from(center_row))
        .enumerate()
    {
        #[allow(clippy::cast_possible_truncation)]
        let row = center_row - i as u16;
        out.cursor_move(row, start_col);
        out.write_raw(line.as_bytes());
    }

    out.cursor_move(center_row, start_col);
    out.write_raw(newest.as_bytes());
}
