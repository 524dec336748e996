//! Welcome box drawn over the first frame.

use crate::render::Viewport;
use crate::terminal::OutputBuffer;
use unicode_width::UnicodeWidthStr;

/// The welcome box, one entry per screen row.
pub const SPLASH_LINES: [&str; 6] = [
    "╔════════════════════╗",
    "║ Welcome to PORTA   ║",
    "║ ctrl + q to quit   ║",
    "║ ctrl + s to save   ║",
    "║ ctrl + c to censor ║",
    "╚════════════════════╝",
];

/// Draw the welcome box centered in `viewport`, then park the cursor at
/// the start of the second row.
pub fn render_splash(viewport: Viewport, out: &mut OutputBuffer) {
    #[allow(clippy::cast_possible_truncation)]
    let height = SPLASH_LINES.len() as u16;
    let top = (viewport.rows / 2).saturating_sub(height / 2);

    for (i, line) in SPLASH_LINES.iter().enumerate() {
        let width = u16::try_from(line.width()).unwrap_or(u16::MAX);
        let col = viewport.cols.saturating_sub(width) / 2;
        #[allow(clippy::cast_possible_truncation)]
        let row = top + i as u16;
        out.cursor_move(row, col);
        out.write_str(line);
    }

    out.cursor_move(2, 1);
}
