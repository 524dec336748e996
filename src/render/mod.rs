//! Render module: the pipeline from edit buffer to terminal output.
//!
//! This module contains:
//! - [`escape`]: Recognition of CSI/OSC escape tokens
//! - [`censor`]: In-place redaction
//! - [`format`]: Inline markup to control sequences
//! - [`wrap`]: Escape-aware line wrapping
//! - [`screen`]: Typewriter placement of wrapped lines
//! - [`pipeline`]: Wiring the stages into one frame

pub mod censor;
pub mod escape;
pub mod format;
mod pipeline;
pub mod screen;
pub mod wrap;

pub use pipeline::{compose, render_frame, Stages};
pub use screen::{render_lines, Viewport};
pub use wrap::TEXT_WIDTH;
