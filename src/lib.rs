//! # Porta
//!
//! A distraction-free typewriter editor for the terminal.
//!
//! Text is only ever appended or removed from the end, and the newest line
//! always sits on the center row while older lines scroll upward, like
//! paper in a typewriter.
//!
//! ## Core Concepts
//!
//! - **Growable buffer**: [`TextBuffer`] doubles its capacity and reports
//!   allocation failure instead of aborting
//! - **Render pipeline**: every frame snapshots the document, optionally
//!   censors and formats it, wraps it to 80 columns and places it
//! - **Escape-aware wrapping**: terminal control sequences take no columns
//! - **Actor model**: input and autosave run on helper threads that only
//!   post messages to the main loop
//!
//! ## Example
//!
//! ```rust
//! use porta::render::{compose, Stages};
//! use porta::TextBuffer;
//!
//! let content = TextBuffer::from_bytes(b"# Title\nSome **bold** text").unwrap();
//! let lines = compose(&content, Stages::FORMAT).unwrap();
//! // A `#` heading takes its own row plus blank rows below it.
//! assert_eq!(lines.len(), 5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod buffer;
pub mod config;
pub mod editor;
pub mod error;
pub mod render;
pub mod terminal;

// Re-exports for convenience
pub use buffer::TextBuffer;
pub use config::{CliArgs, EditorConfig, FormatMode};
pub use editor::{run, Command, Editor, EditorState};
pub use error::{Error, Result};
pub use render::{compose, render_frame, Stages, Viewport};
