//! Actor Model: Message-passing helpers around the single-threaded editor.
//!
//! Helper threads never touch editor state. They post messages over
//! crossbeam channels and the main loop handles them between frames:
//!
//! ```text
//! ┌──────────────┐     InputEvent       ┌──────────────┐
//! │ Input Thread │ ──────────────────▶  │              │
//! └──────────────┘                      │  Main Loop   │ ──▶ frame ──▶ stdout
//! ┌──────────────┐   AutosaveRequest    │              │
//! │Autosave Timer│ ──────────────────▶  │              │
//! └──────────────┘                      └──────────────┘
//! ```

mod autosave;
mod input;
mod messages;

pub use autosave::AutosaveTimer;
pub use input::{key_to_bytes, paste_to_bytes, InputActor};
pub use messages::{AutosaveRequest, InputEvent};
