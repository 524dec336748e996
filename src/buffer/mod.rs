//! Buffer module: The growable byte storage every pipeline stage works on.
//!
//! This module contains:
//! - [`TextBuffer`]: An owned, always-terminated byte buffer with doubling growth

#[allow(clippy::module_inception)]
mod buffer;

pub use buffer::{TextBuffer, INITIAL_CAPACITY, TERMINATOR};
