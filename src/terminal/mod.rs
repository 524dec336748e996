//! Terminal module: output buffering and terminal mode management.

mod output;
mod session;

pub use output::OutputBuffer;
pub use session::TerminalSession;
