//! Editor: key dispatch, document state and the main loop.

mod app;
mod command;
pub mod file;
mod splash;
mod state;

pub use app::{run, Editor, Flow};
pub use command::{ctrl, Command, CTRL_C, CTRL_Q, CTRL_S};
pub use splash::{render_splash, SPLASH_LINES};
pub use state::{EditorState, Outcome};
