//! Porta: a distraction-free typewriter editor for the terminal.
//!
//! Usage: `porta <FILE> [--autosave SECS] [--format auto|always|never]
//! [--log-file PATH] [--no-splash]`

use clap::error::ErrorKind;
use clap::Parser;
use porta::config::{self, CliArgs, EditorConfig, LOG_FILE_ENV};
use std::fs::OpenOptions;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    if let Some(path) = config::log_file(&args, std::env::var(LOG_FILE_ENV).ok()) {
        init_logging(&path);
    }

    let term = std::env::var("TERM").ok();
    let config = EditorConfig::from_args(&args, term.as_deref());
    tracing::info!(
        path = %config.path.display(),
        format = config.format,
        autosave = ?config.autosave,
        "porta starting"
    );

    // The terminal is already restored when `run` returns.
    match porta::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "fatal error");
            eprintln!("porta: {e}");
            ExitCode::from(1)
        }
    }
}

/// Send logs to `path`; the terminal itself belongs to the editor.
fn init_logging(path: &Path) {
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("porta: cannot open log file {}: {e}", path.display());
            return;
        }
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
}
