//! Configuration: command line arguments and the settings derived from them.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming a log file when `--log-file` is absent.
pub const LOG_FILE_ENV: &str = "PORTA_LOG";

/// Command line arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "porta")]
#[command(version)]
#[command(about = "A distraction-free typewriter editor for the terminal", long_about = None)]
pub struct CliArgs {
    /// File to edit; created on first save if missing
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Save automatically every SECS seconds
    #[arg(long, value_name = "SECS")]
    pub autosave: Option<u64>,

    /// When to render headings, bold text and wikilinks
    #[arg(long, value_enum, default_value_t = FormatMode::Auto)]
    pub format: FormatMode,

    /// Write logs to this file (also settable through PORTA_LOG)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Skip the welcome screen
    #[arg(long)]
    pub no_splash: bool,
}

/// When inline formatting is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FormatMode {
    /// Only on terminals known to support the heading sequence.
    #[default]
    Auto,
    /// Always.
    Always,
    /// Never.
    Never,
}

impl FormatMode {
    /// Terminal that understands the sized-text heading sequence.
    pub const KITTY_TERM: &'static str = "xterm-kitty";

    /// Decide whether to format, given the value of `TERM`.
    pub fn enabled_for(self, term: Option<&str>) -> bool {
        match self {
            Self::Auto => term == Some(Self::KITTY_TERM),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Settings for one editing session.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// File being edited.
    pub path: PathBuf,
    /// Whether inline formatting is applied.
    pub format: bool,
    /// Autosave interval, if enabled.
    pub autosave: Option<Duration>,
    /// How long a status message stays on screen.
    pub status_duration: Duration,
    /// Input poll timeout for the input thread.
    pub input_poll_timeout: Duration,
    /// Whether to use the alternate screen buffer.
    pub alternate_screen: bool,
    /// Whether to show the welcome screen.
    pub splash: bool,
}

impl EditorConfig {
    /// Default configuration for editing `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: false,
            autosave: None,
            status_duration: Duration::from_secs(1),
            input_poll_timeout: Duration::from_millis(10),
            alternate_screen: true,
            splash: true,
        }
    }

    /// Build the configuration from parsed arguments and `TERM`.
    pub fn from_args(args: &CliArgs, term: Option<&str>) -> Self {
        Self {
            format: args.format.enabled_for(term),
            autosave: args
                .autosave
                .filter(|&secs| secs > 0)
                .map(Duration::from_secs),
            splash: !args.no_splash,
            ..Self::new(args.file.clone())
        }
    }
}

/// Resolve where logs go: the flag wins over the environment.
pub fn log_file(args: &CliArgs, env_value: Option<String>) -> Option<PathBuf> {
    args.log_file
        .clone()
        .or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(std::iter::once("porta").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_requires_file() {
        let err = parse(&[]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_cli_defaults() {
        let args = parse(&["notes.md"]).unwrap();
        let config = EditorConfig::from_args(&args, Some("xterm-256color"));
        assert_eq!(config.path, PathBuf::from("notes.md"));
        assert!(!config.format);
        assert!(config.autosave.is_none());
        assert!(config.splash);
        assert_eq!(config.status_duration, Duration::from_secs(1));
    }

    #[test]
    fn test_cli_options() {
        let args = parse(&["--autosave", "30", "--format", "always", "--no-splash", "a.txt"]).unwrap();
        let config = EditorConfig::from_args(&args, None);
        assert!(config.format);
        assert_eq!(config.autosave, Some(Duration::from_secs(30)));
        assert!(!config.splash);
    }

    #[test]
    fn test_cli_zero_autosave_disables() {
        let args = parse(&["--autosave", "0", "a.txt"]).unwrap();
        assert!(EditorConfig::from_args(&args, None).autosave.is_none());
    }

    #[test]
    fn test_format_mode_auto_detects_kitty() {
        assert!(FormatMode::Auto.enabled_for(Some("xterm-kitty")));
        assert!(!FormatMode::Auto.enabled_for(Some("xterm")));
        assert!(!FormatMode::Auto.enabled_for(None));
        assert!(!FormatMode::Never.enabled_for(Some("xterm-kitty")));
    }

    #[test]
    fn test_log_file_precedence() {
        let args = parse(&["--log-file", "flag.log", "a.txt"]).unwrap();
        assert_eq!(log_file(&args, Some("env.log".into())), Some(PathBuf::from("flag.log")));

        let args = parse(&["a.txt"]).unwrap();
        assert_eq!(log_file(&args, Some("env.log".into())), Some(PathBuf::from("env.log")));
        assert_eq!(log_file(&args, Some(String::new())), None);
        assert_eq!(log_file(&args, None), None);
    }
}
