//! Tracing subscriber setup.
//!
//! The subscriber is installed once from `main`; library code only emits
//! events through the `tracing` macros. Events go to stderr in the chosen
//! format and, unless turned off, are also appended as JSON lines to a log
//! file (`~/.journal/journal.log` by default).

use crate::config::expand_path;
#[cfg(unix)]
use crate::constants::{DEFAULT_DIR_PERMISSIONS, DEFAULT_FILE_PERMISSIONS};
use crate::constants::{
    DEFAULT_FILE_LOG_LEVEL, DEFAULT_LOG_FILE_PATH, DEFAULT_LOG_LEVEL, ENV_VAR_JOURNAL_LOG_FILE,
    LOG_FILE_DISABLED, LOG_FORMAT_JSON, LOG_FORMAT_TEXT,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::fs::{DirBuilder, File, OpenOptions};
use std::io;
#[cfg(unix)]
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Output format for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            LOG_FORMAT_TEXT => Ok(LogFormat::Text),
            LOG_FORMAT_JSON => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!(
                "Unknown log format '{}'. Expected '{}' or '{}'",
                other, LOG_FORMAT_TEXT, LOG_FORMAT_JSON
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => f.write_str(LOG_FORMAT_TEXT),
            LogFormat::Json => f.write_str(LOG_FORMAT_JSON),
        }
    }
}

/// Maps the `-v` count to a filter directive.
///
/// Returns `None` when no flag was given, leaving the choice to `RUST_LOG`.
pub fn verbosity_directive(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

fn build_filter(verbose: u8) -> EnvFilter {
    match verbosity_directive(verbose) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
    }
}

fn build_file_filter(verbose: u8) -> EnvFilter {
    EnvFilter::new(verbosity_directive(verbose).unwrap_or(DEFAULT_FILE_LOG_LEVEL))
}

/// Picks the log file: the command line, then `JOURNAL_LOG_FILE`, then
/// `~/.journal/journal.log`.
///
/// Returns `None` when the chosen value is `off`.
///
/// # Errors
///
/// Returns `AppError::Config` if the chosen path cannot be expanded.
pub fn log_file_path(cli_path: Option<&Path>) -> AppResult<Option<PathBuf>> {
    let raw = match cli_path {
        Some(path) => path.to_string_lossy().into_owned(),
        None => match env::var(ENV_VAR_JOURNAL_LOG_FILE) {
            Ok(value) if !value.trim().is_empty() => value,
            _ => DEFAULT_LOG_FILE_PATH.to_string(),
        },
    };

    if raw.trim().eq_ignore_ascii_case(LOG_FILE_DISABLED) {
        return Ok(None);
    }
    expand_path(&raw).map(Some)
}

/// Opens `path` for appending, creating it and its parent directories.
///
/// New directories get 0o700 and a new file gets 0o600 on Unix.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(DEFAULT_DIR_PERMISSIONS);
        builder.create(parent)?;
    }

    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    options.mode(DEFAULT_FILE_PERMISSIONS);
    options.open(path)
}

/// Installs the global subscriber.
///
/// Events are written to stderr in `format`. When `log_file` is given they
/// are also appended to it as JSON lines, at `info` or the `-v` level. A log
/// file that cannot be opened is reported as a warning and skipped.
///
/// # Errors
///
/// Returns `AppError::Config` if a subscriber has already been installed.
pub fn init(verbose: u8, format: LogFormat, log_file: Option<&Path>) -> AppResult<()> {
    let stderr_layer: Box<dyn Layer<Registry> + Send + Sync> = match format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_writer(io::stderr)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_level(true)
            .with_writer(io::stderr)
            .boxed(),
    };

    let mut open_failure = None;
    let file_layer = log_file.and_then(|path| match open_log_file(path) {
        Ok(file) => Some(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .with_filter(build_file_filter(verbose)),
        ),
        Err(e) => {
            open_failure = Some((path.to_path_buf(), e));
            None
        }
    });

    tracing_subscriber::registry()
        .with(stderr_layer.with_filter(build_filter(verbose)))
        .with(file_layer)
        .try_init()
        .map_err(|e| AppError::Config(format!("Failed to initialize logging: {}", e)))?;

    if let Some((path, e)) = open_failure {
        warn!("Cannot open log file {}: {}", path.display(), e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!(" json ".parse::<LogFormat>().unwrap(), LogFormat::Json);

        match "yaml".parse::<LogFormat>() {
            Err(AppError::Config(msg)) => assert!(msg.contains("yaml")),
            _ => panic!("Expected Config error for unknown log format"),
        }
    }

    #[test]
    fn test_log_format_display_round_trips() {
        for format in [LogFormat::Text, LogFormat::Json] {
            assert_eq!(format.to_string().parse::<LogFormat>().unwrap(), format);
        }
    }

    #[test]
    #[serial]
    fn test_log_file_path_precedence() {
        let original = env::var(ENV_VAR_JOURNAL_LOG_FILE).ok();
        env::set_var(ENV_VAR_JOURNAL_LOG_FILE, "/tmp/from-env.log");

        let from_cli = log_file_path(Some(Path::new("/tmp/from-cli.log")));
        let from_env = log_file_path(None);
        env::set_var(ENV_VAR_JOURNAL_LOG_FILE, "OFF");
        let disabled = log_file_path(None);
        env::remove_var(ENV_VAR_JOURNAL_LOG_FILE);
        let default = log_file_path(None);

        match original {
            Some(val) => env::set_var(ENV_VAR_JOURNAL_LOG_FILE, val),
            None => env::remove_var(ENV_VAR_JOURNAL_LOG_FILE),
        }

        assert_eq!(from_cli.unwrap(), Some(PathBuf::from("/tmp/from-cli.log")));
        assert_eq!(from_env.unwrap(), Some(PathBuf::from("/tmp/from-env.log")));
        assert_eq!(disabled.unwrap(), None);
        let default = default.unwrap().unwrap();
        assert!(default.ends_with(".journal/journal.log"), "{}", default.display());
    }

    #[test]
    fn test_log_file_path_cli_off() {
        assert_eq!(log_file_path(Some(Path::new("off"))).unwrap(), None);
    }

    #[test]
    fn test_open_log_file_creates_parents_and_appends() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let path = temp_dir.path().join("logs").join("journal.log");

        {
            let mut file = open_log_file(&path).expect("Failed to open log file");
            writeln!(file, "first").unwrap();
        }
        {
            let mut file = open_log_file(&path).expect("Failed to reopen log file");
            writeln!(file, "second").unwrap();
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
            let mode = std::fs::metadata(path.parent().unwrap()).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o700);
        }
    }

    #[test]
    fn test_verbosity_directive() {
        assert_eq!(verbosity_directive(0), None);
        assert_eq!(verbosity_directive(1), Some("info"));
        assert_eq!(verbosity_directive(2), Some("debug"));
        assert_eq!(verbosity_directive(3), Some("trace"));
        assert_eq!(verbosity_directive(9), Some("trace"));
    }
}
