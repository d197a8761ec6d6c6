//! Constants used throughout the application.
//!
//! This module contains the constants used in the journal application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "journal";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "Create dated journal entries at calendar-aware locations";

// CLI Arguments & Defaults
/// Default command for the editor if not specified otherwise.
pub const DEFAULT_EDITOR_COMMAND: &str = "vim";
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Log level used when neither `-v` nor `RUST_LOG` is given.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
/// Log level for the log file when no `-v` flag is given.
pub const DEFAULT_FILE_LOG_LEVEL: &str = "info";
/// Log file value that turns file logging off.
pub const LOG_FILE_DISABLED: &str = "off";

// Configuration Keys & Environment Variables
/// Environment variable pointing at an alternative configuration file.
pub const ENV_VAR_JOURNAL_CONFIG: &str = "JOURNAL_CONFIG";
/// Environment variable for specifying the preferred journal editor.
pub const ENV_VAR_JOURNAL_EDITOR: &str = "JOURNAL_EDITOR";
/// Environment variable selecting the log output format.
pub const ENV_VAR_JOURNAL_LOG_FORMAT: &str = "JOURNAL_LOG_FORMAT";
/// Environment variable pointing at an alternative log file.
pub const ENV_VAR_JOURNAL_LOG_FILE: &str = "JOURNAL_LOG_FILE";
/// Standard environment variable for specifying the default editor.
pub const ENV_VAR_EDITOR: &str = "EDITOR";
/// Default location of the configuration file, before `~` expansion.
pub const DEFAULT_CONFIG_PATH: &str = "~/.journal/config.toml";
/// Default location of the structured log file, before `~` expansion.
pub const DEFAULT_LOG_FILE_PATH: &str = "~/.journal/journal.log";

// Validation
/// Characters forbidden in editor commands for security reasons.
pub const EDITOR_FORBIDDEN_CHARS: &[char] =
    &['|', '&', ';', '$', '(', ')', '`', '\\', '<', '>', '\'', '"'];

// Entry Layout
/// File name pattern used by entries that do not configure their own.
pub const DEFAULT_FILE_NAME_PATTERN: &str = "{EntryID}.{FileExtension}";

// File System Parameters
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;
/// Default POSIX permissions for newly created files (owner read/write).
#[cfg(unix)]
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o600;

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format string for compact date format (YYYYMMDD).
pub const DATE_FORMAT_COMPACT: &str = "%Y%m%d";

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "journal";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
