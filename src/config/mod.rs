//! Configuration management for the journal application.
//!
//! Configuration is read from a TOML file, by default `~/.journal/config.toml`.
//! Paths in it have `~` and environment variables expanded, and every pattern
//! is parsed at load time so a typo in a placeholder is reported before any
//! entry is created.
//!
//! # Environment Variables
//!
//! - `JOURNAL_CONFIG`: Path to the configuration file
//! - `JOURNAL_EDITOR`: Editor to use for journal entries, ahead of any configured editor
//! - `EDITOR`: Fallback editor when nothing is configured (defaults to "vim")

use crate::constants::{
    DEFAULT_CONFIG_PATH, DEFAULT_EDITOR_COMMAND, DEFAULT_FILE_NAME_PATTERN,
    EDITOR_FORBIDDEN_CHARS, ENV_VAR_EDITOR, ENV_VAR_JOURNAL_CONFIG, ENV_VAR_JOURNAL_EDITOR,
};
use crate::errors::{AppError, AppResult};
use crate::templating::Pattern;
use serde::Deserialize;
use std::collections::HashSet;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where entries live on disk.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Root directory of the journal. Expanded and required to be absolute.
    #[serde(default)]
    pub base_directory: String,

    /// Pattern for the directory below `base_directory`, e.g. `{Year.Num}/{Month.Pad}`.
    #[serde(default)]
    pub journal_directory: String,
}

/// One kind of journal entry, selected by its id on the command line.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EntryConfig {
    #[serde(default)]
    pub id: String,
    pub file_extension: Option<String>,
    /// Sub-directory pattern nested below the journal directory.
    pub directory: Option<String>,
    /// File name pattern; defaults to `{EntryID}.{FileExtension}`.
    pub file_name: Option<String>,
    /// Replaces `paths.journal_directory` for this entry.
    pub journal_directory_override: Option<String>,
    /// Replaces `paths.base_directory` for this entry.
    pub base_directory_override: Option<String>,
    pub topic: Option<String>,
    pub editor: Option<String>,
}

impl EntryConfig {
    /// The file name pattern for this entry, falling back to the default.
    pub fn file_name_pattern(&self) -> &str {
        self.file_name.as_deref().unwrap_or(DEFAULT_FILE_NAME_PATTERN)
    }
}

/// Configuration for the journal application.
///
/// # Examples
///
/// ```
/// use journal::Config;
///
/// let config = Config::from_toml_str(r#"
///     default_entry = "notes"
///     default_file_extension = "md"
///
///     [paths]
///     base_directory = "/home/me/journal"
///     journal_directory = "{Year.Num}/{Month.Pad}"
///
///     [[entries]]
///     id = "notes"
/// "#).unwrap();
///
/// let entry = config.entry("Notes").unwrap();
/// assert_eq!(entry.file_name_pattern(), "{EntryID}.{FileExtension}");
/// assert_eq!(config.file_extension_for(entry), Some("md"));
/// ```
#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Entry used when none is named on the command line.
    #[serde(default)]
    pub default_entry: String,

    /// Extension used by entries without their own `file_extension`.
    pub default_file_extension: Option<String>,

    /// Editor used by entries without their own `editor`.
    pub editor: Option<String>,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub entries: Vec<EntryConfig>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("default_entry", &self.default_entry)
            .field("default_file_extension", &self.default_file_extension)
            .field("editor", &self.editor.as_ref().map(|_| "[REDACTED_COMMAND]"))
            .field("base_directory", &"[REDACTED_PATH]")
            .field("journal_directory", &self.paths.journal_directory)
            .field("entries", &self.entries.len())
            .finish()
    }
}

/// Editor settings read from the process environment.
///
/// Kept separate from [`Config`] so editor precedence can be decided without
/// touching the real environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorEnv {
    /// Value of `JOURNAL_EDITOR`.
    pub journal_editor: Option<String>,
    /// Value of `EDITOR`.
    pub editor: Option<String>,
}

impl EditorEnv {
    /// Reads `JOURNAL_EDITOR` and `EDITOR`, treating empty values as unset.
    pub fn from_env() -> Self {
        EditorEnv {
            journal_editor: non_empty_var(ENV_VAR_JOURNAL_EDITOR),
            editor: non_empty_var(ENV_VAR_EDITOR),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

/// Expands `~` and environment variables in `raw`.
///
/// # Errors
///
/// Returns `AppError::Config` if a referenced variable is not set.
pub fn expand_path(raw: &str) -> AppResult<PathBuf> {
    let expanded = shellexpand::full(raw)
        .map_err(|e| AppError::Config(format!("Failed to expand path '{}': {}", raw, e)))?;
    Ok(PathBuf::from(expanded.into_owned()))
}

/// Picks the configuration file: the command line, then `JOURNAL_CONFIG`,
/// then `~/.journal/config.toml`.
///
/// # Errors
///
/// Returns `AppError::Config` if the chosen path cannot be expanded.
pub fn config_path(cli_path: Option<&Path>) -> AppResult<PathBuf> {
    if let Some(path) = cli_path {
        return expand_path(&path.to_string_lossy());
    }
    match non_empty_var(ENV_VAR_JOURNAL_CONFIG) {
        Some(path) => expand_path(&path),
        None => expand_path(DEFAULT_CONFIG_PATH),
    }
}

/// Validates an editor command string for security.
///
/// The command must be non-empty and contain neither spaces nor shell
/// metacharacters; editors that need arguments should be wrapped in a script.
///
/// # Errors
///
/// Returns `AppError::Config` describing the first problem found.
pub fn validate_editor_command(editor_cmd: &str) -> AppResult<&str> {
    if editor_cmd.is_empty() {
        return Err(AppError::Config(
            "Editor command cannot be empty".to_string(),
        ));
    }

    if editor_cmd.contains(' ') {
        return Err(AppError::Config(
            "Editor command cannot contain spaces. Use a wrapper script or shell alias for editors requiring arguments".to_string(),
        ));
    }

    if let Some(ch) = editor_cmd.chars().find(|c| EDITOR_FORBIDDEN_CHARS.contains(c)) {
        return Err(AppError::Config(format!(
            "Editor command cannot contain shell metacharacters: '{}'. Use a wrapper script or shell alias instead",
            ch
        )));
    }

    Ok(editor_cmd)
}

impl Config {
    /// Loads, expands and validates the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file is missing, unreadable, not valid
    /// TOML or fails validation, and `AppError::Template` if one of its
    /// patterns does not parse.
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "Config file not found at {}. Create it or point --config / {} at an existing file.",
                path.display(),
                ENV_VAR_JOURNAL_CONFIG
            )));
        }

        debug!("Loading configuration from {}", path.display());
        let contents = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!(
                "Failed to read config file at {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml_str(&contents)
    }

    /// Parses, expands and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`], minus the file access.
    pub fn from_toml_str(contents: &str) -> AppResult<Self> {
        let mut config: Config = toml::from_str(contents)
            .map_err(|e| AppError::Config(format!("Failed to parse config file: {}", e)))?;

        config.expand_paths()?;
        config.validate()?;
        Ok(config)
    }

    fn expand_paths(&mut self) -> AppResult<()> {
        if !self.paths.base_directory.is_empty() {
            self.paths.base_directory = expand_to_string(&self.paths.base_directory)?;
        }
        for entry in &mut self.entries {
            if let Some(base) = entry.base_directory_override.as_mut() {
                *base = expand_to_string(base)?;
            }
        }
        Ok(())
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for structural problems (missing base
    /// directory, duplicate ids, unknown default entry, missing extension,
    /// unsafe editor) and `AppError::Template` for patterns that do not parse.
    pub fn validate(&self) -> AppResult<()> {
        if self.paths.base_directory.is_empty() {
            return Err(AppError::Config(
                "Base directory (paths.base_directory) is empty".to_string(),
            ));
        }

        if !Path::new(&self.paths.base_directory).is_absolute() {
            return Err(AppError::Config(format!(
                "Base directory must be an absolute path: {}",
                self.paths.base_directory
            )));
        }

        if self.paths.journal_directory.is_empty() {
            return Err(AppError::Config(
                "Journal directory pattern (paths.journal_directory) is empty".to_string(),
            ));
        }
        Pattern::parse(&self.paths.journal_directory)?;

        if self.entries.is_empty() {
            return Err(AppError::Config(
                "At least one [[entries]] table is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            self.validate_entry(entry)?;
            if !seen.insert(entry.id.to_lowercase()) {
                return Err(AppError::Config(format!(
                    "Duplicate entry id '{}' (ids are compared ignoring case)",
                    entry.id
                )));
            }
        }

        if self.default_entry.is_empty() {
            return Err(AppError::Config("default_entry is empty".to_string()));
        }

        if self.entry(&self.default_entry).is_none() {
            return Err(AppError::Config(format!(
                "default_entry '{}' does not name a configured entry",
                self.default_entry
            )));
        }

        if let Some(editor) = &self.editor {
            validate_editor_command(editor)?;
        }

        Ok(())
    }

    fn validate_entry(&self, entry: &EntryConfig) -> AppResult<()> {
        if entry.id.is_empty() {
            return Err(AppError::Config("Entry id cannot be empty".to_string()));
        }

        if self.file_extension_for(entry).is_none() {
            return Err(AppError::Config(format!(
                "Entry '{}' has no file_extension and no default_file_extension is set",
                entry.id
            )));
        }

        if let Some(base) = &entry.base_directory_override {
            if !Path::new(base).is_absolute() {
                return Err(AppError::Config(format!(
                    "Entry '{}': base_directory_override must be an absolute path: {}",
                    entry.id, base
                )));
            }
        }

        for pattern in [
            entry.directory.as_deref(),
            entry.journal_directory_override.as_deref(),
            Some(entry.file_name_pattern()),
        ]
        .into_iter()
        .flatten()
        {
            Pattern::parse(pattern)?;
        }

        if let Some(editor) = &entry.editor {
            validate_editor_command(editor)?;
        }

        Ok(())
    }

    /// Finds an entry by id, ignoring case.
    ///
    /// Ids are folded with `to_lowercase`, the same fold used for duplicate
    /// detection and for `{EntryID}`.
    pub fn entry(&self, id: &str) -> Option<&EntryConfig> {
        let id = id.to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.id.to_lowercase() == id)
    }

    /// Ids of every configured entry, in file order.
    pub fn entry_ids(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.id.as_str()).collect()
    }

    /// The entry's own extension, or the configured default.
    pub fn file_extension_for<'a>(&'a self, entry: &'a EntryConfig) -> Option<&'a str> {
        entry
            .file_extension
            .as_deref()
            .or(self.default_file_extension.as_deref())
            .filter(|ext| !ext.is_empty())
    }

    /// The entry's base directory override, or `paths.base_directory`.
    pub fn base_directory_for(&self, entry: &EntryConfig) -> PathBuf {
        PathBuf::from(
            entry
                .base_directory_override
                .as_deref()
                .unwrap_or(&self.paths.base_directory),
        )
    }

    /// The entry's journal directory pattern override, or `paths.journal_directory`.
    pub fn journal_directory_for<'a>(&'a self, entry: &'a EntryConfig) -> &'a str {
        entry
            .journal_directory_override
            .as_deref()
            .unwrap_or(&self.paths.journal_directory)
    }
}

fn expand_to_string(raw: &str) -> AppResult<String> {
    Ok(expand_path(raw)?.to_string_lossy().into_owned())
}

/// Chooses the editor for an entry and checks it is safe to run.
///
/// Precedence: command line, `JOURNAL_EDITOR`, the entry's editor, the
/// configured editor, `EDITOR`, then `vim`.
///
/// # Errors
///
/// Returns `AppError::Config` if the chosen command fails
/// [`validate_editor_command`].
pub fn resolve_editor(
    cli_editor: Option<&str>,
    entry: &EntryConfig,
    config: &Config,
    env: &EditorEnv,
) -> AppResult<String> {
    let editor = cli_editor
        .or(env.journal_editor.as_deref())
        .or(entry.editor.as_deref())
        .or(config.editor.as_deref())
        .or(env.editor.as_deref())
        .unwrap_or(DEFAULT_EDITOR_COMMAND);

    validate_editor_command(editor).map(str::to_string)
}
