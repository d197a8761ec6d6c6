//! Core journal functionality without I/O operations.
//!
//! This module turns a loaded [`Config`], the options given on the command
//! line and a [`TemplateContext`] into an [`EntryPlan`]: the fully resolved
//! directory, file name and editor for one entry. Every pattern is resolved
//! here, so nothing reaches the file system until planning has succeeded.

use crate::config::{self, Config, EditorEnv};
use crate::constants::{DATE_FORMAT_COMPACT, DATE_FORMAT_ISO};
use crate::errors::{AppError, AppResult};
use crate::templating::{resolve, TemplateContext};
use chrono::NaiveDate;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Parses a date given as `YYYY-MM-DD` or `YYYYMMDD`.
///
/// # Examples
///
/// ```
/// use journal::journal_core::parse_date;
///
/// assert_eq!(parse_date("2024-06-28").unwrap(), parse_date("20240628").unwrap());
/// assert!(parse_date("28/06/2024").is_err());
/// ```
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str, DATE_FORMAT_ISO)
        .or_else(|_| NaiveDate::parse_from_str(date_str, DATE_FORMAT_COMPACT))
}

/// Options for a single entry, as given on the command line.
///
/// `None` means "use the configured value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryRequest {
    pub entry_id: Option<String>,
    pub topic: Option<String>,
    pub file_extension: Option<String>,
    /// Used verbatim instead of the configured directory patterns.
    pub directory: Option<PathBuf>,
    /// Used verbatim instead of the configured file name pattern.
    pub file_name: Option<String>,
    pub editor: Option<String>,
    pub editor_env: EditorEnv,
}

/// Everything needed to create one entry on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPlan {
    /// Id of the configured entry, as written in the configuration.
    pub entry_id: String,
    pub directory: PathBuf,
    pub file_name: String,
    /// `directory` joined with `file_name`.
    pub path: PathBuf,
    pub editor: String,
}

/// Resolves the location and editor of an entry.
///
/// The entry id is taken from the request or `default_entry` and lowercased
/// before being attached to the context. File extension and topic come from
/// the request, then the entry, then the configured defaults.
///
/// # Errors
///
/// Returns:
/// - `AppError::Journal` for an unknown entry id, a missing file extension,
///   or a file name that is empty or contains a path separator
/// - `AppError::Template` if a pattern does not resolve
/// - `AppError::Config` if the chosen editor is unsafe
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use journal::journal_core::{plan_entry, EntryRequest};
/// use journal::templating::TemplateContext;
/// use journal::Config;
/// use std::path::PathBuf;
///
/// let config = Config::from_toml_str(r#"
///     default_entry = "notes"
///     default_file_extension = "md"
///
///     [paths]
///     base_directory = "/journal"
///     journal_directory = "{Year.Num}/{Month.Pad}"
///
///     [[entries]]
///     id = "notes"
///     directory = "wc {WeekCommencing.Day.Pad}"
/// "#).unwrap();
///
/// let context = TemplateContext::assemble(NaiveDate::from_ymd_opt(2024, 6, 28).unwrap()).unwrap();
/// let plan = plan_entry(&config, &EntryRequest::default(), context).unwrap();
///
/// assert_eq!(plan.path, PathBuf::from("/journal/2024/06/wc 24/notes.md"));
/// ```
pub fn plan_entry(
    config: &Config,
    request: &EntryRequest,
    mut context: TemplateContext,
) -> AppResult<EntryPlan> {
    let requested_id = request
        .entry_id
        .as_deref()
        .unwrap_or(&config.default_entry)
        .to_lowercase();

    let entry = config.entry(&requested_id).ok_or_else(|| {
        AppError::Journal(format!(
            "Unknown entry '{}'. Configured entries: {}",
            requested_id,
            config.entry_ids().join(", ")
        ))
    })?;

    let file_extension = request
        .file_extension
        .as_deref()
        .or_else(|| config.file_extension_for(entry))
        .ok_or_else(|| {
            AppError::Journal(format!("No file extension available for entry '{}'", entry.id))
        })?;

    let topic = request
        .topic
        .as_deref()
        .or(entry.topic.as_deref())
        .unwrap_or_default();

    context.set_entry_id(requested_id.as_str());
    context.set_file_extension(file_extension);
    context.set_topic(topic);

    let directory = match &request.directory {
        Some(directory) => directory.clone(),
        None => {
            let mut directory = config.base_directory_for(entry);
            push_resolved(&mut directory, config.journal_directory_for(entry), &context)?;
            if let Some(pattern) = &entry.directory {
                push_resolved(&mut directory, pattern, &context)?;
            }
            directory
        }
    };

    let file_name = match &request.file_name {
        Some(file_name) => file_name.clone(),
        None => resolve(entry.file_name_pattern(), &context)?,
    };
    validate_file_name(&file_name)?;

    let editor = config::resolve_editor(
        request.editor.as_deref(),
        entry,
        config,
        &request.editor_env,
    )?;

    let path = directory.join(&file_name);
    debug!("Planned entry '{}' at {}", entry.id, path.display());

    Ok(EntryPlan {
        entry_id: entry.id.clone(),
        directory,
        file_name,
        path,
        editor,
    })
}

// Appends a resolved pattern below `directory`; empty results add nothing and
// leading separators cannot escape the base.
fn push_resolved(directory: &mut PathBuf, pattern: &str, context: &TemplateContext) -> AppResult<()> {
    let resolved = resolve(pattern, context)?;
    let segment = resolved.trim_start_matches(['/', '\\']);
    if !segment.is_empty() {
        directory.push(segment);
    }
    Ok(())
}

fn validate_file_name(file_name: &str) -> AppResult<()> {
    if file_name.is_empty() {
        return Err(AppError::Journal("Resolved file name is empty".to_string()));
    }
    let is_plain = matches!(
        Path::new(file_name).components().next(),
        Some(Component::Normal(_))
    );
    if file_name.contains(['/', '\\']) || !is_plain {
        return Err(AppError::Journal(format!(
            "File name '{}' must be a plain name without a path separator; use the directory patterns instead",
            file_name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
        default_entry = "notes"
        default_file_extension = "md"
        editor = "nano"

        [paths]
        base_directory = "/journal"
        journal_directory = "{Year.Num}/{Month.Pad}"

        [[entries]]
        id = "notes"

        [[entries]]
        id = "Standup"
        file_extension = "txt"
        directory = "week {WeekCommencing.Month.Week.Num}"
        file_name = "{Day.Pad}-{EntryID}-{Topic}.{FileExtension}"
        topic = "daily"
        editor = "code"

        [[entries]]
        id = "weekly"
        journal_directory_override = "{WeekCommencing.Year.Num}/{WeekCommencing.Month.Pad}"
        base_directory_override = "/work"
        file_name = "wc {WeekCommencing.Day.Pad}.{FileExtension}"

        [[entries]]
        id = "flat"
        journal_directory_override = "{Topic}"
        file_name = "{Topic}"
    "#;

    fn config() -> Config {
        Config::from_toml_str(CONFIG).unwrap()
    }

    fn context(y: i32, m: u32, d: u32) -> TemplateContext {
        TemplateContext::assemble(NaiveDate::from_ymd_opt(y, m, d).unwrap()).unwrap()
    }

    fn request(entry_id: &str) -> EntryRequest {
        EntryRequest {
            entry_id: Some(entry_id.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
        assert_eq!(parse_date("2023-01-15").unwrap(), expected);
        assert_eq!(parse_date("20230115").unwrap(), expected);
        assert!(parse_date("invalid-date").is_err());
        assert!(parse_date("2023-02-30").is_err());
    }

    #[test]
    fn test_default_entry_plan() {
        let plan = plan_entry(&config(), &EntryRequest::default(), context(2024, 6, 28)).unwrap();

        assert_eq!(plan.entry_id, "notes");
        assert_eq!(plan.directory, PathBuf::from("/journal/2024/06"));
        assert_eq!(plan.file_name, "notes.md");
        assert_eq!(plan.path, PathBuf::from("/journal/2024/06/notes.md"));
        assert_eq!(plan.editor, "nano");
    }

    #[test]
    fn test_entry_id_is_lowercased_before_resolution() {
        let plan = plan_entry(&config(), &request("STANDUP"), context(2024, 6, 28)).unwrap();

        assert_eq!(plan.entry_id, "Standup");
        assert_eq!(plan.directory, PathBuf::from("/journal/2024/06/week 5"));
        assert_eq!(plan.file_name, "28-standup-daily.txt");
        assert_eq!(plan.editor, "code");
    }

    #[test]
    fn test_non_ascii_default_entry_plans() {
        let toml = CONFIG
            .replace("default_entry = \"notes\"", "default_entry = \"Élan\"")
            .replace("id = \"notes\"", "id = \"Élan\"");
        let config = Config::from_toml_str(&toml).unwrap();

        let plan = plan_entry(&config, &EntryRequest::default(), context(2024, 6, 28)).unwrap();
        assert_eq!(plan.entry_id, "Élan");
        assert_eq!(plan.file_name, "élan.md");

        let plan = plan_entry(&config, &request("ÉLAN"), context(2024, 6, 28)).unwrap();
        assert_eq!(plan.path, PathBuf::from("/journal/2024/06/élan.md"));
    }

    #[test]
    fn test_request_values_win() {
        let request = EntryRequest {
            entry_id: Some("standup".to_string()),
            topic: Some("retro".to_string()),
            file_extension: Some("org".to_string()),
            editor: Some("hx".to_string()),
            ..Default::default()
        };
        let plan = plan_entry(&config(), &request, context(2024, 6, 28)).unwrap();

        assert_eq!(plan.file_name, "28-standup-retro.org");
        assert_eq!(plan.editor, "hx");
    }

    #[test]
    fn test_editor_env_precedence() {
        let mut request = request("standup");
        request.editor_env = EditorEnv {
            journal_editor: Some("emacs".to_string()),
            editor: None,
        };
        let plan = plan_entry(&config(), &request, context(2024, 6, 28)).unwrap();
        assert_eq!(plan.editor, "emacs");
    }

    #[test]
    fn test_week_commencing_across_year_boundary() {
        let plan = plan_entry(&config(), &request("weekly"), context(2025, 1, 2)).unwrap();

        assert_eq!(plan.directory, PathBuf::from("/work/2024/12"));
        assert_eq!(plan.file_name, "wc 30.md");
    }

    #[test]
    fn test_directory_and_file_name_overrides_are_verbatim() {
        let request = EntryRequest {
            directory: Some(PathBuf::from("/tmp/{Year.Num}")),
            file_name: Some("{Day.Num}.md".to_string()),
            ..Default::default()
        };
        let plan = plan_entry(&config(), &request, context(2024, 6, 28)).unwrap();

        assert_eq!(plan.path, PathBuf::from("/tmp/{Year.Num}/{Day.Num}.md"));
    }

    #[test]
    fn test_empty_directory_segments_are_skipped() {
        let plan = plan_entry(
            &config(),
            &EntryRequest {
                entry_id: Some("flat".to_string()),
                topic: Some("ideas".to_string()),
                ..Default::default()
            },
            context(2024, 6, 28),
        )
        .unwrap();
        assert_eq!(plan.path, PathBuf::from("/journal/ideas/ideas"));
    }

    #[test]
    fn test_empty_file_name_is_rejected() {
        match plan_entry(&config(), &request("flat"), context(2024, 6, 28)) {
            Err(AppError::Journal(msg)) => assert!(msg.contains("file name is empty")),
            other => panic!("Expected Journal error, got {:?}", other),
        }
    }

    #[test]
    fn test_file_name_with_separator_is_rejected() {
        let request = EntryRequest {
            entry_id: Some("flat".to_string()),
            topic: Some("a/b".to_string()),
            ..Default::default()
        };
        match plan_entry(&config(), &request, context(2024, 6, 28)) {
            Err(AppError::Journal(msg)) => assert!(msg.contains("path separator")),
            other => panic!("Expected Journal error, got {:?}", other),
        }

        let request = EntryRequest {
            file_name: Some("..".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            plan_entry(&config(), &request, context(2024, 6, 28)),
            Err(AppError::Journal(_))
        ));
    }

    #[test]
    fn test_unknown_entry() {
        match plan_entry(&config(), &request("diary"), context(2024, 6, 28)) {
            Err(AppError::Journal(msg)) => {
                assert!(msg.contains("Unknown entry 'diary'"));
                assert!(msg.contains("notes, Standup, weekly, flat"));
            }
            other => panic!("Expected Journal error, got {:?}", other),
        }
    }

    #[test]
    fn test_unsafe_cli_editor_is_rejected() {
        let request = EntryRequest {
            editor: Some("vim;reboot".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            plan_entry(&config(), &request, context(2024, 6, 28)),
            Err(AppError::Config(_))
        ));
    }
}
