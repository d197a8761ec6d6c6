/*!
# Journal - Calendar-Aware Journaling

`journal` creates dated entry files in a directory layout described by
patterns such as `{Year.Num}/{Month.Pad}/{EntryID}.{FileExtension}`, then
opens them in an editor.

This file contains the main application flow: it reads the clock once,
sets up logging, and hands the captured date to the subcommand that was
requested.

## Usage

```text
journal [OPTIONS] [ENTRY]
journal create [ENTRY] [--topic T] [--ext E] [--date DATE] [--no-edit] [--dry-run]
journal resolve <PATTERN> [--entry ID] [--topic T] [--ext E] [--date DATE]
journal placeholders [--date DATE] [--json]
```

## Configuration

- `--config` or `JOURNAL_CONFIG`: configuration file (defaults to `~/.journal/config.toml`)
- `JOURNAL_EDITOR` or `EDITOR`: editor used when no editor is configured (defaults to "vim")
- `JOURNAL_LOG_FORMAT`: `text` or `json` log output
- `--log-file` or `JOURNAL_LOG_FILE`: JSON log file (defaults to `~/.journal/journal.log`, `off` disables it)
*/

use chrono::{Local, NaiveDate};
use clap::Parser;
use journal::cli::{CliArgs, Command, CreateArgs, PlaceholdersArgs, ResolveArgs};
use journal::config::{self, Config, EditorEnv};
use journal::constants::{ENV_VAR_JOURNAL_LOG_FORMAT, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME};
use journal::errors::{AppError, AppResult};
use journal::journal_core::{self, EntryRequest};
use journal::journal_io::{self, EntryFileStatus};
use journal::logging::{self, LogFormat};
use journal::templating::{self, TemplateContext};
use std::env;
use std::path::PathBuf;
use tracing::{debug, error, info, info_span};
use uuid::Uuid;

/// The main entry point for the journal application.
///
/// 1. Reads the current date once
/// 2. Parses command-line arguments and initializes logging
/// 3. Runs the requested subcommand inside a correlated root span
///
/// # Errors
///
/// Any error from the subcommand is logged once and returned, which gives a
/// non-zero exit code.
fn main() -> AppResult<()> {
    // Obtain the current date once at the beginning
    let current_date = Local::now().date_naive();

    let args = CliArgs::parse();
    let log_format = select_log_format(args.log_format.as_deref())?;
    let log_file = logging::log_file_path(args.log_file.as_deref())?;
    logging::init(args.verbose, log_format, log_file.as_deref())?;

    let correlation_id = Uuid::new_v4();
    let root_span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service_name = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = root_span.enter();

    info!("Starting journal");

    let result = run(args, current_date);
    if let Err(e) = &result {
        error!(error = %e, "Application error");
    }
    result
}

fn select_log_format(cli_format: Option<&str>) -> AppResult<LogFormat> {
    match cli_format {
        Some(format) => format.parse(),
        None => match env::var(ENV_VAR_JOURNAL_LOG_FORMAT) {
            Ok(format) if !format.is_empty() => format.parse(),
            _ => Ok(LogFormat::default()),
        },
    }
}

fn run(args: CliArgs, current_date: NaiveDate) -> AppResult<()> {
    let config_override = args.config.clone();
    debug!("CLI arguments: {:?}", args);

    match args.into_command() {
        Command::Create(create) => run_create(config_override, create, current_date),
        Command::Resolve(resolve) => run_resolve(resolve, current_date),
        Command::Placeholders(placeholders) => run_placeholders(placeholders, current_date),
    }
}

fn run_create(
    config_override: Option<PathBuf>,
    args: CreateArgs,
    current_date: NaiveDate,
) -> AppResult<()> {
    let config_path = config::config_path(config_override.as_deref())?;
    info!("Loading configuration");
    let config = Config::load(&config_path)?;

    let instant = args.date.unwrap_or(current_date);
    let context = TemplateContext::assemble(instant)?;

    let directory = args
        .directory
        .as_ref()
        .map(|dir| config::expand_path(&dir.to_string_lossy()))
        .transpose()?;

    let request = EntryRequest {
        entry_id: args.entry,
        topic: args.topic,
        file_extension: args.extension,
        directory,
        file_name: args.file_name,
        editor: args.editor,
        editor_env: EditorEnv::from_env(),
    };

    let plan = journal_core::plan_entry(&config, &request, context)?;

    if args.dry_run {
        println!("entry:     {}", plan.entry_id);
        println!("directory: {}", plan.directory.display());
        println!("file:      {}", plan.file_name);
        println!("path:      {}", plan.path.display());
        println!("editor:    {}", plan.editor);
        return Ok(());
    }

    let status = journal_io::create_entry(&plan, !args.no_edit)?;
    if status == EntryFileStatus::AlreadyExists {
        debug!("Entry was already present");
    }
    println!("{}", plan.path.display());
    Ok(())
}

fn run_resolve(args: ResolveArgs, current_date: NaiveDate) -> AppResult<()> {
    let mut context = TemplateContext::assemble(args.date.unwrap_or(current_date))?;
    if let Some(entry) = args.entry {
        context.set_entry_id(entry);
    }
    if let Some(topic) = args.topic {
        context.set_topic(topic);
    }
    if let Some(extension) = args.extension {
        context.set_file_extension(extension);
    }

    let resolved = templating::resolve(&args.pattern, &context)?;
    debug!("Resolved '{}' to '{}'", args.pattern, resolved);
    println!("{}", resolved);
    Ok(())
}

fn run_placeholders(args: PlaceholdersArgs, current_date: NaiveDate) -> AppResult<()> {
    let context = TemplateContext::assemble(args.date.unwrap_or(current_date))?;

    if args.json {
        let json = serde_json::to_string_pretty(&context)
            .map_err(|e| AppError::Journal(format!("Failed to serialize context: {}", e)))?;
        println!("{}", json);
        return Ok(());
    }

    for name in templating::placeholders() {
        let value = templating::lookup(name, &context).unwrap_or_default();
        println!("{{{}}} = {}", name, value);
    }
    Ok(())
}
