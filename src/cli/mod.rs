use crate::constants::{APP_DESCRIPTION, APP_NAME};
use crate::journal_core::parse_date;
use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Create dated journal entries at calendar-aware locations
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION)]
#[command(author, version, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct CliArgs {
    /// Path to the configuration file (default: ~/.journal/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log output format: text or json (default: $JOURNAL_LOG_FORMAT or text)
    #[arg(long, global = true, value_name = "FORMAT")]
    pub log_format: Option<String>,

    /// Log file for JSON events, or "off" (default: $JOURNAL_LOG_FILE or ~/.journal/journal.log)
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,

    /// Options for `create` when no subcommand is given
    #[command(flatten)]
    pub create: CreateArgs,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create an entry and open it in the editor (the default)
    Create(CreateArgs),
    /// Resolve a pattern against the calendar, without a config file
    Resolve(ResolveArgs),
    /// List every supported placeholder with its value
    Placeholders(PlaceholdersArgs),
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateArgs {
    /// Id of the configured entry (default: default_entry from the config)
    pub entry: Option<String>,

    /// Topic attached to the entry
    #[arg(short, long)]
    pub topic: Option<String>,

    /// File extension, overriding the configured one
    #[arg(short, long = "ext", value_name = "EXT")]
    pub extension: Option<String>,

    /// Directory to create the entry in, used as-is
    #[arg(long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// File name for the entry, used as-is
    #[arg(long, value_name = "NAME")]
    pub file_name: Option<String>,

    /// Editor command, overriding JOURNAL_EDITOR and the configuration
    #[arg(long, value_name = "CMD")]
    pub editor: Option<String>,

    /// Date of the entry instead of today (format: YYYY-MM-DD or YYYYMMDD)
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Create the file without opening the editor
    #[arg(long)]
    pub no_edit: bool,

    /// Print what would be created without touching the file system
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ResolveArgs {
    /// The pattern to resolve, e.g. "{Year.Num}/{Month.Pad}"
    pub pattern: String,

    /// Value for {EntryID}
    #[arg(long)]
    pub entry: Option<String>,

    /// Value for {Topic}
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Value for {FileExtension}
    #[arg(short, long = "ext", value_name = "EXT")]
    pub extension: Option<String>,

    /// Date to resolve against instead of today (format: YYYY-MM-DD or YYYYMMDD)
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PlaceholdersArgs {
    /// Date to show values for instead of today (format: YYYY-MM-DD or YYYYMMDD)
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Print the whole template context as JSON
    #[arg(long)]
    pub json: bool,
}

impl CliArgs {
    /// The subcommand to run; `create` when none was given.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Create(self.create))
    }
}
