/*!
# Journal

Journal is a command-line tool that creates dated entry files at locations
described by calendar-aware patterns. A weekly note can live under the month
of the Monday that began its week, a daily note under the ISO week number,
and every file name can carry ordinals like `28th` or `180th`.

## Core Features

- Resolve `{Dotted.Path}` placeholders against today's date and the Monday commencing this week
- Configure several entry kinds, each with its own directory, file name, topic and editor
- Create the entry file (never overwriting) and open it in an editor
- Inspect every supported placeholder with `journal placeholders`

## Architecture

The pure calendar and templating core never touches the file system:

- `caltools`: Calendar arithmetic (week of month, week commencing, ordinals)
- `templating`: Date models, the template context and pattern resolution
- `journal_core`: Planning an entry from configuration and command-line options

The collaborators around it do the I/O:

- `cli`: Command-line interface handling using clap
- `config`: TOML configuration loading and validation
- `journal_io`: Directory and file creation, editor launch
- `logging`: Tracing subscriber setup
- `errors`: Error handling infrastructure

## Usage Example

```rust,no_run
use chrono::Local;
use journal::journal_core::{plan_entry, EntryRequest};
use journal::templating::TemplateContext;
use journal::{config, journal_io, Config};

fn main() -> journal::AppResult<()> {
    let config = Config::load(&config::config_path(None)?)?;
    let context = TemplateContext::assemble(Local::now().date_naive())?;

    let plan = plan_entry(&config, &EntryRequest::default(), context)?;
    journal_io::create_entry(&plan, true)?;
    Ok(())
}
```
*/

/// Calendar arithmetic for week and day positions
pub mod caltools;
/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Named constants shared across modules
pub mod constants;
/// Error types and utilities for error handling
pub mod errors;
/// Entry planning without I/O
pub mod journal_core;
/// File system and editor operations for entries
pub mod journal_io;
/// Tracing subscriber setup
pub mod logging;
/// Date models, template context and pattern resolution
pub mod templating;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use journal_core::{EntryPlan, EntryRequest};
pub use templating::{resolve, Pattern, TemplateContext};
