//! Error handling utilities for the journal application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! Only two kinds come out of the pure templating core: `TemplateSyntaxError`,
//! which the caller can recover from by fixing the pattern, and `CalendarError`,
//! which signals an instant outside the representable calendar and is treated as
//! a programming fault.

use chrono::NaiveDate;
use std::io;
use thiserror::Error;

/// Represents a malformed pattern or a placeholder that does not resolve.
///
/// Every variant carries the full offending pattern so the message can be shown
/// to the end user as-is, together with the token or path that broke it.
///
/// # Examples
///
/// ```
/// use journal::errors::TemplateSyntaxError;
///
/// let error = TemplateSyntaxError::UnknownField {
///     pattern: "{Year.Nmu}".to_string(),
///     path: "Year.Nmu".to_string(),
/// };
///
/// let message = format!("{}", error);
/// assert!(message.contains("Year.Nmu"));
/// assert!(message.contains("{Year.Nmu}"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateSyntaxError {
    /// An opening `{` with no matching `}`.
    #[error("Unterminated placeholder '{fragment}' at byte {position} in pattern \"{pattern}\". Add a closing '}}' or write '{{{{' for a literal brace.")]
    Unterminated {
        /// The pattern being resolved
        pattern: String,
        /// The text from the opening brace up to where parsing stopped
        fragment: String,
        /// Byte offset of the opening brace
        position: usize,
    },

    /// A `}` that does not close a placeholder.
    #[error("Unmatched '}}' at byte {position} in pattern \"{pattern}\". Write '}}}}' for a literal brace.")]
    UnmatchedClose {
        /// The pattern being resolved
        pattern: String,
        /// Byte offset of the stray brace
        position: usize,
    },

    /// A placeholder with nothing between its braces.
    #[error("Empty placeholder at byte {position} in pattern \"{pattern}\"")]
    EmptyPlaceholder {
        /// The pattern being resolved
        pattern: String,
        /// Byte offset of the opening brace
        position: usize,
    },

    /// A field path that is not part of the template context.
    #[error("Unknown placeholder '{path}' in pattern \"{pattern}\". Run `journal placeholders` to list the supported names.")]
    UnknownField {
        /// The pattern being resolved
        pattern: String,
        /// The dotted path that failed to resolve
        path: String,
    },
}

impl TemplateSyntaxError {
    /// The pattern that failed to parse.
    pub fn pattern(&self) -> &str {
        match self {
            TemplateSyntaxError::Unterminated { pattern, .. }
            | TemplateSyntaxError::UnmatchedClose { pattern, .. }
            | TemplateSyntaxError::EmptyPlaceholder { pattern, .. }
            | TemplateSyntaxError::UnknownField { pattern, .. } => pattern,
        }
    }
}

/// Calendar arithmetic that left the range of representable dates.
///
/// Calendar functions are total over every date a user can realistically
/// supply, so this only surfaces for dates at the very edge of chrono's range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// The computed date does not exist in the supported calendar range.
    #[error("Calendar computation for {date} left the supported date range")]
    OutOfRange {
        /// The date the computation started from
        date: NaiveDate,
    },
}

/// Represents specific error cases that can occur when interacting with external editors.
///
/// This enum provides detailed, contextual error information for different failure modes
/// when launching or interacting with external text editors. Each variant captures
/// relevant information such as the editor command and underlying IO errors.
///
/// # Examples
///
/// ```
/// use journal::errors::EditorError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "command not found");
/// let error = EditorError::CommandNotFound {
///     command: "vim".to_string(),
///     source: io_error,
/// };
///
/// assert!(format!("{}", error).contains("not found"));
/// assert!(format!("{}", error).contains("vim"));
/// ```
#[derive(Debug, Error)]
pub enum EditorError {
    /// Error when the specified editor command cannot be found.
    #[error("Editor command '{command}' not found: {source}. Please check that the editor is installed and available in your PATH.")]
    CommandNotFound {
        /// The editor command that was not found
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when permission is denied to execute the editor command.
    #[error("Permission denied when trying to execute editor '{command}': {source}. Please check file permissions or try running with appropriate access rights.")]
    PermissionDenied {
        /// The editor command that had permission denied
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the editor command fails to execute due to other I/O errors.
    #[error("Failed to execute editor '{command}': {source}. Please check system resources, disk space, or editor installation.")]
    ExecutionFailed {
        /// The editor command that failed to execute
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the editor exits with a non-zero status code.
    #[error("Editor '{command}' exited with non-zero status code: {status_code}. The entry file was created and is left in place.")]
    NonZeroExit {
        /// The editor command that exited with a non-zero status
        command: String,
        /// The exit status code
        status_code: i32,
    },
}

/// Represents all possible errors that can occur in the journal application.
///
/// This enum is the central error type used across the application, with variants
/// for different error categories. It uses `thiserror` for deriving the `Error` trait
/// implementation and formatted error messages.
///
/// # Examples
///
/// ```
/// use journal::errors::AppError;
///
/// let error = AppError::Config("Base directory not set".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Base directory not set");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors in journal entry logic (e.g., an unknown entry or an invalid file name).
    #[error("Journal logic error: {0}")]
    Journal(String),

    /// A path or file name pattern could not be resolved.
    #[error("Template error: {0}")]
    Template(#[from] TemplateSyntaxError),

    /// Calendar arithmetic failed for the supplied instant.
    #[error("Calendar error: {0}")]
    Calendar(#[from] CalendarError),

    /// Errors when interacting with the text editor.
    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
pub type AppResult<T> = Result<T, AppError>;
