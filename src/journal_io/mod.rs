//! Journal I/O operations and file management.
//!
//! This module contains the I/O side of entry creation: directory creation,
//! creating the entry file and launching the external editor. It only acts on
//! an [`EntryPlan`] that has already been fully resolved.

#[cfg(unix)]
use crate::constants::{DEFAULT_DIR_PERMISSIONS, DEFAULT_FILE_PERMISSIONS};
use crate::errors::{AppError, AppResult, EditorError};
use crate::journal_core::EntryPlan;
#[cfg(unix)]
use std::fs::Permissions;
use std::fs::{self, DirBuilder, OpenOptions};
use std::io;
#[cfg(unix)]
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt, PermissionsExt};
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// Outcome of [`create_entry_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFileStatus {
    /// A new, empty file was created.
    Created,
    /// The file was already there and has not been touched.
    AlreadyExists,
}

/// Ensures a directory exists, creating it if necessary.
///
/// Every directory created along the way, not just the last one, gets
/// owner-only permissions (0o700) on Unix. Directories that already exist
/// keep their permissions.
///
/// # Errors
///
/// Returns:
/// - `AppError::Journal` if the provided path is not an absolute path
/// - `AppError::Io` if the directory creation fails due to permission issues,
///   invalid paths, or other filesystem errors
pub fn ensure_directory(dir: &Path) -> AppResult<()> {
    if !dir.is_absolute() {
        return Err(AppError::Journal(format!(
            "Entry directory path must be absolute: {}",
            dir.display()
        )));
    }

    if !dir.exists() {
        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(DEFAULT_DIR_PERMISSIONS);

        builder.create(dir).map_err(|e| {
            AppError::Io(io::Error::new(
                e.kind(),
                format!("Failed to create directory {}: {}", dir.display(), e),
            ))
        })?;

        #[cfg(unix)]
        {
            let permissions = Permissions::from_mode(DEFAULT_DIR_PERMISSIONS);
            fs::set_permissions(dir, permissions).map_err(|e| {
                AppError::Io(io::Error::new(
                    e.kind(),
                    format!("Failed to set secure permissions on directory: {}", e),
                ))
            })?;
        }
        debug!("Created directory {}", dir.display());
    }
    Ok(())
}

/// Creates an empty entry file unless one already exists.
///
/// An existing file is never truncated or modified. New files are created
/// with owner-only permissions (0o600) on Unix.
///
/// # Errors
///
/// Returns `AppError::Io` if the file could not be created for any reason
/// other than already existing.
pub fn create_entry_file(path: &Path) -> AppResult<EntryFileStatus> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(DEFAULT_FILE_PERMISSIONS);

    match options.open(path) {
        Ok(_) => {
            debug!("Created entry file {}", path.display());
            Ok(EntryFileStatus::Created)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            debug!("Entry file {} already exists", path.display());
            Ok(EntryFileStatus::AlreadyExists)
        }
        Err(e) => Err(AppError::Io(io::Error::new(
            e.kind(),
            format!("Failed to create entry file {}: {}", path.display(), e),
        ))),
    }
}

/// Launches an external editor on `path` and waits for it to exit.
///
/// # Errors
///
/// Returns `AppError::Editor` with a specific `EditorError` variant depending on what went wrong:
/// - `EditorError::CommandNotFound` if the editor command doesn't exist
/// - `EditorError::PermissionDenied` if permission is denied to execute the editor
/// - `EditorError::ExecutionFailed` for other I/O errors during execution
/// - `EditorError::NonZeroExit` if the editor exits with a non-zero status code
pub fn launch_editor(editor: &str, path: &Path) -> AppResult<()> {
    debug!("Launching editor: {} {}", editor, path.display());

    match Command::new(editor).arg(path).status() {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => Err(EditorError::NonZeroExit {
            command: editor.to_string(),
            status_code: status.code().unwrap_or(-1),
        }
        .into()),
        Err(e) => {
            let command = editor.to_string();
            let specific_error = match e.kind() {
                io::ErrorKind::NotFound => EditorError::CommandNotFound { command, source: e },
                io::ErrorKind::PermissionDenied => {
                    EditorError::PermissionDenied { command, source: e }
                }
                _ => EditorError::ExecutionFailed { command, source: e },
            };
            Err(specific_error.into())
        }
    }
}

/// Creates the entry described by `plan` and optionally opens it.
///
/// Runs directory creation, file creation and (if `open_editor`) the editor,
/// in that order. An editor failure leaves the created file in place.
///
/// # Errors
///
/// Propagates the errors of [`ensure_directory`], [`create_entry_file`] and
/// [`launch_editor`].
pub fn create_entry(plan: &EntryPlan, open_editor: bool) -> AppResult<EntryFileStatus> {
    ensure_directory(&plan.directory)?;
    let status = create_entry_file(&plan.path)?;

    match status {
        EntryFileStatus::Created => info!("Created entry '{}' at {}", plan.entry_id, plan.path.display()),
        EntryFileStatus::AlreadyExists => info!("Using existing entry at {}", plan.path.display()),
    }

    if open_editor {
        launch_editor(&plan.editor, &plan.path)?;
    }
    Ok(status)
}
