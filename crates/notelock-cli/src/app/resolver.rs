//! Path resolution for config and note files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::default_config_path;
use crate::errors::CliError;

/// Resolve the config file path from `--config`/`NOTELOCK_CONFIG`, else the XDG default.
pub fn resolve_config_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    if let Some(value) = cli.config.as_deref() {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve a note path given on the command line; it must exist.
pub fn resolve_note_path(value: &str) -> anyhow::Result<PathBuf> {
    let path = PathBuf::from(value);
    if !path.is_file() {
        return Err(CliError::not_found(
            missing_note_message(&path),
            "Hint: Start without a file (`notelock edit`) and use `save <path>` to create one.",
        )
        .into());
    }
    Ok(path)
}

/// Error message when a note file is missing.
pub fn missing_note_message(path: &Path) -> String {
    format!("No note found at {}", path.display())
}
