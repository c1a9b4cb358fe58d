//! Plain-text load/save with atomic writes.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::error::{NotelockError, Result};

/// Read a note from disk as UTF-8 text.
///
/// # Errors
///
/// Returns `NotelockError::Storage` if the file cannot be read or is not UTF-8.
pub fn load_text(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path).map_err(|e| {
        NotelockError::Storage(format!("Failed to read {}: {}", path.display(), e))
    })?;
    debug!(path = %path.display(), bytes = text.len(), "loaded note");
    Ok(text)
}

/// Write a note to disk atomically.
///
/// The text is written to a temp file next to `path`, synced, then renamed
/// over the destination, so a crash never leaves a half-written note.
///
/// # Errors
///
/// Returns `NotelockError::Storage` if any step fails; the temp file is
/// removed on failure.
pub fn save_text(path: &Path, text: &str) -> Result<()> {
    let temp_path = temp_path_for(path)?;
    let write_result = (|| -> io::Result<()> {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(text.as_bytes())?;
        file.sync_all()
    })();

    if let Err(err) = write_result {
        let _ = fs::remove_file(&temp_path);
        return Err(NotelockError::Storage(format!(
            "Failed to write {}: {}",
            path.display(),
            err
        )));
    }

    rename_with_fallback(&temp_path, path).map_err(|e| {
        NotelockError::Storage(format!("Failed to save {}: {}", path.display(), e))
    })?;
    debug!(path = %path.display(), bytes = text.len(), "saved note");
    Ok(())
}

/// Atomically rename a file, with fallback for platforms where rename fails if target exists.
///
/// On some platforms (notably Windows), `fs::rename` fails if the destination already exists.
/// This function handles that case by removing the destination first and retrying.
///
/// If the rename ultimately fails, the temp file is cleaned up.
///
/// # Errors
///
/// Returns an error if the rename fails even after the fallback attempt.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        // Best-effort replace on platforms where rename fails if target exists.
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            // Clean up the temp file on failure
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "Atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        })?;
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| NotelockError::InvalidInput(format!("Not a file path: {}", path.display())))?;
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| NotelockError::Storage(format!("System time error: {}", e)))?
        .as_nanos();
    let temp_name = format!(
        ".{}.{}.{}.tmp",
        file_name.to_string_lossy(),
        std::process::id(),
        nanos
    );
    Ok(path.with_file_name(temp_name))
}
