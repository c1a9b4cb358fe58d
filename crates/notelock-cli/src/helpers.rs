//! Prompt and editor helper functions for the CLI.

use std::io;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use dialoguer::{Confirm, Password};

use notelock_core::PassphraseEntry;

use crate::constants::PASSPHRASE_ENV;

/// Resolve a passphrase: `NOTELOCK_PASSPHRASE` first, then an interactive prompt.
///
/// Empty input or Ctrl-C at the prompt is a cancel, not an error.
pub fn prompt_passphrase(prompt: &str, interactive: bool) -> anyhow::Result<PassphraseEntry> {
    if let Some(entry) = passphrase_from_env(std::env::var(PASSPHRASE_ENV).ok()) {
        return Ok(entry);
    }
    if !interactive {
        return Err(anyhow::anyhow!(
            "No passphrase provided and no TTY available. Set {}.",
            PASSPHRASE_ENV
        ));
    }
    let result = Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact();
    passphrase_from_prompt(result)
}

/// An unset or empty variable defers to the prompt; anything else, including
/// whitespace, is the passphrase.
fn passphrase_from_env(value: Option<String>) -> Option<PassphraseEntry> {
    value
        .filter(|value| !value.is_empty())
        .map(PassphraseEntry::from_input)
}

fn passphrase_from_prompt(
    result: Result<String, dialoguer::Error>,
) -> anyhow::Result<PassphraseEntry> {
    match result {
        Ok(value) => Ok(PassphraseEntry::from_input(value)),
        Err(dialoguer::Error::IO(err)) if err.kind() == io::ErrorKind::Interrupted => {
            Ok(PassphraseEntry::Cancelled)
        }
        Err(err) => Err(anyhow::anyhow!("Failed to read passphrase: {}", err)),
    }
}

/// Ask a yes/no question; non-interactive sessions take `default`.
pub fn confirm(prompt: &str, default: bool, interactive: bool) -> anyhow::Result<bool> {
    if !interactive {
        return Ok(default);
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))
}

/// Open an external editor on `initial` and return the edited text.
///
/// The editor is `editor_override`, else `$EDITOR`. The temp file is removed
/// afterwards whether or not the editor succeeds.
pub fn compose_in_editor(initial: &str, editor_override: Option<&str>) -> anyhow::Result<String> {
    let editor = editor_override
        .map(|value| value.to_string())
        .or_else(|| std::env::var("EDITOR").ok())
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            anyhow::anyhow!("$EDITOR is not set; use `set <text>` or configure [editor] command")
        })?;

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| anyhow::anyhow!("System time error: {}", e))?
        .as_nanos();
    let filename = format!("notelock_{}_{}.txt", std::process::id(), nanos);
    let path = std::env::temp_dir().join(filename);

    std::fs::write(&path, initial)
        .map_err(|e| anyhow::anyhow!("Failed to create temp file: {}", e))?;

    let status = Command::new(&editor).arg(&path).status();
    let contents = match status {
        Ok(status) if status.success() => std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Failed to read temp file: {}", e)),
        Ok(_) => Err(anyhow::anyhow!("Editor exited with failure")),
        Err(e) => Err(anyhow::anyhow!("Failed to launch editor {}: {}", editor, e)),
    };
    let _ = std::fs::remove_file(&path);

    contents
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_result_maps_to_entry() {
        let entry = passphrase_from_prompt(Ok("secret".to_string())).unwrap();
        assert!(!entry.is_cancelled());

        let empty = passphrase_from_prompt(Ok(String::new())).unwrap();
        assert!(empty.is_cancelled());
    }

    #[test]
    fn test_env_passphrase_keeps_whitespace() {
        let entry = passphrase_from_env(Some(" ".to_string())).unwrap();
        assert!(!entry.is_cancelled());
    }

    #[test]
    fn test_env_passphrase_unset_or_empty_defers() {
        assert!(passphrase_from_env(None).is_none());
        assert!(passphrase_from_env(Some(String::new())).is_none());
    }

    #[test]
    fn test_interrupted_prompt_is_cancel() {
        let interrupted = dialoguer::Error::IO(io::Error::new(io::ErrorKind::Interrupted, "^C"));
        let entry = passphrase_from_prompt(Err(interrupted)).unwrap();
        assert!(entry.is_cancelled());
    }

    #[test]
    fn test_other_prompt_error_is_error() {
        let broken = dialoguer::Error::IO(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
        assert!(passphrase_from_prompt(Err(broken)).is_err());
    }

    #[test]
    fn test_confirm_non_interactive_uses_default() {
        assert!(confirm("Quit?", true, false).unwrap());
        assert!(!confirm("Quit?", false, false).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_compose_with_editor_that_keeps_text() {
        // `true` exits successfully without touching the file.
        let text = compose_in_editor("draft text\n", Some("true")).unwrap();
        assert_eq!(text, "draft text\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_compose_with_failing_editor() {
        let err = compose_in_editor("draft", Some("false")).unwrap_err();
        assert!(err.to_string().contains("Editor exited with failure"));
    }
}
