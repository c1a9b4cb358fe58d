//! Resolved passphrase prompt results.
//!
//! The UI owns the prompt; the core only sees its outcome. Per the current
//! design the passphrase gates the operation (non-empty means "proceed") but
//! is never compared, stored, or used to derive key material.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Outcome of a passphrase prompt.
pub enum PassphraseEntry {
    /// The user entered a passphrase.
    Provided(SecretString),
    /// The prompt was dismissed.
    Cancelled,
}

impl PassphraseEntry {
    /// Wrap raw prompt input; empty input counts as a cancel.
    pub fn from_input(value: String) -> Self {
        if value.is_empty() {
            Self::Cancelled
        } else {
            Self::Provided(SecretString::from(value))
        }
    }

    /// True for `Cancelled` and for a provided but empty passphrase.
    pub fn is_cancelled(&self) -> bool {
        match self {
            Self::Provided(secret) => secret.expose_secret().is_empty(),
            Self::Cancelled => true,
        }
    }
}

impl fmt::Debug for PassphraseEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provided(_) => f.write_str("PassphraseEntry::Provided([REDACTED])"),
            Self::Cancelled => f.write_str("PassphraseEntry::Cancelled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_cancel() {
        assert!(PassphraseEntry::from_input(String::new()).is_cancelled());
        assert!(PassphraseEntry::Cancelled.is_cancelled());
    }

    #[test]
    fn test_provided_empty_secret_is_cancel() {
        let entry = PassphraseEntry::Provided(SecretString::from(String::new()));
        assert!(entry.is_cancelled());
    }

    #[test]
    fn test_whitespace_is_a_passphrase() {
        assert!(!PassphraseEntry::from_input(" ".to_string()).is_cancelled());
        assert!(!PassphraseEntry::from_input("pw".to_string()).is_cancelled());
    }

    #[test]
    fn test_debug_redacts() {
        let entry = PassphraseEntry::from_input("hunter2".to_string());
        let debug_output = format!("{:?}", entry);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("hunter2"));
    }
}
