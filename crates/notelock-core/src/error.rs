//! Error types for Notelock core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-facing messages. No variant ever carries key material.

use thiserror::Error;

/// Result type alias for Notelock operations.
pub type Result<T> = std::result::Result<T, NotelockError>;

/// Core error type for Notelock operations.
///
/// Every variant is recoverable: a failed operation leaves the document and
/// its lock session exactly as they were.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotelockError {
    /// Editor-facing mutation attempted while the document is locked
    #[error("Document is locked; unlock it before editing")]
    ReadOnly,

    /// `lock` called on a document that is already locked
    #[error("Note is already locked")]
    AlreadyLocked,

    /// `unlock` called on a document that is not locked
    #[error("Note is not locked")]
    NotLocked,

    /// No session key is held for a locked document
    #[error("No active key for this note; its content cannot be recovered in this session")]
    NoActiveKey,

    /// Token decode or authenticated decryption failed.
    ///
    /// Tampering and key mismatch are deliberately indistinguishable.
    #[error("Invalid password or corrupted data")]
    Decryption,

    /// Encryption machinery failed while locking
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// File I/O error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl NotelockError {
    /// Whether this error reports a call from the wrong lock state.
    ///
    /// These are informational for the end user rather than failures.
    pub fn is_state_guard(&self) -> bool {
        matches!(self, Self::AlreadyLocked | Self::NotLocked | Self::ReadOnly)
    }
}

impl From<std::io::Error> for NotelockError {
    fn from(err: std::io::Error) -> Self {
        NotelockError::Storage(err.to_string())
    }
}
