//! The single text buffer the user is looking at, plus its lock flag.
//!
//! `Document` never holds key material. Its text is either user-authored
//! plaintext (unlocked) or the token produced by the most recent successful
//! lock (locked). Editor-facing mutation is rejected while locked; only the
//! lock controller may replace the text through the crate-private path.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroize;

use crate::error::{NotelockError, Result};

/// Stable identity of a document within a session.
///
/// The lock controller keys its session table by this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A text document with a lock flag.
pub struct Document {
    id: DocumentId,
    text: String,
    locked: bool,
}

impl Document {
    /// Create an empty, unlocked document.
    pub fn new() -> Self {
        Self::with_text(String::new())
    }

    /// Create an unlocked document holding `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            id: DocumentId::new(),
            text: text.into(),
            locked: false,
        }
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Current content, verbatim, regardless of lock state.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Number of characters (not bytes) in the current content.
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    /// Replace the content.
    ///
    /// # Errors
    ///
    /// Returns `NotelockError::ReadOnly` if the document is locked.
    pub fn set_text(&mut self, value: impl Into<String>) -> Result<()> {
        self.ensure_writable()?;
        self.replace(value.into());
        Ok(())
    }

    /// Append to the content.
    ///
    /// # Errors
    ///
    /// Returns `NotelockError::ReadOnly` if the document is locked.
    pub fn append_text(&mut self, value: &str) -> Result<()> {
        self.ensure_writable()?;
        self.text.push_str(value);
        Ok(())
    }

    /// Apply a lock transition result: text and flag change together.
    ///
    /// Bypasses the lock gate. The replaced buffer is zeroized, so plaintext
    /// does not linger in freed memory after a lock.
    pub(crate) fn force_set_text(&mut self, text: String, locked: bool) {
        self.replace(text);
        self.locked = locked;
    }

    fn ensure_writable(&self) -> Result<()> {
        if self.locked {
            return Err(NotelockError::ReadOnly);
        }
        Ok(())
    }

    fn replace(&mut self, text: String) {
        let mut previous = std::mem::replace(&mut self.text, text);
        previous.zeroize();
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("id", &self.id)
            .field("locked", &self.locked)
            .field("chars", &self.len_chars())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_is_empty_and_unlocked() {
        let doc = Document::new();
        assert_eq!(doc.text(), "");
        assert!(!doc.is_locked());
    }

    #[test]
    fn test_set_text_when_unlocked() {
        let mut doc = Document::new();
        doc.set_text("hello").unwrap();
        doc.append_text(" world").unwrap();
        assert_eq!(doc.text(), "hello world");
        assert_eq!(doc.len_chars(), 11);
    }

    #[test]
    fn test_set_text_rejected_when_locked() {
        let mut doc = Document::with_text("original");
        doc.force_set_text("notelock:v1:abc".to_string(), true);

        assert_eq!(doc.set_text("edit"), Err(NotelockError::ReadOnly));
        assert_eq!(doc.append_text("edit"), Err(NotelockError::ReadOnly));
        assert_eq!(doc.text(), "notelock:v1:abc");
        assert!(doc.is_locked());
    }

    #[test]
    fn test_force_set_text_applies_flag_and_text_together() {
        let mut doc = Document::with_text("plain");
        doc.force_set_text("token".to_string(), true);
        assert!(doc.is_locked());
        assert_eq!(doc.text(), "token");

        doc.force_set_text("plain".to_string(), false);
        assert!(!doc.is_locked());
        assert_eq!(doc.text(), "plain");
    }

    #[test]
    fn test_len_chars_counts_characters() {
        let doc = Document::with_text("h\u{e9}llo \u{1F512}");
        assert_eq!(doc.len_chars(), 7);
    }

    #[test]
    fn test_debug_hides_text() {
        let doc = Document::with_text("SECRET_MARKER");
        let debug_output = format!("{:?}", doc);
        assert!(!debug_output.contains("SECRET_MARKER"));
        assert!(debug_output.contains("chars"));
    }

    #[test]
    fn test_document_ids_are_unique() {
        assert_ne!(Document::new().id(), Document::new().id());
    }
}
