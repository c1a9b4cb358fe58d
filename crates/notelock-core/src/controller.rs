//! Lock and unlock transitions.
//!
//! `LockController` owns the session key for every locked document and is the
//! only component that may replace a locked document's text. Each transition
//! is all-or-nothing: every fallible step (key generation, sealing, decoding,
//! decrypting) runs before any state is touched, and the commit applies the
//! session-table change and the document's text and flag together.
//!
//! ## Concurrency
//!
//! The controller is `Send + Sync`. Its mutex guards only the session table
//! and is never held while encrypting or decrypting, so documents proceed
//! independently. Calls on the same document are serialized by the exclusive
//! `&mut Document` borrow each transition requires.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::document::{Document, DocumentId};
use crate::error::{NotelockError, Result};
use crate::passphrase::PassphraseEntry;
use crate::session::{LockSession, SessionKey};
use crate::token;

/// Successful outcome of a lock or unlock call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The document is now locked.
    Locked,
    /// The document is now unlocked.
    Unlocked,
    /// The passphrase prompt was dismissed; nothing changed.
    Cancelled,
}

/// Performs lock/unlock transitions and holds their session keys.
#[derive(Default)]
pub struct LockController {
    sessions: Mutex<HashMap<DocumentId, Arc<LockSession>>>,
}

impl LockController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encrypt the document in place under a fresh session key.
    ///
    /// # Errors
    ///
    /// - `AlreadyLocked` if the document is locked
    /// - `Crypto` if encryption fails (the document is untouched)
    pub fn lock(&self, document: &mut Document, passphrase: &PassphraseEntry) -> Result<Transition> {
        self.check_lockable(document)?;
        if passphrase.is_cancelled() {
            debug!(document = %document.id(), "lock cancelled");
            return Ok(Transition::Cancelled);
        }

        let key = SessionKey::generate();
        let sealed = key.seal(document.text().as_bytes())?;
        let encoded = token::encode(&sealed);

        let session = Arc::new(LockSession::new(key));
        // Replacing an existing entry drops the stale key.
        self.table().insert(document.id(), session);
        document.force_set_text(encoded, true);

        info!(document = %document.id(), "note locked");
        Ok(Transition::Locked)
    }

    /// Decrypt the document in place and discard its session key.
    ///
    /// # Errors
    ///
    /// - `NotLocked` if the document is unlocked
    /// - `NoActiveKey` if no session key is held for the document
    /// - `Decryption` if the token is malformed, was altered, or belongs to
    ///   another key (the document stays locked and unchanged)
    pub fn unlock(
        &self,
        document: &mut Document,
        passphrase: &PassphraseEntry,
    ) -> Result<Transition> {
        if !document.is_locked() {
            return Err(NotelockError::NotLocked);
        }
        if passphrase.is_cancelled() {
            debug!(document = %document.id(), "unlock cancelled");
            return Ok(Transition::Cancelled);
        }

        let session = self.session(document.id()).ok_or(NotelockError::NoActiveKey)?;
        let plaintext = match Self::recover(&session, document.text()) {
            Ok(plaintext) => plaintext,
            Err(err) => {
                warn!(document = %document.id(), "unlock failed: invalid password or corrupted data");
                return Err(err);
            }
        };

        {
            let mut table = self.table();
            if table
                .get(&document.id())
                .is_some_and(|current| Arc::ptr_eq(current, &session))
            {
                table.remove(&document.id());
            }
        }
        drop(session);
        document.force_set_text(plaintext, false);

        info!(document = %document.id(), "note unlocked");
        Ok(Transition::Unlocked)
    }

    /// Check that `lock` would pass its state guard.
    pub fn check_lockable(&self, document: &Document) -> Result<()> {
        if document.is_locked() {
            return Err(NotelockError::AlreadyLocked);
        }
        Ok(())
    }

    /// Check that `unlock` would pass its state guard and has a key to use.
    pub fn check_unlockable(&self, document: &Document) -> Result<()> {
        if !document.is_locked() {
            return Err(NotelockError::NotLocked);
        }
        if !self.has_session(document.id()) {
            return Err(NotelockError::NoActiveKey);
        }
        Ok(())
    }

    /// Whether a session key is held for `id`.
    ///
    /// This is not the document's lock state: after [`forget`](Self::forget),
    /// or on a controller that never locked it, a document can be locked
    /// while this returns `false`. Use [`Document::is_locked`] for the state.
    pub fn has_session(&self, id: DocumentId) -> bool {
        self.table().contains_key(&id)
    }

    /// When the open lock cycle for `id` started.
    pub fn locked_since(&self, id: DocumentId) -> Option<DateTime<Utc>> {
        self.table().get(&id).map(|session| session.locked_at())
    }

    /// Public fingerprint of the session key for `id`.
    pub fn key_fingerprint(&self, id: DocumentId) -> Option<String> {
        self.table().get(&id).map(|session| session.key().fingerprint())
    }

    /// Discard the session key for `id`.
    ///
    /// A locked document whose key is forgotten can no longer be unlocked.
    /// Returns whether a key was held.
    pub fn forget(&self, id: DocumentId) -> bool {
        let removed = self.table().remove(&id).is_some();
        if removed {
            info!(document = %id, "session key discarded");
        }
        removed
    }

    /// Number of open lock cycles.
    pub fn active_sessions(&self) -> usize {
        self.table().len()
    }

    fn session(&self, id: DocumentId) -> Option<Arc<LockSession>> {
        self.table().get(&id).cloned()
    }

    fn recover(session: &LockSession, text: &str) -> Result<String> {
        let sealed = token::decode(text).map_err(|_| NotelockError::Decryption)?;
        let plaintext = session.key().open(&sealed)?;
        std::str::from_utf8(&plaintext)
            .map(str::to_owned)
            .map_err(|_| NotelockError::Decryption)
    }

    fn table(&self) -> MutexGuard<'_, HashMap<DocumentId, Arc<LockSession>>> {
        // Every table update is a single insert or remove, so a poisoned map is still consistent.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
