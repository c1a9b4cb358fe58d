//! Session keys for a single lock cycle.
//!
//! Each successful lock generates a fresh random age x25519 identity. The
//! secret half lives only inside a [`SecretString`] (zeroized on drop) and is
//! parsed back into an identity just long enough to decrypt. Nothing here is
//! derived from, or checked against, the user's passphrase.
//!
//! age provides the authenticated encryption: the file key is wrapped to the
//! session recipient, the header is HMAC-authenticated, and the payload is
//! ChaCha20-Poly1305 in the STREAM construction. Any modification of the
//! ciphertext, or a different session key, fails decryption.

use std::fmt;
use std::io::{Read, Write};
use std::iter;

use age::x25519;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use zeroize::Zeroizing;

use crate::error::{NotelockError, Result};

/// Symmetric key material for one lock cycle.
pub struct SessionKey {
    secret: SecretString,
    recipient: x25519::Recipient,
}

impl SessionKey {
    /// Generate a fresh random key.
    pub fn generate() -> Self {
        let identity = x25519::Identity::generate();
        let recipient = identity.to_public();
        Self {
            secret: identity.to_string(),
            recipient,
        }
    }

    /// Public fingerprint of this key, safe to display or log.
    pub fn fingerprint(&self) -> String {
        self.recipient.to_string()
    }

    /// Encrypt `plaintext` under this key.
    ///
    /// # Errors
    ///
    /// Returns `NotelockError::Crypto` if the age stream cannot be written.
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let encryptor =
            age::Encryptor::with_recipients(iter::once(&self.recipient as &dyn age::Recipient))
                .map_err(|e| NotelockError::Crypto(format!("Failed to create encryptor: {}", e)))?;

        let mut sealed = Vec::new();
        let mut writer = encryptor
            .wrap_output(&mut sealed)
            .map_err(|e| NotelockError::Crypto(format!("Failed to create encryptor: {}", e)))?;

        writer
            .write_all(plaintext)
            .map_err(|e| NotelockError::Crypto(format!("Encryption write failed: {}", e)))?;

        writer
            .finish()
            .map_err(|e| NotelockError::Crypto(format!("Encryption finish failed: {}", e)))?;

        Ok(sealed)
    }

    /// Decrypt and authenticate `sealed` with this key.
    ///
    /// # Errors
    ///
    /// Returns `NotelockError::Decryption` for every failure: malformed
    /// input, a foreign key, or any modification of the ciphertext.
    pub fn open(&self, sealed: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        let identity = self.identity()?;
        let decryptor = age::Decryptor::new(sealed).map_err(|_| NotelockError::Decryption)?;
        let mut reader = decryptor
            .decrypt(iter::once(&identity as &dyn age::Identity))
            .map_err(|_| NotelockError::Decryption)?;

        let mut plaintext = Zeroizing::new(Vec::new());
        reader
            .read_to_end(&mut plaintext)
            .map_err(|_| NotelockError::Decryption)?;

        Ok(plaintext)
    }

    fn identity(&self) -> Result<x25519::Identity> {
        self.secret
            .expose_secret()
            .parse::<x25519::Identity>()
            .map_err(|e| NotelockError::Crypto(format!("Session key unusable: {}", e)))
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKey")
            .field("secret", &"[REDACTED]")
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

/// The key for a document's currently open lock interval.
#[derive(Debug)]
pub struct LockSession {
    key: SessionKey,
    locked_at: DateTime<Utc>,
}

impl LockSession {
    pub fn new(key: SessionKey) -> Self {
        Self {
            key,
            locked_at: Utc::now(),
        }
    }

    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    /// When the lock cycle opened.
    pub fn locked_at(&self) -> DateTime<Utc> {
        self.locked_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_open_round_trip() {
        let key = SessionKey::generate();
        let sealed = key.seal(b"Hello, World! This is secret data.").unwrap();
        let opened = key.open(&sealed).unwrap();
        assert_eq!(opened.as_slice(), b"Hello, World! This is secret data.");
    }

    #[test]
    fn test_sealed_differs_from_plaintext() {
        let key = SessionKey::generate();
        let plaintext = b"secret data with marker: PLAINTEXT_MARKER_123";
        let sealed = key.seal(plaintext).unwrap();

        assert!(!sealed.is_empty());
        let haystack = String::from_utf8_lossy(&sealed);
        assert!(!haystack.contains("PLAINTEXT_MARKER_123"));
    }

    #[test]
    fn test_foreign_key_fails() {
        let first = SessionKey::generate();
        let second = SessionKey::generate();
        let sealed = second.seal(b"secret data").unwrap();

        assert!(matches!(first.open(&sealed), Err(NotelockError::Decryption)));
    }

    #[test]
    fn test_generated_keys_differ() {
        let first = SessionKey::generate();
        let second = SessionKey::generate();
        assert_ne!(first.fingerprint(), second.fingerprint());
    }

    #[test]
    fn test_corrupted_data_fails() {
        let key = SessionKey::generate();
        let mut sealed = key.seal(b"secret data").unwrap();
        let len = sealed.len();
        sealed[len / 2] ^= 0xFF;

        assert!(matches!(key.open(&sealed), Err(NotelockError::Decryption)));
    }

    #[test]
    fn test_truncated_data_fails() {
        let key = SessionKey::generate();
        let sealed = key.seal(b"secret data").unwrap();

        let result = key.open(&sealed[..sealed.len() - 1]);
        assert!(matches!(result, Err(NotelockError::Decryption)));
    }

    #[test]
    fn test_garbage_fails_cleanly() {
        let key = SessionKey::generate();
        assert!(matches!(key.open(b""), Err(NotelockError::Decryption)));
        assert!(matches!(
            key.open(b"hello world"),
            Err(NotelockError::Decryption)
        ));
    }

    #[test]
    fn test_empty_plaintext() {
        let key = SessionKey::generate();
        let sealed = key.seal(b"").unwrap();
        assert!(key.open(&sealed).unwrap().is_empty());
    }

    #[test]
    fn test_large_plaintext() {
        let key = SessionKey::generate();
        let plaintext = vec![0x42u8; 1024 * 1024];
        let sealed = key.seal(&plaintext).unwrap();
        assert_eq!(key.open(&sealed).unwrap().as_slice(), plaintext.as_slice());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let key = SessionKey::generate();
        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("AGE-SECRET-KEY"));
        assert!(!debug_output.contains(key.secret.expose_secret()));
    }
}
