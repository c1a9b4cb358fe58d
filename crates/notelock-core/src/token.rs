//! Textual encoding of locked content.
//!
//! A token is `notelock:v1:` followed by the age ciphertext in unpadded
//! URL-safe base64. The version segment names the encryption scheme; the age
//! header inside carries its own format version, recipient stanza, and MAC.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::error::{NotelockError, Result};

/// Token prefix for the current scheme.
pub const TOKEN_PREFIX: &str = "notelock:v1:";

const SCHEME: &str = "notelock:";

/// Encode ciphertext as a token.
pub fn encode(ciphertext: &[u8]) -> String {
    let mut token = String::with_capacity(TOKEN_PREFIX.len() + ciphertext.len() * 4 / 3 + 4);
    token.push_str(TOKEN_PREFIX);
    URL_SAFE_NO_PAD.encode_string(ciphertext, &mut token);
    token
}

/// Decode a token back to ciphertext.
///
/// # Errors
///
/// Returns `NotelockError::InvalidInput` for any text that is not a
/// well-formed token: wrong scheme or version, empty body, characters outside
/// the alphabet, padding, or non-canonical trailing bits.
pub fn decode(token: &str) -> Result<Vec<u8>> {
    let body = match token.strip_prefix(TOKEN_PREFIX) {
        Some(body) => body,
        None if token.starts_with(SCHEME) => {
            return Err(NotelockError::InvalidInput(
                "Unsupported token version".to_string(),
            ))
        }
        None => {
            return Err(NotelockError::InvalidInput(
                "Text is not a notelock token".to_string(),
            ))
        }
    };

    if body.is_empty() {
        return Err(NotelockError::InvalidInput("Token body is empty".to_string()));
    }

    URL_SAFE_NO_PAD
        .decode(body)
        .map_err(|e| NotelockError::InvalidInput(format!("Malformed token: {}", e)))
}

/// Cheap check for text that looks like a token (prefix only).
pub fn looks_like_token(text: &str) -> bool {
    text.trim_start().starts_with(SCHEME)
}
