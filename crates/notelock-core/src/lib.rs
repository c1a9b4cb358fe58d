//! # Notelock Core
//!
//! Core library for Notelock - a plain-text note editor that can lock the
//! current note by encrypting it in place and restore it on demand.
//!
//! This crate provides the document model, the lock/unlock state machine, and
//! session key handling, independent of any user interface.
//!
//! ## Architecture
//!
//! - **document**: The text buffer and lock flag
//! - **controller**: Lock/unlock transitions and the per-document key table
//! - **session**: Per-cycle session keys (age x25519, zeroized on drop)
//! - **token**: Textual encoding of locked content
//! - **passphrase**: Resolved passphrase prompt results
//! - **fs**: Plain-text load/save
//!
//! ## Security Model
//!
//! - A fresh random key is generated on every lock and lives only in memory
//!   until the matching unlock, which discards it
//! - Locked content is authenticated: any tampering fails unlock
//! - The passphrase gates the action but does not participate in key
//!   derivation or verification; security rests on the in-memory key
//!
//! We do NOT defend against:
//! - Access to process memory while a note is locked
//! - Loss of the session: restarting the process makes locked content
//!   unrecoverable

pub mod controller;
pub mod document;
pub mod error;
pub mod fs;
pub mod passphrase;
pub mod session;
pub mod token;

pub use controller::{LockController, Transition};
pub use document::{Document, DocumentId};
pub use error::{NotelockError, Result};
pub use passphrase::PassphraseEntry;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
