//! Application-level utilities for the Notelock CLI.
//!
//! This module provides:
//! - Config path resolution
//! - The application context shared by command handlers

mod context;
mod resolver;

// Re-export public API
pub use context::AppContext;
pub use resolver::{missing_note_message, resolve_config_path, resolve_note_path};
