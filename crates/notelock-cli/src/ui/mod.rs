//! UI primitives for the Notelock CLI.
//!
//! This module provides:
//! - **Context**: Terminal probing and flag resolution
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badge tokens, color palette, symbols
//! - **Render**: Headers, badges, key-value lines, hints, errors
//! - **Format**: String utilities (truncate, sizes, timestamps)

mod context;
pub mod format;
mod mode;
pub mod render;
pub mod theme;

// Re-export core types at module level
pub use context::{UiContext, UiFlags};
pub use mode::OutputMode;
pub use theme::Badge;

// Re-export commonly used render functions
pub use render::{badge, divider, header, hint, kv, print, print_error};
