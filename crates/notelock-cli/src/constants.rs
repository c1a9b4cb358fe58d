//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (config, note file).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Session ended with a note still locked (its content was discarded).
    pub const LOCKED_ON_EXIT: i32 = 5;
}

/// Environment variable holding a passphrase for non-interactive use.
pub const PASSPHRASE_ENV: &str = "NOTELOCK_PASSPHRASE";

/// Environment variable with a log filter (takes precedence over `RUST_LOG`).
pub const LOG_ENV: &str = "NOTELOCK_LOG";
