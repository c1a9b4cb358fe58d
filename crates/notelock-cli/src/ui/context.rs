//! Terminal detection for session output.

use std::io::IsTerminal;

use super::mode::OutputMode;

/// Output switches from command-line flags merged with config.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiFlags {
    pub json: bool,
    pub no_color: bool,
    pub ascii: bool,
}

/// Facts about the process's terminal, gathered once at startup.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalInfo {
    pub stdout_tty: bool,
    pub stdin_tty: bool,
    /// `TERM=dumb`
    pub dumb: bool,
    /// `NO_COLOR` is set
    pub no_color_env: bool,
    pub columns: Option<usize>,
}

impl TerminalInfo {
    /// Inspect stdin/stdout and the environment.
    pub fn probe() -> Self {
        Self {
            stdout_tty: std::io::stdout().is_terminal(),
            stdin_tty: std::io::stdin().is_terminal(),
            dumb: std::env::var("TERM").is_ok_and(|term| term == "dumb"),
            no_color_env: std::env::var_os("NO_COLOR").is_some(),
            columns: terminal_columns(),
        }
    }
}

/// Resolved output settings shared by every renderer.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Both ends are terminals, so prompts can be shown
    pub interactive: bool,
    pub color: bool,
    pub unicode: bool,
    /// Terminal width in columns
    pub width: usize,
    pub mode: OutputMode,
}

impl UiContext {
    /// Probe the terminal and resolve against `flags`.
    pub fn detect(flags: UiFlags) -> Self {
        Self::resolve(flags, TerminalInfo::probe())
    }

    pub fn resolve(flags: UiFlags, term: TerminalInfo) -> Self {
        let capable = term.stdout_tty && !term.dumb;
        Self {
            interactive: term.stdout_tty && term.stdin_tty,
            color: capable && !flags.no_color && !term.no_color_env,
            unicode: !flags.ascii,
            width: term.columns.filter(|&cols| cols > 0).unwrap_or(80),
            mode: OutputMode::resolve(flags.json, capable),
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// `COLUMNS`, else the window size of stdout.
fn terminal_columns() -> Option<usize> {
    if let Some(cols) = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|&cols| cols > 0)
    {
        return Some(cols);
    }

    #[cfg(unix)]
    {
        let mut size = libc::winsize {
            ws_row: 0,
            ws_col: 0,
            ws_xpixel: 0,
            ws_ypixel: 0,
        };
        // SAFETY: TIOCGWINSZ only writes into the provided winsize.
        let rc = unsafe {
            libc::ioctl(
                libc::STDOUT_FILENO,
                libc::TIOCGWINSZ,
                &mut size as *mut libc::winsize,
            )
        };
        if rc == 0 && size.ws_col > 0 {
            return Some(usize::from(size.ws_col));
        }
    }

    None
}
