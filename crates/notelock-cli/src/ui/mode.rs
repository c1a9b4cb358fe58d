//! Output modes.

/// How session output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// JSON objects for `show`/`status`; confirmations are suppressed
    Json,
    /// Stable `key=value` and `[BADGE]` lines for scripts and pipes
    #[default]
    Plain,
    /// Styled output for a capable terminal
    Pretty,
}

impl OutputMode {
    /// `--json` always wins; otherwise pretty only on a capable terminal.
    pub fn resolve(json: bool, capable_terminal: bool) -> Self {
        match (json, capable_terminal) {
            (true, _) => Self::Json,
            (false, true) => Self::Pretty,
            (false, false) => Self::Plain,
        }
    }

    pub fn is_json(&self) -> bool {
        *self == Self::Json
    }

    pub fn is_pretty(&self) -> bool {
        *self == Self::Pretty
    }
}
