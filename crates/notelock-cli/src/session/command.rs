//! Parsing of session command lines.

/// One line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Show,
    Set(String),
    Append(String),
    Clear,
    Edit,
    Open(String),
    Save(Option<String>),
    Lock,
    Unlock,
    Status,
    Help,
    Quit,
}

impl SessionCommand {
    /// Parse a command line. Blank lines yield `Ok(None)`.
    ///
    /// Text arguments to `set`/`append` are taken verbatim after the single
    /// separating space; everything else is trimmed.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        if trimmed.trim().is_empty() {
            return Ok(None);
        }

        let (name, rest) = match trimmed.split_once(' ') {
            Some((name, rest)) => (name, rest),
            None => (trimmed.trim_end(), ""),
        };
        let arg = rest.trim();

        let command = match name.to_lowercase().as_str() {
            "show" | "cat" => Self::Show,
            "set" => {
                if rest.is_empty() {
                    return Err("Usage: set <text> (use `clear` to empty the note)".to_string());
                }
                Self::Set(rest.to_string())
            }
            "append" | "a" => Self::Append(rest.to_string()),
            "clear" => Self::Clear,
            "edit" => Self::Edit,
            "open" | "load" => {
                if arg.is_empty() {
                    return Err("Usage: open <path>".to_string());
                }
                Self::Open(arg.to_string())
            }
            "save" | "w" => Self::Save((!arg.is_empty()).then(|| arg.to_string())),
            "lock" => Self::Lock,
            "unlock" => Self::Unlock,
            "status" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => {
                return Err(format!(
                    "Unknown command: {} (type `help` for a list)",
                    other
                ))
            }
        };
        Ok(Some(command))
    }

    /// Command name for logging; never includes note text.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Show => "show",
            Self::Set(_) => "set",
            Self::Append(_) => "append",
            Self::Clear => "clear",
            Self::Edit => "edit",
            Self::Open(_) => "open",
            Self::Save(_) => "save",
            Self::Lock => "lock",
            Self::Unlock => "unlock",
            Self::Status => "status",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }
}

/// Help text listing every session command.
pub const HELP: &str = "\
Commands:
  show              Print the note (hidden while locked)
  set <text>        Replace the note with <text>
  append <text>     Append <text> as a new line
  clear             Empty the note
  edit              Edit the note in $EDITOR
  open <path>       Load a plain-text file
  save [path]       Save to <path> or the current file
  lock              Encrypt the note in place
  unlock            Restore the locked note
  status            Show lock state and note size
  help              Show this help
  quit              End the session";
