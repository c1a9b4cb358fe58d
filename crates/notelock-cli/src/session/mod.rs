//! Interactive editing session.
//!
//! A session owns one [`Document`] and the [`LockController`] holding its key.
//! Commands are read one line at a time; lock and unlock state guards are
//! checked before any passphrase prompt is shown.

mod command;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::{debug, info, warn};

use notelock_core::fs::{load_text, save_text};
use notelock_core::token;
use notelock_core::{Document, LockController, NotelockError, PassphraseEntry, Transition};

use crate::errors::CliError;
use crate::helpers::{compose_in_editor, confirm, prompt_passphrase};
use crate::ui::format::{format_bytes, format_datetime, truncate};
use crate::ui::theme::{LOCK, UNLOCK};
use crate::ui::{badge, divider, kv, print, print_error, Badge, UiContext};

use command::{SessionCommand, HELP};

/// Source of session input lines.
pub trait LineSource {
    /// Next line, or `None` at end of input.
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

/// Lines from any buffered reader.
pub struct ReaderLines<R>(pub R);

impl<R: BufRead> LineSource for ReaderLines<R> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        match self.0.read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }
}

/// Lines from stdin, locking it only for the duration of each read so
/// prompts can use the terminal in between.
pub struct StdinLines;

impl LineSource for StdinLines {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        match io::stdin().read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }
}

/// Where passphrases come from.
pub trait PassphraseSource {
    fn passphrase(&mut self, prompt: &str) -> anyhow::Result<PassphraseEntry>;
}

/// Environment variable first, then a hidden terminal prompt.
pub struct PromptPassphrase {
    pub interactive: bool,
}

impl PassphraseSource for PromptPassphrase {
    fn passphrase(&mut self, prompt: &str) -> anyhow::Result<PassphraseEntry> {
        prompt_passphrase(prompt, self.interactive)
    }
}

/// Session settings resolved from flags and config.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub quiet: bool,
    pub interactive: bool,
    pub editor: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// One editing session over a single note.
pub struct EditorSession<P> {
    ui: UiContext,
    options: SessionOptions,
    passphrases: P,
    controller: LockController,
    document: Document,
    path: Option<PathBuf>,
}

impl<P: PassphraseSource> EditorSession<P> {
    pub fn new(ui: UiContext, options: SessionOptions, passphrases: P) -> Self {
        Self {
            ui,
            options,
            passphrases,
            controller: LockController::new(),
            document: Document::new(),
            path: None,
        }
    }

    /// Start from a note loaded from `path`.
    pub fn with_file(mut self, path: PathBuf) -> anyhow::Result<Self> {
        self.open_path(path)?;
        Ok(self)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    /// Read and execute commands until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns `CliError::LockedOnExit` if the session ends while the note is
    /// locked, including when it ends on an I/O error; the key is discarded
    /// first. Other I/O errors are returned as-is.
    pub fn run(&mut self, input: &mut dyn LineSource) -> anyhow::Result<()> {
        match self.command_loop(input) {
            Ok(()) => self.finish(),
            Err(err) if self.document.is_locked() => {
                print_error(&self.ui, &err.to_string(), None);
                self.finish()
            }
            Err(err) => Err(err),
        }
    }

    fn command_loop(&mut self, input: &mut dyn LineSource) -> anyhow::Result<()> {
        loop {
            self.show_prompt()?;
            let line = match input.next_line()? {
                Some(line) => line,
                None => {
                    debug!("end of session input");
                    break;
                }
            };

            let command = match SessionCommand::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => {
                    print_error(&self.ui, &message, None);
                    continue;
                }
            };

            if self.execute(command)? == Flow::Quit {
                return Ok(());
            }
        }
        Ok(())
    }

    fn show_prompt(&self) -> io::Result<()> {
        if !self.options.interactive {
            return Ok(());
        }
        let symbol = if self.document.is_locked() {
            LOCK.get(self.ui.unicode)
        } else {
            UNLOCK.get(self.ui.unicode)
        };
        let mut stdout = io::stdout();
        write!(stdout, "notelock {}> ", symbol)?;
        stdout.flush()
    }

    fn execute(&mut self, command: SessionCommand) -> anyhow::Result<Flow> {
        debug!(command = command.name(), "session command");
        match command {
            SessionCommand::Show => self.show()?,
            SessionCommand::Set(text) => {
                let result = self.document.set_text(text);
                self.after_edit(result);
            }
            SessionCommand::Append(text) => {
                let result = self.append_line(&text);
                self.after_edit(result);
            }
            SessionCommand::Clear => {
                let result = self.document.set_text(String::new());
                self.after_edit(result);
            }
            SessionCommand::Edit => self.edit_external(),
            SessionCommand::Open(value) => {
                if let Err(err) = self.open(&value) {
                    print_error(&self.ui, &err.to_string(), None);
                }
            }
            SessionCommand::Save(value) => self.save(value),
            SessionCommand::Lock => self.lock(),
            SessionCommand::Unlock => self.unlock(),
            SessionCommand::Status => self.status()?,
            SessionCommand::Help => print(&self.ui, HELP),
            SessionCommand::Quit => return self.quit(),
        }
        Ok(Flow::Continue)
    }

    fn show(&self) -> anyhow::Result<()> {
        if self.ui.mode.is_json() {
            let text = (!self.document.is_locked()).then(|| self.document.text());
            let payload = serde_json::json!({
                "locked": self.document.is_locked(),
                "text": text,
            });
            println!("{}", serde_json::to_string(&payload)?);
            return Ok(());
        }

        if self.document.is_locked() {
            let message = format!(
                "{} Note is locked. Run `unlock` to restore it.",
                LOCK.get(self.ui.unicode)
            );
            print(&self.ui, &badge(&self.ui, Badge::Info, &message));
            return Ok(());
        }

        let text = self.document.text();
        let mut stdout = io::stdout();
        stdout.write_all(text.as_bytes())?;
        if !text.is_empty() && !text.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
        stdout.flush()?;
        Ok(())
    }

    fn append_line(&mut self, text: &str) -> notelock_core::Result<()> {
        let needs_break = {
            let current = self.document.text();
            !current.is_empty() && !current.ends_with('\n')
        };
        if needs_break {
            self.document.append_text("\n")?;
        }
        self.document.append_text(text)
    }

    fn after_edit(&self, result: notelock_core::Result<()>) {
        match result {
            Ok(()) => self.say(
                Badge::Ok,
                &format!("Text updated ({} chars).", self.document.len_chars()),
            ),
            Err(err) => self.report(&err),
        }
    }

    fn edit_external(&mut self) {
        if self.document.is_locked() {
            self.report(&NotelockError::ReadOnly);
            return;
        }
        let edited = compose_in_editor(self.document.text(), self.options.editor.as_deref());
        match edited {
            Ok(text) => {
                let result = self.document.set_text(text);
                self.after_edit(result);
            }
            Err(err) => print_error(&self.ui, &err.to_string(), None),
        }
    }

    fn open(&mut self, value: &str) -> anyhow::Result<()> {
        if self.document.is_locked() {
            return Err(anyhow::anyhow!(
                "Note is locked; unlock it before opening another file"
            ));
        }
        let path = PathBuf::from(value);
        if !path.is_file() {
            return Err(CliError::not_found(
                crate::app::missing_note_message(&path),
                "Hint: check the path",
            )
            .into());
        }
        self.open_path(path)?;
        self.say(
            Badge::Ok,
            &format!("Opened {} ({} chars).", value, self.document.len_chars()),
        );
        Ok(())
    }

    fn open_path(&mut self, path: PathBuf) -> anyhow::Result<()> {
        let text = load_text(&path)?;
        let looks_locked = token::looks_like_token(&text);
        self.document.set_text(text)?;
        info!(path = %path.display(), "opened note");
        if looks_locked {
            warn!(path = %path.display(), "opened file holds a locked note");
            self.caution(
                "This file holds a note locked in another session. Its key is gone, so it cannot be unlocked here.",
            );
        }
        self.path = Some(path);
        Ok(())
    }

    fn save(&mut self, value: Option<String>) {
        let path = match value.map(PathBuf::from).or_else(|| self.path.clone()) {
            Some(path) => path,
            None => {
                print_error(
                    &self.ui,
                    "No file to save to",
                    Some("Use `save <path>` to choose one."),
                );
                return;
            }
        };

        if let Err(err) = save_text(&path, self.document.text()) {
            print_error(&self.ui, &err.to_string(), None);
            return;
        }
        info!(path = %path.display(), locked = self.document.is_locked(), "saved note");
        self.say(
            Badge::Ok,
            &format!(
                "Saved {} to {}.",
                format_bytes(self.document.text().len() as u64),
                path.display()
            ),
        );
        if self.document.is_locked() {
            self.caution(
                "The saved file holds the locked note; it can only be unlocked in this session.",
            );
        }
        self.path = Some(path);
    }

    fn lock(&mut self) {
        if let Err(err) = self.controller.check_lockable(&self.document) {
            self.report(&err);
            return;
        }
        let entry = match self.passphrases.passphrase("Passphrase to lock the note") {
            Ok(entry) => entry,
            Err(err) => {
                print_error(&self.ui, &err.to_string(), None);
                return;
            }
        };
        match self.controller.lock(&mut self.document, &entry) {
            Ok(Transition::Locked) => self.say(Badge::Ok, "Note locked."),
            Ok(Transition::Cancelled) => self.say(Badge::Info, "Cancelled."),
            Ok(Transition::Unlocked) => {}
            Err(err) => self.report(&err),
        }
    }

    fn unlock(&mut self) {
        if let Err(err) = self.controller.check_unlockable(&self.document) {
            self.report(&err);
            return;
        }
        let entry = match self.passphrases.passphrase("Passphrase to unlock the note") {
            Ok(entry) => entry,
            Err(err) => {
                print_error(&self.ui, &err.to_string(), None);
                return;
            }
        };
        match self.controller.unlock(&mut self.document, &entry) {
            Ok(Transition::Unlocked) => self.say(Badge::Ok, "Note unlocked."),
            Ok(Transition::Cancelled) => self.say(Badge::Info, "Cancelled."),
            Ok(Transition::Locked) => {}
            Err(err) => self.report(&err),
        }
    }

    fn status(&self) -> anyhow::Result<()> {
        if self.ui.mode.is_json() {
            let id = self.document.id();
            let payload = serde_json::json!({
                "locked": self.document.is_locked(),
                "chars": self.document.len_chars(),
                "bytes": self.document.text().len(),
                "path": self.path.as_ref().map(|p| p.display().to_string()),
                "locked_since": self.controller.locked_since(id).map(|dt| dt.to_rfc3339()),
                "key_fingerprint": self.controller.key_fingerprint(id),
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
            return Ok(());
        }

        for line in self.status_lines() {
            println!("{}", line);
        }
        Ok(())
    }

    fn status_lines(&self) -> Vec<String> {
        let id = self.document.id();
        let pretty = self.ui.mode.is_pretty();
        let state = if self.document.is_locked() {
            "locked"
        } else {
            "unlocked"
        };
        let size = format_bytes(self.document.text().len() as u64);

        let mut lines = vec![
            kv(&self.ui, "State", state),
            kv(&self.ui, "Chars", &self.document.len_chars().to_string()),
            kv(&self.ui, "Size", &size),
        ];
        if let Some(path) = &self.path {
            lines.push(kv(&self.ui, "Path", &path.display().to_string()));
        }
        if let Some(since) = self.controller.locked_since(id) {
            lines.push(kv(&self.ui, "Locked Since", &format_datetime(&since, pretty)));
        }
        if let Some(fingerprint) = self.controller.key_fingerprint(id) {
            let shown = if pretty {
                truncate(&fingerprint, 16)
            } else {
                fingerprint
            };
            lines.push(kv(&self.ui, "Key", &shown));
        }
        if pretty {
            lines.insert(0, divider(&self.ui));
            lines.push(divider(&self.ui));
        }
        lines
    }

    fn quit(&mut self) -> anyhow::Result<Flow> {
        if !self.document.is_locked() {
            return Ok(Flow::Quit);
        }
        self.caution("The note is locked. Quitting discards its key and the content is lost.");
        if confirm("Quit anyway?", true, self.options.interactive)? {
            Ok(Flow::Quit)
        } else {
            Ok(Flow::Continue)
        }
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        if !self.document.is_locked() {
            return Ok(());
        }
        self.controller.forget(self.document.id());
        warn!(document = %self.document.id(), "session ended while locked");
        Err(CliError::LockedOnExit.into())
    }

    fn report(&self, err: &NotelockError) {
        match err {
            NotelockError::AlreadyLocked | NotelockError::ReadOnly => {
                self.caution(&err.to_string())
            }
            NotelockError::NotLocked => self.say(Badge::Info, &err.to_string()),
            NotelockError::NoActiveKey => print_error(
                &self.ui,
                &err.to_string(),
                Some("Locked content can only be restored in the session that locked it."),
            ),
            _ => print_error(&self.ui, &err.to_string(), None),
        }
    }

    /// Informational output, silenced by `--quiet`.
    fn say(&self, kind: Badge, message: &str) {
        if !self.options.quiet {
            print(&self.ui, &badge(&self.ui, kind, message));
        }
    }

    fn caution(&self, message: &str) {
        print(&self.ui, &badge(&self.ui, Badge::Warn, message));
    }
}
