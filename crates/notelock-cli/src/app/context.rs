//! Application context for the Notelock CLI.
//!
//! Provides a unified context that combines CLI arguments with
//! lazily-loaded configuration.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;

use crate::cli::Cli;
use crate::config::{read_config_or_default, NotelockConfig};
use crate::ui::{UiContext, UiFlags};

use super::resolver::resolve_config_path;

/// Application context that bundles CLI args with configuration.
///
/// This avoids repeatedly loading config and threading multiple parameters
/// through handler functions.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<NotelockConfig>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Resolved config file path.
    pub fn config_path(&self) -> anyhow::Result<PathBuf> {
        resolve_config_path(self.cli)
    }

    /// Get the configuration, loading it lazily if needed.
    pub fn config(&self) -> anyhow::Result<&NotelockConfig> {
        self.config
            .get_or_try_init(|| read_config_or_default(&self.config_path()?))
    }

    /// Get the configured editor override, if any.
    pub fn editor(&self) -> anyhow::Result<Option<&str>> {
        Ok(self.config()?.editor.command.as_deref())
    }

    /// Build the UI context from flags, environment, and config.
    ///
    /// Config problems fall back to flag-only settings so errors can still be shown.
    pub fn ui_context(&self) -> UiContext {
        let (config_ascii, config_no_color) = match self.config() {
            Ok(config) => (config.ui.ascii, !config.ui.color),
            Err(_) => (false, false),
        };
        UiContext::detect(UiFlags {
            json: self.cli.json,
            no_color: self.cli.no_color || config_no_color,
            ascii: self.cli.ascii || config_ascii,
        })
    }
}
