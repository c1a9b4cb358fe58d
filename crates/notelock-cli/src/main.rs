//! Notelock CLI - a plain-text note editor that can lock the current note
//!
//! This is the command-line interface for Notelock. It runs an editing
//! session over the core library's document and lock controller.

use clap::Parser;

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod session;
mod ui;

use app::AppContext;
use cli::{Cli, Commands, EditArgs};
use errors::CliError;
use ui::print_error;

fn main() {
    let cli = Cli::parse();
    let app = AppContext::new(&cli);

    let level = app
        .config()
        .map(|config| config.log.level.clone())
        .unwrap_or_else(|_| "warn".to_string());
    if let Err(err) = logging::init(&level) {
        eprintln!("{}", err);
    }

    if let Err(err) = run(&cli, &app) {
        let ui = app.ui_context();
        let (message, hint) = split_error_hint(&err);
        print_error(&ui, &message, hint.as_deref());
        std::process::exit(errors::exit_code_for(&err));
    }
}

fn run(cli: &Cli, app: &AppContext) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Edit(args)) => commands::handle_edit(app, args),
        Some(Commands::Init(args)) => commands::handle_init(app, args),
        Some(Commands::Completions(args)) => commands::handle_completions(args.shell),
        None => commands::handle_edit(app, &EditArgs::default()),
    }
}

/// Split an error into its message and an optional hint.
///
/// `CliError::NotFound` carries its hint on a second line prefixed "Hint: ".
fn split_error_hint(err: &anyhow::Error) -> (String, Option<String>) {
    if let Some(CliError::NotFound { message, hint }) = err.downcast_ref::<CliError>() {
        let hint = hint.strip_prefix("Hint: ").unwrap_or(hint);
        return (message.clone(), Some(hint.to_string()));
    }
    (err.to_string(), None)
}
