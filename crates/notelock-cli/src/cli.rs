use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use notelock_core::VERSION;

/// Notelock - a plain-text note editor that can lock the current note in place
#[derive(Parser)]
#[command(name = "notelock")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file
    #[arg(long, global = true, env = "NOTELOCK_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit JSON for status output
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open an interactive editing session (default)
    Edit(EditArgs),

    /// Write a default config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `edit` command
#[derive(Args, Default)]
pub struct EditArgs {
    /// Plain-text note to load into the session
    #[arg(value_name = "FILE")]
    pub file: Option<String>,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["notelock"]).expect("parse");
        assert!(cli.command.is_none());
        assert!(!cli.quiet);
    }

    #[test]
    fn test_edit_with_file_and_global_flags() {
        let cli = Cli::try_parse_from(["notelock", "edit", "notes.txt", "--ascii", "-q"])
            .expect("parse");
        assert!(cli.ascii);
        assert!(cli.quiet);
        match cli.command {
            Some(Commands::Edit(args)) => assert_eq!(args.file.as_deref(), Some("notes.txt")),
            _ => panic!("expected edit command"),
        }
    }

    #[test]
    fn test_init_force() {
        let cli = Cli::try_parse_from(["notelock", "init", "--force"]).expect("parse");
        assert!(matches!(cli.command, Some(Commands::Init(InitArgs { force: true }))));
    }
}
