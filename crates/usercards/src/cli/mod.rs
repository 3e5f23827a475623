//! Command-line interface for usercards.
//!
//! This module provides the CLI structure and command handlers for the
//! `usercards` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ClearCommand, ConfigCommand, DeleteCommand, EditCommand, ListCommand,
    OutputFormat, RecordFields, StatusCommand,
};

/// usercards - Keep a list of user cards
///
/// Records are keyed by email and stored locally. Every command mounts the
/// card list, drives the form or a card's controls, and reports the result.
#[derive(Debug, Parser)]
#[command(name = "usercards")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every stored card
    List(ListCommand),

    /// Submit a new user through the form
    Add(AddCommand),

    /// Load a card into the form, optionally changing and resubmitting it
    Edit(EditCommand),

    /// Delete a card
    Delete(DeleteCommand),

    /// Delete every card
    Clear(ClearCommand),

    /// Print the mounted page as HTML
    Render,

    /// Show storage status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli_with(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Render,
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "usercards");
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;

        assert_eq!(cli_with(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(3, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli_with(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli_with(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_format() {
        let cli = Cli::try_parse_from(["usercards", "list", "--format", "json"]).unwrap();
        match cli.command {
            Command::List(cmd) => assert_eq!(cmd.format, OutputFormat::Json),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_add() {
        let args = [
            "usercards",
            "add",
            "--name",
            "Ivan",
            "--second-name",
            "Petrov",
            "--date-of-birth",
            "1990-01-01",
            "--email",
            "ivan@x.com",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Add(cmd) = cli.command else {
            panic!("expected add");
        };
        assert!(cmd.fields.to_record().is_complete());
        assert_eq!(cmd.fields.email.as_deref(), Some("ivan@x.com"));
    }

    #[test]
    fn test_parse_add_without_flags() {
        let cli = Cli::try_parse_from(["usercards", "add"]).unwrap();
        let Command::Add(cmd) = cli.command else {
            panic!("expected add");
        };
        assert!(cmd.fields.overrides().is_empty());
    }

    #[test]
    fn test_parse_edit_with_override() {
        let cli =
            Cli::try_parse_from(["usercards", "edit", "a@x.com", "--name", "A2"]).unwrap();
        let Command::Edit(cmd) = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(cmd.key, "a@x.com");
        assert_eq!(cmd.fields.name.as_deref(), Some("A2"));
    }

    #[test]
    fn test_parse_delete_requires_email() {
        assert!(Cli::try_parse_from(["usercards", "delete"]).is_err());
    }

    #[test]
    fn test_parse_clear_yes() {
        let cli = Cli::try_parse_from(["usercards", "clear", "-y"]).unwrap();
        assert!(matches!(cli.command, Command::Clear(ClearCommand { yes: true })));
    }

    #[test]
    fn test_parse_config_validate() {
        let cli =
            Cli::try_parse_from(["usercards", "config", "validate", "--file", "x.toml"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let args = vec!["usercards", "-c", "/custom/config.toml", "status"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_verbose() {
        let cli = Cli::try_parse_from(["usercards", "-vv", "render"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_with_quiet() {
        let cli = Cli::try_parse_from(["usercards", "status", "-q"]).unwrap();
        assert!(cli.quiet);
    }
}
