//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::record::{Field, Record};

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Values typed into the form. Omitted flags stay empty.
#[derive(Debug, Default, Args)]
pub struct RecordFields {
    /// First name
    #[arg(long)]
    pub name: Option<String>,

    /// Second name
    #[arg(long)]
    pub second_name: Option<String>,

    /// Date of birth, as typed
    #[arg(long)]
    pub date_of_birth: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,
}

impl RecordFields {
    /// Pair each given value with its form field, in form order.
    #[must_use]
    pub fn overrides(&self) -> Vec<(Field, &str)> {
        let values = [
            &self.name,
            &self.second_name,
            &self.date_of_birth,
            &self.email,
        ];
        Field::ALL
            .into_iter()
            .zip(values)
            .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
            .collect()
    }

    /// Build a record from the given values, empty where omitted.
    #[must_use]
    pub fn to_record(&self) -> Record {
        Record::from_values(
            [
                &self.name,
                &self.second_name,
                &self.date_of_birth,
                &self.email,
            ]
            .map(|value| value.clone().unwrap_or_default()),
        )
    }
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Values to submit
    #[command(flatten)]
    pub fields: RecordFields,
}

/// Edit command arguments.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Email of the card to edit
    #[arg(value_name = "EMAIL")]
    pub key: String,

    /// Replacement values; without any, the loaded form is printed
    #[command(flatten)]
    pub fields: RecordFields,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Email of the card to delete
    pub email: String,
}

/// Clear command arguments.
#[derive(Debug, Args)]
pub struct ClearCommand {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}
