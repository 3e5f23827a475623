//! `usercards` - CLI for the user card list
//!
//! Every command mounts the page over the configured database and then acts
//! the way a user would: typing into the form and clicking buttons.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use clap::Parser;

use usercards::cli::{Cli, Command, ConfigCommand, EditCommand, OutputFormat, RecordFields};
use usercards::controller::{self, Outcome, SubmitOutcome};
use usercards::storage::SqliteBackend;
use usercards::view::card::{card_control, displayed_record};
use usercards::view::page::field_label;
use usercards::view::{find_card, Action};
use usercards::{form, init_logging, AppState, Config, Field, Record, RecordStore};

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() -> CliResult {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::List(cmd) => handle_list(&config, cmd.format),
        Command::Add(cmd) => handle_add(&config, &cmd.fields),
        Command::Edit(cmd) => handle_edit(&config, &cmd),
        Command::Delete(cmd) => handle_delete(&config, &cmd.email),
        Command::Clear(cmd) => handle_clear(&config, cmd.yes),
        Command::Render => handle_render(&config),
        Command::Status(cmd) => handle_status(&config, cmd.json),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

/// Open the database and mount the page over its records.
fn mount(config: &Config) -> Result<AppState, Box<dyn std::error::Error>> {
    let backend = SqliteBackend::open(config.database_path())?;
    let store = RecordStore::open(Box::new(backend), config.storage.namespace_key.as_str())?;
    Ok(AppState::mount(store, config.render.clone())?)
}

/// Records as currently shown on the cards, in list order.
fn displayed_records(state: &AppState) -> Vec<Record> {
    state
        .document
        .children(state.targets.list)
        .iter()
        .filter_map(|card| displayed_record(&state.document, *card))
        .collect()
}

fn handle_list(config: &Config, format: OutputFormat) -> CliResult {
    let state = mount(config)?;
    let records = displayed_records(&state);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        _ if records.is_empty() => println!("No users stored."),
        OutputFormat::Plain => {
            for record in &records {
                println!(
                    "{} {}, {} <{}>",
                    record.name, record.second_name, record.date_of_birth, record.email
                );
            }
        }
        OutputFormat::Table => print_table(&records),
    }
    Ok(())
}

fn print_table(records: &[Record]) {
    let mut widths = Field::ALL.map(|field| field_label(field).chars().count());
    for record in records {
        for (width, value) in widths.iter_mut().zip(record.values()) {
            *width = (*width).max(value.chars().count());
        }
    }

    let row = |values: [&str; 4]| {
        values
            .iter()
            .zip(widths)
            .map(|(value, width)| format!("{value:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
    };

    println!("{}", row(Field::ALL.map(field_label)));
    let rule: Vec<_> = widths.iter().map(|width| "-".repeat(*width)).collect();
    println!("{}", rule.join("  "));
    for record in records {
        println!("{}", row(record.values()));
    }
}

fn handle_add(config: &Config, fields: &RecordFields) -> CliResult {
    let mut state = mount(config)?;
    form::fill(&mut state.document, &state.targets, &fields.to_record());

    let add = state.targets.add_button;
    report(controller::click(&mut state, add)?)
}

fn handle_edit(config: &Config, cmd: &EditCommand) -> CliResult {
    let mut state = mount(config)?;
    let edit = find_card(&state.document, state.targets.list, &cmd.key)
        .and_then(|card| card_control(&state.document, card, Action::EditCard))
        .ok_or_else(|| format!("no user with email {}", cmd.key))?;
    controller::click(&mut state, edit)?;

    let overrides = cmd.fields.overrides();
    if overrides.is_empty() {
        let loaded = form::read(&state.document, &state.targets);
        for field in Field::ALL {
            println!("{:<14} {}", format!("{}:", field_label(field)), loaded.get(field));
        }
        return Ok(());
    }

    for (field, value) in overrides {
        form::set_field(&mut state.document, &state.targets, field, value);
    }
    let add = state.targets.add_button;
    report(controller::click(&mut state, add)?)
}

fn handle_delete(config: &Config, email: &str) -> CliResult {
    let mut state = mount(config)?;
    let control = find_card(&state.document, state.targets.list, email)
        .and_then(|card| card_control(&state.document, card, Action::DeleteCard));

    let outcome = match control {
        Some(node) => controller::click(&mut state, node)?,
        None => Outcome::Deleted {
            email: email.to_string(),
            removed: controller::delete(&mut state, email)?,
        },
    };
    report(outcome)
}

fn handle_clear(config: &Config, yes: bool) -> CliResult {
    let mut state = mount(config)?;
    if !yes {
        println!("This will delete all {} stored users.", state.store.len());
        println!("Use --yes to confirm.");
        return Ok(());
    }

    let clear = state.targets.clear_button;
    report(controller::click(&mut state, clear)?)
}

fn handle_render(config: &Config) -> CliResult {
    let state = mount(config)?;
    println!("{}", state.to_html());
    Ok(())
}

fn report(outcome: Outcome) -> CliResult {
    match outcome {
        Outcome::Submitted(SubmitOutcome::Created { email }) => println!("Added {email}"),
        Outcome::Submitted(SubmitOutcome::Updated { email }) => println!("Updated {email}"),
        Outcome::Submitted(SubmitOutcome::Rejected { missing }) => {
            let missing: Vec<_> = missing.into_iter().map(field_label).collect();
            return Err(format!("all fields are required, missing: {}", missing.join(", ")).into());
        }
        Outcome::Deleted { email, removed } => {
            if removed {
                println!("Deleted {email}");
            } else {
                println!("No user with email {email}");
            }
        }
        Outcome::Edited { email, .. } => println!("Loaded {email}"),
        Outcome::Cleared { removed } => println!("Deleted {removed} users"),
        Outcome::Ignored => println!("Nothing to do"),
    }
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> CliResult {
    let database_path = config.database_path();
    let backend = SqliteBackend::open(&database_path)?;
    let stats = backend.stats()?;
    let store = RecordStore::open(Box::new(backend), config.storage.namespace_key.as_str())?;

    if json {
        let status = serde_json::json!({
            "database_path": database_path,
            "namespace_key": store.namespace_key(),
            "users": store.len(),
            "total_keys": stats.total_keys,
            "last_write": stats.last_write,
            "db_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("usercards status");
        println!("----------------");
        println!("Database:      {}", database_path.display());
        println!("Namespace key: {}", store.namespace_key());
        println!("Users:         {}", store.len());
        println!(
            "Last write:    {}",
            stats.last_write.as_deref().unwrap_or("never")
        );
        println!("Size:          {} bytes", stats.db_size_bytes);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> CliResult {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Namespace key:      {}", config.storage.namespace_key);
                println!();
                println!("[Render]");
                println!("  Delete label:       {}", config.render.delete_label);
                println!("  Edit label:         {}", config.render.edit_label);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
