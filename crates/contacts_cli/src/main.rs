//! CLI entry point for the contacts core.
//!
//! # Responsibility
//! - Provide a local probe for core linkage (`ping`).
//! - Load an address-book database, apply sort/filter/delete, print the view.
//! - Import contacts from JSON into an address-book database.

use clap::{Parser, Subcommand};
use contacts_core::db::address_book::insert_contacts;
use contacts_core::db::open_db;
use contacts_core::{
    init_logging, parse_channel_tag, parse_sort_spec, Contact, ContactListService,
    ContactRecord, Filter, SqliteContactSource,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "contacts_cli", version, about = "Contacts core probe")]
struct Cli {
    /// Absolute directory for rolling log files.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level used with `--log-dir`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print core ping and version.
    Ping,
    /// Print the contact view of an address-book database.
    List {
        /// Address-book SQLite file.
        #[arg(long)]
        db: PathBuf,
        /// Sort code, e.g. `family_name_desc`.
        #[arg(long)]
        sort: Option<String>,
        /// Channel id to require; repeat for several.
        #[arg(long = "filter")]
        filters: Vec<String>,
        /// Displayed index to delete before printing.
        #[arg(long)]
        delete: Option<usize>,
    },
    /// Append contacts from a JSON array to an address-book database.
    ///
    /// Phone and email channels are not stored; listing derives them from
    /// whether the contact has a phone number or e-mail.
    Import {
        #[arg(long)]
        db: PathBuf,
        #[arg(long)]
        json: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| contacts_core::default_log_level().to_string());
        if let Err(err) = init_logging(&level, &log_dir.to_string_lossy()) {
            eprintln!("logging disabled: {err}");
        }
    }

    let result = match cli.command {
        Command::Ping => {
            println!("contacts_core ping={}", contacts_core::ping());
            println!("contacts_core version={}", contacts_core::core_version());
            Ok(())
        }
        Command::List {
            db,
            sort,
            filters,
            delete,
        } => list(db, sort, filters, delete).await,
        Command::Import { db, json } => import(db, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn list(
    db: PathBuf,
    sort: Option<String>,
    filters: Vec<String>,
    delete: Option<usize>,
) -> Result<(), String> {
    let sort = sort
        .as_deref()
        .map(parse_sort_spec)
        .transpose()
        .map_err(|err| err.to_string())?;
    let filters = filters
        .iter()
        .map(|value| parse_channel_tag(value).map(Filter::for_tag))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| err.to_string())?;

    let mut service = ContactListService::new();
    service
        .try_load_from(Arc::new(SqliteContactSource::new(db)))
        .await
        .map_err(|err| err.to_string())?;
    service.set_sort(sort);
    let mut view = service.set_filters(filters);

    if let Some(index) = delete {
        view = service.delete_at(index).map_err(|err| err.to_string())?;
    }

    print_view(&view);
    Ok(())
}

fn import(db: PathBuf, json: PathBuf) -> Result<(), String> {
    let raw = std::fs::read_to_string(&json)
        .map_err(|err| format!("failed to read `{}`: {err}", json.display()))?;
    let contacts: Vec<Contact> = serde_json::from_str(&raw)
        .map_err(|err| format!("invalid contacts JSON `{}`: {err}", json.display()))?;

    let mut conn = open_db(&db).map_err(|err| err.to_string())?;
    let written = insert_contacts(&mut conn, &contacts).map_err(|err| err.to_string())?;
    println!("imported {written} contact(s) into {}", db.display());
    Ok(())
}

fn print_view(view: &[ContactRecord]) {
    for (index, record) in view.iter().enumerate() {
        let contact = &record.contact;
        let channels = contact
            .channels
            .iter()
            .map(|tag| tag.as_str())
            .collect::<Vec<_>>()
            .join(",");
        println!(
            "{index:>3}  {:<32} {:<18} {:<28} [{channels}]",
            contact.display_name(),
            contact.phone.as_deref().unwrap_or("-"),
            contact.email.as_deref().unwrap_or("-"),
        );
    }
    println!("{} contact(s)", view.len());
}
