//! CLI command implementations
//!
//! Every command follows the same boot order:
//! 1. Load configuration
//! 2. Install logging
//! 3. Build the record store over the configured files
//! 4. Run the command

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use serde_json::json;
use tracing::{info, warn};

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_requests, write_json, write_response};
use super::menu::Menu;
use super::session::Session;
use crate::api::ApiHandler;
use crate::observability;
use crate::schema::EntityType;
use crate::store::{CollectionBackend, CsvBackend, RecordStore};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command())
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Menu { config } => menu(&config),
        Command::Exec { config } => exec(&config),
    }
}

fn boot(config_path: &Path) -> CliResult<(Config, RecordStore<CsvBackend>)> {
    let config = Config::load(config_path)?;
    observability::init(&config.log_level);

    let store = RecordStore::new(config.backend());
    Ok((config, store))
}

/// Create the data directory and any missing collection files.
///
/// Existing collection files are left untouched.
pub fn init(config_path: &Path) -> CliResult<()> {
    let (config, store) = boot(config_path)?;
    let created = init_store(&config, &store)?;

    let mut stdout = io::stdout();
    write_response(
        &mut stdout,
        json!({
            "data_dir": config.data_dir,
            "created": created.iter().map(|e| e.name()).collect::<Vec<_>>(),
        }),
    )
}

/// Creates `data_dir` and initializes every collection; returns the
/// entity types whose files were newly created.
pub fn init_store<B: CollectionBackend>(
    config: &Config,
    store: &RecordStore<B>,
) -> CliResult<Vec<EntityType>> {
    fs::create_dir_all(config.data_path()).map_err(|e| {
        CliError::config_error(format!(
            "Failed to create data directory {}: {}",
            config.data_path().display(),
            e
        ))
    })?;

    let mut created = Vec::new();
    for entity in EntityType::ALL {
        if store.initialize(entity)? {
            created.push(entity);
        }
    }

    info!(data_dir = %config.data_dir, created = created.len(), "LEDGER_INITIALIZED");
    Ok(created)
}

/// Run the interactive menu on stdin/stdout
pub fn menu(config_path: &Path) -> CliResult<()> {
    let (config, store) = boot(config_path)?;

    for entity in EntityType::ALL {
        let path = config.collection_path(entity);
        if !path.exists() {
            warn!(
                entity = %entity,
                path = %path.display(),
                "COLLECTION_MISSING: run `ledgerbook init` to create it"
            );
        }
    }

    let mut session = Session::stdio();
    Menu::new(&store, &mut session).run()
}

/// Answer line-delimited JSON requests from stdin
pub fn exec(config_path: &Path) -> CliResult<()> {
    let (_config, store) = boot(config_path)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    serve_requests(&store, stdin.lock(), &mut stdout)
}

/// Handles every request line from `input`, writing one response line each.
///
/// Request-level failures become error responses; only I/O failures on the
/// streams themselves end the loop.
pub fn serve_requests<B, R, W>(store: &RecordStore<B>, input: R, output: &mut W) -> CliResult<()>
where
    B: CollectionBackend,
    R: BufRead,
    W: Write,
{
    let handler = ApiHandler::new(store);
    for line in read_requests(input) {
        let response = match line? {
            Ok(text) => handler.handle(&text),
            Err(e) => {
                warn!(error = %e, "REQUEST_NOT_UTF8");
                handler.reject(format!("Request is not valid UTF-8: {}", e.utf8_error()))
            }
        };
        write_json(output, &response.to_json())?;
    }
    Ok(())
}
