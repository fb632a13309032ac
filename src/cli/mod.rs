//! CLI module for ledgerbook
//!
//! Provides command-line interface for:
//! - init: Create the data directory and empty collection files
//! - menu: Interactive account/transaction menu (default)
//! - exec: Line-delimited JSON requests on stdin

mod args;
mod commands;
mod config;
mod errors;
mod io;
mod menu;
mod session;

pub use args::{Cli, Command, DEFAULT_CONFIG};
pub use commands::{exec, init, init_store, menu, run, run_command, serve_requests};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_requests, write_json, write_response, RequestLine};
pub use menu::{Menu, MenuState};
pub use session::Session;
