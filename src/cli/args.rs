//! CLI argument definitions using clap
//!
//! Commands:
//! - ledgerbook init --config <path>
//! - ledgerbook menu --config <path>   (default)
//! - ledgerbook exec --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default configuration file location
pub const DEFAULT_CONFIG: &str = "./ledgerbook.json";

/// ledgerbook - accounts and transactions in plain CSV files
#[derive(Parser, Debug)]
#[command(name = "ledgerbook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Create the data directory and empty collection files
    Init {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },

    /// Run the interactive menu
    Menu {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },

    /// Read JSON requests from stdin, one per line, and answer each on stdout
    Exec {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Returns the requested command, defaulting to the menu
    pub fn command(self) -> Command {
        self.command.unwrap_or(Command::Menu {
            config: PathBuf::from(DEFAULT_CONFIG),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_runs_menu() {
        let cli = Cli::try_parse_from(["ledgerbook"]).unwrap();
        assert_eq!(
            cli.command(),
            Command::Menu {
                config: PathBuf::from(DEFAULT_CONFIG)
            }
        );
    }

    #[test]
    fn test_init_with_config() {
        let cli = Cli::try_parse_from(["ledgerbook", "init", "--config", "/tmp/l.json"]).unwrap();
        assert_eq!(
            cli.command(),
            Command::Init {
                config: PathBuf::from("/tmp/l.json")
            }
        );
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["ledgerbook", "serve"]).is_err());
    }
}
