//! Configuration file handling
//!
//! The config file is JSON. Every key is optional:
//!
//! ```json
//! {
//!   "data_dir": "./ledger",
//!   "accounts_file": "accounts.csv",
//!   "transactions_file": "transactions.csv",
//!   "log_level": "info"
//! }
//! ```
//!
//! A missing config file means all defaults, which keeps both collection
//! files in the working directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::errors::{CliError, CliResult};
use crate::observability;
use crate::schema::EntityType;
use crate::store::CsvBackend;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the collection files (default ".")
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Accounts collection file name (default "accounts.csv")
    #[serde(default = "default_accounts_file")]
    pub accounts_file: String,

    /// Transactions collection file name (default "transactions.csv")
    #[serde(default = "default_transactions_file")]
    pub transactions_file: String,

    /// Log filter directive (default "warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_dir() -> String {
    ".".to_string()
}
fn default_accounts_file() -> String {
    "accounts.csv".to_string()
}
fn default_transactions_file() -> String {
    "transactions.csv".to_string()
}
fn default_log_level() -> String {
    observability::DEFAULT_LOG_LEVEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            accounts_file: default_accounts_file(),
            transactions_file: default_transactions_file(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults if the file
    /// does not exist.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "CONFIG_DEFAULTS_USED");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(CliError::config_error(format!(
                    "Failed to read config {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        Self::from_json(&content)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }

        for (key, name) in [
            ("accounts_file", &self.accounts_file),
            ("transactions_file", &self.transactions_file),
        ] {
            if name.trim().is_empty() {
                return Err(CliError::config_error(format!("{} must not be empty", key)));
            }
            if name.contains('/') || name.contains('\\') {
                return Err(CliError::config_error(format!(
                    "{} must be a plain file name, got '{}'",
                    key, name
                )));
            }
        }

        if self.accounts_file == self.transactions_file {
            return Err(CliError::config_error(
                "accounts_file and transactions_file must differ",
            ));
        }

        if !observability::is_valid_filter(&self.log_level) {
            return Err(CliError::config_error(format!(
                "Invalid log_level: '{}'",
                self.log_level
            )));
        }

        Ok(())
    }

    /// Get data directory as Path
    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }

    /// Returns the file backing `entity`
    pub fn collection_path(&self, entity: EntityType) -> PathBuf {
        let name = match entity {
            EntityType::Account => &self.accounts_file,
            EntityType::Transaction => &self.transactions_file,
        };
        self.data_path().join(name)
    }

    /// Builds the CSV backend described by this config
    pub fn backend(&self) -> CsvBackend {
        CsvBackend::new(
            self.collection_path(EntityType::Account),
            self.collection_path(EntityType::Transaction),
        )
    }
}
