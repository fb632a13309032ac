//! Entity type and field list definitions
//!
//! Field lists are ordered: the order is the prompt order and the header
//! order of a freshly written collection file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::{SchemaError, SchemaResult};

/// Identity field present in every entity type.
pub const ID_FIELD: &str = "ID";

/// Account fields in creation order. `ID` must stay first.
pub const ACCOUNT_FIELDS: &[&str] = &[
    ID_FIELD,
    "TYPE",
    "NAME",
    "DESCRIPTION",
    "BALANCE_OPENING",
    "BALANCE_CURRENT",
    "CURRENCY",
];

/// Transaction fields in creation order. `ID` must stay first.
pub const TRANSACTION_FIELDS: &[&str] = &[
    ID_FIELD,
    "DATE",
    "DESCRIPTION",
    "ACCOUNT_CODE",
    "DEBIT_AMOUNT",
    "CREDIT_AMOUNT",
    "CURRENCY",
    "PROOF",
    "ISSUER",
    "VALIDATOR",
    "DATE_ENTRY",
];

/// The two record collections kept by the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    /// Ledger account (asset, liability, ...)
    Account,
    /// Journal transaction against an account
    Transaction,
}

impl EntityType {
    /// All entity types, in menu order
    pub const ALL: [EntityType; 2] = [EntityType::Account, EntityType::Transaction];

    /// Returns the singular lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            EntityType::Account => "account",
            EntityType::Transaction => "transaction",
        }
    }

    /// Returns the capitalized name used in menu titles
    pub fn title(&self) -> &'static str {
        match self {
            EntityType::Account => "Account",
            EntityType::Transaction => "Transaction",
        }
    }

    /// Returns the full ordered field list used when creating a record
    pub fn create_fields(&self) -> &'static [&'static str] {
        match self {
            EntityType::Account => ACCOUNT_FIELDS,
            EntityType::Transaction => TRANSACTION_FIELDS,
        }
    }

    /// Returns the field list used for update prompts (creation list minus `ID`)
    pub fn update_fields(&self) -> &'static [&'static str] {
        &self.create_fields()[1..]
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for EntityType {
    type Err = SchemaError;

    fn from_str(s: &str) -> SchemaResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "account" | "accounts" => Ok(EntityType::Account),
            "transaction" | "transactions" => Ok(EntityType::Transaction),
            _ => Err(SchemaError::UnknownEntity(s.to_string())),
        }
    }
}

/// Which prompt list is wanted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldMode {
    Create,
    Update,
}

impl FromStr for FieldMode {
    type Err = SchemaError;

    fn from_str(s: &str) -> SchemaResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create" => Ok(FieldMode::Create),
            "update" => Ok(FieldMode::Update),
            _ => Err(SchemaError::UnknownFieldMode(s.to_string())),
        }
    }
}

/// Returns the ordered field names for an entity type and prompt mode.
pub fn fields(entity: EntityType, mode: FieldMode) -> &'static [&'static str] {
    match mode {
        FieldMode::Create => entity.create_fields(),
        FieldMode::Update => entity.update_fields(),
    }
}
