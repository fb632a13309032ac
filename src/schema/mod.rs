//! Entity schemas for ledgerbook
//!
//! Static, ordered field lists for each entity type. The interactive layer
//! uses them to decide what to prompt for; the record store never consults
//! them and stores whatever fields it is handed.
//!
//! # Entity Types
//!
//! - account: `ID, TYPE, NAME, DESCRIPTION, BALANCE_OPENING, BALANCE_CURRENT, CURRENCY`
//! - transaction: `ID, DATE, DESCRIPTION, ACCOUNT_CODE, DEBIT_AMOUNT, CREDIT_AMOUNT,
//!   CURRENCY, PROOF, ISSUER, VALIDATOR, DATE_ENTRY`

mod errors;
mod types;

pub use errors::{SchemaError, SchemaResult};
pub use types::{fields, EntityType, FieldMode, ACCOUNT_FIELDS, ID_FIELD, TRANSACTION_FIELDS};
