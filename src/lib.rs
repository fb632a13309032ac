//! ledgerbook - a personal ledger of accounts and transactions
//!
//! Two collections, each kept in one CSV file. Every operation loads the
//! whole collection, changes it in memory and rewrites the file atomically.

pub mod api;
pub mod cli;
pub mod observability;
pub mod schema;
pub mod storage;
pub mod store;
