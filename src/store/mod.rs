//! Record store for ledgerbook
//!
//! Create, read, update and delete over the account and transaction
//! collections. Every call is a self-contained load, mutate, persist cycle;
//! the store keeps no state between calls and the files are the only truth.
//!
//! # Semantics
//!
//! - create: append, no identity check (duplicate `ID`s are accepted)
//! - read: first record with a matching `ID`
//! - update: first match, partial merge, `ID` never changes
//! - delete: every record with a matching `ID`
//!
//! Persistence goes through [`CollectionBackend`], so the CSV files can be
//! replaced by another backend without touching [`RecordStore`].

mod backend;
mod record_store;

pub use backend::{CollectionBackend, CsvBackend, MemoryBackend};
pub use record_store::RecordStore;
