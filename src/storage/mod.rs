//! Collection storage for ledgerbook
//!
//! Each collection lives in one CSV file with a header row. Every mutation
//! rewrites the whole file.
//!
//! # Design Principles
//!
//! - Whole-collection reads and writes, no partial updates on disk
//! - Header order preserved across rewrites
//! - Writes are atomic: temp file, fsync, rename
//! - Values are text; nothing is validated or coerced

mod codec;
mod errors;
mod record;
mod writer;

pub use codec::{decode, encode, encode_to_bytes};
pub use errors::{StorageError, StorageErrorCode, StorageResult};
pub use record::{Collection, Record};
pub use writer::AtomicWriter;
