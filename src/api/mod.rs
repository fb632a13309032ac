//! JSON request surface for ledgerbook
//!
//! Line-delimited JSON in, one JSON response per request out. This is the
//! scriptable counterpart of the interactive menu and calls the same
//! record store operations.
//!
//! # Supported Operations
//!
//! - create
//! - read
//! - update
//! - delete
//! - fields

mod errors;
mod handler;
mod request;
mod response;

pub use errors::{ApiError, ApiErrorCode, ApiResult};
pub use handler::ApiHandler;
pub use request::{record_from_json, Request};
pub use response::{Outcome, Response};
