//! API Handler for ledgerbook
//!
//! Parses one request, runs it against the record store and shapes the
//! response. Requests are handled strictly one at a time.

use tracing::debug;

use super::errors::{ApiError, ApiResult};
use super::request::Request;
use super::response::{Outcome, Response};
use crate::schema::fields;
use crate::store::{CollectionBackend, RecordStore};

/// JSON request handler over a record store
pub struct ApiHandler<'a, B> {
    store: &'a RecordStore<B>,
}

impl<'a, B: CollectionBackend> ApiHandler<'a, B> {
    /// Create a new API handler
    pub fn new(store: &'a RecordStore<B>) -> Self {
        Self { store }
    }

    /// Handle a raw JSON request string
    pub fn handle(&self, json_request: &str) -> Response {
        let result = Request::parse(json_request).and_then(|request| self.dispatch(request));
        if let Err(e) = &result {
            debug!(code = e.code(), message = e.message(), "REQUEST_FAILED");
        }
        result.into()
    }

    /// Answers a request line that could not be decoded as text
    pub fn reject(&self, reason: impl Into<String>) -> Response {
        Response::Error(ApiError::invalid_request(reason))
    }

    fn dispatch(&self, request: Request) -> ApiResult<Outcome> {
        match request {
            Request::Create { entity, data } => {
                self.store.create(data, entity)?;
                Ok(Outcome::Created)
            }
            Request::Read { entity, id } => Ok(Outcome::Found(self.store.read(&id, entity)?)),
            Request::Update { entity, id, data } => {
                Ok(Outcome::Updated(self.store.update(&id, data, entity)?))
            }
            Request::Delete { entity, id } => Ok(Outcome::Deleted(self.store.delete(&id, entity)?)),
            Request::Fields { entity, mode } => Ok(Outcome::Fields(fields(entity, mode))),
        }
    }
}
