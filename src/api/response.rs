//! API response types
//!
//! Every request is answered by exactly one JSON line:
//!
//! ```text
//! {"status": "ok", "data": <outcome>}
//! {"status": "error", "code": "LEDGER_...", "message": "..."}
//! ```

use serde_json::{json, Map, Value};

use super::errors::{ApiError, ApiResult};
use crate::storage::Record;

/// What a successful request did
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A record was appended
    Created,
    /// Lookup result; `None` when no record carries the ID
    Found(Option<Record>),
    /// Whether a record matched the update
    Updated(bool),
    /// Whether any record matched the delete
    Deleted(bool),
    /// Field names in prompt order
    Fields(&'static [&'static str]),
}

impl Outcome {
    fn data(&self) -> Value {
        match self {
            Outcome::Created => json!({ "created": true }),
            Outcome::Found(Some(record)) => record_value(record),
            Outcome::Found(None) => Value::Null,
            Outcome::Updated(updated) => json!({ "updated": updated }),
            Outcome::Deleted(deleted) => json!({ "deleted": deleted }),
            Outcome::Fields(names) => Value::from(names.to_vec()),
        }
    }
}

fn record_value(record: &Record) -> Value {
    let fields: Map<String, Value> = record
        .iter()
        .map(|(field, value)| (field.to_string(), Value::from(value)))
        .collect();
    Value::Object(fields)
}

/// One response line
#[derive(Debug)]
pub enum Response {
    Ok(Outcome),
    Error(ApiError),
}

impl Response {
    /// Builds the JSON envelope
    pub fn to_value(&self) -> Value {
        match self {
            Response::Ok(outcome) => json!({
                "status": "ok",
                "data": outcome.data(),
            }),
            Response::Error(err) => json!({
                "status": "error",
                "code": err.code(),
                "message": err.message(),
            }),
        }
    }

    /// Serializes the envelope as a single line
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }
}

impl From<ApiResult<Outcome>> for Response {
    fn from(result: ApiResult<Outcome>) -> Self {
        match result {
            Ok(outcome) => Response::Ok(outcome),
            Err(err) => Response::Error(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_record_keeps_field_order() {
        let record = Record::new().with("ID", "1").with("NAME", "Alice");
        let json = Response::Ok(Outcome::Found(Some(record))).to_json();
        assert_eq!(
            json,
            r#"{"status":"ok","data":{"ID":"1","NAME":"Alice"}}"#
        );
    }

    #[test]
    fn test_missing_record_is_null() {
        let value = Response::Ok(Outcome::Found(None)).to_value();
        assert!(value["data"].is_null());
    }

    #[test]
    fn test_mutation_flags() {
        assert_eq!(
            Response::Ok(Outcome::Deleted(false)).to_json(),
            r#"{"status":"ok","data":{"deleted":false}}"#
        );
        assert_eq!(
            Response::Ok(Outcome::Updated(true)).to_value()["data"]["updated"],
            true
        );
    }

    #[test]
    fn test_error_envelope() {
        let resp: Response = Err(ApiError::unknown_operation("purge")).into();
        assert_eq!(
            resp.to_json(),
            r#"{"status":"error","code":"LEDGER_UNKNOWN_OPERATION","message":"Unknown operation: purge"}"#
        );
    }
}
