//! API request types
//!
//! JSON request parsing for all supported operations:
//!
//! ```text
//! {"op": "create", "entity": "account", "data": {"ID": "1", "NAME": "Alice"}}
//! {"op": "read",   "entity": "account", "id": "1"}
//! {"op": "update", "entity": "account", "id": "1", "data": {"NAME": "Bob"}}
//! {"op": "delete", "entity": "account", "id": "1"}
//! {"op": "fields", "entity": "transaction", "mode": "update"}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use crate::schema::{EntityType, FieldMode};
use crate::storage::Record;

/// Unified request envelope
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Create {
        entity: EntityType,
        data: Record,
    },
    Read {
        entity: EntityType,
        id: String,
    },
    Update {
        entity: EntityType,
        id: String,
        data: Record,
    },
    Delete {
        entity: EntityType,
        id: String,
    },
    Fields {
        entity: EntityType,
        mode: FieldMode,
    },
}

/// Raw request for parsing
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawRequest {
    op: String,
    #[serde(default)]
    entity: Option<String>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    mode: Option<String>,
}

impl RawRequest {
    fn entity(&self) -> ApiResult<EntityType> {
        let name = self
            .entity
            .as_deref()
            .ok_or_else(|| ApiError::invalid_request("Missing entity"))?;
        Ok(name.parse::<EntityType>()?)
    }

    fn id(&self) -> ApiResult<String> {
        let id = self
            .id
            .as_ref()
            .ok_or_else(|| ApiError::invalid_request("Missing id"))?;
        text_value(id).ok_or_else(|| ApiError::invalid_request("id must be a string or number"))
    }

    fn data(&mut self) -> ApiResult<Record> {
        let data = self
            .data
            .take()
            .ok_or_else(|| ApiError::invalid_request("Missing data"))?;
        record_from_json(data)
    }
}

impl Request {
    /// Parse a request from JSON string
    pub fn parse(json: &str) -> ApiResult<Self> {
        let mut raw: RawRequest = serde_json::from_str(json)
            .map_err(|e| ApiError::invalid_request(format!("Invalid JSON: {}", e)))?;

        match raw.op.as_str() {
            "create" => Ok(Request::Create {
                entity: raw.entity()?,
                data: raw.data()?,
            }),
            "read" => Ok(Request::Read {
                entity: raw.entity()?,
                id: raw.id()?,
            }),
            "update" => Ok(Request::Update {
                entity: raw.entity()?,
                id: raw.id()?,
                data: raw.data()?,
            }),
            "delete" => Ok(Request::Delete {
                entity: raw.entity()?,
                id: raw.id()?,
            }),
            "fields" => {
                let mode = raw
                    .mode
                    .as_deref()
                    .ok_or_else(|| ApiError::invalid_request("Missing mode"))?
                    .parse::<FieldMode>()?;
                Ok(Request::Fields {
                    entity: raw.entity()?,
                    mode,
                })
            }
            other => Err(ApiError::unknown_operation(other)),
        }
    }
}

/// Converts a JSON scalar to its stored text form.
///
/// Strings are kept verbatim, numbers and booleans are stringified, null
/// becomes the empty string. Arrays and objects have no text form.
fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Converts a JSON object to a [`Record`], keeping key order.
pub fn record_from_json(value: Value) -> ApiResult<Record> {
    let Value::Object(map) = value else {
        return Err(ApiError::invalid_request("data must be a JSON object"));
    };

    map.into_iter()
        .map(|(field, value)| {
            text_value(&value)
                .map(|text| (field.clone(), text))
                .ok_or_else(|| {
                    ApiError::invalid_request(format!("Field '{}' must be a scalar value", field))
                })
        })
        .collect::<ApiResult<Vec<_>>>()
        .map(|pairs| pairs.into_iter().collect())
}
