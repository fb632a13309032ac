//! Record and collection types
//!
//! A record is an ordered map from field name to text. Every value is kept
//! as text, amounts and dates included. Field order is insertion order and
//! survives a decode/encode cycle.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::ID_FIELD;

/// One entity instance: field name -> text value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    /// Creates an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the `ID` value, if present
    pub fn id(&self) -> Option<&str> {
        self.get(ID_FIELD)
    }

    /// Returns whether this record's `ID` equals `id`
    pub fn has_id(&self, id: &str) -> bool {
        self.id() == Some(id)
    }

    /// Returns a field value
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Sets a field. An existing field keeps its position.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field, preserving the order of the remaining ones
    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.fields.shift_remove(field)
    }

    /// Builder-style `set`
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Overlays `partial` onto this record.
    ///
    /// Keys present in `partial` overwrite, keys absent are left untouched,
    /// new keys are appended. `ID` in `partial` is ignored: identity is
    /// assigned at creation only.
    pub fn merge(&mut self, mut partial: Record) {
        partial.remove(ID_FIELD);
        for (field, value) in partial.fields {
            self.fields.insert(field, value);
        }
    }

    /// Returns whether the record has a field
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterates `(field, value)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates field names in order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// All records of one entity type, as held in one file.
///
/// The header is the column order read from disk. It is kept so that a
/// rewrite does not reorder columns or drop ones no record currently uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    header: Vec<String>,
    records: Vec<Record>,
}

impl Collection {
    /// Creates an empty collection with no header
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection from a decoded header and its rows
    pub fn with_header(header: Vec<String>, records: Vec<Record>) -> Self {
        Self { header, records }
    }

    /// Returns the header read from disk
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Returns the column order to write: the stored header followed by any
    /// field used by a record but missing from it, in first-seen order.
    pub fn columns(&self) -> Vec<String> {
        let mut columns = self.header.clone();
        for record in &self.records {
            for field in record.field_names() {
                if !columns.iter().any(|c| c == field) {
                    columns.push(field.to_string());
                }
            }
        }
        columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a record. No identity check is made.
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Returns the first record with the given `ID`
    pub fn find(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.has_id(id))
    }

    /// Returns the first record with the given `ID`, mutably
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Record> {
        self.records.iter_mut().find(|r| r.has_id(id))
    }

    /// Removes every record with the given `ID`; returns how many went
    pub fn remove_all(&mut self, id: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| !r.has_id(id));
        before - self.records.len()
    }
}
