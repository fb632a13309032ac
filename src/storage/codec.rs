//! CSV codec for collection files
//!
//! File layout:
//! - Row 1: ordered field names (header)
//! - Row N: one record, values matched to the header by position
//!
//! Quoting and escaping follow RFC 4180 as implemented by the `csv` crate.
//! An empty file is an empty collection with no header.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{debug, warn};

use super::errors::{StorageError, StorageResult};
use super::record::{Collection, Record};
use super::writer::AtomicWriter;

/// Reads a whole collection file.
///
/// # Errors
///
/// - `LEDGER_STORAGE_NOT_FOUND` if the file does not exist
/// - `LEDGER_STORAGE_IO_FAILURE` on any other read error
/// - `LEDGER_STORAGE_MALFORMED` if the content is not valid UTF-8 CSV
pub fn decode(path: &Path) -> StorageResult<Collection> {
    let file = File::open(path).map_err(|e| StorageError::from_open(path, e))?;
    decode_from(path, BufReader::new(file))
}

fn decode_from<R: std::io::Read>(path: &Path, source: R) -> StorageResult<Collection> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut rows = reader.records();

    let header: Vec<String> = match rows.next() {
        Some(row) => row
            .map_err(|e| StorageError::from_csv(path, e))?
            .iter()
            .map(str::to_string)
            .collect(),
        None => return Ok(Collection::new()),
    };

    for (index, name) in header.iter().enumerate() {
        if header[..index].contains(name) {
            warn!(
                path = %path.display(),
                column = %name,
                "DUPLICATE_HEADER_COLUMN: later values overwrite earlier ones"
            );
        }
    }

    let mut records = Vec::new();
    for row in rows {
        let row = row.map_err(|e| StorageError::from_csv(path, e))?;

        if row.len() > header.len() {
            warn!(
                path = %path.display(),
                line = row.position().map(|p| p.line()).unwrap_or(0),
                columns = row.len(),
                header_columns = header.len(),
                "ROW_WIDER_THAN_HEADER"
            );

            if (header.len()..row.len()).any(|index| header.contains(&surplus_name(index))) {
                warn!(
                    path = %path.display(),
                    line = row.position().map(|p| p.line()).unwrap_or(0),
                    "SURPLUS_COLUMN_NAME_COLLIDES: header value is overwritten"
                );
            }
        }

        let record: Record = row
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let field = header
                    .get(index)
                    .cloned()
                    .unwrap_or_else(|| surplus_name(index));
                (field, value.to_string())
            })
            .collect();
        records.push(record);
    }

    debug!(
        path = %path.display(),
        records = records.len(),
        "COLLECTION_DECODED"
    );

    Ok(Collection::with_header(header, records))
}

/// Name given to a cell beyond the header's width
fn surplus_name(index: usize) -> String {
    format!("_{}", index)
}

/// Serializes a collection to CSV bytes.
///
/// Columns are `collection.columns()`; a record missing a column gets an
/// empty cell. A collection with no columns encodes to zero bytes.
pub fn encode_to_bytes(path: &Path, collection: &Collection) -> StorageResult<Vec<u8>> {
    let columns = collection.columns();
    if columns.is_empty() {
        return Ok(Vec::new());
    }

    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());

    writer
        .write_record(&columns)
        .map_err(|e| StorageError::from_csv(path, e))?;

    for record in collection.records() {
        writer
            .write_record(columns.iter().map(|c| record.get(c).unwrap_or("")))
            .map_err(|e| StorageError::from_csv(path, e))?;
    }

    writer
        .into_inner()
        .map_err(|e| StorageError::io_failure("Failed to flush CSV buffer", path, e.into_error()))
}

/// Replaces the collection file at `path` with `collection`.
///
/// This is a full rewrite, never an append. The write goes through
/// [`AtomicWriter`], so a failure leaves the previous file in place.
///
/// # Errors
///
/// Returns `LEDGER_STORAGE_IO_FAILURE` if the file cannot be written.
pub fn encode(path: &Path, collection: &Collection) -> StorageResult<()> {
    let bytes = encode_to_bytes(path, collection)?;
    AtomicWriter::new(path).write(&bytes)?;

    debug!(
        path = %path.display(),
        records = collection.len(),
        bytes = bytes.len(),
        "COLLECTION_ENCODED"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn decode_str(text: &str) -> Collection {
        decode_from(Path::new("test.csv"), text.as_bytes()).unwrap()
    }

    #[test]
    fn test_decode_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let err = decode(&temp_dir.path().join("accounts.csv")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_duplicate_header_keeps_one_column_last_value() {
        let collection = decode_str("ID,NOTE,NOTE\n1,first,second\n");
        let record = &collection.records()[0];
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("NOTE"), Some("second"));
    }

    #[test]
    fn test_surplus_cell_colliding_with_header_name() {
        let collection = decode_str("ID,_2\n1,a,b\n");
        let record = &collection.records()[0];
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("_2"), Some("b"));
    }

    #[test]
    fn test_decode_empty_file() {
        let collection = decode_str("");
        assert!(collection.is_empty());
        assert!(collection.header().is_empty());
    }

    #[test]
    fn test_decode_header_only() {
        let collection = decode_str("ID,NAME\n");
        assert!(collection.is_empty());
        assert_eq!(collection.header(), &["ID".to_string(), "NAME".to_string()]);
    }

    #[test]
    fn test_decode_maps_positionally() {
        let collection = decode_str("ID,NAME,BALANCE_CURRENT\n1,Alice,100\n2,Bob,20\n");

        assert_eq!(collection.len(), 2);
        let bob = &collection.records()[1];
        assert_eq!(bob.id(), Some("2"));
        assert_eq!(bob.get("NAME"), Some("Bob"));
        assert_eq!(bob.get("BALANCE_CURRENT"), Some("20"));
    }

    #[test]
    fn test_decode_quoted_values() {
        let collection = decode_str("ID,DESCRIPTION\n1,\"rent, march \"\"flat 2\"\"\"\n");
        assert_eq!(
            collection.records()[0].get("DESCRIPTION"),
            Some("rent, march \"flat 2\"")
        );
    }

    #[test]
    fn test_decode_short_row_keeps_leading_fields() {
        let collection = decode_str("ID,NAME,CURRENCY\n1,Alice\n");
        let record = &collection.records()[0];
        assert_eq!(record.get("NAME"), Some("Alice"));
        assert!(!record.contains("CURRENCY"));
    }

    #[test]
    fn test_decode_wide_row_keeps_surplus_positionally() {
        let collection = decode_str("ID,NAME\n1,Alice,extra\n");
        assert_eq!(collection.records()[0].get("_2"), Some("extra"));
    }

    #[test]
    fn test_decode_invalid_utf8_is_malformed() {
        let bytes: &[u8] = b"ID,NAME\n1,\xff\xfe\n";
        let err = decode_from(Path::new("bad.csv"), bytes).unwrap_err();
        assert_eq!(err.code().code(), "LEDGER_STORAGE_MALFORMED");
    }

    #[test]
    fn test_encode_empty_collection_writes_empty_file() {
        let bytes = encode_to_bytes(Path::new("x.csv"), &Collection::new()).unwrap();
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_encode_keeps_header_of_emptied_collection() {
        let collection = Collection::with_header(vec!["ID".into(), "NAME".into()], Vec::new());
        let bytes = encode_to_bytes(Path::new("x.csv"), &collection).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "ID,NAME\n");
    }

    #[test]
    fn test_encode_fills_missing_cells() {
        let mut collection = Collection::new();
        collection.push(Record::new().with("ID", "1").with("NAME", "Alice"));
        collection.push(Record::new().with("ID", "2").with("CURRENCY", "EUR"));

        let bytes = encode_to_bytes(Path::new("x.csv"), &collection).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "ID,NAME,CURRENCY\n1,Alice,\n2,,EUR\n"
        );
    }

    #[test]
    fn test_encode_overwrites_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("accounts.csv");
        fs::write(&path, "ID,NAME\n1,Alice\n2,Bob\n").unwrap();

        let mut collection = decode(&path).unwrap();
        collection.remove_all("1");
        encode(&path, &collection).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "ID,NAME\n2,Bob\n");
    }

    #[test]
    fn test_encode_then_decode_preserves_order_and_commas() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.csv");

        let mut collection = Collection::new();
        collection.push(
            Record::new()
                .with("ID", "t1")
                .with("DESCRIPTION", "coffee, croissant")
                .with("DEBIT_AMOUNT", "4.50"),
        );
        encode(&path, &collection).unwrap();

        let back = decode(&path).unwrap();
        assert_eq!(back.records(), collection.records());
    }
}
