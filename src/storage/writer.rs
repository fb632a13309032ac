//! Atomic whole-file writer
//!
//! A collection file is always replaced as a unit:
//! 1. Write the new content to a uniquely named temp file beside the target
//! 2. fsync the temp file
//! 3. Rename temp over target (atomic on POSIX)
//! 4. fsync the parent directory so the rename is durable
//!
//! The temp file is created exclusively with a random name, so it can never
//! alias another collection file. A failure before step 3 leaves the
//! previous file untouched and the temp file is removed.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};

use super::errors::{StorageError, StorageResult};

/// Writes whole files through a sibling temp file and a rename.
pub struct AtomicWriter {
    /// Final file location
    target_path: PathBuf,
}

impl AtomicWriter {
    /// Creates a writer for `target_path`.
    pub fn new(target_path: &Path) -> Self {
        Self {
            target_path: target_path.to_path_buf(),
        }
    }

    /// Replaces the target file with `contents`.
    ///
    /// # Errors
    ///
    /// Returns `LEDGER_STORAGE_IO_FAILURE` if any step fails. The target is
    /// left as it was.
    pub fn write(&self, contents: &[u8]) -> StorageResult<()> {
        let temp = self.write_temp(contents)?;
        self.commit(temp)
    }

    fn parent_dir(&self) -> &Path {
        match self.target_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn write_temp(&self, contents: &[u8]) -> StorageResult<NamedTempFile> {
        let prefix = match self.target_path.file_name() {
            Some(name) => format!(".{}.", name.to_string_lossy()),
            None => ".collection.".to_string(),
        };

        let mut temp = Builder::new()
            .prefix(&prefix)
            .suffix(".tmp")
            .tempfile_in(self.parent_dir())
            .map_err(|e| {
                StorageError::io_failure("Failed to create temp file", &self.target_path, e)
            })?;

        temp.write_all(contents).map_err(|e| {
            StorageError::io_failure("Failed to write temp file", temp.path(), e)
        })?;

        temp.as_file().sync_all().map_err(|e| {
            StorageError::io_failure("Failed to fsync temp file", temp.path(), e)
        })?;

        Ok(temp)
    }

    fn commit(&self, temp: NamedTempFile) -> StorageResult<()> {
        // On failure the temp file is dropped, which deletes it.
        temp.persist(&self.target_path).map_err(|e| {
            StorageError::io_failure(
                "Failed to replace collection file",
                &self.target_path,
                e.error,
            )
        })?;

        // Directory fsync is not supported everywhere; the rename already happened.
        if let Ok(dir) = File::open(self.parent_dir()) {
            let _ = dir.sync_all();
        }

        Ok(())
    }
}
