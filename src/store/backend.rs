//! Collection backends
//!
//! A backend loads and persists whole collections. [`CsvBackend`] keeps one
//! CSV file per entity type; [`MemoryBackend`] keeps collections in memory
//! and counts writes, which makes it handy for exercising store semantics.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::schema::EntityType;
use crate::storage::{self, Collection, StorageError, StorageResult};

/// Whole-collection persistence for one entity type at a time.
pub trait CollectionBackend {
    /// Loads the full collection for `entity`.
    ///
    /// Fails with `LEDGER_STORAGE_NOT_FOUND` if the collection was never
    /// initialized.
    fn load(&self, entity: EntityType) -> StorageResult<Collection>;

    /// Replaces the stored collection for `entity` with `collection`.
    fn persist(&self, entity: EntityType, collection: &Collection) -> StorageResult<()>;

    /// Creates an empty collection for `entity` if none exists.
    ///
    /// Returns `true` if a new collection was created. Existing data is
    /// never touched.
    fn initialize(&self, entity: EntityType) -> StorageResult<bool>;
}

/// One CSV file per entity type.
#[derive(Debug, Clone)]
pub struct CsvBackend {
    accounts_path: PathBuf,
    transactions_path: PathBuf,
}

impl CsvBackend {
    /// Creates a backend over explicit file paths.
    pub fn new(accounts_path: impl Into<PathBuf>, transactions_path: impl Into<PathBuf>) -> Self {
        Self {
            accounts_path: accounts_path.into(),
            transactions_path: transactions_path.into(),
        }
    }

    /// Creates a backend using `accounts.csv` and `transactions.csv` under `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(
            data_dir.join("accounts.csv"),
            data_dir.join("transactions.csv"),
        )
    }

    /// Returns the file backing `entity`.
    pub fn path(&self, entity: EntityType) -> &Path {
        match entity {
            EntityType::Account => &self.accounts_path,
            EntityType::Transaction => &self.transactions_path,
        }
    }
}

impl CollectionBackend for CsvBackend {
    fn load(&self, entity: EntityType) -> StorageResult<Collection> {
        storage::decode(self.path(entity))
    }

    fn persist(&self, entity: EntityType, collection: &Collection) -> StorageResult<()> {
        storage::encode(self.path(entity), collection)
    }

    fn initialize(&self, entity: EntityType) -> StorageResult<bool> {
        let path = self.path(entity);
        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(_) => {
                info!(entity = %entity, path = %path.display(), "COLLECTION_INITIALIZED");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(StorageError::io_failure(
                "Failed to create collection file",
                path,
                e,
            )),
        }
    }
}

/// In-memory collections with a write counter.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    collections: RefCell<HashMap<EntityType, Collection>>,
    writes: Cell<usize>,
}

impl MemoryBackend {
    /// Creates a backend with no collections initialized.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend with every entity type initialized empty.
    pub fn initialized() -> Self {
        let backend = Self::new();
        for entity in EntityType::ALL {
            backend
                .collections
                .borrow_mut()
                .insert(entity, Collection::new());
        }
        backend
    }

    /// Returns how many times `persist` has been called.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    /// Returns a copy of the stored collection, if any.
    pub fn snapshot(&self, entity: EntityType) -> Option<Collection> {
        self.collections.borrow().get(&entity).cloned()
    }
}

impl CollectionBackend for MemoryBackend {
    fn load(&self, entity: EntityType) -> StorageResult<Collection> {
        self.collections
            .borrow()
            .get(&entity)
            .cloned()
            .ok_or_else(|| StorageError::not_found(Path::new(entity.name())))
    }

    fn persist(&self, entity: EntityType, collection: &Collection) -> StorageResult<()> {
        self.collections
            .borrow_mut()
            .insert(entity, collection.clone());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn initialize(&self, entity: EntityType) -> StorageResult<bool> {
        let mut collections = self.collections.borrow_mut();
        if collections.contains_key(&entity) {
            return Ok(false);
        }
        collections.insert(entity, Collection::new());
        Ok(true)
    }
}
