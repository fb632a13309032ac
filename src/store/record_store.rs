//! RecordStore: CRUD over whole collections
//!
//! Flow for every operation:
//! 1. Load the full collection from the backend
//! 2. Apply the change in memory
//! 3. Persist the full collection (mutations only, and only on change)

use tracing::{debug, info, warn};

use super::backend::{CollectionBackend, CsvBackend};
use crate::schema::{EntityType, ID_FIELD};
use crate::storage::{Record, StorageResult};

/// Stateless CRUD facade over a [`CollectionBackend`].
#[derive(Debug, Clone)]
pub struct RecordStore<B = CsvBackend> {
    backend: B,
}

impl<B: CollectionBackend> RecordStore<B> {
    /// Creates a store over `backend`.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Creates the backing collection for `entity` if it does not exist.
    pub fn initialize(&self, entity: EntityType) -> StorageResult<bool> {
        self.backend.initialize(entity)
    }

    /// Appends `data` as a new record.
    ///
    /// No identity check is made: the collection grows by one even if
    /// `data` carries an `ID` that is already present.
    pub fn create(&self, data: Record, entity: EntityType) -> StorageResult<()> {
        let mut collection = self.backend.load(entity)?;

        let id = data.id().map(str::to_string);
        match id.as_deref() {
            None => warn!(entity = %entity, "RECORD_CREATED_WITHOUT_ID"),
            Some(id) if collection.find(id).is_some() => {
                warn!(entity = %entity, id = id, "DUPLICATE_ID_CREATED")
            }
            Some(_) => {}
        }

        collection.push(data);
        self.backend.persist(entity, &collection)?;

        info!(
            entity = %entity,
            id = id.as_deref().unwrap_or(""),
            records = collection.len(),
            "RECORD_CREATED"
        );
        Ok(())
    }

    /// Returns the first record whose `ID` equals `id`.
    ///
    /// Later records sharing the same `ID` are not visible here.
    pub fn read(&self, id: &str, entity: EntityType) -> StorageResult<Option<Record>> {
        let collection = self.backend.load(entity)?;
        let found = collection.find(id).cloned();

        debug!(entity = %entity, id = id, found = found.is_some(), "RECORD_READ");
        Ok(found)
    }

    /// Merges `partial` into the first record whose `ID` equals `id`.
    ///
    /// Any `ID` key in `partial` is dropped before the merge. Returns
    /// `false` without writing if no record matches. A match with nothing
    /// left to change returns `true` without writing.
    pub fn update(&self, id: &str, mut partial: Record, entity: EntityType) -> StorageResult<bool> {
        let mut collection = self.backend.load(entity)?;

        let Some(record) = collection.find_mut(id) else {
            debug!(entity = %entity, id = id, "UPDATE_TARGET_NOT_FOUND");
            return Ok(false);
        };

        partial.remove(ID_FIELD);
        if partial.is_empty() {
            debug!(entity = %entity, id = id, "UPDATE_NOTHING_TO_CHANGE");
            return Ok(true);
        }

        let changed_fields = partial.len();
        record.merge(partial);
        self.backend.persist(entity, &collection)?;

        info!(
            entity = %entity,
            id = id,
            fields = changed_fields,
            "RECORD_UPDATED"
        );
        Ok(true)
    }

    /// Removes every record whose `ID` equals `id`.
    ///
    /// Returns `true` and persists if at least one record was removed;
    /// otherwise returns `false` without writing.
    pub fn delete(&self, id: &str, entity: EntityType) -> StorageResult<bool> {
        let mut collection = self.backend.load(entity)?;

        let removed = collection.remove_all(id);
        if removed == 0 {
            debug!(entity = %entity, id = id, "DELETE_TARGET_NOT_FOUND");
            return Ok(false);
        }

        self.backend.persist(entity, &collection)?;

        info!(
            entity = %entity,
            id = id,
            removed = removed,
            records = collection.len(),
            "RECORD_DELETED"
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;

    fn store() -> RecordStore<MemoryBackend> {
        RecordStore::new(MemoryBackend::initialized())
    }

    fn alice() -> Record {
        Record::new()
            .with("ID", "1")
            .with("NAME", "Alice")
            .with("BALANCE_CURRENT", "100")
    }

    #[test]
    fn test_create_then_read() {
        let store = store();
        store.create(alice(), EntityType::Account).unwrap();

        let found = store.read("1", EntityType::Account).unwrap();
        assert_eq!(found, Some(alice()));
    }

    #[test]
    fn test_collections_are_separate() {
        let store = store();
        store.create(alice(), EntityType::Account).unwrap();

        assert_eq!(store.read("1", EntityType::Transaction).unwrap(), None);
    }

    #[test]
    fn test_create_accepts_duplicate_ids() {
        let store = store();
        store.create(alice(), EntityType::Account).unwrap();
        store
            .create(alice().with("NAME", "Alice II"), EntityType::Account)
            .unwrap();

        let collection = store.backend().snapshot(EntityType::Account).unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(
            store
                .read("1", EntityType::Account)
                .unwrap()
                .and_then(|r| r.get("NAME").map(str::to_string)),
            Some("Alice".to_string())
        );
    }

    #[test]
    fn test_update_preserves_untouched_fields() {
        let store = store();
        store.create(alice(), EntityType::Account).unwrap();

        let updated = store
            .update(
                "1",
                Record::new().with("BALANCE_CURRENT", "150"),
                EntityType::Account,
            )
            .unwrap();
        assert!(updated);

        let record = store.read("1", EntityType::Account).unwrap().unwrap();
        assert_eq!(record.get("NAME"), Some("Alice"));
        assert_eq!(record.get("BALANCE_CURRENT"), Some("150"));
    }

    #[test]
    fn test_update_cannot_change_id() {
        let store = store();
        store.create(alice(), EntityType::Account).unwrap();

        store
            .update(
                "1",
                Record::new().with("ID", "other").with("NAME", "Bob"),
                EntityType::Account,
            )
            .unwrap();

        assert_eq!(store.read("other", EntityType::Account).unwrap(), None);
        let record = store.read("1", EntityType::Account).unwrap().unwrap();
        assert_eq!(record.get("NAME"), Some("Bob"));
    }

    #[test]
    fn test_update_touches_first_match_only() {
        let store = store();
        store.create(alice(), EntityType::Account).unwrap();
        store.create(alice(), EntityType::Account).unwrap();

        store
            .update("1", Record::new().with("NAME", "X"), EntityType::Account)
            .unwrap();

        let collection = store.backend().snapshot(EntityType::Account).unwrap();
        assert_eq!(collection.records()[0].get("NAME"), Some("X"));
        assert_eq!(collection.records()[1].get("NAME"), Some("Alice"));
    }

    #[test]
    fn test_update_missing_does_not_write() {
        let store = store();
        store.create(alice(), EntityType::Account).unwrap();
        let writes = store.backend().writes();

        let updated = store
            .update("missing", Record::new().with("NAME", "X"), EntityType::Account)
            .unwrap();

        assert!(!updated);
        assert_eq!(store.backend().writes(), writes);
    }

    #[test]
    fn test_update_with_only_id_does_not_write() {
        let store = store();
        store.create(alice(), EntityType::Account).unwrap();
        let writes = store.backend().writes();

        let updated = store
            .update("1", Record::new().with("ID", "2"), EntityType::Account)
            .unwrap();

        assert!(updated);
        assert_eq!(store.backend().writes(), writes);
        assert_eq!(store.read("1", EntityType::Account).unwrap(), Some(alice()));
    }

    #[test]
    fn test_delete_removes_all_duplicates() {
        let store = store();
        store.create(alice(), EntityType::Account).unwrap();
        store
            .create(Record::new().with("ID", "2"), EntityType::Account)
            .unwrap();
        store.create(alice(), EntityType::Account).unwrap();

        assert!(store.delete("1", EntityType::Account).unwrap());

        let collection = store.backend().snapshot(EntityType::Account).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.records()[0].id(), Some("2"));
    }

    #[test]
    fn test_delete_missing_does_not_write() {
        let store = store();
        store.create(alice(), EntityType::Account).unwrap();
        let writes = store.backend().writes();

        assert!(!store.delete("missing", EntityType::Account).unwrap());
        assert_eq!(store.backend().writes(), writes);
    }

    #[test]
    fn test_uninitialized_collection_is_not_found() {
        let store = RecordStore::new(MemoryBackend::new());
        let err = store.create(alice(), EntityType::Account).unwrap_err();
        assert!(err.is_not_found());

        assert!(store.initialize(EntityType::Account).unwrap());
        store.create(alice(), EntityType::Account).unwrap();
    }
}
