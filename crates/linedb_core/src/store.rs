//! Store facade: file-backed records with an in-memory AVL index.

use crate::config::{BackendKind, Config, DriftPolicy};
use crate::error::{CoreError, CoreResult};
use crate::index::AvlIndex;
use crate::table::TableFile;
use linedb_codec::{Record, Schema, Value};
use linedb_storage::{FileBackend, InMemoryBackend, LineBackend};
use std::path::PathBuf;
use std::sync::Arc;

/// The store facade - the only component callers use directly.
///
/// A `Store` combines a [`TableFile`] (the durable flat file) with an
/// [`AvlIndex`] keyed by record id. On construction it replays the file
/// into a freshly built index, so in-memory state is reconstructed
/// entirely from durable state: the file is the single source of truth
/// and the index is a derived, rebuildable cache.
///
/// Every mutating call completes its file write before touching the
/// index, so operations issued sequentially are observed in the same
/// order by both.
///
/// # Example
///
/// ```
/// use linedb_codec::{FieldSpec, Schema};
/// use linedb_core::{BackendKind, Config, Store};
///
/// let schema = Schema::builder("user")
///     .field("username", FieldSpec::text(50).required())
///     .build()
///     .unwrap();
///
/// let config = Config::default().backend(BackendKind::Memory);
/// let mut store = Store::open(schema, &config).unwrap();
///
/// let mut record = store.new_record();
/// record.set("username", "alice").unwrap();
/// let created = store.create(record).unwrap();
///
/// assert_eq!(created.id(), Some(1));
/// ```
pub struct Store {
    schema: Arc<Schema>,
    table: TableFile,
    index: AvlIndex<i64, Record>,
    path: Option<PathBuf>,
}

impl Store {
    /// Opens a store for the given schema.
    ///
    /// For the file backend, the data file lives at
    /// `{data_dir}/{lowercase schema name}.txt` and is created (along
    /// with missing parent directories) if absent. Every line is then
    /// decoded and inserted into a fresh index.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or opened (fatal at
    /// initialization), or if replay fails under
    /// [`DriftPolicy::Abort`](crate::DriftPolicy::Abort).
    pub fn open(schema: Schema, config: &Config) -> CoreResult<Self> {
        let schema = Arc::new(schema);

        let (backend, path): (Box<dyn LineBackend>, Option<PathBuf>) = match config.backend {
            BackendKind::File => {
                let file_name = format!("{}.txt", schema.name().to_lowercase());
                let path = config.data_dir.join(file_name);
                (Box::new(FileBackend::open_with_create_dirs(&path)?), Some(path))
            }
            BackendKind::Memory => (Box::new(InMemoryBackend::new()), None),
        };

        Self::with_backend(schema, backend, path, config.drift_policy)
    }

    /// Opens a store over an explicit backend.
    ///
    /// Useful for tests that pre-seed an in-memory backend with lines.
    ///
    /// # Errors
    ///
    /// Returns an error if replay fails.
    pub fn with_backend(
        schema: Arc<Schema>,
        backend: Box<dyn LineBackend>,
        path: Option<PathBuf>,
        drift_policy: DriftPolicy,
    ) -> CoreResult<Self> {
        let mut table = TableFile::new(backend, Arc::clone(&schema), drift_policy);

        let mut index = AvlIndex::new();
        for record in table.load()? {
            if let Some(id) = record.id() {
                index.insert(id, record);
            }
        }

        tracing::debug!(
            schema = schema.name(),
            records = index.len(),
            latest_id = table.latest_id(),
            "store opened"
        );

        Ok(Self {
            schema,
            table,
            index,
            path,
        })
    }

    /// Returns the store's schema.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Returns the data file path (`None` for the in-memory backend).
    #[must_use]
    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    /// Returns the highest id assigned so far.
    #[must_use]
    pub fn latest_id(&self) -> i64 {
        self.table.latest_id()
    }

    /// Returns the number of live records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Creates a fresh unpersisted record with schema defaults.
    #[must_use]
    pub fn new_record(&self) -> Record {
        Record::new(Arc::clone(&self.schema))
    }

    /// Persists a new record: assigns the next id, appends to the file,
    /// and inserts into the index.
    ///
    /// # Errors
    ///
    /// Returns an error if the record already has an id, fails
    /// validation/encoding, or the file write fails. On failure nothing
    /// is persisted and no id is consumed.
    pub fn create(&mut self, record: Record) -> CoreResult<Record> {
        let record = self.table.insert(record)?;
        if let Some(id) = record.id() {
            self.index.insert(id, record.clone());
        }
        Ok(record)
    }

    /// Looks up a record by id.
    ///
    /// This is an index-only search - the file is never touched on a hit.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if no live record has this id.
    pub fn get(&self, id: i64) -> CoreResult<Record> {
        self.index
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound { id })
    }

    /// Persists the current state of a record.
    ///
    /// A record without an id goes through [`Store::create`]; a record
    /// with an id is re-encoded, its owning line located and replaced,
    /// and the index entry refreshed under the same key. Saving an
    /// unchanged record is idempotent - the encoded line is deterministic
    /// for the same field values.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the record's id is no longer in the store,
    /// or a validation/encoding/storage error.
    pub fn save(&mut self, record: Record) -> CoreResult<Record> {
        match record.id() {
            None => self.create(record),
            Some(id) => {
                self.table.replace(&record)?;
                self.index.insert(id, record.clone());
                Ok(record)
            }
        }
    }

    /// Deletes a record from the file and the index.
    ///
    /// The two removals form a unit with the file first: if the file
    /// removal fails, the index entry is left untouched, so there is
    /// never an index entry without a backing line. The record's id is
    /// not reused afterwards.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has this id; the store is
    /// unchanged in that case.
    pub fn delete(&mut self, id: i64) -> CoreResult<()> {
        self.table.delete(id)?;
        self.index.remove(&id);
        tracing::debug!(id, "record deleted");
        Ok(())
    }

    /// Iterates live records in ascending id order.
    ///
    /// Backed by the index's lazy in-order traversal; each call starts a
    /// fresh walk.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.index.iter().map(|(_, record)| record)
    }

    /// Returns every record whose `field` equals `value`.
    ///
    /// This is a full scan over the in-order traversal - non-indexed
    /// lookups are linear by design.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` for an undeclared field name.
    pub fn find(&self, field: &str, value: &Value) -> CoreResult<Vec<Record>> {
        if !self.schema.contains(field) {
            return Err(linedb_codec::CodecError::unknown_field(field).into());
        }

        let mut matches = Vec::new();
        for record in self.iter() {
            if record.get(field)? == value {
                matches.push(record.clone());
            }
        }
        Ok(matches)
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("schema", &self.schema.name())
            .field("records", &self.index.len())
            .field("latest_id", &self.table.latest_id())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linedb_codec::{CodecError, FieldSpec};
    use tempfile::tempdir;

    fn user_schema() -> Schema {
        Schema::builder("user")
            .field("username", FieldSpec::text(50).required())
            .field("age", FieldSpec::integer().max_value(150))
            .build()
            .unwrap()
    }

    fn memory_store() -> Store {
        let config = Config::default().backend(BackendKind::Memory);
        Store::open(user_schema(), &config).unwrap()
    }

    fn create_user(store: &mut Store, username: &str, age: i64) -> Record {
        let mut record = store.new_record();
        record.set("username", username).unwrap();
        record.set("age", age).unwrap();
        store.create(record).unwrap()
    }

    #[test]
    fn create_assigns_id_and_get_returns_same_values() {
        let mut store = memory_store();

        let created = create_user(&mut store, "alice", 30);
        assert_eq!(created.id(), Some(1));

        let fetched = store.get(1).unwrap();
        assert_eq!(fetched.get_text("username").unwrap(), Some("alice"));
        assert_eq!(fetched.get_integer("age").unwrap(), Some(30));
        assert_eq!(fetched, created);
    }

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let mut store = memory_store();
        create_user(&mut store, "alice", 30);
        create_user(&mut store, "bob", 25);
        create_user(&mut store, "carol", 35);

        store.delete(2).unwrap();
        let next = create_user(&mut store, "dave", 40);
        assert_eq!(next.id(), Some(4));
    }

    #[test]
    fn delete_removes_from_both_file_and_index() {
        let mut store = memory_store();
        create_user(&mut store, "alice", 30);
        create_user(&mut store, "bob", 25);
        create_user(&mut store, "carol", 35);

        store.delete(2).unwrap();

        assert!(store.get(2).unwrap_err().is_not_found());
        assert!(store.get(1).is_ok());
        assert!(store.get(3).is_ok());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn get_missing_id_is_not_found() {
        let store = memory_store();
        let err = store.get(99).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { id: 99 }));
    }

    #[test]
    fn delete_missing_id_leaves_store_unchanged() {
        let mut store = memory_store();
        create_user(&mut store, "alice", 30);

        assert!(store.delete(5).unwrap_err().is_not_found());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn save_updates_existing_record_in_place() {
        let mut store = memory_store();
        let mut record = create_user(&mut store, "alice", 30);

        record.set("age", 31).unwrap();
        store.save(record).unwrap();

        assert_eq!(store.get(1).unwrap().get_integer("age").unwrap(), Some(31));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn save_without_id_behaves_like_create() {
        let mut store = memory_store();
        let mut record = store.new_record();
        record.set("username", "alice").unwrap();

        let saved = store.save(record).unwrap();
        assert_eq!(saved.id(), Some(1));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn save_on_deleted_id_is_not_found() {
        let mut store = memory_store();
        let record = create_user(&mut store, "alice", 30);
        store.delete(1).unwrap();

        let err = store.save(record).unwrap_err();
        assert!(err.is_not_found());
        assert!(store.is_empty());
    }

    #[test]
    fn validation_failure_leaves_stored_value_unchanged() {
        let mut store = memory_store();
        let mut record = create_user(&mut store, "alice", 30);

        // max_length is 50
        let err = record.set("username", "x".repeat(51).as_str()).unwrap_err();
        assert!(matches!(err, CodecError::MaxLengthExceeded { .. }));

        assert_eq!(
            store.get(1).unwrap().get_text("username").unwrap(),
            Some("alice")
        );
    }

    #[test]
    fn iter_yields_records_in_ascending_id_order() {
        let mut store = memory_store();
        create_user(&mut store, "alice", 30);
        create_user(&mut store, "bob", 25);
        create_user(&mut store, "carol", 35);
        store.delete(2).unwrap();

        let ids: Vec<i64> = store.iter().filter_map(Record::id).collect();
        assert_eq!(ids, [1, 3]);
    }

    #[test]
    fn find_scans_non_indexed_fields() {
        let mut store = memory_store();
        create_user(&mut store, "alice", 30);
        create_user(&mut store, "bob", 30);
        create_user(&mut store, "carol", 35);

        let thirty = store.find("age", &Value::Integer(30)).unwrap();
        assert_eq!(thirty.len(), 2);

        assert!(store.find("nope", &Value::Null).is_err());
    }

    #[test]
    fn file_store_replays_on_reopen() {
        let dir = tempdir().unwrap();
        let config = Config::default().data_dir(dir.path());

        {
            let mut store = Store::open(user_schema(), &config).unwrap();
            create_user(&mut store, "alice", 30);
            let mut record = create_user(&mut store, "bob", 25);

            record.set("age", 26).unwrap();
            store.save(record).unwrap();
        }

        // Fresh startup rebuilds the index entirely from the file
        let store = Store::open(user_schema(), &config).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.latest_id(), 2);
        assert_eq!(store.get(2).unwrap().get_integer("age").unwrap(), Some(26));
        assert!(dir.path().join("user.txt").exists());
    }

    #[test]
    fn idempotent_save_keeps_file_byte_identical() {
        let dir = tempdir().unwrap();
        let config = Config::default().data_dir(dir.path());
        let path = dir.path().join("user.txt");

        let mut store = Store::open(user_schema(), &config).unwrap();
        let record = create_user(&mut store, "alice", 30);

        store.save(record.clone()).unwrap();
        let first = std::fs::read(&path).unwrap();

        store.save(record).unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn deletes_survive_reopen() {
        let dir = tempdir().unwrap();
        let config = Config::default().data_dir(dir.path());

        {
            let mut store = Store::open(user_schema(), &config).unwrap();
            create_user(&mut store, "alice", 30);
            create_user(&mut store, "bob", 25);
            store.delete(1).unwrap();
        }

        let mut store = Store::open(user_schema(), &config).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get(1).unwrap_err().is_not_found());

        // The deleted id stays burned after a restart
        let next = create_user(&mut store, "carol", 35);
        assert_eq!(next.id(), Some(3));
    }

    #[test]
    fn preseeded_backend_is_replayed() {
        use linedb_storage::InMemoryBackend;

        // Field order: age, id, username
        let backend = InMemoryBackend::with_lines(vec![
            "30<-->1<-->alice".to_string(),
            "25<-->2<-->bob".to_string(),
        ]);
        let store = Store::with_backend(
            Arc::new(user_schema()),
            Box::new(backend),
            None,
            DriftPolicy::Abort,
        )
        .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(2).unwrap().get_text("username").unwrap(), Some("bob"));
    }

    #[test]
    fn drifted_file_fails_open_under_abort() {
        use linedb_storage::InMemoryBackend;

        let backend = InMemoryBackend::with_lines(vec!["bad-line".to_string()]);
        let result = Store::with_backend(
            Arc::new(user_schema()),
            Box::new(backend),
            None,
            DriftPolicy::Abort,
        );

        assert!(result.is_err());
    }
}
