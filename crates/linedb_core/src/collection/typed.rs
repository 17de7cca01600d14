//! Typed collection implementation.

use crate::collection::model::RecordModel;
use crate::config::Config;
use crate::error::CoreResult;
use crate::store::Store;
use std::marker::PhantomData;

/// A typed facade over a [`Store`].
///
/// `Collection<T>` converts between `T` and the dynamic record form on
/// every call, so callers work with plain structs and per-field typed
/// accessors instead of string-keyed values.
///
/// # Example
///
/// ```rust,ignore
/// use linedb_core::{Collection, Config};
///
/// let mut users: Collection<User> = Collection::open(&config)?;
///
/// let alice = users.create(&User { id: None, username: "alice".into(), age: Some(30) })?;
/// let found = users.get(alice.id.unwrap())?;
///
/// for user in users.all()? {
///     println!("{}", user.username);
/// }
/// ```
pub struct Collection<T: RecordModel> {
    store: Store,
    _marker: PhantomData<T>,
}

impl<T: RecordModel> Collection<T> {
    /// Opens a collection, building the schema from `T` and replaying
    /// the backing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema is invalid or the store fails to
    /// open.
    pub fn open(config: &Config) -> CoreResult<Self> {
        let store = Store::open(T::schema()?, config)?;
        Ok(Self::from_store(store))
    }

    /// Wraps an already-open store.
    #[must_use]
    pub fn from_store(store: Store) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Returns the underlying store mutably.
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// Returns the number of live records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if the collection holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Persists a new value, returning it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the file write fails.
    pub fn create(&mut self, model: &T) -> CoreResult<T> {
        let mut record = self.store.new_record();
        model.fill(&mut record)?;
        let created = self.store.create(record)?;
        T::from_record(&created)
    }

    /// Looks up a value by id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::NotFound`] if no record has this id.
    pub fn get(&self, id: i64) -> CoreResult<T> {
        T::from_record(&self.store.get(id)?)
    }

    /// Persists the current state of a value.
    ///
    /// A model without an id is created; a model with an id replaces its
    /// existing record.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the file write fails, or
    /// `NotFound` for an id no longer in the store.
    pub fn save(&mut self, model: &T) -> CoreResult<T> {
        let mut record = self.store.new_record();
        model.fill(&mut record)?;
        let saved = self.store.save(record)?;
        T::from_record(&saved)
    }

    /// Deletes a record by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has this id.
    pub fn delete(&mut self, id: i64) -> CoreResult<()> {
        self.store.delete(id)
    }

    /// Returns every value in ascending id order.
    ///
    /// # Errors
    ///
    /// Returns an error if a record fails typed conversion.
    pub fn all(&self) -> CoreResult<Vec<T>> {
        self.store.iter().map(T::from_record).collect()
    }
}

impl<T: RecordModel> std::fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("schema", &self.store.schema().name())
            .field("records", &self.store.len())
            .finish_non_exhaustive()
    }
}
