//! Line-semantic layer binding a storage backend to a schema's codec.

use crate::config::DriftPolicy;
use crate::error::{CoreError, CoreResult};
use linedb_codec::{CodecError, LineCodec, Record, Schema, Value, ID_FIELD};
use linedb_storage::LineBackend;
use std::sync::Arc;

/// The file-facing half of a store: owns a [`LineBackend`] and knows how
/// to address records inside it.
///
/// Logical records are not in ordinal correspondence with line positions
/// once deletes have happened, so every replace or delete first re-locates
/// the target line by scanning for its `id`. The highest assigned id is
/// tracked here and survives deletes - ids are never reused.
pub struct TableFile {
    backend: Box<dyn LineBackend>,
    codec: LineCodec,
    drift_policy: DriftPolicy,
    latest_id: i64,
}

impl TableFile {
    /// Creates a table over a backend. Call [`TableFile::load`] before
    /// using it so the latest-id counter reflects the file.
    #[must_use]
    pub fn new(
        backend: Box<dyn LineBackend>,
        schema: Arc<Schema>,
        drift_policy: DriftPolicy,
    ) -> Self {
        Self {
            backend,
            codec: LineCodec::new(schema),
            drift_policy,
            latest_id: 0,
        }
    }

    /// Returns the table's schema.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        self.codec.schema()
    }

    /// Returns the highest id assigned so far (0 if none).
    #[must_use]
    pub fn latest_id(&self) -> i64 {
        self.latest_id
    }

    /// Returns the number of stored lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot report its line count.
    pub fn line_count(&self) -> CoreResult<usize> {
        Ok(self.backend.line_count()?)
    }

    /// Decodes every stored line and initializes the latest-id counter
    /// from the last data line (0 for an empty file).
    ///
    /// # Errors
    ///
    /// An undecodable line is handled per the configured [`DriftPolicy`]:
    /// under `Abort` the error propagates (the default - silently dropping
    /// records would corrupt any index derived from the result); under
    /// `Skip` the line is dropped and reported via a `tracing` warning.
    pub fn load(&mut self) -> CoreResult<Vec<Record>> {
        let lines = self.backend.read_all()?;
        let mut records = Vec::with_capacity(lines.len());

        for (index, line) in lines.iter().enumerate() {
            let record = match self.decode_checked(line) {
                Ok(record) => record,
                Err(error) => match self.drift_policy {
                    DriftPolicy::Abort => return Err(error),
                    DriftPolicy::Skip => {
                        tracing::warn!(line = index, %error, "skipping undecodable line");
                        continue;
                    }
                },
            };
            records.push(record);
        }

        self.latest_id = records.last().and_then(Record::id).unwrap_or(0);
        Ok(records)
    }

    /// Assigns the next id to an unpersisted record and appends it.
    ///
    /// The latest-id counter is incremented exactly once, and only after
    /// the append succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the record already has an id, fails to encode,
    /// or the backend write fails.
    pub fn insert(&mut self, mut record: Record) -> CoreResult<Record> {
        if let Some(id) = record.id() {
            return Err(CoreError::invalid_operation(format!(
                "record {id} is already persisted; use replace"
            )));
        }

        let id = self.latest_id + 1;
        record.set(ID_FIELD, id)?;

        let line = self.codec.encode(&record)?;
        self.backend.append_line(&line)?;
        self.latest_id = id;

        tracing::trace!(id, "record appended");
        Ok(record)
    }

    /// Re-encodes a persisted record and rewrites its line in place.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if the record has no id, `NotFound` if
    /// no line carries that id, or an encode/backend error.
    pub fn replace(&mut self, record: &Record) -> CoreResult<()> {
        let id = record
            .id()
            .ok_or_else(|| CoreError::invalid_operation("record has no id; use insert"))?;

        let line = self.codec.encode(record)?;
        let index = self
            .find_line_index(ID_FIELD, &Value::Integer(id))?
            .ok_or(CoreError::NotFound { id })?;

        self.backend.replace_line(index, &line)?;
        tracing::trace!(id, line = index, "record replaced");
        Ok(())
    }

    /// Removes the line holding the record with this id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no line carries the id, or a backend error.
    pub fn delete(&mut self, id: i64) -> CoreResult<()> {
        let index = self
            .find_line_index(ID_FIELD, &Value::Integer(id))?
            .ok_or(CoreError::NotFound { id })?;

        self.backend.delete_line(index)?;
        tracing::trace!(id, line = index, "record deleted");
        Ok(())
    }

    /// Finds the 0-based line index of the first record whose `field`
    /// equals `value`.
    ///
    /// This is a linear scan that decodes every line until a match is
    /// found - line positions shift on delete, so the physical location
    /// must be re-derived before every replace or delete.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` for an undeclared field name, or a decode
    /// error if a line cannot be decoded mid-scan.
    pub fn find_line_index(&self, field: &str, value: &Value) -> CoreResult<Option<usize>> {
        if !self.schema().contains(field) {
            return Err(CodecError::unknown_field(field).into());
        }

        for (index, line) in self.backend.read_all()?.iter().enumerate() {
            let record = self.decode_checked(line)?;
            if record.get(field)? == value {
                return Ok(Some(index));
            }
        }

        Ok(None)
    }

    fn decode_checked(&self, line: &str) -> CoreResult<Record> {
        let record = self.codec.decode(line)?;
        if record.id().is_none() {
            // A persisted line must carry an id; treat a blank one the
            // same as any other undecodable line.
            return Err(CoreError::invalid_operation("stored line has no id"));
        }
        Ok(record)
    }
}

impl std::fmt::Debug for TableFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableFile")
            .field("schema", &self.schema().name())
            .field("latest_id", &self.latest_id)
            .finish_non_exhaustive()
    }
}
