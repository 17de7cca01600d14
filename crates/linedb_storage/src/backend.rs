//! Storage backend trait definition.

use crate::error::StorageResult;

/// A low-level, line-addressed storage backend for LineDB.
///
/// Storage backends are **opaque line stores**. They provide simple
/// operations for reading, appending, replacing, and deleting whole lines.
/// LineDB owns all record format interpretation - backends do not
/// understand field separators, schemas, or identifiers.
///
/// # Invariants
///
/// - `append_line` returns the 0-based index of the new line, which equals
///   the line count at the time of the call
/// - `read_all` returns exactly the lines previously stored, in order
/// - Line indexes are positional: deleting line `i` shifts every later
///   line down by one
/// - Backends must be `Send + Sync` for cross-thread ownership
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - For testing
/// - [`super::FileBackend`] - For persistent storage
pub trait LineBackend: Send + Sync {
    /// Reads every stored line, in order, without trailing newlines.
    ///
    /// # Errors
    ///
    /// Returns an error if an I/O error occurs.
    fn read_all(&self) -> StorageResult<Vec<String>>;

    /// Returns the current number of stored lines.
    ///
    /// This is the index the next `append_line` will return.
    ///
    /// # Errors
    ///
    /// Returns an error if the count cannot be determined.
    fn line_count(&self) -> StorageResult<usize>;

    /// Appends a line to the end of the storage.
    ///
    /// Returns the 0-based index of the new line.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The payload contains a line break (`UnencodableLine`)
    /// - An I/O error occurs
    fn append_line(&mut self, line: &str) -> StorageResult<usize>;

    /// Replaces the line at `index` with `line`.
    ///
    /// This rewrites the full line sequence - an O(n) operation, accepted
    /// as the cost of a variable-length text format.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `index` is out of range (`LineOutOfRange`)
    /// - The payload contains a line break (`UnencodableLine`)
    /// - An I/O error occurs
    fn replace_line(&mut self, index: usize, line: &str) -> StorageResult<()>;

    /// Deletes the line at `index`, shifting later lines down by one.
    ///
    /// This rewrites the full line sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `index` is out of range (`LineOutOfRange`)
    /// - An I/O error occurs
    fn delete_line(&mut self, index: usize) -> StorageResult<()>;
}
