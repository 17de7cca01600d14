//! In-memory storage backend for testing.

use crate::backend::LineBackend;
use crate::error::{StorageError, StorageResult};
use parking_lot::RwLock;

/// An in-memory storage backend.
///
/// This backend stores all lines in memory and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral stores that don't need persistence
///
/// # Example
///
/// ```rust
/// use linedb_storage::{LineBackend, InMemoryBackend};
///
/// let mut backend = InMemoryBackend::new();
/// let index = backend.append_line("1<-->alice").unwrap();
/// assert_eq!(index, 0);
/// assert_eq!(backend.line_count().unwrap(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    lines: RwLock<Vec<String>>,
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory backend with pre-existing lines.
    ///
    /// Useful for testing startup replay scenarios.
    #[must_use]
    pub fn with_lines(lines: Vec<String>) -> Self {
        Self {
            lines: RwLock::new(lines),
        }
    }

    /// Clears all lines from the backend.
    pub fn clear(&mut self) {
        self.lines.write().clear();
    }
}

impl LineBackend for InMemoryBackend {
    fn read_all(&self) -> StorageResult<Vec<String>> {
        Ok(self.lines.read().clone())
    }

    fn line_count(&self) -> StorageResult<usize> {
        Ok(self.lines.read().len())
    }

    fn append_line(&mut self, line: &str) -> StorageResult<usize> {
        if line.contains('\n') || line.contains('\r') {
            return Err(StorageError::UnencodableLine);
        }

        let mut lines = self.lines.write();
        let index = lines.len();
        lines.push(line.to_string());
        Ok(index)
    }

    fn replace_line(&mut self, index: usize, line: &str) -> StorageResult<()> {
        if line.contains('\n') || line.contains('\r') {
            return Err(StorageError::UnencodableLine);
        }

        let mut lines = self.lines.write();
        if index >= lines.len() {
            return Err(StorageError::LineOutOfRange {
                index,
                count: lines.len(),
            });
        }

        lines[index] = line.to_string();
        Ok(())
    }

    fn delete_line(&mut self, index: usize) -> StorageResult<()> {
        let mut lines = self.lines.write();
        if index >= lines.len() {
            return Err(StorageError::LineOutOfRange {
                index,
                count: lines.len(),
            });
        }

        lines.remove(index);
        Ok(())
    }
}
