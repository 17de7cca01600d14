//! File-based storage backend for persistent storage.

use crate::backend::LineBackend;
use crate::error::{StorageError, StorageResult};
use parking_lot::RwLock;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A file-based storage backend.
///
/// Each stored line occupies exactly one text line in the underlying file,
/// terminated by `\n`. Data survives process restarts.
///
/// # File Handles
///
/// No file handle is held across calls. Every operation opens the file for
/// the minimal necessary scope (read-all, or read-then-overwrite) and
/// releases it before returning, so external processes may safely read the
/// file between operations. They must not write to it concurrently.
///
/// # Durability
///
/// Appends go straight to the end of the file; replace and delete rewrite
/// the whole file through a write-truncate of the original path. This is
/// append/rewrite safe for single-threaded use, which is the intended
/// operating mode.
///
/// # Example
///
/// ```no_run
/// use linedb_storage::{LineBackend, FileBackend};
/// use std::path::Path;
///
/// let mut backend = FileBackend::open(Path::new("users.txt")).unwrap();
/// let index = backend.append_line("1<-->alice").unwrap();
/// assert_eq!(index, 0);
/// ```
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    count: RwLock<usize>,
}

impl FileBackend {
    /// Opens or creates a file backend at the given path.
    ///
    /// If the file exists, its current line count is read. If it doesn't
    /// exist, an empty file is created.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or created. A backend
    /// that cannot create its file is unusable, so this is fatal at
    /// initialization time.
    pub fn open(path: &Path) -> StorageResult<Self> {
        OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(path)?;

        let count = fs::read_to_string(path)?.lines().count();

        Ok(Self {
            path: path.to_path_buf(),
            count: RwLock::new(count),
        })
    }

    /// Opens or creates a file backend, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or the file cannot
    /// be opened.
    pub fn open_with_create_dirs(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Self::open(path)
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn rewrite(&self, lines: &[String]) -> StorageResult<()> {
        let mut contents = lines.join("\n");
        if !lines.is_empty() {
            contents.push('\n');
        }
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl LineBackend for FileBackend {
    fn read_all(&self) -> StorageResult<Vec<String>> {
        let contents = fs::read_to_string(&self.path)?;
        Ok(contents.lines().map(str::to_string).collect())
    }

    fn line_count(&self) -> StorageResult<usize> {
        Ok(*self.count.read())
    }

    fn append_line(&mut self, line: &str) -> StorageResult<usize> {
        if line.contains('\n') || line.contains('\r') {
            return Err(StorageError::UnencodableLine);
        }

        let mut count = self.count.write();
        let index = *count;

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;

        *count += 1;
        Ok(index)
    }

    fn replace_line(&mut self, index: usize, line: &str) -> StorageResult<()> {
        if line.contains('\n') || line.contains('\r') {
            return Err(StorageError::UnencodableLine);
        }

        let mut lines = self.read_all()?;
        if index >= lines.len() {
            return Err(StorageError::LineOutOfRange {
                index,
                count: lines.len(),
            });
        }

        lines[index] = line.to_string();
        self.rewrite(&lines)
    }

    fn delete_line(&mut self, index: usize) -> StorageResult<()> {
        let mut count = self.count.write();

        let mut lines = self.read_all()?;
        if index >= lines.len() {
            return Err(StorageError::LineOutOfRange {
                index,
                count: lines.len(),
            });
        }

        lines.remove(index);
        self.rewrite(&lines)?;

        *count = lines.len();
        Ok(())
    }
}
