//! # LineDB Storage
//!
//! Line-addressed storage backends for LineDB.
//!
//! This crate provides the lowest-level storage abstraction for LineDB.
//! Storage backends are **opaque line stores** - they hold an ordered
//! sequence of text lines and do not interpret their contents. All record
//! format interpretation lives above this crate.
//!
//! ## Design Principles
//!
//! - Backends address whole lines by 0-based position
//! - Replacing or deleting a line rewrites the full sequence (there is no
//!   fixed-width in-place update in a variable-length text format)
//! - No knowledge of field separators, schemas, or identifiers
//! - Must be `Send + Sync` so a store can move across threads
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For testing and ephemeral storage
//! - [`FileBackend`] - For persistent storage using OS file APIs
//!
//! ## Example
//!
//! ```rust
//! use linedb_storage::{LineBackend, InMemoryBackend};
//!
//! let mut backend = InMemoryBackend::new();
//! let index = backend.append_line("alice<-->30").unwrap();
//! assert_eq!(index, 0);
//! assert_eq!(backend.read_all().unwrap(), vec!["alice<-->30".to_string()]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::LineBackend;
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;
