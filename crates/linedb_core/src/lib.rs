//! # LineDB Core
//!
//! Embedded record store engine for LineDB.
//!
//! This crate combines the pieces from `linedb_storage` and
//! `linedb_codec` into a usable store:
//! - [`AvlIndex`] - the self-balancing in-memory primary-key index
//! - [`TableFile`] - the line-semantic layer over a storage backend
//!   (locate/replace/delete by id, latest-id tracking)
//! - [`Store`] - the facade callers use directly; on construction it
//!   replays the file into a fresh index
//! - [`Collection`] / [`RecordModel`] - typed access on top of a store
//!
//! The file is the single source of truth; the index is a derived,
//! rebuildable cache. Every mutating call completes its file write before
//! touching the index, so the two never disagree about which records
//! exist.
//!
//! ## Example
//!
//! ```
//! use linedb_codec::{FieldSpec, Schema, Value};
//! use linedb_core::{BackendKind, Config, Store};
//!
//! let schema = Schema::builder("user")
//!     .field("username", FieldSpec::text(50).required())
//!     .field("age", FieldSpec::integer())
//!     .build()
//!     .unwrap();
//!
//! let config = Config::default().backend(BackendKind::Memory);
//! let mut store = Store::open(schema, &config).unwrap();
//!
//! let mut record = store.new_record();
//! record.set("username", "alice").unwrap();
//! record.set("age", 30).unwrap();
//!
//! let created = store.create(record).unwrap();
//! assert_eq!(created.id(), Some(1));
//! assert_eq!(store.get(1).unwrap(), created);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod collection;
mod config;
mod error;
mod index;
mod store;
mod table;

pub use collection::{Collection, RecordModel};
pub use config::{BackendKind, Config, DriftPolicy};
pub use error::{CoreError, CoreResult};
pub use index::AvlIndex;
pub use store::Store;
pub use table::TableFile;
