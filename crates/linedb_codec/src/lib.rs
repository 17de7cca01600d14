//! # LineDB Codec
//!
//! Typed schema layer and delimited-line record codec for LineDB.
//!
//! This crate defines how a record's typed field values map onto a single
//! text line, deterministically:
//! - Field order is the alphabetically sorted list of declared field names,
//!   so it is derivable purely from the schema and never stored per line
//! - Values are joined with the fixed `<-->` separator
//! - Identical records produce identical lines
//!
//! No I/O happens here; the storage backends live in `linedb_storage`.
//!
//! ## Usage
//!
//! ```
//! use linedb_codec::{FieldSpec, LineCodec, Schema, Value};
//! use std::sync::Arc;
//!
//! let schema = Schema::builder("user")
//!     .field("username", FieldSpec::text(50).required())
//!     .field("age", FieldSpec::integer())
//!     .build()
//!     .unwrap();
//!
//! let codec = LineCodec::new(Arc::new(schema));
//! let mut record = codec.new_record();
//! record.set("username", "alice").unwrap();
//! record.set("age", 30).unwrap();
//! record.set("id", 1).unwrap();
//!
//! // Sorted field order: age, id, username
//! assert_eq!(codec.encode(&record).unwrap(), "30<-->1<-->alice");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod field;
mod line;
mod record;
mod schema;
mod value;

pub use error::{CodecError, CodecResult};
pub use field::{FieldKind, FieldSpec};
pub use line::{LineCodec, SEPARATOR};
pub use record::Record;
pub use schema::{Schema, SchemaBuilder, ID_FIELD};
pub use value::Value;
