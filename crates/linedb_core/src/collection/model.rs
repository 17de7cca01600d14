//! Record model trait for typed collections.

use crate::error::CoreResult;
use linedb_codec::{Record, Schema};

/// Trait for types stored as records in a typed [`crate::Collection`].
///
/// Implementors declare their schema once and provide explicit
/// conversions between the typed struct and the dynamic [`Record`]. There
/// is no runtime reflection and no registration side effect on type
/// declaration - a record type is just a struct with typed fields and an
/// explicit trait implementation.
///
/// `fill` must write the id too when the model carries one, so that
/// saving an already-persisted model updates its existing line instead of
/// appending a new record.
///
/// # Example
///
/// ```rust,ignore
/// use linedb_codec::{FieldSpec, Record, Schema};
/// use linedb_core::{CoreResult, RecordModel};
///
/// struct User {
///     id: Option<i64>,
///     username: String,
///     age: Option<i64>,
/// }
///
/// impl RecordModel for User {
///     fn schema() -> CoreResult<Schema> {
///         Ok(Schema::builder("user")
///             .field("username", FieldSpec::text(50).required())
///             .field("age", FieldSpec::integer())
///             .build()?)
///     }
///
///     fn from_record(record: &Record) -> CoreResult<Self> {
///         Ok(User {
///             id: record.id(),
///             username: record.get_text("username")?.unwrap_or_default().to_string(),
///             age: record.get_integer("age")?,
///         })
///     }
///
///     fn fill(&self, record: &mut Record) -> CoreResult<()> {
///         if let Some(id) = self.id {
///             record.set("id", id)?;
///         }
///         record.set("username", self.username.as_str())?;
///         record.set("age", self.age)?;
///         Ok(())
///     }
/// }
/// ```
pub trait RecordModel: Sized {
    /// Builds the schema for this record type.
    ///
    /// Called once when a collection is opened; the result drives field
    /// order, validation, and the on-disk format.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema declarations are invalid.
    fn schema() -> CoreResult<Schema>;

    /// Reads a typed value out of a dynamic record.
    ///
    /// # Errors
    ///
    /// Returns an error if a field the type depends on is missing or has
    /// an unexpected shape.
    fn from_record(record: &Record) -> CoreResult<Self>;

    /// Writes this value's fields into a dynamic record through its
    /// validated setters.
    ///
    /// # Errors
    ///
    /// Returns an error if any field value fails validation.
    fn fill(&self, record: &mut Record) -> CoreResult<()>;
}
