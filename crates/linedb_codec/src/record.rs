//! Record type: an ordered, validated field-name to value mapping.

use crate::error::{CodecError, CodecResult};
use crate::schema::{Schema, ID_FIELD};
use crate::value::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// One record instance: an ordered mapping from field name to current
/// value, always including the `id` field.
///
/// A record is created from its schema with every field pre-populated
/// with its default (or `Null`). Every write through [`Record::set`]
/// re-runs the field's validation, so an invalid value is rejected at the
/// call site and can never reach storage.
///
/// `id` is `Null` until the record is first persisted; once assigned it
/// is immutable and unique within its store, and is never reused even
/// after the record is deleted.
///
/// # Example
///
/// ```
/// use linedb_codec::{FieldSpec, Schema, Record};
/// use std::sync::Arc;
///
/// let schema = Arc::new(
///     Schema::builder("user")
///         .field("username", FieldSpec::text(50))
///         .build()
///         .unwrap(),
/// );
///
/// let mut record = Record::new(schema);
/// assert_eq!(record.id(), None);
/// record.set("username", "alice").unwrap();
/// assert!(record.set("missing", 1).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: Arc<Schema>,
    values: BTreeMap<String, Value>,
}

impl Record {
    /// Creates a record with every declared field set to its default.
    #[must_use]
    pub fn new(schema: Arc<Schema>) -> Self {
        let values = schema
            .iter()
            .map(|(name, spec)| {
                let value = spec.default().cloned().unwrap_or(Value::Null);
                (name.to_string(), value)
            })
            .collect();

        Self { schema, values }
    }

    /// Returns the record's schema.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Returns the current value of a field.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` if the schema declares no such field.
    pub fn get(&self, field: &str) -> CodecResult<&Value> {
        self.values
            .get(field)
            .ok_or_else(|| CodecError::unknown_field(field))
    }

    /// Returns a field's integer value, or `None` if the field is unset.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` if the schema declares no such field.
    pub fn get_integer(&self, field: &str) -> CodecResult<Option<i64>> {
        Ok(self.get(field)?.as_integer())
    }

    /// Returns a field's text value, or `None` if the field is unset.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` if the schema declares no such field.
    pub fn get_text(&self, field: &str) -> CodecResult<Option<&str>> {
        Ok(self.get(field)?.as_text())
    }

    /// Sets a field to a new value, re-running validation.
    ///
    /// On failure the prior value is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` for an undeclared field, `IdReassigned`
    /// when changing an already-assigned `id`, or the validation error
    /// for a value that fails the field's specification.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> CodecResult<()> {
        let value = value.into();

        let spec = self
            .schema
            .field(field)
            .ok_or_else(|| CodecError::unknown_field(field))?;
        spec.validate(field, &value)?;

        if field == ID_FIELD {
            if let Some(current) = self.id() {
                if value.as_integer() != Some(current) {
                    return Err(CodecError::IdReassigned { current });
                }
            }
        }

        self.values.insert(field.to_string(), value);
        Ok(())
    }

    /// Returns the assigned id, or `None` if the record has not been
    /// persisted yet.
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        self.values.get(ID_FIELD).and_then(Value::as_integer)
    }

    /// Iterates over `(field, value)` pairs in the schema's field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema.field_order().iter().filter_map(|name| {
            self.values
                .get(name)
                .map(|value| (name.as_str(), value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldSpec;

    fn user_schema() -> Arc<Schema> {
        Arc::new(
            Schema::builder("user")
                .field("username", FieldSpec::text(50).required())
                .field("age", FieldSpec::integer().max_value(150))
                .field("bio", FieldSpec::text(200).default_value("n/a"))
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn new_record_carries_defaults() {
        let record = Record::new(user_schema());
        assert_eq!(record.id(), None);
        assert_eq!(record.get("bio").unwrap(), &Value::from("n/a"));
        assert_eq!(record.get("username").unwrap(), &Value::Null);
    }

    #[test]
    fn set_validates_on_every_write() {
        let mut record = Record::new(user_schema());
        record.set("age", 30).unwrap();

        let err = record.set("age", 200).unwrap_err();
        assert!(matches!(err, CodecError::MaxValueExceeded { .. }));
        // Prior value untouched
        assert_eq!(record.get_integer("age").unwrap(), Some(30));
    }

    #[test]
    fn failed_set_leaves_prior_value() {
        let mut record = Record::new(user_schema());
        record.set("username", "alice").unwrap();

        let long = "x".repeat(51);
        assert!(record.set("username", long.as_str()).is_err());
        assert_eq!(record.get_text("username").unwrap(), Some("alice"));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut record = Record::new(user_schema());
        assert!(matches!(
            record.set("nope", 1),
            Err(CodecError::UnknownField { .. })
        ));
        assert!(matches!(
            record.get("nope"),
            Err(CodecError::UnknownField { .. })
        ));
    }

    #[test]
    fn id_is_immutable_once_assigned() {
        let mut record = Record::new(user_schema());
        record.set("id", 1).unwrap();
        assert_eq!(record.id(), Some(1));

        // Re-setting to the same id is a no-op, changing it is not
        record.set("id", 1).unwrap();
        let err = record.set("id", 2).unwrap_err();
        assert_eq!(err, CodecError::IdReassigned { current: 1 });

        let err = record.set("id", Value::Null).unwrap_err();
        assert_eq!(err, CodecError::IdReassigned { current: 1 });
    }

    #[test]
    fn iter_follows_field_order() {
        let mut record = Record::new(user_schema());
        record.set("username", "alice").unwrap();

        let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["age", "bio", "id", "username"]);
    }
}
