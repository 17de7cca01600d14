//! Delimited-line record codec.

use crate::error::{CodecError, CodecResult};
use crate::field::FieldKind;
use crate::record::Record;
use crate::schema::Schema;
use crate::value::Value;
use std::sync::Arc;

/// The fixed field separator used by the line format.
pub const SEPARATOR: &str = "<-->";

/// Converts between records and single delimited text lines.
///
/// Both directions are driven by the schema's cached alphabetical field
/// order, so the format needs no per-line header. The flip side is that
/// schema changes (adding or removing a field) invalidate existing files;
/// this is an accepted limitation of the format, not something the codec
/// papers over - a mismatched line fails with [`CodecError::SchemaDrift`].
///
/// # Example
///
/// ```
/// use linedb_codec::{FieldSpec, LineCodec, Schema};
/// use std::sync::Arc;
///
/// let schema = Arc::new(
///     Schema::builder("user")
///         .field("username", FieldSpec::text(50))
///         .field("age", FieldSpec::integer())
///         .build()
///         .unwrap(),
/// );
/// let codec = LineCodec::new(schema);
///
/// let mut record = codec.new_record();
/// record.set("id", 1).unwrap();
/// record.set("username", "alice").unwrap();
/// record.set("age", 30).unwrap();
///
/// let line = codec.encode(&record).unwrap();
/// assert_eq!(line, "30<-->1<-->alice");
/// assert_eq!(codec.decode(&line).unwrap(), record);
/// ```
#[derive(Debug, Clone)]
pub struct LineCodec {
    schema: Arc<Schema>,
}

impl LineCodec {
    /// Creates a codec for the given schema.
    #[must_use]
    pub fn new(schema: Arc<Schema>) -> Self {
        Self { schema }
    }

    /// Returns the codec's schema.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Creates a fresh record for this codec's schema, with defaults.
    #[must_use]
    pub fn new_record(&self) -> Record {
        Record::new(Arc::clone(&self.schema))
    }

    /// Encodes a record as one delimited line.
    ///
    /// Values are stringified in field order and joined with
    /// [`SEPARATOR`]. `Null` encodes as the empty token. The output is
    /// deterministic: identical field values always produce an identical
    /// line.
    ///
    /// # Errors
    ///
    /// Returns `RequiredMissing` if a required field (including `id`)
    /// holds no value - a record with an unset required field can exist
    /// in memory but can never be persisted.
    pub fn encode(&self, record: &Record) -> CodecResult<String> {
        let mut tokens = Vec::with_capacity(self.schema.len());

        for (name, spec) in self.schema.iter() {
            let value = record.get(name)?;
            if spec.is_required() && value.is_null() {
                return Err(CodecError::RequiredMissing {
                    field: name.to_string(),
                });
            }
            tokens.push(value.to_string());
        }

        Ok(tokens.join(SEPARATOR))
    }

    /// Decodes one delimited line into a record.
    ///
    /// The line is split on [`SEPARATOR`] and the tokens are zipped
    /// positionally against the field order. Each token is converted back
    /// to its field's declared kind and validated on assignment. The empty
    /// token decodes to `Null` regardless of kind (which is why an empty
    /// text value does not round-trip - it comes back as `Null`).
    ///
    /// # Errors
    ///
    /// Returns `SchemaDrift` if the token count does not match the
    /// schema's field count, `InvalidInteger` for an unparsable integer
    /// token, or a validation error if a token violates its field's
    /// bounds.
    pub fn decode(&self, line: &str) -> CodecResult<Record> {
        let tokens: Vec<&str> = line.split(SEPARATOR).collect();
        let order = self.schema.field_order();

        if tokens.len() != order.len() {
            return Err(CodecError::SchemaDrift {
                expected: order.len(),
                actual: tokens.len(),
            });
        }

        let mut record = self.new_record();
        for (name, token) in order.iter().zip(tokens) {
            let spec = self
                .schema
                .field(name)
                .ok_or_else(|| CodecError::unknown_field(name))?;

            let value = if token.is_empty() {
                Value::Null
            } else {
                match spec.kind() {
                    FieldKind::Integer => {
                        let parsed = token.parse::<i64>().map_err(|_| {
                            CodecError::InvalidInteger {
                                field: name.clone(),
                                token: token.to_string(),
                            }
                        })?;
                        Value::Integer(parsed)
                    }
                    FieldKind::Text => Value::Text(token.to_string()),
                }
            };

            record.set(name, value)?;
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldSpec;
    use proptest::prelude::*;

    fn user_codec() -> LineCodec {
        let schema = Schema::builder("user")
            .field("username", FieldSpec::text(50).required())
            .field("age", FieldSpec::integer().max_value(150))
            .build()
            .unwrap();
        LineCodec::new(Arc::new(schema))
    }

    #[test]
    fn encode_uses_sorted_field_order() {
        let codec = user_codec();
        let mut record = codec.new_record();
        record.set("id", 1).unwrap();
        record.set("username", "alice").unwrap();
        record.set("age", 30).unwrap();

        // age < id < username alphabetically
        assert_eq!(codec.encode(&record).unwrap(), "30<-->1<-->alice");
    }

    #[test]
    fn decode_round_trips_field_by_field() {
        let codec = user_codec();
        let mut record = codec.new_record();
        record.set("id", 7).unwrap();
        record.set("username", "bob").unwrap();
        record.set("age", 44).unwrap();

        let decoded = codec.decode(&codec.encode(&record).unwrap()).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(decoded.id(), Some(7));
    }

    #[test]
    fn null_optional_field_round_trips() {
        let codec = user_codec();
        let mut record = codec.new_record();
        record.set("id", 1).unwrap();
        record.set("username", "alice").unwrap();

        let line = codec.encode(&record).unwrap();
        assert_eq!(line, "<-->1<-->alice");

        let decoded = codec.decode(&line).unwrap();
        assert_eq!(decoded.get("age").unwrap(), &Value::Null);
    }

    #[test]
    fn encode_is_deterministic() {
        let codec = user_codec();
        let mut record = codec.new_record();
        record.set("id", 1).unwrap();
        record.set("username", "alice").unwrap();

        assert_eq!(
            codec.encode(&record).unwrap(),
            codec.encode(&record).unwrap()
        );
    }

    #[test]
    fn missing_required_field_fails_encode() {
        let codec = user_codec();
        let mut record = codec.new_record();
        record.set("id", 1).unwrap();

        let err = codec.encode(&record).unwrap_err();
        assert_eq!(
            err,
            CodecError::RequiredMissing {
                field: "username".into(),
            }
        );
    }

    #[test]
    fn unassigned_id_fails_encode() {
        let codec = user_codec();
        let mut record = codec.new_record();
        record.set("username", "alice").unwrap();

        let err = codec.encode(&record).unwrap_err();
        assert_eq!(err, CodecError::RequiredMissing { field: "id".into() });
    }

    #[test]
    fn token_count_mismatch_is_schema_drift() {
        let codec = user_codec();

        let err = codec.decode("30<-->1").unwrap_err();
        assert_eq!(
            err,
            CodecError::SchemaDrift {
                expected: 3,
                actual: 2,
            }
        );

        let err = codec.decode("30<-->1<-->alice<-->extra").unwrap_err();
        assert_eq!(
            err,
            CodecError::SchemaDrift {
                expected: 3,
                actual: 4,
            }
        );
    }

    #[test]
    fn bad_integer_token_is_rejected() {
        let codec = user_codec();
        let err = codec.decode("thirty<-->1<-->alice").unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidInteger {
                field: "age".into(),
                token: "thirty".into(),
            }
        );
    }

    #[test]
    fn decode_revalidates_bounds() {
        let codec = user_codec();
        // age max_value is 150; a hand-edited line must not sneak past it
        let err = codec.decode("900<-->1<-->alice").unwrap_err();
        assert!(matches!(err, CodecError::MaxValueExceeded { .. }));
    }

    proptest! {
        #[test]
        fn round_trip_for_valid_records(
            id in 1i64..1_000_000,
            username in "[a-z][a-z0-9_]{0,49}",
            age in proptest::option::of(0i64..=150),
        ) {
            let codec = user_codec();
            let mut record = codec.new_record();
            record.set("id", id).unwrap();
            record.set("username", username.as_str()).unwrap();
            record.set("age", Value::from(age)).unwrap();

            let decoded = codec.decode(&codec.encode(&record).unwrap()).unwrap();
            prop_assert_eq!(decoded, record);
        }
    }
}
