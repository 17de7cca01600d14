//! Field kinds and validated field specifications.

use crate::error::{CodecError, CodecResult};
use crate::line::SEPARATOR;
use crate::value::Value;
use std::fmt;

/// The declared kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Signed 64-bit integer.
    Integer,
    /// UTF-8 text with a mandatory maximum length.
    Text,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Integer => write!(f, "integer"),
            FieldKind::Text => write!(f, "text"),
        }
    }
}

/// A typed, validated field descriptor on a record schema.
///
/// A `FieldSpec` is constructed once at schema-definition time and is
/// immutable thereafter. Values are validated against it on every field
/// write, so an invalid update is rejected before it can reach storage.
///
/// Text fields always carry a maximum length - it is a constructor
/// argument, so a schema cannot be built without one.
///
/// # Example
///
/// ```
/// use linedb_codec::{FieldSpec, Value};
///
/// let spec = FieldSpec::text(5).required();
/// assert!(spec.validate("name", &Value::from("alice")).is_ok());
/// assert!(spec.validate("name", &Value::from("toolong")).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    kind: FieldKind,
    required: bool,
    default: Option<Value>,
    max_length: Option<usize>,
    max_value: Option<i64>,
}

impl FieldSpec {
    /// Creates an integer field specification.
    #[must_use]
    pub const fn integer() -> Self {
        Self {
            kind: FieldKind::Integer,
            required: false,
            default: None,
            max_length: None,
            max_value: None,
        }
    }

    /// Creates a text field specification with the given maximum length.
    #[must_use]
    pub const fn text(max_length: usize) -> Self {
        Self {
            kind: FieldKind::Text,
            required: false,
            default: None,
            max_length: Some(max_length),
            max_value: None,
        }
    }

    /// Marks this field as required.
    ///
    /// A required field must hold a non-null value when a record is
    /// serialized for storage.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the default value assigned to new records.
    ///
    /// The default is validated when the schema is built.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets the maximum value for an integer field.
    #[must_use]
    pub const fn max_value(mut self, max: i64) -> Self {
        self.max_value = Some(max);
        self
    }

    /// Returns the declared kind.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns true if the field is required at serialization time.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the default value, if any.
    #[must_use]
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Returns the maximum length (text fields only).
    #[must_use]
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Returns the maximum value (integer fields only).
    #[must_use]
    pub fn max_value_limit(&self) -> Option<i64> {
        self.max_value
    }

    /// Validates a value against this specification.
    ///
    /// A value must be `Null` or match the declared kind; integer values
    /// must not exceed `max_value` and text values must not exceed
    /// `max_length`. Text values containing the field separator or a line
    /// break are rejected because they cannot survive the line format.
    ///
    /// # Errors
    ///
    /// Returns a validation error describing the first violated rule.
    /// Violations are never silently coerced.
    pub fn validate(&self, field: &str, value: &Value) -> CodecResult<()> {
        let Some(actual) = value.kind() else {
            return Ok(());
        };

        if actual != self.kind {
            return Err(CodecError::TypeMismatch {
                field: field.to_string(),
                expected: self.kind,
                actual,
            });
        }

        match value {
            Value::Integer(n) => {
                if let Some(max) = self.max_value {
                    if *n > max {
                        return Err(CodecError::MaxValueExceeded {
                            field: field.to_string(),
                            max,
                            actual: *n,
                        });
                    }
                }
            }
            Value::Text(s) => {
                if let Some(max) = self.max_length {
                    let len = s.chars().count();
                    if len > max {
                        return Err(CodecError::MaxLengthExceeded {
                            field: field.to_string(),
                            max,
                            actual: len,
                        });
                    }
                }
                if s.contains(SEPARATOR) || s.contains('\n') || s.contains('\r') {
                    return Err(CodecError::UnencodableText {
                        field: field.to_string(),
                    });
                }
            }
            Value::Null => {}
        }

        Ok(())
    }

    /// Checks that the specification itself is consistent.
    ///
    /// Called once when the schema is built: the default (if any) must
    /// pass validation, and bounds must match the kind.
    pub(crate) fn check(&self, field: &str) -> CodecResult<()> {
        if self.kind == FieldKind::Text && self.max_value.is_some() {
            return Err(CodecError::invalid_spec(
                field,
                "max_value applies to integer fields only",
            ));
        }

        if let Some(default) = &self.default {
            self.validate(field, default)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_is_always_valid() {
        assert!(FieldSpec::integer().validate("n", &Value::Null).is_ok());
        assert!(FieldSpec::text(3).validate("t", &Value::Null).is_ok());
    }

    #[test]
    fn kind_mismatch_is_rejected() {
        let spec = FieldSpec::integer();
        let err = spec.validate("age", &Value::from("thirty")).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }));
    }

    #[test]
    fn max_value_bound() {
        let spec = FieldSpec::integer().max_value(100);
        assert!(spec.validate("age", &Value::Integer(100)).is_ok());

        let err = spec.validate("age", &Value::Integer(101)).unwrap_err();
        assert_eq!(
            err,
            CodecError::MaxValueExceeded {
                field: "age".into(),
                max: 100,
                actual: 101,
            }
        );
    }

    #[test]
    fn max_length_bound() {
        let spec = FieldSpec::text(5);
        assert!(spec.validate("name", &Value::from("alice")).is_ok());

        let err = spec.validate("name", &Value::from("toolong")).unwrap_err();
        assert_eq!(
            err,
            CodecError::MaxLengthExceeded {
                field: "name".into(),
                max: 5,
                actual: 7,
            }
        );
    }

    #[test]
    fn separator_in_text_is_rejected() {
        let spec = FieldSpec::text(20);
        let err = spec.validate("name", &Value::from("a<-->b")).unwrap_err();
        assert!(matches!(err, CodecError::UnencodableText { .. }));

        let err = spec.validate("name", &Value::from("a\nb")).unwrap_err();
        assert!(matches!(err, CodecError::UnencodableText { .. }));
    }

    #[test]
    fn bad_default_fails_check() {
        let spec = FieldSpec::text(3).default_value("toolong");
        assert!(spec.check("name").is_err());

        let spec = FieldSpec::integer().default_value(0);
        assert!(spec.check("count").is_ok());
    }

    #[test]
    fn max_value_on_text_fails_check() {
        let spec = FieldSpec::text(3).max_value(10);
        assert!(matches!(
            spec.check("name"),
            Err(CodecError::InvalidSpec { .. })
        ));
    }
}
