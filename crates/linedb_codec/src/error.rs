//! Error types for the codec crate.

use crate::field::FieldKind;
use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during validation, encoding, or decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A value does not match the field's declared kind.
    #[error("field `{field}`: expected {expected} value, got {actual}")]
    TypeMismatch {
        /// The field being assigned.
        field: String,
        /// The declared kind.
        expected: FieldKind,
        /// The kind of the rejected value.
        actual: FieldKind,
    },

    /// A text value exceeds the field's maximum length.
    #[error("field `{field}`: value of {actual} characters exceeds max length {max}")]
    MaxLengthExceeded {
        /// The field being assigned.
        field: String,
        /// The declared maximum length.
        max: usize,
        /// The length of the rejected value.
        actual: usize,
    },

    /// An integer value exceeds the field's maximum value.
    #[error("field `{field}`: value {actual} exceeds max value {max}")]
    MaxValueExceeded {
        /// The field being assigned.
        field: String,
        /// The declared maximum value.
        max: i64,
        /// The rejected value.
        actual: i64,
    },

    /// A text value cannot be represented in the line format.
    #[error("field `{field}`: value contains the field separator or a line break")]
    UnencodableText {
        /// The field being assigned.
        field: String,
    },

    /// The schema declares no field with this name.
    #[error("unknown field `{field}`")]
    UnknownField {
        /// The unknown field name.
        field: String,
    },

    /// A required field holds no value at encode time.
    #[error("required field `{field}` is not set")]
    RequiredMissing {
        /// The missing field name.
        field: String,
    },

    /// An already-assigned record id cannot be changed.
    #[error("record id {current} is already assigned and cannot be changed")]
    IdReassigned {
        /// The currently assigned id.
        current: i64,
    },

    /// A line's token count does not match the schema's field count.
    ///
    /// This signals drift between the schema and a previously persisted
    /// file; it is never papered over with defaults.
    #[error("schema drift: line has {actual} fields, schema declares {expected}")]
    SchemaDrift {
        /// The schema's field count.
        expected: usize,
        /// The line's token count.
        actual: usize,
    },

    /// A token could not be parsed as the field's integer kind.
    #[error("field `{field}`: `{token}` is not a valid integer")]
    InvalidInteger {
        /// The field being decoded.
        field: String,
        /// The offending token.
        token: String,
    },

    /// Two fields with the same name were declared.
    #[error("duplicate field `{field}`")]
    DuplicateField {
        /// The duplicated field name.
        field: String,
    },

    /// The field name is reserved for internal use.
    #[error("field name `{field}` is reserved")]
    ReservedField {
        /// The reserved field name.
        field: String,
    },

    /// A field specification is internally inconsistent.
    #[error("invalid spec for field `{field}`: {reason}")]
    InvalidSpec {
        /// The field with the bad spec.
        field: String,
        /// Why the spec was rejected.
        reason: String,
    },
}

impl CodecError {
    /// Creates an unknown-field error.
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    /// Creates an invalid-spec error.
    pub fn invalid_spec(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this error is a validation failure (as opposed to a
    /// format or schema-building failure).
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::TypeMismatch { .. }
                | Self::MaxLengthExceeded { .. }
                | Self::MaxValueExceeded { .. }
                | Self::UnencodableText { .. }
                | Self::RequiredMissing { .. }
                | Self::IdReassigned { .. }
        )
    }
}
