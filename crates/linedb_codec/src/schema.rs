//! Schema definition and builder.

use crate::error::{CodecError, CodecResult};
use crate::field::FieldSpec;
use std::collections::BTreeMap;

/// Name of the implicit primary-key field present on every schema.
pub const ID_FIELD: &str = "id";

/// A named, immutable set of field specifications.
///
/// Every schema carries the implicit integer `id` field; the builder
/// injects it, and declaring it by hand is an error. The on-disk column
/// order is the alphabetically sorted list of field names (including
/// `id`), computed once at build time - it is derivable purely from the
/// schema, so no per-line header is ever stored.
///
/// Schemas are built explicitly through [`Schema::builder`]; there is no
/// registration hook or other hidden side effect on type declaration.
///
/// # Example
///
/// ```
/// use linedb_codec::{FieldSpec, Schema};
///
/// let schema = Schema::builder("user")
///     .field("username", FieldSpec::text(50).required())
///     .field("age", FieldSpec::integer().max_value(150))
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.field_order(), ["age", "id", "username"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    name: String,
    fields: BTreeMap<String, FieldSpec>,
    order: Vec<String>,
}

impl Schema {
    /// Starts building a schema with the given record-type name.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Returns the record-type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the specification for a field, if declared.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    /// Returns true if the schema declares a field with this name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns the cached alphabetical field order, including `id`.
    #[must_use]
    pub fn field_order(&self) -> &[String] {
        &self.order
    }

    /// Returns the number of declared fields, including `id`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the schema has no fields besides `id`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.len() <= 1
    }

    /// Iterates over `(name, spec)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.order
            .iter()
            .filter_map(|name| self.fields.get(name).map(|spec| (name.as_str(), spec)))
    }
}

/// Builder for [`Schema`].
///
/// Collects field declarations and validates the whole set in
/// [`SchemaBuilder::build`].
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<(String, FieldSpec)>,
}

impl SchemaBuilder {
    /// Declares a field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.push((name.into(), spec));
        self
    }

    /// Validates the declarations and builds the schema.
    ///
    /// The implicit integer `id` field is injected here.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A field name is declared twice (`DuplicateField`)
    /// - A field is named `id` (`ReservedField`)
    /// - A spec is inconsistent or its default fails validation
    ///   (`InvalidSpec`, or the default's validation error)
    pub fn build(self) -> CodecResult<Schema> {
        let mut fields = BTreeMap::new();
        fields.insert(ID_FIELD.to_string(), FieldSpec::integer().required());

        for (name, spec) in self.fields {
            if name == ID_FIELD {
                return Err(CodecError::ReservedField { field: name });
            }
            spec.check(&name)?;
            if fields.insert(name.clone(), spec).is_some() {
                return Err(CodecError::DuplicateField { field: name });
            }
        }

        // BTreeMap iteration gives the alphabetical column order; cache it
        // once so encode/decode never re-derive it.
        let order: Vec<String> = fields.keys().cloned().collect();

        Ok(Schema {
            name: self.name,
            fields,
            order,
        })
    }
}
