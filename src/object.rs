//! Object-result transform: source tree → live target schema.

use crate::catalog::Primitive;
use crate::error::TransformError;
use crate::fold::{self, Rules};
use crate::source;
use crate::target::{Field, Schema};
use crate::value::{EnumValue, Literal};

/// Rule set producing `target::Schema` values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectRules;

impl Rules for ObjectRules {
    type Output = Schema;

    fn primitive(&self, p: Primitive) -> Schema {
        match p {
            Primitive::Never => Schema::Never,
            Primitive::Any => Schema::Any,
            Primitive::Unknown => Schema::Unknown,
            Primitive::Void => Schema::Void,
            Primitive::Undefined => Schema::Undefined,
            Primitive::Null => Schema::Null,
            Primitive::Symbol => Schema::Symbol,
            Primitive::Boolean => Schema::Boolean,
            Primitive::Nan => Schema::nan(),
            Primitive::Int => Schema::Int,
            Primitive::BigInt => Schema::BigInt,
            Primitive::Number => Schema::Number,
            Primitive::String => Schema::String,
            Primitive::Date => Schema::Date,
        }
    }

    fn literal(&self, values: &[Literal]) -> Schema { Schema::literal(values.iter().cloned()) }
    fn enumeration(&self, entries: &[(String, EnumValue)]) -> Schema { Schema::enums(entries.iter().cloned()) }

    fn array(&self, item: Schema) -> Schema { Schema::array(item) }
    fn optional(&self, inner: Schema) -> Schema { Schema::optional(inner) }
    fn non_optional(&self, inner: Schema) -> Schema { inner }
    fn readonly(&self, inner: Schema) -> Schema { inner }
    fn set(&self, item: Schema) -> Schema { Schema::set(item) }
    fn map(&self, key: Schema, value: Schema) -> Schema { Schema::map(key, value) }
    fn nullable(&self, inner: Schema) -> Schema { Schema::union([inner, Schema::Null]) }

    fn object(&self, fields: Vec<(&str, Schema)>) -> Schema {
        Schema::Struct(
            fields
                .into_iter()
                .map(|(name, schema)| Field { name: name.to_string(), schema })
                .collect(),
        )
    }

    fn tuple(&self, items: Vec<Schema>) -> Schema { Schema::Tuple(items) }
    fn union(&self, options: Vec<Schema>) -> Schema { Schema::Union(options) }
    fn intersection(&self, left: Schema, right: Schema) -> Schema { left.extend(right) }
    fn record(&self, key: Schema, value: Schema) -> Schema { Schema::record(key, value) }
}

/// Build the live target schema equivalent to `schema`.
pub fn to_object(schema: &source::Schema) -> Result<Schema, TransformError> {
    tracing::debug!(root = %schema.kind(), "object transform");
    fold::fold(&ObjectRules, schema)
}

// ------------------------------- Tests ------------------------------------ //
