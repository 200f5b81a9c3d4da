//! Target schema model.
//!
//! Live values of the target schema library. Constructors are named after the
//! library's own (`Schema.Array`, `Schema.Struct`, `.pipe(Schema.extend(..))`)
//! so the object transform reads the same as the text it is paired with.
pub mod parse;

use crate::value::{EnumValue, Literal};

pub use parse::parse;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Schema {
    Never,
    Any,
    Unknown,
    Void,
    Undefined,
    Null,
    Symbol,
    Boolean,
    Int,
    BigInt,
    Number,
    String,
    Date,
    Literal(Vec<Literal>),
    Enums(Vec<(String, EnumValue)>),
    Array(Box<Schema>),
    /// Optional property marker around an otherwise unchanged schema.
    Optional(Box<Schema>),
    Set(Box<Schema>),
    Map { key: Box<Schema>, value: Box<Schema> },
    Union(Vec<Schema>),
    Struct(Vec<Field>),
    Tuple(Vec<Schema>),
    Record { key: Box<Schema>, value: Box<Schema> },
    /// `base.pipe(Schema.extend(extension))`
    Extend { base: Box<Schema>, extension: Box<Schema> },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
}

impl Schema {
    /// `Schema.Literal(NaN)`: the single-valued type holding NaN.
    pub fn nan() -> Self { Schema::Literal(vec![Literal::nan()]) }

    pub fn literal(values: impl IntoIterator<Item = Literal>) -> Self {
        Schema::Literal(values.into_iter().collect())
    }
    pub fn enums(entries: impl IntoIterator<Item = (String, EnumValue)>) -> Self {
        Schema::Enums(entries.into_iter().collect())
    }
    pub fn array(item: Schema) -> Self { Schema::Array(Box::new(item)) }
    pub fn optional(inner: Schema) -> Self { Schema::Optional(Box::new(inner)) }
    pub fn set(item: Schema) -> Self { Schema::Set(Box::new(item)) }
    pub fn map(key: Schema, value: Schema) -> Self {
        Schema::Map { key: Box::new(key), value: Box::new(value) }
    }
    pub fn union(members: impl IntoIterator<Item = Schema>) -> Self {
        Schema::Union(members.into_iter().collect())
    }
    pub fn structure<K: Into<String>>(fields: impl IntoIterator<Item = (K, Schema)>) -> Self {
        Schema::Struct(
            fields.into_iter().map(|(name, schema)| Field { name: name.into(), schema }).collect(),
        )
    }
    pub fn tuple(elements: impl IntoIterator<Item = Schema>) -> Self {
        Schema::Tuple(elements.into_iter().collect())
    }
    pub fn record(key: Schema, value: Schema) -> Self {
        Schema::Record { key: Box::new(key), value: Box::new(value) }
    }

    /// `self.pipe(Schema.extend(extension))`
    pub fn extend(self, extension: Schema) -> Self {
        Schema::Extend { base: Box::new(self), extension: Box::new(extension) }
    }

    /// Property list of a struct, with extensions flattened base-first.
    /// `None` when some part of the chain is not a struct.
    pub fn fields(&self) -> Option<Vec<&Field>> {
        match self {
            Schema::Struct(fields) => Some(fields.iter().collect()),
            Schema::Extend { base, extension } => {
                let mut out = base.fields()?;
                out.extend(extension.fields()?);
                Some(out)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_flattens_base_first() {
        let s = Schema::structure([("a", Schema::String)])
            .extend(Schema::structure([("b", Schema::Number), ("c", Schema::Date)]));
        let names: Vec<&str> = s.fields().unwrap().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn extend_over_non_struct_has_no_field_list() {
        let s = Schema::structure([("a", Schema::String)]).extend(Schema::Number);
        assert!(s.fields().is_none());
        assert!(Schema::Any.fields().is_none());
    }

    #[test]
    fn nan_literals_compare_structurally() {
        assert_eq!(Schema::nan(), Schema::literal([Literal::nan()]));
        assert_ne!(Schema::nan(), Schema::Number);
    }
}
