//! Source schema tree.
//!
//! One `Schema` node per source-library schema. The variant is the kind tag,
//! so a node can only ever carry the payload its kind defines. Field lists
//! and enum entries are ordered `Vec`s; document order is what the caller
//! sees.
//!
//! The JSON form mirrors the source library's definitions: a `type` tag using
//! its kind names plus the payload fields, e.g.
//! `{"type": "array", "element": {"type": "string"}}`.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::value::{EnumValue, Literal};

// ------------------------------- Kind tag --------------------------------- //

/// Closed set of source kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Never,
    Any,
    Unknown,
    Void,
    Undefined,
    Null,
    Symbol,
    Boolean,
    Nan,
    Int,
    BigInt,
    Number,
    String,
    Date,
    Literal,
    Enum,
    Array,
    Optional,
    NonOptional,
    Readonly,
    Set,
    Map,
    Nullable,
    Object,
    Tuple,
    Union,
    Intersection,
    Record,
    Lazy,
    Prefault,
    Default,
    Catch,
    Custom,
    Success,
    Pipe,
    Promise,
    File,
    Transform,
    TemplateLiteral,
}

impl Kind {
    pub const ALL: [Kind; 39] = [
        Kind::Never, Kind::Any, Kind::Unknown, Kind::Void, Kind::Undefined,
        Kind::Null, Kind::Symbol, Kind::Boolean, Kind::Nan, Kind::Int,
        Kind::BigInt, Kind::Number, Kind::String, Kind::Date, Kind::Literal,
        Kind::Enum, Kind::Array, Kind::Optional, Kind::NonOptional, Kind::Readonly,
        Kind::Set, Kind::Map, Kind::Nullable, Kind::Object, Kind::Tuple,
        Kind::Union, Kind::Intersection, Kind::Record, Kind::Lazy, Kind::Prefault,
        Kind::Default, Kind::Catch, Kind::Custom, Kind::Success, Kind::Pipe,
        Kind::Promise, Kind::File, Kind::Transform, Kind::TemplateLiteral,
    ];

    /// The source library's own name for the kind (the JSON `type` tag).
    pub fn name(self) -> &'static str {
        match self {
            Kind::Never => "never",
            Kind::Any => "any",
            Kind::Unknown => "unknown",
            Kind::Void => "void",
            Kind::Undefined => "undefined",
            Kind::Null => "null",
            Kind::Symbol => "symbol",
            Kind::Boolean => "boolean",
            Kind::Nan => "nan",
            Kind::Int => "int",
            Kind::BigInt => "bigint",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Date => "date",
            Kind::Literal => "literal",
            Kind::Enum => "enum",
            Kind::Array => "array",
            Kind::Optional => "optional",
            Kind::NonOptional => "nonoptional",
            Kind::Readonly => "readonly",
            Kind::Set => "set",
            Kind::Map => "map",
            Kind::Nullable => "nullable",
            Kind::Object => "object",
            Kind::Tuple => "tuple",
            Kind::Union => "union",
            Kind::Intersection => "intersection",
            Kind::Record => "record",
            Kind::Lazy => "lazy",
            Kind::Prefault => "prefault",
            Kind::Default => "default",
            Kind::Catch => "catch",
            Kind::Custom => "custom",
            Kind::Success => "success",
            Kind::Pipe => "pipe",
            Kind::Promise => "promise",
            Kind::File => "file",
            Kind::Transform => "transform",
            Kind::TemplateLiteral => "template_literal",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ------------------------------- Schema tree ------------------------------ //

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum Schema {
    #[serde(deserialize_with = "no_payload")]
    Never,
    #[serde(deserialize_with = "no_payload")]
    Any,
    #[serde(deserialize_with = "no_payload")]
    Unknown,
    #[serde(deserialize_with = "no_payload")]
    Void,
    #[serde(deserialize_with = "no_payload")]
    Undefined,
    #[serde(deserialize_with = "no_payload")]
    Null,
    #[serde(deserialize_with = "no_payload")]
    Symbol,
    #[serde(deserialize_with = "no_payload")]
    Boolean,
    #[serde(deserialize_with = "no_payload")]
    Nan,
    #[serde(deserialize_with = "no_payload")]
    Int,
    #[serde(rename = "bigint", deserialize_with = "no_payload")]
    BigInt,
    #[serde(deserialize_with = "no_payload")]
    Number,
    #[serde(deserialize_with = "no_payload")]
    String,
    #[serde(deserialize_with = "no_payload")]
    Date,
    Literal { values: Vec<Literal> },
    Enum {
        #[serde(deserialize_with = "ordered_pairs")]
        entries: Vec<(String, EnumValue)>,
    },

    Array { element: Box<Schema> },
    Optional { inner: Box<Schema> },
    #[serde(rename = "nonoptional")]
    NonOptional { inner: Box<Schema> },
    Readonly { inner: Box<Schema> },
    Set { value: Box<Schema> },
    Map { key: Box<Schema>, value: Box<Schema> },
    Nullable { inner: Box<Schema> },
    Object {
        #[serde(deserialize_with = "ordered_fields")]
        shape: Vec<Field>,
    },
    Tuple { items: Vec<Schema> },
    Union { options: Vec<Schema> },
    Intersection { left: Box<Schema>, right: Box<Schema> },
    Record { key: Box<Schema>, value: Box<Schema> },

    /// Deferred self-reference; `getter` is what the thunk would return.
    Lazy { getter: Box<Schema> },
    Prefault { inner: Box<Schema>, default_value: serde_json::Value },
    Default { inner: Box<Schema>, default_value: serde_json::Value },
    Catch { inner: Box<Schema>, catch_value: serde_json::Value },
    /// Opaque user predicate.
    #[serde(deserialize_with = "no_payload")]
    Custom,
    Success { inner: Box<Schema> },
    Pipe { input: Box<Schema>, output: Box<Schema> },
    Promise { inner: Box<Schema> },
    #[serde(deserialize_with = "no_payload")]
    File,
    /// Opaque value-mapping function.
    #[serde(deserialize_with = "no_payload")]
    Transform,
    TemplateLiteral { parts: Vec<TemplatePart> },
}

/// One named property of an object schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TemplatePart {
    Schema(Box<Schema>),
    Literal(Literal),
}

impl Schema {
    pub fn kind(&self) -> Kind {
        match self {
            Schema::Never => Kind::Never,
            Schema::Any => Kind::Any,
            Schema::Unknown => Kind::Unknown,
            Schema::Void => Kind::Void,
            Schema::Undefined => Kind::Undefined,
            Schema::Null => Kind::Null,
            Schema::Symbol => Kind::Symbol,
            Schema::Boolean => Kind::Boolean,
            Schema::Nan => Kind::Nan,
            Schema::Int => Kind::Int,
            Schema::BigInt => Kind::BigInt,
            Schema::Number => Kind::Number,
            Schema::String => Kind::String,
            Schema::Date => Kind::Date,
            Schema::Literal { .. } => Kind::Literal,
            Schema::Enum { .. } => Kind::Enum,
            Schema::Array { .. } => Kind::Array,
            Schema::Optional { .. } => Kind::Optional,
            Schema::NonOptional { .. } => Kind::NonOptional,
            Schema::Readonly { .. } => Kind::Readonly,
            Schema::Set { .. } => Kind::Set,
            Schema::Map { .. } => Kind::Map,
            Schema::Nullable { .. } => Kind::Nullable,
            Schema::Object { .. } => Kind::Object,
            Schema::Tuple { .. } => Kind::Tuple,
            Schema::Union { .. } => Kind::Union,
            Schema::Intersection { .. } => Kind::Intersection,
            Schema::Record { .. } => Kind::Record,
            Schema::Lazy { .. } => Kind::Lazy,
            Schema::Prefault { .. } => Kind::Prefault,
            Schema::Default { .. } => Kind::Default,
            Schema::Catch { .. } => Kind::Catch,
            Schema::Custom => Kind::Custom,
            Schema::Success { .. } => Kind::Success,
            Schema::Pipe { .. } => Kind::Pipe,
            Schema::Promise { .. } => Kind::Promise,
            Schema::File => Kind::File,
            Schema::Transform => Kind::Transform,
            Schema::TemplateLiteral { .. } => Kind::TemplateLiteral,
        }
    }

    // -------- builders, named after the source library's constructors -------- //

    pub fn literal(values: impl IntoIterator<Item = Literal>) -> Self {
        Schema::Literal { values: values.into_iter().collect() }
    }
    pub fn enumeration<K: Into<String>>(entries: impl IntoIterator<Item = (K, EnumValue)>) -> Self {
        Schema::Enum { entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect() }
    }
    pub fn array(element: Schema) -> Self { Schema::Array { element: Box::new(element) } }
    pub fn optional(inner: Schema) -> Self { Schema::Optional { inner: Box::new(inner) } }
    pub fn non_optional(inner: Schema) -> Self { Schema::NonOptional { inner: Box::new(inner) } }
    pub fn readonly(inner: Schema) -> Self { Schema::Readonly { inner: Box::new(inner) } }
    pub fn set(value: Schema) -> Self { Schema::Set { value: Box::new(value) } }
    pub fn map(key: Schema, value: Schema) -> Self {
        Schema::Map { key: Box::new(key), value: Box::new(value) }
    }
    pub fn nullable(inner: Schema) -> Self { Schema::Nullable { inner: Box::new(inner) } }
    pub fn object<K: Into<String>>(shape: impl IntoIterator<Item = (K, Schema)>) -> Self {
        Schema::Object {
            shape: shape.into_iter().map(|(name, schema)| Field { name: name.into(), schema }).collect(),
        }
    }
    pub fn tuple(items: impl IntoIterator<Item = Schema>) -> Self {
        Schema::Tuple { items: items.into_iter().collect() }
    }
    pub fn union(options: impl IntoIterator<Item = Schema>) -> Self {
        Schema::Union { options: options.into_iter().collect() }
    }
    pub fn intersection(left: Schema, right: Schema) -> Self {
        Schema::Intersection { left: Box::new(left), right: Box::new(right) }
    }
    pub fn record(key: Schema, value: Schema) -> Self {
        Schema::Record { key: Box::new(key), value: Box::new(value) }
    }
}

// ------------------------------ JSON helpers ------------------------------ //

fn ordered_fields<'de, D>(d: D) -> Result<Vec<Field>, D::Error>
where
    D: Deserializer<'de>,
{
    let shape = IndexMap::<String, Schema>::deserialize(d)?;
    Ok(shape.into_iter().map(|(name, schema)| Field { name, schema }).collect())
}

/// Payload-free kinds carry nothing but their tag.
fn no_payload<'de, D: Deserializer<'de>>(d: D) -> Result<(), D::Error> {
    struct NoPayload;

    impl<'de> Visitor<'de> for NoPayload {
        type Value = ();

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("no fields besides `type`")
        }

        fn visit_unit<E: de::Error>(self) -> Result<(), E> {
            Ok(())
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<(), A::Error> {
            match map.next_key::<String>()? {
                Some(key) => Err(de::Error::unknown_field(&key, &["type"])),
                None => Ok(()),
            }
        }
    }

    d.deserialize_any(NoPayload)
}

fn ordered_pairs<'de, D, V>(d: D) -> Result<Vec<(String, V)>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    let entries = IndexMap::<String, V>::deserialize(d)?;
    Ok(entries.into_iter().collect())
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_names_are_unique() {
        let mut names: Vec<&str> = Kind::ALL.iter().map(|k| k.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Kind::ALL.len());
    }

    #[test]
    fn json_tag_matches_kind_name() {
        // every payload-free kind decodes from its bare tag
        for kind in Kind::ALL {
            let decoded = serde_json::from_value::<Schema>(json!({ "type": kind.name() }));
            if let Ok(schema) = decoded {
                assert_eq!(schema.kind(), kind);
            }
        }
        let s: Schema = serde_json::from_value(json!({"type": "nonoptional", "inner": {"type": "bigint"}})).unwrap();
        assert_eq!(s, Schema::non_optional(Schema::BigInt));
    }

    #[test]
    fn object_shape_keeps_document_order() {
        let s: Schema = serde_json::from_value(json!({
            "type": "object",
            "shape": {
                "zeta": {"type": "string"},
                "alpha": {"type": "number"},
                "mid": {"type": "optional", "inner": {"type": "int"}}
            }
        })).unwrap();
        let Schema::Object { shape } = &s else { panic!("expected object, got {s:?}") };
        let names: Vec<&str> = shape.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn enum_entries_keep_document_order() {
        let s: Schema = serde_json::from_value(json!({
            "type": "enum",
            "entries": {"b": "b", "a": 1}
        })).unwrap();
        assert_eq!(s, Schema::enumeration([
            ("b", EnumValue::String("b".into())),
            ("a", EnumValue::Number(1.0.into())),
        ]));
    }

    #[test]
    fn refused_kinds_still_decode() {
        let s: Schema = serde_json::from_value(json!({
            "type": "default",
            "inner": {"type": "string"},
            "default_value": "x"
        })).unwrap();
        assert_eq!(s.kind(), Kind::Default);

        let t: Schema = serde_json::from_value(json!({
            "type": "template_literal",
            "parts": ["id-", {"type": "int"}]
        })).unwrap();
        assert_eq!(t.kind(), Kind::TemplateLiteral);
    }

    #[test]
    fn unknown_tags_and_fields_are_rejected() {
        assert!(serde_json::from_value::<Schema>(json!({"type": "uuid"})).is_err());
        assert!(serde_json::from_value::<Schema>(json!({"type": "array", "items": {"type": "string"}})).is_err());
    }

    #[test]
    fn payload_free_kinds_reject_extra_fields() {
        for tag in ["string", "bigint", "never", "custom", "file", "transform"] {
            assert!(serde_json::from_value::<Schema>(json!({"type": tag})).is_ok(), "{tag}");
            let err = serde_json::from_value::<Schema>(json!({"type": tag, "inner": {"type": "int"}})).unwrap_err();
            assert!(err.to_string().contains("unknown field `inner`"), "{tag}: {err}");
        }
        let src = r#"{"type": "string", "element": {"type": "int"}}"#;
        assert!(serde_json::from_str::<Schema>(src).is_err());
    }
}
