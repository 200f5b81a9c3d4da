//! Kind catalog.
//!
//! Partitions the source kinds into three buckets and projects one node into
//! a `Layer`: the node's own payload with its children left as references.
//! Unsupported kinds are refused here, before any child is visited.

use crate::error::TransformError;
use crate::source::{Kind, Schema};
use crate::value::{EnumValue, Literal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// No child schemas.
    Nullary,
    /// Built from one or more child schemas.
    Structural,
    /// No semantics-preserving mapping; both transforms refuse these.
    Unsupported,
}

impl Kind {
    pub fn bucket(self) -> Bucket {
        match self {
            Kind::Never | Kind::Any | Kind::Unknown | Kind::Void | Kind::Undefined
            | Kind::Null | Kind::Symbol | Kind::Boolean | Kind::Nan | Kind::Int
            | Kind::BigInt | Kind::Number | Kind::String | Kind::Date
            | Kind::Literal | Kind::Enum => Bucket::Nullary,

            Kind::Array | Kind::Optional | Kind::NonOptional | Kind::Readonly
            | Kind::Set | Kind::Map | Kind::Nullable | Kind::Object | Kind::Tuple
            | Kind::Union | Kind::Intersection | Kind::Record => Bucket::Structural,

            Kind::Lazy | Kind::Prefault | Kind::Default | Kind::Catch | Kind::Custom
            | Kind::Success | Kind::Pipe | Kind::Promise | Kind::File
            | Kind::Transform | Kind::TemplateLiteral => Bucket::Unsupported,
        }
    }
}

/// Payload-free leaf kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
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
}

/// One level of a supported schema node. `A` stands in for each child: a
/// `&Schema` before folding, a rule-set output after.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer<'a, A> {
    Primitive(Primitive),
    Literal(&'a [Literal]),
    Enum(&'a [(String, EnumValue)]),
    Array(A),
    Optional(A),
    NonOptional(A),
    Readonly(A),
    Set(A),
    Map { key: A, value: A },
    Nullable(A),
    Object(Vec<(&'a str, A)>),
    Tuple(Vec<A>),
    Union(Vec<A>),
    Intersection { left: A, right: A },
    Record { key: A, value: A },
}

/// Split `node` into its layer, or refuse it.
pub fn project(node: &Schema) -> Result<Layer<'_, &Schema>, TransformError> {
    let layer = match node {
        Schema::Never => Layer::Primitive(Primitive::Never),
        Schema::Any => Layer::Primitive(Primitive::Any),
        Schema::Unknown => Layer::Primitive(Primitive::Unknown),
        Schema::Void => Layer::Primitive(Primitive::Void),
        Schema::Undefined => Layer::Primitive(Primitive::Undefined),
        Schema::Null => Layer::Primitive(Primitive::Null),
        Schema::Symbol => Layer::Primitive(Primitive::Symbol),
        Schema::Boolean => Layer::Primitive(Primitive::Boolean),
        Schema::Nan => Layer::Primitive(Primitive::Nan),
        Schema::Int => Layer::Primitive(Primitive::Int),
        Schema::BigInt => Layer::Primitive(Primitive::BigInt),
        Schema::Number => Layer::Primitive(Primitive::Number),
        Schema::String => Layer::Primitive(Primitive::String),
        Schema::Date => Layer::Primitive(Primitive::Date),
        Schema::Literal { values } => Layer::Literal(values),
        Schema::Enum { entries } => Layer::Enum(entries),

        Schema::Array { element } => Layer::Array(&**element),
        Schema::Optional { inner } => Layer::Optional(&**inner),
        Schema::NonOptional { inner } => Layer::NonOptional(&**inner),
        Schema::Readonly { inner } => Layer::Readonly(&**inner),
        Schema::Set { value } => Layer::Set(&**value),
        Schema::Map { key, value } => Layer::Map { key: &**key, value: &**value },
        Schema::Nullable { inner } => Layer::Nullable(&**inner),
        Schema::Object { shape } => {
            Layer::Object(shape.iter().map(|f| (f.name.as_str(), &f.schema)).collect())
        }
        Schema::Tuple { items } => Layer::Tuple(items.iter().collect()),
        Schema::Union { options } => Layer::Union(options.iter().collect()),
        Schema::Intersection { left, right } => Layer::Intersection { left: &**left, right: &**right },
        Schema::Record { key, value } => Layer::Record { key: &**key, value: &**value },

        Schema::Lazy { .. }
        | Schema::Prefault { .. }
        | Schema::Default { .. }
        | Schema::Catch { .. }
        | Schema::Custom
        | Schema::Success { .. }
        | Schema::Pipe { .. }
        | Schema::Promise { .. }
        | Schema::File
        | Schema::Transform
        | Schema::TemplateLiteral { .. } => {
            let kind = node.kind();
            tracing::debug!(%kind, "refusing schema kind with no target mapping");
            return Err(TransformError::UnsupportedSchemaKind { kind });
        }
    };
    Ok(layer)
}

impl<'a, A> Layer<'a, A> {
    /// Replace every child, left to right, stopping at the first error.
    pub fn try_map<B, E>(self, mut f: impl FnMut(A) -> Result<B, E>) -> Result<Layer<'a, B>, E> {
        Ok(match self {
            Layer::Primitive(p) => Layer::Primitive(p),
            Layer::Literal(values) => Layer::Literal(values),
            Layer::Enum(entries) => Layer::Enum(entries),
            Layer::Array(a) => Layer::Array(f(a)?),
            Layer::Optional(a) => Layer::Optional(f(a)?),
            Layer::NonOptional(a) => Layer::NonOptional(f(a)?),
            Layer::Readonly(a) => Layer::Readonly(f(a)?),
            Layer::Set(a) => Layer::Set(f(a)?),
            Layer::Map { key, value } => Layer::Map { key: f(key)?, value: f(value)? },
            Layer::Nullable(a) => Layer::Nullable(f(a)?),
            Layer::Object(fields) => Layer::Object(
                fields
                    .into_iter()
                    .map(|(name, a)| f(a).map(|b| (name, b)))
                    .collect::<Result<_, E>>()?,
            ),
            Layer::Tuple(items) => Layer::Tuple(items.into_iter().map(&mut f).collect::<Result<_, E>>()?),
            Layer::Union(options) => Layer::Union(options.into_iter().map(&mut f).collect::<Result<_, E>>()?),
            Layer::Intersection { left, right } => Layer::Intersection { left: f(left)?, right: f(right)? },
            Layer::Record { key, value } => Layer::Record { key: f(key)?, value: f(value)? },
        })
    }
}

impl Primitive {
    pub fn kind(self) -> Kind {
        match self {
            Primitive::Never => Kind::Never,
            Primitive::Any => Kind::Any,
            Primitive::Unknown => Kind::Unknown,
            Primitive::Void => Kind::Void,
            Primitive::Undefined => Kind::Undefined,
            Primitive::Null => Kind::Null,
            Primitive::Symbol => Kind::Symbol,
            Primitive::Boolean => Kind::Boolean,
            Primitive::Nan => Kind::Nan,
            Primitive::Int => Kind::Int,
            Primitive::BigInt => Kind::BigInt,
            Primitive::Number => Kind::Number,
            Primitive::String => Kind::String,
            Primitive::Date => Kind::Date,
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
