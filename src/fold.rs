//! Bottom-up fold over a source schema tree.
//!
//! `fold` is the only recursion in the crate. It projects a node into its
//! layer (refusing unsupported kinds), folds every child left to right, then
//! hands the finished layer to one method of a `Rules` implementation. Rules
//! therefore only ever see transformed children.
//!
//! Recursion depth equals tree depth. Owned trees cannot be cyclic, and the
//! deferred self-reference kind is refused before it would be expanded, so
//! the only resource limit is the thread's stack on very deep inputs.

use crate::catalog::{self, Layer, Primitive};
use crate::error::TransformError;
use crate::source::Schema;
use crate::value::{EnumValue, Literal};

/// One combining rule per supported kind.
///
/// Every method is required: a kind one rule set handles and another does
/// not is a compile error, not a runtime gap.
pub trait Rules {
    type Output;

    fn primitive(&self, p: Primitive) -> Self::Output;
    fn literal(&self, values: &[Literal]) -> Self::Output;
    fn enumeration(&self, entries: &[(String, EnumValue)]) -> Self::Output;

    fn array(&self, item: Self::Output) -> Self::Output;
    fn optional(&self, inner: Self::Output) -> Self::Output;
    fn non_optional(&self, inner: Self::Output) -> Self::Output;
    fn readonly(&self, inner: Self::Output) -> Self::Output;
    fn set(&self, item: Self::Output) -> Self::Output;
    fn map(&self, key: Self::Output, value: Self::Output) -> Self::Output;
    fn nullable(&self, inner: Self::Output) -> Self::Output;
    fn object(&self, fields: Vec<(&str, Self::Output)>) -> Self::Output;
    fn tuple(&self, items: Vec<Self::Output>) -> Self::Output;
    fn union(&self, options: Vec<Self::Output>) -> Self::Output;
    fn intersection(&self, left: Self::Output, right: Self::Output) -> Self::Output;
    fn record(&self, key: Self::Output, value: Self::Output) -> Self::Output;
}

/// Fold `node` with `rules`, post-order. The first refused node aborts the
/// whole fold.
pub fn fold<R>(rules: &R, node: &Schema) -> Result<R::Output, TransformError>
where
    R: Rules + ?Sized,
{
    tracing::trace!(kind = %node.kind(), "fold");
    let layer = catalog::project(node)?.try_map(|child| fold(rules, child))?;
    Ok(combine(rules, layer))
}

fn combine<R>(rules: &R, layer: Layer<'_, R::Output>) -> R::Output
where
    R: Rules + ?Sized,
{
    match layer {
        Layer::Primitive(p) => rules.primitive(p),
        Layer::Literal(values) => rules.literal(values),
        Layer::Enum(entries) => rules.enumeration(entries),
        Layer::Array(item) => rules.array(item),
        Layer::Optional(inner) => rules.optional(inner),
        Layer::NonOptional(inner) => rules.non_optional(inner),
        Layer::Readonly(inner) => rules.readonly(inner),
        Layer::Set(item) => rules.set(item),
        Layer::Map { key, value } => rules.map(key, value),
        Layer::Nullable(inner) => rules.nullable(inner),
        Layer::Object(fields) => rules.object(fields),
        Layer::Tuple(items) => rules.tuple(items),
        Layer::Union(options) => rules.union(options),
        Layer::Intersection { left, right } => rules.intersection(left, right),
        Layer::Record { key, value } => rules.record(key, value),
    }
}

// ------------------------------- Tests ------------------------------------ //
