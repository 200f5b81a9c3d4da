//! Source-text transform: source tree → target constructor-call text.
//!
//! Output is compact single-line text with `", "` between arguments. Layout
//! is left to whatever formatter the caller runs afterwards.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::Primitive;
use crate::error::TransformError;
use crate::fold::{self, Rules};
use crate::source;
use crate::value::{self, EnumValue, Literal};

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern is valid")
});

/// Rule set producing constructor-call strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRules;

impl Rules for TextRules {
    type Output = String;

    fn primitive(&self, p: Primitive) -> String {
        let text = match p {
            Primitive::Never => "Schema.Never",
            Primitive::Any => "Schema.Any",
            Primitive::Unknown => "Schema.Unknown",
            Primitive::Void => "Schema.Void",
            Primitive::Undefined => "Schema.Undefined",
            Primitive::Null => "Schema.Null",
            Primitive::Symbol => "Schema.Symbol",
            Primitive::Boolean => "Schema.Boolean",
            Primitive::Nan => "Schema.Literal(NaN)",
            Primitive::Int => "Schema.Int",
            Primitive::BigInt => "Schema.BigInt",
            Primitive::Number => "Schema.Number",
            Primitive::String => "Schema.String",
            Primitive::Date => "Schema.Date",
        };
        text.to_string()
    }

    fn literal(&self, values: &[Literal]) -> String {
        let args: Vec<String> = values.iter().map(Literal::to_string).collect();
        format!("Schema.Literal({})", args.join(", "))
    }

    fn enumeration(&self, entries: &[(String, EnumValue)]) -> String {
        let props: Vec<String> = entries.iter().map(|(k, v)| format!("{}: {v}", property_key(k))).collect();
        format!("Schema.Enums({})", braces(&props))
    }

    fn array(&self, item: String) -> String { format!("Schema.Array({item})") }
    fn optional(&self, inner: String) -> String { format!("Schema.optional({inner})") }
    fn non_optional(&self, inner: String) -> String { inner }
    fn readonly(&self, inner: String) -> String { inner }
    fn set(&self, item: String) -> String { format!("Schema.Set({item})") }
    fn map(&self, key: String, value: String) -> String { format!("Schema.Map({{ key: {key}, value: {value} }})") }
    fn nullable(&self, inner: String) -> String { format!("Schema.Union({inner}, Schema.Null)") }

    fn object(&self, fields: Vec<(&str, String)>) -> String {
        let props: Vec<String> = fields.iter().map(|(k, v)| format!("{}: {v}", property_key(k))).collect();
        format!("Schema.Struct({})", braces(&props))
    }

    fn tuple(&self, items: Vec<String>) -> String { format!("Schema.Tuple({})", items.join(", ")) }
    fn union(&self, options: Vec<String>) -> String { format!("Schema.Union({})", options.join(", ")) }
    fn intersection(&self, left: String, right: String) -> String { format!("{left}.pipe(Schema.extend({right}))") }
    fn record(&self, key: String, value: String) -> String { format!("Schema.Record({{ key: {key}, value: {value} }})") }
}

/// Render the target constructor-call text equivalent to `schema`.
pub fn to_text(schema: &source::Schema) -> Result<String, TransformError> {
    tracing::debug!(root = %schema.kind(), "text transform");
    fold::fold(&TextRules, schema)
}

/// Bare when it is an identifier, quoted otherwise. `__proto__` is written as
/// a computed key; in literal position it would set the prototype instead.
fn property_key(name: &str) -> String {
    if name == "__proto__" {
        format!("[{}]", value::quote(name))
    } else if IDENTIFIER.is_match(name) {
        name.to_string()
    } else {
        value::quote(name)
    }
}

fn braces(props: &[String]) -> String {
    if props.is_empty() { "{}".to_string() } else { format!("{{ {} }}", props.join(", ")) }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Kind, Schema as Src};
    use pretty_assertions::assert_eq;

    #[test]
    fn nullary_kinds_render_fixed_text() {
        let table = [
            (Src::Never, "Schema.Never"),
            (Src::Any, "Schema.Any"),
            (Src::Unknown, "Schema.Unknown"),
            (Src::Void, "Schema.Void"),
            (Src::Undefined, "Schema.Undefined"),
            (Src::Null, "Schema.Null"),
            (Src::Symbol, "Schema.Symbol"),
            (Src::Boolean, "Schema.Boolean"),
            (Src::Nan, "Schema.Literal(NaN)"),
            (Src::Int, "Schema.Int"),
            (Src::BigInt, "Schema.BigInt"),
            (Src::Number, "Schema.Number"),
            (Src::String, "Schema.String"),
            (Src::Date, "Schema.Date"),
        ];
        for (src, want) in table {
            assert_eq!(to_text(&src).unwrap(), want);
        }
    }

    #[test]
    fn literals_and_enums() {
        let lit = Src::literal([Literal::number(1.0), Literal::number(2.0), Literal::number(3.0)]);
        assert_eq!(to_text(&lit).unwrap(), "Schema.Literal(1, 2, 3)");

        let lit = Src::literal([Literal::string("on"), Literal::BigInt("9".into()), Literal::Null]);
        assert_eq!(to_text(&lit).unwrap(), r#"Schema.Literal("on", 9n, null)"#);

        let padded: Src = serde_json::from_value(serde_json::json!(
            {"type": "literal", "values": [{"bigint": "007"}, {"bigint": "-0"}]}
        )).unwrap();
        assert_eq!(to_text(&padded).unwrap(), "Schema.Literal(7n, 0n)");

        let en = Src::enumeration([
            ("Red", EnumValue::String("red".into())),
            ("two words", EnumValue::Number(2.0.into())),
        ]);
        assert_eq!(to_text(&en).unwrap(), r#"Schema.Enums({ Red: "red", "two words": 2 })"#);
    }

    #[test]
    fn arrays_nest_recursively() {
        let src = Src::array(Src::array(Src::array(Src::Boolean)));
        assert_eq!(to_text(&src).unwrap(), "Schema.Array(Schema.Array(Schema.Array(Schema.Boolean)))");
    }

    #[test]
    fn objects_keep_insertion_order() {
        assert_eq!(to_text(&Src::object(Vec::<(String, Src)>::new())).unwrap(), "Schema.Struct({})");
        let src = Src::object([("b", Src::String), ("a", Src::Number)]);
        assert_eq!(to_text(&src).unwrap(), "Schema.Struct({ b: Schema.String, a: Schema.Number })");
    }

    #[test]
    fn non_identifier_keys_are_quoted() {
        let src = Src::object([("kebab-case", Src::String), ("$ok_1", Src::Int), ("1st", Src::Date)]);
        assert_eq!(
            to_text(&src).unwrap(),
            r#"Schema.Struct({ "kebab-case": Schema.String, $ok_1: Schema.Int, "1st": Schema.Date })"#,
        );
    }

    #[test]
    fn proto_key_is_computed() {
        let src = Src::object([("__proto__", Src::String), ("__proto", Src::Int)]);
        let text = to_text(&src).unwrap();
        assert_eq!(text, r#"Schema.Struct({ ["__proto__"]: Schema.String, __proto: Schema.Int })"#);
        assert_eq!(crate::target::parse(&text).unwrap(), crate::to_object(&src).unwrap());
    }

    #[test]
    fn wrappers() {
        assert_eq!(to_text(&Src::optional(Src::Int)).unwrap(), "Schema.optional(Schema.Int)");
        assert_eq!(to_text(&Src::non_optional(Src::Int)).unwrap(), "Schema.Int");
        assert_eq!(to_text(&Src::readonly(Src::array(Src::Int))).unwrap(), "Schema.Array(Schema.Int)");
        assert_eq!(to_text(&Src::nullable(Src::String)).unwrap(), "Schema.Union(Schema.String, Schema.Null)");
        assert_eq!(to_text(&Src::set(Src::Symbol)).unwrap(), "Schema.Set(Schema.Symbol)");
    }

    #[test]
    fn keyed_collections() {
        assert_eq!(
            to_text(&Src::map(Src::Date, Src::Any)).unwrap(),
            "Schema.Map({ key: Schema.Date, value: Schema.Any })",
        );
        assert_eq!(
            to_text(&Src::record(Src::String, Src::Void)).unwrap(),
            "Schema.Record({ key: Schema.String, value: Schema.Void })",
        );
    }

    #[test]
    fn tuples_unions_and_intersections_keep_order() {
        assert_eq!(
            to_text(&Src::tuple([Src::String, Src::Number])).unwrap(),
            "Schema.Tuple(Schema.String, Schema.Number)",
        );
        assert_eq!(
            to_text(&Src::union([Src::Number, Src::String])).unwrap(),
            "Schema.Union(Schema.Number, Schema.String)",
        );
        let src = Src::intersection(Src::object([("l", Src::String)]), Src::object([("r", Src::Int)]));
        assert_eq!(
            to_text(&src).unwrap(),
            "Schema.Struct({ l: Schema.String }).pipe(Schema.extend(Schema.Struct({ r: Schema.Int })))",
        );
    }

    #[test]
    fn refusal_names_the_kind() {
        let src = Src::tuple([Src::String, Src::TemplateLiteral { parts: Vec::new() }]);
        let err = to_text(&src).unwrap_err();
        assert_eq!(err.kind(), Kind::TemplateLiteral);
        assert_eq!(err.to_string(), "Unsupported schema: template_literal");
    }
}
