//! Primitive values that appear inside schema descriptions (literal members,
//! enum entries), shared by the source tree and the target model.
//!
//! `Display` renders each value the way it is written in target constructor
//! syntax, so `Schema.Literal(...)` and `Schema.Enums(...)` text can splice
//! them in directly.

use std::fmt;

use ordered_float::OrderedFloat;
use serde::Deserialize;
use serde_json::Value;

/// One member of a literal schema.
///
/// Numbers use `OrderedFloat` so that a NaN literal is structurally equal to
/// another NaN literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum Literal {
    String(String),
    Number(OrderedFloat<f64>),
    /// Decimal digits, optionally signed.
    BigInt(String),
    Boolean(bool),
    Null,
    Undefined,
}

/// Value side of one enum entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum EnumValue {
    String(String),
    Number(OrderedFloat<f64>),
}

impl Literal {
    pub fn number(n: f64) -> Self { Literal::Number(OrderedFloat(n)) }
    pub fn string(s: impl Into<String>) -> Self { Literal::String(s.into()) }
    pub fn nan() -> Self { Literal::Number(OrderedFloat(f64::NAN)) }
}

// ------------------------------ JSON decoding ------------------------------ //

impl TryFrom<Value> for Literal {
    type Error = String;

    /// `null`, booleans, numbers and strings map directly. Values JSON cannot
    /// spell are wrapped: `{"bigint": "123"}` and `{"undefined": true}`.
    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v {
            Value::Null => Ok(Literal::Null),
            Value::Bool(b) => Ok(Literal::Boolean(b)),
            Value::Number(n) => n
                .as_f64()
                .map(Literal::number)
                .ok_or_else(|| format!("number {n} is not representable as f64")),
            Value::String(s) => Ok(Literal::String(s)),
            Value::Object(map) if map.len() == 1 => {
                let (key, inner) = map.into_iter().next().ok_or("empty literal object")?;
                match (key.as_str(), inner) {
                    ("bigint", Value::String(s)) => parse_bigint(&s),
                    ("bigint", Value::Number(n)) if n.is_i64() || n.is_u64() => Ok(Literal::BigInt(n.to_string())),
                    ("undefined", Value::Bool(true)) => Ok(Literal::Undefined),
                    ("undefined", other) => Err(format!("`undefined` wrapper takes `true`, got {other}")),
                    (other, _) => Err(format!("unknown literal wrapper `{other}` (expected `bigint` or `undefined`)")),
                }
            }
            other => Err(format!("unsupported literal value: {other}")),
        }
    }
}

impl TryFrom<Value> for EnumValue {
    type Error = String;

    fn try_from(v: Value) -> Result<Self, Self::Error> {
        match v {
            Value::String(s) => Ok(EnumValue::String(s)),
            Value::Number(n) => n
                .as_f64()
                .map(|f| EnumValue::Number(OrderedFloat(f)))
                .ok_or_else(|| format!("number {n} is not representable as f64")),
            other => Err(format!("enum values must be strings or numbers, got {other}")),
        }
    }
}

/// Validates and canonicalizes decimal bigint digits: no leading zeros and no
/// negative zero, since `007n` is not valid JS.
pub(crate) fn parse_bigint(s: &str) -> Result<Literal, String> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Ok(Literal::BigInt(canonical_bigint(s)))
    } else {
        Err(format!("invalid bigint literal `{s}`"))
    }
}

fn canonical_bigint(s: &str) -> String {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    match digits.trim_start_matches('0') {
        "" => "0".to_string(),
        trimmed if negative => format!("-{trimmed}"),
        trimmed => trimmed.to_string(),
    }
}

// ------------------------------ JS rendering ------------------------------- //

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => f.write_str(&quote(s)),
            Literal::Number(n) => f.write_str(&js_number(n.0)),
            Literal::BigInt(digits) => write!(f, "{}n", canonical_bigint(digits)),
            Literal::Boolean(b) => write!(f, "{b}"),
            Literal::Null => f.write_str("null"),
            Literal::Undefined => f.write_str("undefined"),
        }
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumValue::String(s) => f.write_str(&quote(s)),
            EnumValue::Number(n) => f.write_str(&js_number(n.0)),
        }
    }
}

/// Number in JavaScript source syntax.
pub fn js_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
    } else if n == 0.0 {
        // -0 prints as 0 in JS
        "0".to_string()
    } else {
        // f64's Display already drops a trailing `.0`
        format!("{n}")
    }
}

/// Double-quoted string literal; `target::parse` reads it back.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{2028}' || c == '\u{2029}' => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn js_numbers_follow_js_spelling() {
        assert_eq!(js_number(1.0), "1");
        assert_eq!(js_number(-2.5), "-2.5");
        assert_eq!(js_number(-0.0), "0");
        assert_eq!(js_number(f64::NAN), "NaN");
        assert_eq!(js_number(f64::INFINITY), "Infinity");
        assert_eq!(js_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn strings_are_escaped() {
        assert_eq!(quote("plain"), r#""plain""#);
        assert_eq!(quote("a\"b\\c\nd"), r#""a\"b\\c\nd""#);
        assert_eq!(quote("\u{1}"), r#""\u0001""#);
    }

    #[test]
    fn literals_decode_from_json() {
        let lits: Vec<Literal> = serde_json::from_value(json!([
            1, "x", true, null, {"bigint": "-12"}, {"bigint": 7}, {"undefined": true}
        ])).unwrap();
        assert_eq!(lits, vec![
            Literal::number(1.0),
            Literal::string("x"),
            Literal::Boolean(true),
            Literal::Null,
            Literal::BigInt("-12".into()),
            Literal::BigInt("7".into()),
            Literal::Undefined,
        ]);
    }

    #[test]
    fn malformed_literals_are_rejected() {
        assert!(serde_json::from_value::<Literal>(json!([1])).is_err());
        assert!(serde_json::from_value::<Literal>(json!({"bigint": "12a"})).is_err());
        assert!(serde_json::from_value::<Literal>(json!({"symbol": "x"})).is_err());
        assert!(serde_json::from_value::<EnumValue>(json!(true)).is_err());
        assert!(serde_json::from_value::<Literal>(json!({"undefined": false})).is_err());
        assert!(serde_json::from_value::<Literal>(json!({"undefined": 42})).is_err());
    }

    #[test]
    fn bigints_drop_leading_zeros() {
        let lits: Vec<Literal> = serde_json::from_value(json!([
            {"bigint": "007"}, {"bigint": "-0012"}, {"bigint": "-000"}, {"bigint": "0"}
        ])).unwrap();
        assert_eq!(lits, vec![
            Literal::BigInt("7".into()),
            Literal::BigInt("-12".into()),
            Literal::BigInt("0".into()),
            Literal::BigInt("0".into()),
        ]);
        assert_eq!(Literal::BigInt("-00".into()).to_string(), "0n");
        assert_eq!(Literal::BigInt("0100".into()).to_string(), "100n");
    }

    #[test]
    fn nan_literal_equals_itself() {
        assert_eq!(Literal::nan(), Literal::nan());
        assert_eq!(Literal::nan().to_string(), "NaN");
    }

    #[test]
    fn literal_display_matches_constructor_syntax() {
        let rendered: Vec<String> = [
            Literal::string("a"),
            Literal::number(3.0),
            Literal::BigInt("10".into()),
            Literal::Boolean(false),
            Literal::Null,
            Literal::Undefined,
        ].iter().map(|l| l.to_string()).collect();
        assert_eq!(rendered, ["\"a\"", "3", "10n", "false", "null", "undefined"]);
    }
}
