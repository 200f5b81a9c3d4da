//! Reader for target constructor-call text.
//!
//! Accepts what the text transform emits and what a source formatter makes
//! of it: arbitrary whitespace between tokens, trailing commas, quoted or
//! bare property keys.

use super::{Field, Schema};
use crate::error::ParseError;
use crate::value::{self, EnumValue, Literal};

type Result<T> = std::result::Result<T, ParseError>;

pub fn parse(src: &str) -> Result<Schema> {
    let mut p = Parser { src, pos: 0 };
    let schema = p.expr()?;
    p.skip_ws();
    if p.pos < src.len() {
        return Err(ParseError::TrailingInput { offset: p.pos });
    }
    Ok(schema)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str { &self.src[self.pos..] }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    fn eat(&mut self, tok: &str) -> bool {
        self.skip_ws();
        if self.rest().starts_with(tok) {
            self.pos += tok.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, tok: &'static str) -> Result<()> {
        if self.eat(tok) { Ok(()) } else { Err(self.unexpected(tok)) }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        let rest = self.rest();
        if rest.is_empty() {
            ParseError::UnexpectedEnd { offset: self.pos, expected }
        } else {
            ParseError::Unexpected { offset: self.pos, expected, found: rest.chars().take(16).collect() }
        }
    }

    fn ident(&mut self) -> Option<&'a str> {
        self.skip_ws();
        let rest = self.rest();
        let end = rest
            .char_indices()
            .find(|&(i, c)| !(c == '_' || c == '$' || c.is_ascii_alphabetic() || (i > 0 && c.is_ascii_digit())))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        if end == 0 {
            return None;
        }
        self.pos += end;
        Some(&rest[..end])
    }

    /// Comma-separated items up to `close`; a trailing comma is allowed.
    fn list<T>(&mut self, close: &'static str, mut item: impl FnMut(&mut Self) -> Result<T>) -> Result<Vec<T>> {
        let mut out = Vec::new();
        loop {
            if self.eat(close) {
                return Ok(out);
            }
            out.push(item(self)?);
            if !self.eat(",") {
                self.expect(close)?;
                return Ok(out);
            }
        }
    }

    // ------------------------------ schemas ------------------------------- //

    fn expr(&mut self) -> Result<Schema> {
        let mut schema = self.constructor()?;
        while self.eat(".pipe") {
            self.expect("(")?;
            self.expect("Schema.extend")?;
            self.expect("(")?;
            let extension = self.expr()?;
            self.eat(",");
            self.expect(")")?;
            self.eat(",");
            self.expect(")")?;
            schema = schema.extend(extension);
        }
        Ok(schema)
    }

    fn constructor(&mut self) -> Result<Schema> {
        self.expect("Schema.")?;
        let offset = self.pos;
        let name = self.ident().ok_or_else(|| self.unexpected("constructor name"))?;
        let schema = match name {
            "Never" => Schema::Never,
            "Any" => Schema::Any,
            "Unknown" => Schema::Unknown,
            "Void" => Schema::Void,
            "Undefined" => Schema::Undefined,
            "Null" => Schema::Null,
            "Symbol" => Schema::Symbol,
            "Boolean" => Schema::Boolean,
            "Int" => Schema::Int,
            "BigInt" => Schema::BigInt,
            "Number" => Schema::Number,
            "String" => Schema::String,
            "Date" => Schema::Date,
            "Literal" => {
                self.expect("(")?;
                Schema::Literal(self.list(")", Self::literal)?)
            }
            "Enums" => {
                self.expect("(")?;
                self.expect("{")?;
                let entries = self.list("}", |p| {
                    let key = p.key()?;
                    p.expect(":")?;
                    Ok((key, p.enum_value()?))
                })?;
                self.eat(",");
                self.expect(")")?;
                Schema::Enums(entries)
            }
            "Array" => Schema::array(self.single()?),
            "optional" => Schema::optional(self.single()?),
            "Set" => Schema::set(self.single()?),
            "Map" => {
                let (key, value) = self.key_value()?;
                Schema::map(key, value)
            }
            "Record" => {
                let (key, value) = self.key_value()?;
                Schema::record(key, value)
            }
            "Union" => {
                self.expect("(")?;
                Schema::Union(self.list(")", Self::expr)?)
            }
            "Tuple" => {
                self.expect("(")?;
                Schema::Tuple(self.list(")", Self::expr)?)
            }
            "Struct" => {
                self.expect("(")?;
                self.expect("{")?;
                let fields = self.list("}", |p| {
                    let name = p.key()?;
                    p.expect(":")?;
                    Ok(Field { name, schema: p.expr()? })
                })?;
                self.eat(",");
                self.expect(")")?;
                Schema::Struct(fields)
            }
            other => {
                return Err(ParseError::UnknownConstructor { offset, name: other.to_string() });
            }
        };
        Ok(schema)
    }

    /// `(expr)`
    fn single(&mut self) -> Result<Schema> {
        self.expect("(")?;
        let inner = self.expr()?;
        self.eat(",");
        self.expect(")")?;
        Ok(inner)
    }

    /// `({ key: expr, value: expr })`
    fn key_value(&mut self) -> Result<(Schema, Schema)> {
        self.expect("(")?;
        self.expect("{")?;
        self.expect("key")?;
        self.expect(":")?;
        let key = self.expr()?;
        self.expect(",")?;
        self.expect("value")?;
        self.expect(":")?;
        let value = self.expr()?;
        self.eat(",");
        self.expect("}")?;
        self.eat(",");
        self.expect(")")?;
        Ok((key, value))
    }

    // ------------------------------- values ------------------------------- //

    fn key(&mut self) -> Result<String> {
        self.skip_ws();
        if self.rest().starts_with('"') {
            return self.string();
        }
        if self.eat("[") {
            let name = self.string()?;
            self.expect("]")?;
            return Ok(name);
        }
        self.ident()
            .map(str::to_string)
            .ok_or_else(|| self.unexpected("property key"))
    }

    fn literal(&mut self) -> Result<Literal> {
        self.skip_ws();
        if self.rest().starts_with('"') {
            return self.string().map(Literal::String);
        }
        let offset = self.pos;
        let rest = self.rest();
        let end = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-' | '_')))
            .unwrap_or(rest.len());
        let token = &rest[..end];
        let invalid = || ParseError::InvalidLiteral { offset, text: token.to_string() };
        let lit = match token {
            "" => return Err(self.unexpected("literal value")),
            "NaN" => Literal::nan(),
            "Infinity" => Literal::number(f64::INFINITY),
            "-Infinity" => Literal::number(f64::NEG_INFINITY),
            "true" => Literal::Boolean(true),
            "false" => Literal::Boolean(false),
            "null" => Literal::Null,
            "undefined" => Literal::Undefined,
            t if t.ends_with('n') => value::parse_bigint(&t[..t.len() - 1]).map_err(|_| invalid())?,
            t if t.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '.') => {
                t.parse::<f64>().map(Literal::number).map_err(|_| invalid())?
            }
            _ => return Err(invalid()),
        };
        self.pos += end;
        Ok(lit)
    }

    fn enum_value(&mut self) -> Result<EnumValue> {
        let offset = self.pos;
        match self.literal()? {
            Literal::String(s) => Ok(EnumValue::String(s)),
            Literal::Number(n) => Ok(EnumValue::Number(n)),
            other => Err(ParseError::InvalidLiteral { offset, text: other.to_string() }),
        }
    }

    /// Double-quoted string; inverse of `value::quote`.
    fn string(&mut self) -> Result<String> {
        self.skip_ws();
        let start = self.pos;
        let mut chars = self.rest().char_indices();
        if !matches!(chars.next(), Some((_, '"'))) {
            return Err(self.unexpected("string literal"));
        }
        let bad_escape = |text: String| ParseError::InvalidLiteral { offset: start, text };
        let mut out = String::new();
        while let Some((i, c)) = chars.next() {
            match c {
                '"' => {
                    self.pos = start + i + 1;
                    return Ok(out);
                }
                '\\' => match chars.next() {
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 'r')) => out.push('\r'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, 'b')) => out.push('\u{8}'),
                    Some((_, 'f')) => out.push('\u{c}'),
                    Some((_, e @ ('"' | '\\' | '/' | '\''))) => out.push(e),
                    Some((_, 'u')) => {
                        let hex: String = chars.by_ref().take(4).map(|(_, c)| c).collect();
                        let decoded = u32::from_str_radix(&hex, 16)
                            .ok()
                            .filter(|_| hex.len() == 4)
                            .and_then(char::from_u32)
                            .ok_or_else(|| bad_escape(format!("\\u{hex}")))?;
                        out.push(decoded);
                    }
                    Some((_, e)) => return Err(bad_escape(format!("\\{e}"))),
                    None => break,
                },
                c => out.push(c),
            }
        }
        Err(ParseError::UnexpectedEnd { offset: self.src.len(), expected: "closing quote" })
    }
}

// ------------------------------- Tests ------------------------------------ //
