//! Schema-description transforms.
//!
//! Maps a source schema tree onto the target schema library, either as live
//! target values (`to_object`) or as constructor-call text for code
//! generation (`to_text`). Both are the same post-order fold (`fold::fold`)
//! driven by a different `fold::Rules` implementation, so they agree on
//! which kinds are supported and on child order.
//!
//! Neither transform validates data; they only map descriptions.
pub mod catalog;
pub mod error;
pub mod fold;
pub mod object;
pub mod source;
pub mod target;
pub mod text;
pub mod value;

pub use error::{ParseError, TransformError};
pub use object::to_object;
pub use text::to_text;

/// Which result `convert` produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// Live target schema value.
    Object,
    /// Constructor-call source text.
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Converted {
    Object(target::Schema),
    Text(String),
}

/// Both transforms behind one call.
pub fn convert(schema: &source::Schema, format: Format) -> Result<Converted, TransformError> {
    match format {
        Format::Object => to_object(schema).map(Converted::Object),
        Format::Text => to_text(schema).map(Converted::Text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_dispatches_on_format() {
        let s = source::Schema::set(source::Schema::Int);
        assert_eq!(convert(&s, Format::Object).unwrap(), Converted::Object(target::Schema::set(target::Schema::Int)));
        assert_eq!(convert(&s, Format::Text).unwrap(), Converted::Text("Schema.Set(Schema.Int)".into()));
    }

    #[test]
    fn both_formats_refuse_the_same_node() {
        let s = source::Schema::union([source::Schema::String, source::Schema::File]);
        assert_eq!(convert(&s, Format::Object).unwrap_err(), convert(&s, Format::Text).unwrap_err());
    }
}
