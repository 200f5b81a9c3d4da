//! Error types.

use thiserror::Error;

use crate::source::Kind;

/// Failure of either transform.
///
/// The only way a transform fails is by reaching a kind that has no
/// semantics-preserving mapping; the whole call aborts with no partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("Unsupported schema: {kind}")]
    UnsupportedSchemaKind { kind: Kind },
}

impl TransformError {
    pub fn kind(&self) -> Kind {
        match self {
            TransformError::UnsupportedSchemaKind { kind } => *kind,
        }
    }
}

/// Failure reading constructor-call text back into a target schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected end of input at byte {offset}: expected {expected}")]
    UnexpectedEnd { offset: usize, expected: &'static str },

    #[error("unexpected input at byte {offset}: expected {expected}, found `{found}`")]
    Unexpected { offset: usize, expected: &'static str, found: String },

    #[error("unknown constructor `Schema.{name}` at byte {offset}")]
    UnknownConstructor { offset: usize, name: String },

    #[error("invalid literal `{text}` at byte {offset}")]
    InvalidLiteral { offset: usize, text: String },

    #[error("trailing input at byte {offset}")]
    TrailingInput { offset: usize },
}
