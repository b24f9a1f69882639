//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::Operation;

/// Domain errors represent documents that cannot be translated.
/// These are independent of where the document came from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("malformed input: {message}")]
    MalformedInput { message: String },

    #[error("unsupported element: <{tag}>")]
    UnsupportedElement { tag: String },

    #[error("comment has no <line> elements")]
    EmptyComment,

    #[error("constant '{name}' has no <value> element")]
    MissingValue { name: String },

    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("unsupported value type: '{value_type}'")]
    UnsupportedType { value_type: String },

    #[error("unsupported operation: '{operation}'")]
    UnsupportedOperation { operation: String },

    #[error("operation '{operation}' expects {expected} operand(s), found {found}")]
    InvalidOperandCount {
        operation: Operation,
        expected: &'static str,
        found: usize,
    },
}

impl DomainError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
