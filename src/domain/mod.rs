//! Domain layer: document tree, typed entities and the translator
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod node;
pub mod translator;

pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use node::Node;
pub use translator::{
    format_comment, format_constant, format_expression, translate, AbsOperands, TranslateOptions,
    Translator,
};
