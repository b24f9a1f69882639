//! Domain entities: typed view over the generic document tree
//!
//! Each entity is decoded once from a [`Node`]; the translator then works on
//! these enums instead of re-inspecting tag and attribute strings.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::Node;

/// Element and attribute names of the source vocabulary.
pub mod tag {
    pub const COMMENT: &str = "comment";
    pub const LINE: &str = "line";
    pub const CONSTANT: &str = "constant";
    pub const VALUE: &str = "value";
    pub const ARRAY: &str = "array";
    pub const ITEM: &str = "item";
    pub const EXPRESSION: &str = "expression";
    pub const OPERANDS: &str = "operands";
    pub const OPERAND: &str = "operand";

    pub const ATTR_NAME: &str = "name";
    pub const ATTR_TYPE: &str = "type";
    pub const ATTR_OPERATION: &str = "operation";
}

/// A top-level element of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Comment(Comment),
    Constant(Constant),
    Expression(Expression),
}

impl Element {
    /// Dispatch on the node's tag.
    pub fn decode(node: &Node) -> DomainResult<Self> {
        match node.tag.as_str() {
            tag::COMMENT => Comment::decode(node).map(Element::Comment),
            tag::CONSTANT => Constant::decode(node).map(Element::Constant),
            tag::EXPRESSION => Expression::decode(node).map(Element::Expression),
            other => Err(DomainError::UnsupportedElement {
                tag: other.to_string(),
            }),
        }
    }
}

/// Comment with one or more lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub lines: Vec<String>,
}

impl Comment {
    pub fn decode(node: &Node) -> DomainResult<Self> {
        let lines: Vec<String> = node
            .find_all(tag::LINE)
            .map(|line| line.text().to_string())
            .collect();
        if lines.is_empty() {
            return Err(DomainError::EmptyComment);
        }
        Ok(Self { lines })
    }
}

/// Named constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
    pub name: String,
    pub value: Value,
}

impl Constant {
    pub fn decode(node: &Node) -> DomainResult<Self> {
        let name = required_attr(node, tag::CONSTANT, tag::ATTR_NAME)?;
        let value = node
            .find(tag::VALUE)
            .ok_or_else(|| DomainError::MissingValue {
                name: name.to_string(),
            })?;
        Ok(Self {
            name: name.to_string(),
            value: Value::decode(value)?,
        })
    }
}

/// Declared type of a constant's value; decides literal quoting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Integer,
    String,
}

impl FromStr for ValueType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "integer" => Ok(ValueType::Integer),
            "string" => Ok(ValueType::String),
            other => Err(DomainError::UnsupportedType {
                value_type: other.to_string(),
            }),
        }
    }
}

/// A constant's value: type plus exactly one kind of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    pub value_type: ValueType,
    pub content: ValueContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueContent {
    /// Raw text, trusted verbatim
    Scalar(String),
    /// Raw text of each `item`
    Array(Vec<String>),
    Expression(Expression),
}

impl Value {
    /// Resolution order: expression, then array, then scalar text.
    pub fn decode(node: &Node) -> DomainResult<Self> {
        let value_type: ValueType = required_attr(node, tag::VALUE, tag::ATTR_TYPE)?.parse()?;

        let content = if let Some(expression) = node.find(tag::EXPRESSION) {
            ValueContent::Expression(Expression::decode(expression)?)
        } else if let Some(array) = node.find(tag::ARRAY) {
            ValueContent::Array(
                array
                    .find_all(tag::ITEM)
                    .map(|item| item.text().to_string())
                    .collect(),
            )
        } else {
            ValueContent::Scalar(node.text().to_string())
        };

        Ok(Self {
            value_type,
            content,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Abs,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Abs => "abs",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Operation::Add),
            "abs" => Ok(Operation::Abs),
            other => Err(DomainError::UnsupportedOperation {
                operation: other.to_string(),
            }),
        }
    }
}

/// Operation over opaque operand tokens.
///
/// Operand counts are not checked here; they depend on the translator's
/// options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    pub operation: Operation,
    pub operands: Vec<String>,
}

impl Expression {
    pub fn decode(node: &Node) -> DomainResult<Self> {
        let operation: Operation =
            required_attr(node, tag::EXPRESSION, tag::ATTR_OPERATION)?.parse()?;
        let operands = node
            .find(tag::OPERANDS)
            .map(|operands| {
                operands
                    .find_all(tag::OPERAND)
                    .map(|operand| operand.text().to_string())
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self {
            operation,
            operands,
        })
    }
}

/// Attribute that must be present and non-empty.
fn required_attr<'a>(
    node: &'a Node,
    element: &'static str,
    attribute: &'static str,
) -> DomainResult<&'a str> {
    match node.attr(attribute) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(DomainError::MissingAttribute { element, attribute }),
    }
}
