//! Tree-to-text translation
//!
//! Walks the root's children in document order and renders each one as a
//! block of the target configuration language:
//!
//! - comments: `\ text` for one line, `=begin` ... `=cut` for several
//! - constants: `name is value`, with `"..."` quoting for strings and
//!   `<< a, b >>` for arrays
//! - expressions: `$+ a b$`, `$abs a$`, prefixed with `name is` when they
//!   are the value of a constant
//!
//! The first error encountered aborts the translation.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::domain::entities::{
    Comment, Constant, Element, Expression, Operation, ValueContent, ValueType,
};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::Node;

/// How `abs` treats operands beyond the first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AbsOperands {
    /// Use the first operand, ignore the rest
    #[default]
    First,
    /// Anything but exactly one operand is an error
    ExactlyOne,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslateOptions {
    pub abs_operands: AbsOperands,
}

/// Stateless translator; cheap to copy and safe to share.
#[derive(Debug, Clone, Copy, Default)]
pub struct Translator {
    options: TranslateOptions,
}

impl Translator {
    pub fn new(options: TranslateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> TranslateOptions {
        self.options
    }

    /// Translate every child of `root`, joined by newlines.
    #[instrument(level = "debug", skip_all, fields(root = %root.tag))]
    pub fn translate(&self, root: &Node) -> DomainResult<String> {
        let mut blocks = Vec::with_capacity(root.children.len());
        for child in &root.children {
            let element = Element::decode(child)?;
            blocks.push(self.render(&element)?);
        }
        debug!("translated {} elements", blocks.len());
        Ok(blocks.join("\n"))
    }

    pub fn format_comment(&self, node: &Node) -> DomainResult<String> {
        Ok(render_comment(&Comment::decode(node)?))
    }

    pub fn format_constant(&self, node: &Node) -> DomainResult<String> {
        self.render_constant(&Constant::decode(node)?)
    }

    /// Render an expression; with a `name` the result is `name is $...$`.
    pub fn format_expression(&self, node: &Node, name: Option<&str>) -> DomainResult<String> {
        self.render_expression(&Expression::decode(node)?, name)
    }

    pub fn render(&self, element: &Element) -> DomainResult<String> {
        trace!("render: {:?}", element);
        match element {
            Element::Comment(comment) => Ok(render_comment(comment)),
            Element::Constant(constant) => self.render_constant(constant),
            Element::Expression(expression) => self.render_expression(expression, None),
        }
    }

    fn render_constant(&self, constant: &Constant) -> DomainResult<String> {
        let name = &constant.name;
        let value_type = constant.value.value_type;
        match &constant.value.content {
            ValueContent::Expression(expression) => {
                self.render_expression(expression, Some(name.as_str()))
            }
            ValueContent::Array(items) => {
                Ok(format!("{name} is {}", render_array(items, value_type)))
            }
            ValueContent::Scalar(text) => Ok(match value_type {
                ValueType::Integer => format!("{name} is {text}"),
                ValueType::String => format!("{name} is \"{text}\""),
            }),
        }
    }

    fn render_expression(
        &self,
        expression: &Expression,
        name: Option<&str>,
    ) -> DomainResult<String> {
        let operands = &expression.operands;
        let result = match expression.operation {
            Operation::Add => {
                if operands.is_empty() {
                    return Err(operand_count(expression, "at least 1"));
                }
                format!("$+ {}$", operands.join(" "))
            }
            Operation::Abs => {
                let first = match (operands.first(), self.options.abs_operands) {
                    (None, _) => return Err(operand_count(expression, "exactly 1")),
                    (Some(_), AbsOperands::ExactlyOne) if operands.len() > 1 => {
                        return Err(operand_count(expression, "exactly 1"))
                    }
                    (Some(first), _) => first,
                };
                format!("$abs {first}$")
            }
        };

        Ok(match name {
            Some(name) => format!("{name} is {result}"),
            None => result,
        })
    }
}

fn render_comment(comment: &Comment) -> String {
    match comment.lines.as_slice() {
        [line] => format!("\\ {line}"),
        lines => format!("=begin\n{}\n=cut", lines.join("\n")),
    }
}

fn render_array(items: &[String], value_type: ValueType) -> String {
    if items.is_empty() {
        return "<< >>".to_string();
    }
    let items: Vec<String> = match value_type {
        ValueType::Integer => items.to_vec(),
        ValueType::String => items.iter().map(|item| format!("\"{item}\"")).collect(),
    };
    format!("<< {} >>", items.join(", "))
}

fn operand_count(expression: &Expression, expected: &'static str) -> DomainError {
    DomainError::InvalidOperandCount {
        operation: expression.operation,
        expected,
        found: expression.operands.len(),
    }
}

/// Translate with default options.
pub fn translate(root: &Node) -> DomainResult<String> {
    Translator::default().translate(root)
}

pub fn format_comment(node: &Node) -> DomainResult<String> {
    Translator::default().format_comment(node)
}

pub fn format_constant(node: &Node) -> DomainResult<String> {
    Translator::default().format_constant(node)
}

pub fn format_expression(node: &Node, name: Option<&str>) -> DomainResult<String> {
    Translator::default().format_expression(node, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn comment(lines: &[&str]) -> Node {
        Node::new("comment").with_children(lines.iter().map(|l| Node::new("line").with_text(*l)))
    }

    fn constant(name: &str, value: Node) -> Node {
        Node::new("constant").with_attr("name", name).with_child(value)
    }

    fn array(value_type: &str, items: &[&str]) -> Node {
        Node::new("value").with_attr("type", value_type).with_child(
            Node::new("array").with_children(items.iter().map(|i| Node::new("item").with_text(*i))),
        )
    }

    fn expression(operation: &str, operands: &[&str]) -> Node {
        Node::new("expression")
            .with_attr("operation", operation)
            .with_child(
                Node::new("operands")
                    .with_children(operands.iter().map(|o| Node::new("operand").with_text(*o))),
            )
    }

    #[rstest]
    #[case(&["only line"], "\\ only line")]
    #[case(&["first", "second"], "=begin\nfirst\nsecond\n=cut")]
    #[case(&["a", "b", "c"], "=begin\na\nb\nc\n=cut")]
    fn test_format_comment(#[case] lines: &[&str], #[case] expected: &str) {
        assert_eq!(format_comment(&comment(lines)).unwrap(), expected);
    }

    #[test]
    fn test_format_comment_without_lines() {
        assert_eq!(format_comment(&comment(&[])), Err(DomainError::EmptyComment));
    }

    #[rstest]
    #[case("integer", "10", "num is 10")]
    #[case("string", "Hello", "num is \"Hello\"")]
    #[case("string", "say \"hi\"", "num is \"say \"hi\"\"")]
    fn test_format_scalar_constant(
        #[case] value_type: &str,
        #[case] text: &str,
        #[case] expected: &str,
    ) {
        let node = constant(
            "num",
            Node::new("value").with_attr("type", value_type).with_text(text),
        );
        assert_eq!(format_constant(&node).unwrap(), expected);
    }

    #[rstest]
    #[case("integer", &["1", "2"], "numbers is << 1, 2 >>")]
    #[case("string", &["a", "b"], "numbers is << \"a\", \"b\" >>")]
    #[case("integer", &[], "numbers is << >>")]
    #[case("string", &[], "numbers is << >>")]
    fn test_format_array_constant(
        #[case] value_type: &str,
        #[case] items: &[&str],
        #[case] expected: &str,
    ) {
        let node = constant("numbers", array(value_type, items));
        assert_eq!(format_constant(&node).unwrap(), expected);
    }

    #[test]
    fn test_format_constant_with_expression_value() {
        let node = constant(
            "total",
            Node::new("value")
                .with_attr("type", "integer")
                .with_child(expression("add", &["num", "5"])),
        );
        assert_eq!(format_constant(&node).unwrap(), "total is $+ num 5$");
    }

    #[test]
    fn test_format_constant_without_value() {
        let node = Node::new("constant").with_attr("name", "lonely");
        assert_eq!(
            format_constant(&node),
            Err(DomainError::MissingValue {
                name: "lonely".to_string()
            })
        );
    }

    #[test]
    fn test_format_constant_with_unsupported_type() {
        let node = constant(
            "pi",
            Node::new("value").with_attr("type", "float").with_text("3.14"),
        );
        assert_eq!(
            format_constant(&node),
            Err(DomainError::UnsupportedType {
                value_type: "float".to_string()
            })
        );
    }

    #[rstest]
    #[case("add", &["num", "5"], None, "$+ num 5$")]
    #[case("add", &["1"], None, "$+ 1$")]
    #[case("add", &["a", "b", "c"], Some("sum"), "sum is $+ a b c$")]
    #[case("abs", &["-20"], None, "$abs -20$")]
    #[case("abs", &["-20", "ignored"], None, "$abs -20$")]
    #[case("abs", &["x"], Some("y"), "y is $abs x$")]
    fn test_format_expression(
        #[case] operation: &str,
        #[case] operands: &[&str],
        #[case] name: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(
            format_expression(&expression(operation, operands), name).unwrap(),
            expected
        );
    }

    #[rstest]
    #[case("add", Operation::Add, "at least 1")]
    #[case("abs", Operation::Abs, "exactly 1")]
    fn test_format_expression_without_operands(
        #[case] name: &str,
        #[case] operation: Operation,
        #[case] expected: &'static str,
    ) {
        assert_eq!(
            format_expression(&expression(name, &[]), None),
            Err(DomainError::InvalidOperandCount {
                operation,
                expected,
                found: 0
            })
        );
    }

    #[test]
    fn test_strict_abs_rejects_extra_operands() {
        let translator = Translator::new(TranslateOptions {
            abs_operands: AbsOperands::ExactlyOne,
        });
        assert_eq!(
            translator.format_expression(&expression("abs", &["1", "2"]), None),
            Err(DomainError::InvalidOperandCount {
                operation: Operation::Abs,
                expected: "exactly 1",
                found: 2
            })
        );
        assert_eq!(
            translator
                .format_expression(&expression("abs", &["1"]), None)
                .unwrap(),
            "$abs 1$"
        );
    }

    #[test]
    fn test_format_expression_with_unsupported_operation() {
        assert_eq!(
            format_expression(&expression("mul", &["2", "3"]), None),
            Err(DomainError::UnsupportedOperation {
                operation: "mul".to_string()
            })
        );
    }

    #[test]
    fn test_translate_keeps_document_order() {
        let root = Node::new("config")
            .with_child(comment(&["Single line comment"]))
            .with_child(constant(
                "num",
                Node::new("value").with_attr("type", "integer").with_text("10"),
            ))
            .with_child(expression("add", &["num", "5"]));

        assert_eq!(
            translate(&root).unwrap(),
            "\\ Single line comment\nnum is 10\n$+ num 5$"
        );
    }

    #[test]
    fn test_translate_empty_root() {
        assert_eq!(translate(&Node::new("config")).unwrap(), "");
    }

    #[test]
    fn test_translate_stops_at_first_error() {
        let root = Node::new("config")
            .with_child(comment(&[]))
            .with_child(Node::new("unknown"));
        assert_eq!(translate(&root), Err(DomainError::EmptyComment));
    }

    #[test]
    fn test_translate_rejects_unknown_element() {
        let root = Node::new("config")
            .with_child(comment(&["ok"]))
            .with_child(Node::new("include"));
        assert_eq!(
            translate(&root),
            Err(DomainError::UnsupportedElement {
                tag: "include".to_string()
            })
        );
    }
}
