//! XML tree loader
//!
//! Builds a [`Node`] tree from XML text using the event reader of
//! [`quick_xml`]. Element names and attributes are taken verbatim
//! (namespace prefixes included); text and CDATA segments are appended to
//! the enclosing element. Declarations, comments, processing instructions
//! and doctypes are skipped.

use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, trace};

use crate::domain::{DomainError, DomainResult, Node};
use crate::infrastructure::traits::TreeLoader;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Strip leading and trailing whitespace from every element's text
    pub trim_text: bool,
}

/// [`TreeLoader`] for XML sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlTreeLoader {
    options: LoaderOptions,
}

impl XmlTreeLoader {
    pub fn new(options: LoaderOptions) -> Self {
        Self { options }
    }
}

impl TreeLoader for XmlTreeLoader {
    fn load(&self, source: &str) -> DomainResult<Node> {
        parse_document(source, &self.options)
    }
}

/// Parse a complete document and return its root element.
pub fn parse_document(source: &str, options: &LoaderOptions) -> DomainResult<Node> {
    let mut reader = Reader::from_str(source);
    let mut builder = TreeBuilder::new(*options);

    loop {
        let position = reader.buffer_position();
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => return Err(malformed_at(reader.buffer_position(), e)),
        };

        match event {
            Event::Start(start) => builder.open(element(&start, position)?, position)?,
            Event::Empty(start) => {
                builder.open(element(&start, position)?, position)?;
                builder.close(position)?;
            }
            Event::End(_) => builder.close(position)?,
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| malformed_at(position, e))?;
                builder.text(&text, position)?;
            }
            Event::CData(data) => {
                let bytes = data.into_inner();
                let text = std::str::from_utf8(&bytes).map_err(|e| malformed_at(position, e))?;
                builder.text(text, position)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    builder.finish()
}

/// Create an element node from a start tag, unescaping attribute values.
fn element(start: &BytesStart<'_>, position: usize) -> DomainResult<Node> {
    let mut node = Node::new(utf8(start.name().as_ref(), position)?);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| malformed_at(position, e))?;
        let key = utf8(attr.key.as_ref(), position)?;
        let value = attr.unescape_value().map_err(|e| malformed_at(position, e))?;
        node.attributes.insert(key.into_owned(), value.into_owned());
    }
    trace!("element: <{}> at {}", node.tag, position);
    Ok(node)
}

fn utf8(bytes: &[u8], position: usize) -> DomainResult<Cow<'_, str>> {
    std::str::from_utf8(bytes)
        .map(Cow::Borrowed)
        .map_err(|e| malformed_at(position, e))
}

fn malformed_at(position: usize, cause: impl std::fmt::Display) -> DomainError {
    DomainError::malformed(format!("{cause} (at byte {position})"))
}

/// Stack of open elements; closed elements are attached to their parent.
struct TreeBuilder {
    options: LoaderOptions,
    open: Vec<Node>,
    root: Option<Node>,
}

impl TreeBuilder {
    fn new(options: LoaderOptions) -> Self {
        Self {
            options,
            open: Vec::new(),
            root: None,
        }
    }

    fn open(&mut self, node: Node, position: usize) -> DomainResult<()> {
        if self.open.is_empty() && self.root.is_some() {
            return Err(malformed_at(
                position,
                format!("second root element <{}>", node.tag),
            ));
        }
        self.open.push(node);
        Ok(())
    }

    fn close(&mut self, position: usize) -> DomainResult<()> {
        let mut node = self
            .open
            .pop()
            .ok_or_else(|| malformed_at(position, "closing tag without matching start"))?;

        if self.options.trim_text {
            if let Some(text) = node.text.as_mut() {
                *text = text.trim().to_string();
            }
        }

        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root = Some(node),
        }
        Ok(())
    }

    fn text(&mut self, segment: &str, position: usize) -> DomainResult<()> {
        match self.open.last_mut() {
            Some(node) => {
                node.push_text(segment);
                Ok(())
            }
            None if segment.trim().is_empty() => Ok(()),
            None => Err(malformed_at(position, "text outside of the root element")),
        }
    }

    fn finish(self) -> DomainResult<Node> {
        if let Some(node) = self.open.last() {
            return Err(DomainError::malformed(format!(
                "unexpected end of document: <{}> is not closed",
                node.tag
            )));
        }
        let root = self
            .root
            .ok_or_else(|| DomainError::malformed("document has no root element"))?;
        debug!("parse_document: root <{}>", root.tag);
        Ok(root)
    }
}
