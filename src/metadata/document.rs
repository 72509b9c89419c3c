//! Metadata document tree
//!
//! Loads a metadata XML file into an owned tree, lets callers address and
//! mutate it, and serializes it back. Text, CDATA sections and comments are
//! kept as they were read so a load/save cycle only changes what the caller
//! touched (plus indentation, which is normalized on write).

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use log::debug;
use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute as XmlAttribute;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::{Reader, Writer};

use crate::metadata::errors::{MetaError, MetaResult};

/// A single name/value attribute pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Content that can appear inside an element
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
}

/// XML element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes or children
    pub fn new(name: &str) -> Self {
        Element {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Get an attribute value, failing if it is absent
    pub fn require_attr(&self, name: &str) -> MetaResult<&str> {
        self.attr(name).ok_or_else(|| MetaError::AttributeNotFound {
            element: self.name.clone(),
            attribute: name.to_string(),
        })
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// Set an attribute, keeping its position when it already exists
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value.to_string(),
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Child elements, skipping text and comments
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// First child element with the given tag
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.elements_mut().find(|e| e.name == name)
    }

    pub fn push_element(&mut self, element: Element) {
        self.children.push(Node::Element(element));
    }

    /// Concatenated text and CDATA content of the direct children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(t) | Node::CData(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Visit this element and every descendant element in document order
    pub fn walk<'a, F>(&'a self, visit: &mut F)
    where
        F: FnMut(&'a Element),
    {
        visit(self);
        for child in self.elements() {
            child.walk(visit);
        }
    }

    /// Mutable counterpart of [`Element::walk`]
    pub fn walk_mut<F>(&mut self, visit: &mut F)
    where
        F: FnMut(&mut Element),
    {
        visit(self);
        for child in self.elements_mut() {
            child.walk_mut(visit);
        }
    }
}

/// A parsed metadata document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub root: Element,
    /// Whether an XML declaration should be written
    pub declaration: bool,
}

impl Document {
    /// Wrap a root element into a new document
    pub fn new(root: Element) -> Self {
        Document { root, declaration: true }
    }

    /// Load and parse a document from disk
    pub fn load<P: AsRef<Path>>(path: P) -> MetaResult<Self> {
        let path = path.as_ref();
        debug!("Loading metadata document {:?}", path);

        let bytes = fs::read(path)?;
        let content = String::from_utf8(bytes).map_err(|e| {
            MetaError::XmlError(format!("{} is not valid UTF-8: {}", path.display(), e))
        })?;

        Self::parse_str(&content)
    }

    /// Parse a document from a string
    pub fn parse_str(xml: &str) -> MetaResult<Self> {
        let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
        let mut reader = Reader::from_str(xml);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;
        let mut declaration = false;

        loop {
            let event = reader.read_event().map_err(|e| {
                MetaError::XmlError(format!(
                    "error at position {}: {}",
                    reader.error_position(),
                    e
                ))
            })?;

            match event {
                Event::Decl(_) => declaration = true,
                Event::Start(start) => {
                    stack.push(Self::element_from_start(&start)?);
                }
                Event::Empty(start) => {
                    let element = Self::element_from_start(&start)?;
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| {
                        MetaError::XmlError("unexpected closing tag".to_string())
                    })?;
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        let text = text
                            .unescape()
                            .map_err(|e| MetaError::XmlError(format!("failed to unescape text: {}", e)))?;
                        // Indentation between elements is regenerated on write
                        if !text.trim().is_empty() {
                            current.children.push(Node::Text(text.into_owned()));
                        }
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        let text = String::from_utf8(data.into_inner().into_owned())
                            .map_err(|e| MetaError::XmlError(format!("invalid CDATA: {}", e)))?;
                        current.children.push(Node::CData(text));
                    }
                }
                Event::Comment(comment) => {
                    if let Some(current) = stack.last_mut() {
                        let text = String::from_utf8(comment.to_vec())
                            .map_err(|e| MetaError::XmlError(format!("invalid comment: {}", e)))?;
                        current.children.push(Node::Comment(text));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(MetaError::XmlError(format!(
                "unclosed element <{}>",
                stack[stack.len() - 1].name
            )));
        }

        let root = root.ok_or_else(|| MetaError::XmlError("document has no root element".to_string()))?;
        Ok(Document { root, declaration })
    }

    fn element_from_start(start: &BytesStart) -> MetaResult<Element> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| MetaError::XmlError(format!("invalid element name: {}", e)))?
            .to_string();

        let mut element = Element::new(&name);
        for attr in start.attributes() {
            let attr = attr.map_err(|e| MetaError::XmlError(format!("bad attribute on <{}>: {}", name, e)))?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| MetaError::XmlError(format!("invalid attribute name: {}", e)))?
                .to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| MetaError::XmlError(format!("failed to unescape '{}': {}", key, e)))?
                .into_owned();
            element.attributes.push(Attribute { name: key, value });
        }

        Ok(element)
    }

    fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, element: Element) -> MetaResult<()> {
        match stack.last_mut() {
            Some(parent) => parent.push_element(element),
            None => {
                if root.is_some() {
                    return Err(MetaError::XmlError(format!(
                        "second root element <{}>",
                        element.name
                    )));
                }
                *root = Some(element);
            }
        }
        Ok(())
    }

    /// Serialize the document into a pretty printed string
    pub fn to_xml_string(&self) -> MetaResult<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        if self.declaration {
            emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }
        write_element(&mut writer, &self.root)?;

        let mut xml = String::from_utf8(writer.into_inner())
            .map_err(|e| MetaError::XmlError(format!("serialized XML is not UTF-8: {}", e)))?;
        xml.push('\n');
        Ok(xml)
    }

    /// Write the document to disk, replacing any existing file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> MetaResult<()> {
        let path = path.as_ref();
        debug!("Writing metadata document {:?}", path);
        fs::write(path, self.to_xml_string()?)?;
        Ok(())
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event) -> MetaResult<()> {
    writer
        .write_event(event)
        .map_err(|e| MetaError::XmlError(format!("failed to write XML: {}", e)))
}

/// Escape an attribute value, keeping line breaks and tabs as character references
///
/// Raw whitespace control characters would be normalized to spaces by readers.
pub(crate) fn escape_attribute_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in escape(value).chars() {
        match c {
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#9;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> MetaResult<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for attr in &element.attributes {
        start.push_attribute(XmlAttribute {
            key: QName(attr.name.as_bytes()),
            value: Cow::Owned(escape_attribute_value(&attr.value).into_bytes()),
        });
    }

    if element.children.is_empty() {
        return emit(writer, Event::Empty(start));
    }

    emit(writer, Event::Start(start))?;
    for child in &element.children {
        match child {
            Node::Element(e) => write_element(writer, e)?,
            Node::Text(t) => emit(writer, Event::Text(BytesText::new(t)))?,
            Node::CData(t) => emit(writer, Event::CData(BytesCData::new(t.as_str())))?,
            Node::Comment(t) => emit(writer, Event::Comment(BytesText::from_escaped(t.as_str())))?,
        }
    }
    emit(writer, Event::End(BytesEnd::new(element.name.as_str())))
}
