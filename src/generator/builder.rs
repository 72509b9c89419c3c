//! Declarative element construction
//!
//! ```ignore
//! let table = ElementBuilder::new("table")
//!     .attr("GUID", &guid)
//!     .attr("name", "G001")
//!     .child(ElementBuilder::new("OutputFormat").child(ElementBuilder::new("Columns")))
//!     .build();
//! ```

use crate::metadata::document::{Element, Node};

/// Builds an [`Element`] by chaining attributes and children
#[derive(Debug, Clone, Default)]
pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    pub fn new(name: &str) -> Self {
        ElementBuilder { element: Element::new(name) }
    }

    /// Append an attribute (a repeated name overwrites the earlier value)
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.element.set_attr(name, value);
        self
    }

    /// Append several attributes in order
    pub fn attrs<'a, I>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, value) in attributes {
            self.element.set_attr(name, value);
        }
        self
    }

    pub fn child(mut self, child: ElementBuilder) -> Self {
        self.element.push_element(child.build());
        self
    }

    pub fn child_element(mut self, child: Element) -> Self {
        self.element.push_element(child);
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = Element>,
    {
        for child in children {
            self.element.push_element(child);
        }
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.element.children.push(Node::Text(text.to_string()));
        self
    }

    pub fn cdata(mut self, text: &str) -> Self {
        self.element.children.push(Node::CData(text.to_string()));
        self
    }

    pub fn comment(mut self, text: &str) -> Self {
        self.element.children.push(Node::Comment(text.to_string()));
        self
    }

    pub fn build(self) -> Element {
        self.element
    }
}

/// Shorthand for an element holding a single empty CDATA section
pub fn empty_cdata(name: &str) -> ElementBuilder {
    ElementBuilder::new(name).cdata("")
}

