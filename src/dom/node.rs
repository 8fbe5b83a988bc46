use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A node in a parsed markup tree
///
/// The tree is rooted and acyclic; children keep document order. This is a
/// deliberately host-independent representation: nothing here depends on a
/// live document API, so conversion and its tests run on plain data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkupNode {
    /// An element with a tag name, attributes, and ordered children
    Element(ElementNode),

    /// A text node
    Text {
        /// Raw text payload, whitespace preserved as parsed
        text: String,
    },

    /// A comment node (ignored by conversion)
    Comment {
        /// Comment payload
        text: String,
    },
}

/// An element node within a [`MarkupNode`] tree
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ElementNode {
    /// Tag name (e.g., "div", "pre", "user-query"), lowercase
    pub tag_name: String,

    /// Element attributes (id, class, href, etc.)
    #[serde(default)]
    pub attributes: HashMap<String, String>,

    /// Child nodes in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MarkupNode>,
}

impl MarkupNode {
    /// Create a text node
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create a comment node
    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment { text: text.into() }
    }

    /// Get the element payload, if this node is an element
    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Check whether this node is an element with the given tag
    pub fn is_tag(&self, tag: &str) -> bool {
        self.as_element().is_some_and(|el| el.is_tag(tag))
    }

    /// Collect the concatenated text of this node and all descendants
    ///
    /// Comments contribute nothing. Whitespace is preserved as parsed;
    /// callers collapse or trim as needed.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text { text } => out.push_str(text),
            Self::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
            Self::Comment { .. } => {}
        }
    }
}

impl From<ElementNode> for MarkupNode {
    fn from(el: ElementNode) -> Self {
        Self::Element(el)
    }
}

impl ElementNode {
    /// Create a new element with the given tag name
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder method: set attributes
    pub fn with_attributes(mut self, attributes: HashMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Builder method: set a single attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder method: append a text child
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(MarkupNode::text(text));
        self
    }

    /// Builder method: set children
    pub fn with_children(mut self, children: Vec<MarkupNode>) -> Self {
        self.children = children;
        self
    }

    /// Builder method: append a child element
    pub fn with_child(mut self, child: impl Into<MarkupNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Add a single attribute
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Add a child node
    pub fn add_child(&mut self, child: impl Into<MarkupNode>) {
        self.children.push(child.into());
    }

    /// Get attribute value by key
    pub fn get_attribute(&self, key: &str) -> Option<&String> {
        self.attributes.get(key)
    }

    /// Check if the element carries a specific class
    pub fn has_class(&self, class_name: &str) -> bool {
        match self.attributes.get("class") {
            Some(classes) => classes.split_whitespace().any(|c| c == class_name),
            None => false,
        }
    }

    /// Get the element ID
    pub fn id(&self) -> Option<&String> {
        self.attributes.get("id")
    }

    /// Check if the element has a specific tag (case-insensitive)
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }

    /// Concatenated text of all descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// Iterate over child elements only, skipping text and comments
    pub fn child_elements(&self) -> impl Iterator<Item = &ElementNode> {
        self.children.iter().filter_map(MarkupNode::as_element)
    }
}
