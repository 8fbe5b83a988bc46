use crate::dom::node::{ElementNode, MarkupNode};
use serde::{Deserialize, Serialize};

/// A structural selector over a [`MarkupNode`] tree
///
/// Supports the two shapes the extraction layer needs: a tag name
/// (`user-query`), a class (`.query-text`), or both (`div.markdown`).
/// This is intentionally not a CSS engine; page shapes are configuration,
/// not a stable contract, and tag/class is all the known pages require.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Selector {
    /// Required tag name, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Required class name, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

impl Selector {
    /// Selector matching a tag name
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            class: None,
        }
    }

    /// Selector matching a class name
    pub fn class(class: impl Into<String>) -> Self {
        Self {
            tag: None,
            class: Some(class.into()),
        }
    }

    /// Parse a selector string: `tag`, `.class`, or `tag.class`
    pub fn parse(pattern: &str) -> Self {
        match pattern.split_once('.') {
            Some(("", class)) => Self::class(class),
            Some((tag, class)) => Self {
                tag: Some(tag.to_string()),
                class: Some(class.to_string()),
            },
            None => Self::tag(pattern),
        }
    }

    /// Check whether an element matches this selector
    pub fn matches(&self, element: &ElementNode) -> bool {
        if let Some(tag) = &self.tag {
            if !element.is_tag(tag) {
                return false;
            }
        }
        if let Some(class) = &self.class {
            if !element.has_class(class) {
                return false;
            }
        }
        true
    }
}

/// Find the first element matching any of the candidate selectors
///
/// Candidates are tried in order; the first selector with a match anywhere
/// in the tree wins, mirroring "first match wins" over a candidate list.
pub fn select_first<'a>(root: &'a MarkupNode, candidates: &[Selector]) -> Option<&'a ElementNode> {
    candidates
        .iter()
        .find_map(|selector| first_match(root, selector))
}

/// Find all elements matching any of the selectors, in document order
pub fn select_all<'a>(root: &'a MarkupNode, selectors: &[Selector]) -> Vec<&'a ElementNode> {
    let mut matches = Vec::new();
    collect_matches(root, selectors, &mut matches);
    matches
}

/// Find the first element under `element` (excluding itself) that matches
pub fn find_in<'a>(element: &'a ElementNode, selector: &Selector) -> Option<&'a ElementNode> {
    element
        .children
        .iter()
        .find_map(|child| first_match(child, selector))
}

fn first_match<'a>(node: &'a MarkupNode, selector: &Selector) -> Option<&'a ElementNode> {
    let element = node.as_element()?;
    if selector.matches(element) {
        return Some(element);
    }
    element
        .children
        .iter()
        .find_map(|child| first_match(child, selector))
}

fn collect_matches<'a>(
    node: &'a MarkupNode,
    selectors: &[Selector],
    out: &mut Vec<&'a ElementNode>,
) {
    let Some(element) = node.as_element() else {
        return;
    };

    if selectors.iter().any(|s| s.matches(element)) {
        out.push(element);
    }

    for child in &element.children {
        collect_matches(child, selectors, out);
    }
}
