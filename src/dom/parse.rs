//! HTML parsing into the [`MarkupNode`] tree
//!
//! Pipeline: HTML string → html5ever → RcDom → MarkupNode. The parser is
//! lenient by construction (html5ever applies the standard error recovery),
//! so arbitrary page fragments come back as a well-formed tree.

use crate::dom::node::{ElementNode, MarkupNode};
use crate::error::{ExportError, Result};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse an HTML string (full document or fragment) into a `MarkupNode`
///
/// Fragments are parsed with the standard document algorithm, which places
/// flow content under `<body>`; the returned root is that body element, so
/// `parse_markup("<p>hi</p>")` yields a body with one paragraph child.
pub fn parse_markup(html: &str) -> Result<MarkupNode> {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);

    let body = find_element(&dom.document, "body").ok_or_else(|| {
        ExportError::DomParseFailed("parsed document has no body element".to_string())
    })?;

    convert_handle(&body)
        .ok_or_else(|| ExportError::DomParseFailed("body element did not convert".to_string()))
}

/// Depth-first search for the first element with the given local name
fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    if let NodeData::Element { ref name, .. } = handle.data {
        if name.local.as_ref() == tag {
            return Some(handle.clone());
        }
    }

    for child in handle.children.borrow().iter() {
        if let Some(found) = find_element(child, tag) {
            return Some(found);
        }
    }

    None
}

/// Convert one rcdom handle into a `MarkupNode`
///
/// Doctypes and processing instructions have no counterpart in our tree and
/// return `None`.
fn convert_handle(handle: &Handle) -> Option<MarkupNode> {
    match handle.data {
        NodeData::Element {
            ref name,
            ref attrs,
            ..
        } => {
            let mut element = ElementNode::new(name.local.to_string());

            for attr in attrs.borrow().iter() {
                element.add_attribute(attr.name.local.to_string(), attr.value.to_string());
            }

            for child in handle.children.borrow().iter() {
                if let Some(node) = convert_handle(child) {
                    element.add_child(node);
                }
            }

            Some(element.into())
        }
        NodeData::Text { ref contents } => Some(MarkupNode::text(contents.borrow().to_string())),
        NodeData::Comment { ref contents } => Some(MarkupNode::comment(contents.to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fragment_lands_in_body() {
        let root = parse_markup("<p>Hello</p>").unwrap();
        let body = root.as_element().unwrap();

        assert_eq!(body.tag_name, "body");
        let children: Vec<_> = body.child_elements().collect();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].tag_name, "p");
        assert_eq!(children[0].text_content(), "Hello");
    }

    #[test]
    fn test_parse_attributes() {
        let root = parse_markup(r#"<a href="/page" class="link primary">go</a>"#).unwrap();
        let body = root.as_element().unwrap();
        let link = body.child_elements().next().unwrap();

        assert_eq!(link.tag_name, "a");
        assert_eq!(link.get_attribute("href"), Some(&"/page".to_string()));
        assert!(link.has_class("primary"));
    }

    #[test]
    fn test_parse_preserves_document_order() {
        let root = parse_markup("<h1>A</h1><p>B</p><p>C</p>").unwrap();
        let body = root.as_element().unwrap();
        let tags: Vec<_> = body
            .child_elements()
            .map(|el| el.tag_name.clone())
            .collect();

        assert_eq!(tags, vec!["h1", "p", "p"]);
    }

    #[test]
    fn test_parse_custom_elements() {
        let root =
            parse_markup("<user-query><div class=\"query-text\">hi</div></user-query>").unwrap();
        let body = root.as_element().unwrap();
        let turn = body.child_elements().next().unwrap();

        assert_eq!(turn.tag_name, "user-query");
        assert_eq!(turn.text_content(), "hi");
    }

    #[test]
    fn test_parse_keeps_whitespace_in_pre() {
        let root = parse_markup("<pre><code>line1\n  line2</code></pre>").unwrap();
        let body = root.as_element().unwrap();
        let pre = body.child_elements().next().unwrap();

        assert_eq!(pre.text_content(), "line1\n  line2");
    }

    #[test]
    fn test_parse_comment_is_kept_as_comment() {
        let root = parse_markup("<div><!-- note --><span>x</span></div>").unwrap();
        let body = root.as_element().unwrap();
        let div = body.child_elements().next().unwrap();

        assert!(matches!(div.children[0], MarkupNode::Comment { .. }));
        assert_eq!(div.text_content(), "x");
    }

    #[test]
    fn test_parse_malformed_input_recovers() {
        // Unclosed tags never fail; html5ever recovers
        let root = parse_markup("<p>open <b>bold").unwrap();
        assert_eq!(root.text_content(), "open bold");
    }
}
