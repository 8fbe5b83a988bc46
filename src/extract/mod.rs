//! Conversation segmentation
//!
//! Walks the ordered sequence of turn elements on a parsed page, classifies
//! each as user or assistant, pulls the relevant content sub-element, and
//! emits an ordered [`ConversationDocument`]. The only surfaced failure is
//! a page with no turns at all; per-turn anomalies (missing content
//! sub-elements) skip that turn and keep going.

use crate::document::{ConversationDocument, Role, Turn};
use crate::dom::{find_in, select_all, select_first, ElementNode, MarkupNode, Selector};
use crate::error::{ExportError, Result};
use crate::markdown;
use crate::markdown::text::collapse_whitespace;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Structural selectors describing where a page keeps its conversation
///
/// Page shapes are configuration, not a contract; the default models the
/// chat page this crate was written against, and callers can substitute
/// their own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageSelectors {
    /// Title candidates, tried in order; first match wins
    pub title: Vec<Selector>,

    /// Fallback title when no candidate matches
    pub default_title: String,

    /// Elements that constitute a user turn
    pub user_turn: Selector,

    /// Elements that constitute an assistant turn
    pub assistant_turn: Selector,

    /// Query-text sub-element within a user turn
    pub user_content: Selector,

    /// Rendered-markdown sub-element within an assistant turn
    pub assistant_content: Selector,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            title: vec![
                Selector::parse(".conversation-title"),
                Selector::parse(".gds-label-l"),
            ],
            default_title: "Conversation".to_string(),
            user_turn: Selector::tag("user-query"),
            assistant_turn: Selector::tag("model-response"),
            user_content: Selector::class("query-text"),
            assistant_content: Selector::class("markdown"),
        }
    }
}

/// Extract a conversation from a parsed page
///
/// Turns are processed strictly in document order; output ordering equals
/// input ordering. Returns [`ExportError::NoConversation`] when the page
/// has no turn elements — the one user-visible failure mode.
pub fn extract(root: &MarkupNode, selectors: &PageSelectors) -> Result<ConversationDocument> {
    let title = select_first(root, &selectors.title)
        .map(|el| collapse_whitespace(&el.text_content()).trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| selectors.default_title.clone());
    debug!("extracting conversation: title={:?}", title);

    let turn_selectors = [selectors.user_turn.clone(), selectors.assistant_turn.clone()];
    let turn_elements = select_all(root, &turn_selectors);
    debug!("found {} conversation turns", turn_elements.len());

    if turn_elements.is_empty() {
        warn!("no conversation content found");
        return Err(ExportError::NoConversation);
    }

    let mut turns = Vec::with_capacity(turn_elements.len());
    for element in turn_elements {
        if selectors.user_turn.matches(element) {
            // A user turn without query text emits no block at all
            let Some(content) = find_in(element, &selectors.user_content) else {
                debug!("skipping user turn without query text");
                continue;
            };
            let text = query_text(content);
            if text.is_empty() {
                debug!("skipping user turn with empty query text");
                continue;
            }
            turns.push(Turn::new(Role::User, text));
        } else {
            let Some(content) = find_in(element, &selectors.assistant_content) else {
                debug!("skipping assistant turn without rendered content");
                continue;
            };
            let body = markdown::convert_children(content);
            if body.is_empty() {
                debug!("skipping assistant turn with empty rendered content");
                continue;
            }
            turns.push(Turn::new(Role::Assistant, body));
        }
    }

    Ok(ConversationDocument::new(title, turns))
}

/// Plain-text rendering of a user query
///
/// Inline whitespace collapses as in rendered output, but line structure
/// survives: `<br>` becomes a newline and block elements start and end
/// their own line. Edges of each line are trimmed.
fn query_text(el: &ElementNode) -> String {
    let mut raw = String::new();
    for child in &el.children {
        query_text_into(child, &mut raw);
    }
    raw.lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn query_text_into(node: &MarkupNode, out: &mut String) {
    match node {
        MarkupNode::Text { text } => {
            let collapsed = collapse_whitespace(text);
            // Inter-tag whitespace at a line start would become its own line
            if collapsed.trim().is_empty() && (out.is_empty() || out.ends_with('\n')) {
                return;
            }
            out.push_str(&collapsed);
        }
        MarkupNode::Comment { .. } => {}
        MarkupNode::Element(el) => {
            if el.is_tag("br") {
                out.push('\n');
                return;
            }
            let block = matches!(el.tag_name.as_str(), "p" | "div" | "li");
            if block && !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            for child in &el.children {
                query_text_into(child, out);
            }
            if block && !out.ends_with('\n') {
                out.push('\n');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_markup;

    const PAGE: &str = r#"
        <div class="conversation selected">
          <div class="conversation-title">Plan A</div>
        </div>
        <user-query><div class="query-text">Write a haiku</div></user-query>
        <model-response>
          <div class="markdown"><p>Sure!</p><pre><code>line1
line2</code></pre></div>
        </model-response>
    "#;

    #[test]
    fn test_extract_full_page() {
        let root = parse_markup(PAGE).unwrap();
        let doc = extract(&root, &PageSelectors::default()).unwrap();

        assert_eq!(doc.title, "Plan A");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.turns[0], Turn::new(Role::User, "Write a haiku"));
        assert_eq!(
            doc.turns[1],
            Turn::new(Role::Assistant, "Sure!\n\n```\nline1\nline2\n```")
        );
    }

    #[test]
    fn test_extract_no_turns_is_not_found() {
        let root = parse_markup("<p>just a page</p>").unwrap();
        let err = extract(&root, &PageSelectors::default()).unwrap_err();
        assert!(matches!(err, ExportError::NoConversation));
    }

    #[test]
    fn test_extract_default_title() {
        let root = parse_markup("<user-query><div class='query-text'>hi</div></user-query>").unwrap();
        let doc = extract(&root, &PageSelectors::default()).unwrap();
        assert_eq!(doc.title, "Conversation");
    }

    #[test]
    fn test_extract_title_candidate_order() {
        let root = parse_markup(
            r#"<div class="gds-label-l">Second</div>
               <div class="conversation-title">First</div>
               <user-query><div class="query-text">hi</div></user-query>"#,
        )
        .unwrap();
        let doc = extract(&root, &PageSelectors::default()).unwrap();
        assert_eq!(doc.title, "First");
    }

    #[test]
    fn test_user_turn_without_query_text_is_skipped() {
        let root = parse_markup(
            r#"<user-query><div class="other">lost</div></user-query>
               <model-response><div class="markdown"><p>ok</p></div></model-response>"#,
        )
        .unwrap();
        let doc = extract(&root, &PageSelectors::default()).unwrap();

        assert_eq!(doc.len(), 1);
        assert_eq!(doc.turns[0].role, Role::Assistant);
    }

    #[test]
    fn test_empty_assistant_content_is_skipped() {
        let root = parse_markup(
            r#"<user-query><div class="query-text">q1</div></user-query>
               <model-response><div class="markdown"></div></model-response>
               <user-query><div class="query-text">q2</div></user-query>"#,
        )
        .unwrap();
        let doc = extract(&root, &PageSelectors::default()).unwrap();

        // surrounding turns unaffected
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.turns[0].markdown, "q1");
        assert_eq!(doc.turns[1].markdown, "q2");
    }

    #[test]
    fn test_user_query_keeps_line_breaks() {
        let root = parse_markup(
            r#"<user-query><div class="query-text">line one<br>line two</div></user-query>"#,
        )
        .unwrap();
        let doc = extract(&root, &PageSelectors::default()).unwrap();
        assert_eq!(doc.turns[0].markdown, "line one\nline two");
    }

    #[test]
    fn test_user_query_paragraphs_become_lines() {
        let root = parse_markup(
            r#"<user-query><div class="query-text">
                 <p>first  line</p>
                 <p>second line</p>
               </div></user-query>"#,
        )
        .unwrap();
        let doc = extract(&root, &PageSelectors::default()).unwrap();
        assert_eq!(doc.turns[0].markdown, "first line\nsecond line");
    }

    #[test]
    fn test_turn_order_matches_document_order() {
        let root = parse_markup(
            r#"<user-query><div class="query-text">one</div></user-query>
               <model-response><div class="markdown"><p>two</p></div></model-response>
               <user-query><div class="query-text">three</div></user-query>"#,
        )
        .unwrap();
        let doc = extract(&root, &PageSelectors::default()).unwrap();

        let bodies: Vec<_> = doc.turns.iter().map(|t| t.markdown.as_str()).collect();
        assert_eq!(bodies, vec!["one", "two", "three"]);
    }
}
