//! Markup-to-Markdown conversion
//!
//! The converter reduces a [`MarkupNode`] tree to Markdown text in one
//! recursive pass: every child is converted first, the results are joined
//! with block-aware seam handling, then the first matching rule for the
//! element renders the final text. Unrecognized elements pass their
//! children's text through unchanged, so conversion never fails — worst
//! case is degraded, less richly formatted output.
//!
//! Recursion depth is bounded only by the host stack; pathologically deep
//! (but finite) trees are a documented limitation rather than a
//! special-cased one.

pub mod rules;
pub mod text;

use crate::dom::{ElementNode, MarkupNode};
use once_cell::sync::Lazy;
use rules::RuleTable;
use text::{collapse_whitespace, escape};

/// Context threaded through the recursive reduction
///
/// Carries the information a replacement cannot read off the node itself:
/// who the parent is (lists render differently when nested in an item) and
/// the element's ordinal among its element siblings (ordered-list markers).
pub struct RenderCtx<'a> {
    /// Parent element, if any
    pub parent: Option<&'a ElementNode>,
    /// Index among the parent's element children
    pub index: usize,
    /// Inside a verbatim (code) context: no escaping, no collapsing
    pub in_code: bool,
}

impl RenderCtx<'_> {
    fn root() -> Self {
        RenderCtx {
            parent: None,
            index: 0,
            in_code: false,
        }
    }
}

/// The Markup Converter: a read-only rule table plus the reduction driver
pub struct Converter {
    rules: RuleTable,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    /// Create a converter with the default rule set
    pub fn new() -> Self {
        Self {
            rules: RuleTable::with_defaults(),
        }
    }

    /// Convert a markup tree to Markdown
    ///
    /// Deterministic and pure: same input, same output, no I/O.
    pub fn convert(&self, node: &MarkupNode) -> String {
        self.render_node(node, &RenderCtx::root()).trim().to_string()
    }

    fn render_node(&self, node: &MarkupNode, ctx: &RenderCtx<'_>) -> String {
        match node {
            MarkupNode::Text { text } => {
                if ctx.in_code {
                    text.clone()
                } else {
                    escape(&collapse_whitespace(text))
                }
            }
            MarkupNode::Comment { .. } => String::new(),
            MarkupNode::Element(el) => {
                let content = self.render_children(el, ctx.in_code);
                match self.rules.resolve(el) {
                    Some(rule) => (rule.replacement)(&content, el, ctx, self),
                    // Pass-through: children text, no wrapper markup
                    None => content,
                }
            }
        }
    }

    /// Convert all children of an element and join the pieces
    pub(crate) fn render_children(&self, el: &ElementNode, in_code: bool) -> String {
        let in_code = in_code || el.is_tag("pre") || el.is_tag("code");

        let mut out = String::new();
        let mut element_index = 0;

        for child in &el.children {
            let ctx = RenderCtx {
                parent: Some(el),
                index: element_index,
                in_code,
            };
            let piece = self.render_node(child, &ctx);

            if child.as_element().is_some() {
                element_index += 1;
            }

            if in_code {
                // Verbatim context: byte-for-byte concatenation
                out.push_str(&piece);
            } else {
                join_blocks(&mut out, &piece);
            }
        }

        out
    }

    /// Render a table cell: children converted, then flattened to one line
    pub(crate) fn render_cell(&self, cell: &ElementNode) -> String {
        let rendered = self.render_children(cell, false);
        collapse_whitespace(rendered.trim()).replace('|', "\\|")
    }
}

/// Append `piece` to `out`, normalizing the seam between blocks
///
/// Blocks announce themselves with leading/trailing newlines; at a seam the
/// larger of the two runs wins, capped at one blank line. Text nodes never
/// contain newlines after collapsing, so a whitespace-only piece with a
/// newline can only come from a line-break element; those newlines
/// accumulate across adjacent breaks, under the same cap.
fn join_blocks(out: &mut String, piece: &str) {
    if piece.is_empty() {
        return;
    }

    if piece.trim().is_empty() {
        if piece.contains('\n') {
            if !out.is_empty() {
                let total = trailing_newlines(out) + piece.matches('\n').count();
                set_trailing_newlines(out, total.min(2));
            }
        } else if out.is_empty() || !out.ends_with(char::is_whitespace) {
            out.push(' ');
        }
        return;
    }

    if out.is_empty() {
        out.push_str(piece);
        return;
    }

    let lead = piece.len() - piece.trim_start_matches('\n').len();
    let body = &piece[lead..];

    let sep = trailing_newlines(out).max(lead).min(2);
    if sep > 0 {
        set_trailing_newlines(out, sep);
        out.push_str(body);
    } else if out.ends_with(' ') && body.starts_with(' ') {
        out.push_str(body.trim_start_matches(' '));
    } else {
        out.push_str(body);
    }
}

fn trailing_newlines(s: &str) -> usize {
    s.len() - s.trim_end_matches('\n').len()
}

/// Force `s` to end with exactly `count` newlines, dropping any trailing
/// spaces before the run
fn set_trailing_newlines(s: &mut String, count: usize) {
    s.truncate(s.trim_end_matches('\n').len());
    s.truncate(s.trim_end_matches(' ').len());
    for _ in 0..count {
        s.push('\n');
    }
}

/// Process-wide converter with the default rule table
///
/// The table is initialized on first use and read-only afterward.
static CONVERTER: Lazy<Converter> = Lazy::new(Converter::new);

/// Convert a markup tree to Markdown using the default rule table
pub fn convert(node: &MarkupNode) -> String {
    CONVERTER.convert(node)
}

/// Convert an element's children to Markdown using the default rule table
///
/// The element itself contributes no markup; this is the entry point for
/// rendered-content containers whose wrapper tag is page chrome.
pub fn convert_children(el: &ElementNode) -> String {
    CONVERTER.render_children(el, false).trim().to_string()
}
