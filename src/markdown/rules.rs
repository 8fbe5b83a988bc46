//! The conversion rule table
//!
//! Each rule pairs a filter (tag name, optionally refined by attributes)
//! with a replacement function `(converted_children, node, ctx) -> text`.
//! Rules are tried in insertion order and at most one fires per element;
//! elements nothing matches fall through to transparent pass-through.

use crate::dom::ElementNode;
use crate::markdown::text::{longest_backtick_run, quote_lines};
use crate::markdown::{Converter, RenderCtx};
use indexmap::IndexMap;

/// Predicate deciding whether a rule applies to an element
pub enum Filter {
    /// Match a single tag name
    Tag(&'static str),
    /// Match any of several tag names
    Tags(&'static [&'static str]),
}

impl Filter {
    fn matches(&self, element: &ElementNode) -> bool {
        match self {
            Self::Tag(tag) => element.is_tag(tag),
            Self::Tags(tags) => tags.iter().any(|tag| element.is_tag(tag)),
        }
    }
}

/// Replacement function: converted children text + element + render context
pub type Replacement = fn(&str, &ElementNode, &RenderCtx<'_>, &Converter) -> String;

/// One conversion rule
pub struct Rule {
    pub filter: Filter,
    pub replacement: Replacement,
}

/// Ordered, read-only table of conversion rules
///
/// Insertion order is priority order; the table is built once at startup
/// and never mutated afterward.
pub struct RuleTable {
    rules: IndexMap<&'static str, Rule>,
}

impl RuleTable {
    /// Build the default rule set
    pub fn with_defaults() -> Self {
        let mut rules = IndexMap::new();

        let mut add = |name: &'static str, filter: Filter, replacement: Replacement| {
            rules.insert(name, Rule { filter, replacement });
        };

        add(
            "drop",
            Filter::Tags(&["script", "style", "noscript", "template"]),
            drop_rule,
        );
        add(
            "heading",
            Filter::Tags(&["h1", "h2", "h3", "h4", "h5", "h6"]),
            heading_rule,
        );
        add("paragraph", Filter::Tag("p"), paragraph_rule);
        add("line-break", Filter::Tag("br"), line_break_rule);
        add("horizontal-rule", Filter::Tag("hr"), horizontal_rule_rule);
        add("strong", Filter::Tags(&["strong", "b"]), strong_rule);
        add("emphasis", Filter::Tags(&["em", "i"]), emphasis_rule);
        add("code-block", Filter::Tag("pre"), code_block_rule);
        add("code-inline", Filter::Tag("code"), code_inline_rule);
        add("list", Filter::Tags(&["ul", "ol"]), list_rule);
        add("list-item", Filter::Tag("li"), list_item_rule);
        add("link", Filter::Tag("a"), link_rule);
        add("blockquote", Filter::Tag("blockquote"), blockquote_rule);
        add("table", Filter::Tag("table"), table_rule);

        Self { rules }
    }

    /// Find the first rule whose filter matches the element
    pub fn resolve(&self, element: &ElementNode) -> Option<&Rule> {
        self.rules.values().find(|rule| rule.filter.matches(element))
    }

    /// Number of registered rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn drop_rule(_content: &str, _el: &ElementNode, _ctx: &RenderCtx<'_>, _conv: &Converter) -> String {
    String::new()
}

fn heading_rule(content: &str, el: &ElementNode, _ctx: &RenderCtx<'_>, _conv: &Converter) -> String {
    let text = content.trim();
    if text.is_empty() {
        return String::new();
    }

    let level = el
        .tag_name
        .chars()
        .nth(1)
        .and_then(|c| c.to_digit(10))
        .unwrap_or(1)
        .clamp(1, 6) as usize;

    format!("\n\n{} {}\n\n", "#".repeat(level), text)
}

fn paragraph_rule(
    content: &str,
    _el: &ElementNode,
    _ctx: &RenderCtx<'_>,
    _conv: &Converter,
) -> String {
    let text = content.trim();
    if text.is_empty() {
        return String::new();
    }
    format!("\n\n{}\n\n", text)
}

fn line_break_rule(
    _content: &str,
    _el: &ElementNode,
    _ctx: &RenderCtx<'_>,
    _conv: &Converter,
) -> String {
    "\n".to_string()
}

fn horizontal_rule_rule(
    _content: &str,
    _el: &ElementNode,
    _ctx: &RenderCtx<'_>,
    _conv: &Converter,
) -> String {
    "\n\n---\n\n".to_string()
}

/// Wrap content in emphasis markers, keeping surrounding whitespace outside
/// the markers. Whitespace-only content emits no markers at all.
fn wrap_emphasis(content: &str, marker: &str) -> String {
    let core = content.trim();
    if core.is_empty() {
        return content.to_string();
    }

    let lead_len = content.len() - content.trim_start().len();
    let trail_len = content.len() - content.trim_end().len();
    let lead = &content[..lead_len];
    let trail = &content[content.len() - trail_len..];

    format!("{}{}{}{}{}", lead, marker, core, marker, trail)
}

fn strong_rule(content: &str, _el: &ElementNode, _ctx: &RenderCtx<'_>, _conv: &Converter) -> String {
    wrap_emphasis(content, "**")
}

fn emphasis_rule(
    content: &str,
    _el: &ElementNode,
    _ctx: &RenderCtx<'_>,
    _conv: &Converter,
) -> String {
    wrap_emphasis(content, "*")
}

fn code_inline_rule(
    content: &str,
    _el: &ElementNode,
    _ctx: &RenderCtx<'_>,
    _conv: &Converter,
) -> String {
    if content.is_empty() {
        return String::new();
    }

    // The delimiter must out-run any backtick run inside the content
    let fence = "`".repeat(longest_backtick_run(content) + 1);

    if content.starts_with('`') || content.ends_with('`') {
        format!("{fence} {content} {fence}")
    } else {
        format!("{fence}{content}{fence}")
    }
}

/// Language hint from a `language-*` class on the pre element or its code child
fn language_hint(el: &ElementNode) -> Option<String> {
    let class_of = |element: &ElementNode| {
        element.get_attribute("class").and_then(|classes| {
            classes
                .split_whitespace()
                .find_map(|c| c.strip_prefix("language-"))
                .map(str::to_string)
        })
    };

    class_of(el).or_else(|| el.child_elements().find(|c| c.is_tag("code")).and_then(class_of))
}

fn code_block_rule(
    _content: &str,
    el: &ElementNode,
    _ctx: &RenderCtx<'_>,
    _conv: &Converter,
) -> String {
    // Content is taken verbatim from the tree, bypassing escaping and
    // whitespace collapsing entirely
    let raw = el.text_content();
    if raw.trim().is_empty() {
        return String::new();
    }

    let fence_len = (longest_backtick_run(&raw) + 1).max(3);
    let fence = "`".repeat(fence_len);
    let lang = language_hint(el).unwrap_or_default();
    let body = raw.strip_suffix('\n').unwrap_or(&raw);

    format!("\n\n{fence}{lang}\n{body}\n{fence}\n\n")
}

fn list_rule(content: &str, _el: &ElementNode, ctx: &RenderCtx<'_>, _conv: &Converter) -> String {
    // Full trim: inter-tag whitespace in pretty-printed markup can leave a
    // stray space ahead of the first item marker
    let body = content.trim();
    if body.is_empty() {
        return String::new();
    }

    // A list nested inside a list item continues that item's line block;
    // a top-level list is its own block
    if ctx.parent.is_some_and(|p| p.is_tag("li")) {
        format!("\n{}", body)
    } else {
        format!("\n\n{}\n\n", body)
    }
}

fn list_item_rule(content: &str, _el: &ElementNode, ctx: &RenderCtx<'_>, _conv: &Converter) -> String {
    let body = content.trim();
    // Continuation lines (nested lists, wrapped blocks) indent one unit
    let body = body.replace('\n', "\n  ");

    let marker = match ctx.parent {
        Some(parent) if parent.is_tag("ol") => {
            let start: i64 = parent
                .get_attribute("start")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1);
            format!("{}. ", start + ctx.index as i64)
        }
        _ => "- ".to_string(),
    };

    format!("{}{}\n", marker, body)
}

fn link_rule(content: &str, el: &ElementNode, _ctx: &RenderCtx<'_>, _conv: &Converter) -> String {
    match el.get_attribute("href") {
        // href is taken verbatim from the source attribute
        Some(href) => format!("[{}]({})", content, href),
        None => content.to_string(),
    }
}

fn blockquote_rule(
    content: &str,
    _el: &ElementNode,
    _ctx: &RenderCtx<'_>,
    _conv: &Converter,
) -> String {
    let body = content.trim();
    if body.is_empty() {
        return String::new();
    }
    format!("\n\n{}\n\n", quote_lines(body))
}

/// Collect `tr` elements under a table in document order
fn collect_rows<'a>(el: &'a ElementNode, rows: &mut Vec<&'a ElementNode>) {
    for child in el.child_elements() {
        if child.is_tag("tr") {
            rows.push(child);
        } else if matches!(child.tag_name.as_str(), "thead" | "tbody" | "tfoot") {
            collect_rows(child, rows);
        }
    }
}

fn table_rule(_content: &str, el: &ElementNode, _ctx: &RenderCtx<'_>, conv: &Converter) -> String {
    let mut rows = Vec::new();
    collect_rows(el, &mut rows);
    if rows.is_empty() {
        return String::new();
    }

    let cells_per_row: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            row.child_elements()
                .filter(|c| c.is_tag("th") || c.is_tag("td"))
                .map(|cell| conv.render_cell(cell))
                .collect()
        })
        .collect();

    // Column count is the widest row; short rows are padded with empties
    let columns = cells_per_row.iter().map(Vec::len).max().unwrap_or(0);
    if columns == 0 {
        return String::new();
    }

    let render_row = |cells: &[String]| {
        let mut padded: Vec<&str> = cells.iter().map(String::as_str).collect();
        padded.resize(columns, "");
        format!("| {} |", padded.join(" | "))
    };

    let mut lines = Vec::with_capacity(cells_per_row.len() + 1);
    lines.push(render_row(&cells_per_row[0]));
    lines.push(format!("| {} |", vec!["---"; columns].join(" | ")));
    for cells in &cells_per_row[1..] {
        lines.push(render_row(cells));
    }

    format!("\n\n{}\n\n", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_default_rules() {
        let table = RuleTable::with_defaults();
        assert!(!table.is_empty());
        assert!(table.len() >= 14);
    }

    #[test]
    fn test_resolve_priority_order() {
        let table = RuleTable::with_defaults();

        // pre resolves to the code-block rule, not pass-through
        let pre = ElementNode::new("pre");
        assert!(table.resolve(&pre).is_some());

        // unknown elements resolve to nothing (caller falls back)
        let custom = ElementNode::new("model-response");
        assert!(table.resolve(&custom).is_none());
    }

    #[test]
    fn test_wrap_emphasis_moves_whitespace_out() {
        assert_eq!(wrap_emphasis(" word ", "**"), " **word** ");
        assert_eq!(wrap_emphasis("word", "*"), "*word*");
        // whitespace-only content emits no markers
        assert_eq!(wrap_emphasis("   ", "**"), "   ");
        assert_eq!(wrap_emphasis("", "**"), "");
    }

    #[test]
    fn test_language_hint_on_code_child() {
        let pre = ElementNode::new("pre").with_child(
            ElementNode::new("code")
                .with_attribute("class", "language-rust hljs")
                .with_text("fn main() {}"),
        );
        assert_eq!(language_hint(&pre).as_deref(), Some("rust"));

        let plain = ElementNode::new("pre").with_child(ElementNode::new("code").with_text("x"));
        assert_eq!(language_hint(&plain), None);
    }
}
