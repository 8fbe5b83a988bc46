//! Text-level helpers for the converter: escaping, whitespace collapsing,
//! and fence sizing.

/// Characters that would be misread as Markdown markup in plain text
const ESCAPED: &[char] = &['\\', '`', '*', '_', '[', ']'];

/// Escape markup-significant characters with a backslash
///
/// Applied to text nodes outside verbatim contexts only; code content is
/// never escaped.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if ESCAPED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Collapse every run of whitespace (including newlines) to a single space
///
/// Rendered HTML treats inter-word whitespace as a single separator; after
/// this pass a text node never contains a newline, which the block-joining
/// logic relies on.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push(' ');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Length of the longest run of backticks in `text`
///
/// A fence enclosing `text` must be strictly longer than this.
pub fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Prefix every line of `text` with `> `
pub fn quote_lines(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markup_characters() {
        assert_eq!(escape("a*b_c`d"), "a\\*b\\_c\\`d");
        assert_eq!(escape("[link]"), "\\[link\\]");
        assert_eq!(escape("back\\slash"), "back\\\\slash");
        assert_eq!(escape("plain text"), "plain text");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a  b"), "a b");
        assert_eq!(collapse_whitespace("a\n\t b"), "a b");
        assert_eq!(collapse_whitespace("  a  "), " a ");
        assert_eq!(collapse_whitespace("\n\n"), " ");
    }

    #[test]
    fn test_longest_backtick_run() {
        assert_eq!(longest_backtick_run("no ticks"), 0);
        assert_eq!(longest_backtick_run("a `b` c"), 1);
        assert_eq!(longest_backtick_run("a ``b`` c"), 2);
        assert_eq!(longest_backtick_run("```"), 3);
        assert_eq!(longest_backtick_run("`` ```"), 3);
    }

    #[test]
    fn test_quote_lines() {
        assert_eq!(quote_lines("one\ntwo"), "> one\n> two");
        assert_eq!(quote_lines("one\n\ntwo"), "> one\n>\n> two");
    }
}
