//! Raw HTML blocks: comments, element blocks closed by a matching end tag,
//! and lone opening tags.

use crate::utils::is_word_char;

/// Elements that never open an HTML block.
const INLINE_ELEMENTS: &[&str] = &[
    "a", "em", "strong", "small", "s", "cite", "q", "dfn", "abbr", "data", "time", "code", "var",
    "samp", "kbd", "sub", "sup", "i", "b", "u", "mark", "ruby", "rt", "rp", "bdi", "bdo", "span",
    "br", "wbr", "ins", "del", "img",
];

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HtmlBlock<'a> {
    pub len: usize,
    /// Element name when the block is an element closed by its end tag.
    pub tag: Option<&'a str>,
}

fn word_len(s: &str) -> usize {
    s.len() - s.trim_start_matches(is_word_char).len()
}

fn is_all_whitespace(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

/// Name of a block-level element at the start of `after_lt`, the text right
/// after a `<`. URLs (`<http://...`) and e-mail addresses are rejected.
pub(crate) fn block_tag_name(after_lt: &str) -> Option<&str> {
    let len = word_len(after_lt);
    if len == 0 {
        return None;
    }
    let name = &after_lt[..len];
    if INLINE_ELEMENTS.contains(&name) {
        return None;
    }
    let rest = &after_lt[len..];
    if rest.starts_with(":/") {
        return None;
    }
    let punct = rest
        .find(|c: char| is_word_char(c) || c.is_whitespace() || c == '@')
        .unwrap_or(rest.len());
    if rest[punct..].starts_with('@') {
        return None;
    }
    Some(name)
}

/// True when `line` opens with a block-level tag and so ends a paragraph.
pub(crate) fn starts_block_tag(line: &str) -> bool {
    line.strip_prefix('<').and_then(block_tag_name).is_some()
}

fn skip_spaces(text: &str, at: usize) -> usize {
    at + (text[at..].len() - text[at..].trim_start_matches(' ').len())
}

/// Trailer of a comment: spaces, then a single newline or only whitespace
/// up to the end.
fn comment_tail(text: &str, at: usize) -> Option<usize> {
    let p = skip_spaces(text, at);
    if text[p..].starts_with('\n') {
        Some(p + 1)
    } else if is_all_whitespace(&text[p..]) {
        Some(text.len())
    } else {
        None
    }
}

/// Trailer of an element: spaces, then a blank line (all newlines taken)
/// or only whitespace up to the end.
fn block_tail(text: &str, at: usize) -> Option<usize> {
    let p = skip_spaces(text, at);
    let newlines = text[p..].len() - text[p..].trim_start_matches('\n').len();
    if newlines >= 2 {
        Some(p + newlines)
    } else if is_all_whitespace(&text[p..]) {
        Some(text.len())
    } else {
        None
    }
}

fn try_comment(text: &str, start: usize) -> Option<usize> {
    let body = start + "<!--".len();
    if !text[start..].starts_with("<!--") {
        return None;
    }
    text[body..]
        .match_indices("-->")
        .find_map(|(i, _)| comment_tail(text, body + i + 3))
}

fn try_closed(text: &str, start: usize) -> Option<(usize, &str)> {
    let name = text[start..].strip_prefix('<').and_then(block_tag_name)?;
    let after_name = start + 1 + name.len();
    // At least one character of content before the end tag.
    let first = text[after_name..].chars().next()?;
    let search = after_name + first.len_utf8();
    let end_tag = format!("</{name}>");
    text[search..]
        .match_indices(end_tag.as_str())
        .find_map(|(i, _)| block_tail(text, search + i + end_tag.len()))
        .map(|len| (len, name))
}

fn try_closing(text: &str, start: usize) -> Option<usize> {
    let name = text[start..].strip_prefix('<').and_then(block_tag_name)?;
    let mut p = start + 1 + name.len();
    loop {
        let c = text[p..].chars().next()?;
        match c {
            '>' => return block_tail(text, p + 1),
            '"' | '\'' => {
                let close = text[p + 1..].find(c)?;
                p += close + 2;
            }
            _ => p += c.len_utf8(),
        }
    }
}

pub(crate) fn try_parse_html_block(text: &str) -> Option<HtmlBlock<'_>> {
    let start = skip_spaces(text, 0);
    if !text[start..].starts_with('<') {
        return None;
    }

    let block = if let Some(len) = try_comment(text, start) {
        HtmlBlock { len, tag: None }
    } else if let Some((len, name)) = try_closed(text, start) {
        HtmlBlock {
            len,
            tag: Some(name),
        }
    } else {
        HtmlBlock {
            len: try_closing(text, start)?,
            tag: None,
        }
    };
    log::debug!("Parsed HTML block ({} bytes, tag {:?})", block.len, block.tag);
    Some(block)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_element_block() {
        let text = "<div>\n*hi*\n</div>\n\nafter";
        let block = try_parse_html_block(text).unwrap();
        assert_eq!(block.tag, Some("div"));
        assert_eq!(&text[..block.len], "<div>\n*hi*\n</div>\n\n");
    }

    #[test]
    fn closed_element_needs_blank_line_or_end() {
        let text = "<div>a</div> tail\n\n";
        // The element form fails, the lone opening tag form fails too.
        assert_eq!(try_parse_html_block(text), None);
        let block = try_parse_html_block("<pre>x</pre>").unwrap();
        assert_eq!(block.tag, Some("pre"));
        assert_eq!(block.len, "<pre>x</pre>".len());
    }

    #[test]
    fn comment_takes_one_newline() {
        let text = "<!-- note -->\n\nrest";
        let block = try_parse_html_block(text).unwrap();
        assert_eq!(block.len, "<!-- note -->\n".len());
        assert_eq!(block.tag, None);
    }

    #[test]
    fn lone_opening_tag_with_quoted_attribute() {
        let text = "<hr class=\"a>b\">\n\nnext";
        let block = try_parse_html_block(text).unwrap();
        assert_eq!(&text[..block.len], "<hr class=\"a>b\">\n\n");
    }

    #[test]
    fn inline_elements_and_addresses_are_not_blocks() {
        assert_eq!(try_parse_html_block("<span>x</span>\n\n"), None);
        assert_eq!(block_tag_name("http://example.com>"), None);
        assert_eq!(block_tag_name("me@example.com>"), None);
        assert_eq!(block_tag_name("aside>"), Some("aside"));
    }

    #[test]
    fn paragraph_interrupt_needs_tag_at_line_start() {
        assert!(starts_block_tag("<table>"));
        assert!(!starts_block_tag(" <table>"));
        assert!(!starts_block_tag("<em>"));
    }
}
