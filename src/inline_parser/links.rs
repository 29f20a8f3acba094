//! Bracketed constructs: inline links and images, reference links, and
//! shortcut references.

use crate::grammar::InlineGrammar;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct InlineLink<'a> {
    pub len: usize,
    pub image: bool,
    pub text: &'a str,
    pub href: &'a str,
    pub title: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ReferenceLink<'a> {
    pub len: usize,
    pub image: bool,
    pub text: &'a str,
    /// Label to look up; the bracketed text itself when the second pair of
    /// brackets is empty or absent.
    pub label: &'a str,
}

/// `[` or `![`, returning whether it is an image and where the text starts.
fn opening(text: &str) -> Option<(bool, usize)> {
    if text.starts_with("![") {
        Some((true, 2))
    } else if text.starts_with('[') {
        Some((false, 1))
    } else {
        None
    }
}

fn next_bracket(s: &str) -> Option<u8> {
    s.bytes().find(|&b| b == b'[' || b == b']')
}

/// Every offset at which the bracketed text starting at `inner` may end,
/// shortest first.
///
/// The text is read as balanced `[...]` groups (no nested `]`) and plain
/// characters. With `allow_stray_close`, a `]` that is followed by another
/// `]` before any `[` also counts as text.
fn text_ends(inner: &str, allow_stray_close: bool) -> Vec<usize> {
    let bytes = inner.as_bytes();
    let mut ends = vec![0];
    let mut p = 0;
    while p < inner.len() {
        let len = match bytes[p] {
            b'[' => match inner[p + 1..].find(']') {
                Some(i) => i + 2,
                None => break,
            },
            b']' if allow_stray_close && next_bracket(&inner[p + 1..]) == Some(b']') => 1,
            b']' => break,
            _ => inner[p..].chars().next().map_or(1, char::len_utf8),
        };
        p += len;
        ends.push(p);
    }
    ends
}

/// `[text](href "title")` or `![alt](src "title")`.
pub(crate) fn try_parse_inline_link<'a>(text: &'a str, g: &InlineGrammar) -> Option<InlineLink<'a>> {
    let (image, start) = opening(text)?;
    let inner = &text[start..];
    text_ends(inner, true)
        .into_iter()
        .rev()
        .filter(|&end| inner[end..].starts_with(']'))
        .find_map(|end| {
            let caps = g.link_tail.captures(&inner[end..])?;
            Some(InlineLink {
                len: start + end + caps.get(0)?.end(),
                image,
                text: &inner[..end],
                href: caps.get(1).map_or("", |m| m.as_str()),
                title: caps.get(2).map(|m| m.as_str()),
            })
        })
}

/// `[text][label]`, `[text] [label]` or `[text][]`.
pub(crate) fn try_parse_reference_link<'a>(
    text: &'a str,
    g: &InlineGrammar,
) -> Option<ReferenceLink<'a>> {
    let (image, start) = opening(text)?;
    let inner = &text[start..];
    text_ends(inner, true)
        .into_iter()
        .rev()
        .filter(|&end| inner[end..].starts_with(']'))
        .find_map(|end| {
            let caps = g.reflink_tail.captures(&inner[end..])?;
            let link_text = &inner[..end];
            let label = caps.get(1).map_or("", |m| m.as_str());
            Some(ReferenceLink {
                len: start + end + caps.get(0)?.end(),
                image,
                text: link_text,
                label: if label.is_empty() { link_text } else { label },
            })
        })
}

/// `[label]` on its own.
pub(crate) fn try_parse_shortcut_reference(text: &str) -> Option<ReferenceLink<'_>> {
    let (image, start) = opening(text)?;
    let inner = &text[start..];
    let end = *text_ends(inner, false).last()?;
    if !inner[end..].starts_with(']') {
        return None;
    }
    Some(ReferenceLink {
        len: start + end + 1,
        image,
        text: &inner[..end],
        label: &inner[..end],
    })
}
