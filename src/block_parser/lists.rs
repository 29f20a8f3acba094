//! Lists: finding where a list ends, splitting it into items and deciding
//! which items are loose.

use std::sync::LazyLock;

use regex::Regex;

use crate::grammar::BlockGrammar;

static ITEM_BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ *([*+-]|\d+\.) +").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ListMatch<'a> {
    pub indent: &'a str,
    pub bullet: &'a str,
    pub len: usize,
}

impl ListMatch<'_> {
    pub fn ordered(&self) -> bool {
        self.bullet.len() > 1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ListItem {
    /// Item content with the bullet removed and continuation lines outdented.
    pub body: String,
    pub loose: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ListItems {
    pub items: Vec<ListItem>,
    /// Bytes of the list actually used. Shorter than the match when a
    /// change of bullet kind starts a new list.
    pub len: usize,
}

/// Bullet at the start of `text`, when followed by a space.
fn bullet_at<'a>(text: &'a str, g: &BlockGrammar) -> Option<&'a str> {
    let m = g.bullet.find(text)?;
    text[m.end()..].starts_with(' ').then(|| m.as_str())
}

fn starts_item(line: &str, indent: &str, g: &BlockGrammar) -> bool {
    line.strip_prefix(indent)
        .is_some_and(|rest| bullet_at(rest, g).is_some())
}

/// Three or more of `-`, `*`, `_` (spaces allowed between) ending the line.
fn hr_run(s: &str) -> bool {
    let mut count = 0;
    let mut rest = s;
    while let Some(r) = rest.strip_prefix(['-', '*', '_']) {
        count += 1;
        rest = r.trim_start_matches(' ');
    }
    count >= 3 && (rest.is_empty() || rest.starts_with('\n'))
}

fn hr_follows(next: &str, indent: &str) -> bool {
    next.strip_prefix(indent).is_some_and(hr_run) || hr_run(next)
}

/// Match a list at the start of `text`.
///
/// The list runs until a thematic break or link definition on a following
/// line, a blank line not followed by indented text or another item at the
/// same indentation, two or more blank lines, or the end of the input.
pub(crate) fn try_parse_list<'a>(text: &'a str, g: &BlockGrammar) -> Option<ListMatch<'a>> {
    let caps = g.list_head.captures(text)?;
    let indent = caps.get(1)?.as_str();
    let bullet = caps.get(2)?.as_str();
    let head_end = caps.get(0)?.end();
    let first = text[head_end..].chars().next()?;

    let content_end = text.trim_end().len();
    let mut p = head_end + first.len_utf8();
    let len = loop {
        if text[p..].starts_with('\n') {
            let newlines = text[p..].len() - text[p..].trim_start_matches('\n').len();
            let q = p + newlines;
            let next = &text[q..];
            let blank_ends = newlines >= 3
                || (newlines == 2 && !next.starts_with(' ') && !starts_item(next, indent, g));
            if hr_follows(next, indent) || g.def.is_match(next) || blank_ends {
                break q;
            }
        }
        if p >= content_end {
            break text.len();
        }
        match text[p..].chars().next() {
            Some(c) => p += c.len_utf8(),
            None => break text.len(),
        }
    };

    log::debug!("Parsed list with bullet {:?} ({} bytes)", bullet, len);
    Some(ListMatch {
        indent,
        bullet,
        len,
    })
}

/// True when `text` opens a list. Used to end a paragraph in GFM.
pub(crate) fn starts_list(text: &str, g: &BlockGrammar) -> bool {
    try_parse_list(text, g).is_some()
}

/// Raw items with their byte offsets. An item continues until a line that
/// starts with the list indentation followed by a bullet.
fn split_raw_items<'a>(list: &'a str, indent: &str, g: &BlockGrammar) -> Vec<(usize, &'a str)> {
    let mut items = Vec::new();
    let mut start = 0;
    for (i, _) in list.match_indices('\n') {
        let line_start = i + 1;
        if starts_item(&list[line_start..], indent, g) {
            items.push((start, &list[start..i]));
            start = line_start;
        }
    }
    items.push((start, &list[start..]));
    items
}

fn outdent(text: &str, width: usize) -> String {
    text.split('\n')
        .map(|line| {
            let spaces = line.len() - line.trim_start_matches(' ').len();
            &line[spaces.min(width)..]
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A blank line with more content after it.
fn has_inner_blank_line(body: &str) -> bool {
    body.find("\n\n")
        .is_some_and(|i| !body[i + 2..].chars().all(char::is_whitespace))
}

/// Split a matched list into item bodies ready for recursive tokenizing.
pub(crate) fn split_list_items(
    list: &str,
    head: &ListMatch<'_>,
    g: &BlockGrammar,
    pedantic: bool,
    smart_lists: bool,
) -> ListItems {
    let raw_items = split_raw_items(list, head.indent, g);
    let mut len = list.len();
    let mut last = raw_items.len() - 1;
    let mut items = Vec::with_capacity(raw_items.len());
    let mut next = false;

    for (i, &(_, raw)) in raw_items.iter().enumerate() {
        let mut body = ITEM_BULLET_RE.replace(raw, "").into_owned();
        if body.contains("\n ") {
            let width = if pedantic { 4 } else { raw.len() - body.len() };
            body = outdent(&body, width);
        }

        if smart_lists && i < last {
            let (offset, next_raw) = raw_items[i + 1];
            let next_bullet = g
                .bullet
                .find(next_raw.trim_start_matches(' '))
                .map_or("", |m| m.as_str());
            if head.bullet != next_bullet && !(head.bullet.len() > 1 && next_bullet.len() > 1) {
                log::debug!("Bullet changed to {:?}, starting a new list", next_bullet);
                len = offset;
                last = i;
            }
        }

        let mut loose = next || has_inner_blank_line(&body);
        if i != last {
            next = body.ends_with('\n');
            loose |= next;
        }
        items.push(ListItem { body, loose });

        if i == last {
            break;
        }
    }

    ListItems { items, len }
}
