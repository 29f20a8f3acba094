//! Strong emphasis and emphasis, in the default and pedantic flavors.

use crate::utils::is_word_char;

/// Content between `delim` pairs.
///
/// With `strict` the content may neither start nor end with whitespace.
/// `forbid_after` rejects a closing delimiter directly followed by that
/// character, so `**a***` does not close early.
pub(crate) fn delimited<'a>(
    text: &'a str,
    delim: &str,
    strict: bool,
    forbid_after: Option<char>,
) -> Option<(usize, &'a str)> {
    let body = text.strip_prefix(delim)?;
    let first = body.chars().next()?;
    if strict && first.is_whitespace() {
        return None;
    }

    let mut end = first.len_utf8();
    loop {
        let content = &body[..end];
        let closes = body[end..].starts_with(delim)
            && !(strict && content.ends_with(char::is_whitespace))
            && forbid_after.is_none_or(|c| !body[end + delim.len()..].starts_with(c));
        if closes {
            return Some((end + 2 * delim.len(), content));
        }
        end += body[end..].chars().next()?.len_utf8();
    }
}

/// `__strong__` or `**strong**`.
pub(crate) fn try_parse_strong(text: &str, pedantic: bool) -> Option<(usize, &str)> {
    if text.starts_with("__") {
        delimited(text, "__", pedantic, Some('_'))
    } else if text.starts_with("**") {
        delimited(text, "**", pedantic, Some('*'))
    } else {
        None
    }
}

/// `_em_` or `*em*`.
pub(crate) fn try_parse_emphasis(text: &str, pedantic: bool) -> Option<(usize, &str)> {
    match (text.as_bytes().first(), pedantic) {
        (Some(b'_'), true) => delimited(text, "_", true, Some('_')),
        (Some(b'*'), true) => delimited(text, "*", true, Some('*')),
        (Some(b'_'), false) => underscore_emphasis(text),
        (Some(b'*'), false) => star_emphasis(text),
        _ => None,
    }
}

/// `_em_`: the content is made of non-underscore characters and `__` pairs,
/// and the closing underscore must not be followed by a word character.
fn underscore_emphasis(text: &str) -> Option<(usize, &str)> {
    let body = text.strip_prefix('_')?;
    let mut end = 0;
    loop {
        if body[end..].starts_with("__") {
            end += 2;
        } else {
            let c = body[end..].chars().next()?;
            if c == '_' {
                return None;
            }
            end += c.len_utf8();
        }

        if body[end..].starts_with('_') && !body[end + 1..].starts_with(is_word_char) {
            return Some((end + 2, &body[..end]));
        }
    }
}

/// `*em*`: the shortest content, read as `**` pairs or single characters,
/// that is followed by a lone `*`.
///
/// A `**` inside can be read either as a pair or as two characters, so the
/// candidate end positions form a graph; it is searched depth first, pairs
/// before single characters, each position visited once.
fn star_emphasis(text: &str) -> Option<(usize, &str)> {
    let body = text.strip_prefix('*')?;
    let closes_at = |p: usize| body[p..].starts_with('*') && !body[p + 1..].starts_with('*');
    let steps = |p: usize| -> Vec<usize> {
        let mut next = Vec::with_capacity(2);
        if let Some(c) = body[p..].chars().next() {
            next.push(p + c.len_utf8());
            if body[p..].starts_with("**") {
                next.push(p + 2);
            }
        }
        next
    };

    let mut visited = vec![false; body.len() + 1];
    // The first token is mandatory, so the search starts from its ends.
    let mut stack = steps(0);
    while let Some(p) = stack.pop() {
        if visited[p] {
            continue;
        }
        visited[p] = true;
        if closes_at(p) {
            return Some((p + 2, &body[..p]));
        }
        stack.extend(steps(p));
    }
    None
}

/// `~~strikethrough~~`.
pub(crate) fn try_parse_strikethrough(text: &str) -> Option<(usize, &str)> {
    delimited(text, "~~", true, None)
}
