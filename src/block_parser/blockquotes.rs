use std::sync::LazyLock;

use regex::Regex;

static QUOTE_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^ *> ?").unwrap());

/// Match a blockquote and return its length and the body with the `>`
/// markers removed from every line.
pub(crate) fn try_parse_blockquote(text: &str, rule: &Regex) -> Option<(usize, String)> {
    let m = rule.find(text)?;
    log::debug!("Parsed blockquote ({} bytes)", m.end());
    let body = QUOTE_MARKER_RE.replace_all(m.as_str(), "").into_owned();
    Some((m.end(), body))
}
