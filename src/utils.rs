use std::sync::LazyLock;

use regex::{Captures, Regex};

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9A-Fa-f]+|[A-Za-z0-9_]+);?").unwrap()
});

static OPENING_SINGLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(^|[-\x{2014}/(\[{"\s])'"#).unwrap());

static OPENING_DOUBLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(^|[-\x{2014}/(\[{\x{2018}\s])""#).unwrap());

/// ASCII word character, the `\w` class the grammar is written against.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// True when `rest` (the text right after an `&`) already forms an entity
/// such as `amp;`, `#39;` or `#x27;`.
fn starts_entity(rest: &str) -> bool {
    let body = rest.strip_prefix('#').unwrap_or(rest);
    let word_len = body.chars().take_while(|&c| is_word_char(c)).count();
    word_len > 0 && body[word_len..].starts_with(';')
}

/// Escape `&`, `<`, `>`, `"` and `'` for HTML output.
///
/// With `encode` set every ampersand is escaped; otherwise ampersands that
/// already start an entity are left alone so escaping stays idempotent.
pub fn escape(html: &str, encode: bool) -> String {
    let mut out = String::with_capacity(html.len() + html.len() / 8);
    for (i, c) in html.char_indices() {
        match c {
            '&' if !encode && starts_entity(&html[i + 1..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Decode numeric entities, `&colon;` and the named entities [`escape`]
/// produces. Unknown named entities are kept as written.
pub fn unescape(html: &str) -> String {
    ENTITY_RE
        .replace_all(html, |caps: &Captures| {
            let name = caps[1].to_ascii_lowercase();
            if let Some(hex) = name.strip_prefix("#x") {
                return decode_code_point(u32::from_str_radix(hex, 16).ok());
            }
            if let Some(dec) = name.strip_prefix('#') {
                return decode_code_point(dec.parse::<u32>().ok());
            }
            match name.as_str() {
                "colon" => ":".to_string(),
                "amp" => "&".to_string(),
                "lt" => "<".to_string(),
                "gt" => ">".to_string(),
                "quot" => "\"".to_string(),
                "apos" => "'".to_string(),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn decode_code_point(value: Option<u32>) -> String {
    value
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
        .to_string()
}

/// Encode every character of `text` as a numeric character reference,
/// picking hexadecimal or decimal form at random per character.
pub fn mangle(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 6);
    for c in text.chars() {
        if rand::random::<bool>() {
            out.push_str(&format!("&#x{:x};", c as u32));
        } else {
            out.push_str(&format!("&#{};", c as u32));
        }
    }
    out
}

/// Typographic substitutions for dashes, quotes and ellipses.
pub fn smartypants(text: &str) -> String {
    let text = text.replace("---", "\u{2014}").replace("--", "\u{2013}");
    let text = OPENING_SINGLE_RE.replace_all(&text, "${1}\u{2018}");
    let text = text.replace('\'', "\u{2019}");
    let text = OPENING_DOUBLE_RE.replace_all(&text, "${1}\u{201c}");
    text.replace('"', "\u{201d}").replace("...", "\u{2026}")
}

/// Heading id: lowercased, with every run of non-word characters collapsed
/// into a single hyphen.
pub fn slugify(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_gap = false;
    for c in raw.to_lowercase().chars() {
        if is_word_char(c) {
            out.push(c);
            in_gap = false;
        } else if !in_gap {
            out.push('-');
            in_gap = true;
        }
    }
    out
}

/// Collapse whitespace runs and lowercase, so `[Foo  Bar]` and `[foo bar]`
/// resolve to the same reference definition.
pub fn normalize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut in_space = false;
    for c in label.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.extend(c.to_lowercase());
            in_space = false;
        }
    }
    out
}
