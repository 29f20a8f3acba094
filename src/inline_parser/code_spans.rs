//! Parsing for inline code spans (`code`)

/// Try to parse a code span at the start of `text`.
///
/// The closing run must have exactly as many backticks as the opening one,
/// and the content must end with a character other than a backtick. When
/// the full opening run finds no partner, shorter runs are tried, leaving
/// the extra backticks as content.
///
/// Returns the bytes consumed and the untrimmed content.
pub(crate) fn try_parse_code_span(text: &str) -> Option<(usize, &str)> {
    let run = text.bytes().take_while(|&b| b == b'`').count();
    if run == 0 {
        return None;
    }
    (1..=run).rev().find_map(|n| match_code_span(text, n))
}

fn match_code_span(text: &str, n: usize) -> Option<(usize, &str)> {
    let bytes = text.as_bytes();
    let mut end = n + text[n..].chars().next()?.len_utf8();
    loop {
        if bytes[end - 1] != b'`'
            && text[end..].bytes().take_while(|&b| b == b'`').count() == n
        {
            return Some((end + n, &text[n..end]));
        }
        end += text[end..].chars().next()?.len_utf8();
    }
}
