//! Indented and fenced code blocks.

use regex::Regex;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FencedCode<'a> {
    pub lang: Option<&'a str>,
    pub content: &'a str,
    /// Bytes consumed, including the closing fence and trailing newlines.
    pub len: usize,
}

/// Indented code: the matched block with four columns removed from each line.
pub(crate) fn try_parse_indented_code(text: &str, rule: &Regex, pedantic: bool) -> Option<(usize, String)> {
    let m = rule.find(text)?;
    log::debug!("Parsed indented code block ({} bytes)", m.end());

    let code = m
        .as_str()
        .split('\n')
        .map(|line| line.strip_prefix("    ").unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n");
    let code = if pedantic {
        code
    } else {
        code.trim_end_matches('\n').to_string()
    };
    Some((m.end(), code))
}

/// Fenced code with ``` or ~~~, closed by the same fence string.
///
/// When the opening run is longer than three characters and no closing fence
/// of that exact length exists, shorter fences are tried, the extra fence
/// characters then becoming part of the info string.
pub(crate) fn try_parse_fenced_code(text: &str) -> Option<FencedCode<'_>> {
    let indent = text.len() - text.trim_start_matches(' ').len();
    let fence_char = text[indent..]
        .chars()
        .next()
        .filter(|&c| c == '`' || c == '~')?;
    let run = text[indent..].chars().take_while(|&c| c == fence_char).count();
    if run < 3 {
        return None;
    }

    (3..=run)
        .rev()
        .find_map(|n| match_fence(text, indent, fence_char, n))
}

fn match_fence(text: &str, indent: usize, fence_char: char, n: usize) -> Option<FencedCode<'_>> {
    let info_start = indent + n;
    let line_end = info_start + text[info_start..].find('\n')?;
    let lang = text[info_start..line_end]
        .trim_start_matches([' ', '.'])
        .trim_end_matches(' ');
    if lang.chars().any(char::is_whitespace) {
        return None;
    }

    let fence: String = std::iter::repeat_n(fence_char, n).collect();
    let content_start = line_end + 1;
    let mut q = content_start;
    loop {
        let here = &text[q..];
        let starts_candidate = here
            .chars()
            .next()
            .is_none_or(|c| c.is_whitespace() || c == fence_char);
        if starts_candidate {
            let after_ws = text.len() - here.trim_start().len();
            if text[after_ws..].starts_with(&fence) {
                let after_fence = after_ws + n;
                let spaces = text[after_fence..].len() - text[after_fence..].trim_start_matches(' ').len();
                let tail = after_fence + spaces;
                let newlines = text[tail..].len() - text[tail..].trim_start_matches('\n').len();
                if newlines > 0 || tail == text.len() {
                    log::debug!("Parsed fenced code block with fence {:?}", fence);
                    return Some(FencedCode {
                        lang: (!lang.is_empty()).then_some(lang),
                        content: &text[content_start..q],
                        len: tail + newlines,
                    });
                }
            }
        }
        match here.chars().next() {
            Some(c) => q += c.len_utf8(),
            None => return None,
        }
    }
}
