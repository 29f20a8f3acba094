/// Match a paragraph: consecutive non-empty lines, stopping before a line on
/// which `interrupts` reports another block starting.
///
/// Returns the bytes consumed (including trailing newlines) and the matched
/// group. The group keeps its final newline when the paragraph ended at a
/// blank line rather than at an interrupting block.
pub(crate) fn try_parse_paragraph(
    text: &str,
    interrupts: impl Fn(&str) -> bool,
) -> Option<(usize, &str)> {
    if text.is_empty() || text.starts_with('\n') {
        return None;
    }

    let mut end = 0;
    loop {
        let line_end = text[end..].find('\n').map_or(text.len(), |i| end + i);
        if line_end == text.len() {
            end = line_end;
            break;
        }
        let next_line = line_end + 1;
        if interrupts(&text[next_line..]) {
            end = line_end;
            break;
        }
        end = next_line;
        if text[end..].is_empty() || text[end..].starts_with('\n') {
            break;
        }
    }

    let newlines = text[end..].len() - text[end..].trim_start_matches('\n').len();
    log::debug!("Parsed paragraph ({} bytes)", end + newlines);
    Some((end + newlines, &text[..end]))
}
