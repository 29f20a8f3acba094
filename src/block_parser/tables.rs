//! Pipe tables, with and without a leading pipe.

use regex::Captures;

use crate::token::{Align, Token};

/// Map an alignment cell (`:--`, `--:`, `:-:`, `---`) to its alignment.
pub(crate) fn parse_align(cell: &str) -> Option<Align> {
    let t = cell.trim_matches(' ');
    let inner = t.strip_prefix(':').unwrap_or(t);
    let inner = inner.strip_suffix(':').unwrap_or(inner);
    if inner.is_empty() || !inner.bytes().all(|b| b == b'-') {
        return None;
    }
    match (t.starts_with(':'), t.ends_with(':')) {
        (true, true) => Some(Align::Center),
        (true, false) => Some(Align::Left),
        (false, true) => Some(Align::Right),
        (false, false) => None,
    }
}

fn is_escaped(row: &str, at: usize) -> bool {
    row[..at].ends_with('\\')
}

/// Split a row on unescaped pipes, dropping the spaces around each pipe.
pub(crate) fn split_cells(row: &str) -> Vec<String> {
    let mut raw = Vec::new();
    let mut start = 0;
    for (i, c) in row.char_indices() {
        if c == '|' && !is_escaped(row, i) {
            raw.push(&row[start..i]);
            start = i + 1;
        }
    }
    raw.push(&row[start..]);

    let last = raw.len() - 1;
    raw.iter()
        .enumerate()
        .map(|(i, cell)| {
            let mut cell = *cell;
            if i > 0 {
                cell = cell.trim_start_matches(' ');
            }
            if i < last {
                cell = cell.trim_end_matches(' ');
            }
            cell.to_string()
        })
        .collect()
}

fn trim_leading_pipe(row: &str) -> &str {
    let t = row.trim_start_matches(' ');
    match t.strip_prefix('|') {
        Some(body) => body.trim_start_matches(' '),
        None => row,
    }
}

fn trim_trailing_pipe(row: &str) -> &str {
    let t = row.trim_end_matches(' ');
    match t.strip_suffix('|') {
        Some(body) if !body.ends_with('\\') => body.trim_end_matches(' '),
        _ => row,
    }
}

fn header_cells(raw: &str) -> Vec<String> {
    split_cells(trim_trailing_pipe(raw.trim_start_matches(' ')))
}

fn align_cells(raw: &str) -> Vec<Option<Align>> {
    split_cells(trim_trailing_pipe(raw.trim_start_matches(' ')))
        .iter()
        .map(|cell| parse_align(cell))
        .collect()
}

fn body_lines(raw: &str) -> impl Iterator<Item = &str> {
    let raw = raw.strip_suffix('\n').unwrap_or(raw);
    raw.split('\n').filter(|line| !line.is_empty())
}

/// Build a table token from a match of the rule without leading pipes.
pub(crate) fn build_nptable(caps: &Captures) -> Token {
    let cells = caps
        .get(3)
        .map(|m| body_lines(m.as_str()).map(split_cells).collect())
        .unwrap_or_default();
    log::debug!("Parsed table without leading pipe");
    Token::Table {
        header: header_cells(&caps[1]),
        align: align_cells(&caps[2]),
        cells,
    }
}

/// Build a table token from a match of the rule with leading pipes.
pub(crate) fn build_table(caps: &Captures) -> Token {
    let cells = caps
        .get(3)
        .map(|m| {
            body_lines(m.as_str())
                .map(|line| split_cells(trim_trailing_pipe(trim_leading_pipe(line))))
                .collect()
        })
        .unwrap_or_default();
    log::debug!("Parsed table with leading pipe");
    Token::Table {
        header: header_cells(&caps[1]),
        align: align_cells(&caps[2]),
        cells,
    }
}
