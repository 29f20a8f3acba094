//! ATX (`# Title`) and setext (`Title\n===`) headings.

use regex::Regex;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Heading<'a> {
    pub depth: usize,
    pub text: &'a str,
    pub len: usize,
}

pub(crate) fn try_parse_atx_heading<'a>(text: &'a str, rule: &Regex) -> Option<Heading<'a>> {
    let caps = rule.captures(text)?;
    let heading = Heading {
        depth: caps.get(1)?.len(),
        text: caps.get(2)?.as_str(),
        len: caps.get(0)?.end(),
    };
    log::debug!("Parsed ATX heading level {}", heading.depth);
    Some(heading)
}

pub(crate) fn try_parse_setext_heading<'a>(text: &'a str, rule: &Regex) -> Option<Heading<'a>> {
    let caps = rule.captures(text)?;
    let depth = if caps.get(2)?.as_str() == "=" { 1 } else { 2 };
    log::debug!("Parsed setext heading level {}", depth);
    Some(Heading {
        depth,
        text: caps.get(1)?.as_str(),
        len: caps.get(0)?.end(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{BlockDialect, BlockGrammar};

    #[test]
    fn atx_strips_closing_hashes() {
        let g = BlockGrammar::get(BlockDialect::Gfm);
        let h = try_parse_atx_heading("## Title ##\n\nbody", &g.heading).unwrap();
        assert_eq!(h.depth, 2);
        assert_eq!(h.text, "Title");
        assert_eq!(h.len, "## Title ##\n\n".len());
    }

    #[test]
    fn seven_hashes_is_not_a_heading() {
        let g = BlockGrammar::get(BlockDialect::Gfm);
        assert!(try_parse_atx_heading("####### x", &g.heading).is_none());
    }

    #[test]
    fn setext_levels() {
        let g = BlockGrammar::get(BlockDialect::Base);
        assert_eq!(try_parse_setext_heading("A\n===\n", &g.lheading).unwrap().depth, 1);
        assert_eq!(try_parse_setext_heading("B\n--\n", &g.lheading).unwrap().depth, 2);
    }
}
