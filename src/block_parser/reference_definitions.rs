use regex::Regex;

use crate::token::Link;

/// `[label]: href "title"`, returning the consumed length, label and link.
pub(crate) fn try_parse_reference_definition<'a>(
    text: &'a str,
    rule: &Regex,
) -> Option<(usize, &'a str, Link)> {
    let caps = rule.captures(text)?;
    let label = caps.get(1)?.as_str();
    let link = Link {
        href: caps.get(2)?.as_str().to_string(),
        title: caps.get(3).map(|m| m.as_str().to_string()),
    };
    log::debug!("Parsed reference definition [{}] -> {}", label, link.href);
    Some((caps.get(0)?.end(), label, link))
}
