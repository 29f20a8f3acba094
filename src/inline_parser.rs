use crate::MAX_NESTING;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::grammar::InlineGrammar;
use crate::renderer::Renderer;
use crate::token::{Link, Links};
use crate::utils;

mod code_spans;
mod emphasis;
mod links;

use code_spans::try_parse_code_span;
use emphasis::{try_parse_emphasis, try_parse_strikethrough, try_parse_strong};
use links::{try_parse_inline_link, try_parse_reference_link, try_parse_shortcut_reference};

/// Renders the inline constructs of a text span.
///
/// One parser serves a whole document: it holds the link table for
/// reference lookups and tracks whether the cursor is inside link text,
/// where nested links are not recognized.
pub struct InlineParser<'a> {
    config: &'a Config,
    grammar: &'static InlineGrammar,
    links: &'a Links,
    renderer: &'a dyn Renderer,
    in_link: bool,
    depth: usize,
}

/// A hard break: enough spaces, a newline, and more content afterwards.
fn try_parse_hard_break(text: &str, min_spaces: usize) -> Option<usize> {
    let spaces = text.len() - text.trim_start_matches(' ').len();
    if spaces < min_spaces || !text[spaces..].starts_with('\n') {
        return None;
    }
    let end = spaces + 1;
    (!text[end..].chars().all(char::is_whitespace)).then_some(end)
}

impl<'a> InlineParser<'a> {
    pub fn new(config: &'a Config, links: &'a Links, renderer: &'a dyn Renderer) -> Self {
        Self {
            config,
            grammar: InlineGrammar::for_config(config),
            links,
            renderer,
            in_link: false,
            depth: 0,
        }
    }

    /// Render `src` completely.
    pub fn output(&mut self, src: &str) -> Result<String> {
        if self.depth >= MAX_NESTING {
            return Err(Error::NestingTooDeep { limit: MAX_NESTING });
        }
        self.depth += 1;
        let out = self.output_span(src);
        self.depth -= 1;
        out
    }

    fn output_span(&mut self, src: &str) -> Result<String> {
        let mut out = String::new();
        let mut rest = src;
        while !rest.is_empty() {
            let consumed = self.output_next(rest, &mut out)?;
            rest = &rest[consumed..];
        }
        Ok(out)
    }

    /// Render the construct at the start of `text` into `out`, returning
    /// the bytes consumed.
    fn output_next(&mut self, text: &str, out: &mut String) -> Result<usize> {
        let g = self.grammar;
        let config = self.config;
        let links = self.links;

        if let Some(caps) = g.escape.captures(text) {
            log::trace!("escape {:?}", &caps[1]);
            out.push_str(&caps[1]);
            return Ok(caps[0].len());
        }

        if let Some(caps) = g.autolink.captures(text) {
            log::trace!("autolink {:?}", &caps[1]);
            if self.in_link {
                out.push_str(&self.renderer.text(&config.escape(&caps[0], false)));
            } else if &caps[2] == "@" {
                let address = match caps[1].char_indices().nth(6) {
                    Some((i, ':')) => &caps[1][i + 1..],
                    _ => &caps[1],
                };
                let text = config.escape(&self.mangle(address), false);
                let href = format!("{}{}", self.mangle("mailto:"), text);
                out.push_str(&self.renderer.link(&href, None, &text));
            } else {
                let text = config.escape(&caps[1], false);
                out.push_str(&self.renderer.link(&text, None, &text));
            }
            return Ok(caps[0].len());
        }

        if !self.in_link
            && let Some(url) = &g.url
            && let Some(caps) = url.captures(text)
        {
            log::trace!("url {:?}", &caps[1]);
            let text = config.escape(&caps[1], false);
            out.push_str(&self.renderer.link(&text, None, &text));
            return Ok(caps[0].len());
        }

        if let Some(m) = g.tag.find(text) {
            let tag = m.as_str();
            let lower = tag.to_ascii_lowercase();
            if !self.in_link && lower.starts_with("<a ") {
                self.in_link = true;
            } else if self.in_link && lower.starts_with("</a>") {
                self.in_link = false;
            }
            log::trace!("tag {:?}", tag);
            if config.sanitize {
                match config.sanitizer() {
                    Some(sanitize) => out.push_str(&sanitize(tag)),
                    None => out.push_str(&config.escape(tag, false)),
                }
            } else {
                out.push_str(tag);
            }
            return Ok(m.end());
        }

        if !self.in_link {
            if let Some(link) = try_parse_inline_link(text, g) {
                log::trace!("link {:?}", link.href);
                let target = Link {
                    href: link.href.to_string(),
                    title: link.title.map(str::to_string),
                };
                out.push_str(&self.output_link(link.image, link.text, &target)?);
                return Ok(link.len);
            }

            let reference = try_parse_reference_link(text, g).or_else(|| try_parse_shortcut_reference(text));
            if let Some(reference) = reference {
                match links.get(reference.label) {
                    Some(target) if !target.href.is_empty() => {
                        log::trace!("reference link [{}]", reference.label);
                        out.push_str(&self.output_link(reference.image, reference.text, target)?);
                        return Ok(reference.len);
                    }
                    _ => {
                        log::debug!("Unresolved reference [{}], keeping it as text", reference.label);
                        let first = text.chars().next().map_or(1, char::len_utf8);
                        out.push_str(&text[..first]);
                        return Ok(first);
                    }
                }
            }
        }

        if let Some((len, content)) = try_parse_strong(text, g.pedantic()) {
            let inner = self.output(content)?;
            out.push_str(&self.renderer.strong(&inner));
            return Ok(len);
        }

        if let Some((len, content)) = try_parse_emphasis(text, g.pedantic()) {
            let inner = self.output(content)?;
            out.push_str(&self.renderer.em(&inner));
            return Ok(len);
        }

        if let Some((len, content)) = try_parse_code_span(text) {
            out.push_str(&self.renderer.codespan(&config.escape(content.trim(), true)));
            return Ok(len);
        }

        if let Some(len) = try_parse_hard_break(text, g.break_spaces) {
            out.push_str(&self.renderer.br());
            return Ok(len);
        }

        if g.gfm()
            && let Some((len, content)) = try_parse_strikethrough(text)
        {
            let inner = self.output(content)?;
            out.push_str(&self.renderer.del(&inner));
            return Ok(len);
        }

        let first = text.chars().next().map_or(0, char::len_utf8);
        let Some(stop) = g.text_stop.find_at(text, first) else {
            return Err(Error::residue(text));
        };
        let run = &text[..stop.start()];
        out.push_str(&self.renderer.text(&config.escape(&self.smartypants(run), false)));
        Ok(run.len())
    }

    /// Link or image for a matched bracket construct. Link text is rendered
    /// with link recognition switched off.
    fn output_link(&mut self, image: bool, text: &str, link: &Link) -> Result<String> {
        let href = self.config.escape(&link.href, false);
        let title = link
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| self.config.escape(t, false));

        if image {
            let alt = self.config.escape(text, false);
            return Ok(self.renderer.image(&href, title.as_deref(), &alt));
        }

        let was_in_link = self.in_link;
        self.in_link = true;
        let inner = self.output(text);
        self.in_link = was_in_link;
        Ok(self.renderer.link(&href, title.as_deref(), &inner?))
    }

    fn smartypants(&self, text: &str) -> String {
        if self.config.smartypants {
            utils::smartypants(text)
        } else {
            text.to_string()
        }
    }

    fn mangle(&self, text: &str) -> String {
        if self.config.mangle {
            utils::mangle(text)
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests;
