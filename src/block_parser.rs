use serde::Serialize;

use crate::MAX_NESTING;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::extensions::ExtensionRegistry;
use crate::grammar::BlockGrammar;
use crate::token::{Links, Token};

mod blockquotes;
mod code_blocks;
mod headings;
mod html_blocks;
mod lists;
mod paragraphs;
mod reference_definitions;
mod tables;

use blockquotes::try_parse_blockquote;
use code_blocks::{try_parse_fenced_code, try_parse_indented_code};
use headings::{try_parse_atx_heading, try_parse_setext_heading};
use html_blocks::{starts_block_tag, try_parse_html_block};
use lists::{split_list_items, starts_list, try_parse_list};
use paragraphs::try_parse_paragraph;
use reference_definitions::try_parse_reference_definition;
use tables::{build_nptable, build_table};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Output of block tokenizing: the flat token stream and every link
/// reference definition found along the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub links: Links,
}

pub struct BlockParser<'a> {
    config: &'a Config,
    grammar: &'static BlockGrammar,
    extensions: &'a ExtensionRegistry,
    tokens: Vec<Token>,
    links: Links,
}

impl<'a> BlockParser<'a> {
    pub fn new(config: &'a Config, extensions: &'a ExtensionRegistry) -> Self {
        Self {
            config,
            grammar: BlockGrammar::for_config(config),
            extensions,
            tokens: Vec::new(),
            links: Links::new(),
        }
    }

    pub fn parse(mut self, src: &str) -> Result<Lexed> {
        #[cfg(debug_assertions)]
        {
            init_logger();
        }

        log::debug!("Starting block parse with {:?} grammar", self.grammar.dialect);
        self.tokenize(src, true, false, 0)?;
        log::debug!(
            "Block parse produced {} tokens and {} link definitions",
            self.tokens.len(),
            self.links.len()
        );
        Ok(Lexed {
            tokens: self.tokens,
            links: self.links,
        })
    }

    /// Tokenize `src` completely, appending to the shared token stream.
    fn tokenize(&mut self, src: &str, top: bool, in_blockquote: bool, depth: usize) -> Result<()> {
        if depth > MAX_NESTING {
            return Err(Error::NestingTooDeep { limit: MAX_NESTING });
        }

        let mut rest = src;
        while !rest.is_empty() {
            if let Some(m) = self.grammar.newline.find(rest) {
                if m.len() > 1 {
                    self.tokens.push(Token::Space);
                }
                rest = &rest[m.end()..];
                if rest.is_empty() {
                    break;
                }
            }
            let consumed = self.parse_block(rest, top, in_blockquote, depth)?;
            rest = &rest[consumed..];
        }
        Ok(())
    }

    /// Try every block rule in order at the start of `text` and return the
    /// number of bytes the first matching rule consumed.
    fn parse_block(&mut self, text: &str, top: bool, in_blockquote: bool, depth: usize) -> Result<usize> {
        let g = self.grammar;

        if let Some((len, code)) = try_parse_indented_code(text, &g.code, self.config.pedantic) {
            self.tokens.push(Token::Code {
                lang: None,
                text: code,
                escaped: false,
            });
            return Ok(len);
        }

        if g.fences()
            && let Some(fence) = try_parse_fenced_code(text)
        {
            self.tokens.push(Token::Code {
                lang: fence.lang.map(str::to_string),
                text: fence.content.to_string(),
                escaped: false,
            });
            return Ok(fence.len);
        }

        if let Some(heading) = try_parse_atx_heading(text, &g.heading) {
            self.tokens.push(Token::Heading {
                depth: heading.depth,
                text: heading.text.to_string(),
            });
            return Ok(heading.len);
        }

        if top
            && let Some(rule) = &g.nptable
            && let Some(caps) = rule.captures(text)
        {
            self.tokens.push(build_nptable(&caps));
            return Ok(caps.get(0).map_or(0, |m| m.end()));
        }

        if let Some(heading) = try_parse_setext_heading(text, &g.lheading) {
            self.tokens.push(Token::Heading {
                depth: heading.depth,
                text: heading.text.to_string(),
            });
            return Ok(heading.len);
        }

        if let Some(m) = g.hr.find(text) {
            log::debug!("Parsed thematic break");
            self.tokens.push(Token::Hr);
            return Ok(m.end());
        }

        if let Some((len, body)) = try_parse_blockquote(text, &g.blockquote) {
            self.tokens.push(Token::BlockquoteStart);
            self.tokenize(&body, top, true, depth + 1)?;
            self.tokens.push(Token::BlockquoteEnd);
            return Ok(len);
        }

        if let Some(head) = try_parse_list(text, g) {
            let list = split_list_items(
                &text[..head.len],
                &head,
                g,
                self.config.pedantic,
                self.config.smart_lists,
            );
            self.tokens.push(Token::ListStart {
                ordered: head.ordered(),
            });
            for item in list.items {
                self.tokens.push(if item.loose {
                    Token::LooseItemStart
                } else {
                    Token::ListItemStart
                });
                self.tokenize(&item.body, false, in_blockquote, depth + 1)?;
                self.tokens.push(Token::ListItemEnd);
            }
            self.tokens.push(Token::ListEnd);
            return Ok(list.len);
        }

        if let Some(block) = try_parse_html_block(text) {
            let raw = &text[..block.len];
            let sanitizer = self.config.sanitizer();
            let token = if self.config.sanitize {
                match sanitizer {
                    Some(sanitize) => Token::Html {
                        pre: true,
                        text: sanitize(raw),
                    },
                    None => Token::Paragraph {
                        text: raw.to_string(),
                    },
                }
            } else {
                Token::Html {
                    pre: sanitizer.is_none()
                        && matches!(block.tag, Some("pre" | "script" | "style")),
                    text: raw.to_string(),
                }
            };
            self.tokens.push(token);
            return Ok(block.len);
        }

        if top
            && !in_blockquote
            && let Some((len, label, link)) = try_parse_reference_definition(text, &g.def)
        {
            self.links.insert(label, link);
            return Ok(len);
        }

        if top
            && let Some(rule) = &g.table
            && let Some(caps) = rule.captures(text)
        {
            self.tokens.push(build_table(&caps));
            return Ok(caps.get(0).map_or(0, |m| m.end()));
        }

        if let Some((len, token)) = self.extensions.match_at(text) {
            self.tokens.push(token);
            return Ok(len);
        }

        if top {
            let interrupts = |line: &str| {
                g.interrupt.is_match(line)
                    || starts_block_tag(line)
                    || (g.fences() && (try_parse_fenced_code(line).is_some() || starts_list(line, g)))
            };
            if let Some((len, group)) = try_parse_paragraph(text, interrupts) {
                let token = match group.strip_suffix('\n') {
                    Some(body) => Token::Paragraph {
                        text: body.to_string(),
                    },
                    None if !self.tokens.is_empty() => Token::Paragraph {
                        text: group.to_string(),
                    },
                    None => Token::Text {
                        text: group.to_string(),
                    },
                };
                self.tokens.push(token);
                return Ok(len);
            }
        }

        if let Some(m) = g.text.find(text) {
            self.tokens.push(Token::Text {
                text: m.as_str().to_string(),
            });
            return Ok(m.end());
        }

        Err(Error::residue(text))
    }
}

#[cfg(test)]
mod tests {
    mod blockquotes;
    mod helpers;
    mod html;
    mod lists;
    mod paragraphs;
    mod pedantic;
    mod tables;
    mod total_consumption;
}
