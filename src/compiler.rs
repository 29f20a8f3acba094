//! Walks the block token stream and renders it.
//!
//! Containers are flat in the stream, so each start marker renders the
//! tokens up to its end marker recursively. Runs of adjacent `Text` tokens
//! are joined with newlines and rendered as one inline span, which is what
//! makes lazy paragraph continuation inside list items work.

use crate::block_parser::Lexed;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::extensions::ExtensionRegistry;
use crate::inline_parser::InlineParser;
use crate::renderer::{CellFlags, Renderer};
use crate::token::{Align, Token};

pub struct Compiler<'a> {
    config: &'a Config,
    renderer: &'a dyn Renderer,
    extensions: &'a ExtensionRegistry,
    inline: InlineParser<'a>,
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Compiler<'a> {
    pub fn new(
        config: &'a Config,
        lexed: &'a Lexed,
        renderer: &'a dyn Renderer,
        extensions: &'a ExtensionRegistry,
    ) -> Self {
        Self {
            config,
            renderer,
            extensions,
            inline: InlineParser::new(config, &lexed.links, renderer),
            tokens: &lexed.tokens,
            pos: 0,
        }
    }

    pub fn compile(mut self) -> Result<String> {
        let mut out = String::new();
        while let Some(token) = self.next() {
            out.push_str(&self.tok(token)?);
        }
        Ok(out)
    }

    /// Like [`Compiler::compile`], additionally returning for every token
    /// the number of output lines reached once the top-level step that
    /// consumed it last was rendered. Tokens inside containers, and steps
    /// still on line 0, get `None`.
    pub fn compile_with_lines(mut self) -> Result<(String, Vec<Option<usize>>)> {
        let mut out = String::new();
        let mut lines = vec![None; self.tokens.len()];
        let mut line = 0;
        while let Some(token) = self.next() {
            let rendered = self.tok(token)?;
            line += rendered.matches('\n').count();
            if line > 0 {
                lines[self.pos - 1] = Some(line);
            }
            out.push_str(&rendered);
        }
        Ok((out, lines))
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    /// Next token inside an open container of kind `open`.
    fn next_in(&mut self, open: &str) -> Result<&'a Token> {
        self.next().ok_or_else(|| Error::UnbalancedToken {
            kind: open.to_string(),
        })
    }

    /// `text` joined with every directly following `Text` token.
    fn parse_text(&mut self, text: &str) -> Result<String> {
        let mut body = text.to_string();
        while let Some(Token::Text { text }) = self.peek() {
            body.push('\n');
            body.push_str(text);
            self.pos += 1;
        }
        self.inline.output(&body)
    }

    fn tok(&mut self, token: &'a Token) -> Result<String> {
        let renderer = self.renderer;
        match token {
            Token::Space => Ok(String::new()),
            Token::Hr => Ok(renderer.hr()),
            Token::Heading { depth, text } => {
                let inner = self.inline.output(text)?;
                Ok(renderer.heading(&inner, *depth, text))
            }
            Token::Code { lang, text, escaped } => Ok(renderer.code(text, lang.as_deref(), *escaped)),
            Token::Table {
                header,
                align,
                cells,
            } => self.table(header, align, cells),
            Token::BlockquoteStart => {
                let mut body = String::new();
                loop {
                    match self.next_in("blockquote_start")? {
                        Token::BlockquoteEnd => break,
                        token => body.push_str(&self.tok(token)?),
                    }
                }
                Ok(renderer.blockquote(&body))
            }
            Token::ListStart { ordered } => {
                let mut body = String::new();
                loop {
                    match self.next_in("list_start")? {
                        Token::ListEnd => break,
                        token => body.push_str(&self.tok(token)?),
                    }
                }
                Ok(renderer.list(&body, *ordered))
            }
            Token::ListItemStart => {
                let mut body = String::new();
                loop {
                    match self.next_in("list_item_start")? {
                        Token::ListItemEnd => break,
                        Token::Text { text } => body.push_str(&self.parse_text(text)?),
                        token => body.push_str(&self.tok(token)?),
                    }
                }
                Ok(renderer.listitem(&body))
            }
            Token::LooseItemStart => {
                let mut body = String::new();
                loop {
                    match self.next_in("loose_item_start")? {
                        Token::ListItemEnd => break,
                        token => body.push_str(&self.tok(token)?),
                    }
                }
                Ok(renderer.listitem(&body))
            }
            Token::Html { pre, text } => {
                let html = if !pre && !self.config.pedantic {
                    self.inline.output(text)?
                } else {
                    text.clone()
                };
                Ok(renderer.html(&html))
            }
            Token::Paragraph { text } => {
                let inner = self.inline.output(text)?;
                Ok(renderer.paragraph(&inner))
            }
            Token::Text { text } => {
                let inner = self.parse_text(text)?;
                if self.config.no_paragraph {
                    Ok(inner)
                } else {
                    Ok(renderer.paragraph(&inner))
                }
            }
            Token::Extension { index, groups } => match self.extensions.render(*index, groups) {
                Some(rendered) => Ok(rendered.unwrap_or_default()),
                None => self.unknown(token),
            },
            Token::ListEnd | Token::ListItemEnd | Token::BlockquoteEnd => self.unknown(token),
        }
    }

    fn table(
        &mut self,
        header: &[String],
        align: &[Option<Align>],
        cells: &[Vec<String>],
    ) -> Result<String> {
        let renderer = self.renderer;
        let align_at = |i: usize| align.get(i).copied().flatten();

        let mut row = String::new();
        for (i, cell) in header.iter().enumerate() {
            let content = self.inline.output(cell)?;
            let flags = CellFlags {
                header: true,
                align: align_at(i),
            };
            row.push_str(&renderer.tablecell(&content, flags));
        }
        let head = renderer.tablerow(&row);

        let mut body = String::new();
        for cells in cells {
            let mut row = String::new();
            for (j, cell) in cells.iter().enumerate() {
                let content = self.inline.output(cell)?;
                let flags = CellFlags {
                    header: false,
                    align: align_at(j),
                };
                row.push_str(&renderer.tablecell(&content, flags));
            }
            body.push_str(&renderer.tablerow(&row));
        }

        Ok(renderer.table(&head, &body))
    }

    /// A token with no rendering: fatal, or skipped with a warning when
    /// the configuration is silent.
    fn unknown(&self, token: &Token) -> Result<String> {
        let err = Error::UnknownToken { kind: token.kind() };
        if self.config.silent {
            log::warn!("{err}");
            Ok(String::new())
        } else {
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::HtmlRenderer;
    use crate::token::Links;

    fn compile_with(config: &Config, extensions: &ExtensionRegistry, tokens: Vec<Token>) -> Result<String> {
        let lexed = Lexed {
            tokens,
            links: Links::new(),
        };
        let renderer = HtmlRenderer::new(config.clone());
        Compiler::new(config, &lexed, &renderer, extensions).compile()
    }

    fn compile(tokens: Vec<Token>) -> Result<String> {
        compile_with(&Config::default(), &ExtensionRegistry::new(), tokens)
    }

    fn text(s: &str) -> Token {
        Token::Text { text: s.into() }
    }

    #[test]
    fn adjacent_text_tokens_join_into_one_paragraph() {
        let out = compile(vec![text("a"), text("*b*")]).unwrap();
        assert_eq!(out, "<p>a\n<em>b</em></p>\n");
    }

    #[test]
    fn no_paragraph_leaves_text_bare() {
        let mut config = Config::default();
        config.no_paragraph = true;
        let out = compile_with(&config, &ExtensionRegistry::new(), vec![text("a")]).unwrap();
        assert_eq!(out, "a");
    }

    #[test]
    fn tight_items_render_text_without_paragraphs() {
        let out = compile(vec![
            Token::ListStart { ordered: true },
            Token::ListItemStart,
            text("one"),
            Token::ListItemEnd,
            Token::LooseItemStart,
            text("two"),
            Token::ListItemEnd,
            Token::ListEnd,
        ])
        .unwrap();
        assert_eq!(out, "\n<ol>\n<li>one</li>\n<li><p>two</p>\n</li>\n</ol>\n");
    }

    #[test]
    fn html_is_inline_rendered_unless_pre() {
        let out = compile(vec![
            Token::Html {
                pre: false,
                text: "<div>*a*</div>".into(),
            },
            Token::Html {
                pre: true,
                text: "<pre>*a*</pre>".into(),
            },
        ])
        .unwrap();
        assert_eq!(out, "<div><em>a</em></div><pre>*a*</pre>");
    }

    #[test]
    fn table_rows_use_column_alignment() {
        let out = compile(vec![Token::Table {
            header: vec!["a".into(), "b".into()],
            align: vec![Some(Align::Right), None],
            cells: vec![vec!["1".into(), "2".into(), "3".into()]],
        }])
        .unwrap();
        assert_eq!(
            out,
            "\n<table>\n<thead>\n<tr>\n<th style=\"text-align:right\">a</th>\n<th>b</th>\n</tr>\n</thead>\n\
             <tbody>\n<tr>\n<td style=\"text-align:right\">1</td>\n<td>2</td>\n<td>3</td>\n</tr>\n</tbody>\n</table>\n"
        );
    }

    #[test]
    fn unclosed_container_is_an_error() {
        let err = compile(vec![Token::BlockquoteStart, text("a")]).unwrap_err();
        assert!(matches!(err, Error::UnbalancedToken { ref kind } if kind == "blockquote_start"));
    }

    #[test]
    fn stray_end_marker_is_unknown() {
        let err = compile(vec![Token::ListEnd]).unwrap_err();
        assert_eq!(err.to_string(), "Token with \"list_end\" type was not found.");
    }

    #[test]
    fn unknown_extension_is_skipped_when_silent() {
        let mut config = Config::default();
        config.silent = true;
        let tokens = vec![
            Token::Extension {
                index: 2,
                groups: vec![Some("x".into())],
            },
            Token::Paragraph { text: "after".into() },
        ];
        let out = compile_with(&config, &ExtensionRegistry::new(), tokens).unwrap();
        assert_eq!(out, "<p>after</p>\n");
    }

    #[test]
    fn extension_render_output_is_inserted() {
        let mut extensions = ExtensionRegistry::new();
        extensions
            .register(r"x", |groups| groups[0].as_ref().map(|m| format!("[{m}]")))
            .unwrap()
            .register(r"y", |_| None)
            .unwrap();
        let tokens = vec![
            Token::Extension {
                index: 0,
                groups: vec![Some("x".into())],
            },
            Token::Extension {
                index: 1,
                groups: vec![Some("y".into())],
            },
        ];
        let out = compile_with(&Config::default(), &extensions, tokens).unwrap();
        assert_eq!(out, "[x]");
    }

    #[test]
    fn lines_annotate_last_consumed_token() {
        let lexed = Lexed {
            tokens: vec![
                Token::Heading {
                    depth: 1,
                    text: "A".into(),
                },
                Token::Space,
                text("b"),
                text("c"),
            ],
            links: Links::new(),
        };
        let config = Config::default();
        let renderer = HtmlRenderer::new(config.clone());
        let extensions = ExtensionRegistry::new();
        let (out, lines) = Compiler::new(&config, &lexed, &renderer, &extensions)
            .compile_with_lines()
            .unwrap();
        assert_eq!(out, "<h1 id=\"a\">A</h1>\n<p>b\nc</p>\n");
        assert_eq!(lines, vec![Some(1), Some(1), None, Some(3)]);
    }
}
