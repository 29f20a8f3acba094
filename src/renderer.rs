//! The rendering contract and its default HTML implementation.
//!
//! The compiler and the inline tokenizer call one method per construct and
//! concatenate the returned markup. Every method has a default, so a custom
//! renderer only overrides the constructs it cares about.

use percent_encoding::percent_decode_str;

use crate::config::Config;
use crate::token::Align;
use crate::utils::slugify;

/// Where a table cell sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellFlags {
    pub header: bool,
    pub align: Option<Align>,
}

/// URL schemes dropped from links in sanitize mode.
const UNSAFE_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

pub trait Renderer: Send + Sync {
    fn config(&self) -> &Config;

    fn code(&self, code: &str, lang: Option<&str>, escaped: bool) -> String {
        let config = self.config();
        let (code, escaped) = match config.highlight(code, lang) {
            Some(out) if out != code => (out, true),
            _ => (code.to_string(), escaped),
        };
        let body = if escaped {
            code
        } else {
            config.escape(&code, true)
        };

        match lang {
            Some(lang) if !lang.is_empty() => format!(
                "\n<pre><code class=\"{}{}\">{}\n</code></pre>\n",
                config.lang_prefix,
                config.escape(lang, true),
                body
            ),
            _ => format!("\n<pre><code>{}\n</code></pre>\n", body),
        }
    }

    fn blockquote(&self, quote: &str) -> String {
        format!("<blockquote>\n{}</blockquote>\n", quote)
    }

    fn html(&self, html: &str) -> String {
        html.to_string()
    }

    fn heading(&self, text: &str, level: usize, raw: &str) -> String {
        format!(
            "<h{level} id=\"{}{}\">{text}</h{level}>\n",
            self.config().header_prefix,
            slugify(raw)
        )
    }

    fn hr(&self) -> String {
        if self.config().xhtml {
            "<hr/>\n".to_string()
        } else {
            "<hr>\n".to_string()
        }
    }

    fn list(&self, body: &str, ordered: bool) -> String {
        let tag = if ordered { "ol" } else { "ul" };
        format!("\n<{tag}>\n{body}</{tag}>\n")
    }

    fn listitem(&self, text: &str) -> String {
        format!("<li>{}</li>\n", text)
    }

    fn paragraph(&self, text: &str) -> String {
        format!("<p>{}</p>\n", text)
    }

    fn table(&self, header: &str, body: &str) -> String {
        format!("\n<table>\n<thead>\n{header}</thead>\n<tbody>\n{body}</tbody>\n</table>\n")
    }

    fn tablerow(&self, content: &str) -> String {
        format!("<tr>\n{}</tr>\n", content)
    }

    fn tablecell(&self, content: &str, flags: CellFlags) -> String {
        let tag = if flags.header { "th" } else { "td" };
        match flags.align {
            Some(align) => format!(
                "<{tag} style=\"text-align:{}\">{content}</{tag}>\n",
                align.as_str()
            ),
            None => format!("<{tag}>{content}</{tag}>\n"),
        }
    }

    fn strong(&self, text: &str) -> String {
        format!("<strong>{}</strong>", text)
    }

    fn em(&self, text: &str) -> String {
        format!("<em>{}</em>", text)
    }

    fn codespan(&self, text: &str) -> String {
        format!("<code>{}</code>", text)
    }

    fn br(&self) -> String {
        if self.config().xhtml {
            "<br/>".to_string()
        } else {
            "<br>".to_string()
        }
    }

    fn del(&self, text: &str) -> String {
        format!("<del>{}</del>", text)
    }

    /// In sanitize mode a link whose decoded scheme is `javascript:`,
    /// `vbscript:` or `data:` (or whose href does not decode) renders as its
    /// text only.
    fn link(&self, href: &str, title: Option<&str>, text: &str) -> String {
        let config = self.config();
        if config.sanitize {
            let unescaped = config.unescape(href);
            let Ok(decoded) = percent_decode_str(&unescaped).decode_utf8() else {
                log::debug!("Dropping link with undecodable href {:?}", href);
                return text.to_string();
            };
            let scheme: String = decoded
                .chars()
                .filter(|&c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
                .collect::<String>()
                .to_lowercase();
            if UNSAFE_SCHEMES.iter().any(|s| scheme.starts_with(s)) {
                log::debug!("Dropping link with unsafe scheme {:?}", scheme);
                return text.to_string();
            }
        }

        match title {
            Some(title) => format!("<a href=\"{href}\" title=\"{title}\">{text}</a>"),
            None => format!("<a href=\"{href}\">{text}</a>"),
        }
    }

    fn image(&self, href: &str, title: Option<&str>, text: &str) -> String {
        let mut out = format!("<img src=\"{href}\" alt=\"{text}\"");
        if let Some(title) = title {
            out.push_str(&format!(" title=\"{title}\""));
        }
        out.push_str(if self.config().xhtml { "/>" } else { ">" });
        out
    }

    fn text(&self, text: &str) -> String {
        text.to_string()
    }
}

/// The default renderer: plain semantic HTML.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    config: Config,
}

impl HtmlRenderer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl Renderer for HtmlRenderer {
    fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;

    fn renderer(config: Config) -> HtmlRenderer {
        HtmlRenderer::new(config)
    }

    #[test]
    fn code_block_escapes_and_tags_language() {
        let r = renderer(Config::default());
        assert_eq!(
            r.code("a < b", Some("rust"), false),
            "\n<pre><code class=\"lang-rust\">a &lt; b\n</code></pre>\n"
        );
        assert_eq!(r.code("&amp;", None, false), "\n<pre><code>&amp;amp;\n</code></pre>\n");
    }

    #[test]
    fn highlighted_code_is_not_escaped_again() {
        let config = ConfigBuilder::default()
            .highlight(|code, _| Some(format!("<span>{code}</span>")))
            .build();
        let r = renderer(config);
        assert_eq!(
            r.code("x", None, false),
            "\n<pre><code><span>x</span>\n</code></pre>\n"
        );
    }

    #[test]
    fn heading_id_uses_prefix_and_slug() {
        let r = renderer(ConfigBuilder::default().header_prefix("h-").build());
        assert_eq!(
            r.heading("Hello <em>World</em>", 2, "Hello *World*"),
            "<h2 id=\"h-hello-world-\">Hello <em>World</em></h2>\n"
        );
    }

    #[test]
    fn xhtml_self_closes_void_elements() {
        let r = renderer(ConfigBuilder::default().xhtml(true).build());
        assert_eq!(r.hr(), "<hr/>\n");
        assert_eq!(r.br(), "<br/>");
        assert_eq!(r.image("a.png", None, "alt"), "<img src=\"a.png\" alt=\"alt\"/>");
    }

    #[test]
    fn table_cells_carry_alignment() {
        let r = renderer(Config::default());
        let flags = CellFlags {
            header: true,
            align: Some(Align::Center),
        };
        assert_eq!(r.tablecell("a", flags), "<th style=\"text-align:center\">a</th>\n");
        assert_eq!(r.tablecell("b", CellFlags::default()), "<td>b</td>\n");
    }

    #[test]
    fn sanitize_drops_script_links() {
        let r = renderer(ConfigBuilder::default().sanitize(true).build());
        assert_eq!(r.link("javascript:alert(1)", None, "x"), "x");
        assert_eq!(r.link("&#106;avascript&colon;alert(1)", None, "x"), "x");
        assert_eq!(r.link("java%73cript:alert(1)", None, "x"), "x");
        assert_eq!(r.link("%ff", None, "x"), "x");
        assert_eq!(
            r.link("http://ok", Some("t"), "x"),
            "<a href=\"http://ok\" title=\"t\">x</a>"
        );
    }
}
