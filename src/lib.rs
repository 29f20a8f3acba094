pub mod block_parser;
pub mod compiler;
pub mod config;
pub mod error;
pub mod extensions;
pub mod grammar;
pub mod inline_parser;
pub mod renderer;
pub mod token;
pub mod utils;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub use block_parser::Lexed;
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use extensions::ExtensionRegistry;
pub use renderer::{CellFlags, HtmlRenderer, Renderer};
pub use token::{Align, Link, Links, Token};

use block_parser::BlockParser;
use compiler::Compiler;

/// Deepest nesting of containers or inline spans before giving up.
pub(crate) const MAX_NESTING: usize = 128;

static BLANK_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^ +$").unwrap());

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Unify line endings, expand tabs to four spaces, turn no-break spaces
/// into plain spaces and empty whitespace-only lines.
pub fn normalize(src: &str) -> String {
    let src = src
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\t', "    ")
        .replace('\u{a0}', " ")
        .replace('\u{2424}', "\n");
    BLANK_LINE_RE.replace_all(&src, "").into_owned()
}

/// A top-level token with the output line reached after rendering it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugToken {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(flatten)]
    pub token: Token,
}

/// Everything a conversion produced, for inspecting how a document was
/// tokenized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugReport {
    pub tokens: Vec<DebugToken>,
    pub links: Links,
    pub result: String,
}

/// A configured Markdown to HTML converter.
///
/// The converter is immutable while rendering, so one instance can serve
/// many threads. Register block rules before sharing it.
///
/// ```no_run
/// use markout::{Config, Converter};
///
/// let mut converter = Converter::new(Config::default());
/// converter
///     .register_block_rule(r"@@(\w+)", |groups| {
///         groups[1].as_ref().map(|name| format!("<x-{name}></x-{name}>\n"))
///     })
///     .unwrap();
/// let html = converter.render("@@widget").unwrap();
/// ```
pub struct Converter {
    config: Config,
    extensions: ExtensionRegistry,
    renderer: Box<dyn Renderer>,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Converter {
    pub fn new(config: Config) -> Self {
        let renderer = Box::new(HtmlRenderer::new(config.clone()));
        Self {
            config,
            extensions: ExtensionRegistry::new(),
            renderer,
        }
    }

    /// Use a custom rendering sink instead of [`HtmlRenderer`]. Lexing and
    /// inline rendering use the renderer's own [`Renderer::config`].
    pub fn with_renderer(renderer: impl Renderer + 'static) -> Self {
        Self {
            config: renderer.config().clone(),
            extensions: ExtensionRegistry::new(),
            renderer: Box::new(renderer),
        }
    }

    pub fn with_extensions(mut self, extensions: ExtensionRegistry) -> Self {
        self.extensions = extensions;
        self
    }

    /// Register a custom block rule; see [`ExtensionRegistry::register`].
    pub fn register_block_rule(
        &mut self,
        pattern: &str,
        render: impl Fn(&[Option<String>]) -> Option<String> + Send + Sync + 'static,
    ) -> Result<&mut Self> {
        self.extensions.register(pattern, render)?;
        Ok(self)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn extensions(&self) -> &ExtensionRegistry {
        &self.extensions
    }

    /// Normalize and block-tokenize `src`.
    pub fn lex(&self, src: &str) -> Result<Lexed> {
        BlockParser::new(&self.config, &self.extensions).parse(&normalize(src))
    }

    /// Render an already tokenized document.
    pub fn compile(&self, lexed: &Lexed) -> Result<String> {
        Compiler::new(&self.config, lexed, self.renderer.as_ref(), &self.extensions).compile()
    }

    /// Convert `src` to HTML.
    ///
    /// Errors carry a pointer to the issue tracker. With `silent` set they
    /// are rendered into the returned HTML instead.
    pub fn render(&self, src: &str) -> Result<String> {
        #[cfg(debug_assertions)]
        {
            init_logger();
        }

        let rendered = self.lex(src).and_then(|lexed| self.compile(&lexed));
        rendered.or_else(|err| self.recover(err))
    }

    /// Convert `src`, also returning the token stream and link table.
    pub fn debug(&self, src: &str) -> Result<DebugReport> {
        #[cfg(debug_assertions)]
        {
            init_logger();
        }

        let report = self.lex(src).and_then(|lexed| {
            let (result, lines) =
                Compiler::new(&self.config, &lexed, self.renderer.as_ref(), &self.extensions)
                    .compile_with_lines()?;
            let tokens = lexed
                .tokens
                .into_iter()
                .zip(lines)
                .map(|(token, line)| DebugToken { line, token })
                .collect();
            Ok(DebugReport {
                tokens,
                links: lexed.links,
                result,
            })
        });

        report.or_else(|err| {
            self.recover(err).map(|result| DebugReport {
                tokens: Vec::new(),
                links: Links::new(),
                result,
            })
        })
    }

    fn recover(&self, err: Error) -> Result<String> {
        let err = err.reported();
        if !self.config.silent {
            return Err(err);
        }
        log::warn!("Conversion failed: {err}");
        Ok(format!(
            "<p>An error occured:</p><pre>{}</pre>",
            self.config.escape(&err.to_string(), true)
        ))
    }
}

/// Convert Markdown to HTML.
///
/// ```no_run
/// let html = markout::parse("# Hello", None).unwrap();
/// assert_eq!(html, "<h1 id=\"hello\">Hello</h1>\n");
/// ```
pub fn parse(src: &str, config: Option<Config>) -> Result<String> {
    Converter::new(config.unwrap_or_default()).render(src)
}

/// Convert Markdown to HTML with custom block rules.
pub fn parse_with(src: &str, config: Option<Config>, extensions: &ExtensionRegistry) -> Result<String> {
    Converter::new(config.unwrap_or_default())
        .with_extensions(extensions.clone())
        .render(src)
}

/// Block-tokenize Markdown without rendering it.
pub fn lex(src: &str, config: Option<Config>) -> Result<Lexed> {
    Converter::new(config.unwrap_or_default()).lex(src)
}

/// Convert Markdown and report the tokens it was built from.
pub fn debug(src: &str, config: Option<Config>) -> Result<DebugReport> {
    Converter::new(config.unwrap_or_default()).debug(src)
}
