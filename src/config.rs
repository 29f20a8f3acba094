use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::utils;

pub type SanitizeFn = Arc<dyn Fn(&str) -> String + Send + Sync>;
pub type HighlightFn = Arc<dyn Fn(&str, Option<&str>) -> Option<String> + Send + Sync>;
pub type EscapeFn = Arc<dyn Fn(&str, bool) -> String + Send + Sync>;
pub type UnescapeFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Callback options. These cannot come from a configuration file, so they
/// are skipped by deserialization and set through [`ConfigBuilder`].
#[derive(Clone, Default)]
pub struct Hooks {
    /// Replaces raw HTML when `sanitize` is on (default: escape it).
    pub sanitizer: Option<SanitizeFn>,
    /// Syntax highlighter for code blocks. Output that differs from the
    /// input is taken as already escaped.
    pub highlight: Option<HighlightFn>,
    pub escape: Option<EscapeFn>,
    pub unescape: Option<UnescapeFn>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("sanitizer", &self.sanitizer.is_some())
            .field("highlight", &self.highlight.is_some())
            .field("escape", &self.escape.is_some())
            .field("unescape", &self.unescape.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub flavored extensions: fences, strikethrough, bare URLs.
    pub gfm: bool,
    /// Pipe tables. Only effective together with `gfm`.
    pub tables: bool,
    /// Every newline inside a paragraph is a hard break. Requires `gfm`.
    pub breaks: bool,
    /// Follow the original Markdown.pl behavior where it differs.
    pub pedantic: bool,
    /// Escape raw HTML (or pass it through `Hooks::sanitizer`).
    pub sanitize: bool,
    /// Obfuscate e-mail autolinks with random character references.
    pub mangle: bool,
    /// Start a new list when the bullet kind changes.
    #[serde(alias = "smart-lists")]
    pub smart_lists: bool,
    /// Render errors into the output instead of returning them.
    pub silent: bool,
    /// Prefix for the class of a code block's language.
    #[serde(alias = "lang-prefix")]
    pub lang_prefix: String,
    /// Typographic quotes, dashes and ellipses.
    pub smartypants: bool,
    /// Prefix for generated heading ids.
    #[serde(alias = "header-prefix")]
    pub header_prefix: String,
    /// Self-close void elements (`<br/>`, `<hr/>`, `<img/>`).
    pub xhtml: bool,
    /// Leave bare top-level text unwrapped instead of in `<p>`.
    #[serde(alias = "no-paragraph")]
    pub no_paragraph: bool,
    #[serde(skip)]
    pub hooks: Hooks,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gfm: true,
            tables: true,
            breaks: false,
            pedantic: false,
            sanitize: false,
            mangle: true,
            smart_lists: false,
            silent: false,
            lang_prefix: "lang-".to_string(),
            smartypants: false,
            header_prefix: String::new(),
            xhtml: false,
            no_paragraph: false,
            hooks: Hooks::default(),
        }
    }
}

impl Config {
    pub fn escape(&self, html: &str, encode: bool) -> String {
        match &self.hooks.escape {
            Some(f) => f(html, encode),
            None => utils::escape(html, encode),
        }
    }

    pub fn unescape(&self, html: &str) -> String {
        match &self.hooks.unescape {
            Some(f) => f(html),
            None => utils::unescape(html),
        }
    }

    pub fn highlight(&self, code: &str, lang: Option<&str>) -> Option<String> {
        self.hooks.highlight.as_ref().and_then(|f| f(code, lang))
    }

    pub fn sanitizer(&self) -> Option<&SanitizeFn> {
        self.hooks.sanitizer.as_ref()
    }
}

#[derive(Default, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn gfm(mut self, enabled: bool) -> Self {
        self.config.gfm = enabled;
        self
    }

    pub fn tables(mut self, enabled: bool) -> Self {
        self.config.tables = enabled;
        self
    }

    pub fn breaks(mut self, enabled: bool) -> Self {
        self.config.breaks = enabled;
        self
    }

    pub fn pedantic(mut self, enabled: bool) -> Self {
        self.config.pedantic = enabled;
        self
    }

    pub fn sanitize(mut self, enabled: bool) -> Self {
        self.config.sanitize = enabled;
        self
    }

    pub fn mangle(mut self, enabled: bool) -> Self {
        self.config.mangle = enabled;
        self
    }

    pub fn smart_lists(mut self, enabled: bool) -> Self {
        self.config.smart_lists = enabled;
        self
    }

    pub fn silent(mut self, enabled: bool) -> Self {
        self.config.silent = enabled;
        self
    }

    pub fn lang_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.lang_prefix = prefix.into();
        self
    }

    pub fn smartypants(mut self, enabled: bool) -> Self {
        self.config.smartypants = enabled;
        self
    }

    pub fn header_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.header_prefix = prefix.into();
        self
    }

    pub fn xhtml(mut self, enabled: bool) -> Self {
        self.config.xhtml = enabled;
        self
    }

    pub fn no_paragraph(mut self, enabled: bool) -> Self {
        self.config.no_paragraph = enabled;
        self
    }

    pub fn sanitizer(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.config.hooks.sanitizer = Some(Arc::new(f));
        self
    }

    pub fn highlight(
        mut self,
        f: impl Fn(&str, Option<&str>) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.config.hooks.highlight = Some(Arc::new(f));
        self
    }

    pub fn escape(mut self, f: impl Fn(&str, bool) -> String + Send + Sync + 'static) -> Self {
        self.config.hooks.escape = Some(Arc::new(f));
        self
    }

    pub fn unescape(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.config.hooks.unescape = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl From<Config> for ConfigBuilder {
    fn from(config: Config) -> Self {
        Self { config }
    }
}

const CANDIDATE_NAMES: &[&str] = &[".markout.toml", "markout.toml"];

fn parse_config_str(s: &str, path: &Path) -> io::Result<Config> {
    toml::from_str::<Config>(s).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid config {}: {e}", path.display()),
        )
    })
}

fn read_config(path: &Path) -> io::Result<Config> {
    log::debug!("Reading config from: {}", path.display());
    let s = fs::read_to_string(path)?;
    let config = parse_config_str(&s, path)?;
    log::info!("Loaded config from: {}", path.display());
    Ok(config)
}

fn find_in_tree(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        for name in CANDIDATE_NAMES {
            let p = dir.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
    }
    None
}

fn xdg_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        let p = Path::new(&xdg).join("markout").join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }
    if let Ok(home) = env::var("HOME") {
        let p = Path::new(&home)
            .join(".config")
            .join("markout")
            .join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }
    None
}

/// Load configuration with precedence:
/// 1) explicit path (error if unreadable/invalid)
/// 2) walk up from start_dir: .markout.toml, markout.toml
/// 3) XDG: $XDG_CONFIG_HOME/markout/config.toml or ~/.config/markout/config.toml
/// 4) default config
pub fn load(explicit: Option<&Path>, start_dir: &Path) -> io::Result<(Config, Option<PathBuf>)> {
    if let Some(path) = explicit {
        let cfg = read_config(path)?;
        return Ok((cfg, Some(path.to_path_buf())));
    }

    if let Some(p) = find_in_tree(start_dir)
        && let Ok(cfg) = read_config(&p)
    {
        return Ok((cfg, Some(p)));
    }

    if let Some(p) = xdg_config_path()
        && let Ok(cfg) = read_config(&p)
    {
        return Ok((cfg, Some(p)));
    }

    log::debug!("No config file found, using defaults");
    Ok((Config::default(), None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let cfg = toml::from_str::<Config>("pedantic = true").unwrap();
        assert!(cfg.pedantic);
        assert!(cfg.gfm);
        assert!(cfg.mangle);
        assert_eq!(cfg.lang_prefix, "lang-");
    }

    #[test]
    fn kebab_case_aliases_are_accepted() {
        let cfg = toml::from_str::<Config>(
            "smart-lists = true\nheader-prefix = \"doc-\"\nno_paragraph = true",
        )
        .unwrap();
        assert!(cfg.smart_lists);
        assert_eq!(cfg.header_prefix, "doc-");
        assert!(cfg.no_paragraph);
    }

    #[test]
    fn unknown_option_type_is_rejected() {
        let err = parse_config_str("gfm = \"yes\"", Path::new("x.toml")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("x.toml"));
    }

    #[test]
    fn load_finds_config_in_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".markout.toml"), "xhtml = true\n").unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let (cfg, path) = load(None, &nested).unwrap();
        assert!(cfg.xhtml);
        assert_eq!(path, Some(dir.path().join(".markout.toml")));
    }

    #[test]
    fn load_explicit_path_errors_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(Some(&dir.path().join("nope.toml")), dir.path()).is_err());
    }

    #[test]
    fn builder_sets_hooks() {
        let cfg = ConfigBuilder::default()
            .sanitize(true)
            .sanitizer(|html| html.to_uppercase())
            .highlight(|code, _| Some(format!("<b>{code}</b>")))
            .build();
        assert!(cfg.sanitize);
        assert_eq!(cfg.sanitizer().map(|f| f("<i>")), Some("<I>".to_string()));
        assert_eq!(cfg.highlight("x", None), Some("<b>x</b>".to_string()));
        assert_eq!(cfg.escape("<", false), "&lt;");
    }
}
