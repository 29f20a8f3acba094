use std::sync::LazyLock;

use regex::Regex;

use super::pattern::Pattern;
use crate::config::Config;

const ESCAPE: &str = r"^\\([\\`*{}\[\]()#+\-.!_>])";
const AUTOLINK: &str = r"^<([^ <>]+(@|:/)[^ <>]+)>";
const URL: &str = r#"^(https?://[^\s<]+[^<.,:;"')\]\s])"#;
const TAG: &str = r#"^<!--[\s\S]*?-->|^</?[A-Za-z0-9_]+(?:"[^"]*"|'[^']*'|[^<'">])*?>"#;
const LINK_TAIL: &str = r"^\]\(href\)";
const HREF: &str = r#"\s*<?([\s\S]*?)>?(?:\s+['"]([\s\S]*?)['"])?\s*"#;
const REFLINK_TAIL: &str = r"^\]\s*\[([^\]]*)\]";
const TEXT_STOP: &str = r"[\\<!\[_*`]| {2,}\n|$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineDialect {
    Base,
    Pedantic,
    Gfm,
    GfmBreaks,
}

impl InlineDialect {
    pub fn for_config(config: &Config) -> Self {
        if config.gfm {
            if config.breaks {
                InlineDialect::GfmBreaks
            } else {
                InlineDialect::Gfm
            }
        } else if config.pedantic {
            InlineDialect::Pedantic
        } else {
            InlineDialect::Base
        }
    }
}

/// Compiled inline rules for one dialect.
#[derive(Debug)]
pub struct InlineGrammar {
    pub dialect: InlineDialect,
    pub escape: Regex,
    pub autolink: Regex,
    pub url: Option<Regex>,
    pub tag: Regex,
    /// Everything of an inline link after its bracketed text.
    pub link_tail: Regex,
    /// Everything of a reference link after its bracketed text.
    pub reflink_tail: Regex,
    /// Where a plain text run ends; searched from the run's second character.
    pub text_stop: Regex,
    /// Spaces required before a newline for a hard break.
    pub break_spaces: usize,
}

static BASE: LazyLock<InlineGrammar> =
    LazyLock::new(|| InlineGrammar::build(InlineDialect::Base).unwrap());
static PEDANTIC: LazyLock<InlineGrammar> =
    LazyLock::new(|| InlineGrammar::build(InlineDialect::Pedantic).unwrap());
static GFM: LazyLock<InlineGrammar> =
    LazyLock::new(|| InlineGrammar::build(InlineDialect::Gfm).unwrap());
static GFM_BREAKS: LazyLock<InlineGrammar> =
    LazyLock::new(|| InlineGrammar::build(InlineDialect::GfmBreaks).unwrap());

impl InlineGrammar {
    pub fn get(dialect: InlineDialect) -> &'static InlineGrammar {
        match dialect {
            InlineDialect::Base => &BASE,
            InlineDialect::Pedantic => &PEDANTIC,
            InlineDialect::Gfm => &GFM,
            InlineDialect::GfmBreaks => &GFM_BREAKS,
        }
    }

    pub fn for_config(config: &Config) -> &'static InlineGrammar {
        Self::get(InlineDialect::for_config(config))
    }

    fn build(dialect: InlineDialect) -> Result<Self, regex::Error> {
        log::debug!("Building inline grammar for {:?}", dialect);
        let gfm = matches!(dialect, InlineDialect::Gfm | InlineDialect::GfmBreaks);
        let breaks = dialect == InlineDialect::GfmBreaks;

        let mut escape = Pattern::new(ESCAPE);
        let mut text_stop = Pattern::new(TEXT_STOP);
        if gfm {
            escape = escape.set("])", "~|])");
            text_stop = text_stop
                .set("]|", "~]|")
                .set("| {2,}", "|https?://| {2,}");
        }
        if breaks {
            text_stop = text_stop.set("{2,}", "*");
        }

        Ok(Self {
            dialect,
            escape: escape.build()?,
            autolink: Regex::new(AUTOLINK)?,
            url: gfm.then(|| Regex::new(URL)).transpose()?,
            tag: Regex::new(TAG)?,
            link_tail: Pattern::new(LINK_TAIL).set("href", HREF).build()?,
            reflink_tail: Regex::new(REFLINK_TAIL)?,
            text_stop: text_stop.build()?,
            break_spaces: if breaks { 0 } else { 2 },
        })
    }

    pub fn gfm(&self) -> bool {
        matches!(self.dialect, InlineDialect::Gfm | InlineDialect::GfmBreaks)
    }

    pub fn pedantic(&self) -> bool {
        self.dialect == InlineDialect::Pedantic
    }
}
