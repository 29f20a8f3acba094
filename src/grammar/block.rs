use std::sync::LazyLock;

use regex::Regex;

use super::pattern::Pattern;
use crate::config::Config;

pub const BULLET: &str = r"(?:[*+-]|\d+\.)";

const NEWLINE: &str = r"^\n+";
const CODE: &str = r"^( {4}[^\n]+\n*)+";
const HR: &str = r"^( *[-*_]){3,} *(?:\n+|$)";
const HEADING: &str = r"^ *(#{1,6}) *([^\n]+?) *#* *(?:\n+|$)";
const GFM_HEADING: &str = r"^ *(#{1,6}) +([^\n]+?) *#* *(?:\n+|$)";
const LHEADING: &str = r"^([^\n]+)\n *(=|-){2,} *(?:\n+|$)";
const BLOCKQUOTE: &str = r"^( *>[^\n]+(\n[^\n]+)*\n*)+";
const DEF: &str = r#"^ *\[([^\]]+)\]: *<?([^\s>]+)>?(?: +["(]([^\n]+)[")])? *(?:\n+|$)"#;
const TEXT: &str = r"^[^\n]+";
const LIST_HEAD: &str = r"^( *)(bull) ";
const NPTABLE: &str = r"^ *(\S.*\|.*)\n *([-:]+ *\|[-| :]*)\n((?:.*\|.*(?:\n|$))*)\n*";
const TABLE: &str = r"^ *\|(.+)\n *\|( *[-:]+[-| :]*)\n((?: *\|.*(?:\n|$))*)\n*";
// `lheading` is substituted before `heading`, which is a substring of it.
const INTERRUPT: &str = r"^(?:hr|heading|lheading|blockquote|def)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockDialect {
    Base,
    Gfm,
    GfmTables,
}

impl BlockDialect {
    pub fn for_config(config: &Config) -> Self {
        match (config.gfm, config.tables) {
            (true, true) => BlockDialect::GfmTables,
            (true, false) => BlockDialect::Gfm,
            (false, _) => BlockDialect::Base,
        }
    }
}

/// Compiled block rules for one dialect.
///
/// Rules that need look-around or back-references (lists, fences, HTML
/// blocks, paragraphs) are scanners in `block_parser`; the patterns here
/// cover the parts of them a regular expression can express.
#[derive(Debug)]
pub struct BlockGrammar {
    pub dialect: BlockDialect,
    pub newline: Regex,
    pub code: Regex,
    pub hr: Regex,
    pub heading: Regex,
    pub lheading: Regex,
    pub blockquote: Regex,
    pub def: Regex,
    pub text: Regex,
    /// Bullet at the start of the haystack.
    pub bullet: Regex,
    /// Indentation and bullet opening a list or list item.
    pub list_head: Regex,
    /// Constructs that end a paragraph at the start of the following line.
    pub interrupt: Regex,
    pub nptable: Option<Regex>,
    pub table: Option<Regex>,
}

static BASE: LazyLock<BlockGrammar> = LazyLock::new(|| BlockGrammar::build(BlockDialect::Base).unwrap());
static GFM: LazyLock<BlockGrammar> = LazyLock::new(|| BlockGrammar::build(BlockDialect::Gfm).unwrap());
static GFM_TABLES: LazyLock<BlockGrammar> =
    LazyLock::new(|| BlockGrammar::build(BlockDialect::GfmTables).unwrap());

impl BlockGrammar {
    pub fn get(dialect: BlockDialect) -> &'static BlockGrammar {
        match dialect {
            BlockDialect::Base => &BASE,
            BlockDialect::Gfm => &GFM,
            BlockDialect::GfmTables => &GFM_TABLES,
        }
    }

    pub fn for_config(config: &Config) -> &'static BlockGrammar {
        Self::get(BlockDialect::for_config(config))
    }

    fn build(dialect: BlockDialect) -> Result<Self, regex::Error> {
        log::debug!("Building block grammar for {:?}", dialect);
        let gfm = dialect != BlockDialect::Base;
        let tables = dialect == BlockDialect::GfmTables;

        // Paragraph interruption always uses the base heading rule.
        let interrupt = Pattern::new(INTERRUPT)
            .set("hr", HR)
            .set("lheading", LHEADING)
            .set("heading", HEADING)
            .set("blockquote", BLOCKQUOTE)
            .set("def", DEF)
            .build()?;

        Ok(Self {
            dialect,
            newline: Regex::new(NEWLINE)?,
            code: Regex::new(CODE)?,
            hr: Regex::new(HR)?,
            heading: Regex::new(if gfm { GFM_HEADING } else { HEADING })?,
            lheading: Regex::new(LHEADING)?,
            blockquote: Regex::new(BLOCKQUOTE)?,
            def: Regex::new(DEF)?,
            text: Regex::new(TEXT)?,
            bullet: Pattern::new("^bull").set("bull", BULLET).build()?,
            list_head: Pattern::new(LIST_HEAD).set("bull", BULLET).build()?,
            interrupt,
            nptable: tables.then(|| Regex::new(NPTABLE)).transpose()?,
            table: tables.then(|| Regex::new(TABLE)).transpose()?,
        })
    }

    pub fn fences(&self) -> bool {
        self.dialect != BlockDialect::Base
    }

    pub fn tables(&self) -> bool {
        self.dialect == BlockDialect::GfmTables
    }
}
