use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use markout::Config;

#[derive(Parser)]
#[command(name = "markout")]
#[command(author, version)]
#[command(about = "A Markdown to HTML converter")]
#[command(
    long_about = "Markout converts Markdown to HTML. It understands GitHub flavored Markdown \
    (fenced code, pipe tables, strikethrough, bare URLs) as well as the original Markdown.pl \
    dialect, and can show the block tokens a document was built from."
)]
#[command(after_help = "\
EXAMPLES:

    # Render a file to stdout
    markout render README.md

    # Render from stdin
    cat README.md | markout render

    # Render several files into a directory
    markout render --output site docs/*.md

    # Inspect the token stream
    markout tokens README.md

CONFIGURATION:

Markout looks for configuration files in this order:
  1. Explicit --config path
  2. markout.toml or .markout.toml in current/parent directories
  3. ~/.config/markout/config.toml (XDG)
  4. Built-in defaults

Example .markout.toml:

    gfm = true
    smart-lists = true
    header-prefix = \"doc-\"")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true)]
    #[arg(help = "Path to configuration file")]
    #[arg(
        long_help = "Path to a custom configuration file. If not specified, markout will \
        search for .markout.toml or markout.toml in the input's directory and its parents, \
        then fall back to ~/.config/markout/config.toml."
    )]
    pub config: Option<PathBuf>,

    /// Log what the parser recognizes
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub overrides: Overrides,
}

/// Command line switches that take precedence over the configuration file.
#[derive(Args, Debug, Default)]
pub struct Overrides {
    /// Disable GitHub flavored extensions
    #[arg(long, global = true)]
    pub no_gfm: bool,

    /// Follow Markdown.pl where it differs
    #[arg(long, global = true)]
    pub pedantic: bool,

    /// Turn every newline in a paragraph into a line break
    #[arg(long, global = true)]
    pub breaks: bool,

    /// Escape raw HTML
    #[arg(long, global = true)]
    pub sanitize: bool,

    /// Start a new list when the bullet kind changes
    #[arg(long, global = true)]
    pub smart_lists: bool,

    /// Typographic quotes, dashes and ellipses
    #[arg(long, global = true)]
    pub smartypants: bool,

    /// Self-close void elements
    #[arg(long, global = true)]
    pub xhtml: bool,
}

impl Overrides {
    pub fn apply(&self, mut config: Config) -> Config {
        if self.no_gfm {
            config.gfm = false;
        }
        config.pedantic |= self.pedantic;
        config.breaks |= self.breaks;
        config.sanitize |= self.sanitize;
        config.smart_lists |= self.smart_lists;
        config.smartypants |= self.smartypants;
        config.xhtml |= self.xhtml;
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render Markdown documents to HTML
    #[command(
        long_about = "Render Markdown documents to HTML. Without files, reads stdin. Output goes \
        to stdout unless --output names a directory, in which case every input is written to \
        <name>.html there."
    )]
    #[command(after_help = "\
EXAMPLES:

    # Render to stdout
    markout render notes.md

    # Render from stdin
    echo '# Heading' | markout render

    # Render with overrides
    markout render --sanitize --smartypants notes.md

    # Render into a directory (exit code 1 if any file fails)
    markout render --output out a.md b.md")]
    Render {
        /// Input files (stdin if none are given)
        #[arg(help = "Input file paths")]
        files: Vec<PathBuf>,

        /// Directory to write <name>.html files into
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the block tokens, link definitions and output of a document
    #[command(
        long_about = "Convert a document and print, as JSON, the block tokens it was tokenized \
        into, the link reference definitions it declares, and the rendered HTML. Top-level \
        tokens carry the output line reached after rendering them."
    )]
    Tokens {
        /// Input file (stdin if not provided)
        #[arg(help = "Input file path")]
        file: Option<PathBuf>,
    },
}
