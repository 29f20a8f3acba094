//! Block tokens and the link reference table.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::utils::normalize_label;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

/// A block token.
///
/// Containers are flat: a `ListStart` is followed by its items and closed by
/// a matching `ListEnd`, and likewise for items and blockquotes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Token {
    Space,
    Text {
        text: String,
    },
    Paragraph {
        text: String,
    },
    Heading {
        depth: usize,
        text: String,
    },
    ListStart {
        ordered: bool,
    },
    ListEnd,
    LooseItemStart,
    ListItemStart,
    ListItemEnd,
    BlockquoteStart,
    BlockquoteEnd,
    Code {
        #[serde(skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
        text: String,
        escaped: bool,
    },
    Table {
        header: Vec<String>,
        align: Vec<Option<Align>>,
        cells: Vec<Vec<String>>,
    },
    Html {
        /// Emit the text as is instead of running it through the inline
        /// tokenizer.
        pre: bool,
        text: String,
    },
    Hr,
    /// Match of the custom block rule registered at `index`.
    Extension {
        index: usize,
        groups: Vec<Option<String>>,
    },
}

impl Token {
    /// Kind name used in diagnostics, e.g. `list_start` or `extension1`.
    pub fn kind(&self) -> String {
        let name = match self {
            Token::Space => "space",
            Token::Text { .. } => "text",
            Token::Paragraph { .. } => "paragraph",
            Token::Heading { .. } => "heading",
            Token::ListStart { .. } => "list_start",
            Token::ListEnd => "list_end",
            Token::LooseItemStart => "loose_item_start",
            Token::ListItemStart => "list_item_start",
            Token::ListItemEnd => "list_item_end",
            Token::BlockquoteStart => "blockquote_start",
            Token::BlockquoteEnd => "blockquote_end",
            Token::Code { .. } => "code",
            Token::Table { .. } => "table",
            Token::Html { .. } => "html",
            Token::Hr => "hr",
            Token::Extension { index, .. } => return format!("extension{}", index + 1),
        };
        name.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Link reference definitions keyed by normalized label.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Links(BTreeMap<String, Link>);

impl Links {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition. A later definition of the same label wins.
    pub fn insert(&mut self, label: &str, link: Link) {
        self.0.insert(normalize_label(label), link);
    }

    pub fn get(&self, label: &str) -> Option<&Link> {
        self.0.get(&normalize_label(label))
    }

    pub fn extend(&mut self, other: Links) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Link)> {
        self.0.iter()
    }
}
