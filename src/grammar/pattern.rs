//! Composition of grammar rules from template sources.
//!
//! Rules are written once as templates with named placeholders (`bull`,
//! `hr`, `def`, ...) and assembled by substituting the source of other rules.
//! Start anchors inside a substituted source are dropped so the embedded rule
//! can match mid-pattern.

use std::sync::LazyLock;

use regex::Regex;

static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(^|[^\[])\^").unwrap());

/// Remove every `^` that is not the negation marker of a character class.
pub fn strip_anchors(source: &str) -> String {
    ANCHOR_RE.replace_all(source, "${1}").into_owned()
}

#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
}

impl Pattern {
    pub fn new(template: &str) -> Self {
        Self {
            source: template.to_string(),
        }
    }

    /// Replace every occurrence of `name` with `sub`, minus its anchors.
    pub fn set(mut self, name: &str, sub: &str) -> Self {
        self.source = self.source.replace(name, &strip_anchors(sub));
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn build(&self) -> Result<Regex, regex::Error> {
        Regex::new(&self.source)
    }
}
