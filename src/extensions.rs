//! Custom block rules.
//!
//! Each registered rule is tried, in registration order, after every
//! built-in block rule and before the paragraph rule. A match becomes a
//! [`Token::Extension`] carrying the capture groups, which the compiler hands
//! back to the rule's render callback.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::error::Result;
use crate::token::Token;

pub type BlockRenderFn = Arc<dyn Fn(&[Option<String>]) -> Option<String> + Send + Sync>;

#[derive(Clone)]
struct BlockRule {
    pattern: Regex,
    render: BlockRenderFn,
}

#[derive(Clone, Default)]
pub struct ExtensionRegistry {
    rules: Vec<BlockRule>,
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|rule| rule.pattern.as_str()))
            .finish()
    }
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule. The pattern is anchored at the cursor; `render`
    /// receives the groups (index 0 is the whole match) and returns the
    /// markup to emit, or `None` to emit nothing.
    pub fn register(
        &mut self,
        pattern: &str,
        render: impl Fn(&[Option<String>]) -> Option<String> + Send + Sync + 'static,
    ) -> Result<&mut Self> {
        let pattern = Regex::new(&format!("^(?:{pattern})"))?;
        log::debug!("Registered block rule {} as extension{}", pattern, self.rules.len() + 1);
        self.rules.push(BlockRule {
            pattern,
            render: Arc::new(render),
        });
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule matching at the start of `text`, as consumed length and
    /// token. Empty matches are ignored since they would not advance.
    pub(crate) fn match_at(&self, text: &str) -> Option<(usize, Token)> {
        self.rules.iter().enumerate().find_map(|(index, rule)| {
            let caps = rule.pattern.captures(text)?;
            let len = caps.get(0)?.end();
            if len == 0 {
                return None;
            }
            let groups = caps
                .iter()
                .map(|m| m.map(|m| m.as_str().to_string()))
                .collect();
            log::debug!("Matched extension{} ({} bytes)", index + 1, len);
            Some((len, Token::Extension { index, groups }))
        })
    }

    /// Run the callback of rule `index`. `None` when no such rule exists.
    pub(crate) fn render(&self, index: usize, groups: &[Option<String>]) -> Option<Option<String>> {
        self.rules.get(index).map(|rule| (rule.render)(groups))
    }
}
