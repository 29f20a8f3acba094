//! Grammar tables for every supported dialect.
//!
//! Tables are assembled with [`pattern::Pattern`] on first use and shared for
//! the rest of the process.

pub mod block;
pub mod inline;
pub mod pattern;

pub use block::{BlockDialect, BlockGrammar};
pub use inline::{InlineDialect, InlineGrammar};
