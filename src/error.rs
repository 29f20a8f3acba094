use thiserror::Error;

pub const REPORT_URL: &str = "https://github.com/markout-rs/markout/issues";

#[derive(Debug, Error)]
pub enum Error {
    /// No rule matched the remaining input.
    #[error("Infinite loop on byte: {byte}, near text '{excerpt}...'")]
    GrammarResidue { byte: u32, excerpt: String },

    #[error("Token with \"{kind}\" type was not found.")]
    UnknownToken { kind: String },

    #[error("Token stream ended inside an open \"{kind}\"")]
    UnbalancedToken { kind: String },

    #[error("Nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("invalid block rule pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("{source}\nPlease report this to {report_url}")]
    Reported {
        #[source]
        source: Box<Error>,
        report_url: &'static str,
    },
}

impl Error {
    pub(crate) fn residue(rest: &str) -> Self {
        Error::GrammarResidue {
            byte: rest.chars().next().map(|c| c as u32).unwrap_or(0),
            excerpt: rest.chars().take(30).collect(),
        }
    }

    pub(crate) fn reported(self) -> Self {
        match self {
            Error::Reported { .. } => self,
            other => Error::Reported {
                source: Box::new(other),
                report_url: REPORT_URL,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
